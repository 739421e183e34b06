pub mod ban;
pub mod kick;
pub mod lockdown;
pub mod logging;
pub mod nickname;
pub mod platform;
pub mod purge;
pub mod timeout;
pub mod unban;

pub(crate) mod replies;
#[cfg(test)]
pub(crate) mod testing;

use std::time::Duration;

use chrono::{DateTime, Utc};
use poise::serenity_prelude as serenity;
use tracing::{debug, info, warn};

use atc_core::gateway::{GatewayError, ModerationGateway, Subject};
use atc_core::{BotConfig, Error};
use atc_utils::time::now_utc;

use logging::{AuditEntry, AuditTag, send_log};

/// Everything a handler needs for one invocation.
pub struct ActionContext<'a> {
    pub gateway: &'a dyn ModerationGateway,
    pub config: &'a BotConfig,
    pub actor: Subject,
    pub channel_id: serenity::ChannelId,
    pub now: DateTime<Utc>,
}

impl<'a> ActionContext<'a> {
    pub fn new(
        gateway: &'a dyn ModerationGateway,
        config: &'a BotConfig,
        actor: &serenity::User,
        channel_id: serenity::ChannelId,
    ) -> Self {
        Self {
            gateway,
            config,
            actor: Subject::from_user(actor),
            channel_id,
            now: now_utc(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ActionRecord {
    pub description: String,
    pub target: Option<String>,
    pub reason: Option<String>,
    pub at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ActionOutcome {
    /// Bad or missing input; nothing was attempted.
    Rejected,
    /// The platform call failed; nothing was logged.
    Failed(String),
    Completed(ActionRecord),
}

pub(crate) async fn reject(
    cx: &ActionContext<'_>,
    message: impl AsRef<str>,
) -> Result<ActionOutcome, Error> {
    cx.gateway.reply(message.as_ref()).await?;
    Ok(ActionOutcome::Rejected)
}

pub(crate) async fn report_failure(
    cx: &ActionContext<'_>,
    action: &'static str,
    source: GatewayError,
) -> Result<ActionOutcome, Error> {
    warn!(?source, action, actor = cx.actor.id.get(), "moderation request failed");
    cx.gateway.reply(&format!(":warning: {}", source)).await?;
    Ok(ActionOutcome::Failed(source.to_string()))
}

/// Post the confirmation for a mutation that already went through.
///
/// Delivery failures are traced and swallowed so the audit entry still follows.
pub(crate) async fn confirm(cx: &ActionContext<'_>, content: &str, lifetime: Option<Duration>) {
    let sent = match lifetime {
        Some(lifetime) => cx.gateway.reply_transient(content, lifetime).await,
        None => cx.gateway.reply(content).await,
    };

    if let Err(source) = sent {
        warn!(
            ?source,
            actor = cx.actor.id.get(),
            channel_id = cx.channel_id.get(),
            "failed to send confirmation"
        );
    }
}

/// Write the audit entry for a completed action and describe it.
pub(crate) async fn record(
    cx: &ActionContext<'_>,
    tag: AuditTag,
    description: String,
    target: Option<&Subject>,
    reason: Option<String>,
) -> ActionOutcome {
    let entry = AuditEntry::new(tag, cx.now, &cx.actor.tag, description.clone());
    send_log(cx, &entry).await;

    ActionOutcome::Completed(ActionRecord {
        description,
        target: target.map(|subject| subject.tag.clone()),
        reason,
        at: cx.now,
    })
}

/// Trace how an invocation ended.
pub(crate) fn trace_outcome(action: &'static str, outcome: &ActionOutcome) {
    match outcome {
        ActionOutcome::Completed(record) => info!(
            action,
            target = record.target.as_deref(),
            reason = record.reason.as_deref(),
            at = %record.at,
            "{}",
            record.description
        ),
        ActionOutcome::Failed(detail) => debug!(action, detail = detail.as_str(), "action failed"),
        ActionOutcome::Rejected => debug!(action, "action rejected"),
    }
}
