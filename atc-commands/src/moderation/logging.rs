use chrono::{DateTime, Utc};
use tracing::{error, warn};

use poise::serenity_prelude as serenity;

use atc_core::gateway::GatewayError;
use atc_utils::time::format_log_timestamp;

use super::ActionContext;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuditTag {
    Nickname,
    Timeout,
    Kick,
    Ban,
    Unban,
    Purge,
    Lock,
    Unlock,
}

impl AuditTag {
    pub fn emoji(self) -> &'static str {
        match self {
            Self::Nickname => ":pencil:",
            Self::Timeout => ":mute:",
            Self::Kick => ":boot:",
            Self::Ban => ":hammer:",
            Self::Unban => ":o:",
            Self::Purge => ":wastebasket:",
            Self::Lock => ":lock:",
            Self::Unlock => ":unlock:",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AuditEntry {
    pub tag: AuditTag,
    pub at: DateTime<Utc>,
    pub actor: String,
    pub description: String,
}

impl AuditEntry {
    pub fn new(tag: AuditTag, at: DateTime<Utc>, actor: &str, description: String) -> Self {
        Self {
            tag,
            at,
            actor: actor.to_owned(),
            description,
        }
    }

    /// `:boot: `2024-05-01 12:00:00 UTC`` followed by `**actor** description`.
    pub fn render(&self) -> String {
        format!(
            "{} `{}`\n**{}** {}",
            self.tag.emoji(),
            format_log_timestamp(self.at),
            self.actor,
            self.description
        )
    }
}

/// Deliver an entry to the configured log channel.
///
/// Delivery problems are reported back to the invoking channel and never
/// returned to the caller.
pub async fn send_log(cx: &ActionContext<'_>, entry: &AuditEntry) {
    let channel_id = serenity::ChannelId::new(cx.config.log_channel_id);

    let warning = match cx.gateway.send_to_channel(channel_id, &entry.render()).await {
        Ok(()) => return,
        Err(GatewayError::ChannelUnavailable) => {
            warn!(channel_id = channel_id.get(), "log channel not found");
            ":warning: Log channel not found.".to_owned()
        }
        Err(source) => {
            error!(?source, channel_id = channel_id.get(), "failed to deliver audit log entry");
            format!(":warning: Error while logging: {}", source)
        }
    };

    if let Err(source) = cx.gateway.reply(&warning).await {
        error!(?source, "failed to report audit log failure");
    }
}
