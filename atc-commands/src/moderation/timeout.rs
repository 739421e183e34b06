use chrono::Duration;

use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::moderation::logging::AuditTag;
use crate::moderation::platform::SerenityGateway;
use crate::moderation::replies::{guild_only_message, moderation_self_action_message, usage_message};
use crate::moderation::{
    ActionContext, ActionOutcome, confirm, record, reject, report_failure, trace_outcome,
};
use atc_core::gateway::Subject;
use atc_core::{Context, Error};
use atc_utils::formatting::attributed_reason;
use atc_utils::parse::parse_duration_seconds;

pub const META: CommandMeta = CommandMeta {
    name: "timeout",
    aliases: &["mute", "quiet"],
    desc: "Timeout a member for a duration (s/m/h/d, default: 10m).",
    category: "moderation",
    usage: ".timeout <member> [duration] [reason]",
    required: serenity::Permissions::MODERATE_MEMBERS,
};

/// Longest communication timeout the platform accepts.
const MAX_TIMEOUT_SECS: u64 = 28 * 24 * 60 * 60;

#[poise::command(
    prefix_command,
    category = "Moderation",
    aliases("mute", "quiet"),
    required_permissions = "MODERATE_MEMBERS"
)]
pub async fn timeout(
    ctx: Context<'_>,
    #[description = "The member to timeout"] member: Option<serenity::Member>,
    #[description = "Duration (e.g. 10m, 2h)"] duration: Option<String>,
    #[description = "Reason for the timeout"]
    #[rest]
    reason: Option<String>,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    let Some(member) = member else {
        ctx.say(usage_message(META.usage)).await?;
        return Ok(());
    };

    let gateway = SerenityGateway::new(ctx, guild_id);
    let cx = ActionContext::new(&gateway, &ctx.data().config, ctx.author(), ctx.channel_id());
    let outcome = run_timeout(
        &cx,
        &Subject::from_user(&member.user),
        duration.as_deref(),
        reason.as_deref(),
    )
    .await?;
    trace_outcome("timeout", &outcome);

    Ok(())
}

fn invalid_duration_message() -> String {
    "Invalid duration. Use format like `10m`, `2h`, etc.".to_owned()
}

pub async fn run_timeout(
    cx: &ActionContext<'_>,
    target: &Subject,
    duration: Option<&str>,
    reason: Option<&str>,
) -> Result<ActionOutcome, Error> {
    if target.id == cx.actor.id {
        return reject(cx, moderation_self_action_message("timeout")).await;
    }

    let (duration, seconds) = match duration.map(str::trim).filter(|raw| !raw.is_empty()) {
        Some(raw) => match parse_duration_seconds(raw) {
            Ok(seconds) => (raw.to_owned(), seconds),
            Err(_) => return reject(cx, invalid_duration_message()).await,
        },
        None => match cx.config.default_timeout.checked_secs() {
            Some(seconds) => (cx.config.default_timeout.to_string(), seconds),
            None => return reject(cx, invalid_duration_message()).await,
        },
    };
    if seconds == 0 {
        return reject(cx, ":warning: Timeout duration must be greater than zero.").await;
    }
    if seconds > MAX_TIMEOUT_SECS {
        return reject(cx, ":warning: Timeouts can last at most 28 days.").await;
    }

    let until = cx.now + Duration::seconds(seconds as i64);
    let reason = attributed_reason(&cx.actor.tag, reason);

    if let Err(source) = cx.gateway.timeout_until(target.id, until, &reason).await {
        return report_failure(cx, "timeout", source).await;
    }

    confirm(
        cx,
        &format!(
            "Timed out **{}** for {}. Reason: {}",
            target.tag, duration, reason
        ),
        None,
    )
    .await;

    let description = format!("timed out **{}** for {}. Reason: {}", target.tag, duration, reason);
    Ok(record(cx, AuditTag::Timeout, description, Some(target), Some(reason)).await)
}
