use std::time::Duration;

use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::moderation::logging::AuditTag;
use crate::moderation::platform::SerenityGateway;
use crate::moderation::replies::guild_only_message;
use crate::moderation::{
    ActionContext, ActionOutcome, confirm, record, reject, report_failure, trace_outcome,
};
use atc_core::{Context, Error};
use atc_utils::formatting::channel_mention;

pub const META: CommandMeta = CommandMeta {
    name: "purge",
    aliases: &["clear", "clean"],
    desc: "Delete recent messages (up to 200 for admins, 50 for others).",
    category: "moderation",
    usage: ".purge [count]",
    required: serenity::Permissions::MANAGE_MESSAGES,
};

const CONFIRMATION_LIFETIME: Duration = Duration::from_secs(5);

#[poise::command(
    prefix_command,
    category = "Moderation",
    aliases("clear", "clean"),
    required_permissions = "MANAGE_MESSAGES"
)]
pub async fn purge(
    ctx: Context<'_>,
    #[description = "How many messages to delete"] count: Option<i64>,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    let gateway = SerenityGateway::new(ctx, guild_id);
    let cx = ActionContext::new(&gateway, &ctx.data().config, ctx.author(), ctx.channel_id());
    let outcome = run_purge(&cx, count.unwrap_or(1)).await?;
    trace_outcome("purge", &outcome);

    Ok(())
}

/// Delete `count` messages plus the invoking one from the current channel.
pub async fn run_purge(cx: &ActionContext<'_>, count: i64) -> Result<ActionOutcome, Error> {
    let administrator = match cx.gateway.is_administrator(cx.actor.id).await {
        Ok(administrator) => administrator,
        Err(source) => return report_failure(cx, "purge", source).await,
    };
    let limit = cx.config.purge_limit_for(administrator);

    if count <= 0 || count > i64::from(limit) {
        return reject(
            cx,
            format!(":warning: You can only delete up to {limit} messages at once."),
        )
        .await;
    }

    let deleted = match cx.gateway.purge(cx.channel_id, count as u64 + 1).await {
        Ok(deleted) => deleted,
        Err(source) => return report_failure(cx, "purge", source).await,
    };
    let reported = deleted.saturating_sub(1);

    confirm(
        cx,
        &format!("Deleted {reported} messages."),
        Some(CONFIRMATION_LIFETIME),
    )
    .await;

    let description = format!(
        "deleted {} messages in {}.",
        reported,
        channel_mention(cx.channel_id.get())
    );
    Ok(record(cx, AuditTag::Purge, description, None, None).await)
}
