use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::moderation::logging::AuditTag;
use crate::moderation::platform::SerenityGateway;
use crate::moderation::replies::{guild_only_message, usage_message};
use crate::moderation::{
    ActionContext, ActionOutcome, confirm, record, report_failure, trace_outcome,
};
use atc_core::gateway::Subject;
use atc_core::{Context, Error};
use atc_utils::formatting::attributed_reason;

pub const META: CommandMeta = CommandMeta {
    name: "unban",
    aliases: &[],
    desc: "Unban a user by ID or mention.",
    category: "moderation",
    usage: ".unban <user> [reason]",
    required: serenity::Permissions::BAN_MEMBERS,
};

#[poise::command(prefix_command, category = "Moderation", required_permissions = "BAN_MEMBERS")]
pub async fn unban(
    ctx: Context<'_>,
    #[description = "The user to unban"] user: Option<serenity::User>,
    #[description = "Reason for the unban"]
    #[rest]
    reason: Option<String>,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    let Some(user) = user else {
        ctx.say(usage_message(META.usage)).await?;
        return Ok(());
    };

    let gateway = SerenityGateway::new(ctx, guild_id);
    let cx = ActionContext::new(&gateway, &ctx.data().config, ctx.author(), ctx.channel_id());
    let outcome = run_unban(&cx, &Subject::from_user(&user), reason.as_deref()).await?;
    trace_outcome("unban", &outcome);

    Ok(())
}

pub async fn run_unban(
    cx: &ActionContext<'_>,
    target: &Subject,
    reason: Option<&str>,
) -> Result<ActionOutcome, Error> {
    let reason = attributed_reason(&cx.actor.tag, reason);

    if let Err(source) = cx.gateway.unban(target.id, &reason).await {
        return report_failure(cx, "unban", source).await;
    }

    confirm(
        cx,
        &format!("Unbanned **{}**. Reason: {}", target.tag, reason),
        None,
    )
    .await;

    let description = format!("unbanned **{}**. Reason: {}", target.tag, reason);
    Ok(record(cx, AuditTag::Unban, description, Some(target), Some(reason)).await)
}
