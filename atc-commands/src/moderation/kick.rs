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

pub const META: CommandMeta = CommandMeta {
    name: "kick",
    aliases: &[],
    desc: "Kick a member from the server.",
    category: "moderation",
    usage: ".kick <member> [reason]",
    required: serenity::Permissions::KICK_MEMBERS,
};

#[poise::command(prefix_command, category = "Moderation", required_permissions = "KICK_MEMBERS")]
pub async fn kick(
    ctx: Context<'_>,
    #[description = "The member to kick"] member: Option<serenity::Member>,
    #[description = "Reason for the kick"]
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
    let outcome = run_kick(&cx, &Subject::from_user(&member.user), reason.as_deref()).await?;
    trace_outcome("kick", &outcome);

    Ok(())
}

pub async fn run_kick(
    cx: &ActionContext<'_>,
    target: &Subject,
    reason: Option<&str>,
) -> Result<ActionOutcome, Error> {
    if target.id == cx.actor.id {
        return reject(cx, moderation_self_action_message("kick")).await;
    }

    let reason = attributed_reason(&cx.actor.tag, reason);

    if let Err(source) = cx.gateway.kick(target.id, &reason).await {
        return report_failure(cx, "kick", source).await;
    }

    confirm(
        cx,
        &format!("Kicked **{}**. Reason: {}", target.tag, reason),
        None,
    )
    .await;

    let description = format!("kicked **{}**. Reason: {}", target.tag, reason);
    Ok(record(cx, AuditTag::Kick, description, Some(target), Some(reason)).await)
}
