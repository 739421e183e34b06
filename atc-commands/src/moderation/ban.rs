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
    name: "ban",
    aliases: &[],
    desc: "Ban a member from the server.",
    category: "moderation",
    usage: ".ban <member> [reason]",
    required: serenity::Permissions::BAN_MEMBERS,
};

#[poise::command(prefix_command, category = "Moderation", required_permissions = "BAN_MEMBERS")]
pub async fn ban(
    ctx: Context<'_>,
    #[description = "The member to ban"] member: Option<serenity::Member>,
    #[description = "Reason for the ban"]
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
    let outcome = run_ban(&cx, &Subject::from_user(&member.user), reason.as_deref()).await?;
    trace_outcome("ban", &outcome);

    Ok(())
}

pub async fn run_ban(
    cx: &ActionContext<'_>,
    target: &Subject,
    reason: Option<&str>,
) -> Result<ActionOutcome, Error> {
    if target.id == cx.actor.id {
        return reject(cx, moderation_self_action_message("ban")).await;
    }

    let reason = attributed_reason(&cx.actor.tag, reason);

    if let Err(source) = cx.gateway.ban(target.id, &reason).await {
        return report_failure(cx, "ban", source).await;
    }

    confirm(
        cx,
        &format!("Banned **{}**. Reason: {}", target.tag, reason),
        None,
    )
    .await;

    let description = format!("banned **{}**. Reason: {}", target.tag, reason);
    Ok(record(cx, AuditTag::Ban, description, Some(target), Some(reason)).await)
}
