use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::moderation::logging::AuditTag;
use crate::moderation::platform::SerenityGateway;
use crate::moderation::replies::guild_only_message;
use crate::moderation::{
    ActionContext, ActionOutcome, confirm, record, reject, report_failure, trace_outcome,
};
use atc_core::gateway::SendOverride;
use atc_core::{Context, Error};
use atc_utils::formatting::channel_mention;

pub const META: CommandMeta = CommandMeta {
    name: "lockdown",
    aliases: &["lock"],
    desc: "Toggle whether everyone can send messages in a channel.",
    category: "moderation",
    usage: ".lockdown [channel]",
    required: serenity::Permissions::MANAGE_CHANNELS,
};

#[poise::command(
    prefix_command,
    category = "Moderation",
    aliases("lock"),
    required_permissions = "MANAGE_CHANNELS"
)]
pub async fn lockdown(
    ctx: Context<'_>,
    #[description = "Channel to toggle (defaults to this one)"]
    channel: Option<serenity::GuildChannel>,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    let gateway = SerenityGateway::new(ctx, guild_id);
    let cx = ActionContext::new(&gateway, &ctx.data().config, ctx.author(), ctx.channel_id());
    let requested = channel.map(|channel| (channel.id, channel.guild_id));
    let outcome = run_lockdown(&cx, guild_id, requested).await?;
    trace_outcome("lockdown", &outcome);

    Ok(())
}

/// Flip the default role's send-messages override on the requested channel,
/// or on the invoking one when none is given.
///
/// `requested` carries the channel together with the guild it belongs to.
pub async fn run_lockdown(
    cx: &ActionContext<'_>,
    guild_id: serenity::GuildId,
    requested: Option<(serenity::ChannelId, serenity::GuildId)>,
) -> Result<ActionOutcome, Error> {
    let channel_id = match requested {
        Some((_, channel_guild)) if channel_guild != guild_id => {
            return reject(cx, "That channel is not in this server.").await;
        }
        Some((channel_id, _)) => channel_id,
        None => cx.channel_id,
    };

    let current = match cx.gateway.default_role_send_override(channel_id).await {
        Ok(current) => current,
        Err(source) => return report_failure(cx, "lockdown", source).await,
    };
    let next = current.toggled();

    if let Err(source) = cx
        .gateway
        .set_default_role_send_override(channel_id, next)
        .await
    {
        return report_failure(cx, "lockdown", source).await;
    }

    let mention = channel_mention(channel_id.get());
    let (tag, verb, reply_verb) = match next {
        SendOverride::Deny => (AuditTag::Lock, "locked", "Locked"),
        SendOverride::Allow | SendOverride::Inherit => (AuditTag::Unlock, "unlocked", "Unlocked"),
    };

    confirm(
        cx,
        &format!("{} {} {}.", tag.emoji(), reply_verb, mention),
        None,
    )
    .await;

    Ok(record(cx, tag, format!("{verb} {mention}."), None, None).await)
}
