use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::moderation::logging::AuditTag;
use crate::moderation::platform::SerenityGateway;
use crate::moderation::replies::{guild_only_message, usage_message};
use crate::moderation::{
    ActionContext, ActionOutcome, confirm, record, reject, report_failure, trace_outcome,
};
use atc_core::gateway::Subject;
use atc_core::{Context, Error};

pub const META: CommandMeta = CommandMeta {
    name: "nickname",
    aliases: &["nick", "setnick"],
    desc: "Change or reset a member's nickname.",
    category: "moderation",
    usage: ".nickname <member> [name]",
    required: serenity::Permissions::MANAGE_NICKNAMES,
};

const MAX_NICKNAME_CHARS: usize = 32;

#[poise::command(
    prefix_command,
    category = "Moderation",
    aliases("nick", "setnick"),
    required_permissions = "MANAGE_NICKNAMES"
)]
pub async fn nickname(
    ctx: Context<'_>,
    #[description = "The member to rename"] member: Option<serenity::Member>,
    #[description = "New nickname (omit to reset)"]
    #[rest]
    name: Option<String>,
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
    let outcome = run_nickname(&cx, &Subject::from_user(&member.user), name.as_deref()).await?;
    trace_outcome("nickname", &outcome);

    Ok(())
}

pub async fn run_nickname(
    cx: &ActionContext<'_>,
    target: &Subject,
    name: Option<&str>,
) -> Result<ActionOutcome, Error> {
    let name = name.map(str::trim).filter(|name| !name.is_empty());

    if let Some(name) = name
        && name.chars().count() > MAX_NICKNAME_CHARS
    {
        return reject(
            cx,
            format!(":warning: Nicknames can be at most {MAX_NICKNAME_CHARS} characters."),
        )
        .await;
    }

    if let Err(source) = cx.gateway.set_nickname(target.id, name).await {
        return report_failure(cx, "nickname", source).await;
    }

    let confirmation = match name {
        Some(name) => format!("Changed **{}**'s nickname to **{}**.", target.name, name),
        None => format!("Reset **{}**'s nickname.", target.name),
    };
    confirm(cx, &confirmation, None).await;

    let description = format!(
        "changed **{}**'s nickname to **{}**.",
        target.tag,
        name.unwrap_or("reset")
    );
    Ok(record(cx, AuditTag::Nickname, description, Some(target), None).await)
}

#[cfg(test)]
mod tests {
    use super::run_nickname;
    use crate::moderation::ActionOutcome;
    use crate::moderation::testing::{Call, FakeGateway, context, subject, test_config};

    #[tokio::test]
    async fn sets_nickname_and_logs_once() {
        let gateway = FakeGateway::default();
        let config = test_config();
        let cx = context(&gateway, &config);
        let target = subject(7, "target");

        let outcome = run_nickname(&cx, &target, Some("Pilot")).await.expect("handler");

        assert!(matches!(outcome, ActionOutcome::Completed(_)));
        assert_eq!(
            gateway.calls(),
            vec![Call::Nickname(target.id, Some("Pilot".to_owned()))]
        );
        assert_eq!(
            gateway.replies(),
            vec!["Changed **target**'s nickname to **Pilot**.".to_owned()]
        );
        let logs = gateway.logs();
        assert_eq!(logs.len(), 1);
        assert!(logs[0].1.ends_with("**caller** changed **target**'s nickname to **Pilot**."));
    }

    #[tokio::test]
    async fn missing_name_resets_nickname() {
        let gateway = FakeGateway::default();
        let config = test_config();
        let cx = context(&gateway, &config);
        let target = subject(7, "target");

        run_nickname(&cx, &target, None).await.expect("handler");

        assert_eq!(gateway.calls(), vec![Call::Nickname(target.id, None)]);
        assert_eq!(gateway.replies(), vec!["Reset **target**'s nickname.".to_owned()]);
        assert!(gateway.logs()[0].1.ends_with("nickname to **reset**."));
    }

    #[tokio::test]
    async fn overlong_names_are_rejected_before_editing() {
        let gateway = FakeGateway::default();
        let config = test_config();
        let cx = context(&gateway, &config);
        let name = "x".repeat(33);

        let outcome = run_nickname(&cx, &subject(7, "target"), Some(&name))
            .await
            .expect("handler");

        assert_eq!(outcome, ActionOutcome::Rejected);
        assert!(gateway.calls().is_empty());
        assert!(gateway.logs().is_empty());
    }

    #[tokio::test]
    async fn failed_edit_warns_without_logging() {
        let gateway = FakeGateway {
            fail_mutations: true,
            ..FakeGateway::default()
        };
        let config = test_config();
        let cx = context(&gateway, &config);

        let outcome = run_nickname(&cx, &subject(7, "target"), Some("Pilot"))
            .await
            .expect("handler");

        assert_eq!(outcome, ActionOutcome::Failed("Missing Permissions".to_owned()));
        assert_eq!(gateway.replies(), vec![":warning: Missing Permissions".to_owned()]);
        assert!(gateway.logs().is_empty());
    }

    #[tokio::test]
    async fn undeliverable_confirmation_still_logs_the_rename() {
        let gateway = FakeGateway {
            replies_fail: true,
            ..FakeGateway::default()
        };
        let config = test_config();
        let cx = context(&gateway, &config);
        let target = subject(7, "user");

        let outcome = run_nickname(&cx, &target, Some("calm"))
            .await
            .expect("handler");

        assert!(matches!(outcome, ActionOutcome::Completed(_)));
        assert_eq!(gateway.calls(), vec![Call::Nickname(target.id, Some("calm".to_owned()))]);
        let logs = gateway.logs();
        assert_eq!(logs.len(), 1);
        assert!(logs[0].1.starts_with(":pencil: "));
    }
}
