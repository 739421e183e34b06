use std::env;
use std::sync::Arc;

use poise::serenity_prelude as serenity;
use tracing::{debug, error, info, warn};
use tracing_subscriber::Layer;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use rustls::crypto::ring::default_provider;

use atc_commands::find_command;
use atc_core::{BotConfig, Data, Error};
use atc_metar::MetarClient;
use atc_utils::COMMAND_PREFIX;
use atc_utils::permissions::permission_names;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let fmt_layer = tracing_subscriber::fmt::layer().with_filter(filter_fn(|metadata| {
        let target = metadata.target();

        let within_info_level = *metadata.level() <= tracing::Level::INFO;
        if !within_info_level {
            return false;
        }

        !(target.starts_with("serenity::gateway::bridge::shard_manager")
            || target.starts_with("serenity::gateway::bridge::shard_runner"))
    }));

    tracing_subscriber::registry().with(fmt_layer).init();

    default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls ring provider"))?;

    // Load the .env file
    dotenvy::dotenv().ok();

    let token = env::var("DISCORD_TOKEN")?;
    let config = BotConfig::from_env()?;
    info!(
        log_channel_id = config.log_channel_id,
        purge_limit_admin = config.purge_limit_admin,
        purge_limit = config.purge_limit,
        default_timeout = %config.default_timeout,
        "Configuration loaded."
    );

    let metar = match config.metar_api_key.as_deref() {
        Some(api_key) => {
            info!(base_url = %config.metar_base_url, "METAR lookups enabled.");
            Some(MetarClient::new(api_key, config.metar_base_url.clone())?)
        }
        None => {
            warn!("METAR lookups disabled (set METAR_API_KEY to enable).");
            None
        }
    };

    let data = Data {
        config: Arc::new(config),
        metar,
    };

    let intents = serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: atc_commands::commands(),
            event_handler: |ctx, event, framework, data| {
                Box::pin(handle_event(ctx, event, framework, data))
            },
            on_error: |error| Box::pin(on_error(error)),
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(COMMAND_PREFIX.to_string()),
                mention_as_prefix: false,
                case_insensitive_commands: false,
                ..Default::default()
            },
            ..Default::default()
        })
        .setup(move |_ctx, _ready, _framework| {
            let data = data.clone();
            Box::pin(async move {
                info!("ATC is ready.");
                Ok(data)
            })
        })
        .build();

    info!("ATC is connecting...");

    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await?;

    client.start().await?;
    Ok(())
}

fn usage_hint(command_name: &str) -> String {
    match find_command(command_name) {
        Some(meta) => format!("Usage: `{}`", meta.usage),
        None => format!("Usage: `{}{}`", COMMAND_PREFIX, command_name),
    }
}

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!(?error, command = %ctx.command().qualified_name, "command error");

            let _ = ctx
                .say(":warning: Something went wrong while running this command.")
                .await;
        }
        poise::FrameworkError::ArgumentParse { ctx, input, .. } => {
            let usage = usage_hint(&ctx.command().name);
            let description = if let Some(input) = input {
                format!("Invalid argument: `{}`\n{}", input, usage)
            } else {
                format!("Missing required argument.\n{}", usage)
            };

            let _ = ctx.say(description).await;
        }
        poise::FrameworkError::MissingUserPermissions {
            missing_permissions,
            ctx,
            ..
        } => {
            let description = match missing_permissions {
                Some(missing) => format!(
                    ":warning: You need the `{}` permission to use this command.",
                    permission_names(missing).join(", ")
                ),
                None => ":warning: I couldn't verify your permissions for this command.".to_owned(),
            };

            let _ = ctx.say(description).await;
        }
        poise::FrameworkError::MissingBotPermissions {
            missing_permissions,
            ctx,
            ..
        } => {
            let _ = ctx
                .say(format!(
                    ":warning: I need the `{}` permission for this command.",
                    permission_names(missing_permissions).join(", ")
                ))
                .await;
        }
        poise::FrameworkError::UnknownCommand { .. } => {
            debug!("unknown command invocation");
        }
        other => {
            error!(?other, "framework error");
        }
    }
}

async fn handle_event(
    _ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    _data: &Data,
) -> Result<(), Error> {
    if let serenity::FullEvent::Ready { data_about_bot } = event {
        info!(
            user_id = data_about_bot.user.id.get(),
            "Logged in as {}",
            data_about_bot.user.tag()
        );
    }

    Ok(())
}
