use poise::serenity_prelude as serenity;

use crate::utility::embeds::unknown_command_message;
use crate::{CommandMeta, find_command};
use atc_core::{Context, Error};
use atc_utils::COMMAND_PREFIX;

pub const META: CommandMeta = CommandMeta {
    name: "usage",
    aliases: &[],
    desc: "Show usage syntax for a specific command.",
    category: "utility",
    usage: ".usage <command>",
    required: serenity::Permissions::empty(),
};

#[poise::command(prefix_command, category = "Utility")]
pub async fn usage(
    ctx: Context<'_>,
    #[description = "Command name"] command: Option<String>,
) -> Result<(), Error> {
    let Some(raw_name) = command.as_deref() else {
        ctx.say(format!("Usage: `{}`", META.usage)).await?;
        return Ok(());
    };

    ctx.say(usage_reply(raw_name)).await?;
    Ok(())
}

fn usage_reply(raw_name: &str) -> String {
    let lookup = raw_name.trim().trim_start_matches(COMMAND_PREFIX);

    match find_command(lookup) {
        Some(command) => format!("Usage: `{}`", command.usage),
        None => unknown_command_message(lookup),
    }
}
