use poise::serenity_prelude as serenity;

use crate::utility::embeds::grouped_help_description;
use crate::{COMMANDS, CommandMeta};
use atc_core::{Context, Error};
use atc_utils::embed::build_embed;

pub const META: CommandMeta = CommandMeta {
    name: "help",
    aliases: &[],
    desc: "Lists out all available commands.",
    category: "utility",
    usage: ".help",
    required: serenity::Permissions::empty(),
};

#[poise::command(prefix_command, category = "Utility")]
pub async fn help(ctx: Context<'_>) -> Result<(), Error> {
    let commands = sorted_commands();
    let embed = build_embed("Available Commands", grouped_help_description(&commands));
    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

fn sorted_commands() -> Vec<&'static CommandMeta> {
    let mut commands: Vec<&'static CommandMeta> = COMMANDS.iter().collect();
    commands.sort_by(|left, right| {
        left.category
            .cmp(right.category)
            .then_with(|| left.name.cmp(right.name))
    });
    commands
}
