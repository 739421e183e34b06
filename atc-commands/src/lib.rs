pub mod moderation;
pub mod utility;

use poise::serenity_prelude as serenity;

use atc_core::{Data, Error};

pub struct CommandMeta {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub desc: &'static str,
    pub category: &'static str,
    pub usage: &'static str,
    pub required: serenity::Permissions,
}

pub const COMMANDS: &[CommandMeta] = &[
    utility::help::META,
    utility::usage::META,
    utility::metar::META,
    moderation::nickname::META,
    moderation::timeout::META,
    moderation::kick::META,
    moderation::ban::META,
    moderation::unban::META,
    moderation::purge::META,
    moderation::lockdown::META,
];

pub fn commands() -> Vec<poise::Command<Data, Error>> {
    vec![
        utility::help::help(),
        utility::usage::usage(),
        utility::metar::metar(),
        moderation::nickname::nickname(),
        moderation::timeout::timeout(),
        moderation::kick::kick(),
        moderation::ban::ban(),
        moderation::unban::unban(),
        moderation::purge::purge(),
        moderation::lockdown::lockdown(),
    ]
}

/// Look up a command by its name or one of its aliases. Case-sensitive.
pub fn find_command(token: &str) -> Option<&'static CommandMeta> {
    COMMANDS
        .iter()
        .find(|command| command.name == token || command.aliases.iter().any(|alias| *alias == token))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use poise::serenity_prelude as serenity;

    use super::{COMMANDS, commands, find_command};

    #[test]
    fn names_and_aliases_are_unique() {
        let mut seen = HashSet::new();
        for command in COMMANDS {
            assert!(seen.insert(command.name), "duplicate {}", command.name);
            for alias in command.aliases {
                assert!(seen.insert(*alias), "duplicate alias {}", alias);
            }
        }
    }

    #[test]
    fn aliases_resolve_to_their_command() {
        assert_eq!(find_command("nick").map(|c| c.name), Some("nickname"));
        assert_eq!(find_command("setnick").map(|c| c.name), Some("nickname"));
        assert_eq!(find_command("mute").map(|c| c.name), Some("timeout"));
        assert_eq!(find_command("quiet").map(|c| c.name), Some("timeout"));
        assert_eq!(find_command("clear").map(|c| c.name), Some("purge"));
        assert_eq!(find_command("clean").map(|c| c.name), Some("purge"));
        assert_eq!(find_command("lock").map(|c| c.name), Some("lockdown"));
        assert_eq!(find_command("metar").map(|c| c.name), Some("metar"));
    }

    #[test]
    fn lookup_is_case_sensitive_and_ignores_unknown_commands() {
        assert!(find_command("Kick").is_none());
        assert!(find_command("warn").is_none());
    }

    #[test]
    fn moderation_commands_declare_their_tier() {
        let tier = |name: &str| find_command(name).map(|c| c.required);
        assert_eq!(tier("nickname"), Some(serenity::Permissions::MANAGE_NICKNAMES));
        assert_eq!(tier("timeout"), Some(serenity::Permissions::MODERATE_MEMBERS));
        assert_eq!(tier("kick"), Some(serenity::Permissions::KICK_MEMBERS));
        assert_eq!(tier("ban"), Some(serenity::Permissions::BAN_MEMBERS));
        assert_eq!(tier("unban"), Some(serenity::Permissions::BAN_MEMBERS));
        assert_eq!(tier("purge"), Some(serenity::Permissions::MANAGE_MESSAGES));
        assert_eq!(tier("lockdown"), Some(serenity::Permissions::MANAGE_CHANNELS));
        assert_eq!(tier("metar"), Some(serenity::Permissions::empty()));
    }

    #[test]
    fn registered_commands_match_the_table() {
        let registered = commands();
        assert_eq!(registered.len(), COMMANDS.len());

        for command in &registered {
            let meta = find_command(&command.name).expect("registered command has metadata");
            assert_eq!(meta.name, command.name);
            assert_eq!(meta.required, command.required_permissions, "{}", meta.name);

            let aliases: Vec<&str> = command.aliases.iter().map(String::as_str).collect();
            assert_eq!(meta.aliases, aliases.as_slice(), "{}", meta.name);
        }
    }
}
