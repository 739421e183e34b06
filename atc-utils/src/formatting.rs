/// Placeholder shown when a moderator gives no reason.
pub const DEFAULT_REASON: &str = "N/A";

/// Prefix a moderation reason with the moderator's tag, e.g. `(alice) spamming`.
///
/// Blank reasons are treated as missing and replaced by [`DEFAULT_REASON`].
pub fn attributed_reason(actor_tag: &str, reason: Option<&str>) -> String {
    let reason = reason
        .map(str::trim)
        .filter(|reason| !reason.is_empty())
        .unwrap_or(DEFAULT_REASON);

    format!("({}) {}", actor_tag, reason)
}

/// Render a channel mention (`<#id>`).
pub fn channel_mention(channel_id: u64) -> String {
    format!("<#{}>", channel_id)
}

/// Capitalize the first character of a category key for display.
pub fn display_category(category: &str) -> String {
    let mut chars = category.chars();
    match chars.next() {
        Some(first) => format!("{}{}", first.to_uppercase(), chars.as_str()),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::{attributed_reason, channel_mention, display_category};

    #[test]
    fn reasons_are_attributed_to_the_moderator() {
        assert_eq!(attributed_reason("alice", Some("spamming")), "(alice) spamming");
        assert_eq!(attributed_reason("alice", None), "(alice) N/A");
        assert_eq!(attributed_reason("alice", Some("   ")), "(alice) N/A");
    }

    #[test]
    fn channel_mentions_use_discord_syntax() {
        assert_eq!(channel_mention(42), "<#42>");
    }

    #[test]
    fn categories_are_capitalized() {
        assert_eq!(display_category("moderation"), "Moderation");
        assert_eq!(display_category(""), "");
    }
}
