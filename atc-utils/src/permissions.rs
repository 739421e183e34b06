use poise::serenity_prelude as serenity;

/// Convert a permission bitset into a sorted display list.
///
/// If `ADMINISTRATOR` is present, only `ADMINISTRATOR` is returned because
/// it implicitly grants all permissions.
pub fn permission_names(perms: serenity::Permissions) -> Vec<String> {
    if perms.contains(serenity::Permissions::ADMINISTRATOR) {
        return vec!["ADMINISTRATOR".to_owned()];
    }

    let mut names: Vec<String> = perms
        .iter_names()
        .map(|(name, _flag)| name.to_owned())
        .collect();
    names.sort_unstable();
    names
}

/// Union of the `@everyone` role and every role the member holds.
///
/// The guild owner holds every permission regardless of roles.
pub fn guild_permissions(
    guild_id: serenity::GuildId,
    owner_id: serenity::UserId,
    user_id: serenity::UserId,
    member_roles: &[serenity::RoleId],
    roles: impl IntoIterator<Item = (serenity::RoleId, serenity::Permissions)>,
) -> serenity::Permissions {
    if owner_id == user_id {
        return serenity::Permissions::all();
    }

    let everyone = serenity::RoleId::new(guild_id.get());
    roles
        .into_iter()
        .filter(|(role_id, _)| *role_id == everyone || member_roles.contains(role_id))
        .fold(serenity::Permissions::empty(), |held, (_, granted)| held | granted)
}

/// Whether `user_id` holds `ADMINISTRATOR` in the guild, fetched over HTTP.
pub async fn is_administrator(
    http: &serenity::Http,
    guild_id: serenity::GuildId,
    user_id: serenity::UserId,
) -> anyhow::Result<bool> {
    let guild = guild_id.to_partial_guild(http).await?;
    let member = guild_id.member(http, user_id).await?;

    let held = guild_permissions(
        guild_id,
        guild.owner_id,
        user_id,
        &member.roles,
        guild.roles.values().map(|role| (role.id, role.permissions)),
    );
    Ok(held.contains(serenity::Permissions::ADMINISTRATOR))
}
