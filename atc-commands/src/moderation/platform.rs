use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::time::sleep;
use tracing::warn;

use poise::serenity_prelude as serenity;

use atc_core::Context;
use atc_core::gateway::{GatewayError, ModerationGateway, SendOverride};
use atc_utils::cleanup::purge_recent_messages;
use atc_utils::permissions::is_administrator;

const UNKNOWN_CHANNEL_CODE: isize = 10003;
const MISSING_ACCESS_CODE: isize = 50001;

/// [`ModerationGateway`] over the serenity HTTP client for one guild channel.
pub struct SerenityGateway {
    http: Arc<serenity::Http>,
    guild_id: serenity::GuildId,
    channel_id: serenity::ChannelId,
}

impl SerenityGateway {
    pub fn new(ctx: Context<'_>, guild_id: serenity::GuildId) -> Self {
        Self {
            http: Arc::clone(&ctx.serenity_context().http),
            guild_id,
            channel_id: ctx.channel_id(),
        }
    }

    fn everyone_role(&self) -> serenity::RoleId {
        serenity::RoleId::new(self.guild_id.get())
    }

    async fn guild_channel(
        &self,
        channel_id: serenity::ChannelId,
    ) -> Result<serenity::GuildChannel, GatewayError> {
        let channel = channel_id
            .to_channel(self.http.as_ref())
            .await
            .map_err(classify_channel_error)?;

        match channel.guild() {
            Some(channel) if channel.guild_id == self.guild_id => Ok(channel),
            _ => Err(GatewayError::ChannelUnavailable),
        }
    }

    async fn everyone_overwrite(
        &self,
        channel_id: serenity::ChannelId,
    ) -> Result<(serenity::Permissions, serenity::Permissions), GatewayError> {
        let channel = self.guild_channel(channel_id).await?;
        let kind = serenity::PermissionOverwriteType::Role(self.everyone_role());

        Ok(channel
            .permission_overwrites
            .iter()
            .find(|overwrite| overwrite.kind == kind)
            .map_or(
                (serenity::Permissions::empty(), serenity::Permissions::empty()),
                |overwrite| (overwrite.allow, overwrite.deny),
            ))
    }
}

fn quiet_message(content: &str) -> serenity::CreateMessage {
    serenity::CreateMessage::new()
        .content(content)
        .allowed_mentions(serenity::CreateAllowedMentions::new())
}

fn is_unavailable_channel_error(source: &serenity::Error) -> bool {
    matches!(
        source,
        serenity::Error::Http(serenity::HttpError::UnsuccessfulRequest(response))
            if matches!(response.status_code.as_u16(), 403 | 404)
                || matches!(response.error.code, UNKNOWN_CHANNEL_CODE | MISSING_ACCESS_CODE)
    )
}

fn classify_channel_error(source: serenity::Error) -> GatewayError {
    if is_unavailable_channel_error(&source) {
        GatewayError::ChannelUnavailable
    } else {
        GatewayError::from(source)
    }
}

#[async_trait]
impl ModerationGateway for SerenityGateway {
    async fn reply(&self, content: &str) -> Result<(), GatewayError> {
        self.channel_id
            .send_message(self.http.as_ref(), quiet_message(content))
            .await?;
        Ok(())
    }

    async fn reply_transient(&self, content: &str, lifetime: Duration) -> Result<(), GatewayError> {
        let message = self
            .channel_id
            .send_message(self.http.as_ref(), quiet_message(content))
            .await?;

        let http = Arc::clone(&self.http);
        tokio::spawn(async move {
            sleep(lifetime).await;
            if let Err(source) = message.delete(http.as_ref()).await {
                warn!(?source, "failed to remove transient reply");
            }
        });

        Ok(())
    }

    async fn send_to_channel(
        &self,
        channel_id: serenity::ChannelId,
        content: &str,
    ) -> Result<(), GatewayError> {
        channel_id
            .send_message(self.http.as_ref(), quiet_message(content))
            .await
            .map_err(classify_channel_error)?;
        Ok(())
    }

    async fn is_administrator(&self, user_id: serenity::UserId) -> Result<bool, GatewayError> {
        Ok(is_administrator(self.http.as_ref(), self.guild_id, user_id).await?)
    }

    async fn set_nickname(
        &self,
        user_id: serenity::UserId,
        nickname: Option<&str>,
    ) -> Result<(), GatewayError> {
        // An empty nickname clears it.
        let edit = serenity::EditMember::new().nickname(nickname.unwrap_or_default());
        self.guild_id
            .edit_member(self.http.as_ref(), user_id, edit)
            .await?;
        Ok(())
    }

    async fn timeout_until(
        &self,
        user_id: serenity::UserId,
        until: DateTime<Utc>,
        reason: &str,
    ) -> Result<(), GatewayError> {
        let until = serenity::Timestamp::from_unix_timestamp(until.timestamp())
            .map_err(|source| GatewayError::Request(source.to_string()))?;
        let edit = serenity::EditMember::new()
            .disable_communication_until_datetime(until)
            .audit_log_reason(reason);
        self.guild_id
            .edit_member(self.http.as_ref(), user_id, edit)
            .await?;
        Ok(())
    }

    async fn kick(&self, user_id: serenity::UserId, reason: &str) -> Result<(), GatewayError> {
        self.guild_id
            .kick_with_reason(self.http.as_ref(), user_id, reason)
            .await?;
        Ok(())
    }

    async fn ban(&self, user_id: serenity::UserId, reason: &str) -> Result<(), GatewayError> {
        self.guild_id
            .ban_with_reason(self.http.as_ref(), user_id, 0, reason)
            .await?;
        Ok(())
    }

    async fn unban(&self, user_id: serenity::UserId, reason: &str) -> Result<(), GatewayError> {
        self.http
            .remove_ban(self.guild_id, user_id, Some(reason))
            .await?;
        Ok(())
    }

    async fn purge(
        &self,
        channel_id: serenity::ChannelId,
        limit: u64,
    ) -> Result<u64, GatewayError> {
        Ok(purge_recent_messages(self.http.as_ref(), channel_id, limit).await?)
    }

    async fn default_role_send_override(
        &self,
        channel_id: serenity::ChannelId,
    ) -> Result<SendOverride, GatewayError> {
        let (allow, deny) = self.everyone_overwrite(channel_id).await?;
        Ok(SendOverride::from_overwrite(allow, deny))
    }

    async fn set_default_role_send_override(
        &self,
        channel_id: serenity::ChannelId,
        state: SendOverride,
    ) -> Result<(), GatewayError> {
        let (allow, deny) = self.everyone_overwrite(channel_id).await?;
        let (allow, deny) = state.apply(allow, deny);

        channel_id
            .create_permission(
                self.http.as_ref(),
                serenity::PermissionOverwrite {
                    allow,
                    deny,
                    kind: serenity::PermissionOverwriteType::Role(self.everyone_role()),
                },
            )
            .await?;
        Ok(())
    }
}
