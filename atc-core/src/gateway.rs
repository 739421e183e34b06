//! Capability seam between command handlers and the chat platform.
//!
//! Handlers only talk to [`ModerationGateway`]; the serenity-backed
//! implementation lives in `atc-commands`, and tests use an in-memory fake.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use poise::serenity_prelude as serenity;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("channel not found or not accessible")]
    ChannelUnavailable,
    #[error("{0}")]
    Request(String),
}

impl From<serenity::Error> for GatewayError {
    fn from(source: serenity::Error) -> Self {
        Self::Request(source.to_string())
    }
}

impl From<anyhow::Error> for GatewayError {
    fn from(source: anyhow::Error) -> Self {
        Self::Request(source.to_string())
    }
}

/// A user as handlers see them: id plus the two display forms they print.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Subject {
    pub id: serenity::UserId,
    pub name: String,
    pub tag: String,
}

impl Subject {
    pub fn from_user(user: &serenity::User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            tag: user.tag(),
        }
    }
}

/// State of the default role's send-messages override on a channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendOverride {
    Allow,
    Deny,
    Inherit,
}

impl SendOverride {
    /// Next state of the lockdown toggle: denied unlocks, anything else locks.
    pub fn toggled(self) -> Self {
        match self {
            Self::Deny => Self::Inherit,
            Self::Allow | Self::Inherit => Self::Deny,
        }
    }

    pub fn from_overwrite(allow: serenity::Permissions, deny: serenity::Permissions) -> Self {
        if deny.contains(serenity::Permissions::SEND_MESSAGES) {
            Self::Deny
        } else if allow.contains(serenity::Permissions::SEND_MESSAGES) {
            Self::Allow
        } else {
            Self::Inherit
        }
    }

    /// Rewrite only the send-messages bit of an overwrite, keeping the rest.
    pub fn apply(
        self,
        allow: serenity::Permissions,
        deny: serenity::Permissions,
    ) -> (serenity::Permissions, serenity::Permissions) {
        let send = serenity::Permissions::SEND_MESSAGES;
        let (allow, deny) = (allow - send, deny - send);

        match self {
            Self::Allow => (allow | send, deny),
            Self::Deny => (allow, deny | send),
            Self::Inherit => (allow, deny),
        }
    }
}

#[async_trait]
pub trait ModerationGateway: Send + Sync {
    /// Reply in the invoking channel.
    async fn reply(&self, content: &str) -> Result<(), GatewayError>;

    /// Reply in the invoking channel and delete the reply after `lifetime`.
    async fn reply_transient(&self, content: &str, lifetime: Duration) -> Result<(), GatewayError>;

    /// Post into an arbitrary channel; unknown or inaccessible channels map to
    /// [`GatewayError::ChannelUnavailable`].
    async fn send_to_channel(
        &self,
        channel_id: serenity::ChannelId,
        content: &str,
    ) -> Result<(), GatewayError>;

    async fn is_administrator(&self, user_id: serenity::UserId) -> Result<bool, GatewayError>;

    async fn set_nickname(
        &self,
        user_id: serenity::UserId,
        nickname: Option<&str>,
    ) -> Result<(), GatewayError>;

    async fn timeout_until(
        &self,
        user_id: serenity::UserId,
        until: DateTime<Utc>,
        reason: &str,
    ) -> Result<(), GatewayError>;

    async fn kick(&self, user_id: serenity::UserId, reason: &str) -> Result<(), GatewayError>;

    async fn ban(&self, user_id: serenity::UserId, reason: &str) -> Result<(), GatewayError>;

    async fn unban(&self, user_id: serenity::UserId, reason: &str) -> Result<(), GatewayError>;

    /// Delete up to `limit` of the newest messages, returning how many went.
    async fn purge(&self, channel_id: serenity::ChannelId, limit: u64)
    -> Result<u64, GatewayError>;

    async fn default_role_send_override(
        &self,
        channel_id: serenity::ChannelId,
    ) -> Result<SendOverride, GatewayError>;

    async fn set_default_role_send_override(
        &self,
        channel_id: serenity::ChannelId,
        state: SendOverride,
    ) -> Result<(), GatewayError>;
}
