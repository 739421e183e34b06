use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use poise::serenity_prelude as serenity;

use atc_core::BotConfig;
use atc_core::gateway::{GatewayError, ModerationGateway, SendOverride, Subject};

use super::ActionContext;

pub const LOG_CHANNEL: u64 = 900;
pub const INVOKING_CHANNEL: u64 = 100;
pub const ACTOR_ID: u64 = 1;
pub const GUILD: u64 = 10;

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Nickname(serenity::UserId, Option<String>),
    Timeout(serenity::UserId, DateTime<Utc>, String),
    Kick(serenity::UserId, String),
    Ban(serenity::UserId, String),
    Unban(serenity::UserId, String),
    Purge(serenity::ChannelId, u64),
    SetOverride(serenity::ChannelId, SendOverride),
}

/// In-memory [`ModerationGateway`] that records every call.
#[derive(Default)]
pub struct FakeGateway {
    pub fail_mutations: bool,
    pub log_channel_missing: bool,
    pub log_delivery_fails: bool,
    pub administrator: bool,
    /// Every reply to the invoking channel fails, as when the bot cannot post there.
    pub replies_fail: bool,
    /// Messages present in the channel; `None` means "as many as asked for".
    pub available_messages: Option<u64>,
    pub(crate) calls: Mutex<Vec<Call>>,
    pub(crate) replies: Mutex<Vec<String>>,
    pub(crate) transient_replies: Mutex<Vec<(String, Duration)>>,
    pub(crate) logs: Mutex<Vec<(serenity::ChannelId, String)>>,
    pub(crate) overrides: Mutex<HashMap<serenity::ChannelId, SendOverride>>,
}

impl FakeGateway {
    pub fn with_override(self, channel_id: serenity::ChannelId, state: SendOverride) -> Self {
        self.overrides
            .lock()
            .expect("overrides lock")
            .insert(channel_id, state);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn replies(&self) -> Vec<String> {
        self.replies.lock().expect("replies lock").clone()
    }

    pub fn transient_replies(&self) -> Vec<(String, Duration)> {
        self.transient_replies
            .lock()
            .expect("transient lock")
            .clone()
    }

    pub fn logs(&self) -> Vec<(serenity::ChannelId, String)> {
        self.logs.lock().expect("logs lock").clone()
    }

    pub fn current_override(&self, channel_id: serenity::ChannelId) -> SendOverride {
        self.overrides
            .lock()
            .expect("overrides lock")
            .get(&channel_id)
            .copied()
            .unwrap_or(SendOverride::Inherit)
    }

    fn mutate(&self, call: Call) -> Result<(), GatewayError> {
        if self.fail_mutations {
            return Err(GatewayError::Request("Missing Permissions".to_owned()));
        }
        self.calls.lock().expect("calls lock").push(call);
        Ok(())
    }
}

#[async_trait]
impl ModerationGateway for FakeGateway {
    async fn reply(&self, content: &str) -> Result<(), GatewayError> {
        if self.replies_fail {
            return Err(GatewayError::Request("Missing Access".to_owned()));
        }
        self.replies
            .lock()
            .expect("replies lock")
            .push(content.to_owned());
        Ok(())
    }

    async fn reply_transient(&self, content: &str, lifetime: Duration) -> Result<(), GatewayError> {
        if self.replies_fail {
            return Err(GatewayError::Request("Missing Access".to_owned()));
        }
        self.transient_replies
            .lock()
            .expect("transient lock")
            .push((content.to_owned(), lifetime));
        Ok(())
    }

    async fn send_to_channel(
        &self,
        channel_id: serenity::ChannelId,
        content: &str,
    ) -> Result<(), GatewayError> {
        if self.log_channel_missing {
            return Err(GatewayError::ChannelUnavailable);
        }
        if self.log_delivery_fails {
            return Err(GatewayError::Request("missing access".to_owned()));
        }
        self.logs
            .lock()
            .expect("logs lock")
            .push((channel_id, content.to_owned()));
        Ok(())
    }

    async fn is_administrator(&self, _user_id: serenity::UserId) -> Result<bool, GatewayError> {
        Ok(self.administrator)
    }

    async fn set_nickname(
        &self,
        user_id: serenity::UserId,
        nickname: Option<&str>,
    ) -> Result<(), GatewayError> {
        self.mutate(Call::Nickname(user_id, nickname.map(str::to_owned)))
    }

    async fn timeout_until(
        &self,
        user_id: serenity::UserId,
        until: DateTime<Utc>,
        reason: &str,
    ) -> Result<(), GatewayError> {
        self.mutate(Call::Timeout(user_id, until, reason.to_owned()))
    }

    async fn kick(&self, user_id: serenity::UserId, reason: &str) -> Result<(), GatewayError> {
        self.mutate(Call::Kick(user_id, reason.to_owned()))
    }

    async fn ban(&self, user_id: serenity::UserId, reason: &str) -> Result<(), GatewayError> {
        self.mutate(Call::Ban(user_id, reason.to_owned()))
    }

    async fn unban(&self, user_id: serenity::UserId, reason: &str) -> Result<(), GatewayError> {
        self.mutate(Call::Unban(user_id, reason.to_owned()))
    }

    async fn purge(
        &self,
        channel_id: serenity::ChannelId,
        limit: u64,
    ) -> Result<u64, GatewayError> {
        self.mutate(Call::Purge(channel_id, limit))?;
        Ok(self
            .available_messages
            .map_or(limit, |available| available.min(limit)))
    }

    async fn default_role_send_override(
        &self,
        channel_id: serenity::ChannelId,
    ) -> Result<SendOverride, GatewayError> {
        Ok(self.current_override(channel_id))
    }

    async fn set_default_role_send_override(
        &self,
        channel_id: serenity::ChannelId,
        state: SendOverride,
    ) -> Result<(), GatewayError> {
        self.mutate(Call::SetOverride(channel_id, state))?;
        self.overrides
            .lock()
            .expect("overrides lock")
            .insert(channel_id, state);
        Ok(())
    }
}

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub fn test_config() -> BotConfig {
    BotConfig::from_lookup(|key| match key {
        "LOG_CHANNEL_ID" => Some(LOG_CHANNEL.to_string()),
        _ => None,
    })
    .expect("test config")
}

pub fn subject(id: u64, name: &str) -> Subject {
    Subject {
        id: serenity::UserId::new(id),
        name: name.to_owned(),
        tag: name.to_owned(),
    }
}

pub fn context<'a>(gateway: &'a FakeGateway, config: &'a BotConfig) -> ActionContext<'a> {
    ActionContext {
        gateway,
        config,
        actor: subject(ACTOR_ID, "caller"),
        channel_id: serenity::ChannelId::new(INVOKING_CHANNEL),
        now: fixed_now(),
    }
}
