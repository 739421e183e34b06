pub mod config;
pub mod gateway;

use std::sync::Arc;

use atc_metar::MetarClient;

pub use config::BotConfig;

pub type Error = anyhow::Error;

#[derive(Clone, Debug)]
pub struct Data {
    pub config: Arc<BotConfig>,
    pub metar: Option<MetarClient>,
}

pub type Context<'a> = poise::Context<'a, Data, Error>;
