use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::report::{MetarLookup, decode_response};

pub const DEFAULT_BASE_URL: &str = "https://api.checkwx.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum MetarError {
    #[error("metar request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("metar response was not valid json: {0}")]
    Decode(#[from] serde_json::Error),
}

/// CheckWX decoded-METAR client.
#[derive(Clone, Debug)]
pub struct MetarClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl MetarClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self, MetarError> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            api_key: api_key.into(),
        })
    }

    pub fn decoded_url(&self, icao: &str) -> String {
        format!("{}/metar/{}/decoded", self.base_url, icao)
    }

    pub async fn fetch(&self, icao: &str) -> Result<MetarLookup, MetarError> {
        let url = self.decoded_url(icao);
        let response = self
            .http
            .get(&url)
            .header("X-API-Key", &self.api_key)
            .send()
            .await?;

        let status = response.status().as_u16();
        debug!(icao, status, "metar response received");

        let body = response.text().await?;
        decode_response(status, &body)
    }
}
