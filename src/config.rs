use std::time::Duration;

use serde::Deserialize;

/// Endpoint compiled into the binary. `AUCTION_API_URL` at build time replaces it.
pub const DEFAULT_API_URL: &str = match option_env!("AUCTION_API_URL") {
    Some(url) => url,
    None => "https://script.google.com/macros/s/AKfycbzozQN1ULev_Bsq4rTLUc3C1kcHmkbKd2hvjzPvIYChQOIWYiCm11986SR4K4LMsTj0Rg/exec",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Post-event summary: no dashboard, slow refresh.
    Summary,
    /// Live auction: dashboard charts and the player on the block.
    Live,
}

impl Variant {
    pub fn default_poll(self) -> Duration {
        match self {
            Variant::Summary => Duration::from_secs(60),
            Variant::Live => Duration::from_secs(15),
        }
    }

    pub fn has_dashboard(self) -> bool {
        matches!(self, Variant::Live)
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_variant() -> Variant {
    Variant::Summary
}

fn default_http_timeout_secs() -> u64 {
    20
}

fn default_output_path() -> String {
    "auction-board.html".to_string()
}

fn default_stats_log_sec() -> u64 {
    300
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_variant")]
    pub variant: Variant,

    // Falls back to the variant's interval
    #[serde(default)]
    pub poll_secs: Option<u64>,
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,

    #[serde(default = "default_output_path")]
    pub output_path: String,

    // Drop results of cycles older than the last applied one
    #[serde(default)]
    pub discard_stale: bool,

    // Stats
    #[serde(default = "default_stats_log_sec")]
    pub stats_log_sec: u64,
    #[serde(default)]
    pub stats_jsonl_path: Option<String>,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let c = config::Config::builder()
            .add_source(config::Environment::default())
            .build()?;
        Self::from_config(c)
    }

    pub fn from_config(c: config::Config) -> anyhow::Result<Self> {
        Ok(c.try_deserialize()?)
    }

    pub fn poll_interval(&self) -> Duration {
        match self.poll_secs {
            Some(s) if s > 0 => Duration::from_secs(s),
            _ => self.variant.default_poll(),
        }
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs.max(1))
    }
}
