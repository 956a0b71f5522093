use std::time::Duration;

use chatpage_core::models::model::ModelSelection;

use crate::api::DEFAULT_TIMEOUT;

pub const DEFAULT_URL: &str = "http://127.0.0.1:3000";

/// Terminal client settings, read from the environment.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub model: ModelSelection,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let base_url = lookup("CHATPAGE_URL").unwrap_or_else(|| DEFAULT_URL.to_string());

        let model = match lookup("CHATPAGE_MODEL") {
            Some(raw) => raw.parse::<ModelSelection>()?,
            None => ModelSelection::default(),
        };

        let timeout = match lookup("CHATPAGE_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(
                raw.parse()
                    .map_err(|e| eyre::eyre!("invalid CHATPAGE_TIMEOUT_SECS {raw:?}: {e}"))?,
            ),
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self {
            base_url,
            model,
            timeout,
        })
    }
}
