use std::net::SocketAddr;
use std::time::Duration;

use chatpage_openai::client::{OpenAiConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

pub const DEFAULT_BIND: &str = "0.0.0.0:3000";

/// Process-wide settings read once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    /// `None` when `OPENAI_API_KEY` is unset or empty.
    pub openai: Option<OpenAiConfig>,
}

impl ServerConfig {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let bind_raw = lookup("CHATPAGE_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind: SocketAddr = bind_raw
            .parse()
            .map_err(|e| eyre::eyre!("invalid CHATPAGE_BIND {bind_raw:?}: {e}"))?;

        let timeout = match lookup("CHATPAGE_UPSTREAM_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw
                    .parse()
                    .map_err(|e| eyre::eyre!("invalid CHATPAGE_UPSTREAM_TIMEOUT_SECS {raw:?}: {e}"))?;
                Duration::from_secs(secs)
            }
            None => DEFAULT_TIMEOUT,
        };

        let openai = lookup("OPENAI_API_KEY")
            .filter(|key| !key.is_empty())
            .map(|api_key| OpenAiConfig {
                api_key,
                base_url: lookup("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
                timeout,
            });

        Ok(Self { bind, openai })
    }
}
