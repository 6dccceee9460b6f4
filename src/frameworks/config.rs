use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use chrono::NaiveTime;
use url::Url;

use crate::use_cases::RelaySettings;

// Value shipped in deployment templates; the relay refuses to start with it.
pub const WEBHOOK_URL_PLACEHOLDER: &str = "<webhook url>";

pub const DEFAULT_LISTEN_PORT: u16 = 3000;
pub const DEFAULT_WEBHOOK_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_INHIBIT_WINDOW_MINUTES: u64 = 30;
pub const NOTIFY_QUEUE_CAPACITY: usize = 256;

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    MissingWebhookUrl,
    InvalidWebhookUrl { value: String, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingWebhookUrl => {
                write!(f, "missing webhook URL, set WEBHOOK_URL to the chat webhook")
            }
            ConfigError::InvalidWebhookUrl { value, reason } => {
                write!(f, "invalid webhook URL {value:?}: {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Startup configuration, read once from the environment.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub listen_addr: SocketAddr,
    pub webhook_url: Url,
    pub webhook_timeout: Duration,
    pub inhibit_enabled: bool,
    pub inhibit_window: Duration,
    /// Local time of day the inhibit table is wiped.
    pub inhibit_clear_at: NaiveTime,
    pub notifications_enabled: bool,
}

impl RelayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let webhook_url = webhook_url(lookup("WEBHOOK_URL"))?;

        let host = parsed(&lookup, "LISTEN_HOST", IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        let port = parsed(&lookup, "LISTEN_PORT", DEFAULT_LISTEN_PORT);
        let timeout_ms = parsed(&lookup, "WEBHOOK_TIMEOUT_MS", DEFAULT_WEBHOOK_TIMEOUT_MS);
        let window_minutes = parsed(
            &lookup,
            "INHIBIT_WINDOW_MINUTES",
            DEFAULT_INHIBIT_WINDOW_MINUTES,
        );

        Ok(Self {
            listen_addr: SocketAddr::new(host, port),
            webhook_url,
            webhook_timeout: Duration::from_millis(timeout_ms),
            inhibit_enabled: flag(&lookup, "INHIBIT_ENABLED", true),
            inhibit_window: Duration::from_secs(window_minutes.saturating_mul(60)),
            inhibit_clear_at: clear_at(&lookup),
            notifications_enabled: flag(&lookup, "NOTIFICATIONS_ENABLED", true),
        })
    }

    pub fn relay_settings(&self) -> RelaySettings {
        RelaySettings {
            inhibit_enabled: self.inhibit_enabled,
            notifications_enabled: self.notifications_enabled,
        }
    }
}

fn webhook_url(value: Option<String>) -> Result<Url, ConfigError> {
    let value = match value {
        Some(value) if !value.trim().is_empty() && value.trim() != WEBHOOK_URL_PLACEHOLDER => {
            value.trim().to_string()
        }
        _ => return Err(ConfigError::MissingWebhookUrl),
    };

    let url = Url::parse(&value).map_err(|e| ConfigError::InvalidWebhookUrl {
        value: value.clone(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidWebhookUrl {
            value,
            reason: "scheme must be http or https".to_string(),
        });
    }

    Ok(url)
}

// Unparseable optional values fall back to their defaults.
fn parsed<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + fmt::Display,
{
    let Some(raw) = lookup(key) else {
        return default;
    };

    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!(key, value = %raw, %default, "ignoring invalid setting, using default.");
            default
        }
    }
}

fn flag(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: bool) -> bool {
    let Some(raw) = lookup(key) else {
        return default;
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => {
            tracing::warn!(key, value = %raw, default, "ignoring invalid flag, using default.");
            default
        }
    }
}

fn clear_at(lookup: &impl Fn(&str) -> Option<String>) -> NaiveTime {
    let midnight = NaiveTime::MIN;
    let Some(raw) = lookup("INHIBIT_CLEAR_AT") else {
        return midnight;
    };

    NaiveTime::parse_from_str(raw.trim(), "%H:%M").unwrap_or_else(|_| {
        tracing::warn!(value = %raw, "ignoring invalid INHIBIT_CLEAR_AT, sweeping at midnight.");
        midnight
    })
}
