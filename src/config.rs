//! Process configuration read from the environment

use chrono::FixedOffset;
use thiserror::Error;

const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value {value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Settings the bot needs before it can start
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub bot_token: String,
    /// Chat that receives completed bookings
    pub operator_chat_id: i64,
    /// Port of the health endpoint
    pub port: u16,
    /// Time zone used to decide what "today" is; `None` means server local
    pub operator_offset: Option<FixedOffset>,
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let bot_token = required("BOT_API_KEY")?;

        let operator_raw = required("ADMIN_TELEGRAM_ID")?;
        let operator_chat_id =
            operator_raw
                .trim()
                .parse::<i64>()
                .map_err(|_| ConfigError::Invalid {
                    name: "ADMIN_TELEGRAM_ID",
                    value: operator_raw.clone(),
                    reason: "expected a numeric chat id",
                })?;

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: raw.clone(),
                reason: "expected a port number",
            })?,
            None => DEFAULT_PORT,
        };

        let operator_offset = lookup("OPERATOR_UTC_OFFSET")
            .map(|raw| {
                parse_utc_offset(&raw).ok_or(ConfigError::Invalid {
                    name: "OPERATOR_UTC_OFFSET",
                    value: raw.clone(),
                    reason: "expected a signed offset like +03:00",
                })
            })
            .transpose()?;

        Ok(Self {
            bot_token,
            operator_chat_id,
            port,
            operator_offset,
        })
    }
}

/// Parse `+HH:MM` / `-HH:MM`
fn parse_utc_offset(raw: &str) -> Option<FixedOffset> {
    let raw = raw.trim();
    let (sign, rest) = if let Some(rest) = raw.strip_prefix('+') {
        (1, rest)
    } else {
        (-1, raw.strip_prefix('-')?)
    };
    let (hours, minutes) = rest.split_once(':')?;
    let two_digits = |part: &str| part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit());
    if !two_digits(hours) || !two_digits(minutes) {
        return None;
    }
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 14 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
