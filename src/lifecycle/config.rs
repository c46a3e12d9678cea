//! Runtime configuration.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `FUSELOJA_CHANNEL_BUFFER` | 32 | mailbox capacity of each actor |
//! | `FUSELOJA_UTC_OFFSET` | +00:00 | offset whose calendar day scopes order numbers |
//!
//! ```ignore
//! FUSELOJA_UTC_OFFSET=-03:00 cargo run
//! ```

use chrono::{FixedOffset, Offset, Utc};
use thiserror::Error;

pub const CHANNEL_BUFFER_VAR: &str = "FUSELOJA_CHANNEL_BUFFER";
pub const UTC_OFFSET_VAR: &str = "FUSELOJA_UTC_OFFSET";

const DEFAULT_CHANNEL_BUFFER: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got {value:?}")]
    InvalidChannelBuffer { var: &'static str, value: String },

    #[error("{var} must look like +HH:MM or -HH:MM, got {value:?}")]
    InvalidUtcOffset { var: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemConfig {
    pub channel_buffer: usize,
    pub utc_offset: FixedOffset,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            channel_buffer: DEFAULT_CHANNEL_BUFFER,
            utc_offset: Utc.fix(),
        }
    }
}

impl SystemConfig {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick up a `.env`.
    ///
    /// Unset variables take their defaults; set but invalid ones are errors.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup(CHANNEL_BUFFER_VAR) {
            config.channel_buffer = value
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n >= 1)
                .ok_or(ConfigError::InvalidChannelBuffer {
                    var: CHANNEL_BUFFER_VAR,
                    value,
                })?;
        }

        if let Some(value) = lookup(UTC_OFFSET_VAR) {
            config.utc_offset = value
                .trim()
                .parse::<FixedOffset>()
                .map_err(|_| ConfigError::InvalidUtcOffset {
                    var: UTC_OFFSET_VAR,
                    value,
                })?;
        }

        Ok(config)
    }
}
