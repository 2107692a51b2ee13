//! Error types for configuration loading and resolution.

use std::path::PathBuf;

/// Errors that can occur while loading or resolving a target configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML deserialization error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// I/O error reading a configuration file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file not found.
    #[error("config file not found: {}", path.display())]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// A clock-frequency key holds a value that is not a number.
    #[error("key '{key}' must be a frequency, got {value}")]
    InvalidFrequency {
        /// The offending key.
        key: String,
        /// Rendered form of the rejected value.
        value: String,
    },

    /// A selector names a descriptor that is not in its registry.
    #[error("unsupported {key}: '{name}'")]
    UnsupportedSelector {
        /// The selector key (`sdram_module` or `sdram_phy`).
        key: String,
        /// The unknown descriptor name.
        name: String,
    },

    /// A selector holds something other than a name.
    #[error("key '{key}' must name a descriptor, got {value}")]
    InvalidSelector {
        /// The selector key.
        key: String,
        /// Rendered form of the rejected value.
        value: String,
    },

    /// A required key is missing from the resolved configuration.
    #[error("missing required config key: {key}")]
    MissingKey {
        /// The missing key.
        key: String,
    },

    /// An unrecognized build mode name.
    #[error("unknown build mode: '{0}' (expected bootstrap-init or self-init)")]
    UnknownMode(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
