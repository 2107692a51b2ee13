//! Build mode: who initializes the SDRAM.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Selects how the memory controller gets its init code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuildMode {
    /// A separately built bootstrap program initializes the SDRAM; the core
    /// carries no CPU of its own.
    #[default]
    BootstrapInit,
    /// The core's own embedded CPU initializes the SDRAM using the image
    /// produced by the generator.
    SelfInit,
}

impl BuildMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildMode::BootstrapInit => "bootstrap-init",
            BuildMode::SelfInit => "self-init",
        }
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bootstrap-init" => Ok(BuildMode::BootstrapInit),
            "self-init" => Ok(BuildMode::SelfInit),
            other => Err(ConfigError::UnknownMode(other.to_string())),
        }
    }
}
