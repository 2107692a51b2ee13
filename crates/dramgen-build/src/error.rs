//! Build orchestration errors.

use std::path::PathBuf;
use std::process::ExitStatus;

use dramgen_config::ConfigError;
use dramgen_platform::PlatformError;
use thiserror::Error;

/// Errors that can occur while generating a target.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error("failed to start {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} failed with {status}")]
    ToolFailed { tool: String, status: ExitStatus },

    #[error("expected build artifact is missing: {}", path.display())]
    MissingArtifact { path: PathBuf },

    #[error("invalid target name '{name}': must be a single plain path component")]
    InvalidTarget { name: String },

    #[error("self-init mode needs a CPU, but `cpu` is None")]
    NoInitCpu,

    #[error("LiteX SoC directory is not configured (set [paths] litex-soc or LITEX_SOC_DIR)")]
    MissingLitexSoc,

    #[error("{} does not reference {expected} after patching", path.display())]
    InitLinkMissing { path: PathBuf, expected: String },

    #[error("serializing core request: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for build operations.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Attach a path to an I/O error.
pub(crate) fn io_at(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> BuildError {
    let path = path.into();
    move |source| BuildError::Io { path, source }
}
