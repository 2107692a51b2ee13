//! Error types for platform selection.

/// Errors that can occur while selecting a build platform.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// The PHY belongs to no supported device family.
    #[error("unsupported SDRAM PHY: {phy}")]
    UnsupportedPhy {
        /// Name of the offending PHY descriptor.
        phy: String,
    },
}

/// Result type for platform operations.
pub type Result<T> = std::result::Result<T, PlatformError>;
