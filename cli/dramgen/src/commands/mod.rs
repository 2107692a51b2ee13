//! CLI command implementations.

pub mod clean;
pub mod doctor;
pub mod generate;
pub mod registry;
