//! Build orchestration for LiteDRAM cores.
//!
//! Generates one target through a fixed sequence of stages:
//! workspace reset, config resolution, platform selection, core generation,
//! init-code provisioning, and artifact assembly into `generated/<target>/`.
//!
//! The core generator and the native `make` build are external programs,
//! reached through the [`CoreGenerator`] and [`NativeBuild`] traits.

pub mod assemble;
pub mod error;
pub mod generator;
pub mod init_code;
pub mod pipeline;
pub mod report;
pub mod tool;
pub mod workspace;

pub use assemble::{assemble, OutputBundle};
pub use error::{BuildError, Result};
pub use generator::{build_core, CoreGenerator, CoreRequest, ExternalGenerator};
pub use init_code::{provide_init, InitContext, InitSources};
pub use pipeline::{generate_all, generate_target, PipelineConfig};
pub use report::TargetReport;
pub use tool::{MakeTool, NativeBuild};
pub use workspace::{make_clean_dir, reset_dir, validate_target_name, TargetDirs, Workspace};
