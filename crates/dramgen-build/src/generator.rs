//! The core generator seam.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use dramgen_config::ResolvedConfig;
use dramgen_platform::PlatformDescriptor;
use log::info;
use serde::Serialize;

use crate::error::{io_at, Result};
use crate::tool::run_tool;

/// Build name given to the generator; names the core's HDL file.
pub const BUILD_NAME: &str = "litedram_core";
/// Size of the ROM integrated in the core, in bytes.
pub const INTEGRATED_ROM_SIZE: u32 = 0x6000;
/// Width of the host-facing CSR bus.
pub const CSR_DATA_WIDTH: u32 = 32;
/// Subdirectory of the build directory holding generated HDL.
pub const GATEWARE_DIR: &str = "gateware";

/// Everything the generator needs to produce one core.
#[derive(Debug, Clone, Serialize)]
pub struct CoreRequest {
    pub platform: PlatformDescriptor,
    pub config: ResolvedConfig,
    pub integrated_rom_size: u32,
    pub csr_data_width: u32,
    pub build_name: String,
    /// Always false: only HDL and support files are produced, no bitstream.
    pub compile_gateware: bool,
}

impl CoreRequest {
    pub fn new(platform: PlatformDescriptor, config: ResolvedConfig) -> Self {
        Self {
            platform,
            config,
            integrated_rom_size: INTEGRATED_ROM_SIZE,
            csr_data_width: CSR_DATA_WIDTH,
            build_name: BUILD_NAME.into(),
            compile_gateware: false,
        }
    }
}

/// Produces core HDL and support files from a request.
pub trait CoreGenerator {
    /// Build into `output_dir`, returning the generated gateware directory.
    fn build(&self, request: &CoreRequest, output_dir: &Path) -> Result<PathBuf>;
}

/// Generate a core for `platform` and `config` into `output_dir`.
pub fn build_core(
    generator: &dyn CoreGenerator,
    platform: PlatformDescriptor,
    config: ResolvedConfig,
    output_dir: &Path,
) -> Result<PathBuf> {
    info!(
        "generating core ({} toolchain) into {}",
        platform.toolchain,
        output_dir.display()
    );
    let request = CoreRequest::new(platform, config);
    generator.build(&request, output_dir)
}

/// The gateware directory a build into `output_dir` produces.
pub fn gateware_dir(output_dir: &Path) -> PathBuf {
    output_dir.join(GATEWARE_DIR)
}

/// Runs an external generator program.
///
/// The request is written as JSON next to the build outputs, and the program
/// is invoked as
/// `<program> <args..> --config <json> --output-dir <dir> --name <build> --no-compile-gateware`.
#[derive(Debug, Clone)]
pub struct ExternalGenerator {
    pub program: String,
    pub args: Vec<String>,
}

impl ExternalGenerator {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Path of the request file for a build into `output_dir`.
    pub fn request_path(output_dir: &Path) -> PathBuf {
        output_dir.join(format!("{BUILD_NAME}.json"))
    }
}

impl CoreGenerator for ExternalGenerator {
    fn build(&self, request: &CoreRequest, output_dir: &Path) -> Result<PathBuf> {
        let request_path = Self::request_path(output_dir);
        let json = serde_json::to_string_pretty(request)?;
        fs::write(&request_path, json).map_err(io_at(&request_path))?;

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .arg("--config")
            .arg(&request_path)
            .arg("--output-dir")
            .arg(output_dir)
            .arg("--name")
            .arg(&request.build_name);
        if !request.compile_gateware {
            cmd.arg("--no-compile-gateware");
        }
        run_tool(cmd, &self.program)?;

        Ok(gateware_dir(output_dir))
    }
}
