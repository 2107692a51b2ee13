//! Per-target generation pipeline.

use std::path::PathBuf;
use std::time::Instant;

use dramgen_config::{load_raw_config, resolve, target_config_path, BuildMode};
use dramgen_platform::select_platform;
use log::info;

use crate::assemble::assemble;
use crate::error::Result;
use crate::generator::{build_core, CoreGenerator};
use crate::init_code::{provide_init, InitContext};
use crate::report::{bundle_digests, TargetReport};
use crate::tool::NativeBuild;
use crate::workspace::{validate_target_name, Workspace};

/// Settings shared by every target of a run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory holding `<target>.toml`, wrapper templates and `sdram_init/`.
    pub gen_src_dir: PathBuf,
    /// LiteX SoC source directory, needed for bootstrap-init builds.
    pub litex_soc_dir: Option<PathBuf>,
    pub mode: BuildMode,
}

/// Run the full pipeline for one target:
/// reset dirs -> load + resolve -> select platform -> build core -> provide init -> assemble.
pub fn generate_target(
    target: &str,
    config: &PipelineConfig,
    workspace: &Workspace,
    generator: &dyn CoreGenerator,
    native: &dyn NativeBuild,
) -> Result<TargetReport> {
    let start = Instant::now();
    info!("generating target: {target}");

    // Stage 1: Fresh build and output directories
    let dirs = workspace.target_dirs(target)?;

    // Stage 2: Config resolution
    let raw = load_raw_config(&target_config_path(&config.gen_src_dir, target))?;
    let resolved = resolve(&raw, config.mode)?;

    // Stage 3: Platform selection
    let phy = resolved.sdram_phy()?;
    let platform = select_platform(phy)?;

    // Stage 4: Core generation
    let gw_dir = build_core(generator, platform.clone(), resolved.clone(), &dirs.build)?;

    // Stage 5: Init code
    let ctx = InitContext {
        build_dir: &dirs.build,
        gateware_dir: &gw_dir,
        output_dir: &dirs.output,
        gen_src_dir: &config.gen_src_dir,
        litex_soc_dir: config.litex_soc_dir.as_deref(),
    };
    let sources = provide_init(config.mode, &resolved, &ctx, native)?;

    // Stage 6: Output bundle
    let bundle = assemble(&gw_dir, &dirs.output, &sources.init_image, &sources.wrapper)?;
    let digests = bundle_digests(&bundle)?;

    Ok(TargetReport {
        target: target.to_string(),
        mode: config.mode,
        phy: phy.name.to_string(),
        platform,
        bundle,
        cpu_file: sources.cpu_file,
        digests,
        duration_ms: start.elapsed().as_millis() as u64,
    })
}

/// Prepare the workspace once, then generate each target in order.
///
/// Every target name is checked before anything is reset. Stops at the
/// first failing target; later targets are not attempted.
pub fn generate_all(
    targets: &[String],
    config: &PipelineConfig,
    build_root: PathBuf,
    generated_root: PathBuf,
    generator: &dyn CoreGenerator,
    native: &dyn NativeBuild,
) -> Result<Vec<TargetReport>> {
    for target in targets {
        validate_target_name(target)?;
    }
    let workspace = Workspace::prepare(build_root, generated_root)?;
    targets
        .iter()
        .map(|target| generate_target(target, config, &workspace, generator, native))
        .collect()
}
