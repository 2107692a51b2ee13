//! `dramgen generate`: build every requested target's core bundle.

use anyhow::{Context, Result};
use dramgen_build::{
    generate_all, CoreGenerator, ExternalGenerator, MakeTool, NativeBuild, PipelineConfig,
    TargetReport,
};
use dramgen_config::BuildMode;

use crate::manifest::{DramgenManifest, ProjectPaths};

/// Command-line overrides for a generate run.
#[derive(Debug, Default)]
pub struct GenerateOptions {
    /// Restrict the run to these targets. Empty means the manifest's list.
    pub targets: Vec<String>,
    pub mode: Option<BuildMode>,
}

/// Targets to build, in order.
pub fn selected_targets(manifest: &DramgenManifest, options: &GenerateOptions) -> Vec<String> {
    if options.targets.is_empty() {
        manifest.targets.list.clone()
    } else {
        options.targets.clone()
    }
}

/// Generate with the external tools named in the manifest.
pub fn run(manifest: &DramgenManifest, paths: &ProjectPaths, options: &GenerateOptions) -> Result<()> {
    let generator = ExternalGenerator {
        program: manifest.tools.generator.clone(),
        args: manifest.tools.generator_args.clone(),
    };
    let make = MakeTool {
        program: manifest.tools.make.clone(),
    };
    let reports = run_with(manifest, paths, options, &generator, &make)?;
    for report in &reports {
        println!("{report}");
    }
    println!("Generated {} target(s) into {}", reports.len(), paths.generated.display());
    Ok(())
}

/// Generate with the given tool implementations.
pub fn run_with(
    manifest: &DramgenManifest,
    paths: &ProjectPaths,
    options: &GenerateOptions,
    generator: &dyn CoreGenerator,
    native: &dyn NativeBuild,
) -> Result<Vec<TargetReport>> {
    let targets = selected_targets(manifest, options);
    let config = PipelineConfig {
        gen_src_dir: paths.gen_src.clone(),
        litex_soc_dir: paths.litex_soc.clone(),
        mode: options.mode.unwrap_or(manifest.targets.mode),
    };
    log::info!("mode: {}, targets: {}", config.mode, targets.join(", "));

    generate_all(
        &targets,
        &config,
        paths.build.clone(),
        paths.generated.clone(),
        generator,
        native,
    )
    .context("generation failed")
}
