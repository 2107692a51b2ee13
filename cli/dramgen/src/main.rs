//! dramgen: generates LiteDRAM memory-controller cores for FPGA boards.

mod commands;
mod manifest;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use dramgen_config::BuildMode;

use commands::generate::GenerateOptions;
use manifest::{load_or_default, DramgenManifest, LITEX_SOC_ENV};

#[derive(Parser)]
#[command(name = "dramgen", version, about = "LiteDRAM core generation")]
struct Cli {
    /// Log resolved paths and tool invocations
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate core bundles for the configured targets (the default)
    Generate {
        /// Restrict generation to this target (repeatable)
        #[arg(long)]
        target: Vec<String>,
        /// Init mode (bootstrap-init, self-init)
        #[arg(long)]
        mode: Option<String>,
    },
    /// Remove the build directory
    Clean {
        /// Also remove generated outputs
        #[arg(long)]
        generated: bool,
    },
    /// List known SDRAM modules and PHYs
    Registry,
    /// Check tools and project layout
    Doctor,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    let _ = simple_logger::SimpleLogger::new().with_level(level).init();

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let env_soc = std::env::var_os(LITEX_SOC_ENV).map(PathBuf::from);

    match cli.command.unwrap_or(Commands::Generate {
        target: Vec::new(),
        mode: None,
    }) {
        Commands::Generate { target, mode } => {
            let (manifest, project_dir) = load_or_default(&cwd)?;
            let paths = manifest.resolve_paths(&project_dir, env_soc);
            let options = GenerateOptions {
                targets: target,
                mode: mode.as_deref().map(str::parse::<BuildMode>).transpose()?,
            };
            commands::generate::run(&manifest, &paths, &options)
        }

        Commands::Clean { generated } => {
            let (manifest, project_dir) = load_or_default(&cwd)?;
            let paths = manifest.resolve_paths(&project_dir, env_soc);
            commands::clean::run(&paths, generated)
        }

        Commands::Registry => commands::registry::run(),

        Commands::Doctor => {
            let found = DramgenManifest::find_and_load(&cwd)?;
            let manifest_dir = found.as_ref().map(|(_, dir)| dir.clone());
            let (manifest, project_dir) = found.unwrap_or_else(|| (DramgenManifest::default(), cwd));
            let paths = manifest.resolve_paths(&project_dir, env_soc);
            commands::doctor::run(&manifest, manifest_dir.as_deref(), &paths)
        }
    }
}

#[cfg(test)]
mod cli_tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn bare_invocation_means_generate() {
        let cli = Cli::try_parse_from(["dramgen"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn generate_accepts_repeated_targets() {
        let cli = Cli::try_parse_from([
            "dramgen",
            "generate",
            "--target",
            "arty",
            "--target",
            "nexys-video",
            "--mode",
            "self-init",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Generate { target, mode }) => {
                assert_eq!(target, ["arty", "nexys-video"]);
                assert_eq!(mode.as_deref(), Some("self-init"));
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn verbose_is_global() {
        let cli = Cli::try_parse_from(["dramgen", "clean", "--verbose"]).unwrap();
        assert!(cli.verbose);
    }
}
