//! `dramgen doctor`: tool and project diagnostics.

use std::path::Path;
use std::process::Command;

use anyhow::Result;
use dramgen_config::target_config_path;

use crate::manifest::{DramgenManifest, ProjectPaths, MANIFEST_FILE};

/// Print tool availability and the resolved project layout.
pub fn run(manifest: &DramgenManifest, manifest_dir: Option<&Path>, paths: &ProjectPaths) -> Result<()> {
    println!("=== dramgen doctor ===");
    println!();
    println!("dramgen version: {}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("--- Tools ---");
    print_tool_status(&manifest.tools.make, &["--version"]);
    print_tool_status(&manifest.tools.generator, &["--help"]);
    println!();

    println!("--- Project ---");
    match manifest_dir {
        Some(dir) => println!("  {MANIFEST_FILE}: found at {}", dir.display()),
        None => println!("  {MANIFEST_FILE}: not found (using defaults)"),
    }
    println!("  Mode:      {}", manifest.targets.mode);
    print_dir("gen-src", &paths.gen_src);
    print_dir("build", &paths.build);
    print_dir("generated", &paths.generated);
    match paths.litex_soc {
        Some(ref soc) => print_dir("litex-soc", soc),
        None => println!("  litex-soc: not set (bootstrap-init builds will fail)"),
    }
    println!();

    println!("--- Targets ---");
    for target in &manifest.targets.list {
        let config = target_config_path(&paths.gen_src, target);
        let status = if config.is_file() { "ok" } else { "missing" };
        println!("  {target:<14} {} [{status}]", config.display());
    }
    Ok(())
}

fn print_dir(label: &str, dir: &Path) {
    let status = if dir.is_dir() { "" } else { " (missing)" };
    println!("  {label}: {}{status}", dir.display());
}

fn print_tool_status(name: &str, args: &[&str]) {
    match Command::new(name).args(args).output() {
        Ok(output) => {
            let version = String::from_utf8_lossy(&output.stdout);
            let first_line = version.lines().next().unwrap_or("(unknown version)");
            println!("  {name}: {first_line}");
        }
        Err(_) => {
            println!("  {name}: not found");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doctor_runs_without_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = DramgenManifest::default();
        let paths = manifest.resolve_paths(dir.path(), None);
        run(&manifest, None, &paths).unwrap();
    }
}
