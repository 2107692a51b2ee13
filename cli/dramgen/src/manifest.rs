//! `dramgen.toml` manifest parsing and project configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dramgen_config::BuildMode;
use serde::{Deserialize, Serialize};

/// Manifest file name searched for from the working directory upward.
pub const MANIFEST_FILE: &str = "dramgen.toml";
/// Environment variable naming the LiteX SoC directory when the manifest doesn't.
pub const LITEX_SOC_ENV: &str = "LITEX_SOC_DIR";

/// The top-level manifest structure. Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DramgenManifest {
    pub paths: PathsConfig,
    pub targets: TargetsConfig,
    pub tools: ToolsConfig,
}

/// Directory layout, relative to the project directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PathsConfig {
    pub gen_src: PathBuf,
    pub build: PathBuf,
    pub generated: PathBuf,
    /// LiteX SoC sources for the bootstrap init build.
    pub litex_soc: Option<PathBuf>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            gen_src: PathBuf::from("gen-src"),
            build: PathBuf::from("build"),
            generated: PathBuf::from("generated"),
            litex_soc: None,
        }
    }
}

/// Which targets to build, and how.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TargetsConfig {
    pub list: Vec<String>,
    pub mode: BuildMode,
}

impl Default for TargetsConfig {
    fn default() -> Self {
        Self {
            list: default_targets(),
            mode: BuildMode::default(),
        }
    }
}

/// External programs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ToolsConfig {
    pub generator: String,
    pub generator_args: Vec<String>,
    pub make: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            generator: "litedram_gen".to_string(),
            generator_args: Vec::new(),
            make: "make".to_string(),
        }
    }
}

/// The board targets built when nothing else is configured.
pub fn default_targets() -> Vec<String> {
    vec!["arty".to_string(), "nexys-video".to_string()]
}

/// Absolute project directories after resolving the manifest against its location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    pub gen_src: PathBuf,
    pub build: PathBuf,
    pub generated: PathBuf,
    pub litex_soc: Option<PathBuf>,
}

impl DramgenManifest {
    /// Search upward from `start_dir` for a `dramgen.toml` file, parse and return it
    /// along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(MANIFEST_FILE);
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let manifest: DramgenManifest = toml::from_str(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                return Ok(Some((manifest, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse a manifest from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing dramgen.toml")
    }

    /// Resolve configured paths against `project_dir`.
    ///
    /// `env_litex_soc` is consulted only when the manifest has no `litex-soc`.
    pub fn resolve_paths(&self, project_dir: &Path, env_litex_soc: Option<PathBuf>) -> ProjectPaths {
        let litex_soc = self
            .paths
            .litex_soc
            .clone()
            .or(env_litex_soc)
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| project_dir.join(p));
        ProjectPaths {
            gen_src: project_dir.join(&self.paths.gen_src),
            build: project_dir.join(&self.paths.build),
            generated: project_dir.join(&self.paths.generated),
            litex_soc,
        }
    }
}

/// Load the manifest if one exists above `cwd`, else fall back to defaults rooted at `cwd`.
pub fn load_or_default(cwd: &Path) -> Result<(DramgenManifest, PathBuf)> {
    Ok(DramgenManifest::find_and_load(cwd)?
        .unwrap_or_else(|| (DramgenManifest::default(), cwd.to_path_buf())))
}
