//! Build and output directory management.
//!
//! Every directory handed out here is reset first: removed if present,
//! then created empty. Nothing from a previous run survives.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::{io_at, BuildError, Result};

/// Remove `path` recursively if it exists, then create it empty.
pub fn reset_dir(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_dir_all(path).map_err(io_at(path))?;
    }
    fs::create_dir_all(path).map_err(io_at(path))?;
    Ok(())
}

/// Require `name` to be exactly one normal path component.
///
/// Rejects empty names, `.`, `..`, separators and absolute paths, so that
/// `base.join(name)` always stays directly below `base`.
pub fn validate_target_name(name: &str) -> Result<()> {
    let mut components = Path::new(name).components();
    let single_normal = matches!(components.next(), Some(Component::Normal(_)))
        && components.next().is_none();
    if !single_normal || name.contains(['/', '\\']) {
        return Err(BuildError::InvalidTarget {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Reset `base/name` and return its path.
pub fn make_clean_dir(base: &Path, name: &str) -> Result<PathBuf> {
    validate_target_name(name)?;
    let dir = base.join(name);
    reset_dir(&dir)?;
    Ok(dir)
}

/// The top-level build and generated trees of one run.
#[derive(Debug, Clone)]
pub struct Workspace {
    /// Root of per-target build intermediates.
    pub build_root: PathBuf,
    /// Root of per-target final artifacts.
    pub generated_root: PathBuf,
}

/// Directories owned by a single target.
#[derive(Debug, Clone)]
pub struct TargetDirs {
    /// `build/<target>`: generator output and init software.
    pub build: PathBuf,
    /// `generated/<target>`: the output bundle.
    pub output: PathBuf,
}

impl Workspace {
    /// Reset both roots and return the workspace.
    pub fn prepare(build_root: impl Into<PathBuf>, generated_root: impl Into<PathBuf>) -> Result<Self> {
        let ws = Self {
            build_root: build_root.into(),
            generated_root: generated_root.into(),
        };
        reset_dir(&ws.build_root)?;
        reset_dir(&ws.generated_root)?;
        Ok(ws)
    }

    /// Reset and return the directories for `target`.
    pub fn target_dirs(&self, target: &str) -> Result<TargetDirs> {
        Ok(TargetDirs {
            build: make_clean_dir(&self.build_root, target)?,
            output: make_clean_dir(&self.generated_root, target)?,
        })
    }
}
