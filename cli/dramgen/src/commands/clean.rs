//! `dramgen clean`: remove build artifacts.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::manifest::ProjectPaths;

/// Remove the build directory, and the generated outputs when `generated` is set.
pub fn run(paths: &ProjectPaths, generated: bool) -> Result<()> {
    remove(&paths.build)?;
    if generated {
        remove(&paths.generated)?;
    }
    Ok(())
}

fn remove(dir: &Path) -> Result<()> {
    if dir.exists() {
        fs::remove_dir_all(dir).with_context(|| format!("removing {}", dir.display()))?;
        println!("Removed {}", dir.display());
    } else {
        println!("Already clean: {} does not exist", dir.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::DramgenManifest;

    fn paths(root: &Path) -> ProjectPaths {
        DramgenManifest::default().resolve_paths(root, None)
    }

    #[test]
    fn clean_removes_build_dir() {
        let dir = tempfile::tempdir().unwrap();
        let paths = paths(dir.path());
        fs::create_dir_all(paths.build.join("arty/gateware")).unwrap();
        fs::create_dir_all(paths.generated.join("arty")).unwrap();

        run(&paths, false).unwrap();
        assert!(!paths.build.exists());
        assert!(paths.generated.exists());
    }

    #[test]
    fn clean_handles_already_clean() {
        let dir = tempfile::tempdir().unwrap();
        // Nothing exists yet: not an error
        run(&paths(dir.path()), true).unwrap();
    }

    #[test]
    fn clean_with_generated() {
        let dir = tempfile::tempdir().unwrap();
        let paths = paths(dir.path());
        fs::create_dir_all(&paths.build).unwrap();
        fs::create_dir_all(paths.generated.join("nexys-video")).unwrap();

        run(&paths, true).unwrap();
        assert!(!paths.build.exists());
        assert!(!paths.generated.exists());
    }
}
