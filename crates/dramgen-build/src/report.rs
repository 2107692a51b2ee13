//! Per-target generation report.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use dramgen_config::BuildMode;
use dramgen_platform::PlatformDescriptor;
use sha2::{Digest, Sha256};

use crate::assemble::OutputBundle;
use crate::error::{io_at, Result};

/// Summary of one generated target.
#[derive(Debug, Clone)]
pub struct TargetReport {
    pub target: String,
    pub mode: BuildMode,
    /// Name of the resolved PHY.
    pub phy: String,
    pub platform: PlatformDescriptor,
    pub bundle: OutputBundle,
    /// The self-init CPU record, if one was written.
    pub cpu_file: Option<PathBuf>,
    /// SHA-256 of each bundle file, in bundle order.
    pub digests: Vec<(PathBuf, String)>,
    /// Total generation time in milliseconds.
    pub duration_ms: u64,
}

/// SHA-256 of a file's contents as lowercase hex.
pub fn file_digest(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(io_at(path))?;
    let hash = Sha256::digest(&bytes);
    Ok(hash.iter().map(|b| format!("{b:02x}")).collect())
}

/// Digest every file of a bundle.
pub fn bundle_digests(bundle: &OutputBundle) -> Result<Vec<(PathBuf, String)>> {
    bundle
        .files()
        .into_iter()
        .map(|path| Ok((path.to_path_buf(), file_digest(path)?)))
        .collect()
}

impl fmt::Display for TargetReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Target: {} ===", self.target)?;
        writeln!(f, "Mode:      {}", self.mode)?;
        writeln!(f, "PHY:       {}", self.phy)?;
        if self.platform.device.is_empty() {
            writeln!(f, "Platform:  {}", self.platform.toolchain)?;
        } else {
            writeln!(
                f,
                "Platform:  {} ({})",
                self.platform.toolchain, self.platform.device
            )?;
        }
        writeln!(f, "Duration:  {} ms", self.duration_ms)?;
        writeln!(f)?;
        writeln!(f, "--- Outputs ---")?;
        for (path, digest) in &self.digests {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy())
                .unwrap_or_default();
            writeln!(f, "  {name:<24} sha256:{}", &digest[..16.min(digest.len())])?;
        }
        if let Some(ref cpu_file) = self.cpu_file {
            writeln!(f, "  {}", cpu_file.display())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dramgen_platform::DeviceFamily;

    #[test]
    fn digest_of_known_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("abc");
        fs::write(&path, b"abc").unwrap();
        assert_eq!(
            file_digest(&path).unwrap(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn display_lists_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let bundle = OutputBundle {
            core: dir.path().join("litedram_core.v"),
            init_image: dir.path().join("litedram_core.init"),
            wrapper: dir.path().join("litedram-wrapper.vhdl"),
        };
        for path in bundle.files() {
            fs::write(path, b"x").unwrap();
        }
        let report = TargetReport {
            target: "arty".into(),
            mode: BuildMode::BootstrapInit,
            phy: "A7DDRPHY".into(),
            platform: DeviceFamily::Xilinx7Series.platform(),
            digests: bundle_digests(&bundle).unwrap(),
            bundle,
            cpu_file: None,
            duration_ms: 12,
        };
        let text = report.to_string();
        assert!(text.contains("=== Target: arty ==="));
        assert!(text.contains("Mode:      bootstrap-init"));
        assert!(text.contains("Platform:  vivado\n"));
        assert!(text.contains("litedram_core.init"));
        assert_eq!(report.digests.len(), 3);
    }
}
