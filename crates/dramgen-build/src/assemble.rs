//! Assembly of the per-target output bundle.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::{io_at, BuildError, Result};
use crate::generator::BUILD_NAME;
use crate::init_code::GENERATOR_INIT_IMAGE;

/// Init image name in the output bundle, referenced by the patched core.
pub const TARGET_INIT_FILE: &str = "litedram_core.init";
/// Wrapper name in the output bundle.
pub const WRAPPER_FILE: &str = "litedram-wrapper.vhdl";

/// File name of the generated core HDL.
pub fn core_file_name() -> String {
    format!("{BUILD_NAME}.v")
}

/// The files placed in a target's output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputBundle {
    /// Patched core HDL.
    pub core: PathBuf,
    pub init_image: PathBuf,
    pub wrapper: PathBuf,
}

impl OutputBundle {
    pub fn files(&self) -> [&Path; 3] {
        [
            self.core.as_path(),
            self.init_image.as_path(),
            self.wrapper.as_path(),
        ]
    }
}

/// Point the core's init-image reference at the bundle's init file.
///
/// Replaces every occurrence of the generator's image name in place and
/// returns the number of replacements. Fails if the patched source does not
/// reference the bundle's init file afterwards.
pub fn patch_init_reference(core: &Path) -> Result<usize> {
    let source = fs::read_to_string(core).map_err(io_at(core))?;
    let count = source.matches(GENERATOR_INIT_IMAGE).count();
    if count > 0 {
        let patched = source.replace(GENERATOR_INIT_IMAGE, TARGET_INIT_FILE);
        fs::write(core, &patched).map_err(io_at(core))?;
        return Ok(count);
    }
    if !source.contains(TARGET_INIT_FILE) {
        return Err(BuildError::InitLinkMissing {
            path: core.to_path_buf(),
            expected: TARGET_INIT_FILE.into(),
        });
    }
    Ok(0)
}

/// Patch the core in `gw_dir` and copy it, the init image and the wrapper
/// into `output_dir`.
///
/// The core is patched before copying; the copy is byte for byte.
pub fn assemble(
    gw_dir: &Path,
    output_dir: &Path,
    init_src: &Path,
    wrapper_src: &Path,
) -> Result<OutputBundle> {
    let core_name = core_file_name();
    let core_src = gw_dir.join(&core_name);
    if !core_src.is_file() {
        return Err(BuildError::MissingArtifact { path: core_src });
    }

    let replaced = patch_init_reference(&core_src)?;
    info!("patched {replaced} init reference(s) in {core_name}");

    let bundle = OutputBundle {
        core: output_dir.join(&core_name),
        init_image: output_dir.join(TARGET_INIT_FILE),
        wrapper: output_dir.join(WRAPPER_FILE),
    };
    copy(&core_src, &bundle.core)?;
    copy(init_src, &bundle.init_image)?;
    copy(wrapper_src, &bundle.wrapper)?;
    Ok(bundle)
}

fn copy(from: &Path, to: &Path) -> Result<()> {
    fs::copy(from, to).map_err(io_at(from))?;
    Ok(())
}
