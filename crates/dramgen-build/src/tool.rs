//! External process invocation.

use std::path::Path;
use std::process::Command;

use log::debug;

use crate::error::{BuildError, Result};

/// Run `cmd` to completion and require a zero exit status.
pub fn run_tool(mut cmd: Command, tool: &str) -> Result<()> {
    debug!("running {cmd:?}");
    let status = cmd.status().map_err(|source| BuildError::Spawn {
        tool: tool.to_string(),
        source,
    })?;
    if !status.success() {
        return Err(BuildError::ToolFailed {
            tool: tool.to_string(),
            status,
        });
    }
    Ok(())
}

/// A native build of the bootstrap init software.
pub trait NativeBuild {
    /// Build `makefile` with `build_dir` as working directory and
    /// `include_dir` on the makefile include path.
    fn make(&self, build_dir: &Path, include_dir: &Path, makefile: &Path) -> Result<()>;
}

/// `make -C <build_dir> -I <include_dir> -f <makefile>`.
#[derive(Debug, Clone)]
pub struct MakeTool {
    pub program: String,
}

impl Default for MakeTool {
    fn default() -> Self {
        Self {
            program: "make".into(),
        }
    }
}

impl NativeBuild for MakeTool {
    fn make(&self, build_dir: &Path, include_dir: &Path, makefile: &Path) -> Result<()> {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-C")
            .arg(build_dir)
            .arg("-I")
            .arg(include_dir)
            .arg("-f")
            .arg(makefile);
        run_tool(cmd, &self.program)
    }
}


#[cfg(all(test, unix))]
mod tests {
    use super::recording::{recorded_args, recording_tool};
    use super::*;

    #[test]
    fn zero_exit_succeeds() {
        run_tool(Command::new("true"), "true").unwrap();
    }

    #[test]
    fn nonzero_exit_fails() {
        let err = run_tool(Command::new("false"), "false").unwrap_err();
        assert!(matches!(err, BuildError::ToolFailed { ref tool, .. } if tool == "false"));
    }

    #[test]
    fn missing_program_fails_to_spawn() {
        let tool = MakeTool {
            program: "/nonexistent/make".into(),
        };
        let dir = tempfile::tempdir().unwrap();
        let err = tool
            .make(dir.path(), dir.path(), &dir.path().join("Makefile"))
            .unwrap_err();
        assert!(matches!(err, BuildError::Spawn { .. }));
    }

    #[test]
    fn make_receives_directory_include_and_makefile() {
        let dir = tempfile::tempdir().unwrap();
        let script = recording_tool(dir.path(), "make");
        let build = dir.path().join("build/arty");
        let include = build.join("software/include/generated");
        let makefile = dir.path().join("gen-src/sdram_init/Makefile");
        let tool = MakeTool {
            program: script.to_string_lossy().into_owned(),
        };

        tool.make(&build, &include, &makefile).unwrap();
        assert_eq!(
            recorded_args(&script),
            [
                "-C".to_string(),
                build.display().to_string(),
                "-I".to_string(),
                include.display().to_string(),
                "-f".to_string(),
                makefile.display().to_string(),
            ]
        );
    }
}
