//! Init-code provisioning: where the SDRAM init image comes from.
//!
//! In bootstrap-init mode the init software is built here with the native
//! build tool. In self-init mode the generator's own image is used and the
//! selected CPU is recorded next to the outputs.

use std::fs;
use std::path::{Path, PathBuf};

use dramgen_config::{BuildMode, ResolvedConfig};
use log::{debug, info};

use crate::error::{io_at, BuildError, Result};
use crate::tool::NativeBuild;

/// Physical base address of main RAM as seen by the init software.
pub const MAIN_RAM_BASE: u64 = 0x4000_0000;
/// Wrapper template for bootstrap-init builds.
pub const WRAPPER_BOOTSTRAP: &str = "wrapper-mw-init.vhdl";
/// Wrapper template for self-init builds.
pub const WRAPPER_SELF_INIT: &str = "wrapper-self-init.vhdl";
/// File naming the self-init CPU, written to the output directory.
pub const INIT_CPU_FILE: &str = "init-cpu.txt";
/// Init image the generator writes into the gateware directory.
pub const GENERATOR_INIT_IMAGE: &str = "mem.init";

/// Paths the init-code provider works with for one target.
#[derive(Debug, Clone)]
pub struct InitContext<'a> {
    /// `build/<target>`.
    pub build_dir: &'a Path,
    /// Gateware directory produced by the generator.
    pub gateware_dir: &'a Path,
    /// `generated/<target>`.
    pub output_dir: &'a Path,
    /// Directory holding target configs, wrappers and the init sources.
    pub gen_src_dir: &'a Path,
    /// LiteX SoC source directory (bios sources and headers).
    pub litex_soc_dir: Option<&'a Path>,
}

/// Where the assembler should take the init image and wrapper from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitSources {
    pub init_image: PathBuf,
    pub wrapper: PathBuf,
    /// The CPU record, written in self-init mode only.
    pub cpu_file: Option<PathBuf>,
}

/// Provide the init image and wrapper template for `mode`.
pub fn provide_init(
    mode: BuildMode,
    config: &ResolvedConfig,
    ctx: &InitContext<'_>,
    native: &dyn NativeBuild,
) -> Result<InitSources> {
    match mode {
        BuildMode::BootstrapInit => Ok(InitSources {
            init_image: build_init_code(ctx, native)?,
            wrapper: ctx.gen_src_dir.join(WRAPPER_BOOTSTRAP),
            cpu_file: None,
        }),
        BuildMode::SelfInit => {
            let cpu = config.cpu()?.ok_or(BuildError::NoInitCpu)?;
            let cpu_file = ctx.output_dir.join(INIT_CPU_FILE);
            fs::write(&cpu_file, cpu).map_err(io_at(&cpu_file))?;
            info!("self-init with {cpu}");
            Ok(InitSources {
                init_image: ctx.gateware_dir.join(GENERATOR_INIT_IMAGE),
                wrapper: ctx.gen_src_dir.join(WRAPPER_SELF_INIT),
                cpu_file: Some(cpu_file),
            })
        }
    }
}

/// Contents of the generated `mem.h`.
pub fn mem_header() -> String {
    format!("#define MAIN_RAM_BASE 0x{MAIN_RAM_BASE:08x}")
}

/// Escape a value for a makefile variable assignment.
pub fn makefile_escape(s: &str) -> String {
    s.replace('\\', "\\\\")
}

/// Render `KEY=value` lines for a `variables.mak` file.
pub fn render_variables(vars: &[(&str, &Path)]) -> String {
    vars.iter()
        .map(|(key, path)| format!("{key}={}\n", makefile_escape(&path.to_string_lossy())))
        .collect()
}

/// Build the bootstrap init software and return the hex image path.
fn build_init_code(ctx: &InitContext<'_>, native: &dyn NativeBuild) -> Result<PathBuf> {
    let soc_dir = ctx.litex_soc_dir.ok_or(BuildError::MissingLitexSoc)?;

    let sw_dir = ctx.build_dir.join("software");
    let sw_inc_dir = sw_dir.join("include");
    let gen_inc_dir = sw_inc_dir.join("generated");
    let src_dir = ctx.gen_src_dir.join("sdram_init");
    let lxbios_src_dir = soc_dir.join("software").join("bios");
    let lxbios_inc_dir = soc_dir.join("software").join("include");
    debug!("     sw dir: {}", sw_dir.display());
    debug!("gen inc dir: {}", gen_inc_dir.display());
    debug!("    src dir: {}", src_dir.display());
    debug!(" lx src dir: {}", lxbios_src_dir.display());
    debug!(" lx inc dir: {}", lxbios_inc_dir.display());

    fs::create_dir_all(&gen_inc_dir).map_err(io_at(&gen_inc_dir))?;

    let mem_h = gen_inc_dir.join("mem.h");
    fs::write(&mem_h, mem_header()).map_err(io_at(&mem_h))?;

    let variables = render_variables(&[
        ("BUILD_DIR", sw_dir.as_path()),
        ("SRC_DIR", src_dir.as_path()),
        ("GENINC_DIR", sw_inc_dir.as_path()),
        ("LXSRC_DIR", lxbios_src_dir.as_path()),
        ("LXINC_DIR", lxbios_inc_dir.as_path()),
    ]);
    let variables_mak = gen_inc_dir.join("variables.mak");
    fs::write(&variables_mak, variables).map_err(io_at(&variables_mak))?;

    info!("building init software");
    native.make(ctx.build_dir, &gen_inc_dir, &src_dir.join("Makefile"))?;

    let image = sw_dir.join("obj").join("sdram_init.hex");
    if !image.is_file() {
        return Err(BuildError::MissingArtifact { path: image });
    }
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use dramgen_config::{parse_raw_config, resolve};

    /// Records invocations and drops a hex image where make would.
    #[derive(Default)]
    struct FakeMake {
        calls: RefCell<Vec<(PathBuf, PathBuf, PathBuf)>>,
        produce_image: bool,
    }

    impl NativeBuild for FakeMake {
        fn make(&self, build_dir: &Path, include_dir: &Path, makefile: &Path) -> Result<()> {
            self.calls.borrow_mut().push((
                build_dir.to_path_buf(),
                include_dir.to_path_buf(),
                makefile.to_path_buf(),
            ));
            if self.produce_image {
                let obj = build_dir.join("software").join("obj");
                fs::create_dir_all(&obj).unwrap();
                fs::write(obj.join("sdram_init.hex"), "00000000\n").unwrap();
            }
            Ok(())
        }
    }

    struct Dirs {
        _root: tempfile::TempDir,
        build: PathBuf,
        gateware: PathBuf,
        output: PathBuf,
        gen_src: PathBuf,
        soc: PathBuf,
    }

    fn dirs() -> Dirs {
        let root = tempfile::tempdir().unwrap();
        let build = root.path().join("build");
        let gateware = build.join("gateware");
        let output = root.path().join("generated");
        fs::create_dir_all(&gateware).unwrap();
        fs::create_dir_all(&output).unwrap();
        Dirs {
            build,
            gateware,
            output,
            gen_src: root.path().join("gen-src"),
            soc: root.path().join("litex").join("soc"),
            _root: root,
        }
    }

    impl Dirs {
        fn ctx(&self, with_soc: bool) -> InitContext<'_> {
            InitContext {
                build_dir: &self.build,
                gateware_dir: &self.gateware,
                output_dir: &self.output,
                gen_src_dir: &self.gen_src,
                litex_soc_dir: with_soc.then_some(self.soc.as_path()),
            }
        }
    }

    fn config(mode: BuildMode) -> ResolvedConfig {
        resolve(&parse_raw_config("cpu = \"vexriscv\"\n").unwrap(), mode).unwrap()
    }

    #[test]
    fn mem_header_literal() {
        assert_eq!(mem_header(), "#define MAIN_RAM_BASE 0x40000000");
    }

    #[test]
    fn variables_escape_backslashes() {
        let out = render_variables(&[
            ("BUILD_DIR", Path::new(r"C:\build\sw")),
            ("SRC_DIR", Path::new("/src")),
        ]);
        assert_eq!(out, "BUILD_DIR=C:\\\\build\\\\sw\nSRC_DIR=/src\n");
    }

    #[test]
    fn bootstrap_builds_init_software() {
        let d = dirs();
        let make = FakeMake {
            produce_image: true,
            ..Default::default()
        };
        let sources = provide_init(
            BuildMode::BootstrapInit,
            &config(BuildMode::BootstrapInit),
            &d.ctx(true),
            &make,
        )
        .unwrap();

        assert_eq!(
            sources.init_image,
            d.build.join("software/obj/sdram_init.hex")
        );
        assert_eq!(sources.wrapper, d.gen_src.join("wrapper-mw-init.vhdl"));
        assert!(sources.cpu_file.is_none());

        let gen_inc = d.build.join("software/include/generated");
        assert_eq!(
            fs::read_to_string(gen_inc.join("mem.h")).unwrap(),
            "#define MAIN_RAM_BASE 0x40000000"
        );
        let vars = fs::read_to_string(gen_inc.join("variables.mak")).unwrap();
        let keys: Vec<_> = vars
            .lines()
            .map(|l| l.split('=').next().unwrap())
            .collect();
        assert_eq!(
            keys,
            ["BUILD_DIR", "SRC_DIR", "GENINC_DIR", "LXSRC_DIR", "LXINC_DIR"]
        );
        assert!(vars.contains(&format!(
            "LXSRC_DIR={}",
            d.soc.join("software/bios").display()
        )));

        let calls = make.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, d.build);
        assert_eq!(calls[0].1, gen_inc);
        assert_eq!(calls[0].2, d.gen_src.join("sdram_init/Makefile"));
        assert!(!d.output.join(INIT_CPU_FILE).exists());
    }

    #[test]
    fn bootstrap_missing_image_fails() {
        let d = dirs();
        let make = FakeMake::default();
        let err = provide_init(
            BuildMode::BootstrapInit,
            &config(BuildMode::BootstrapInit),
            &d.ctx(true),
            &make,
        )
        .unwrap_err();
        assert!(matches!(err, BuildError::MissingArtifact { .. }));
    }

    #[test]
    fn bootstrap_requires_litex_soc() {
        let d = dirs();
        let make = FakeMake::default();
        let err = provide_init(
            BuildMode::BootstrapInit,
            &config(BuildMode::BootstrapInit),
            &d.ctx(false),
            &make,
        )
        .unwrap_err();
        assert!(matches!(err, BuildError::MissingLitexSoc));
        assert!(make.calls.borrow().is_empty());
    }

    #[test]
    fn self_init_records_cpu_without_make() {
        let d = dirs();
        let make = FakeMake::default();
        let sources = provide_init(
            BuildMode::SelfInit,
            &config(BuildMode::SelfInit),
            &d.ctx(false),
            &make,
        )
        .unwrap();

        assert!(make.calls.borrow().is_empty());
        assert_eq!(sources.init_image, d.gateware.join("mem.init"));
        assert_eq!(sources.wrapper, d.gen_src.join("wrapper-self-init.vhdl"));
        let cpu_file = sources.cpu_file.unwrap();
        assert_eq!(cpu_file, d.output.join("init-cpu.txt"));
        assert_eq!(fs::read_to_string(cpu_file).unwrap(), "vexriscv");
    }

    #[test]
    fn self_init_without_cpu_fails() {
        let d = dirs();
        let config = resolve(
            &parse_raw_config("cpu = \"None\"\n").unwrap(),
            BuildMode::SelfInit,
        )
        .unwrap();
        let err = provide_init(BuildMode::SelfInit, &config, &d.ctx(false), &FakeMake::default())
            .unwrap_err();
        assert!(matches!(err, BuildError::NoInitCpu));
    }
}
