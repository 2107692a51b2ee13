//! Loading per-target configuration files.

use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::value::RawConfig;

/// Path of a target's config file inside the generator source directory.
pub fn target_config_path(gen_src_dir: &Path, target: &str) -> PathBuf {
    gen_src_dir.join(format!("{target}.toml"))
}

/// Load a raw config from a TOML file.
pub fn load_raw_config(path: &Path) -> Result<RawConfig> {
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    log::debug!("loaded config {}", path.display());
    parse_raw_config(&content)
}

/// Parse a raw config from a TOML string.
pub fn parse_raw_config(toml_str: &str) -> Result<RawConfig> {
    let table: toml::Table = toml::from_str(toml_str)?;
    Ok(RawConfig::from(table))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ConfigValue;

    #[test]
    fn config_path_uses_target_name() {
        let p = target_config_path(Path::new("/src/gen-src"), "nexys-video");
        assert_eq!(p, Path::new("/src/gen-src/nexys-video.toml"));
    }

    #[test]
    fn literals_are_loaded_verbatim() {
        let raw = parse_raw_config(
            r#"
cpu = "None"
with_bist = "False"
"#,
        )
        .unwrap();
        assert_eq!(raw.get("cpu"), Some(&ConfigValue::Str("None".into())));
        assert_eq!(raw.get("with_bist"), Some(&ConfigValue::Str("False".into())));
    }

    #[test]
    fn parse_invalid_returns_error() {
        assert!(matches!(
            parse_raw_config("this is not valid toml [[["),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn load_not_found() {
        let result = load_raw_config(Path::new("/nonexistent/arty.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound { .. })));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = target_config_path(dir.path(), "arty");
        std::fs::write(&path, "sdram_phy = \"A7DDRPHY\"\n").unwrap();
        let raw = load_raw_config(&path).unwrap();
        assert_eq!(raw.get("sdram_phy").and_then(|v| v.as_str()), Some("A7DDRPHY"));
    }
}
