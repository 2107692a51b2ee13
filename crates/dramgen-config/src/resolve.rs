//! Resolution of a raw config into typed generator parameters.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{ConfigError, Result};
use crate::mode::BuildMode;
use crate::registry::{lookup_module, lookup_phy, ModuleDescriptor, PhyDescriptor};
use crate::value::{ConfigValue, RawConfig};
use crate::{BOOTSTRAP_CSR_ALIGN, CPU_KEY, CSR_ALIGN_KEY, FREQ_MARKER, MODULE_KEY, PHY_KEY};

/// A fully typed configuration, ready to parameterize the core generator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResolvedConfig {
    entries: BTreeMap<String, ConfigValue>,
}

impl ResolvedConfig {
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.entries.get(key)
    }

    /// Iterate entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ConfigValue)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The resolved PHY descriptor.
    pub fn sdram_phy(&self) -> Result<&'static PhyDescriptor> {
        match self.entries.get(PHY_KEY) {
            Some(ConfigValue::Phy(phy)) => Ok(*phy),
            _ => Err(ConfigError::MissingKey {
                key: PHY_KEY.into(),
            }),
        }
    }

    /// The resolved module descriptor.
    pub fn sdram_module(&self) -> Result<&'static ModuleDescriptor> {
        match self.entries.get(MODULE_KEY) {
            Some(ConfigValue::Module(module)) => Ok(*module),
            _ => Err(ConfigError::MissingKey {
                key: MODULE_KEY.into(),
            }),
        }
    }

    /// The CPU that initializes memory, or `None` when absent.
    ///
    /// A missing `cpu` key is an error; an explicit `None` is not.
    pub fn cpu(&self) -> Result<Option<&str>> {
        match self.entries.get(CPU_KEY) {
            None => Err(ConfigError::MissingKey {
                key: CPU_KEY.into(),
            }),
            Some(ConfigValue::Absent) => Ok(None),
            Some(ConfigValue::Str(name)) => Ok(Some(name.as_str())),
            Some(other) => Err(ConfigError::InvalidSelector {
                key: CPU_KEY.into(),
                value: other.to_string(),
            }),
        }
    }
}

/// Resolve a raw config for the given build mode.
///
/// Each value goes through literal coercion, then frequency coercion for
/// `*clk_freq*` keys, then descriptor lookup for the two selector keys.
/// Bootstrap-init mode finally overrides `cpu` and `csr_align`.
pub fn resolve(raw: &RawConfig, mode: BuildMode) -> Result<ResolvedConfig> {
    let mut entries = BTreeMap::new();

    for (key, value) in raw.iter() {
        let mut value = coerce_literal(value.clone());
        if key.contains(FREQ_MARKER) {
            value = coerce_frequency(key, value)?;
        }
        value = match key.as_str() {
            MODULE_KEY => {
                let name = selector_name(key, &value)?;
                let module = lookup_module(name).ok_or_else(|| unsupported(key, name))?;
                ConfigValue::Module(module)
            }
            PHY_KEY => {
                let name = selector_name(key, &value)?;
                let phy = lookup_phy(name).ok_or_else(|| unsupported(key, name))?;
                ConfigValue::Phy(phy)
            }
            _ => value,
        };
        entries.insert(key.clone(), value);
    }

    if mode == BuildMode::BootstrapInit {
        entries.insert(CPU_KEY.into(), ConfigValue::Absent);
        entries.insert(CSR_ALIGN_KEY.into(), ConfigValue::Int(BOOTSTRAP_CSR_ALIGN));
    }

    log::debug!("resolved {} config keys ({mode})", entries.len());
    Ok(ResolvedConfig { entries })
}

/// Replace the whole-value literals `True`, `False` and `None`.
fn coerce_literal(value: ConfigValue) -> ConfigValue {
    match value.as_str() {
        Some("True") => ConfigValue::Bool(true),
        Some("False") => ConfigValue::Bool(false),
        Some("None") => ConfigValue::Absent,
        _ => value,
    }
}

fn coerce_frequency(key: &str, value: ConfigValue) -> Result<ConfigValue> {
    let hz = match &value {
        ConfigValue::Float(f) => Some(*f),
        ConfigValue::Int(i) => Some(*i as f64),
        ConfigValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        ConfigValue::Str(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    hz.filter(|hz| hz.is_finite())
        .map(ConfigValue::Float)
        .ok_or_else(|| ConfigError::InvalidFrequency {
            key: key.to_string(),
            value: value.to_string(),
        })
}

fn selector_name<'a>(key: &str, value: &'a ConfigValue) -> Result<&'a str> {
    value.as_str().ok_or_else(|| ConfigError::InvalidSelector {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn unsupported(key: &str, name: &str) -> ConfigError {
    ConfigError::UnsupportedSelector {
        key: key.to_string(),
        name: name.to_string(),
    }
}
