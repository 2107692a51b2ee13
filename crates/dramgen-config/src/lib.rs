//! Per-target configuration for LiteDRAM core generation.
//!
//! A target's configuration is loaded verbatim from `<gen-src>/<target>.toml`
//! into a [`RawConfig`], then resolved into a [`ResolvedConfig`]:
//! - textual literals (`"True"`, `"False"`, `"None"`) become real booleans/absence,
//! - every `*clk_freq*` key becomes a float,
//! - `sdram_module` / `sdram_phy` names become registry descriptors,
//! - in bootstrap-init mode, `cpu` and `csr_align` are overridden.

pub mod error;
pub mod load;
pub mod mode;
pub mod registry;
pub mod resolve;
pub mod value;

pub use error::{ConfigError, Result};
pub use load::{load_raw_config, parse_raw_config, target_config_path};
pub use mode::BuildMode;
pub use registry::{
    lookup_module, lookup_phy, modules, phys, MemoryType, ModuleDescriptor, PhyDescriptor,
    PhyFamily,
};
pub use resolve::{resolve, ResolvedConfig};
pub use value::{ConfigValue, RawConfig};

/// Key selecting the SDRAM module timing profile.
pub const MODULE_KEY: &str = "sdram_module";
/// Key selecting the SDRAM PHY.
pub const PHY_KEY: &str = "sdram_phy";
/// Key selecting the CPU that runs memory initialization.
pub const CPU_KEY: &str = "cpu";
/// Key controlling CSR register alignment.
pub const CSR_ALIGN_KEY: &str = "csr_align";
/// Any key containing this substring is a clock frequency.
pub const FREQ_MARKER: &str = "clk_freq";
/// CSR alignment forced in bootstrap-init mode.
pub const BOOTSTRAP_CSR_ALIGN: i64 = 64;
