//! `dramgen registry`: list known SDRAM modules and PHYs.

use anyhow::Result;
use dramgen_config::{modules, phys, ModuleDescriptor, PhyDescriptor};
use dramgen_platform::select_platform;

/// Platform column for a PHY: the toolchain it builds with, or why it can't.
fn support(phy: &PhyDescriptor) -> String {
    match select_platform(phy) {
        Ok(platform) if platform.device.is_empty() => platform.toolchain.to_string(),
        Ok(platform) => format!("{} ({})", platform.toolchain, platform.device),
        Err(_) => "unsupported".to_string(),
    }
}

/// One listing line for a module, including its addressable locations.
fn module_line(m: &ModuleDescriptor) -> String {
    format!(
        "  {:<14} {:<6} {} banks x {} rows x {} cols ({} locations)  rate {}",
        m.name,
        format!("{:?}", m.memtype).to_uppercase(),
        m.nbanks,
        m.nrows,
        m.ncols,
        m.locations(),
        m.rate
    )
}

/// Print both registries.
pub fn run() -> Result<()> {
    println!("=== SDRAM Modules ===");
    for m in modules() {
        println!("{}", module_line(m));
    }
    println!();
    println!("=== SDRAM PHYs ===");
    for phy in phys() {
        println!(
            "  {:<18} {:<6} {}",
            phy.name,
            format!("{:?}", phy.memtype).to_uppercase(),
            support(phy)
        );
    }
    Ok(())
}
