//! Closed registries of SDRAM module and PHY descriptors.
//!
//! Selector values in a target config are resolved by exact name against
//! these tables. Names that are not listed fail resolution.

use serde::Serialize;

/// DRAM generation of a module or PHY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MemoryType {
    Sdr,
    Ddr,
    Lpddr,
    Ddr2,
    Ddr3,
    Ddr4,
}

/// Geometry of an SDRAM module timing profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleDescriptor {
    /// Part name (e.g., "MT41K128M16").
    pub name: &'static str,
    pub memtype: MemoryType,
    /// Number of banks.
    pub nbanks: u32,
    /// Number of rows per bank.
    pub nrows: u32,
    /// Number of columns per row.
    pub ncols: u32,
    /// Controller-to-DRAM clock ratio (e.g., "1:4").
    pub rate: &'static str,
}

impl ModuleDescriptor {
    /// Addressable locations (banks x rows x columns).
    pub fn locations(&self) -> u64 {
        u64::from(self.nbanks) * u64::from(self.nrows) * u64::from(self.ncols)
    }
}

/// FPGA family a PHY is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PhyFamily {
    /// Lattice ECP5.
    Ecp5,
    /// Xilinx Artix-7.
    Artix7,
    /// Xilinx Kintex-7.
    Kintex7,
    /// Xilinx Virtex-7.
    Virtex7,
    /// Xilinx UltraScale.
    UltraScale,
    /// Xilinx UltraScale+.
    UltraScalePlus,
    /// Vendor-independent PHY.
    Generic,
}

/// A PHY variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhyDescriptor {
    /// PHY name (e.g., "A7DDRPHY").
    pub name: &'static str,
    pub family: PhyFamily,
    pub memtype: MemoryType,
}

const fn module(
    name: &'static str,
    memtype: MemoryType,
    nbanks: u32,
    nrows: u32,
    ncols: u32,
    rate: &'static str,
) -> ModuleDescriptor {
    ModuleDescriptor {
        name,
        memtype,
        nbanks,
        nrows,
        ncols,
        rate,
    }
}

static MODULES: [ModuleDescriptor; 14] = [
    module("MT48LC4M16", MemoryType::Sdr, 4, 4096, 256, "1:1"),
    module("MT48LC16M16", MemoryType::Sdr, 4, 8192, 512, "1:1"),
    module("AS4C16M16", MemoryType::Sdr, 4, 8192, 512, "1:1"),
    module("IS42S16160", MemoryType::Sdr, 4, 8192, 512, "1:1"),
    module("MT46V32M16", MemoryType::Ddr, 4, 8192, 1024, "1:2"),
    module("MT46H32M16", MemoryType::Lpddr, 4, 8192, 1024, "1:2"),
    module("MT47H64M16", MemoryType::Ddr2, 8, 8192, 1024, "1:2"),
    module("MT47H128M8", MemoryType::Ddr2, 8, 16384, 1024, "1:2"),
    module("MT41J128M16", MemoryType::Ddr3, 8, 16384, 1024, "1:4"),
    module("MT41K64M16", MemoryType::Ddr3, 8, 8192, 1024, "1:4"),
    module("MT41K128M16", MemoryType::Ddr3, 8, 16384, 1024, "1:4"),
    module("MT41K256M16", MemoryType::Ddr3, 8, 32768, 1024, "1:4"),
    module("MT41K512M16", MemoryType::Ddr3, 8, 65536, 1024, "1:4"),
    module("MT40A512M16", MemoryType::Ddr4, 8, 65536, 1024, "1:4"),
];

static PHYS: [PhyDescriptor; 8] = [
    PhyDescriptor {
        name: "GENSDRPHY",
        family: PhyFamily::Generic,
        memtype: MemoryType::Sdr,
    },
    PhyDescriptor {
        name: "HalfRateGENSDRPHY",
        family: PhyFamily::Generic,
        memtype: MemoryType::Sdr,
    },
    PhyDescriptor {
        name: "ECP5DDRPHY",
        family: PhyFamily::Ecp5,
        memtype: MemoryType::Ddr3,
    },
    PhyDescriptor {
        name: "A7DDRPHY",
        family: PhyFamily::Artix7,
        memtype: MemoryType::Ddr3,
    },
    PhyDescriptor {
        name: "K7DDRPHY",
        family: PhyFamily::Kintex7,
        memtype: MemoryType::Ddr3,
    },
    PhyDescriptor {
        name: "V7DDRPHY",
        family: PhyFamily::Virtex7,
        memtype: MemoryType::Ddr3,
    },
    PhyDescriptor {
        name: "USDDRPHY",
        family: PhyFamily::UltraScale,
        memtype: MemoryType::Ddr4,
    },
    PhyDescriptor {
        name: "USPDDRPHY",
        family: PhyFamily::UltraScalePlus,
        memtype: MemoryType::Ddr4,
    },
];

/// All known module descriptors.
pub fn modules() -> &'static [ModuleDescriptor] {
    &MODULES
}

/// All known PHY descriptors.
pub fn phys() -> &'static [PhyDescriptor] {
    &PHYS
}

/// Look up a module descriptor by exact name.
pub fn lookup_module(name: &str) -> Option<&'static ModuleDescriptor> {
    MODULES.iter().find(|m| m.name == name)
}

/// Look up a PHY descriptor by exact name.
pub fn lookup_phy(name: &str) -> Option<&'static PhyDescriptor> {
    PHYS.iter().find(|p| p.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_modules_present() {
        let arty = lookup_module("MT41K128M16").unwrap();
        assert_eq!(arty.memtype, MemoryType::Ddr3);
        assert_eq!(arty.locations(), 8 * 16384 * 1024);
        assert!(lookup_module("MT41K256M16").is_some());
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert!(lookup_phy("A7DDRPHY").is_some());
        assert!(lookup_phy("a7ddrphy").is_none());
        assert!(lookup_module("mt41k128m16").is_none());
    }

    #[test]
    fn names_are_unique() {
        for (i, a) in modules().iter().enumerate() {
            assert!(modules()[i + 1..].iter().all(|b| b.name != a.name));
        }
        for (i, a) in phys().iter().enumerate() {
            assert!(phys()[i + 1..].iter().all(|b| b.name != a.name));
        }
    }

    #[test]
    fn memtype_serializes_uppercase() {
        let json = serde_json::to_string(&MemoryType::Ddr3).unwrap();
        assert_eq!(json, "\"DDR3\"");
    }
}
