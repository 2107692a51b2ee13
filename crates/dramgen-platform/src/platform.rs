//! Platform descriptors and the PHY classification table.

use std::fmt;

use dramgen_config::{PhyDescriptor, PhyFamily};
use serde::Serialize;

use crate::error::{PlatformError, Result};

/// Device used for every Lattice ECP5 build.
pub const ECP5_DEVICE: &str = "LFE5UM5G-45F-8BG381C";

/// FPGA vendor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Vendor {
    Lattice,
    Xilinx,
}

/// HDL build toolchain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Toolchain {
    /// Yosys + nextpnr + Project Trellis.
    Trellis,
    Vivado,
}

impl fmt::Display for Toolchain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Toolchain::Trellis => write!(f, "trellis"),
            Toolchain::Vivado => write!(f, "vivado"),
        }
    }
}

/// Toolchain and target device for a core build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformDescriptor {
    /// Device part name; empty when the toolchain does not need one.
    pub device: String,
    /// Platform I/O names. The generated core exposes its own ports, so this is empty.
    pub io: Vec<String>,
    pub toolchain: Toolchain,
    pub vendor: Vendor,
}

/// The device families a core can be built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceFamily {
    LatticeEcp5,
    Xilinx7Series,
}

impl DeviceFamily {
    /// Classify a PHY family. `None` means unsupported.
    pub fn of(family: PhyFamily) -> Option<Self> {
        match family {
            PhyFamily::Ecp5 => Some(DeviceFamily::LatticeEcp5),
            PhyFamily::Artix7 | PhyFamily::Kintex7 | PhyFamily::Virtex7 => {
                Some(DeviceFamily::Xilinx7Series)
            }
            PhyFamily::UltraScale | PhyFamily::UltraScalePlus | PhyFamily::Generic => None,
        }
    }

    /// The platform descriptor every PHY of this family builds with.
    pub fn platform(self) -> PlatformDescriptor {
        match self {
            DeviceFamily::LatticeEcp5 => PlatformDescriptor {
                device: ECP5_DEVICE.into(),
                io: Vec::new(),
                toolchain: Toolchain::Trellis,
                vendor: Vendor::Lattice,
            },
            DeviceFamily::Xilinx7Series => PlatformDescriptor {
                device: String::new(),
                io: Vec::new(),
                toolchain: Toolchain::Vivado,
                vendor: Vendor::Xilinx,
            },
        }
    }
}

/// Select the build platform for a resolved PHY.
pub fn select_platform(phy: &PhyDescriptor) -> Result<PlatformDescriptor> {
    DeviceFamily::of(phy.family)
        .map(DeviceFamily::platform)
        .ok_or_else(|| PlatformError::UnsupportedPhy {
            phy: phy.name.to_string(),
        })
}
