//! Build platform selection for LiteDRAM core generation.
//!
//! A resolved PHY descriptor determines the FPGA family the core is built
//! for, and therefore the toolchain and device handed to the generator:
//! - **Lattice ECP5:** Trellis toolchain, fixed LFE5UM5G device
//! - **Xilinx 7-series (Artix/Kintex/Virtex):** Vivado toolchain, no fixed device
//!
//! Every other PHY is rejected.

pub mod error;
pub mod platform;

pub use error::{PlatformError, Result};
pub use platform::{select_platform, DeviceFamily, PlatformDescriptor, Toolchain, Vendor};
