pub mod emulator;

/// The version word reported by the emulated FPGA.
pub const FPGA_VERSION: u16 = 0x0082;
