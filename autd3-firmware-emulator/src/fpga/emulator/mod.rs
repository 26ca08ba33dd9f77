mod controller;
mod memory;
mod modulation;
mod normal;
mod silencer;
mod stm;

use autd3_firmware::{
    bram::{addr, BramSelect},
    Bram,
};

use memory::Memory;

use super::FPGA_VERSION;

/// Emulated FPGA memories, paged the way the hardware decodes the segment offset registers.
pub struct FPGAEmulator {
    mem: Memory,
}

impl FPGAEmulator {
    /// Creates a new emulator with zeroed memories.
    #[must_use]
    pub fn new() -> Self {
        Self {
            mem: Memory::new(FPGA_VERSION),
        }
    }

    /// Sets the byte the FPGA reports in its info register.
    pub fn set_fpga_info(&mut self, info: u8) {
        self.mem.controller_bram_mut()[addr::FPGA_INFO as usize] = info as u16;
    }

    /// Sets the version register. The low byte is the version, the high byte the function bits.
    pub fn set_version(&mut self, version: u16) {
        self.mem.controller_bram_mut()[addr::VERSION_NUM as usize] = version;
    }
}

impl Default for FPGAEmulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Bram for FPGAEmulator {
    fn read(&self, select: BramSelect, addr: u16) -> u16 {
        self.mem.read(select, addr)
    }

    fn write(&mut self, select: BramSelect, addr: u16, data: u16) {
        self.mem.write(select, addr, data)
    }
}
