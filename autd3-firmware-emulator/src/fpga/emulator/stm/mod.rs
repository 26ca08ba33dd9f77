use autd3_firmware::bram::addr;

use super::FPGAEmulator;

mod gain;
mod point;

const PAGE_WIDTH: usize = 14;

impl FPGAEmulator {
    #[must_use]
    pub fn stm_freq_division(&self) -> u32 {
        self.mem.read_u32(addr::STM_FREQ_DIV_0)
    }

    /// The number of points or patterns of the sequence.
    #[must_use]
    pub fn stm_cycle(&self) -> usize {
        self.mem.controller_bram()[addr::STM_CYCLE as usize] as usize + 1
    }

    #[must_use]
    pub fn sound_speed(&self) -> u32 {
        self.mem.read_u32(addr::SOUND_SPEED_0)
    }

    #[must_use]
    pub fn stm_addr_offset(&self) -> u16 {
        self.mem.controller_bram()[addr::STM_ADDR_OFFSET as usize]
    }

    // `1 << width` units of `1 << stride` words per page
    fn stm_index(idx: usize, width: u32, stride: u32) -> usize {
        ((idx >> width) << PAGE_WIDTH) | ((idx & ((1 << width) - 1)) << stride)
    }
}
