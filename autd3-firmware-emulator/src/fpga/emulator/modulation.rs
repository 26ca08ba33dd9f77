use autd3_firmware::{bram::addr, params::MOD_BUF_SEGMENT_SIZE};

use super::FPGAEmulator;

impl FPGAEmulator {
    #[must_use]
    pub fn modulation_freq_division(&self) -> u32 {
        self.mem.read_u32(addr::MOD_FREQ_DIV_0)
    }

    /// The number of samples of the modulation.
    #[must_use]
    pub fn modulation_cycle(&self) -> usize {
        self.mem.controller_bram()[addr::MOD_CYCLE as usize] as usize + 1
    }

    #[must_use]
    pub fn mod_addr_offset(&self) -> u16 {
        self.mem.controller_bram()[addr::MOD_ADDR_OFFSET as usize]
    }

    /// The `idx`-th sample, counted over every page of the modulation table.
    #[must_use]
    pub fn modulation_at(&self, idx: usize) -> u8 {
        let segment = MOD_BUF_SEGMENT_SIZE as usize;
        let word = (idx / segment) * (segment >> 1) + ((idx % segment) >> 1);
        let m = self.mem.modulation_bram()[word];
        if idx % 2 == 0 {
            m as u8
        } else {
            (m >> 8) as u8
        }
    }

    #[must_use]
    pub fn modulation(&self) -> Vec<u8> {
        (0..self.modulation_cycle())
            .map(|i| self.modulation_at(i))
            .collect()
    }
}
