use autd3_firmware::params::{GAIN_STM_BUF_SEGMENT_SIZE, TRANS_NUM};

use super::super::FPGAEmulator;

const PATTERN_STRIDE_WIDTH: u32 = 9;

impl FPGAEmulator {
    /// Returns the (phase, duty) words of every transducer in the `idx`-th pattern.
    #[must_use]
    pub fn gain_stm_at(&self, idx: usize) -> Vec<(u16, u16)> {
        let base = Self::stm_index(
            idx,
            GAIN_STM_BUF_SEGMENT_SIZE.trailing_zeros(),
            PATTERN_STRIDE_WIDTH,
        );
        let bram = self.mem.stm_bram();
        (0..TRANS_NUM)
            .map(|i| (bram[base + (i << 1)], bram[base + (i << 1) + 1]))
            .collect()
    }
}
