use autd3_firmware::params::{POINT_STM_BUF_SEGMENT_SIZE, POINT_STM_POINT_WORDS};

use super::super::FPGAEmulator;

const POINT_STRIDE_WIDTH: u32 = 3;

impl FPGAEmulator {
    /// Returns the packed words of the `idx`-th point.
    #[must_use]
    pub fn point_stm_at(&self, idx: usize) -> [u16; POINT_STM_POINT_WORDS] {
        let base = Self::stm_index(
            idx,
            POINT_STM_BUF_SEGMENT_SIZE.trailing_zeros(),
            POINT_STRIDE_WIDTH,
        );
        let mut point = [0; POINT_STM_POINT_WORDS];
        point.copy_from_slice(&self.mem.stm_bram()[base..base + POINT_STM_POINT_WORDS]);
        point
    }

    #[must_use]
    pub fn point_stm(&self) -> Vec<[u16; POINT_STM_POINT_WORDS]> {
        (0..self.stm_cycle()).map(|i| self.point_stm_at(i)).collect()
    }
}
