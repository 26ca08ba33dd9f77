use autd3_firmware::params::TRANS_NUM;

use super::FPGAEmulator;

impl FPGAEmulator {
    /// Returns the (phase, duty) words of the `idx`-th transducer.
    #[must_use]
    pub fn normal_at(&self, idx: usize) -> (u16, u16) {
        let bram = self.mem.normal_bram();
        (bram[idx << 1], bram[(idx << 1) + 1])
    }

    #[must_use]
    pub fn drives(&self) -> Vec<(u16, u16)> {
        (0..TRANS_NUM).map(|i| self.normal_at(i)).collect()
    }
}
