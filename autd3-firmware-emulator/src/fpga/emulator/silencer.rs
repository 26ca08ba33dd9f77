use autd3_firmware::bram::addr;

use super::FPGAEmulator;

impl FPGAEmulator {
    #[must_use]
    pub fn silencer_step(&self) -> u16 {
        self.mem.controller_bram()[addr::SILENT_STEP as usize]
    }

    #[must_use]
    pub fn silencer_cycle(&self) -> u16 {
        self.mem.controller_bram()[addr::SILENT_CYCLE as usize]
    }
}
