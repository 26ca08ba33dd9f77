use crate::{
    bram::{addr, Bram, BramSelect},
    frame::{FPGAControlFlags, GainDataMode},
    params::TRANS_NUM,
};

use super::ApplyEngine;

/// The modulation counter after clear: one zero sample, so the length register reads 1.
const MOD_CYCLE_AFTER_CLEAR: u32 = 2;

impl ApplyEngine {
    pub(crate) fn clear<B: Bram>(&mut self, bram: &mut B) {
        tracing::debug!("clear");

        bram.write(
            BramSelect::Controller,
            addr::CTL_REG,
            FPGAControlFlags::LEGACY_MODE.bits(),
        );

        bram.write(
            BramSelect::Controller,
            addr::SILENT_STEP,
            self.option.silencer_step,
        );
        bram.write(
            BramSelect::Controller,
            addr::SILENT_CYCLE,
            self.option.silencer_cycle,
        );

        self.state.stm_cycle.reset(0);
        bram.write(BramSelect::Controller, addr::STM_ADDR_OFFSET, 0);
        self.state.gain_data_mode = GainDataMode::default();

        self.state.mod_cycle.reset(MOD_CYCLE_AFTER_CLEAR);
        bram.write(BramSelect::Controller, addr::MOD_ADDR_OFFSET, 0);
        self.state.mod_cycle.finish(bram);
        bram.write_u32(
            BramSelect::Controller,
            addr::MOD_FREQ_DIV_0,
            self.option.mod_freq_div,
        );
        bram.write(BramSelect::Mod, 0, 0x0000);

        bram.set(BramSelect::Normal, 0, 0x0000, TRANS_NUM << 1);
    }
}
