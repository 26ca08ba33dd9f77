use crate::bram::{addr, Bram, BramSelect};

use super::ApplyEngine;

impl ApplyEngine {
    pub(crate) fn set_mod_delay<B: Bram>(bram: &mut B, delays: &[u16]) {
        bram.cpy(BramSelect::Controller, addr::MOD_DELAY_BASE, delays);
    }
}
