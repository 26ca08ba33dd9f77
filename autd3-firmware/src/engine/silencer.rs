use crate::{
    bram::{addr, Bram, BramSelect},
    frame::{Header, HeaderPayload},
};

use super::ApplyEngine;

impl ApplyEngine {
    pub(crate) fn config_silencer<B: Bram>(bram: &mut B, header: &Header) {
        if let HeaderPayload::Silencer { cycle, step } = header.payload() {
            bram.write(BramSelect::Controller, addr::SILENT_STEP, step);
            bram.write(BramSelect::Controller, addr::SILENT_CYCLE, cycle);
        }
    }
}
