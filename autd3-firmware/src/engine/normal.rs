use crate::bram::{Bram, BramSelect, Channel};

use super::ApplyEngine;

impl ApplyEngine {
    pub(crate) fn write_normal_op<B: Bram>(
        bram: &mut B,
        legacy: bool,
        is_duty: bool,
        data: &[u16],
    ) {
        let channel = if !legacy && is_duty {
            Channel::Duty
        } else {
            Channel::Phase
        };
        data.iter()
            .enumerate()
            .for_each(|(i, &d)| bram.write_slot(BramSelect::Normal, 0, i, channel, d));
    }
}
