use crate::{
    bram::{addr, Bram, BramSelect},
    frame::{CPUControlFlags, Header, HeaderPayload},
    params::MOD_BUF_SEGMENT_SIZE_WIDTH,
};

use super::ApplyEngine;

impl ApplyEngine {
    pub(crate) fn write_mod<B: Bram>(&mut self, bram: &mut B, header: &Header) {
        let data = match header.payload() {
            HeaderPayload::ModHead { freq_div, data } => {
                self.state.mod_cycle.begin(bram);
                bram.write_u32(BramSelect::Controller, addr::MOD_FREQ_DIV_0, freq_div);
                data
            }
            HeaderPayload::ModBody { data } => data,
            _ => return,
        };

        let size = header.size as usize;
        if size > data.len() {
            tracing::warn!(
                "modulation size ({}) exceeds the payload ({}), truncated",
                size,
                data.len()
            );
        }
        let size = size.min(data.len());

        // two samples per word, the first in the low byte
        self.state.mod_cycle.write(
            bram,
            MOD_BUF_SEGMENT_SIZE_WIDTH,
            size,
            |bram, offset, range| {
                let src = &data[range];
                src.chunks(2).enumerate().for_each(|(i, s)| {
                    bram.write(
                        BramSelect::Mod,
                        (offset >> 1) as u16 + i as u16,
                        u16::from_le_bytes([s[0], s.get(1).copied().unwrap_or(0)]),
                    )
                });
            },
        );

        if header.cpu_flag.contains(CPUControlFlags::MOD_END) {
            self.state.mod_cycle.finish(bram);
        }
    }
}
