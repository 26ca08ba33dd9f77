use crate::{
    bram::{addr, Bram, BramSelect},
    engine::ApplyEngine,
    frame::CPUControlFlags,
    params::{
        POINT_STM_BUF_SEGMENT_SIZE_WIDTH, POINT_STM_POINT_STRIDE_WIDTH, POINT_STM_POINT_WORDS,
    },
};

impl ApplyEngine {
    pub(crate) fn begin_point_stm<B: Bram>(
        &mut self,
        bram: &mut B,
        freq_div: u32,
        sound_speed: u32,
    ) {
        self.state.stm_cycle.begin(bram);
        bram.write_u32(BramSelect::Controller, addr::STM_FREQ_DIV_0, freq_div);
        bram.write_u32(BramSelect::Controller, addr::SOUND_SPEED_0, sound_speed);
    }

    pub(crate) fn write_point_stm<B: Bram>(
        &mut self,
        bram: &mut B,
        cpu_flag: CPUControlFlags,
        size: u16,
        points: &[u16],
    ) {
        let capacity = points.len() / POINT_STM_POINT_WORDS;
        let size = size as usize;
        if size > capacity {
            tracing::warn!(
                "point count ({}) exceeds the payload ({}), truncated",
                size,
                capacity
            );
        }

        self.state.stm_cycle.write(
            bram,
            POINT_STM_BUF_SEGMENT_SIZE_WIDTH,
            size.min(capacity),
            |bram, offset, range| {
                range.enumerate().for_each(|(i, p)| {
                    bram.cpy(
                        BramSelect::Stm,
                        ((offset as u16) + i as u16) << POINT_STM_POINT_STRIDE_WIDTH,
                        &points[p * POINT_STM_POINT_WORDS..(p + 1) * POINT_STM_POINT_WORDS],
                    )
                });
            },
        );

        if cpu_flag.contains(CPUControlFlags::STM_END) {
            self.state.stm_cycle.finish(bram);
        }
    }
}
