use crate::{
    bram::{addr, Bram, BramSelect, Channel},
    engine::ApplyEngine,
    frame::{CPUControlFlags, GainDataMode},
    params::{
        GAIN_STM_BUF_SEGMENT_SIZE, GAIN_STM_BUF_SEGMENT_SIZE_WIDTH, GAIN_STM_PATTERN_STRIDE_WIDTH,
    },
};

const LEGACY_FULL_DUTY: u16 = 0xFF00;
const PHASE_HALF_SHIFTS: [u32; 4] = [0, 4, 8, 12];

impl ApplyEngine {
    pub(crate) fn begin_gain_stm<B: Bram>(
        &mut self,
        bram: &mut B,
        freq_div: u32,
        mode: GainDataMode,
    ) {
        self.state.stm_cycle.begin(bram);
        bram.write_u32(BramSelect::Controller, addr::STM_FREQ_DIV_0, freq_div);
        if let GainDataMode::Unknown(v) = mode {
            tracing::warn!(
                "unknown gain data mode ({:#06X}), treated as {}",
                v,
                GainDataMode::PhaseDutyFull
            );
        }
        self.state.gain_data_mode = mode;
    }

    pub(crate) fn write_gain_stm<B: Bram>(
        &mut self,
        bram: &mut B,
        cpu_flag: CPUControlFlags,
        legacy: bool,
        is_duty: bool,
        data: &[u16],
    ) {
        match self.state.gain_data_mode {
            GainDataMode::PhaseDutyFull | GainDataMode::Unknown(_) => {
                let channel = if !legacy && is_duty {
                    Channel::Duty
                } else {
                    Channel::Phase
                };
                self.write_gain_pass(bram, channel, data, |d| d);
                // in raw encoding a pattern is a phase frame followed by a duty frame
                if legacy || is_duty {
                    self.state.stm_cycle.advance(bram, GAIN_STM_BUF_SEGMENT_SIZE_WIDTH);
                }
            }
            GainDataMode::PhaseFull if legacy => {
                self.write_gain_pass(bram, Channel::Phase, data, |d| {
                    LEGACY_FULL_DUTY | (d & 0x00FF)
                });
                self.state.stm_cycle.advance(bram, GAIN_STM_BUF_SEGMENT_SIZE_WIDTH);
                self.write_gain_pass(bram, Channel::Phase, data, |d| {
                    LEGACY_FULL_DUTY | ((d >> 8) & 0x00FF)
                });
                self.state.stm_cycle.advance(bram, GAIN_STM_BUF_SEGMENT_SIZE_WIDTH);
            }
            // a duty frame carries nothing in this mode
            GainDataMode::PhaseFull if is_duty => {}
            GainDataMode::PhaseFull => {
                let base = self.gain_pattern_base();
                data.iter().enumerate().for_each(|(i, &d)| {
                    let duty =
                        bram.read(BramSelect::Controller, addr::CYCLE_BASE + i as u16) >> 1;
                    bram.write_slot(BramSelect::Stm, base, i, Channel::Phase, d);
                    bram.write_slot(BramSelect::Stm, base, i, Channel::Duty, duty);
                });
                self.state.stm_cycle.advance(bram, GAIN_STM_BUF_SEGMENT_SIZE_WIDTH);
            }
            GainDataMode::PhaseHalf if !legacy => {}
            GainDataMode::PhaseHalf => {
                PHASE_HALF_SHIFTS.iter().for_each(|&shift| {
                    self.write_gain_pass(bram, Channel::Phase, data, |d| {
                        let phase = (d >> shift) & 0x000F;
                        LEGACY_FULL_DUTY | (phase << 4) | phase
                    });
                    self.state.stm_cycle.advance(bram, GAIN_STM_BUF_SEGMENT_SIZE_WIDTH);
                });
            }
        }

        if cpu_flag.contains(CPUControlFlags::STM_END) {
            self.state.stm_cycle.finish(bram);
        }
    }

    fn gain_pattern_base(&self) -> u16 {
        ((self.state.stm_cycle.cycle() & (GAIN_STM_BUF_SEGMENT_SIZE - 1))
            << GAIN_STM_PATTERN_STRIDE_WIDTH) as u16
    }

    fn write_gain_pass<B: Bram>(
        &self,
        bram: &mut B,
        channel: Channel,
        data: &[u16],
        f: impl Fn(u16) -> u16,
    ) {
        let base = self.gain_pattern_base();
        data.iter()
            .enumerate()
            .for_each(|(i, &d)| bram.write_slot(BramSelect::Stm, base, i, channel, f(d)));
    }
}
