mod clear;
mod counter;
mod mod_delay;
mod modulation;
mod normal;
mod silencer;
mod stm;

use counter::StreamCounter;

use crate::{
    bram::{addr, Bram, BramSelect},
    frame::{BodyPayload, CPUControlFlags, FPGAControlFlags, GainDataMode, TxMessage},
    mailbox::Consumer,
    option::FirmwareOption,
};

/// The state owned by the periodic side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ControllerState {
    pub(crate) mod_cycle: StreamCounter,
    pub(crate) stm_cycle: StreamCounter,
    pub(crate) gain_data_mode: GainDataMode,
}

/// The periodic side of the firmware.
///
/// Applies at most one frame per tick and owns the streaming counters.
#[derive(Debug)]
pub struct ApplyEngine {
    state: ControllerState,
    option: FirmwareOption,
}

impl ApplyEngine {
    /// Creates a new engine. Call [`ApplyEngine::init`] before the first tick.
    #[must_use]
    pub const fn new(option: FirmwareOption) -> Self {
        Self {
            state: ControllerState {
                mod_cycle: StreamCounter::new(addr::MOD_ADDR_OFFSET, addr::MOD_CYCLE),
                stm_cycle: StreamCounter::new(addr::STM_ADDR_OFFSET, addr::STM_CYCLE),
                gain_data_mode: GainDataMode::PhaseDutyFull,
            },
            option,
        }
    }

    /// Brings the device to the cleared state at power-on.
    pub fn init<B: Bram>(&mut self, bram: &mut B) {
        self.clear(bram);
    }

    /// The logical position of the modulation stream.
    #[must_use]
    pub const fn mod_cycle(&self) -> u32 {
        self.state.mod_cycle.cycle()
    }

    /// The logical position of the point- or gain-sequence stream.
    #[must_use]
    pub const fn stm_cycle(&self) -> u32 {
        self.state.stm_cycle.cycle()
    }

    /// The gain data mode of the current gain-sequence stream.
    #[must_use]
    pub const fn gain_data_mode(&self) -> GainDataMode {
        self.state.gain_data_mode
    }

    /// Runs one periodic tick.
    ///
    /// A pending clear request is carried out first. Then at most one frame is popped and
    /// applied. Returns `true` if a clear or a frame was processed.
    pub fn update<B: Bram, const N: usize>(
        &mut self,
        bram: &mut B,
        consumer: &mut Consumer<'_, TxMessage, N>,
    ) -> bool {
        let cleared = consumer.take_clear_request();
        if cleared {
            self.clear(bram);
        }
        match consumer.pop() {
            Some(msg) => {
                self.apply(bram, &msg);
                true
            }
            None => cleared,
        }
    }

    /// Applies one frame to the device.
    pub fn apply<B: Bram>(&mut self, bram: &mut B, msg: &TxMessage) {
        tracing::trace!("apply: {}", msg);

        let header = &msg.header;
        let fpga_flag = header.fpga_flag();
        if header.is_sync() {
            // a synchronize queued behind a clear; the cycle table and sync time are already set
            bram.write(
                BramSelect::Controller,
                addr::CTL_REG,
                (fpga_flag | FPGAControlFlags::SYNC).bits(),
            );
            return;
        }
        bram.write(BramSelect::Controller, addr::CTL_REG, fpga_flag.bits());

        if header.cpu_flag.contains(CPUControlFlags::MOD) {
            self.write_mod(bram, header);
        } else if header.cpu_flag.contains(CPUControlFlags::CONFIG_SILENCER) {
            Self::config_silencer(bram, header);
        }

        match msg.body.payload(header) {
            BodyPayload::None => {}
            BodyPayload::ModDelay { delays } => Self::set_mod_delay(bram, delays),
            BodyPayload::Normal {
                legacy,
                is_duty,
                data,
            } => Self::write_normal_op(bram, legacy, is_duty, data),
            BodyPayload::PointStmHead {
                size,
                freq_div,
                sound_speed,
                points,
            } => {
                self.begin_point_stm(bram, freq_div, sound_speed);
                self.write_point_stm(bram, header.cpu_flag, size, points);
            }
            BodyPayload::PointStmBody { size, points } => {
                self.write_point_stm(bram, header.cpu_flag, size, points)
            }
            BodyPayload::GainStmHead { freq_div, mode } => {
                self.begin_gain_stm(bram, freq_div, mode)
            }
            BodyPayload::GainStmBody {
                legacy,
                is_duty,
                data,
            } => self.write_gain_stm(bram, header.cpu_flag, legacy, is_duty, data),
        }
    }
}

impl Default for ApplyEngine {
    fn default() -> Self {
        Self::new(FirmwareOption::default())
    }
}
