use autd3_firmware::{
    ethercat::DcSysTime,
    frame::{Ack, GainDataMode, TxMessage},
    params::MAILBOX_CAPACITY,
    ApplyEngine, Backpressure, Dispatcher, FirmwareError, FirmwareOption, Mailbox,
};

use crate::fpga::emulator::FPGAEmulator;

/// A single device: the firmware core driving an [`FPGAEmulator`].
///
/// [`CPUEmulator::send`] plays the role of the EtherCAT arrival interrupt and
/// [`CPUEmulator::update`] the role of the periodic timer. Both run on the caller's thread, so the
/// mailbox never drains while a frame is being sent; the default backpressure is therefore
/// [`Backpressure::Bounded`] with no retries.
pub struct CPUEmulator {
    fpga: FPGAEmulator,
    mailbox: Box<Mailbox<TxMessage, MAILBOX_CAPACITY>>,
    dispatcher: Dispatcher,
    engine: ApplyEngine,
    ack: Ack,
    dc_sys_time: DcSysTime,
}

impl CPUEmulator {
    #[must_use]
    pub fn new() -> Self {
        Self::with_option(FirmwareOption {
            backpressure: Backpressure::Bounded(0),
            ..FirmwareOption::default()
        })
    }

    #[must_use]
    pub fn with_option(option: FirmwareOption) -> Self {
        let mut fpga = FPGAEmulator::new();
        let mut engine = ApplyEngine::new(option);
        engine.init(&mut fpga);
        Self {
            fpga,
            mailbox: Box::new(Mailbox::new()),
            dispatcher: Dispatcher::new(option),
            engine,
            ack: Ack::new(),
            dc_sys_time: DcSysTime::now(),
        }
    }

    #[must_use]
    pub const fn ack(&self) -> Ack {
        self.ack
    }

    #[must_use]
    pub const fn last_msg_id(&self) -> u8 {
        self.dispatcher.last_msg_id()
    }

    #[must_use]
    pub const fn reads_fpga_info(&self) -> bool {
        self.dispatcher.reads_fpga_info()
    }

    #[must_use]
    pub const fn dc_sys_time(&self) -> DcSysTime {
        self.dc_sys_time
    }

    #[must_use]
    pub const fn fpga(&self) -> &FPGAEmulator {
        &self.fpga
    }

    #[must_use]
    pub fn fpga_mut(&mut self) -> &mut FPGAEmulator {
        &mut self.fpga
    }

    #[must_use]
    pub const fn mod_cycle(&self) -> u32 {
        self.engine.mod_cycle()
    }

    #[must_use]
    pub const fn stm_cycle(&self) -> u32 {
        self.engine.stm_cycle()
    }

    #[must_use]
    pub const fn gain_data_mode(&self) -> GainDataMode {
        self.engine.gain_data_mode()
    }

    /// The number of frames waiting for the periodic tick.
    #[must_use]
    pub fn mailbox_len(&self) -> usize {
        self.mailbox.len()
    }

    /// Delivers one frame to the arrival side.
    ///
    /// The current [`CPUEmulator::dc_sys_time`] is used as the start of the SYNC0 pulse train.
    pub fn send(&mut self, tx: &TxMessage) -> Result<Ack, FirmwareError> {
        let (mut producer, _) = self.mailbox.split();
        self.ack = self
            .dispatcher
            .recv(&mut self.fpga, &mut producer, tx, self.dc_sys_time)?;
        Ok(self.ack)
    }

    /// Delivers one frame given as a raw transport buffer.
    pub fn send_bytes(&mut self, bytes: &[u8]) -> Result<Ack, FirmwareError> {
        let tx = TxMessage::from_bytes(bytes)?;
        self.send(&tx)
    }

    /// Runs one periodic tick at the current time. Returns `true` if anything was applied.
    pub fn update(&mut self) -> bool {
        self.update_with_sys_time(DcSysTime::now())
    }

    /// Runs one periodic tick with the given DC system time.
    pub fn update_with_sys_time(&mut self, sys_time: DcSysTime) -> bool {
        self.dc_sys_time = sys_time;
        let (_, mut consumer) = self.mailbox.split();
        let applied = self.engine.update(&mut self.fpga, &mut consumer);
        self.ack = self.dispatcher.update_ack(&self.fpga);
        applied
    }

    /// Ticks until the mailbox is drained and returns the number of ticks that applied something.
    pub fn flush(&mut self) -> usize {
        let mut n = 0;
        while self.update_with_sys_time(self.dc_sys_time) {
            n += 1;
        }
        tracing::trace!("flushed {} entries", n);
        n
    }
}

impl Default for CPUEmulator {
    fn default() -> Self {
        Self::new()
    }
}
