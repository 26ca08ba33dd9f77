use crate::{
    bram::{addr, Bram, BramSelect},
    error::FirmwareError,
    ethercat::DcSysTime,
    frame::{Ack, Command, FPGAControlFlags, TxMessage},
    mailbox::Producer,
    option::{Backpressure, FirmwareOption},
    params::MSG_CLEAR,
};

/// The arrival side of the firmware.
///
/// Filters duplicate frames, answers the read commands and the synchronize command
/// immediately, and pushes every other frame into the mailbox. A synchronize that arrives while
/// a clear is pending is queued behind it instead, so the clear cannot drop the `SYNC` bit. The
/// periodic side is reached only through the mailbox and the [`Bram`].
#[derive(Debug)]
pub struct Dispatcher {
    last_msg_id: u8,
    ack: Ack,
    reads_fpga_info: bool,
    option: FirmwareOption,
}

impl Dispatcher {
    /// Creates a new dispatcher.
    ///
    /// The previous message id starts at [`MSG_CLEAR`], since power-on init already performs a
    /// clear.
    #[must_use]
    pub const fn new(option: FirmwareOption) -> Self {
        Self {
            last_msg_id: MSG_CLEAR,
            ack: Ack::new(),
            reads_fpga_info: false,
            option,
        }
    }

    /// The id of the last accepted frame.
    #[must_use]
    pub const fn last_msg_id(&self) -> u8 {
        self.last_msg_id
    }

    /// The current acknowledgement.
    #[must_use]
    pub const fn ack(&self) -> Ack {
        self.ack
    }

    /// Whether the FPGA info byte is requested by the last accepted frame.
    #[must_use]
    pub const fn reads_fpga_info(&self) -> bool {
        self.reads_fpga_info
    }

    /// Handles one arriving frame and returns the acknowledgement to emit.
    ///
    /// `next_sync0` is the start time of the SYNC0 pulse train, used by the synchronize command.
    ///
    /// # Errors
    ///
    /// Returns [`FirmwareError::MailboxOverflow`] if the frame has to be queued and the
    /// mailbox stays full beyond [`Backpressure::Bounded`]. The frame is then not accepted, so
    /// a retransmission with the same id is processed.
    pub fn recv<B: Bram, const N: usize>(
        &mut self,
        bram: &mut B,
        producer: &mut Producer<'_, TxMessage, N>,
        msg: &TxMessage,
        next_sync0: DcSysTime,
    ) -> Result<Ack, FirmwareError> {
        let header = &msg.header;
        if header.msg_id == self.last_msg_id {
            tracing::debug!("duplicate frame: {:#04X}", header.msg_id);
            self.ack = self.update_ack(bram);
            return Ok(self.ack);
        }
        tracing::trace!("recv: {}", msg);

        let prev = (self.last_msg_id, self.ack, self.reads_fpga_info);
        self.last_msg_id = header.msg_id;
        self.ack = Ack::new().with_msg_id(header.msg_id);
        self.reads_fpga_info = header
            .fpga_flag()
            .contains(FPGAControlFlags::READS_FPGA_INFO);
        if self.reads_fpga_info {
            self.ack.set_data(Self::fpga_info(bram));
        }

        match Command::from_msg_id(header.msg_id) {
            Command::Clear => {
                tracing::debug!("clear requested");
                self.reads_fpga_info = false;
                producer.request_clear();
            }
            Command::ReadCpuVersion => self.ack.set_data(self.option.cpu_version),
            Command::ReadFpgaVersion => {
                self.ack
                    .set_data(bram.read(BramSelect::Controller, addr::VERSION_NUM) as u8);
            }
            Command::ReadFpgaFunction => {
                self.ack
                    .set_data((bram.read(BramSelect::Controller, addr::VERSION_NUM) >> 8) as u8);
            }
            Command::Reserved => {
                tracing::warn!("reserved message id: {:#04X}", header.msg_id);
            }
            Command::Operation => {
                if header.is_sync() && !producer.clear_pending() {
                    Self::synchronize(bram, msg, next_sync0);
                } else {
                    if header.is_sync() {
                        // the control register is set by the engine after the pending clear
                        tracing::debug!("clear pending, synchronize deferred");
                        Self::write_sync_params(bram, msg, next_sync0);
                    }
                    if let Err(e) = self.enqueue(producer, msg) {
                        (self.last_msg_id, self.ack, self.reads_fpga_info) = prev;
                        return Err(e);
                    }
                }
            }
        }

        Ok(self.ack)
    }

    /// Computes the acknowledgement to emit on the periodic tick.
    ///
    /// The FPGA info byte is re-read unless the last accepted frame is a read command. The
    /// dispatcher itself is not modified: the tick side owns the returned value and writes it to
    /// the transport. In a two-context build this reads the arrival-side state, so it has to run
    /// with the arrival interrupt masked, the same way the tick reads the transport registers.
    #[must_use]
    pub fn update_ack<B: Bram>(&self, bram: &B) -> Ack {
        if self.reads_fpga_info && !Command::from_msg_id(self.last_msg_id).is_read() {
            self.ack.with_data(Self::fpga_info(bram))
        } else {
            self.ack
        }
    }

    fn fpga_info<B: Bram>(bram: &B) -> u8 {
        bram.read(BramSelect::Controller, addr::FPGA_INFO) as u8
    }

    fn synchronize<B: Bram>(bram: &mut B, msg: &TxMessage, next_sync0: DcSysTime) {
        Self::write_sync_params(bram, msg, next_sync0);
        bram.write(
            BramSelect::Controller,
            addr::CTL_REG,
            (msg.header.fpga_flag() | FPGAControlFlags::SYNC).bits(),
        );
    }

    // clear leaves the cycle table and the sync time untouched
    fn write_sync_params<B: Bram>(bram: &mut B, msg: &TxMessage, next_sync0: DcSysTime) {
        tracing::debug!("synchronize at {}ns", next_sync0.sys_time());
        bram.cpy(BramSelect::Controller, addr::CYCLE_BASE, msg.body.cycles());
        bram.write_u64(
            BramSelect::Controller,
            addr::EC_SYNC_TIME_0,
            next_sync0.sys_time(),
        );
    }

    fn enqueue<const N: usize>(
        &self,
        producer: &mut Producer<'_, TxMessage, N>,
        msg: &TxMessage,
    ) -> Result<(), FirmwareError> {
        match self.option.backpressure {
            Backpressure::Spin => {
                while !producer.push(msg) {
                    core::hint::spin_loop();
                }
                Ok(())
            }
            Backpressure::Bounded(retries) => {
                if producer.push(msg) {
                    return Ok(());
                }
                for _ in 0..retries {
                    core::hint::spin_loop();
                    if producer.push(msg) {
                        return Ok(());
                    }
                }
                tracing::warn!("mailbox is full, dropping {:#04X}", msg.header.msg_id);
                Err(FirmwareError::MailboxOverflow { retries })
            }
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(FirmwareOption::default())
    }
}
