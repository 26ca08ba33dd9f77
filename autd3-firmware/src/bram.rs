use derive_more::Display;

/// Memory region of the FPGA.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[repr(u8)]
pub enum BramSelect {
    /// Controller registers.
    #[display("CONTROLLER")]
    Controller = 0x0,
    /// Modulation table.
    #[display("MOD")]
    Mod = 0x1,
    /// Direct-drive table.
    #[display("NORMAL")]
    Normal = 0x2,
    /// Streaming table shared by the point- and gain-sequence.
    #[display("STM")]
    Stm = 0x3,
}

impl BramSelect {
    /// Returns the physical address of `addr` in this region.
    #[must_use]
    pub const fn address(self, addr: u16) -> u16 {
        ((self as u16 & 0x0003) << 14) | (addr & 0x3FFF)
    }
}

/// Addresses in the [`BramSelect::Controller`] region.
pub mod addr {
    #![allow(missing_docs)]

    pub const CTL_REG: u16 = 0x000;
    pub const FPGA_INFO: u16 = 0x001;
    pub const EC_SYNC_TIME_0: u16 = 0x011;
    pub const EC_SYNC_TIME_1: u16 = 0x012;
    pub const EC_SYNC_TIME_2: u16 = 0x013;
    pub const EC_SYNC_TIME_3: u16 = 0x014;
    pub const MOD_ADDR_OFFSET: u16 = 0x020;
    pub const MOD_CYCLE: u16 = 0x021;
    pub const MOD_FREQ_DIV_0: u16 = 0x022;
    pub const MOD_FREQ_DIV_1: u16 = 0x023;
    pub const VERSION_NUM: u16 = 0x03F;
    pub const SILENT_CYCLE: u16 = 0x040;
    pub const SILENT_STEP: u16 = 0x041;
    pub const STM_ADDR_OFFSET: u16 = 0x050;
    pub const STM_CYCLE: u16 = 0x051;
    pub const STM_FREQ_DIV_0: u16 = 0x052;
    pub const STM_FREQ_DIV_1: u16 = 0x053;
    pub const SOUND_SPEED_0: u16 = 0x054;
    pub const SOUND_SPEED_1: u16 = 0x055;
    pub const CYCLE_BASE: u16 = 0x100;
    pub const MOD_DELAY_BASE: u16 = 0x200;
}

/// Half-word of a per-transducer slot in the direct-drive and gain-sequence tables.
///
/// A slot is two consecutive words, phase first. The legacy encoding packs phase and duty into
/// the [`Channel::Phase`] word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u16)]
pub enum Channel {
    /// The phase word.
    Phase = 0,
    /// The duty word.
    Duty = 1,
}

/// An interface to the memory shared with the FPGA.
///
/// Implementations are assumed to be synchronized with the device; this crate only orders the
/// calls.
pub trait Bram {
    /// Reads a word.
    #[must_use]
    fn read(&self, select: BramSelect, addr: u16) -> u16;

    /// Writes a word.
    fn write(&mut self, select: BramSelect, addr: u16, data: u16);

    /// Copies `src` to consecutive addresses starting at `addr`.
    fn cpy(&mut self, select: BramSelect, addr: u16, src: &[u16]) {
        src.iter()
            .enumerate()
            .for_each(|(i, &v)| self.write(select, addr.wrapping_add(i as u16), v));
    }

    /// Fills `size` consecutive words starting at `addr` with `value`.
    fn set(&mut self, select: BramSelect, addr: u16, value: u16, size: usize) {
        (0..size).for_each(|i| self.write(select, addr.wrapping_add(i as u16), value));
    }

    /// Writes a 32-bit value to two consecutive words, low half first.
    fn write_u32(&mut self, select: BramSelect, addr: u16, value: u32) {
        self.cpy(select, addr, &[value as u16, (value >> 16) as u16]);
    }

    /// Writes a 64-bit value to four consecutive words, lowest half-word first.
    fn write_u64(&mut self, select: BramSelect, addr: u16, value: u64) {
        self.cpy(
            select,
            addr,
            &[
                value as u16,
                (value >> 16) as u16,
                (value >> 32) as u16,
                (value >> 48) as u16,
            ],
        );
    }

    /// Writes `value` to the `channel` word of the `idx`-th transducer slot of a table starting
    /// at `base`.
    fn write_slot(&mut self, select: BramSelect, base: u16, idx: usize, channel: Channel, value: u16) {
        self.write(
            select,
            base.wrapping_add((idx << 1) as u16)
                .wrapping_add(channel as u16),
            value,
        );
    }
}
