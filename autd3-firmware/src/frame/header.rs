use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use super::flags::{CPUControlFlags, FPGAControlFlags};

pub(crate) const HEADER_PAYLOAD_SIZE: usize = 124;
const MOD_HEAD_FREQ_DIV_SIZE: usize = core::mem::size_of::<u32>();

/// The fixed-size header of a frame.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoBytes, FromBytes, Immutable, KnownLayout)]
pub struct Header {
    /// The message id.
    pub msg_id: u8,
    fpga_flag: u8,
    /// The CPU control flags.
    pub cpu_flag: CPUControlFlags,
    /// The number of valid payload units.
    pub size: u8,
    data: [u8; HEADER_PAYLOAD_SIZE],
}

/// The header payload, decoded according to [`CPUControlFlags`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeaderPayload<'a> {
    /// The header carries no payload.
    None,
    /// The first frame of a modulation.
    ModHead {
        /// The modulation frequency division.
        freq_div: u32,
        /// The modulation samples.
        data: &'a [u8],
    },
    /// A continuation frame of a modulation.
    ModBody {
        /// The modulation samples.
        data: &'a [u8],
    },
    /// Silencer configuration.
    Silencer {
        /// The silencer cycle.
        cycle: u16,
        /// The silencer step.
        step: u16,
    },
}

impl Header {
    /// Creates a new header with a zeroed payload.
    #[must_use]
    pub const fn new(msg_id: u8, fpga_flag: FPGAControlFlags, cpu_flag: CPUControlFlags) -> Self {
        Self {
            msg_id,
            fpga_flag: fpga_flag.bits() as u8,
            cpu_flag,
            size: 0,
            data: [0; HEADER_PAYLOAD_SIZE],
        }
    }

    /// Returns the FPGA control flags.
    #[must_use]
    pub const fn fpga_flag(&self) -> FPGAControlFlags {
        FPGAControlFlags::from_bits_retain(self.fpga_flag as u16)
    }

    /// Sets the FPGA control flags. Bits above the wire width are dropped.
    pub fn set_fpga_flag(&mut self, flag: FPGAControlFlags) {
        self.fpga_flag = flag.bits() as u8;
    }

    /// Returns the raw payload.
    #[must_use]
    pub const fn data(&self) -> &[u8; HEADER_PAYLOAD_SIZE] {
        &self.data
    }

    /// Returns the raw payload.
    #[must_use]
    pub fn data_mut(&mut self) -> &mut [u8; HEADER_PAYLOAD_SIZE] {
        &mut self.data
    }

    /// Returns `true` if this is a synchronize frame: `CONFIG_SYNC` without `MOD`.
    #[must_use]
    pub const fn is_sync(&self) -> bool {
        !self.cpu_flag.contains(CPUControlFlags::MOD)
            && self.cpu_flag.contains(CPUControlFlags::CONFIG_SYNC)
    }

    /// Decodes the payload.
    #[must_use]
    pub fn payload(&self) -> HeaderPayload<'_> {
        if self.cpu_flag.contains(CPUControlFlags::MOD) {
            if self.cpu_flag.contains(CPUControlFlags::MOD_BEGIN) {
                let (freq_div, data) = self.data.split_at(MOD_HEAD_FREQ_DIV_SIZE);
                HeaderPayload::ModHead {
                    freq_div: u32::from_le_bytes([freq_div[0], freq_div[1], freq_div[2], freq_div[3]]),
                    data,
                }
            } else {
                HeaderPayload::ModBody { data: &self.data }
            }
        } else if self.cpu_flag.contains(CPUControlFlags::CONFIG_SILENCER) {
            HeaderPayload::Silencer {
                cycle: u16::from_le_bytes([self.data[0], self.data[1]]),
                step: u16::from_le_bytes([self.data[2], self.data[3]]),
            }
        } else {
            HeaderPayload::None
        }
    }
}
