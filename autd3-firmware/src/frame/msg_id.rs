use derive_more::Display;

use crate::params::{
    MSG_CLEAR, MSG_END, MSG_RD_CPU_VERSION, MSG_RD_FPGA_FUNCTION, MSG_RD_FPGA_VERSION,
};

/// The kind of command selected by a message id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum Command {
    /// Global clear.
    #[display("CLEAR")]
    Clear,
    /// Read of the CPU firmware version.
    #[display("RD_CPU_VERSION")]
    ReadCpuVersion,
    /// Read of the low byte of the FPGA version word.
    #[display("RD_FPGA_VERSION")]
    ReadFpgaVersion,
    /// Read of the high byte of the FPGA version word.
    #[display("RD_FPGA_FUNCTION")]
    ReadFpgaFunction,
    /// An id in the reserved range.
    #[display("RESERVED")]
    Reserved,
    /// An ordinary frame.
    #[display("OPERATION")]
    Operation,
}

impl Command {
    /// Classifies a message id.
    #[must_use]
    pub const fn from_msg_id(msg_id: u8) -> Self {
        match msg_id {
            MSG_CLEAR => Self::Clear,
            MSG_RD_CPU_VERSION => Self::ReadCpuVersion,
            MSG_RD_FPGA_VERSION => Self::ReadFpgaVersion,
            MSG_RD_FPGA_FUNCTION => Self::ReadFpgaFunction,
            id if id > MSG_END => Self::Reserved,
            _ => Self::Operation,
        }
    }

    /// Returns `true` for the commands answered with a version value.
    #[must_use]
    pub const fn is_read(self) -> bool {
        matches!(
            self,
            Self::ReadCpuVersion | Self::ReadFpgaVersion | Self::ReadFpgaFunction
        )
    }
}
