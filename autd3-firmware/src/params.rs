/// The number of transducers driven by one device.
pub const TRANS_NUM: usize = 249;

/// The version reported for [`MSG_RD_CPU_VERSION`] (v2.2).
pub const CPU_VERSION: u8 = 0x82;

/// The number of slots of the frame mailbox. One slot is always kept empty.
pub const MAILBOX_CAPACITY: usize = 32;

/// Message id of the global clear command.
pub const MSG_CLEAR: u8 = 0x00;
/// Message id of the CPU version read.
pub const MSG_RD_CPU_VERSION: u8 = 0x01;
/// Message id of the FPGA version read.
pub const MSG_RD_FPGA_VERSION: u8 = 0x03;
/// Message id of the FPGA function read.
pub const MSG_RD_FPGA_FUNCTION: u8 = 0x04;
/// The first message id used for ordinary frames.
pub const MSG_BEGIN: u8 = 0x05;
/// The last message id used for ordinary frames. Larger ids are reserved.
pub const MSG_END: u8 = 0xF0;

pub(crate) const MOD_BUF_SEGMENT_SIZE_WIDTH: u32 = 15;
pub(crate) const POINT_STM_BUF_SEGMENT_SIZE_WIDTH: u32 = 11;
pub(crate) const GAIN_STM_BUF_SEGMENT_SIZE_WIDTH: u32 = 5;

/// The number of modulation samples in one segment of the modulation table.
pub const MOD_BUF_SEGMENT_SIZE: u32 = 1 << MOD_BUF_SEGMENT_SIZE_WIDTH;
/// The number of points in one segment of the point-sequence table.
pub const POINT_STM_BUF_SEGMENT_SIZE: u32 = 1 << POINT_STM_BUF_SEGMENT_SIZE_WIDTH;
/// The number of patterns in one segment of the gain-sequence table.
pub const GAIN_STM_BUF_SEGMENT_SIZE: u32 = 1 << GAIN_STM_BUF_SEGMENT_SIZE_WIDTH;

/// The number of 16-bit words of one point in the point-sequence table.
pub const POINT_STM_POINT_WORDS: usize = 4;
pub(crate) const POINT_STM_POINT_STRIDE_WIDTH: u32 = 3;
pub(crate) const GAIN_STM_PATTERN_STRIDE_WIDTH: u32 = 9;

pub(crate) const GAIN_DATA_MODE_PHASE_DUTY_FULL: u16 = 0x0001;
pub(crate) const GAIN_DATA_MODE_PHASE_FULL: u16 = 0x0002;
pub(crate) const GAIN_DATA_MODE_PHASE_HALF: u16 = 0x0004;
