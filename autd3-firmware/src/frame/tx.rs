use derive_more::Display;
use zerocopy::{FromBytes, FromZeros, Immutable, IntoBytes, KnownLayout};

use crate::error::FirmwareError;

use super::{body::Body, header::Header};

/// The size of one inbound frame on the wire.
pub const EC_OUTPUT_FRAME_SIZE: usize = core::mem::size_of::<TxMessage>();

/// One inbound frame: the body region followed by the header region.
#[repr(C)]
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, IntoBytes, FromBytes, Immutable, KnownLayout, Display,
)]
#[display("(msg_id: {:#04X}, fpga: {}, cpu: {}, size: {})", header.msg_id, header.fpga_flag(), header.cpu_flag, header.size)]
pub struct TxMessage {
    /// The per-transducer table.
    pub body: Body,
    /// The header.
    pub header: Header,
}

impl TxMessage {
    /// Creates a new frame.
    #[must_use]
    pub const fn new(header: Header, body: Body) -> Self {
        Self { body, header }
    }

    /// Parses a frame from a contiguous transport buffer.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FirmwareError> {
        Self::read_from_prefix(bytes)
            .map(|(msg, _)| msg)
            .map_err(|_| FirmwareError::InvalidFrameSize {
                expected: EC_OUTPUT_FRAME_SIZE,
                actual: bytes.len(),
            })
    }

    /// Parses a frame from the separate header and body regions of the transport.
    pub fn from_regions(header: &[u8], body: &[u8]) -> Result<Self, FirmwareError> {
        let (header, _) =
            Header::read_from_prefix(header).map_err(|_| FirmwareError::InvalidFrameSize {
                expected: core::mem::size_of::<Header>(),
                actual: header.len(),
            })?;
        let (body, _) =
            Body::read_from_prefix(body).map_err(|_| FirmwareError::InvalidFrameSize {
                expected: core::mem::size_of::<Body>(),
                actual: body.len(),
            })?;
        Ok(Self { body, header })
    }

    /// Returns an all-zero frame.
    #[must_use]
    pub fn zeroed() -> Self {
        Self::new_zeroed()
    }
}
