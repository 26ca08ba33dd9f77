use zerocopy::{FromBytes, Immutable, IntoBytes};

/// The acknowledgement word sent back every cycle.
#[bitfield_struct::bitfield(u16)]
#[derive(IntoBytes, Immutable, FromBytes, PartialEq, Eq)]
pub struct Ack {
    /// Status byte or reply value.
    #[bits(8)]
    pub data: u8,
    /// The last processed message id.
    #[bits(8)]
    pub msg_id: u8,
}
