mod ack;
mod body;
mod flags;
mod header;
mod msg_id;
mod tx;

pub use ack::Ack;
pub use body::{Body, BodyPayload, GainDataMode};
pub use flags::{CPUControlFlags, FPGAControlFlags};
pub use header::{Header, HeaderPayload};
pub use msg_id::Command;
pub use tx::{TxMessage, EC_OUTPUT_FRAME_SIZE};
