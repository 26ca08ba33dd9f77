use thiserror::Error;

/// An error produced by the firmware core.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum FirmwareError {
    /// The transport buffer is too short.
    #[error("Frame size ({actual}) is too short, expected at least {expected}")]
    InvalidFrameSize {
        /// The required size.
        expected: usize,
        /// The provided size.
        actual: usize,
    },
    /// The mailbox stayed full for the whole backpressure budget.
    #[error("Mailbox is full after {retries} retries")]
    MailboxOverflow {
        /// The number of retries made.
        retries: u32,
    },
}
