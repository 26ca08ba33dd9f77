use crate::params::CPU_VERSION;

/// What the arrival path does while the mailbox is full.
///
/// The arrival context may stall for as long as the periodic context takes to free a slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backpressure {
    /// Retry until a slot becomes free.
    Spin,
    /// Retry at most the given number of times, then report
    /// [`FirmwareError::MailboxOverflow`](crate::FirmwareError::MailboxOverflow).
    Bounded(u32),
}

/// Configuration shared by the [`Dispatcher`](crate::Dispatcher) and the
/// [`ApplyEngine`](crate::ApplyEngine).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FirmwareOption {
    /// The value returned for the CPU version read.
    pub cpu_version: u8,
    /// The silencer step set by clear.
    pub silencer_step: u16,
    /// The silencer cycle set by clear.
    pub silencer_cycle: u16,
    /// The modulation frequency division set by clear.
    pub mod_freq_div: u32,
    /// The mailbox backpressure policy.
    pub backpressure: Backpressure,
}

impl Default for FirmwareOption {
    fn default() -> Self {
        Self {
            cpu_version: CPU_VERSION,
            silencer_step: 10,
            silencer_cycle: 4096,
            mod_freq_div: 40960,
            backpressure: Backpressure::Spin,
        }
    }
}
