#[cfg(feature = "time")]
use time::OffsetDateTime;

#[cfg(feature = "time")]
use thiserror::Error;

/// A UTC time which can not be expressed as [`DcSysTime`].
#[cfg(feature = "time")]
#[derive(Error, Debug, PartialEq, Clone)]
#[error("Invalid date time")]
pub struct InvalidDateTime;

#[cfg(feature = "time")]
use super::ECAT_DC_SYS_TIME_BASE;

/// The system time of the Distributed Clock
///
/// The system time is the time expressed in 1ns units with 2000-01-01 0:00:00 UTC as the reference.
/// The synchronize command writes it to the FPGA as the start time of the SYNC0 pulse train.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(C)]
pub struct DcSysTime {
    dc_sys_time: u64,
}

impl DcSysTime {
    /// The zero point of the DcSysTime (2000-01-01 0:00:00 UTC)
    pub const ZERO: Self = Self { dc_sys_time: 0 };

    /// Creates a new instance from the system time in nanoseconds
    #[must_use]
    pub const fn from_sys_time(dc_sys_time: u64) -> Self {
        Self { dc_sys_time }
    }

    /// Returns the system time in nanoseconds
    #[must_use]
    pub const fn sys_time(&self) -> u64 {
        self.dc_sys_time
    }

    /// Converts the system time to the UTC time
    #[cfg(feature = "time")]
    #[cfg_attr(docsrs, doc(cfg(feature = "time")))]
    #[must_use]
    pub fn to_utc(&self) -> OffsetDateTime {
        ECAT_DC_SYS_TIME_BASE + core::time::Duration::from_nanos(self.dc_sys_time)
    }

    /// Creates a new instance from the UTC time
    #[cfg(feature = "time")]
    #[cfg_attr(docsrs, doc(cfg(feature = "time")))]
    pub fn from_utc(utc: OffsetDateTime) -> Result<Self, InvalidDateTime> {
        Ok(Self {
            dc_sys_time: u64::try_from((utc - ECAT_DC_SYS_TIME_BASE).whole_nanoseconds())
                .map_err(|_| InvalidDateTime)?,
        })
    }

    /// Returns the system time of now, or [`DcSysTime::ZERO`] if the clock is set before the base time
    #[cfg(feature = "time")]
    #[cfg_attr(docsrs, doc(cfg(feature = "time")))]
    #[must_use]
    pub fn now() -> Self {
        Self::from_utc(OffsetDateTime::now_utc()).unwrap_or(Self::ZERO)
    }
}

impl core::ops::Add<core::time::Duration> for DcSysTime {
    type Output = Self;

    fn add(self, rhs: core::time::Duration) -> Self::Output {
        Self {
            dc_sys_time: self.dc_sys_time + rhs.as_nanos() as u64,
        }
    }
}

impl core::ops::Sub<core::time::Duration> for DcSysTime {
    type Output = Self;

    fn sub(self, rhs: core::time::Duration) -> Self::Output {
        Self {
            dc_sys_time: self.dc_sys_time - rhs.as_nanos() as u64,
        }
    }
}
