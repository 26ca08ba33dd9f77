mod dc_sys_time;

pub use dc_sys_time::DcSysTime;
#[cfg(feature = "time")]
pub use dc_sys_time::InvalidDateTime;

/// The base time of the Distributed Clock (2000-01-01 0:00:00 UTC).
#[cfg(feature = "time")]
pub const ECAT_DC_SYS_TIME_BASE: time::OffsetDateTime = time::macros::datetime!(2000-01-01 0:00 UTC);
