use core::fmt;

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// Flags of the FPGA control register.
///
/// The wire carries only the lower 8 bits. [`FPGAControlFlags::SYNC`] exists in the controller
/// register alone and is set by the synchronize command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(C)]
pub struct FPGAControlFlags(u16);

bitflags::bitflags! {
    impl FPGAControlFlags : u16 {
        const NONE            = 0;
        const LEGACY_MODE     = 1 << 0;
        const FORCE_FAN       = 1 << 4;
        const OP_MODE         = 1 << 5;
        const STM_GAIN_MODE   = 1 << 6;
        const READS_FPGA_INFO = 1 << 7;
        const SYNC            = 1 << 8;
    }
}

/// Flags selecting which payload of a frame is valid.
///
/// Bits 0 to 2 are shared: with [`CPUControlFlags::MOD`] set they read as `MOD`/`MOD_BEGIN`/`MOD_END`,
/// otherwise as `CONFIG_EN_N`/`CONFIG_SILENCER`/`CONFIG_SYNC`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoBytes, FromBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct CPUControlFlags(u8);

bitflags::bitflags! {
    impl CPUControlFlags : u8 {
        const NONE            = 0;
        const MOD             = 1 << 0;
        const MOD_BEGIN       = 1 << 1;
        const MOD_END         = 1 << 2;
        const CONFIG_EN_N     = 1 << 0;
        const CONFIG_SILENCER = 1 << 1;
        const CONFIG_SYNC     = 1 << 2;
        const WRITE_BODY      = 1 << 3;
        const STM_BEGIN       = 1 << 4;
        const STM_END         = 1 << 5;
        const IS_DUTY         = 1 << 6;
        const MOD_DELAY       = 1 << 7;
    }
}

impl fmt::Display for FPGAControlFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "NONE");
        }
        bitflags::parser::to_writer(self, f)
    }
}

impl fmt::Display for CPUControlFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "NONE");
        }
        let names: &[(Self, &str)] = if self.contains(Self::MOD) {
            &[
                (Self::MOD, "MOD"),
                (Self::MOD_BEGIN, "MOD_BEGIN"),
                (Self::MOD_END, "MOD_END"),
            ]
        } else {
            &[
                (Self::CONFIG_SILENCER, "CONFIG_SILENCER"),
                (Self::CONFIG_SYNC, "CONFIG_SYNC"),
            ]
        };
        let body: &[(Self, &str)] = &[
            (Self::WRITE_BODY, "WRITE_BODY"),
            (Self::STM_BEGIN, "STM_BEGIN"),
            (Self::STM_END, "STM_END"),
            (Self::IS_DUTY, "IS_DUTY"),
            (Self::MOD_DELAY, "MOD_DELAY"),
        ];
        let mut first = true;
        for (flag, name) in names.iter().chain(body.iter()) {
            if self.contains(*flag) {
                if !first {
                    write!(f, " | ")?;
                }
                write!(f, "{}", name)?;
                first = false;
            }
        }
        Ok(())
    }
}
