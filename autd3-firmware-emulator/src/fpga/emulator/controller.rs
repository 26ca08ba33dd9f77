use autd3_firmware::{
    bram::addr, ethercat::DcSysTime, frame::FPGAControlFlags, params::TRANS_NUM,
};

use super::FPGAEmulator;

impl FPGAEmulator {
    #[must_use]
    pub fn ctl_flags(&self) -> FPGAControlFlags {
        FPGAControlFlags::from_bits_retain(self.mem.controller_bram()[addr::CTL_REG as usize])
    }

    #[must_use]
    pub fn is_legacy_mode(&self) -> bool {
        self.ctl_flags().contains(FPGAControlFlags::LEGACY_MODE)
    }

    #[must_use]
    pub fn is_force_fan(&self) -> bool {
        self.ctl_flags().contains(FPGAControlFlags::FORCE_FAN)
    }

    #[must_use]
    pub fn is_stm_mode(&self) -> bool {
        self.ctl_flags().contains(FPGAControlFlags::OP_MODE)
    }

    #[must_use]
    pub fn is_stm_gain_mode(&self) -> bool {
        self.ctl_flags().contains(FPGAControlFlags::STM_GAIN_MODE)
    }

    #[must_use]
    pub fn is_synchronized(&self) -> bool {
        self.ctl_flags().contains(FPGAControlFlags::SYNC)
    }

    #[must_use]
    pub fn fpga_info(&self) -> u8 {
        self.mem.controller_bram()[addr::FPGA_INFO as usize] as u8
    }

    #[must_use]
    pub fn version(&self) -> u16 {
        self.mem.controller_bram()[addr::VERSION_NUM as usize]
    }

    /// The start time of the SYNC0 pulse train written by the synchronize command.
    #[must_use]
    pub fn ec_sync_time(&self) -> DcSysTime {
        DcSysTime::from_sys_time(self.mem.read_u64(addr::EC_SYNC_TIME_0))
    }

    #[must_use]
    pub fn cycles(&self) -> Vec<u16> {
        let base = addr::CYCLE_BASE as usize;
        self.mem.controller_bram()[base..base + TRANS_NUM].to_vec()
    }

    #[must_use]
    pub fn mod_delays(&self) -> Vec<u16> {
        let base = addr::MOD_DELAY_BASE as usize;
        self.mem.controller_bram()[base..base + TRANS_NUM].to_vec()
    }
}
