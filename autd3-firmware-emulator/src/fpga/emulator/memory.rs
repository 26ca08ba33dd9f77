use autd3_firmware::bram::{addr, BramSelect};

const PAGE_WIDTH: u32 = 14;
const PAGE_SIZE: usize = 1 << PAGE_WIDTH;
const MOD_PAGES: usize = 2;
const STM_PAGES: usize = 32;

pub(crate) struct Memory {
    controller_bram: Vec<u16>,
    modulation_bram: Vec<u16>,
    normal_bram: Vec<u16>,
    stm_bram: Vec<u16>,
}

impl Memory {
    pub fn new(version: u16) -> Self {
        let mut controller_bram = vec![0x0000; PAGE_SIZE];
        controller_bram[addr::VERSION_NUM as usize] = version;
        Self {
            controller_bram,
            modulation_bram: vec![0x0000; MOD_PAGES * PAGE_SIZE],
            normal_bram: vec![0x0000; PAGE_SIZE],
            stm_bram: vec![0x0000; STM_PAGES * PAGE_SIZE],
        }
    }

    pub fn controller_bram(&self) -> &[u16] {
        &self.controller_bram
    }

    pub fn controller_bram_mut(&mut self) -> &mut [u16] {
        &mut self.controller_bram
    }

    pub fn modulation_bram(&self) -> &[u16] {
        &self.modulation_bram
    }

    pub fn normal_bram(&self) -> &[u16] {
        &self.normal_bram
    }

    pub fn stm_bram(&self) -> &[u16] {
        &self.stm_bram
    }

    fn mod_page(&self) -> usize {
        self.controller_bram[addr::MOD_ADDR_OFFSET as usize] as usize % MOD_PAGES
    }

    fn stm_page(&self) -> usize {
        self.controller_bram[addr::STM_ADDR_OFFSET as usize] as usize % STM_PAGES
    }

    pub fn read_u32(&self, addr: u16) -> u32 {
        let addr = addr as usize;
        self.controller_bram[addr] as u32 | (self.controller_bram[addr + 1] as u32) << 16
    }

    pub fn read_u64(&self, addr: u16) -> u64 {
        (0..4).fold(0, |acc, i| {
            acc | (self.controller_bram[addr as usize + i] as u64) << (16 * i)
        })
    }

    fn index(&self, select: BramSelect, addr: u16) -> usize {
        let addr = (addr & 0x3FFF) as usize;
        match select {
            BramSelect::Controller | BramSelect::Normal => addr,
            BramSelect::Mod => self.mod_page() << PAGE_WIDTH | addr,
            BramSelect::Stm => self.stm_page() << PAGE_WIDTH | addr,
        }
    }

    pub fn read(&self, select: BramSelect, addr: u16) -> u16 {
        let idx = self.index(select, addr);
        match select {
            BramSelect::Controller => self.controller_bram[idx],
            BramSelect::Mod => self.modulation_bram[idx],
            BramSelect::Normal => self.normal_bram[idx],
            BramSelect::Stm => self.stm_bram[idx],
        }
    }

    pub fn write(&mut self, select: BramSelect, addr: u16, data: u16) {
        let idx = self.index(select, addr);
        match select {
            BramSelect::Controller => self.controller_bram[idx] = data,
            BramSelect::Mod => self.modulation_bram[idx] = data,
            BramSelect::Normal => self.normal_bram[idx] = data,
            BramSelect::Stm => self.stm_bram[idx] = data,
        }
    }
}
