#![no_std]
#![no_main]

use autd3_firmware::{
    bram::BramSelect, ethercat::DcSysTime, frame::TxMessage, params::MAILBOX_CAPACITY,
    ApplyEngine, Bram, Dispatcher, FirmwareOption, Mailbox,
};

#[panic_handler]
fn panic(_panic: &core::panic::PanicInfo<'_>) -> ! {
    loop {}
}

struct NullBram;

impl Bram for NullBram {
    fn read(&self, _select: BramSelect, _addr: u16) -> u16 {
        0
    }

    fn write(&mut self, _select: BramSelect, _addr: u16, _data: u16) {}
}

#[unsafe(no_mangle)]
fn main() {
    let mut bram = NullBram;
    let mut mailbox = Mailbox::<TxMessage, MAILBOX_CAPACITY>::new();
    let mut dispatcher = Dispatcher::new(FirmwareOption::default());
    let mut engine = ApplyEngine::new(FirmwareOption::default());
    engine.init(&mut bram);

    let (mut producer, mut consumer) = mailbox.split();
    let _ = dispatcher.recv(&mut bram, &mut producer, &TxMessage::zeroed(), DcSysTime::ZERO);
    engine.update(&mut bram, &mut consumer);
}
