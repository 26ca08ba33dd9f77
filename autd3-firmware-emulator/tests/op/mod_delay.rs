use autd3_firmware::{
    frame::{CPUControlFlags, FPGAControlFlags},
    params::TRANS_NUM,
};
use autd3_firmware_emulator::CPUEmulator;

use rand::Rng;

use crate::{send, Sender};

#[test]
fn config_mod_delay() -> anyhow::Result<()> {
    let mut cpu = CPUEmulator::new();
    let mut sender = Sender::new();
    let mut rng = rand::rng();

    let delays: Vec<u16> = (0..TRANS_NUM).map(|_| rng.random()).collect();
    let mut tx = sender.frame(
        FPGAControlFlags::LEGACY_MODE,
        CPUControlFlags::WRITE_BODY | CPUControlFlags::MOD_DELAY,
    );
    tx.body.data_mut().copy_from_slice(&delays);
    send(&mut cpu, &tx)?;

    assert_eq!(delays, cpu.fpga().mod_delays());
    assert!(cpu.fpga().drives().iter().all(|&d| d == (0, 0)));
    Ok(())
}

#[test]
fn mod_delay_needs_write_body() -> anyhow::Result<()> {
    let mut cpu = CPUEmulator::new();
    let mut sender = Sender::new();

    let mut tx = sender.frame(FPGAControlFlags::LEGACY_MODE, CPUControlFlags::MOD_DELAY);
    tx.body.data_mut().fill(0x1234);
    send(&mut cpu, &tx)?;

    assert!(cpu.fpga().mod_delays().iter().all(|&d| d == 0));
    Ok(())
}
