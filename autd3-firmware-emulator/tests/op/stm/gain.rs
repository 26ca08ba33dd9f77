use autd3_firmware::{
    frame::{CPUControlFlags, FPGAControlFlags, GainDataMode, TxMessage},
    params::{GAIN_STM_BUF_SEGMENT_SIZE, TRANS_NUM},
};
use autd3_firmware_emulator::CPUEmulator;

use itertools::izip;
use rand::Rng;

use crate::{send, Sender};

const PHASE_DUTY_FULL: u16 = 0x0001;
const PHASE_FULL: u16 = 0x0002;
const PHASE_HALF: u16 = 0x0004;

fn fpga_flag(legacy: bool) -> FPGAControlFlags {
    let mut flag = FPGAControlFlags::OP_MODE | FPGAControlFlags::STM_GAIN_MODE;
    flag.set(FPGAControlFlags::LEGACY_MODE, legacy);
    flag
}

fn gain_head(sender: &mut Sender, legacy: bool, freq_div: u32, mode: u16) -> TxMessage {
    let mut tx = sender.frame(
        fpga_flag(legacy),
        CPUControlFlags::WRITE_BODY | CPUControlFlags::STM_BEGIN,
    );
    let d = tx.body.data_mut();
    d[0] = freq_div as u16;
    d[1] = (freq_div >> 16) as u16;
    d[2] = mode;
    tx
}

fn gain_body(
    sender: &mut Sender,
    legacy: bool,
    is_duty: bool,
    end: bool,
    data: &[u16],
) -> TxMessage {
    let mut cpu_flag = CPUControlFlags::WRITE_BODY;
    cpu_flag.set(CPUControlFlags::IS_DUTY, is_duty);
    cpu_flag.set(CPUControlFlags::STM_END, end);
    let mut tx = sender.frame(fpga_flag(legacy), cpu_flag);
    tx.body.data_mut().copy_from_slice(data);
    tx
}

fn gen_random_data(n: usize) -> Vec<Vec<u16>> {
    let mut rng = rand::rng();
    (0..n)
        .map(|_| (0..TRANS_NUM).map(|_| rng.random()).collect())
        .collect()
}

fn phases(cpu: &CPUEmulator, idx: usize) -> Vec<u16> {
    cpu.fpga()
        .gain_stm_at(idx)
        .into_iter()
        .map(|(phase, _)| phase)
        .collect()
}

#[rstest::rstest]
#[test]
#[case(1)]
#[case(2)]
#[case(GAIN_STM_BUF_SEGMENT_SIZE as usize)]
#[case(GAIN_STM_BUF_SEGMENT_SIZE as usize * 2 + 6)]
fn write_gain_stm_legacy(#[case] n: usize) -> anyhow::Result<()> {
    let mut cpu = CPUEmulator::new();
    let mut sender = Sender::new();
    let mut rng = rand::rng();

    let freq_div: u32 = rng.random();
    send(&mut cpu, &gain_head(&mut sender, true, freq_div, PHASE_DUTY_FULL))?;
    assert_eq!(GainDataMode::PhaseDutyFull, cpu.gain_data_mode());

    let data = gen_random_data(n);
    data.iter().enumerate().try_for_each(|(i, d)| {
        send(&mut cpu, &gain_body(&mut sender, true, false, i == n - 1, d)).map(|_| ())
    })?;

    assert!(cpu.fpga().is_stm_mode());
    assert!(cpu.fpga().is_stm_gain_mode());
    assert_eq!(freq_div, cpu.fpga().stm_freq_division());
    assert_eq!(n, cpu.fpga().stm_cycle());
    assert_eq!(
        (n / GAIN_STM_BUF_SEGMENT_SIZE as usize) as u16,
        cpu.fpga().stm_addr_offset()
    );
    data.iter()
        .enumerate()
        .for_each(|(i, d)| assert_eq!(*d, phases(&cpu, i)));
    Ok(())
}

#[test]
fn write_gain_stm_raw() -> anyhow::Result<()> {
    let mut cpu = CPUEmulator::new();
    let mut sender = Sender::new();

    const N: usize = 40;
    send(&mut cpu, &gain_head(&mut sender, false, 0xFFFF, PHASE_DUTY_FULL))?;

    let phase = gen_random_data(N);
    let duty = gen_random_data(N);
    (0..N).try_for_each(|i| -> anyhow::Result<()> {
        send(&mut cpu, &gain_body(&mut sender, false, false, false, &phase[i]))?;
        assert_eq!(i as u32, cpu.stm_cycle());
        send(&mut cpu, &gain_body(&mut sender, false, true, i == N - 1, &duty[i]))?;
        assert_eq!(i as u32 + 1, cpu.stm_cycle());
        Ok(())
    })?;

    assert_eq!(N, cpu.fpga().stm_cycle());
    izip!(&phase, &duty).enumerate().for_each(|(i, (p, d))| {
        let expect: Vec<_> = p.iter().copied().zip(d.iter().copied()).collect();
        assert_eq!(expect, cpu.fpga().gain_stm_at(i));
    });
    Ok(())
}

#[test]
fn write_gain_stm_phase_full_legacy() -> anyhow::Result<()> {
    let mut cpu = CPUEmulator::new();
    let mut sender = Sender::new();

    const FRAMES: usize = 20;
    send(&mut cpu, &gain_head(&mut sender, true, 0xFFFF, PHASE_FULL))?;
    assert_eq!(GainDataMode::PhaseFull, cpu.gain_data_mode());

    let data = gen_random_data(FRAMES);
    data.iter().enumerate().try_for_each(|(i, d)| {
        send(&mut cpu, &gain_body(&mut sender, true, false, i == FRAMES - 1, d)).map(|_| ())
    })?;

    assert_eq!(FRAMES * 2, cpu.fpga().stm_cycle());
    assert_eq!(1, cpu.fpga().stm_addr_offset());
    data.iter().enumerate().for_each(|(i, d)| {
        let low: Vec<_> = d.iter().map(|&v| 0xFF00 | (v & 0x00FF)).collect();
        let high: Vec<_> = d.iter().map(|&v| 0xFF00 | (v >> 8)).collect();
        assert_eq!(low, phases(&cpu, 2 * i));
        assert_eq!(high, phases(&cpu, 2 * i + 1));
    });
    Ok(())
}

#[test]
fn write_gain_stm_phase_full_raw() -> anyhow::Result<()> {
    let mut cpu = CPUEmulator::new();
    let mut sender = Sender::new();
    let mut rng = rand::rng();

    let cycles: Vec<u16> = (0..TRANS_NUM).map(|_| rng.random_range(2000..5000)).collect();
    let mut sync = sender.frame(
        FPGAControlFlags::NONE,
        CPUControlFlags::WRITE_BODY | CPUControlFlags::CONFIG_SYNC,
    );
    sync.body.data_mut().copy_from_slice(&cycles);
    cpu.send(&sync)?;

    const N: usize = 5;
    send(&mut cpu, &gain_head(&mut sender, false, 0xFFFF, PHASE_FULL))?;

    let phase = gen_random_data(N);
    phase.iter().enumerate().try_for_each(|(i, d)| -> anyhow::Result<()> {
        send(&mut cpu, &gain_body(&mut sender, false, false, i == N - 1, d))?;
        // a duty frame carries nothing in this mode
        send(&mut cpu, &gain_body(&mut sender, false, true, false, &[0xFFFF; TRANS_NUM]))?;
        Ok(())
    })?;

    assert_eq!(N, cpu.fpga().stm_cycle());
    phase.iter().enumerate().for_each(|(i, d)| {
        let expect: Vec<_> = d
            .iter()
            .zip(cycles.iter())
            .map(|(&p, &c)| (p, c >> 1))
            .collect();
        assert_eq!(expect, cpu.fpga().gain_stm_at(i));
    });
    Ok(())
}

#[test]
fn write_gain_stm_phase_half_legacy() -> anyhow::Result<()> {
    let mut cpu = CPUEmulator::new();
    let mut sender = Sender::new();

    const FRAMES: usize = 10;
    send(&mut cpu, &gain_head(&mut sender, true, 0xFFFF, PHASE_HALF))?;
    assert_eq!(GainDataMode::PhaseHalf, cpu.gain_data_mode());

    let data = gen_random_data(FRAMES);
    data.iter().enumerate().try_for_each(|(i, d)| {
        send(&mut cpu, &gain_body(&mut sender, true, false, i == FRAMES - 1, d)).map(|_| ())
    })?;

    assert_eq!(FRAMES * 4, cpu.fpga().stm_cycle());
    assert_eq!(1, cpu.fpga().stm_addr_offset());
    data.iter().enumerate().for_each(|(i, d)| {
        (0..4).for_each(|k| {
            let expect: Vec<_> = d
                .iter()
                .map(|&v| {
                    let p = (v >> (4 * k)) & 0x000F;
                    0xFF00 | (p << 4) | p
                })
                .collect();
            assert_eq!(expect, phases(&cpu, 4 * i + k));
        });
    });
    Ok(())
}

#[test]
fn write_gain_stm_phase_half_raw_is_ignored() -> anyhow::Result<()> {
    let mut cpu = CPUEmulator::new();
    let mut sender = Sender::new();

    send(&mut cpu, &gain_head(&mut sender, false, 0xFFFF, PHASE_HALF))?;
    send(&mut cpu, &gain_body(&mut sender, false, false, true, &[0x1234; TRANS_NUM]))?;

    assert_eq!(0, cpu.stm_cycle());
    assert_eq!(1, cpu.fpga().stm_cycle());
    assert!(cpu.fpga().gain_stm_at(0).iter().all(|&d| d == (0, 0)));
    Ok(())
}

#[test]
fn write_gain_stm_unknown_mode() -> anyhow::Result<()> {
    let mut cpu = CPUEmulator::new();
    let mut sender = Sender::new();

    send(&mut cpu, &gain_head(&mut sender, true, 0xFFFF, 0x0008))?;
    assert_eq!(GainDataMode::Unknown(0x0008), cpu.gain_data_mode());

    let data = gen_random_data(2);
    send(&mut cpu, &gain_body(&mut sender, true, false, false, &data[0]))?;
    send(&mut cpu, &gain_body(&mut sender, true, false, true, &data[1]))?;

    assert_eq!(2, cpu.fpga().stm_cycle());
    assert_eq!(data[0], phases(&cpu, 0));
    assert_eq!(data[1], phases(&cpu, 1));
    Ok(())
}
