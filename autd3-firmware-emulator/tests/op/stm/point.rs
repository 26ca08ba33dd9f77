use autd3_firmware::{
    frame::{CPUControlFlags, FPGAControlFlags, TxMessage},
    params::{POINT_STM_BUF_SEGMENT_SIZE, POINT_STM_POINT_WORDS},
};
use autd3_firmware_emulator::CPUEmulator;

use rand::Rng;

use crate::{send, Sender};

type Point = [u16; POINT_STM_POINT_WORDS];

const HEAD_CAPACITY: usize = 61;
const BODY_CAPACITY: usize = 62;

fn gen_random_points(n: usize) -> Vec<Point> {
    let mut rng = rand::rng();
    (0..n).map(|_| rng.random()).collect()
}

fn point_frames(
    sender: &mut Sender,
    freq_div: u32,
    sound_speed: u32,
    points: &[Point],
) -> Vec<TxMessage> {
    let (head, rest) = points.split_at(points.len().min(HEAD_CAPACITY));
    let bodies: Vec<&[Point]> = rest.chunks(BODY_CAPACITY).collect();

    let flag = |begin: bool, end: bool| {
        let mut flag = CPUControlFlags::WRITE_BODY;
        flag.set(CPUControlFlags::STM_BEGIN, begin);
        flag.set(CPUControlFlags::STM_END, end);
        flag
    };

    let mut tx = sender.frame(FPGAControlFlags::OP_MODE, flag(true, bodies.is_empty()));
    let d = tx.body.data_mut();
    d[0] = head.len() as u16;
    d[1] = freq_div as u16;
    d[2] = (freq_div >> 16) as u16;
    d[3] = sound_speed as u16;
    d[4] = (sound_speed >> 16) as u16;
    head.iter().enumerate().for_each(|(i, p)| {
        d[5 + i * POINT_STM_POINT_WORDS..5 + (i + 1) * POINT_STM_POINT_WORDS].copy_from_slice(p)
    });

    std::iter::once(tx)
        .chain(bodies.iter().enumerate().map(|(i, chunk)| {
            let mut tx = sender.frame(
                FPGAControlFlags::OP_MODE,
                flag(false, i == bodies.len() - 1),
            );
            let d = tx.body.data_mut();
            d[0] = chunk.len() as u16;
            chunk.iter().enumerate().for_each(|(j, p)| {
                d[1 + j * POINT_STM_POINT_WORDS..1 + (j + 1) * POINT_STM_POINT_WORDS]
                    .copy_from_slice(p)
            });
            tx
        }))
        .collect()
}

#[test]
fn write_point_stm_head_and_body() -> anyhow::Result<()> {
    let mut cpu = CPUEmulator::new();
    let mut sender = Sender::new();

    let points: [Point; 4] = [
        [0x0001, 0x0002, 0x0003, 0x0004],
        [0x0011, 0x0012, 0x0013, 0x0014],
        [0x0021, 0x0022, 0x0023, 0x0024],
        [0x0031, 0x0032, 0x0033, 0x0034],
    ];

    let mut head = sender.frame(
        FPGAControlFlags::OP_MODE,
        CPUControlFlags::WRITE_BODY | CPUControlFlags::STM_BEGIN,
    );
    let d = head.body.data_mut();
    d[0] = 2;
    d[1] = 1000;
    d[2] = 0x0000;
    d[3] = 0x0000;
    d[4] = 0x0001;
    d[5..9].copy_from_slice(&points[0]);
    d[9..13].copy_from_slice(&points[1]);
    send(&mut cpu, &head)?;
    assert_eq!(2, cpu.stm_cycle());

    let mut body = sender.frame(
        FPGAControlFlags::OP_MODE,
        CPUControlFlags::WRITE_BODY | CPUControlFlags::STM_END,
    );
    let d = body.body.data_mut();
    d[0] = 2;
    d[1..5].copy_from_slice(&points[2]);
    d[5..9].copy_from_slice(&points[3]);
    send(&mut cpu, &body)?;

    assert!(cpu.fpga().is_stm_mode());
    assert!(!cpu.fpga().is_stm_gain_mode());
    assert_eq!(1000, cpu.fpga().stm_freq_division());
    assert_eq!(0x0001_0000, cpu.fpga().sound_speed());
    assert_eq!(4, cpu.stm_cycle());
    assert_eq!(4, cpu.fpga().stm_cycle());
    assert_eq!(points.to_vec(), cpu.fpga().point_stm());
    Ok(())
}

#[rstest::rstest]
#[test]
#[case(1)]
#[case(HEAD_CAPACITY)]
#[case(HEAD_CAPACITY + 1)]
#[case(1000)]
fn write_point_stm(#[case] n: usize) -> anyhow::Result<()> {
    let mut cpu = CPUEmulator::new();
    let mut sender = Sender::new();
    let mut rng = rand::rng();

    let freq_div: u32 = rng.random();
    let sound_speed: u32 = rng.random();
    let points = gen_random_points(n);
    point_frames(&mut sender, freq_div, sound_speed, &points)
        .iter()
        .try_for_each(|tx| send(&mut cpu, tx).map(|_| ()))?;

    assert_eq!(freq_div, cpu.fpga().stm_freq_division());
    assert_eq!(sound_speed, cpu.fpga().sound_speed());
    assert_eq!(n, cpu.fpga().stm_cycle());
    assert_eq!(points, cpu.fpga().point_stm());
    Ok(())
}

#[test]
fn write_point_stm_across_segment() -> anyhow::Result<()> {
    let mut cpu = CPUEmulator::new();
    let mut sender = Sender::new();

    let n = POINT_STM_BUF_SEGMENT_SIZE as usize * 2 + 100;
    let points = gen_random_points(n);
    point_frames(&mut sender, 512, 340 * 1024, &points)
        .iter()
        .try_for_each(|tx| send(&mut cpu, tx).map(|_| ()))?;

    assert_eq!(2, cpu.fpga().stm_addr_offset());
    assert_eq!(n, cpu.fpga().stm_cycle());
    assert_eq!(points, cpu.fpga().point_stm());
    Ok(())
}

#[test]
fn write_point_stm_oversized() -> anyhow::Result<()> {
    let mut cpu = CPUEmulator::new();
    let mut sender = Sender::new();

    let mut tx = sender.frame(
        FPGAControlFlags::OP_MODE,
        CPUControlFlags::WRITE_BODY | CPUControlFlags::STM_BEGIN | CPUControlFlags::STM_END,
    );
    tx.body.data_mut()[0] = 100;
    send(&mut cpu, &tx)?;

    assert_eq!(HEAD_CAPACITY as u32, cpu.stm_cycle());
    Ok(())
}

#[test]
fn restart_point_stm() -> anyhow::Result<()> {
    let mut cpu = CPUEmulator::new();
    let mut sender = Sender::new();

    point_frames(
        &mut sender,
        512,
        0,
        &gen_random_points(POINT_STM_BUF_SEGMENT_SIZE as usize + 1),
    )
    .iter()
    .try_for_each(|tx| send(&mut cpu, tx).map(|_| ()))?;
    assert_eq!(1, cpu.fpga().stm_addr_offset());

    let points = gen_random_points(10);
    point_frames(&mut sender, 512, 0, &points)
        .iter()
        .try_for_each(|tx| send(&mut cpu, tx).map(|_| ()))?;
    assert_eq!(0, cpu.fpga().stm_addr_offset());
    assert_eq!(points, cpu.fpga().point_stm());
    Ok(())
}
