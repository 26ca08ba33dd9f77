//! In-memory emulator of the AUTD3 CPU firmware and the FPGA memories it writes.

pub mod cpu;
pub mod fpga;

pub use cpu::emulator::CPUEmulator;
pub use fpga::emulator::FPGAEmulator;
