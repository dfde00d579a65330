//! ARM7TDMI interpreter and directly-coupled address bus for a Game Boy
//! Advance emulator core. The crate exposes exactly two public types:
//! [`Cpu`], the ARMv4T interpreter, and [`Bus`], the flat address space it
//! reads opcodes and data from. Everything else a full emulator needs —
//! graphics, audio, DMA, timers, input, BIOS semantics, ROM loading — is a
//! driver-level concern outside this crate.

mod bus;
mod cpu;

pub use bus::{Bus, BusError};
pub use cpu::{Cpu, CpsrFlags, Mode};
