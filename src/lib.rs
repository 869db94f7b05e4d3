//! Instruction-level emulator for the SM83, the 8-bit CPU of the classic
//! handheld console.
//!
//! The engine fetches, decodes and executes one instruction at a time against
//! a flat 64 KiB bus, keeping a running count of clock ticks. Loading images,
//! peripherals and interrupt delivery are left to the caller.

pub mod cpu;
mod error;
pub mod image;
pub mod mem;

pub use crate::cpu::{RunState, CPU};
pub use crate::error::{Error, Result};
pub use crate::mem::Memory;
