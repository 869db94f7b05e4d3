pub mod alu;
mod cpu;
pub mod decode;
mod exec;
mod flow;
pub mod reg;


pub use self::cpu::{BOOT_EXIT, TICKS_PER_CYCLE};
pub use self::reg::Registers;

use crate::mem::Memory;

/// Coarse run state of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
  Running,
  /// HALT executed. Fetching pauses until `resume`.
  Halted,
  /// STOP executed. Fetching pauses until `resume`.
  Stopped,
}

#[derive(Debug)]
pub struct CPU {
  pub regs: Registers,
  pub mem: Memory,

  /// Interrupt master enable.
  pub ime: bool,

  halt: bool,
  stop: bool,

  /// Elapsed clock ticks.
  cycles: u64,
}
