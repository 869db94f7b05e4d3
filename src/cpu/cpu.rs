use std::fmt;

use log::{debug, trace};

use crate::cpu::decode::{Instruction, EXTENDED, PRIMARY};
use crate::cpu::{Registers, RunState, CPU};
use crate::error::{Error, Result};
use crate::mem::Memory;

/// First address past the bootstrap region.
pub const BOOT_EXIT: u16 = 0x0100;

/// Clock ticks per machine cycle.
pub const TICKS_PER_CYCLE: u32 = 4;

impl CPU {
  pub fn new() -> CPU {
    CPU {
      regs: Registers::new(),
      mem: Memory::new(),
      ime: false,
      halt: false,
      stop: false,
      cycles: 0,
    }
  }

  /// Zero every register except SP, which goes back to 0xfffe, and clear
  /// halt and stop. Memory and the cycle counter are untouched.
  pub fn reset(&mut self) {
    debug!("reset at 0x{:04x}", self.regs.pc);
    self.regs = Registers::new();
    self.ime = false;
    self.halt = false;
    self.stop = false;
  }

  /// Start at the program entry instead of the bootstrap region.
  pub fn skip_boot(&mut self) {
    self.regs.pc = BOOT_EXIT;
  }

  /// Clock ticks elapsed since power-on.
  pub fn cycles(&self) -> u64 {
    self.cycles
  }

  pub fn state(&self) -> RunState {
    if self.stop {
      RunState::Stopped
    } else if self.halt {
      RunState::Halted
    } else {
      RunState::Running
    }
  }

  /// Leave the halted or stopped state, as an external interrupt would.
  pub fn resume(&mut self) {
    if self.halt || self.stop {
      debug!("resume at 0x{:04x} from {:?}", self.regs.pc, self.state());
    }
    self.halt = false;
    self.stop = false;
  }

  /// Run one instruction.
  /// Increment the cycle counter by the clock ticks taken and return them.
  /// While halted or stopped nothing is fetched and one machine cycle passes.
  pub fn step(&mut self) -> Result<u32> {
    let m = if self.state() == RunState::Running {
      self.exec()?
    } else {
      1
    };
    let t = m * TICKS_PER_CYCLE;
    self.cycles += u64::from(t);
    Ok(t)
  }

  /// Run until the CPU halts or stops.
  /// Return the clock ticks consumed.
  pub fn run(&mut self) -> Result<u64> {
    let start = self.cycles;
    while self.state() == RunState::Running {
      self.step()?;
    }
    Ok(self.cycles - start)
  }

  /// Run until at least `budget` clock ticks have passed, or the CPU leaves
  /// the running state. Return the clock ticks consumed.
  pub fn run_for(&mut self, budget: u64) -> Result<u64> {
    let start = self.cycles;
    while self.state() == RunState::Running && self.cycles - start < budget {
      self.step()?;
    }
    Ok(self.cycles - start)
  }

  /// Return the next byte at the program counter,
  /// and increment the program counter.
  pub(crate) fn bump(&mut self) -> u8 {
    let result = self.mem.rb(self.regs.pc);
    self.regs.pc = self.regs.pc.wrapping_add(1);
    result
  }

  pub(crate) fn read_u16_le(&mut self) -> u16 {
    let a = self.bump();
    let b = self.bump();
    u16::from(a) | (u16::from(b) << 8)
  }

  /// Fetch and decode the next opcode, then execute it.
  /// Return the m-time taken to run that opcode.
  fn exec(&mut self) -> Result<u32> {
    let addr = self.regs.pc;
    let opcode = self.bump();
    let (instr, ext) = match PRIMARY[opcode as usize] {
      Instruction::Prefix => {
        let ext = self.bump();
        (EXTENDED[ext as usize], Some(ext))
      }
      instr => (instr, None),
    };
    if !instr.is_valid() {
      self.regs.pc = addr;
      return Err(Error::InvalidOpcode { addr, opcode });
    }
    trace!(
      "0x{:04x}: {} {} {}",
      addr,
      Encoding { opcode, ext },
      instr,
      self.regs
    );
    Ok(self.execute(instr))
  }
}

/// Raw opcode bytes of one instruction, as shown in traces.
struct Encoding {
  opcode: u8,
  ext: Option<u8>,
}

impl fmt::Display for Encoding {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self.ext {
      Some(ext) => write!(f, "{:02x} {:02x}", self.opcode, ext),
      None => write!(f, "{:02x}   ", self.opcode),
    }
  }
}

impl Default for CPU {
  fn default() -> CPU {
    CPU::new()
  }
}
