//! Stack and branch primitives.
//!
//! The conditional forms return the machine cycles of the path taken. Operand
//! bytes are always consumed, whether or not the branch is taken.

use crate::cpu::decode::Cond;
use crate::cpu::CPU;

impl CPU {
  /// Push `value`: high byte at SP-1, low byte at SP-2.
  pub fn push(&mut self, value: u16) {
    self.regs.sp = self.regs.sp.wrapping_sub(1);
    self.mem.wb(self.regs.sp, (value >> 8) as u8);
    self.regs.sp = self.regs.sp.wrapping_sub(1);
    self.mem.wb(self.regs.sp, value as u8);
  }

  /// Pop the word at SP, low byte first.
  pub fn pop(&mut self) -> u16 {
    let lo = self.mem.rb(self.regs.sp);
    let hi = self.mem.rb(self.regs.sp.wrapping_add(1));
    self.regs.sp = self.regs.sp.wrapping_add(2);
    (u16::from(hi) << 8) | u16::from(lo)
  }

  pub(crate) fn condition(&self, cc: Option<Cond>) -> bool {
    match cc {
      None => true,
      Some(Cond::NZ) => !self.regs.z(),
      Some(Cond::Z) => self.regs.z(),
      Some(Cond::NC) => !self.regs.c(),
      Some(Cond::C) => self.regs.c(),
    }
  }

  /// Push the return address (the current PC) and jump to `target`.
  pub(crate) fn call(&mut self, target: u16) {
    let retaddr = self.regs.pc;
    self.push(retaddr);
    self.regs.pc = target;
  }

  pub(crate) fn ret(&mut self) {
    self.regs.pc = self.pop();
  }

  /// JP [cc,]nn
  pub(crate) fn jp(&mut self, cc: Option<Cond>) -> u32 {
    let target = self.read_u16_le();
    if self.condition(cc) {
      self.regs.pc = target;
      4
    } else {
      3
    }
  }

  /// JR [cc,]e. The displacement is relative to the byte after it.
  pub(crate) fn jr(&mut self, cc: Option<Cond>) -> u32 {
    let e = self.bump() as i8;
    if self.condition(cc) {
      self.regs.pc = self.regs.pc.wrapping_add(e as u16);
      3
    } else {
      2
    }
  }

  /// CALL [cc,]nn
  pub(crate) fn call_cc(&mut self, cc: Option<Cond>) -> u32 {
    let target = self.read_u16_le();
    if self.condition(cc) {
      self.call(target);
      6
    } else {
      3
    }
  }

  /// RET [cc]. The conditional form costs one extra cycle when taken.
  pub(crate) fn ret_cc(&mut self, cc: Option<Cond>) -> u32 {
    match cc {
      None => {
        self.ret();
        4
      }
      Some(_) if self.condition(cc) => {
        self.ret();
        5
      }
      Some(_) => 2,
    }
  }

  /// RST n: call one of the fixed vectors 0x00, 0x08, ..., 0x38.
  pub(crate) fn rst(&mut self, vector: u8) -> u32 {
    self.call(u16::from(vector));
    4
  }
}
