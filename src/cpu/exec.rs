use log::debug;

use crate::cpu::alu;
use crate::cpu::decode::{AluOp, Indirect, Instruction, ShiftOp, Target};
use crate::cpu::CPU;
use crate::mem::HIGH_PAGE;

/// Machine cycles for an operand that costs `reg` on a register and `mem` on
/// the (HL) cell.
fn cost(t: Target, reg: u32, mem: u32) -> u32 {
  if t == Target::HlInd {
    mem
  } else {
    reg
  }
}

impl CPU {
  fn read_target(&self, t: Target) -> u8 {
    match t.reg() {
      Some(r) => self.regs.get(r),
      None => self.mem.rb(self.regs.hl()),
    }
  }

  fn write_target(&mut self, t: Target, value: u8) {
    match t.reg() {
      Some(r) => self.regs.set(r, value),
      None => self.mem.wb(self.regs.hl(), value),
    }
  }

  /// Resolve a (rr) operand, applying the HL post-increment/decrement.
  fn indirect_addr(&mut self, ind: Indirect) -> u16 {
    match ind {
      Indirect::BC => self.regs.bc(),
      Indirect::DE => self.regs.de(),
      Indirect::HLI => {
        let hl = self.regs.hl();
        self.regs.hl_inc();
        hl
      }
      Indirect::HLD => {
        let hl = self.regs.hl();
        self.regs.hl_dec();
        hl
      }
    }
  }

  fn alu_op(&mut self, op: AluOp, n: u8) {
    let a = self.regs.a;
    let c = self.regs.c();
    let (result, f) = match op {
      AluOp::Add => alu::add(a, n, false),
      AluOp::Adc => alu::add(a, n, c),
      AluOp::Sub => alu::sub(a, n, false),
      AluOp::Sbc => alu::sub(a, n, c),
      AluOp::And => alu::and(a, n),
      AluOp::Xor => alu::xor(a, n),
      AluOp::Or => alu::or(a, n),
      AluOp::Cp => (a, alu::cp(a, n)),
    };
    self.regs.a = result;
    self.regs.f = f;
  }

  fn shift_op(&mut self, op: ShiftOp, n: u8) -> u8 {
    let f = self.regs.f;
    let (result, f) = match op {
      ShiftOp::Rlc => alu::rlc(n),
      ShiftOp::Rrc => alu::rrc(n),
      ShiftOp::Rl => alu::rl(f, n),
      ShiftOp::Rr => alu::rr(f, n),
      ShiftOp::Sla => alu::sla(n),
      ShiftOp::Sra => alu::sra(n),
      ShiftOp::Swap => alu::swap(n),
      ShiftOp::Srl => alu::srl(n),
    };
    self.regs.f = f;
    result
  }

  /// Execute a decoded instruction whose opcode bytes have been fetched.
  /// Return the m-time taken, prefix fetch included.
  pub(crate) fn execute(&mut self, instr: Instruction) -> u32 {
    use self::Instruction::*;

    match instr {
      Nop => 1,
      Stop => {
        // STOP is followed by a padding byte.
        self.bump();
        self.stop = true;
        debug!("STOP at 0x{:04x}", self.regs.pc.wrapping_sub(2));
        1
      }
      Halt => {
        self.halt = true;
        debug!("HALT at 0x{:04x}", self.regs.pc.wrapping_sub(1));
        1
      }
      Di => {
        self.ime = false;
        debug!("interrupts disabled");
        1
      }
      Ei => {
        self.ime = true;
        debug!("interrupts enabled");
        1
      }

      Ld(dst, src) => {
        let value = self.read_target(src);
        self.write_target(dst, value);
        if dst == Target::HlInd || src == Target::HlInd {
          2
        } else {
          1
        }
      }
      LdImm(dst) => {
        let n = self.bump();
        self.write_target(dst, n);
        cost(dst, 2, 3)
      }
      LdImm16(rr) => {
        let nn = self.read_u16_le();
        self.regs.set_pair(rr, nn);
        3
      }
      StoreA(ind) => {
        let addr = self.indirect_addr(ind);
        self.mem.wb(addr, self.regs.a);
        2
      }
      LoadA(ind) => {
        let addr = self.indirect_addr(ind);
        self.regs.a = self.mem.rb(addr);
        2
      }
      StoreSp => {
        let nn = self.read_u16_le();
        self.mem.ww(nn, self.regs.sp);
        5
      }
      StoreHigh => {
        let n = self.bump();
        self.mem.wb(HIGH_PAGE | u16::from(n), self.regs.a);
        3
      }
      LoadHigh => {
        let n = self.bump();
        self.regs.a = self.mem.rb(HIGH_PAGE | u16::from(n));
        3
      }
      StoreHighC => {
        self.mem.wb(HIGH_PAGE | u16::from(self.regs.c), self.regs.a);
        2
      }
      LoadHighC => {
        self.regs.a = self.mem.rb(HIGH_PAGE | u16::from(self.regs.c));
        2
      }
      StoreAbs => {
        let nn = self.read_u16_le();
        self.mem.wb(nn, self.regs.a);
        4
      }
      LoadAbs => {
        let nn = self.read_u16_le();
        self.regs.a = self.mem.rb(nn);
        4
      }
      LdSpHl => {
        self.regs.sp = self.regs.hl();
        2
      }
      LdHlSp => {
        let e = self.bump();
        let (result, f) = alu::add_sp(self.regs.sp, e);
        self.regs.set_hl(result);
        self.regs.f = f;
        3
      }

      Inc(t) => {
        let (result, f) = alu::inc(self.regs.f, self.read_target(t));
        self.write_target(t, result);
        self.regs.f = f;
        cost(t, 1, 3)
      }
      Dec(t) => {
        let (result, f) = alu::dec(self.regs.f, self.read_target(t));
        self.write_target(t, result);
        self.regs.f = f;
        cost(t, 1, 3)
      }
      Inc16(rr) => {
        let value = self.regs.pair(rr).wrapping_add(1);
        self.regs.set_pair(rr, value);
        2
      }
      Dec16(rr) => {
        let value = self.regs.pair(rr).wrapping_sub(1);
        self.regs.set_pair(rr, value);
        2
      }
      AddHl(rr) => {
        let (result, f) =
          alu::add16(self.regs.f, self.regs.hl(), self.regs.pair(rr));
        self.regs.set_hl(result);
        self.regs.f = f;
        2
      }
      AddSp => {
        let e = self.bump();
        let (result, f) = alu::add_sp(self.regs.sp, e);
        self.regs.sp = result;
        self.regs.f = f;
        4
      }

      Rlca => {
        let (a, f) = alu::rlca(self.regs.a);
        self.regs.a = a;
        self.regs.f = f;
        1
      }
      Rrca => {
        let (a, f) = alu::rrca(self.regs.a);
        self.regs.a = a;
        self.regs.f = f;
        1
      }
      Rla => {
        let (a, f) = alu::rla(self.regs.f, self.regs.a);
        self.regs.a = a;
        self.regs.f = f;
        1
      }
      Rra => {
        let (a, f) = alu::rra(self.regs.f, self.regs.a);
        self.regs.a = a;
        self.regs.f = f;
        1
      }
      Daa => {
        let (a, f) = alu::daa(self.regs.a, self.regs.f);
        self.regs.a = a;
        self.regs.f = f;
        1
      }
      Cpl => {
        let (a, f) = alu::cpl(self.regs.a, self.regs.f);
        self.regs.a = a;
        self.regs.f = f;
        1
      }
      Scf => {
        self.regs.f = alu::scf(self.regs.f);
        1
      }
      Ccf => {
        self.regs.f = alu::ccf(self.regs.f);
        1
      }

      Alu(op, t) => {
        let n = self.read_target(t);
        self.alu_op(op, n);
        cost(t, 1, 2)
      }
      AluImm(op) => {
        let n = self.bump();
        self.alu_op(op, n);
        2
      }

      Jr(cc) => self.jr(cc),
      Jp(cc) => self.jp(cc),
      JpHl => {
        self.regs.pc = self.regs.hl();
        1
      }
      Call(cc) => self.call_cc(cc),
      Ret(cc) => self.ret_cc(cc),
      Reti => {
        self.ret();
        self.ime = true;
        4
      }
      Rst(vector) => self.rst(vector),
      Push(rr) => {
        let value = self.regs.pair(rr);
        self.push(value);
        4
      }
      Pop(rr) => {
        let value = self.pop();
        self.regs.set_pair(rr, value);
        3
      }

      Shift(op, t) => {
        let n = self.read_target(t);
        let result = self.shift_op(op, n);
        self.write_target(t, result);
        cost(t, 2, 4)
      }
      Bit(b, t) => {
        self.regs.f = alu::bit(self.regs.f, b, self.read_target(t));
        cost(t, 2, 3)
      }
      Res(b, t) => {
        let result = alu::res(b, self.read_target(t));
        self.write_target(t, result);
        cost(t, 2, 4)
      }
      Set(b, t) => {
        let result = alu::set(b, self.read_target(t));
        self.write_target(t, result);
        cost(t, 2, 4)
      }

      // Resolved by the fetch loop before dispatch.
      Prefix | Invalid => unreachable!("{} reached dispatch", instr),
    }
  }
}
