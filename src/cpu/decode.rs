//! Opcode decoding.
//!
//! Both opcode spaces are decoded once, at compile time, into two immutable
//! 256-slot tables of `Instruction`. Opcodes the hardware leaves undefined
//! decode to `Instruction::Invalid` so dispatch can fault on them.

use std::fmt;

use crate::cpu::reg::{Reg16, Reg8};

/// Opcode that selects the extended table.
pub const PREFIX: u8 = 0xcb;

/// 8-bit operand slot, in the order of the 3-bit register field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
  B,
  C,
  D,
  E,
  H,
  L,
  /// Memory cell addressed by HL.
  HlInd,
  A,
}

impl Target {
  /// The register this operand names, or `None` for (HL).
  pub fn reg(self) -> Option<Reg8> {
    match self {
      Target::B => Some(Reg8::B),
      Target::C => Some(Reg8::C),
      Target::D => Some(Reg8::D),
      Target::E => Some(Reg8::E),
      Target::H => Some(Reg8::H),
      Target::L => Some(Reg8::L),
      Target::HlInd => None,
      Target::A => Some(Reg8::A),
    }
  }
}

/// Memory operand of LD (rr),A and LD A,(rr).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indirect {
  BC,
  DE,
  /// (HL), then HL += 1.
  HLI,
  /// (HL), then HL -= 1.
  HLD,
}

/// Branch condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cond {
  NZ,
  Z,
  NC,
  C,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AluOp {
  Add,
  Adc,
  Sub,
  Sbc,
  And,
  Xor,
  Or,
  Cp,
}

/// Rotate/shift group of the extended table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftOp {
  Rlc,
  Rrc,
  Rl,
  Rr,
  Sla,
  Sra,
  Swap,
  Srl,
}

/// A decoded instruction. Immediate operands are not part of the decode;
/// they are fetched from the instruction stream during execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
  Nop,
  Stop,
  Halt,
  Di,
  Ei,

  /// LD r,r'
  Ld(Target, Target),
  /// LD r,n
  LdImm(Target),
  /// LD rr,nn
  LdImm16(Reg16),
  /// LD (rr),A
  StoreA(Indirect),
  /// LD A,(rr)
  LoadA(Indirect),
  /// LD (nn),SP
  StoreSp,
  /// LDH (n),A
  StoreHigh,
  /// LDH A,(n)
  LoadHigh,
  /// LD (C),A
  StoreHighC,
  /// LD A,(C)
  LoadHighC,
  /// LD (nn),A
  StoreAbs,
  /// LD A,(nn)
  LoadAbs,
  /// LD SP,HL
  LdSpHl,
  /// LD HL,SP+e
  LdHlSp,

  Inc(Target),
  Dec(Target),
  Inc16(Reg16),
  Dec16(Reg16),
  AddHl(Reg16),
  AddSp,

  Rlca,
  Rrca,
  Rla,
  Rra,
  Daa,
  Cpl,
  Scf,
  Ccf,

  /// ALU op on A with a register or (HL).
  Alu(AluOp, Target),
  /// ALU op on A with an immediate.
  AluImm(AluOp),

  Jr(Option<Cond>),
  Jp(Option<Cond>),
  JpHl,
  Call(Option<Cond>),
  Ret(Option<Cond>),
  Reti,
  Rst(u8),
  Push(Reg16),
  Pop(Reg16),

  /// Switch to the extended table for the next byte.
  Prefix,

  Shift(ShiftOp, Target),
  Bit(u8, Target),
  Res(u8, Target),
  Set(u8, Target),

  Invalid,
}

impl Instruction {
  /// Encoded length in bytes, counting the prefix for extended opcodes.
  pub fn size(&self) -> u16 {
    use self::Instruction::*;
    match *self {
      LdImm(_) | AluImm(_) | Jr(_) | StoreHigh | LoadHigh | AddSp |
      LdHlSp | Stop => 2,
      LdImm16(_) | StoreSp | StoreAbs | LoadAbs | Jp(_) | Call(_) => 3,
      Shift(..) | Bit(..) | Res(..) | Set(..) => 2,
      _ => 1,
    }
  }

  pub fn is_valid(&self) -> bool {
    *self != Instruction::Invalid
  }
}

const fn target(code: u8) -> Target {
  match code & 7 {
    0 => Target::B,
    1 => Target::C,
    2 => Target::D,
    3 => Target::E,
    4 => Target::H,
    5 => Target::L,
    6 => Target::HlInd,
    _ => Target::A,
  }
}

const fn rp(code: u8) -> Reg16 {
  match code & 3 {
    0 => Reg16::BC,
    1 => Reg16::DE,
    2 => Reg16::HL,
    _ => Reg16::SP,
  }
}

// PUSH/POP swap SP for AF.
const fn rp2(code: u8) -> Reg16 {
  match code & 3 {
    0 => Reg16::BC,
    1 => Reg16::DE,
    2 => Reg16::HL,
    _ => Reg16::AF,
  }
}

const fn indirect(code: u8) -> Indirect {
  match code & 3 {
    0 => Indirect::BC,
    1 => Indirect::DE,
    2 => Indirect::HLI,
    _ => Indirect::HLD,
  }
}

const fn cond(code: u8) -> Cond {
  match code & 3 {
    0 => Cond::NZ,
    1 => Cond::Z,
    2 => Cond::NC,
    _ => Cond::C,
  }
}

const fn alu_op(code: u8) -> AluOp {
  match code & 7 {
    0 => AluOp::Add,
    1 => AluOp::Adc,
    2 => AluOp::Sub,
    3 => AluOp::Sbc,
    4 => AluOp::And,
    5 => AluOp::Xor,
    6 => AluOp::Or,
    _ => AluOp::Cp,
  }
}

const fn shift_op(code: u8) -> ShiftOp {
  match code & 7 {
    0 => ShiftOp::Rlc,
    1 => ShiftOp::Rrc,
    2 => ShiftOp::Rl,
    3 => ShiftOp::Rr,
    4 => ShiftOp::Sla,
    5 => ShiftOp::Sra,
    6 => ShiftOp::Swap,
    _ => ShiftOp::Srl,
  }
}

/// Decode a byte of the primary opcode space.
pub const fn decode(op: u8) -> Instruction {
  use self::Instruction::*;

  // Bits 5-3 select a register, condition or ALU op; bits 5-4 a pair.
  let y = (op >> 3) & 7;
  let p = y >> 1;

  match op {
    0x00 => Nop,
    0x08 => StoreSp,
    0x10 => Stop,
    0x18 => Jr(None),
    0x20 | 0x28 | 0x30 | 0x38 => Jr(Some(cond(y))),
    0x01 | 0x11 | 0x21 | 0x31 => LdImm16(rp(p)),
    0x09 | 0x19 | 0x29 | 0x39 => AddHl(rp(p)),
    0x02 | 0x12 | 0x22 | 0x32 => StoreA(indirect(p)),
    0x0a | 0x1a | 0x2a | 0x3a => LoadA(indirect(p)),
    0x03 | 0x13 | 0x23 | 0x33 => Inc16(rp(p)),
    0x0b | 0x1b | 0x2b | 0x3b => Dec16(rp(p)),
    0x04 | 0x0c | 0x14 | 0x1c | 0x24 | 0x2c | 0x34 | 0x3c => Inc(target(y)),
    0x05 | 0x0d | 0x15 | 0x1d | 0x25 | 0x2d | 0x35 | 0x3d => Dec(target(y)),
    0x06 | 0x0e | 0x16 | 0x1e | 0x26 | 0x2e | 0x36 | 0x3e => LdImm(target(y)),
    0x07 => Rlca,
    0x0f => Rrca,
    0x17 => Rla,
    0x1f => Rra,
    0x27 => Daa,
    0x2f => Cpl,
    0x37 => Scf,
    0x3f => Ccf,

    // LD (HL),(HL) would sit here.
    0x76 => Halt,
    0x40..=0x7f => Ld(target(y), target(op)),
    0x80..=0xbf => Alu(alu_op(y), target(op)),

    0xc0 | 0xc8 | 0xd0 | 0xd8 => Ret(Some(cond(y))),
    0xc1 | 0xd1 | 0xe1 | 0xf1 => Pop(rp2(p)),
    0xc2 | 0xca | 0xd2 | 0xda => Jp(Some(cond(y))),
    0xc4 | 0xcc | 0xd4 | 0xdc => Call(Some(cond(y))),
    0xc5 | 0xd5 | 0xe5 | 0xf5 => Push(rp2(p)),
    0xc6 | 0xce | 0xd6 | 0xde | 0xe6 | 0xee | 0xf6 | 0xfe => AluImm(alu_op(y)),
    0xc7 | 0xcf | 0xd7 | 0xdf | 0xe7 | 0xef | 0xf7 | 0xff => Rst(y * 8),
    0xc3 => Jp(None),
    0xc9 => Ret(None),
    0xcb => Prefix,
    0xcd => Call(None),
    0xd9 => Reti,
    0xe0 => StoreHigh,
    0xe2 => StoreHighC,
    0xe8 => AddSp,
    0xe9 => JpHl,
    0xea => StoreAbs,
    0xf0 => LoadHigh,
    0xf2 => LoadHighC,
    0xf3 => Di,
    0xf8 => LdHlSp,
    0xf9 => LdSpHl,
    0xfa => LoadAbs,
    0xfb => Ei,

    // 0xd3 0xdb 0xdd 0xe3 0xe4 0xeb 0xec 0xed 0xf4 0xfc 0xfd
    _ => Invalid,
  }
}

/// Decode a byte of the extended (prefixed) opcode space.
pub const fn decode_extended(op: u8) -> Instruction {
  let y = (op >> 3) & 7;
  let t = target(op);
  match op >> 6 {
    0 => Instruction::Shift(shift_op(y), t),
    1 => Instruction::Bit(y, t),
    2 => Instruction::Res(y, t),
    _ => Instruction::Set(y, t),
  }
}

const fn primary_table() -> [Instruction; 256] {
  let mut table = [Instruction::Invalid; 256];
  let mut i = 0;
  while i < 256 {
    table[i] = decode(i as u8);
    i += 1;
  }
  table
}

const fn extended_table() -> [Instruction; 256] {
  let mut table = [Instruction::Invalid; 256];
  let mut i = 0;
  while i < 256 {
    table[i] = decode_extended(i as u8);
    i += 1;
  }
  table
}

/// Primary opcode space.
pub static PRIMARY: [Instruction; 256] = primary_table();

/// Extended opcode space, reached through `PREFIX`.
pub static EXTENDED: [Instruction; 256] = extended_table();

impl fmt::Display for Target {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    let s = match *self {
      Target::B => "B",
      Target::C => "C",
      Target::D => "D",
      Target::E => "E",
      Target::H => "H",
      Target::L => "L",
      Target::HlInd => "(HL)",
      Target::A => "A",
    };
    f.write_str(s)
  }
}

impl fmt::Display for Indirect {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    let s = match *self {
      Indirect::BC => "(BC)",
      Indirect::DE => "(DE)",
      Indirect::HLI => "(HL+)",
      Indirect::HLD => "(HL-)",
    };
    f.write_str(s)
  }
}

impl fmt::Display for Cond {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    let s = match *self {
      Cond::NZ => "NZ",
      Cond::Z => "Z",
      Cond::NC => "NC",
      Cond::C => "C",
    };
    f.write_str(s)
  }
}

impl fmt::Display for AluOp {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    let s = match *self {
      AluOp::Add => "ADD A,",
      AluOp::Adc => "ADC A,",
      AluOp::Sub => "SUB ",
      AluOp::Sbc => "SBC A,",
      AluOp::And => "AND ",
      AluOp::Xor => "XOR ",
      AluOp::Or => "OR ",
      AluOp::Cp => "CP ",
    };
    f.write_str(s)
  }
}

impl fmt::Display for ShiftOp {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    let s = match *self {
      ShiftOp::Rlc => "RLC",
      ShiftOp::Rrc => "RRC",
      ShiftOp::Rl => "RL",
      ShiftOp::Rr => "RR",
      ShiftOp::Sla => "SLA",
      ShiftOp::Sra => "SRA",
      ShiftOp::Swap => "SWAP",
      ShiftOp::Srl => "SRL",
    };
    f.write_str(s)
  }
}

fn pair_name(reg: Reg16) -> &'static str {
  match reg {
    Reg16::AF => "AF",
    Reg16::BC => "BC",
    Reg16::DE => "DE",
    Reg16::HL => "HL",
    Reg16::SP => "SP",
  }
}

fn with_cond(f: &mut fmt::Formatter, op: &str, cc: Option<Cond>, arg: &str) -> fmt::Result {
  match cc {
    Some(cc) if arg.is_empty() => write!(f, "{} {}", op, cc),
    Some(cc) => write!(f, "{} {},{}", op, cc, arg),
    None if arg.is_empty() => f.write_str(op),
    None => write!(f, "{} {}", op, arg),
  }
}

impl fmt::Display for Instruction {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    use self::Instruction::*;
    match *self {
      Nop => f.write_str("NOP"),
      Stop => f.write_str("STOP"),
      Halt => f.write_str("HALT"),
      Di => f.write_str("DI"),
      Ei => f.write_str("EI"),
      Ld(dst, src) => write!(f, "LD {},{}", dst, src),
      LdImm(dst) => write!(f, "LD {},n", dst),
      LdImm16(rr) => write!(f, "LD {},nn", pair_name(rr)),
      StoreA(ind) => write!(f, "LD {},A", ind),
      LoadA(ind) => write!(f, "LD A,{}", ind),
      StoreSp => f.write_str("LD (nn),SP"),
      StoreHigh => f.write_str("LDH (n),A"),
      LoadHigh => f.write_str("LDH A,(n)"),
      StoreHighC => f.write_str("LD (C),A"),
      LoadHighC => f.write_str("LD A,(C)"),
      StoreAbs => f.write_str("LD (nn),A"),
      LoadAbs => f.write_str("LD A,(nn)"),
      LdSpHl => f.write_str("LD SP,HL"),
      LdHlSp => f.write_str("LD HL,SP+e"),
      Inc(t) => write!(f, "INC {}", t),
      Dec(t) => write!(f, "DEC {}", t),
      Inc16(rr) => write!(f, "INC {}", pair_name(rr)),
      Dec16(rr) => write!(f, "DEC {}", pair_name(rr)),
      AddHl(rr) => write!(f, "ADD HL,{}", pair_name(rr)),
      AddSp => f.write_str("ADD SP,e"),
      Rlca => f.write_str("RLCA"),
      Rrca => f.write_str("RRCA"),
      Rla => f.write_str("RLA"),
      Rra => f.write_str("RRA"),
      Daa => f.write_str("DAA"),
      Cpl => f.write_str("CPL"),
      Scf => f.write_str("SCF"),
      Ccf => f.write_str("CCF"),
      Alu(op, t) => write!(f, "{}{}", op, t),
      AluImm(op) => write!(f, "{}n", op),
      Jr(cc) => with_cond(f, "JR", cc, "e"),
      Jp(cc) => with_cond(f, "JP", cc, "nn"),
      JpHl => f.write_str("JP HL"),
      Call(cc) => with_cond(f, "CALL", cc, "nn"),
      Ret(cc) => with_cond(f, "RET", cc, ""),
      Reti => f.write_str("RETI"),
      Rst(v) => write!(f, "RST {:02X}h", v),
      Push(rr) => write!(f, "PUSH {}", pair_name(rr)),
      Pop(rr) => write!(f, "POP {}", pair_name(rr)),
      Prefix => f.write_str("PREFIX CB"),
      Shift(op, t) => write!(f, "{} {}", op, t),
      Bit(b, t) => write!(f, "BIT {},{}", b, t),
      Res(b, t) => write!(f, "RES {},{}", b, t),
      Set(b, t) => write!(f, "SET {},{}", b, t),
      Invalid => f.write_str("???"),
    }
  }
}
