use std::fmt;

pub const Z: u8 = 0x80;
pub const N: u8 = 0x40;
pub const H: u8 = 0x20;
pub const C: u8 = 0x10;

/// Stack pointer value at power-on and after reset.
pub const SP_INIT: u16 = 0xfffe;

/// Pack the four flags into the layout of the F register.
pub fn flags(z: bool, n: bool, h: bool, c: bool) -> u8 {
  (if z { Z } else { 0 }) |
    (if n { N } else { 0 }) |
    (if h { H } else { 0 }) |
    (if c { C } else { 0 })
}

/// One of the eight 8-bit registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reg8 {
  A,
  B,
  C,
  D,
  E,
  F,
  H,
  L,
}

/// A 16-bit register: one of the four pair views, or SP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reg16 {
  AF,
  BC,
  DE,
  HL,
  SP,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registers {
  /// General-purpose registers.
  pub a: u8,
  pub b: u8,
  pub c: u8,
  pub d: u8,
  pub e: u8,
  pub f: u8, // Flag register.
  pub h: u8,
  pub l: u8,

  /// Program counter.
  pub pc: u16,

  /// Stack pointer.
  pub sp: u16,
}

impl Registers {
  pub fn new() -> Registers {
    Registers {
      a: 0,
      f: 0,
      b: 0,
      c: 0,
      d: 0,
      e: 0,
      h: 0,
      l: 0,

      sp: SP_INIT,
      pc: 0,
    }
  }

  pub fn af(&self) -> u16 {
    (u16::from(self.a) << 8) | u16::from(self.f)
  }
  pub fn bc(&self) -> u16 {
    (u16::from(self.b) << 8) | u16::from(self.c)
  }
  pub fn de(&self) -> u16 {
    (u16::from(self.d) << 8) | u16::from(self.e)
  }
  pub fn hl(&self) -> u16 {
    (u16::from(self.h) << 8) | u16::from(self.l)
  }

  /// F only keeps its top four bits.
  pub fn set_af(&mut self, value: u16) {
    self.a = (value >> 8) as u8;
    self.f = (value as u8) & 0xf0;
  }
  pub fn set_bc(&mut self, value: u16) {
    self.b = (value >> 8) as u8;
    self.c = value as u8;
  }
  pub fn set_de(&mut self, value: u16) {
    self.d = (value >> 8) as u8;
    self.e = value as u8;
  }
  pub fn set_hl(&mut self, value: u16) {
    self.h = (value >> 8) as u8;
    self.l = value as u8;
  }

  pub fn hl_inc(&mut self) {
    let hl = self.hl().wrapping_add(1);
    self.set_hl(hl);
  }
  pub fn hl_dec(&mut self) {
    let hl = self.hl().wrapping_sub(1);
    self.set_hl(hl);
  }

  pub fn get(&self, reg: Reg8) -> u8 {
    match reg {
      Reg8::A => self.a,
      Reg8::B => self.b,
      Reg8::C => self.c,
      Reg8::D => self.d,
      Reg8::E => self.e,
      Reg8::F => self.f,
      Reg8::H => self.h,
      Reg8::L => self.l,
    }
  }

  pub fn set(&mut self, reg: Reg8, value: u8) {
    match reg {
      Reg8::A => self.a = value,
      Reg8::B => self.b = value,
      Reg8::C => self.c = value,
      Reg8::D => self.d = value,
      Reg8::E => self.e = value,
      Reg8::F => self.f = value & 0xf0,
      Reg8::H => self.h = value,
      Reg8::L => self.l = value,
    }
  }

  pub fn pair(&self, reg: Reg16) -> u16 {
    match reg {
      Reg16::AF => self.af(),
      Reg16::BC => self.bc(),
      Reg16::DE => self.de(),
      Reg16::HL => self.hl(),
      Reg16::SP => self.sp,
    }
  }

  pub fn set_pair(&mut self, reg: Reg16, value: u16) {
    match reg {
      Reg16::AF => self.set_af(value),
      Reg16::BC => self.set_bc(value),
      Reg16::DE => self.set_de(value),
      Reg16::HL => self.set_hl(value),
      Reg16::SP => self.sp = value,
    }
  }

  pub fn z(&self) -> bool {
    //! Zero flag
    self.f & Z != 0
  }
  pub fn n(&self) -> bool {
    //! Subtract flag
    self.f & N != 0
  }
  pub fn h(&self) -> bool {
    //! Half carry flag
    self.f & H != 0
  }
  pub fn c(&self) -> bool {
    //! Carry flag
    self.f & C != 0
  }
}

impl Default for Registers {
  fn default() -> Registers {
    Registers::new()
  }
}

impl fmt::Display for Registers {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(
      f,
      "AF={:04x} BC={:04x} DE={:04x} HL={:04x} SP={:04x} PC={:04x} [{}{}{}{}]",
      self.af(),
      self.bc(),
      self.de(),
      self.hl(),
      self.sp,
      self.pc,
      if self.z() { 'Z' } else { '-' },
      if self.n() { 'N' } else { '-' },
      if self.h() { 'H' } else { '-' },
      if self.c() { 'C' } else { '-' },
    )
  }
}
