//! Flag-computing arithmetic and logic primitives.
//!
//! Every function is pure: it takes operand values (and the current F when
//! some flag is left unaffected) and returns the result together with the
//! new contents of F. Callers decide where the result lands.

use crate::cpu::reg::{self, flags};

fn carry(f: u8) -> bool {
  f & reg::C != 0
}

/// INC n. C unaffected.
pub fn inc(f: u8, n: u8) -> (u8, u8) {
  let result = n.wrapping_add(1);
  (result, flags(result == 0, false, n & 0xf == 0xf, carry(f)))
}

/// DEC n. C unaffected.
pub fn dec(f: u8, n: u8) -> (u8, u8) {
  let result = n.wrapping_sub(1);
  (result, flags(result == 0, true, n & 0xf == 0, carry(f)))
}

/// ADD/ADC. `carry_in` folds the old carry into the operand.
pub fn add(a: u8, n: u8, carry_in: bool) -> (u8, u8) {
  let c = u8::from(carry_in);
  let sum = u16::from(a) + u16::from(n) + u16::from(c);
  let result = sum as u8;
  let h = (a & 0xf) + (n & 0xf) + c > 0xf;
  (result, flags(result == 0, false, h, sum > 0xff))
}

/// SUB/SBC. `carry_in` folds the old carry into the operand.
pub fn sub(a: u8, n: u8, carry_in: bool) -> (u8, u8) {
  let c = u8::from(carry_in);
  let result = a.wrapping_sub(n).wrapping_sub(c);
  let h = (a & 0xf) < (n & 0xf) + c;
  let cy = u16::from(a) < u16::from(n) + u16::from(c);
  (result, flags(result == 0, true, h, cy))
}

/// CP n: the flags of `a - n`, with A left alone.
pub fn cp(a: u8, n: u8) -> u8 {
  flags(a == n, true, (a & 0xf) < (n & 0xf), a < n)
}

pub fn and(a: u8, n: u8) -> (u8, u8) {
  let result = a & n;
  (result, flags(result == 0, false, true, false))
}

pub fn or(a: u8, n: u8) -> (u8, u8) {
  let result = a | n;
  (result, flags(result == 0, false, false, false))
}

pub fn xor(a: u8, n: u8) -> (u8, u8) {
  let result = a ^ n;
  (result, flags(result == 0, false, false, false))
}

/// ADD HL,nn. Z unaffected; H out of bit 11, C out of bit 15.
pub fn add16(f: u8, hl: u16, n: u16) -> (u16, u8) {
  let result = hl.wrapping_add(n);
  let h = (hl & 0x0fff) + (n & 0x0fff) > 0x0fff;
  let c = u32::from(hl) + u32::from(n) > 0xffff;
  (result, flags(f & reg::Z != 0, false, h, c))
}

/// SP plus a signed displacement, as used by ADD SP,e and LD HL,SP+e.
///
/// Z and N are reset. H and C come from the unsigned addition of the low
/// byte of SP and the raw displacement byte.
pub fn add_sp(sp: u16, e: u8) -> (u16, u8) {
  let offset = e as i8 as i16 as u16;
  let result = sp.wrapping_add(offset);
  let h = (sp & 0x000f) + u16::from(e & 0xf) > 0x000f;
  let c = (sp & 0x00ff) + u16::from(e) > 0x00ff;
  (result, flags(false, false, h, c))
}

pub fn rlc(n: u8) -> (u8, u8) {
  let result = n.rotate_left(1);
  (result, flags(result == 0, false, false, n & 0x80 != 0))
}

pub fn rrc(n: u8) -> (u8, u8) {
  let result = n.rotate_right(1);
  (result, flags(result == 0, false, false, n & 0x01 != 0))
}

/// Rotate left through the carry flag.
pub fn rl(f: u8, n: u8) -> (u8, u8) {
  let result = (n << 1) | u8::from(carry(f));
  (result, flags(result == 0, false, false, n & 0x80 != 0))
}

/// Rotate right through the carry flag.
pub fn rr(f: u8, n: u8) -> (u8, u8) {
  let result = (n >> 1) | (u8::from(carry(f)) << 7);
  (result, flags(result == 0, false, false, n & 0x01 != 0))
}

pub fn sla(n: u8) -> (u8, u8) {
  let result = n << 1;
  (result, flags(result == 0, false, false, n & 0x80 != 0))
}

/// Arithmetic shift right: bit 7 is kept.
pub fn sra(n: u8) -> (u8, u8) {
  let result = (n >> 1) | (n & 0x80);
  (result, flags(result == 0, false, false, n & 0x01 != 0))
}

pub fn srl(n: u8) -> (u8, u8) {
  let result = n >> 1;
  (result, flags(result == 0, false, false, n & 0x01 != 0))
}

pub fn swap(n: u8) -> (u8, u8) {
  let result = n.rotate_left(4);
  (result, flags(result == 0, false, false, false))
}

// The accumulator rotates always reset Z, unlike their extended forms.

pub fn rlca(a: u8) -> (u8, u8) {
  let (result, f) = rlc(a);
  (result, f & !reg::Z)
}

pub fn rrca(a: u8) -> (u8, u8) {
  let (result, f) = rrc(a);
  (result, f & !reg::Z)
}

pub fn rla(f: u8, a: u8) -> (u8, u8) {
  let (result, f) = rl(f, a);
  (result, f & !reg::Z)
}

pub fn rra(f: u8, a: u8) -> (u8, u8) {
  let (result, f) = rr(f, a);
  (result, f & !reg::Z)
}

/// BIT b,n. Returns only the new flags; C unaffected.
pub fn bit(f: u8, b: u8, n: u8) -> u8 {
  flags(n & (1 << b) == 0, false, true, carry(f))
}

pub fn res(b: u8, n: u8) -> u8 {
  n & !(1 << b)
}

pub fn set(b: u8, n: u8) -> u8 {
  n | (1 << b)
}

/// Decimal-adjust A after a BCD add or subtract.
///
/// N is unaffected and selects the direction. After an addition the high
/// digit is corrected when C is set or A > 0x99 (which also sets C), and the
/// low digit when H is set or it exceeds 9. After a subtraction only the
/// incoming H and C select the corrections and C is left as it was.
pub fn daa(a: u8, f: u8) -> (u8, u8) {
  let n = f & reg::N != 0;
  let h = f & reg::H != 0;
  let mut c = carry(f);
  let mut result = a;

  if !n {
    if c || a > 0x99 {
      result = result.wrapping_add(0x60);
      c = true;
    }
    if h || (a & 0x0f) > 0x09 {
      result = result.wrapping_add(0x06);
    }
  } else {
    if c {
      result = result.wrapping_sub(0x60);
    }
    if h {
      result = result.wrapping_sub(0x06);
    }
  }

  (result, flags(result == 0, n, false, c))
}

/// CPL: complement A. Z and C unaffected.
pub fn cpl(a: u8, f: u8) -> (u8, u8) {
  (!a, (f & (reg::Z | reg::C)) | reg::N | reg::H)
}

pub fn scf(f: u8) -> u8 {
  (f & reg::Z) | reg::C
}

pub fn ccf(f: u8) -> u8 {
  (f & reg::Z) | (!f & reg::C)
}
