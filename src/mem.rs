use std::fmt;

/// Size of the flat address space.
pub const MEM_SIZE: usize = 0x10000;

/// Base of the high-RAM I/O window used by the `LDH` family.
pub const HIGH_PAGE: u16 = 0xff00;

/// Flat 64 KiB byte-addressable bus.
///
/// Every 16-bit address maps onto exactly one byte, so reads and writes are
/// total. What lives behind 0xff00-0xffff is up to whoever drives the bus.
///
/// The backing store is on the heap and always exactly `MEM_SIZE` long.
pub struct Memory {
  bytes: Box<[u8]>,
}

impl Memory {
  pub fn new() -> Memory {
    Memory {
      bytes: vec![0; MEM_SIZE].into_boxed_slice(),
    }
  }

  /// Read a byte at address `addr`.
  pub fn rb(&self, addr: u16) -> u8 {
    self.bytes[addr as usize]
  }

  /// Write `value` at address `addr`.
  pub fn wb(&mut self, addr: u16, value: u8) {
    self.bytes[addr as usize] = value;
  }

  /// Read a 2-byte little-endian word from `addr`.
  pub fn rw(&self, addr: u16) -> u16 {
    let lo = u16::from(self.rb(addr));
    let hi = u16::from(self.rb(addr.wrapping_add(1)));
    (hi << 8) | lo
  }

  /// Write a 2-byte little-endian word to `addr`.
  pub fn ww(&mut self, addr: u16, value: u16) {
    self.wb(addr, (value & 0xff) as u8);
    self.wb(addr.wrapping_add(1), (value >> 8) as u8);
  }

  /// Write an arbitrary number of bytes to memory, wrapping past 0xffff.
  pub fn load(&mut self, addr: u16, values: &[u8]) {
    let mut cur = addr;
    for v in values {
      self.wb(cur, *v);
      cur = cur.wrapping_add(1);
    }
  }
}

impl Default for Memory {
  fn default() -> Memory {
    Memory::new()
  }
}

impl fmt::Debug for Memory {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("Memory").field("size", &MEM_SIZE).finish()
  }
}
