use std::fmt;

/// Faults raised by the execution engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
  /// Dispatch reached an opcode slot the hardware leaves undefined.
  ///
  /// `addr` is the address the offending byte was fetched from.
  InvalidOpcode { addr: u16, opcode: u8 },
}

impl fmt::Display for Error {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match *self {
      Error::InvalidOpcode { addr, opcode } => {
        write!(f, "invalid opcode 0x{:02x} at 0x{:04x}", opcode, addr)
      }
    }
  }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
