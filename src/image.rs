//! Program images: raw bytes copied onto the bus before execution starts.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use log::info;

use crate::cpu::CPU;
use crate::mem::MEM_SIZE;

/// Read a program image from disk.
pub fn read<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
  let path = path.as_ref();
  let bytes = fs::read(path)
    .with_context(|| format!("failed to read image {}", path.display()))?;
  if bytes.is_empty() {
    bail!("image {} is empty", path.display());
  }
  Ok(bytes)
}

/// Copy `image` onto the bus starting at `origin`.
/// The image must fit below the top of the address space.
pub fn install(cpu: &mut CPU, origin: u16, image: &[u8]) -> Result<()> {
  let room = MEM_SIZE - origin as usize;
  if image.len() > room {
    bail!(
      "image of {} bytes does not fit at 0x{:04x} ({} bytes free)",
      image.len(),
      origin,
      room
    );
  }
  cpu.mem.load(origin, image);
  info!("loaded {} bytes at 0x{:04x}", image.len(), origin);
  Ok(())
}
