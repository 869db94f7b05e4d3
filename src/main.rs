use anyhow::{anyhow, Context, Result};
use clap::{App, Arg};
use log::{info, warn};

use sm83::{image, RunState, CPU};

/// Parse an address given in hex (`0x` prefix) or decimal.
fn parse_addr(s: &str) -> Result<u16> {
  let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
    Some(hex) => u16::from_str_radix(hex, 16),
    None => s.parse(),
  };
  parsed.with_context(|| format!("invalid address: {}", s))
}

/// Step `cpu` until it leaves the running state or `max_steps` instructions
/// have run. Return the number of instructions executed.
fn drive(cpu: &mut CPU, max_steps: Option<u64>) -> Result<u64> {
  let mut steps: u64 = 0;
  while cpu.state() == RunState::Running &&
    max_steps.map_or(true, |max| steps < max)
  {
    cpu
      .step()
      .with_context(|| format!("fault after {} instructions: {}", steps, cpu.regs))?;
    steps += 1;
  }
  Ok(steps)
}

fn main() -> Result<()> {
  env_logger::init().map_err(|e| anyhow!("failed to set up logging: {}", e))?;

  let matches = App::new("sm83")
    .version(env!("CARGO_PKG_VERSION"))
    .about("Run a program image on the SM83 instruction engine")
    .arg(
      Arg::with_name("image")
        .help("Program image to load")
        .required(true)
        .index(1),
    )
    .arg(
      Arg::with_name("origin")
        .long("origin")
        .takes_value(true)
        .value_name("ADDR")
        .default_value("0x0000")
        .help("Address the image is loaded at"),
    )
    .arg(
      Arg::with_name("skip-boot")
        .long("skip-boot")
        .help("Start executing at 0x0100 instead of 0x0000"),
    )
    .arg(
      Arg::with_name("max-steps")
        .long("max-steps")
        .takes_value(true)
        .value_name("N")
        .help("Stop after N instructions"),
    )
    .get_matches();

  let path = matches
    .value_of("image")
    .ok_or_else(|| anyhow!("no image given"))?;
  let origin = parse_addr(matches.value_of("origin").unwrap_or("0"))?;
  let max_steps = match matches.value_of("max-steps") {
    Some(n) => Some(
      n.parse::<u64>()
        .with_context(|| format!("invalid step count: {}", n))?,
    ),
    None => None,
  };

  let mut cpu = CPU::new();
  let bytes = image::read(path)?;
  image::install(&mut cpu, origin, &bytes)?;
  if matches.is_present("skip-boot") {
    cpu.skip_boot();
  }

  let steps = drive(&mut cpu, max_steps)?;

  match cpu.state() {
    RunState::Running => warn!("step limit reached after {} instructions", steps),
    state => info!("{:?} after {} instructions", state, steps),
  }
  println!("{}", cpu.regs);
  println!(
    "cycles={} ime={} state={:?}",
    cpu.cycles(),
    cpu.ime,
    cpu.state()
  );
  Ok(())
}
