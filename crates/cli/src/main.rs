use std::path::PathBuf;

use clap::Parser;
use eyre_pretty::eyre::Result;
use tracing::info;
use xenon_cpu::{Memory, Settings, Vm};
use xex::LoadedImage;

/// Runs a raw big-endian PowerPC image against the xenon-cpu interpreter.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct CliArgs {
    /// Path to the already-extracted image data to load.
    input: PathBuf,
    /// Virtual address the image's first byte is mapped to.
    #[arg(long, value_parser = parse_hex_u32, default_value = "0x82000000")]
    base_address: u32,
    /// Offset subtracted from `base_address` to get the image's backing
    /// base (`xex_base = base_address - pe_data_offset`).
    #[arg(long, value_parser = parse_hex_u32, default_value = "0x0")]
    pe_data_offset: u32,
    /// Upper bound on executed instructions, to keep a runaway or
    /// non-terminating image from hanging the CLI.
    #[arg(long, default_value_t = 1_000_000)]
    max_steps: u64,
    /// Panic instead of halting on an unrecognized opcode.
    #[arg(long, default_value_t = false)]
    strict: bool,
}

fn parse_hex_u32(s: &str) -> Result<u32, std::num::ParseIntError> {
    u32::from_str_radix(s.trim_start_matches("0x"), 16)
}

fn setup_tracing() -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let (stderr, guard) = tracing_appender::non_blocking(std::io::stderr());
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or(EnvFilter::new("xenon_cli=trace,xenon_cpu=trace,xex=trace"));

    let layer = fmt::layer().with_writer(stderr).with_ansi(true);
    tracing_subscriber::registry().with(layer).with(env_filter).init();

    guard
}

fn main() -> Result<()> {
    eyre_pretty::install()?;
    let args = CliArgs::parse();
    let _tracing_guard = setup_tracing();

    info!(path = %args.input.display(), "loading image");
    let loaded = LoadedImage::from_file(&args.input, args.base_address, args.pe_data_offset)?;

    let settings = Settings { panic_on_unknown_opcode: args.strict, ..Settings::default() };
    let mem = Memory::new(loaded.image, loaded.base_address, loaded.pe_data_offset, settings.initial_stack_capacity);
    let mut vm = Vm::new(mem, settings);

    info!(max_steps = args.max_steps, "running");
    let steps = vm.run_bounded(args.max_steps);
    let halted = steps < args.max_steps;

    info!(steps, halted, iar = vm.regs.iar, "stopped");
    for (i, value) in vm.regs.gpr.iter().enumerate() {
        if *value != 0 {
            println!("r{i} = {value:#x}");
        }
    }
    println!("lr  = {:#x}", vm.regs.lr);
    println!("ctr = {:#x}", vm.regs.ctr);

    Ok(())
}
