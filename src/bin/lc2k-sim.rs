use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use lc2k_rs::{CpuConfig, Simulator};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat { Text, Json }

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Run an LC-2K machine-code file on the lc2k-rs simulator"
)]
struct Opts {
    /// Machine-code file, one decimal word per line
    #[arg(value_name = "MACHINE_CODE")]
    input: String,
    /// Abandon the run after this many instructions
    #[arg(long, default_value_t = CpuConfig::default().max_steps)]
    max_steps: u64,
    /// Also print the final state as JSON after the trace
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Skip the per-instruction state dumps
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let opts = Opts::parse();
    let text = std::fs::read_to_string(&opts.input)
        .with_context(|| format!("error: can't open file {}", opts.input))?;

    let cfg = CpuConfig { max_steps: opts.max_steps, ..CpuConfig::default() };
    let mut sim = Simulator::new(cfg);
    sim.load_text(&text)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let result = sim.run(&mut out, !opts.quiet);
    out.flush()?;
    result?;

    if let OutputFormat::Json = opts.format {
        let json = serde_json::to_string_pretty(&sim.snapshot())?;
        writeln!(out, "{json}")?;
        out.flush()?;
    }

    Ok(())
}
