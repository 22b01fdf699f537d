use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use lc2k_asm::{assemble, write_machine_code, AsmError, AsmOptions};

#[derive(Parser, Debug)]
#[command(author, version, about = "Two-pass LC-2K assembler")]
struct Opts {
    /// Assembly source, one instruction per line
    #[arg(value_name = "ASSEMBLY_CODE")]
    input: PathBuf,
    /// Machine-code output, one decimal word per line
    #[arg(value_name = "MACHINE_CODE")]
    output: PathBuf,
    /// Fail without writing any words if a line does not assemble
    #[arg(long)]
    strict: bool,
    /// Export labels to JSON (Vec<{ addr, name }>)
    #[arg(long, value_name = "FILE")]
    symbols: Option<PathBuf>,
}

/// Filter used when `RUST_LOG` is unset: the per-line listing.
const DEFAULT_LOG: &str = "lc2k_asm=info";

fn log_filter(spec: Option<&str>) -> EnvFilter {
    spec.and_then(|s| EnvFilter::try_new(s).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .with_writer(io::stderr)
        .init();

    let opts = Opts::parse();
    let src = std::fs::read_to_string(&opts.input)
        .with_context(|| format!("error in opening {}", opts.input.display()))?;
    let file = File::create(&opts.output)
        .with_context(|| format!("error in opening {}", opts.output.display()))?;

    let asm = match assemble(&src, AsmOptions { strict: opts.strict }) {
        Ok(asm) => asm,
        Err(AsmError::Rejected { diagnostics }) => {
            for d in &diagnostics {
                eprintln!("{d}");
            }
            anyhow::bail!("{} line(s) failed to assemble", diagnostics.len());
        }
        Err(e) => return Err(e.into()),
    };
    for d in &asm.diagnostics {
        eprintln!("{d}");
    }

    let mut out = BufWriter::new(file);
    write_machine_code(&mut out, &asm.words)
        .with_context(|| format!("writing {}", opts.output.display()))?;
    out.flush()?;

    if let Some(path) = opts.symbols {
        let json = serde_json::to_string_pretty(&asm.labels.entries())?;
        std::fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    }

    Ok(())
}
