use anyhow::{Context, Result};
use clap::Parser;
use std::fmt::Write as _;
use tracing_subscriber::EnvFilter;

use lc2k_rs::disasm::fmt_word;
use lc2k_rs::memory::parse_image;

#[derive(Parser, Debug)]
#[command(author, version, about = "LC-2K machine-code disassembler", long_about = None)]
struct Cli {
    /// Machine-code file, one decimal word per line
    #[arg(value_name = "MACHINE_CODE")]
    input: String,
    /// Show each word in hex as well
    #[arg(long)]
    hex: bool,
    /// Write the listing to a file instead of stdout
    #[arg(long, value_name = "FILE")]
    out: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let text = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("error: can't open file {}", cli.input))?;
    let words = parse_image(&text)?;

    let mut buf = String::new();
    for (addr, &w) in words.iter().enumerate() {
        if cli.hex {
            let _ = writeln!(buf, "{addr:>5}: {:#010x}  {}", w as u32, fmt_word(w));
        } else {
            let _ = writeln!(buf, "{addr:>5}: {w:>11}  {}", fmt_word(w));
        }
    }
    if let Some(path) = cli.out { std::fs::write(path, buf)?; } else { print!("{}", buf); }
    Ok(())
}
