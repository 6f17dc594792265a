use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, bail};
use clap::Parser;
use rust_qrgen::config::{self, DEFAULT_OUTPUT_FILE};
use rust_qrgen::tools::{init_tracing, save_png};
use rust_qrgen::{EcLevel, EncodeOptions, encode_with, render_to_fit};
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "qrgen",
    version,
    about = "Encode one line of text into a QR code PNG"
)]
struct Cli {
    /// Text to encode; one line is read from stdin when omitted
    #[arg(long, short)]
    text: Option<String>,
    /// Output file
    #[arg(long, short, default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,
    /// Output side in pixels [default: QR_OUTPUT_SIZE or 500]
    #[arg(long)]
    size: Option<u32>,
    /// Error correction level: L, M, Q or H [default: QR_DEFAULT_ECC or M]
    #[arg(long)]
    ecc: Option<EcLevel>,
    /// Enable debug logging
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let text = match cli.text {
        Some(text) => Ok(text),
        None => prompt_line(),
    };
    let size = cli.size.unwrap_or_else(config::output_size);
    let ecc = cli.ecc.unwrap_or_else(config::default_ec_level);

    match text.and_then(|text| generate(&text, size, ecc, &cli.output)) {
        Ok(path) => {
            println!("\nSuccessfully generated QR Code!");
            println!("It is saved as '{}'.", path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error generating QR Code: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn prompt_line() -> anyhow::Result<String> {
    println!("Enter the text or URL to encode into the QR Code:");
    io::stdout().flush().context("failed to flush stdout")?;
    let mut line = String::new();
    let read = io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    if read == 0 {
        bail!("no input was given");
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn generate(text: &str, size: u32, ecc: EcLevel, output: &Path) -> anyhow::Result<PathBuf> {
    let code = encode_with(text, &EncodeOptions::new(ecc))?;
    debug!(
        version = %code.version(),
        ec_level = %code.ec_level(),
        mask = %code.mask(),
        "encoded symbol"
    );
    let image = render_to_fit(&code, size, size)?;
    save_png(&image, output).with_context(|| format!("could not write {}", output.display()))
}
