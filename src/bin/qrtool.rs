use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use rust_qrgen::encoder::mask;
use rust_qrgen::render::{self, RenderOptions};
use rust_qrgen::segmenter::narrowest_mode;
use rust_qrgen::tools::{init_tracing, module_stats, save_png};
use rust_qrgen::{EcLevel, EncodeOptions, MaskPattern, Plan, Strategy, Version, read_code};

#[derive(Parser)]
#[command(name = "qrtool", version, about = "rust_qrgen developer tools")]
struct Cli {
    /// Enable debug logging
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct EncodeArgs {
    /// Text to encode
    text: String,
    /// Error correction level: L, M, Q or H
    #[arg(long, default_value = "M")]
    ecc: EcLevel,
    /// Fixed symbol version (1-40)
    #[arg(long = "symbol-version", value_name = "N")]
    symbol_version: Option<u8>,
    /// Fixed mask pattern (0-7)
    #[arg(long)]
    mask: Option<u8>,
    /// Raise error correction while the version stays the same
    #[arg(long)]
    boost_ecc: bool,
    /// Segmentation strategy: optimal or runs
    #[arg(long, default_value = "optimal")]
    strategy: Strategy,
    /// Prefix non-ASCII text with a UTF-8 ECI header
    #[arg(long)]
    eci: bool,
}

impl EncodeArgs {
    fn options(&self) -> anyhow::Result<EncodeOptions> {
        let mut options = EncodeOptions::new(self.ecc)
            .with_boost_ecc(self.boost_ecc)
            .with_strategy(self.strategy)
            .with_eci_utf8(self.eci);
        if let Some(version) = self.symbol_version {
            options = options.with_version(Version::new(version)?);
        }
        if let Some(bits) = self.mask {
            let mask = MaskPattern::from_bits(bits)
                .with_context(|| format!("mask {bits} is outside 0-7"))?;
            options = options.with_mask(mask);
        }
        Ok(options)
    }
}

#[derive(Subcommand)]
enum Command {
    /// Print a symbol to the terminal
    Print {
        #[command(flatten)]
        encode: EncodeArgs,
        /// Use `##` blocks instead of half-block characters
        #[arg(long)]
        ascii: bool,
        /// Quiet zone in modules
        #[arg(long, default_value_t = 2)]
        quiet: usize,
    },
    /// Write a symbol as SVG to stdout or a file
    Svg {
        #[command(flatten)]
        encode: EncodeArgs,
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long, default_value = "#000000")]
        dark: String,
        #[arg(long, default_value = "#FFFFFF")]
        light: String,
    },
    /// Write a symbol as PNG with a fixed module size
    Png {
        #[command(flatten)]
        encode: EncodeArgs,
        #[arg(long)]
        output: PathBuf,
        /// Pixels per module
        #[arg(long, default_value_t = 10)]
        module_px: u32,
        /// Quiet zone in modules
        #[arg(long, default_value_t = 4)]
        quiet: u32,
    },
    /// Show segmentation, capacity and mask penalties
    Inspect {
        #[command(flatten)]
        encode: EncodeArgs,
    },
    /// Encode, read the symbol back and compare
    Verify {
        #[command(flatten)]
        encode: EncodeArgs,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Print {
            encode,
            ascii,
            quiet,
        } => print_cmd(&encode, ascii, quiet),
        Command::Svg {
            encode,
            output,
            dark,
            light,
        } => svg_cmd(&encode, output.as_deref(), &dark, &light),
        Command::Png {
            encode,
            output,
            module_px,
            quiet,
        } => png_cmd(&encode, &output, module_px, quiet),
        Command::Inspect { encode } => inspect_cmd(&encode),
        Command::Verify { encode } => verify_cmd(&encode),
    }
}

fn plan(args: &EncodeArgs) -> anyhow::Result<Plan> {
    Ok(Plan::for_text(&args.text, &args.options()?)?)
}

fn print_cmd(args: &EncodeArgs, ascii: bool, quiet: usize) -> anyhow::Result<()> {
    let code = plan(args)?.build();
    if ascii {
        print!("{}", render::to_ascii(&code, quiet));
    } else {
        print!("{}", render::to_unicode(&code, quiet));
    }
    Ok(())
}

fn svg_cmd(args: &EncodeArgs, output: Option<&Path>, dark: &str, light: &str) -> anyhow::Result<()> {
    let code = plan(args)?.build();
    let svg = render::to_svg(&code, 4, dark, light);
    match output {
        Some(path) => std::fs::write(path, svg)
            .with_context(|| format!("could not write {}", path.display()))?,
        None => print!("{svg}"),
    }
    Ok(())
}

fn png_cmd(args: &EncodeArgs, output: &Path, module_px: u32, quiet: u32) -> anyhow::Result<()> {
    let code = plan(args)?.build();
    let options = RenderOptions::new(module_px).with_quiet_zone_px(quiet.saturating_mul(module_px));
    let image = render::to_image(&code, &options)?;
    let path = save_png(&image, output)?;
    println!(
        "Wrote {} ({}x{}, version {}, level {}, mask {})",
        path.display(),
        image.width(),
        image.height(),
        code.version(),
        code.ec_level(),
        code.mask()
    );
    Ok(())
}

fn inspect_cmd(args: &EncodeArgs) -> anyhow::Result<()> {
    let start = Instant::now();
    let plan = plan(args)?;
    println!(
        "Version {} ({}x{}), level {}",
        plan.version,
        plan.version.size(),
        plan.version.size(),
        plan.ec_level
    );
    println!(
        "Data bits: {} of {} ({:.1}% used)",
        plan.data_bits,
        plan.capacity_bits,
        plan.data_bits as f64 * 100.0 / plan.capacity_bits as f64
    );
    println!(
        "Narrowest single mode: {}, chosen segments: {}",
        narrowest_mode(&args.text),
        plan.segments.len()
    );
    println!("Segments:");
    for (i, segment) in plan.segments.iter().enumerate() {
        println!(
            "  {}: {} mode, {} chars, {} payload bits",
            i,
            segment.mode(),
            segment.num_chars(),
            segment.data().len()
        );
    }

    let grid = plan.unmasked_grid();
    let penalties = mask::evaluate_all(&grid, plan.ec_level);
    let best = penalties
        .iter()
        .min_by_key(|(_, penalty)| *penalty)
        .map(|(mask, _)| *mask);
    println!("Mask penalties:");
    for (mask, penalty) in &penalties {
        let marker = if Some(*mask) == best { " <- lowest" } else { "" };
        println!("  {mask}: {penalty}{marker}");
    }

    let code = plan.build();
    let stats = module_stats(&code);
    println!(
        "Applied mask {}; dark modules {}/{} ({:.2}%)",
        code.mask(),
        stats.dark_modules,
        stats.total_modules,
        stats.dark_ratio * 100.0
    );
    println!("Time: {:.2}ms", start.elapsed().as_secs_f64() * 1000.0);
    Ok(())
}

fn verify_cmd(args: &EncodeArgs) -> anyhow::Result<()> {
    let code = plan(args)?.build();
    let decoded = read_code(&code)?;
    let modes: Vec<String> = decoded.modes.iter().map(ToString::to_string).collect();
    println!(
        "Read back version {}, level {}, mask {}, segments [{}]",
        decoded.version,
        decoded.ec_level,
        decoded.mask,
        modes.join(", ")
    );
    if decoded.text != args.text {
        anyhow::bail!(
            "round trip mismatch: encoded {:?}, read {:?}",
            args.text,
            decoded.text
        );
    }
    println!("OK: {:?}", decoded.text);
    Ok(())
}
