use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_qrgen::encoder::function_patterns::function_matrix;
use rust_qrgen::encoder::mask::penalty_table;
use rust_qrgen::encoder::placement::place_codewords;
use rust_qrgen::encoder::{bitstream, capacity, reed_solomon};
use rust_qrgen::render::{DEFAULT_BORDER, to_ascii, to_png};
use rust_qrgen::{
    ECLevel, EncodeOptions, EncodingError, MaskPattern, Mode, QrCode, Segmentation,
    encode_with_options, read,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "qrtool", version, about = "QR code encoder CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode text and write a PNG or print it to the terminal
    Encode {
        #[command(flatten)]
        input: InputArgs,
        /// Pixels per module
        #[arg(long, default_value_t = 8)]
        size: u32,
        /// Light modules around the symbol
        #[arg(long, default_value_t = DEFAULT_BORDER)]
        border: usize,
        #[arg(long, conflicts_with = "ascii")]
        output: Option<PathBuf>,
        #[arg(long)]
        ascii: bool,
    },
    /// Encode text, read the matrix back and compare
    Verify {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Show version, segments and per-mask penalties
    Inspect {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(Args)]
struct InputArgs {
    #[arg(long)]
    text: String,
    /// Error correction level (L, M, Q, H)
    #[arg(long, default_value = "L")]
    ec: ECLevel,
    #[arg(long, default_value_t = 1)]
    min_version: u8,
    #[arg(long, default_value_t = 40)]
    max_version: u8,
    /// Force a mask pattern (0-7)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..8))]
    mask: Option<u8>,
    /// Force a single segment mode
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,
    #[arg(long, value_enum)]
    segmentation: Option<SegmentationArg>,
    /// Raise the EC level while the data still fits
    #[arg(long)]
    boost: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Numeric,
    Alphanumeric,
    Byte,
}

#[derive(Clone, Copy, ValueEnum)]
enum SegmentationArg {
    Greedy,
    Optimal,
}

impl InputArgs {
    fn options(&self) -> EncodeOptions {
        let mut options = EncodeOptions::new(self.ec)
            .min_version(self.min_version)
            .max_version(self.max_version)
            .boost_ec_level(self.boost);
        if let Some(mask) = self.mask.and_then(MaskPattern::from_bits) {
            options = options.mask(mask);
        }
        if let Some(mode) = self.mode {
            options = options.mode(match mode {
                ModeArg::Numeric => Mode::Numeric,
                ModeArg::Alphanumeric => Mode::Alphanumeric,
                ModeArg::Byte => Mode::Byte,
            });
        }
        if let Some(policy) = self.segmentation {
            options = options.segmentation(match policy {
                SegmentationArg::Greedy => Segmentation::Greedy,
                SegmentationArg::Optimal => Segmentation::Optimal,
            });
        }
        options
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rust_qrgen=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let ok = match cli.command {
        Command::Encode {
            input,
            size,
            border,
            output,
            ascii,
        } => encode_cmd(&input, size, border, output, ascii),
        Command::Verify { input } => verify_cmd(&input),
        Command::Inspect { input } => inspect_cmd(&input),
    };
    if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

fn encode_or_report(input: &InputArgs) -> Option<QrCode> {
    match encode_with_options(input.text.as_bytes(), &input.options()) {
        Ok(code) => Some(code),
        Err(err) => {
            report(&err);
            None
        }
    }
}

fn report(err: &EncodingError) {
    eprintln!("Encoding failed ({:?}): {}", err.class(), err);
}

fn encode_cmd(
    input: &InputArgs,
    size: u32,
    border: usize,
    output: Option<PathBuf>,
    ascii: bool,
) -> bool {
    let start = Instant::now();
    let Some(code) = encode_or_report(input) else {
        return false;
    };
    let elapsed = start.elapsed();

    if ascii || output.is_none() {
        match to_ascii(&code.modules, border) {
            Ok(text) => print!("{}", text),
            Err(err) => {
                eprintln!("Rendering failed: {}", err);
                return false;
            }
        }
    }
    if let Some(path) = output {
        let png = match to_png(&code.modules, size, border) {
            Ok(png) => png,
            Err(err) => {
                eprintln!("Rendering failed: {}", err);
                return false;
            }
        };
        if let Err(err) = std::fs::write(&path, png) {
            eprintln!("Failed to write {}: {}", path.display(), err);
            return false;
        }
        println!("Wrote {}", path.display());
    }
    println!(
        "version={} ec={:?} mask={} size={} ({:.2?})",
        code.version,
        code.error_correction,
        code.mask_pattern.id(),
        code.size(),
        elapsed
    );
    true
}

fn verify_cmd(input: &InputArgs) -> bool {
    let Some(code) = encode_or_report(input) else {
        return false;
    };
    match read(&code.modules) {
        Ok(decoded) if decoded.data == input.text.as_bytes() => {
            println!(
                "OK: version={} ec={:?} mask={} modes={:?}",
                decoded.version,
                decoded.ec_level,
                decoded.mask.id(),
                decoded.modes
            );
            true
        }
        Ok(decoded) => {
            println!(
                "MISMATCH: read {:?}",
                String::from_utf8_lossy(&decoded.data)
            );
            false
        }
        Err(err) => {
            println!("READ FAILED: {}", err);
            false
        }
    }
}

fn inspect_cmd(input: &InputArgs) -> bool {
    let options = input.options();
    let data = input.text.as_bytes();
    let selection = match capacity::select(data, &options) {
        Ok(selection) => selection,
        Err(err) => {
            report(&err);
            return false;
        }
    };
    let spec = &selection.spec;
    println!("Version: {}", spec.version);
    println!("EC level: {:?}", spec.ec_level);
    println!(
        "Data: {} / {} bits, {} blocks",
        selection.data_bits,
        spec.data_capacity_bits(),
        spec.blocks.len()
    );
    for (i, segment) in selection.segments.iter().enumerate() {
        println!(
            "  Segment {}: {:?}, {} chars, {:?}",
            i,
            segment.mode(),
            segment.char_count(),
            String::from_utf8_lossy(segment.data())
        );
    }

    let base = bitstream::encode_segments(&selection.segments, spec)
        .and_then(|codewords| reed_solomon::add_error_correction(&codewords, spec))
        .and_then(|codewords| {
            let mut base = function_matrix(spec.version);
            place_codewords(&mut base, &codewords)?;
            Ok(base)
        });
    let base = match base {
        Ok(base) => base,
        Err(err) => {
            report(&err);
            return false;
        }
    };

    let table = penalty_table(&base, spec.ec_level);
    let best = table
        .iter()
        .min_by_key(|&&(mask, penalty)| (penalty, mask.id()))
        .map(|&(mask, _)| mask);
    println!("Mask penalties:");
    for (mask, penalty) in table {
        let marker = if Some(mask) == best { " *" } else { "" };
        println!("  {}: {}{}", mask.id(), penalty, marker);
    }
    true
}
