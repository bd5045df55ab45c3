//! CANaerospace Log Decoder CLI Application
//!
//! This is the command-line interface for the CANaerospace capture decoder.
//! It uses the canaero-decoder library and adds:
//! - Argument parsing and TOML configuration
//! - File/stdin input and file/stdout output
//! - CSV and JSON-lines serialization

use anyhow::{Context, Result};
use canaero_decoder::{
    parse_can_id, Decoder, DecoderConfig, PipelineStats, RecordSink, TimestampFormat,
};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

mod config;
mod output;

use config::{AppConfig, OutputFormat};
use output::{CsvSink, JsonLinesSink};

/// CANaerospace Log Decoder - Decode candump capture logs
#[derive(Parser, Debug)]
#[command(name = "canaero-cli")]
#[command(about = "Decode CANaerospace frames from candump logs to CSV", long_about = None)]
#[command(version)]
struct Args {
    /// Capture log to decode ("-" for stdin)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// CAN IDs to keep (hex), e.g. --can-id 0x154 0x150 0x3F4
    #[arg(long = "can-id", value_name = "HEX", num_args = 1.., value_parser = parse_can_id_arg)]
    can_ids: Vec<u32>,

    /// Disable decoding of data payload
    #[arg(long)]
    raw: bool,

    /// Timestamp rendering
    #[arg(long, value_enum, value_name = "FORMAT")]
    timestamp: Option<TimestampArg>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Path to configuration file (config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum TimestampArg {
    Seconds,
    Iso8601,
}

impl From<TimestampArg> for TimestampFormat {
    fn from(arg: TimestampArg) -> Self {
        match arg {
            TimestampArg::Seconds => TimestampFormat::Seconds,
            TimestampArg::Iso8601 => TimestampFormat::Iso8601,
        }
    }
}

fn parse_can_id_arg(s: &str) -> std::result::Result<u32, String> {
    parse_can_id(s).map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    log::info!("CANaerospace Log Decoder CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using decoder library v{}", canaero_decoder::VERSION);

    let app_config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => AppConfig::default(),
    };

    let decoder_config = merge_config(&args, &app_config)?;
    let format = args.format.or(app_config.output.format).unwrap_or_default();
    let decoder = Decoder::with_config(decoder_config).with_catalog(app_config.catalog()?);

    log::debug!(
        "Decoder: raw={}, filter={:?}, timestamp={:?}, format={:?}",
        decoder.config().raw_mode,
        decoder.config().id_filter,
        decoder.config().timestamp_format,
        format
    );

    let reader = open_input(&args.input)?;
    let writer = open_output(args.output.as_deref())?;

    let stats = match format {
        OutputFormat::Csv => {
            let mut sink = CsvSink::new(writer).context("Failed to write CSV header")?;
            let stats = run(&decoder, reader, &mut sink)?;
            sink.finish().context("Failed to flush output")?;
            stats
        }
        OutputFormat::Json => {
            let mut sink = JsonLinesSink::new(writer);
            let stats = run(&decoder, reader, &mut sink)?;
            sink.finish().context("Failed to flush output")?;
            stats
        }
    };

    if stats.records == 0 && stats.lines > 0 {
        log::warn!("No CANaerospace frames found in {} lines", stats.lines);
    }

    Ok(())
}

/// Combine command-line flags with the configuration file; flags win
fn merge_config(args: &Args, app_config: &AppConfig) -> Result<DecoderConfig> {
    let mut config = app_config.decoder_config()?;

    if args.raw {
        config = config.with_raw_mode(true);
    }
    if !args.can_ids.is_empty() {
        config = config.with_id_filter(args.can_ids.iter().copied());
    }
    if let Some(timestamp) = args.timestamp {
        config = config.with_timestamp_format(timestamp.into());
    }

    Ok(config)
}

fn run<S: RecordSink>(
    decoder: &Decoder,
    reader: Box<dyn BufRead>,
    sink: &mut S,
) -> Result<PipelineStats> {
    decoder
        .process_reader(reader, sink)
        .context("Decoding failed")
}

fn open_input(path: &Path) -> Result<Box<dyn BufRead>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    let file = File::open(path).with_context(|| format!("Failed to open input file: {:?}", path))?;
    Ok(Box::new(BufReader::new(file)))
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {:?}", path))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parsing() {
        let args = Args::try_parse_from([
            "canaero-cli",
            "capture.log",
            "out.csv",
            "--can-id",
            "0x154",
            "150",
            "--raw",
            "--timestamp",
            "seconds",
        ])
        .unwrap();

        assert_eq!(args.input, PathBuf::from("capture.log"));
        assert_eq!(args.output, Some(PathBuf::from("out.csv")));
        assert_eq!(args.can_ids, vec![0x154, 0x150]);
        assert!(args.raw);
    }

    #[test]
    fn test_args_reject_bad_can_id() {
        let result = Args::try_parse_from(["canaero-cli", "capture.log", "--can-id", "0xZZ"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let app_config: AppConfig = toml::from_str(
            "[decoder]\nraw = false\ncan_ids = [\"0x3F4\"]\ntimestamp = \"iso8601\"",
        )
        .unwrap();
        let args = Args::try_parse_from([
            "canaero-cli",
            "capture.log",
            "--raw",
            "--timestamp",
            "seconds",
        ])
        .unwrap();

        let config = merge_config(&args, &app_config).unwrap();
        assert!(config.raw_mode);
        assert_eq!(config.timestamp_format, TimestampFormat::Seconds);
        // No --can-id given, so the file's filter stays
        assert!(config.should_process_id(0x3F4));
        assert!(!config.should_process_id(0x154));
    }
}
