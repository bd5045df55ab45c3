//! Standalone CANaerospace capture decoder tool
//!
//! Decodes a candump log file and prints every record plus a per-parameter
//! summary.
//!
//! Usage:
//!   decode_capture <capture.log> [--raw] [--limit <count>]
//!
//! Example:
//!   cargo run --example decode_capture -- candump-2023-07-22.log --limit 100

use canaero_decoder::formats::CandumpParser;
use canaero_decoder::{Decoder, DecoderConfig, LineOutcome, TimestampFormat};
use std::collections::HashMap;
use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Default)]
struct CaptureStats {
    lines: usize,
    records: usize,
    dropped: usize,
    fallbacks: usize,
    per_parameter: HashMap<String, usize>,
}

impl CaptureStats {
    fn print_summary(&self) {
        println!("\n=== DECODING SUMMARY ===");
        println!("Lines read: {}", self.lines);
        println!("Records: {}", self.records);
        println!("Dropped lines: {}", self.dropped);
        println!("Fallback decodes: {}", self.fallbacks);

        if !self.per_parameter.is_empty() {
            println!("\nTop 10 Most Frequent Parameters:");
            let mut sorted: Vec<_> = self.per_parameter.iter().collect();
            sorted.sort_by(|a, b| b.1.cmp(a.1));
            for (name, count) in sorted.iter().take(10) {
                println!("  {}: {} times", name, count);
            }
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <capture.log> [--raw] [--limit <count>]", args[0]);
        std::process::exit(1);
    }

    let capture_file = PathBuf::from(&args[1]);
    let mut raw_mode = false;
    let mut limit: Option<usize> = None;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--raw" => raw_mode = true,
            "--limit" => {
                i += 1;
                if i < args.len() {
                    limit = Some(args[i].parse()?);
                }
            }
            _ => eprintln!("Unknown argument: {}", args[i]),
        }
        i += 1;
    }

    let config = DecoderConfig::new()
        .with_raw_mode(raw_mode)
        .with_timestamp_format(TimestampFormat::Seconds);
    let decoder = Decoder::with_config(config);

    println!("=== CANaerospace Capture Decoder ===");
    println!("Capture file: {:?}", capture_file);
    println!("Raw mode: {}", raw_mode);
    println!();

    let reader = BufReader::new(File::open(&capture_file)?);
    let mut stats = CaptureStats::default();
    let mut printed = 0;

    // Lossy line reading: a corrupted line is dropped, the run continues
    for line in CandumpParser::lines(reader) {
        stats.lines += 1;
        match decoder.decode_line(&line?) {
            LineOutcome::Record(record) => {
                stats.records += 1;
                if record.status.is_fallback() {
                    stats.fallbacks += 1;
                }
                *stats.per_parameter.entry(record.name.clone()).or_insert(0) += 1;

                if limit.map_or(true, |max| printed < max) {
                    println!(
                        "[{}] 0x{:03X} {:<40} {:>12} {:<8} ({})",
                        record.timestamp,
                        record.can_id,
                        record.name,
                        record.value.to_string(),
                        record.unit,
                        record.status
                    );
                    printed += 1;
                }
            }
            _ => stats.dropped += 1,
        }
    }

    stats.print_summary();

    Ok(())
}
