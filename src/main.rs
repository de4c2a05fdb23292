// src/main.rs
//! Command-line interface for tdms-dump.
//!
//! Writes the internal structure of a TDMS file to an XML file so it can be
//! read by a human.

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;
use tdms_dump::{
    default_output_path, dump_structure, FileSource, StructureSink, WalkSummary, XmlOptions, XmlSink,
};

#[cfg(feature = "mmap")]
use tdms_dump::MmapSource;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Dump the segment and metadata structure of a TDMS file as XML",
    long_about = "Walks every segment of a TDMS 2.0 file and writes lead-ins, table of contents flags,\n\
                  object lists, raw data indices, properties and chunk layouts to an XML file.\n\n\
                  Channel sample values are not decoded."
)]
struct Args {
    /// TDMS file to inspect
    #[arg(value_name = "TDMS_PATH")]
    tdms_path: PathBuf,

    /// XML output file [default: <TDMS_PATH>.structure.xml]
    #[arg(value_name = "OUTPUT_PATH")]
    output_path: Option<PathBuf>,

    /// Spaces per nesting level in the XML output
    #[arg(long, default_value_t = 2)]
    indent: usize,

    /// More log output (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Memory-map the input file instead of buffered reads
    #[cfg(feature = "mmap")]
    #[arg(long)]
    mmap: bool,
}

fn dump(args: &Args, sink: &mut dyn StructureSink) -> tdms_dump::Result<WalkSummary> {
    let label = args.tdms_path.to_string_lossy();

    #[cfg(feature = "mmap")]
    if args.mmap {
        return dump_structure(MmapSource::open_mmap(&args.tdms_path)?, &label, sink);
    }

    dump_structure(FileSource::open(&args.tdms_path)?, &label, sink)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .parse_default_env()
        .init();

    let output_path = args
        .output_path
        .clone()
        .unwrap_or_else(|| default_output_path(&args.tdms_path));

    let output = File::create(&output_path)
        .with_context(|| format!("failed to create {}", output_path.display()))?;
    let options = XmlOptions {
        indent: args.indent,
        ..XmlOptions::default()
    };
    let mut sink = XmlSink::with_options(BufWriter::new(output), options)?;

    let start = Instant::now();
    let summary = dump(&args, &mut sink)
        .with_context(|| format!("failed to dump the structure of {}", args.tdms_path.display()))?;
    sink.finish()
        .with_context(|| format!("failed to write {}", output_path.display()))?;

    info!(
        "{} segment(s) from {} ({} bytes) written to {} in {:.2?}",
        summary.segments.len(),
        args.tdms_path.display(),
        summary.file_size,
        output_path.display(),
        start.elapsed()
    );

    Ok(())
}
