//! Offline converter: exported connection rows to the viewer's dataset document.
//!
//! Reads a JSON array of rows (one per interaction, spreadsheet column names
//! accepted) and writes `network_data.json` for the viewer to fetch.

// Bin target reuses lib deps, silence noisy lint.
#![allow(unused_crate_dependencies)]

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;
use sentiment_graph::Result;
use sentiment_graph::convert::ConnectionRecord;
use sentiment_graph::dataset::Dataset;

#[derive(Parser, Debug)]
#[command(name = "convert", about = "Aggregate exported connection rows into a network dataset")]
struct Cli {
	/// JSON array of connection rows
	input: PathBuf,
	/// Where to write the dataset document
	#[arg(long, short, default_value = "network_data.json")]
	output: PathBuf,
}

fn main() -> Result<()> {
	let cli = Cli::parse();

	let records: Vec<ConnectionRecord> =
		serde_json::from_reader(BufReader::new(File::open(&cli.input)?))?;
	let dataset = Dataset::from_connections(&records);

	let mut writer = BufWriter::new(File::create(&cli.output)?);
	serde_json::to_writer_pretty(&mut writer, &dataset)?;
	writer.flush()?;

	println!("Data conversion complete! Wrote {}", cli.output.display());
	println!("{}", dataset.conversion_summary());
	Ok(())
}
