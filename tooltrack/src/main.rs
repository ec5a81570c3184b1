use std::{
	fs,
	path::{Path, PathBuf},
	process,
};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use libtooltrack::{default_gcode_dir, find_latest_gcode, pre_scan, ScanState, CURRENT_COLOR_FILE, STATE_FILE};

#[derive(Parser, Debug)]
#[clap(author, version, about = "Track manual tool changes in sliced G-code", long_about = None)]
struct Args {
	#[clap(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Scan a G-code file for manual tool changes
	Scan {
		/// G-code file path. Uses the newest file in the printer's gcodes
		/// directory if not specified.
		#[clap(value_parser)]
		file: Option<PathBuf>,
	},
	/// Advance to the next recorded tool change
	Advance,
}

fn main() {
	env_logger::init();

	let args = Args::parse();

	let result = match args.command {
		Command::Scan { file } => scan(file),
		Command::Advance => advance(),
	};

	// The printer firmware reads stdout, so failures go there too.
	if let Err(e) = result {
		println!("ERROR: {:#}", e);
		process::exit(1);
	}
}

fn scan(file: Option<PathBuf>) -> Result<()> {
	let gcode_path = match file {
		Some(path) => path,
		None => find_latest_gcode(&default_gcode_dir()?)?,
	};

	println!("Scanning G-code file: {}", gcode_path.display());

	let (filaments, state) = pre_scan(&gcode_path)?;

	println!("Detected filaments:");
	for (i, slot) in filaments.iter().enumerate() {
		println!("  Tool {}: {} ({} {})", i, slot.color_name, slot.brand, slot.material);
	}

	state.save(Path::new(STATE_FILE))?;

	println!("PRE_SCAN_COMPLETE: {} tool changes found.", state.total_changes);
	println!("Data saved to: {}", STATE_FILE);

	Ok(())
}

fn advance() -> Result<()> {
	let state_path = Path::new(STATE_FILE);

	if !state_path.exists() {
		bail!("Tool change data not found. Please run the pre-scan first.");
	}

	let mut state = ScanState::load(state_path)?;

	match state.advance() {
		None => println!("Tool changes completed."),
		Some(change) => {
			state.save(state_path)?;

			println!(
				"Tool Change {} of {} - {} (T{}) at line {}",
				state.current_change, state.total_changes, change.color, change.tool_number, change.line
			);
			println!("{}", change.color);

			fs::write(CURRENT_COLOR_FILE, &change.color)
				.with_context(|| format!("Failed to write: {}", CURRENT_COLOR_FILE))?;
		},
	}

	Ok(())
}
