use std::{
	fs,
	path::{Path, PathBuf},
	time::SystemTime,
};

use anyhow::{bail, Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
	filament::{extract_filament_info, FilamentSlot},
	state::{ScanState, ToolChange},
};

const GCODE_EXTENSION: &str = "gcode";

static TOOL_CHANGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"; MANUAL_TOOL_CHANGE T(\d+)").unwrap());

/// Most recently modified `.gcode` file in `dir`. Errors when the directory
/// is unreadable or holds no G-code files.
pub fn find_latest_gcode(dir: &Path) -> Result<PathBuf> {
	let entries = fs::read_dir(dir)
		.with_context(|| format!("Could not read G-code directory: {}", dir.display()))?;

	let mut latest: Option<(SystemTime, PathBuf)> = None;

	for entry in entries {
		let entry = entry.with_context(|| format!("Could not read G-code directory: {}", dir.display()))?;
		let path = entry.path();

		if path.extension().map_or(false, |ext| ext == GCODE_EXTENSION) {
			let modified = entry
				.metadata()
				.and_then(|m| m.modified())
				.with_context(|| format!("Could not stat: {}", path.display()))?;

			if latest.as_ref().map_or(true, |(t, _)| modified > *t) {
				latest = Some((modified, path));
			}
		}
	}

	match latest {
		Some((_, path)) => {
			log::debug!("newest G-code file: {}", path.display());
			Ok(path)
		},
		None => bail!("No G-code files found."),
	}
}

/// Pre-scans a G-code file: extracts the filament slots from the header
/// directives, then collects one record per `; MANUAL_TOOL_CHANGE T<n>`
/// marker with its 1-based line number. A tool index beyond the discovered
/// slots yields a record with all descriptive fields "Unknown". Returns the
/// slot list (for the operator summary) and a fresh state with the cursor
/// at zero.
pub fn pre_scan(gcode_path: &Path) -> Result<(Vec<FilamentSlot>, ScanState)> {
	if !gcode_path.exists() {
		bail!("File not found: {}", gcode_path.display());
	}

	if gcode_path.extension().map_or(true, |ext| ext != GCODE_EXTENSION) {
		bail!("Not a G-code file: {}", gcode_path.display());
	}

	let content = fs::read_to_string(gcode_path)
		.with_context(|| format!("Failed to read: {}", gcode_path.display()))?;
	let filaments = extract_filament_info(&content);

	let mut changes = Vec::new();

	for (index, line) in content.lines().enumerate() {
		let caps = match TOOL_CHANGE.captures(line) {
			Some(caps) => caps,
			None => continue,
		};

		let tool_number: u32 = caps[1]
			.parse()
			.with_context(|| format!("Tool index out of range at line {}", index + 1))?;
		let line_number = index + 1;

		let change = match filaments.get(tool_number as usize) {
			Some(slot) => ToolChange {
				tool_number,
				color: slot.color_name.clone(),
				brand: slot.brand.clone(),
				material: slot.material.clone(),
				full_name: slot.full_name.clone(),
				line: line_number,
			},
			None => ToolChange::unknown(tool_number, line_number),
		};

		log::debug!("tool change T{} at line {}", tool_number, line_number);
		changes.push(change);
	}

	let state = ScanState {
		total_changes: changes.len(),
		current_change: 0,
		changes,
	};

	Ok((filaments, state))
}
