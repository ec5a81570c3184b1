use std::path::PathBuf;

use anyhow::{Context, Result};

/// JSON state file shared by the scan and advance commands.
pub const STATE_FILE: &str = "/tmp/tool_change_data.json";

/// Flat text file holding the color of the most recent change, consumed by
/// other printer-control tooling.
pub const CURRENT_COLOR_FILE: &str = "/tmp/current_tool_color.txt";

/// Directory the printer firmware uploads sliced files into.
pub fn default_gcode_dir() -> Result<PathBuf> {
	let home = dirs::home_dir().context("Could not determine home directory")?;

	Ok(home.join("printer_data").join("gcodes"))
}
