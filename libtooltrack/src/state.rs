use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// One detected manual tool change, in file order. `line` is the 1-based
/// line number of the marker in the scanned G-code file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolChange {
	pub tool_number: u32,
	pub color: String,
	pub brand: String,
	pub material: String,
	pub full_name: String,
	pub line: usize,
}

impl ToolChange {
	/// Record for a tool index with no matching filament slot.
	pub fn unknown(tool_number: u32, line: usize) -> ToolChange {
		ToolChange {
			tool_number,
			color: "Unknown".to_string(),
			brand: "Unknown".to_string(),
			material: "Unknown".to_string(),
			full_name: "Unknown".to_string(),
			line,
		}
	}
}

/// Persisted summary of a pre-scan: every detected tool change plus a cursor
/// tracking how many have been performed. Written wholesale on every save;
/// there is no locking, so concurrent invocations against the same file are
/// unsupported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanState {
	pub total_changes: usize,
	pub current_change: usize,
	pub changes: Vec<ToolChange>,
}

impl ScanState {
	pub fn load(path: &Path) -> Result<ScanState> {
		let raw = fs::read_to_string(path)
			.with_context(|| format!("Failed to read tool change data: {}", path.display()))?;
		let state: ScanState = serde_json::from_str(&raw)
			.with_context(|| format!("Malformed tool change data: {}", path.display()))?;

		if state.changes.len() != state.total_changes || state.current_change > state.total_changes {
			bail!("Inconsistent tool change data: {}", path.display());
		}

		Ok(state)
	}

	pub fn save(&self, path: &Path) -> Result<()> {
		let json = serde_json::to_string_pretty(self)?;
		fs::write(path, json)
			.with_context(|| format!("Failed to write tool change data: {}", path.display()))?;

		Ok(())
	}

	pub fn is_complete(&self) -> bool {
		self.current_change >= self.total_changes
	}

	/// Advances the cursor and returns the record it now points at, or None
	/// (without mutating anything) once every change has been performed.
	pub fn advance(&mut self) -> Option<ToolChange> {
		if self.is_complete() {
			return None;
		}

		self.current_change += 1;

		self.changes.get(self.current_change - 1).cloned()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample_state() -> ScanState {
		let changes = vec![
			ToolChange {
				tool_number: 1,
				color: "Red".to_string(),
				brand: "PLA".to_string(),
				material: "Red".to_string(),
				full_name: "PLA Red".to_string(),
				line: 120,
			},
			ToolChange::unknown(7, 450),
			ToolChange {
				tool_number: 0,
				color: "Blue".to_string(),
				brand: "ABS".to_string(),
				material: "Blue".to_string(),
				full_name: "ABS Blue".to_string(),
				line: 980,
			},
		];

		ScanState {
			total_changes: changes.len(),
			current_change: 0,
			changes,
		}
	}

	#[test]
	fn save_then_load_round_trips() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("tool_change_data.json");
		let state = sample_state();

		state.save(&path).unwrap();
		let loaded = ScanState::load(&path).unwrap();

		assert_eq!(loaded, state);
	}

	#[test]
	fn advance_walks_the_changes_in_order() {
		let mut state = sample_state();

		let first = state.advance().unwrap();
		assert_eq!(state.current_change, 1);
		assert_eq!(first.color, "Red");
		assert_eq!(first.line, 120);

		let second = state.advance().unwrap();
		assert_eq!(state.current_change, 2);
		assert_eq!(second.tool_number, 7);
		assert_eq!(second.color, "Unknown");

		let third = state.advance().unwrap();
		assert_eq!(state.current_change, 3);
		assert_eq!(third.color, "Blue");
	}

	#[test]
	fn advance_past_the_end_never_mutates() {
		let mut state = sample_state();

		for _ in 0..3 {
			state.advance();
		}
		let snapshot = state.clone();

		assert!(state.is_complete());
		assert_eq!(state.advance(), None);
		assert_eq!(state, snapshot);
	}

	#[test]
	fn advance_on_an_empty_scan_is_complete_immediately() {
		let mut state = ScanState {
			total_changes: 0,
			current_change: 0,
			changes: Vec::new(),
		};

		assert!(state.is_complete());
		assert_eq!(state.advance(), None);
	}

	#[test]
	fn load_rejects_inconsistent_counts() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("tool_change_data.json");
		let mut state = sample_state();
		state.total_changes = 5;

		state.save(&path).unwrap();

		assert!(ScanState::load(&path).is_err());
	}

	#[test]
	fn load_rejects_garbage() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("tool_change_data.json");
		std::fs::write(&path, "not json").unwrap();

		assert!(ScanState::load(&path).is_err());
	}
}
