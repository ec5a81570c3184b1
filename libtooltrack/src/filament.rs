use once_cell::sync::Lazy;
use regex::Regex;

use crate::colors::{closest_css_color, palette_hex};

/// Slicer header directives. PrusaSlicer/OrcaSlicer emit these as comments
/// near the top of the file.
const COLOUR_DIRECTIVE: &str = "; filament_colour =";
const SETTINGS_DIRECTIVE: &str = "; filament_settings_id =";

const UNKNOWN: &str = "Unknown";

static QUOTED: Lazy<Regex> = Lazy::new(|| Regex::new(r#""([^"]*)""#).unwrap());

/// Per-tool filament metadata declared in the slicer-generated header.
/// The slot's position in the extracted list is its tool number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilamentSlot {
	pub hex_color: String,
	pub color_name: String,
	pub brand: String,
	pub material: String,
	pub full_name: String,
}

struct FilamentType {
	brand: String,
	material: String,
	full_name: String,
}

/// Extracts one `FilamentSlot` per filament position from the G-code header
/// directives, pairing the Nth color with the Nth settings entry. Only the
/// first occurrence of each directive is honored. When the two lists differ
/// in length the shorter side is padded, never truncated, so a color is
/// never silently reattributed to a different material. Files without either
/// directive fall back to a fixed five-slot default set.
pub fn extract_filament_info(gcode: &str) -> Vec<FilamentSlot> {
	let mut colors: Vec<(String, String)> = Vec::new();
	let mut types: Vec<FilamentType> = Vec::new();
	let mut seen_colors = false;
	let mut seen_settings = false;

	for line in gcode.lines() {
		if !seen_colors {
			if let Some(value) = line.strip_prefix(COLOUR_DIRECTIVE) {
				seen_colors = true;

				for hex in value.trim().split(';') {
					let hex = hex.trim();

					if hex.starts_with('#') {
						colors.push((hex.to_string(), closest_css_color(hex)));
					}
				}
			}
		}

		if !seen_settings {
			if let Some(value) = line.strip_prefix(SETTINGS_DIRECTIVE) {
				seen_settings = true;

				for cap in QUOTED.captures_iter(value) {
					types.push(parse_filament_type(&cap[1]));
				}
			}
		}

		if seen_colors && seen_settings {
			break;
		}
	}

	log::debug!("extracted {} colors and {} filament types", colors.len(), types.len());

	let mut slots = Vec::new();

	for i in 0..colors.len().max(types.len()) {
		let (hex_color, color_name) = colors
			.get(i)
			.cloned()
			.unwrap_or_else(|| ("#FFFFFF".to_string(), UNKNOWN.to_string()));
		let (brand, material, full_name) = match types.get(i) {
			Some(t) => (t.brand.clone(), t.material.clone(), t.full_name.clone()),
			None => (UNKNOWN.to_string(), UNKNOWN.to_string(), UNKNOWN.to_string()),
		};

		slots.push(FilamentSlot {
			hex_color,
			color_name,
			brand,
			material,
			full_name,
		});
	}

	if slots.is_empty() {
		slots = default_slots();
	}

	slots
}

/// Brand is the first whitespace token of the settings name and material the
/// second; anything shorter keeps only the raw name.
fn parse_filament_type(name: &str) -> FilamentType {
	let mut parts = name.split_whitespace();

	match (parts.next(), parts.next()) {
		(Some(brand), Some(material)) => FilamentType {
			brand: brand.to_string(),
			material: material.to_string(),
			full_name: name.to_string(),
		},
		_ => FilamentType {
			brand: UNKNOWN.to_string(),
			material: UNKNOWN.to_string(),
			full_name: name.to_string(),
		},
	}
}

fn default_slots() -> Vec<FilamentSlot> {
	const DEFAULT_COLORS: [&str; 5] = ["Yellow", "Blue", "Silver", "Green", "White"];

	DEFAULT_COLORS
		.iter()
		.map(|name| FilamentSlot {
			hex_color: palette_hex(name).unwrap_or("#FFFFFF").to_string(),
			color_name: name.to_string(),
			brand: UNKNOWN.to_string(),
			material: UNKNOWN.to_string(),
			full_name: UNKNOWN.to_string(),
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn pairs_colors_with_settings_positionally() {
		let gcode = "; filament_colour = #FF0000;#0000FF\n\
		             ; filament_settings_id = \"PLA Red\";\"ABS Blue\"\n\
		             G28\n";
		let slots = extract_filament_info(gcode);

		assert_eq!(slots.len(), 2);
		assert_eq!(slots[0].hex_color, "#FF0000");
		assert_eq!(slots[0].color_name, "Red");
		assert_eq!(slots[0].brand, "PLA");
		assert_eq!(slots[0].material, "Red");
		assert_eq!(slots[0].full_name, "PLA Red");
		assert_eq!(slots[1].hex_color, "#0000FF");
		assert_eq!(slots[1].color_name, "Blue");
		assert_eq!(slots[1].brand, "ABS");
		assert_eq!(slots[1].material, "Blue");
		assert_eq!(slots[1].full_name, "ABS Blue");
	}

	#[test]
	fn missing_directives_fall_back_to_five_defaults() {
		let slots = extract_filament_info("G28\nG1 X10 Y10\n");

		let names: Vec<&str> = slots.iter().map(|s| s.color_name.as_str()).collect();
		assert_eq!(names, ["Yellow", "Blue", "Silver", "Green", "White"]);

		for slot in &slots {
			assert_eq!(slot.brand, "Unknown");
			assert_eq!(slot.material, "Unknown");
			assert_eq!(slot.full_name, "Unknown");
		}
	}

	#[test]
	fn more_colors_than_settings_pads_the_type_side() {
		let gcode = "; filament_colour = #FF0000;#0000FF\n\
		             ; filament_settings_id = \"PLA Red\"\n";
		let slots = extract_filament_info(gcode);

		assert_eq!(slots.len(), 2);
		assert_eq!(slots[1].hex_color, "#0000FF");
		assert_eq!(slots[1].brand, "Unknown");
		assert_eq!(slots[1].material, "Unknown");
		assert_eq!(slots[1].full_name, "Unknown");
	}

	#[test]
	fn more_settings_than_colors_pads_the_color_side() {
		let gcode = "; filament_colour = #FF0000\n\
		             ; filament_settings_id = \"PLA Red\";\"ABS Blue\"\n";
		let slots = extract_filament_info(gcode);

		assert_eq!(slots.len(), 2);
		assert_eq!(slots[1].hex_color, "#FFFFFF");
		assert_eq!(slots[1].color_name, "Unknown");
		assert_eq!(slots[1].brand, "ABS");
	}

	#[test]
	fn single_token_settings_keep_only_the_full_name() {
		let gcode = "; filament_colour = #00FF00\n\
		             ; filament_settings_id = \"PLA\"\n";
		let slots = extract_filament_info(gcode);

		assert_eq!(slots.len(), 1);
		assert_eq!(slots[0].brand, "Unknown");
		assert_eq!(slots[0].material, "Unknown");
		assert_eq!(slots[0].full_name, "PLA");
	}

	#[test]
	fn only_the_first_directive_occurrence_counts() {
		let gcode = "; filament_colour = #FF0000\n\
		             ; filament_colour = #0000FF\n";
		let slots = extract_filament_info(gcode);

		assert_eq!(slots.len(), 1);
		assert_eq!(slots[0].hex_color, "#FF0000");
	}

	#[test]
	fn malformed_color_entries_become_unknown() {
		let gcode = "; filament_colour = #ZZZZZZ\n";
		let slots = extract_filament_info(gcode);

		assert_eq!(slots.len(), 1);
		assert_eq!(slots[0].hex_color, "#ZZZZZZ");
		assert_eq!(slots[0].color_name, "Unknown");
	}
}
