mod colors;
mod filament;
mod paths;
mod scan;
mod state;

pub use colors::closest_css_color;
pub use filament::{extract_filament_info, FilamentSlot};
pub use paths::{default_gcode_dir, CURRENT_COLOR_FILE, STATE_FILE};
pub use scan::{find_latest_gcode, pre_scan};
pub use state::{ScanState, ToolChange};
