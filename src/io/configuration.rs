//! Slicing constants and runtime configuration defaults

// Naming
/// Template used when no output naming template is given
pub const DEFAULT_NAME_TEMPLATE: &str = "tile_{row}_{col}";

/// Infix between the source stem and the grid size in default output directories
pub const OUTPUT_DIR_INFIX: &str = "_split_";

/// Extension used when neither the source nor an override names a format
pub const FALLBACK_EXTENSION: &str = "png";

/// Name of the optional summary file written next to the tiles
pub const INFO_FILE_NAME: &str = "info.txt";

// Progress bar display settings
/// Width of the progress bar in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

/// Units for human-readable file sizes, smallest first
pub const FILE_SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
