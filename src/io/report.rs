//! Source previews and the optional `info.txt` run summary

use crate::io::configuration::{FILE_SIZE_UNITS, INFO_FILE_NAME};
use crate::io::error::{Result, SliceError};
use crate::io::image::SourceImage;
use crate::slicing::slicer::SlicePlan;
use std::fmt;
use std::path::PathBuf;

/// Format a byte count with one decimal and a binary unit, e.g. `1.5 KB`
pub fn format_file_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    let last = FILE_SIZE_UNITS.len() - 1;
    for (i, unit) in FILE_SIZE_UNITS.iter().enumerate() {
        if size < 1024.0 || i == last {
            return format!("{size:.1} {unit}");
        }
        size /= 1024.0;
    }
    format!("{bytes} B")
}

/// Human-facing description of a decoded source image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePreview {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Detected container format, `Unknown` if undetected
    pub format: String,
    /// Decoded color type
    pub color: String,
    /// Size of the source file in bytes
    pub file_size: u64,
}

impl ImagePreview {
    /// Describe `source`, reading its file size from disk
    ///
    /// # Errors
    ///
    /// Returns a file system error if the source file metadata cannot be read
    pub fn from_source(source: &SourceImage) -> Result<Self> {
        let metadata = std::fs::metadata(&source.path).map_err(|e| SliceError::FileSystem {
            path: source.path.clone(),
            operation: "read metadata",
            source: e,
        })?;

        Ok(Self {
            width: source.width(),
            height: source.height(),
            format: source
                .format
                .map_or_else(|| "Unknown".to_string(), |f| format!("{f:?}")),
            color: format!("{:?}", source.image.color()),
            file_size: metadata.len(),
        })
    }
}

impl fmt::Display for ImagePreview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Size: {}x{} pixels", self.width, self.height)?;
        writeln!(f, "Format: {}", self.format)?;
        writeln!(f, "Color: {}", self.color)?;
        write!(f, "File size: {}", format_file_size(self.file_size))
    }
}

/// Render the plan as the human-readable listing shown for dry runs
pub fn describe_plan(plan: &SlicePlan) -> String {
    let layout = &plan.layout;
    let mut lines = vec![
        format!(
            "Grid: {} rows x {} columns ({} tiles)",
            layout.rows(),
            layout.cols(),
            plan.tiles.len()
        ),
        format!(
            "Tile size: {}x{} pixels",
            layout.cell_width(),
            layout.cell_height()
        ),
        format!(
            "Uncovered: {} right, {} bottom pixels",
            layout.dropped_width(),
            layout.dropped_height()
        ),
        format!("Output: {}", plan.output_dir.display()),
    ];
    lines.extend(plan.tiles.iter().map(|tile| {
        format!(
            "  ({}, {}) {}x{}+{}+{} -> {}",
            tile.cell.row,
            tile.cell.col,
            tile.cell.width,
            tile.cell.height,
            tile.cell.x,
            tile.cell.y,
            tile.path
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
        )
    }));
    lines.join("\n")
}

/// Render the contents of the `info.txt` summary
pub fn render_info(source: &SourceImage, plan: &SlicePlan, written: usize) -> String {
    let layout = &plan.layout;
    let options = layout.options();
    let format = source
        .format
        .map_or_else(|| "Unknown".to_string(), |f| format!("{f:?}"));

    [
        "Source:".to_string(),
        format!("  Path: {}", source.path.display()),
        format!("  Size: {}x{} pixels", source.width(), source.height()),
        format!("  Format: {format}"),
        String::new(),
        "Slicing:".to_string(),
        format!("  Rows: {}", layout.rows()),
        format!("  Columns: {}", layout.cols()),
        format!("  Edge policy: {:?}", options.edge),
        format!("  Overlap: {}", options.overlap),
        format!("  Keep aspect ratio: {}", options.keep_aspect_ratio),
        format!(
            "  Tile size: {}x{} pixels",
            layout.cell_width(),
            layout.cell_height()
        ),
        format!("  Output format: {:?}", plan.format.format),
        format!("  Tiles written: {written}"),
        String::new(),
    ]
    .join("\n")
}

/// Write `info.txt` into the plan's output directory
///
/// # Errors
///
/// Returns a file system error if the file cannot be written
pub fn write_info_file(source: &SourceImage, plan: &SlicePlan, written: usize) -> Result<PathBuf> {
    let path = plan.output_dir.join(INFO_FILE_NAME);
    std::fs::write(&path, render_info(source, plan, written)).map_err(|e| {
        SliceError::FileSystem {
            path: path.clone(),
            operation: "write summary",
            source: e,
        }
    })?;
    Ok(path)
}
