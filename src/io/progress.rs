//! Progress display for tile writes

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use crate::slicing::slicer::PlannedTile;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static TILE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] Tiles: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Tracks written tiles on a single progress bar
///
/// The bar is hidden when progress output is disabled, so callers can report
/// unconditionally. Reporting is safe from multiple threads.
pub struct TileProgress {
    bar: ProgressBar,
}

impl TileProgress {
    /// Create a progress tracker for `total` tiles
    pub fn new(total: usize, visible: bool) -> Self {
        let bar = if visible {
            let bar = ProgressBar::new(total as u64);
            bar.set_style(TILE_STYLE.clone());
            bar
        } else {
            ProgressBar::hidden()
        };
        Self { bar }
    }

    /// Record one written tile
    pub fn tile_written(&self, tile: &PlannedTile) {
        self.bar.set_message(
            tile.path
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string(),
        );
        self.bar.inc(1);
    }

    /// Number of tiles recorded so far
    pub fn written(&self) -> u64 {
        self.bar.position()
    }

    /// Remove the progress display
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
