//! The slicing operation: decode, lay out, crop, and save every cell
//!
//! Planning resolves the grid and every output path before any file is
//! touched, so validation failures leave the output directory untouched.
//! Cells are independent; they are written in row-major order by default or
//! on a `rayon` pool when parallel execution is requested.

use crate::io::configuration::OUTPUT_DIR_INFIX;
use crate::io::error::{Result, SliceError, invalid_parameter};
use crate::io::image::{OutputFormat, SourceImage, file_stem, save_tile};
use crate::slicing::grid::{Cell, GridLayout, GridSpec, LayoutOptions};
use crate::slicing::naming::NameTemplate;
use image::DynamicImage;
use rayon::prelude::{IntoParallelRefIterator, ParallelIterator};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// How cells are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Execution {
    /// One cell after another on the calling thread
    #[default]
    Sequential,
    /// Cells written concurrently on a dedicated thread pool
    Parallel {
        /// Worker count; `None` uses one worker per logical CPU
        jobs: Option<usize>,
    },
}

/// Everything needed to slice a source image, except the source itself
#[derive(Debug, Clone)]
pub struct SliceOptions {
    /// Grid partition of the source
    pub grid: GridSpec,
    /// Edge policy, overlap, and aspect handling
    pub layout: LayoutOptions,
    /// Output file naming template
    pub template: NameTemplate,
    /// Output format extension overriding the source format
    pub format: Option<String>,
    /// Sequential or parallel writes
    pub execution: Execution,
}

impl SliceOptions {
    /// Options for a plain grid with default naming, format, and geometry
    pub fn new(grid: GridSpec) -> Self {
        Self {
            grid,
            layout: LayoutOptions::default(),
            template: NameTemplate::default(),
            format: None,
            execution: Execution::default(),
        }
    }
}

/// One cell and the file it will be written to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedTile {
    /// Source region
    pub cell: Cell,
    /// Destination file
    pub path: PathBuf,
}

/// Fully resolved slicing run
#[derive(Debug, Clone)]
pub struct SlicePlan {
    /// Resolved grid geometry
    pub layout: GridLayout,
    /// Tile encoding
    pub format: OutputFormat,
    /// Directory receiving the tiles
    pub output_dir: PathBuf,
    /// Tiles in row-major order
    pub tiles: Vec<PlannedTile>,
}

/// Outcome of a completed run
#[derive(Debug, Clone)]
pub struct SliceSummary {
    /// Plan that was executed
    pub plan: SlicePlan,
    /// Written files in row-major order
    pub files: Vec<PathBuf>,
}

/// Default output directory: `<source dir>/<stem>_split_<rows>x<cols>`
pub fn default_output_dir(source: &Path, rows: u32, cols: u32) -> PathBuf {
    let name = format!("{}{OUTPUT_DIR_INFIX}{rows}x{cols}", file_stem(source));

    match source.parent() {
        Some(parent) => parent.join(name),
        None => PathBuf::from(name),
    }
}

/// Copy the pixels of `cell` out of `image`
pub fn crop_cell(image: &DynamicImage, cell: &Cell) -> DynamicImage {
    image.crop_imm(cell.x, cell.y, cell.width, cell.height)
}

/// Slices source images into grid tiles
#[derive(Debug, Clone)]
pub struct Slicer {
    options: SliceOptions,
}

impl Slicer {
    /// Create a slicer with the given options
    pub const fn new(options: SliceOptions) -> Self {
        Self { options }
    }

    /// Options this slicer runs with
    pub const fn options(&self) -> &SliceOptions {
        &self.options
    }

    /// Decode `source_path` and write every tile
    ///
    /// # Errors
    ///
    /// Returns an error if decoding, planning, or any tile write fails. Tiles
    /// written before a failure stay on disk.
    pub fn run(&self, source_path: &Path, output_dir: Option<&Path>) -> Result<SliceSummary> {
        let source = SourceImage::open(source_path)?;
        let plan = self.plan(&source, output_dir)?;
        let files = self.execute(&source, &plan, |_| {})?;
        Ok(SliceSummary { plan, files })
    }

    /// Resolve layout, format, and output paths for `source` without writing
    ///
    /// When `output_dir` is `None` the [`default_output_dir`] is used.
    ///
    /// # Errors
    ///
    /// Returns a dimension error for an infeasible grid, or an invalid
    /// parameter error for an unknown format override or a template that
    /// renders the same file name for two cells
    pub fn plan(&self, source: &SourceImage, output_dir: Option<&Path>) -> Result<SlicePlan> {
        let layout = GridLayout::new(
            source.width(),
            source.height(),
            self.options.grid,
            self.options.layout,
        )?;
        let format = OutputFormat::resolve(source, self.options.format.as_deref())?;
        let output_dir = output_dir.map_or_else(
            || default_output_dir(&source.path, layout.rows(), layout.cols()),
            Path::to_path_buf,
        );

        if layout.dropped_width() > 0 || layout.dropped_height() > 0 {
            log::warn!(
                "{}x{} grid leaves {} right and {} bottom pixels of {} uncovered",
                layout.rows(),
                layout.cols(),
                layout.dropped_width(),
                layout.dropped_height(),
                source.path.display()
            );
        }

        let stem = source.stem();
        let tiles: Vec<PlannedTile> = layout
            .cells()
            .map(|cell| PlannedTile {
                cell,
                path: output_dir.join(self.options.template.file_name(
                    &cell,
                    &stem,
                    &format.extension,
                )),
            })
            .collect();

        let mut seen = HashSet::with_capacity(tiles.len());
        if let Some(tile) = tiles.iter().find(|tile| !seen.insert(&tile.path)) {
            return Err(invalid_parameter(
                "template",
                &self.options.template.as_str(),
                &format!(
                    "cell ({}, {}) renders to '{}', already used by another cell",
                    tile.cell.row,
                    tile.cell.col,
                    tile.path.display()
                ),
            ));
        }

        Ok(SlicePlan {
            layout,
            format,
            output_dir,
            tiles,
        })
    }

    /// Write every planned tile, calling `on_tile` after each one
    ///
    /// The output directory is created first. Under parallel execution
    /// `on_tile` may be called from several threads in any order; the call
    /// still returns only once every tile is written.
    ///
    /// # Errors
    ///
    /// Returns a file system error if the output directory cannot be created
    /// and a write error if a tile cannot be encoded; under parallel execution
    /// the first failure observed is returned. Returns an invalid parameter error if the worker
    /// pool cannot be built.
    pub fn execute<F>(
        &self,
        source: &SourceImage,
        plan: &SlicePlan,
        on_tile: F,
    ) -> Result<Vec<PathBuf>>
    where
        F: Fn(&PlannedTile) + Sync,
    {
        std::fs::create_dir_all(&plan.output_dir).map_err(|e| SliceError::FileSystem {
            path: plan.output_dir.clone(),
            operation: "create output directory",
            source: e,
        })?;

        log::info!(
            "slicing {} into {} tiles in {}",
            source.path.display(),
            plan.tiles.len(),
            plan.output_dir.display()
        );

        let write = |tile: &PlannedTile| -> Result<PathBuf> {
            save_tile(
                crop_cell(&source.image, &tile.cell),
                &tile.path,
                plan.format.format,
                &tile.cell,
            )?;
            log::debug!(
                "wrote tile ({}, {}) {}x{} -> {}",
                tile.cell.row,
                tile.cell.col,
                tile.cell.width,
                tile.cell.height,
                tile.path.display()
            );
            on_tile(tile);
            Ok(tile.path.clone())
        };

        match self.options.execution {
            Execution::Sequential => plan.tiles.iter().map(write).collect(),
            Execution::Parallel { jobs } => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(jobs.unwrap_or(0))
                    .build()
                    .map_err(|e| invalid_parameter("jobs", &jobs.unwrap_or(0), &e))?;
                log::debug!("writing tiles on {} workers", pool.current_num_threads());
                pool.install(|| plan.tiles.par_iter().map(write).collect())
            }
        }
    }
}
