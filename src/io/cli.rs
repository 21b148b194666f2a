//! Command-line interface for slicing a sticker sheet into grid tiles

use crate::io::configuration::DEFAULT_NAME_TEMPLATE;
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::SourceImage;
use crate::io::progress::TileProgress;
use crate::io::report::{ImagePreview, describe_plan, write_info_file};
use crate::slicing::grid::{EdgePolicy, GridSpec, LayoutOptions};
use crate::slicing::naming::NameTemplate;
use crate::slicing::slicer::{Execution, SliceOptions, Slicer};
use clap::{ArgGroup, Parser};
use std::path::PathBuf;
use std::time::Instant;

/// Parse a `AxB` pair such as `2x3`, `64X64` or `4×4`
///
/// # Errors
///
/// Returns a message if the separator is missing or either side is not an
/// unsigned integer
pub fn parse_pair(value: &str) -> std::result::Result<(u32, u32), String> {
    let (first, second) = value
        .split_once(['x', 'X', '×'])
        .ok_or_else(|| format!("expected two numbers separated by 'x', got '{value}'"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<u32>()
            .map_err(|e| format!("'{part}' in '{value}': {e}"))
    };
    Ok((parse(first)?, parse(second)?))
}

#[derive(Parser, Debug)]
#[command(name = "stickercut")]
#[command(
    author,
    version,
    about = "Slice a sticker sheet into a folder of equally sized tiles"
)]
#[command(group(ArgGroup::new("layout").required(true).args(["grid", "cell"])))]
/// Command-line arguments for the sticker slicer
// Independent on/off switches
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Source image to slice
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Output directory (default: <source dir>/<stem>_split_<rows>x<cols>)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Grid as rows x columns, e.g. 2x3
    #[arg(short, long, value_name = "RxC", value_parser = parse_pair)]
    pub grid: Option<(u32, u32)>,

    /// Cell size as width x height in pixels, e.g. 128x128
    #[arg(short, long, value_name = "WxH", value_parser = parse_pair)]
    pub cell: Option<(u32, u32)>,

    /// File name template; fields: {row} {col} {index} {width} {height} {stem}
    #[arg(short, long, default_value = DEFAULT_NAME_TEMPLATE)]
    pub template: String,

    /// Output format extension (default: same as source)
    #[arg(short, long, value_name = "EXT")]
    pub format: Option<String>,

    /// Handling of pixels left over when the grid does not divide the image
    #[arg(long, value_enum, default_value_t = EdgePolicy::Drop)]
    pub edge: EdgePolicy,

    /// Pixels each tile extends past its cell on every inner side
    #[arg(long, default_value_t = 0)]
    pub overlap: u32,

    /// Derive tile height from tile width using the source aspect ratio
    #[arg(long)]
    pub keep_aspect: bool,

    /// Write an info.txt summary next to the tiles
    #[arg(long)]
    pub info: bool,

    /// Print the plan without writing any file
    #[arg(long)]
    pub dry_run: bool,

    /// Write tiles concurrently
    #[arg(short, long)]
    pub parallel: bool,

    /// Worker threads for --parallel (default: one per CPU)
    #[arg(short, long, value_name = "N", requires = "parallel")]
    pub jobs: Option<usize>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Grid specification selected on the command line
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error if neither `--grid` nor `--cell`
    /// was given
    pub fn grid_spec(&self) -> Result<GridSpec> {
        match (self.grid, self.cell) {
            (Some((rows, cols)), _) => Ok(GridSpec::Divisions { rows, cols }),
            (None, Some((width, height))) => Ok(GridSpec::CellSize { width, height }),
            (None, None) => Err(invalid_parameter(
                "grid",
                &"",
                &"either --grid or --cell is required",
            )),
        }
    }

    /// Build slicing options from the parsed arguments
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error if the grid is missing or the
    /// naming template is invalid
    pub fn slice_options(&self) -> Result<SliceOptions> {
        Ok(SliceOptions {
            grid: self.grid_spec()?,
            layout: LayoutOptions {
                edge: self.edge,
                overlap: self.overlap,
                keep_aspect_ratio: self.keep_aspect,
            },
            template: NameTemplate::parse(&self.template)?,
            format: self.format.clone(),
            execution: if self.parallel {
                Execution::Parallel { jobs: self.jobs }
            } else {
                Execution::Sequential
            },
        })
    }
}

/// Runs one slicing invocation with progress and reporting
pub struct SliceProcessor {
    cli: Cli,
}

impl SliceProcessor {
    /// Create a processor for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Slice the source image according to CLI arguments
    ///
    /// Options are validated before the source is decoded, and the source
    /// is decoded before anything is written.
    ///
    /// # Errors
    ///
    /// Returns an error if option validation, decoding, planning, or any
    /// write fails
    // Allow print for the dry-run listing and completion message
    #[allow(clippy::print_stdout, clippy::print_stderr)]
    pub fn process(&self) -> Result<()> {
        let start_time = Instant::now();
        let slicer = Slicer::new(self.cli.slice_options()?);

        let source = SourceImage::open(&self.cli.source)?;
        let plan = slicer.plan(&source, self.cli.output.as_deref())?;

        if self.cli.dry_run {
            println!("{}", ImagePreview::from_source(&source)?);
            println!("{}", describe_plan(&plan));
            return Ok(());
        }

        let progress = TileProgress::new(plan.tiles.len(), self.cli.should_show_progress());
        let result = slicer.execute(&source, &plan, |tile| progress.tile_written(tile));
        progress.finish();
        let files = result?;

        if self.cli.info {
            write_info_file(&source, &plan, files.len())?;
        }

        log::info!(
            "wrote {} tiles in {:.2?}",
            files.len(),
            start_time.elapsed()
        );
        if !self.cli.quiet {
            eprintln!(
                "Wrote {} tiles to {}",
                files.len(),
                plan.output_dir.display()
            );
        }

        Ok(())
    }
}
