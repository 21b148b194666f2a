//! Grid layout computation and cell geometry
//!
//! A [`GridSpec`] is resolved against the decoded source size into a
//! [`GridLayout`]. Cells are `floor(W / C)` by `floor(H / R)` pixels; the
//! remainder on the right and bottom edges is handled by the [`EdgePolicy`].

use crate::io::error::{Result, dimension_error};

/// How a source image is partitioned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridSpec {
    /// Fixed number of rows and columns
    Divisions {
        /// Number of rows (vertical divisions)
        rows: u32,
        /// Number of columns (horizontal divisions)
        cols: u32,
    },
    /// Fixed cell size in pixels; rows and columns follow from the source size
    CellSize {
        /// Cell width in pixels
        width: u32,
        /// Cell height in pixels
        height: u32,
    },
}

/// Treatment of pixels left over when the grid does not divide the image evenly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum EdgePolicy {
    /// Every cell has the same size; trailing remainder pixels are dropped
    #[default]
    Drop,
    /// The last column and row extend to the image edge
    Absorb,
}

/// Geometry options applied on top of the grid specification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutOptions {
    /// Remainder handling on the trailing edges
    pub edge: EdgePolicy,
    /// Pixels added on every side of a cell along axes with more than one division
    pub overlap: u32,
    /// Derive cell height from cell width using the source aspect ratio
    pub keep_aspect_ratio: bool,
}

/// One rectangular region of the source image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// 0-based row index
    pub row: u32,
    /// 0-based column index
    pub col: u32,
    /// 0-based sequential index (`row * cols + col`)
    pub index: u32,
    /// Left edge (inclusive)
    pub x: u32,
    /// Top edge (inclusive)
    pub y: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Cell {
    /// Right edge (exclusive)
    pub const fn x1(&self) -> u32 {
        self.x + self.width
    }

    /// Bottom edge (exclusive)
    pub const fn y1(&self) -> u32 {
        self.y + self.height
    }

    /// Pixel area of the cell
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// Grid specification resolved against a concrete source size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    image_width: u32,
    image_height: u32,
    rows: u32,
    cols: u32,
    cell_width: u32,
    cell_height: u32,
    options: LayoutOptions,
}

impl GridLayout {
    /// Resolve a grid specification for an image of `image_width` x `image_height`
    ///
    /// # Errors
    ///
    /// Returns a dimension error if:
    /// - Rows, columns, or a requested cell size are zero
    /// - The computed cell width or height is zero pixels
    /// - Cell height derived from the aspect ratio does not fit `rows` times
    pub fn new(
        image_width: u32,
        image_height: u32,
        spec: GridSpec,
        options: LayoutOptions,
    ) -> Result<Self> {
        let (rows, cols) = match spec {
            GridSpec::Divisions { rows, cols } => {
                if rows == 0 || cols == 0 {
                    return Err(dimension_error(
                        image_width,
                        image_height,
                        &format!("rows and columns must be at least 1 (got {rows}x{cols})"),
                    ));
                }
                (rows, cols)
            }
            GridSpec::CellSize { width, height } => {
                if width == 0 || height == 0 {
                    return Err(dimension_error(
                        image_width,
                        image_height,
                        &format!("cell size must be at least 1x1 (got {width}x{height})"),
                    ));
                }
                let cols = image_width / width;
                let rows = image_height / height;
                if cols == 0 || rows == 0 {
                    return Err(dimension_error(
                        image_width,
                        image_height,
                        &format!("a {width}x{height} cell does not fit inside the image"),
                    ));
                }
                (rows, cols)
            }
        };

        let cell_width = image_width / cols;
        let mut cell_height = image_height / rows;

        if cell_width == 0 || cell_height == 0 {
            return Err(dimension_error(
                image_width,
                image_height,
                &format!("{rows}x{cols} grid leaves cells of {cell_width}x{cell_height} pixels"),
            ));
        }

        if options.keep_aspect_ratio {
            cell_height = (u64::from(cell_width) * u64::from(image_height)
                / u64::from(image_width)) as u32;
            if cell_height == 0 || u64::from(cell_height) * u64::from(rows) > u64::from(image_height)
            {
                return Err(dimension_error(
                    image_width,
                    image_height,
                    &format!(
                        "{rows} rows of aspect-preserving {cell_width}x{cell_height} cells do not fit"
                    ),
                ));
            }
        }

        Ok(Self {
            image_width,
            image_height,
            rows,
            cols,
            cell_width,
            cell_height,
            options,
        })
    }

    /// Number of rows
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns
    pub const fn cols(&self) -> u32 {
        self.cols
    }

    /// Nominal cell width before edge and overlap adjustments
    pub const fn cell_width(&self) -> u32 {
        self.cell_width
    }

    /// Nominal cell height before edge and overlap adjustments
    pub const fn cell_height(&self) -> u32 {
        self.cell_height
    }

    /// Source image size (width, height)
    pub const fn image_size(&self) -> (u32, u32) {
        (self.image_width, self.image_height)
    }

    /// Options the layout was resolved with
    pub const fn options(&self) -> LayoutOptions {
        self.options
    }

    /// Total number of cells
    pub const fn cell_count(&self) -> u32 {
        self.rows * self.cols
    }

    /// Width spanned by the nominal grid, ignoring overlap
    pub const fn covered_width(&self) -> u32 {
        match self.options.edge {
            EdgePolicy::Drop => self.cols * self.cell_width,
            EdgePolicy::Absorb => self.image_width,
        }
    }

    /// Height spanned by the nominal grid, ignoring overlap
    pub const fn covered_height(&self) -> u32 {
        match self.options.edge {
            EdgePolicy::Drop => self.rows * self.cell_height,
            EdgePolicy::Absorb => self.image_height,
        }
    }

    /// Pixel columns on the right edge not covered by any cell
    pub const fn dropped_width(&self) -> u32 {
        self.image_width - self.covered_width()
    }

    /// Pixel rows on the bottom edge not covered by any cell
    pub const fn dropped_height(&self) -> u32 {
        self.image_height - self.covered_height()
    }

    /// Cell at (`row`, `col`), or `None` outside the grid
    pub fn cell(&self, row: u32, col: u32) -> Option<Cell> {
        if row >= self.rows || col >= self.cols {
            return None;
        }

        let (x, x1) = self.span(col, self.cols, self.cell_width, self.image_width);
        let (y, y1) = self.span(row, self.rows, self.cell_height, self.image_height);

        Some(Cell {
            row,
            col,
            index: row * self.cols + col,
            x,
            y,
            width: x1 - x,
            height: y1 - y,
        })
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows)
            .flat_map(move |row| (0..self.cols).filter_map(move |col| self.cell(row, col)))
    }

    // Start and exclusive end of a cell along one axis
    fn span(&self, position: u32, divisions: u32, size: u32, extent: u32) -> (u32, u32) {
        let start = position * size;
        let end = if self.options.edge == EdgePolicy::Absorb && position + 1 == divisions {
            extent
        } else {
            start + size
        };

        if divisions > 1 && self.options.overlap > 0 {
            (
                start.saturating_sub(self.options.overlap),
                end.saturating_add(self.options.overlap).min(extent),
            )
        } else {
            (start, end)
        }
    }
}
