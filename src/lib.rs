//! Grid slicing of sticker sheets into individual sticker tiles
//!
//! A source image is decoded, partitioned into a rectangular grid of equally
//! sized cells, and every cell is cropped and written as its own image file
//! into a flat output directory.

#![forbid(unsafe_code)]

/// Input/output operations, configuration and error handling
pub mod io;
/// Grid geometry, tile naming and the slicing operation
pub mod slicing;

pub use io::error::{Result, SliceError};
