//! Grid slicing of a decoded source image
//!
//! This module contains:
//! - Grid specification and cell geometry
//! - Output file naming templates
//! - The crop-and-save operation

/// Grid layout and cell geometry
pub mod grid;
/// Output file naming templates
pub mod naming;
/// Planning and executing a slicing run
pub mod slicer;

pub use grid::{Cell, EdgePolicy, GridLayout, GridSpec, LayoutOptions};
pub use slicer::{SliceOptions, Slicer};
