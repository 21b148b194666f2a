//! Error types for sticker sheet slicing

use std::fmt;
use std::path::PathBuf;

/// Main error type for all slicing operations
#[derive(Debug)]
pub enum SliceError {
    /// Source image could not be opened or decoded
    Decode {
        /// Path to the source image
        path: PathBuf,
        /// Underlying image decoding error
        source: image::ImageError,
    },

    /// Grid specification is invalid or infeasible for the source size
    ///
    /// Raised when rows or columns are zero, or when the computed cell
    /// width or height would be zero pixels.
    Dimension {
        /// Source image size (width, height)
        image: (u32, u32),
        /// Description of the infeasible grid
        reason: String,
    },

    /// A tile or the output directory could not be written
    Write {
        /// Path where the write was attempted
        path: PathBuf,
        /// Grid cell (row, column) being written, if any
        cell: Option<(u32, u32)>,
        /// Underlying image encoding or I/O error
        source: image::ImageError,
    },

    /// Command or option value failed validation
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Auxiliary file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for SliceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decode { path, source } => {
                write!(f, "Failed to decode image '{}': {source}", path.display())
            }
            Self::Dimension { image, reason } => {
                write!(
                    f,
                    "Invalid grid for {}x{} image: {reason}",
                    image.0, image.1
                )
            }
            Self::Write {
                path,
                cell: Some((row, col)),
                source,
            } => {
                write!(
                    f,
                    "Failed to write tile ({row}, {col}) to '{}': {source}",
                    path.display()
                )
            }
            Self::Write {
                path,
                cell: None,
                source,
            } => {
                write!(f, "Failed to write '{}': {source}", path.display())
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for SliceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decode { source, .. } | Self::Write { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            Self::Dimension { .. } | Self::InvalidParameter { .. } => None,
        }
    }
}

/// Convenience type alias for slicing results
pub type Result<T> = std::result::Result<T, SliceError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> SliceError {
    SliceError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a dimension error for an image of the given size
pub fn dimension_error(width: u32, height: u32, reason: &impl ToString) -> SliceError {
    SliceError::Dimension {
        image: (width, height),
        reason: reason.to_string(),
    }
}
