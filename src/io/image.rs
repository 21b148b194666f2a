//! Source decoding, output format resolution, and tile encoding

use crate::io::configuration::FALLBACK_EXTENSION;
use crate::io::error::{Result, SliceError, invalid_parameter};
use crate::slicing::grid::Cell;
use image::{ColorType, DynamicImage, ImageFormat, ImageReader};
use std::path::{Path, PathBuf};

/// Decoded source image together with where it came from
#[derive(Debug, Clone)]
pub struct SourceImage {
    /// Path the image was read from
    pub path: PathBuf,
    /// Decoded pixels
    pub image: DynamicImage,
    /// Container format detected from the file contents or extension
    pub format: Option<ImageFormat>,
}

impl SourceImage {
    /// Decode the image at `path`
    ///
    /// The format is guessed from the file contents first and the extension
    /// second.
    ///
    /// # Errors
    ///
    /// Returns a decode error if the file cannot be opened, its format cannot
    /// be determined, or its pixels cannot be decoded
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_buf = path.as_ref().to_path_buf();
        let decode_error = |source: image::ImageError| SliceError::Decode {
            path: path_buf.clone(),
            source,
        };

        let reader = ImageReader::open(&path_buf)
            .and_then(ImageReader::with_guessed_format)
            .map_err(|e| decode_error(image::ImageError::IoError(e)))?;
        let format = reader.format();
        let image = reader.decode().map_err(decode_error)?;

        log::debug!(
            "decoded {} ({}x{}, {format:?}, {:?})",
            path_buf.display(),
            image.width(),
            image.height(),
            image.color()
        );

        Ok(Self {
            path: path_buf,
            image,
            format,
        })
    }

    /// Image width in pixels
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Image height in pixels
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// File stem of the source path, used for naming
    pub fn stem(&self) -> String {
        file_stem(&self.path)
    }
}

/// File stem of `path`, empty when the path has none
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

/// Encoding used for every tile of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFormat {
    /// Encoder format
    pub format: ImageFormat,
    /// File extension without the leading dot
    pub extension: String,
}

impl OutputFormat {
    /// Choose the tile format for `source`, honoring an explicit extension override
    ///
    /// Without an override the detected source format is kept, and the source
    /// file's own extension is reused when it maps to that format.
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error if the override names no known format
    pub fn resolve(source: &SourceImage, override_extension: Option<&str>) -> Result<Self> {
        if let Some(requested) = override_extension {
            let extension = requested.trim_start_matches('.').to_ascii_lowercase();
            let format = ImageFormat::from_extension(&extension).ok_or_else(|| {
                invalid_parameter("format", &requested, &"unrecognized image format")
            })?;
            return Ok(Self { format, extension });
        }

        let source_extension = source
            .path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let from_extension = source_extension
            .as_deref()
            .and_then(ImageFormat::from_extension);

        let Some(format) = source.format.or(from_extension) else {
            log::warn!(
                "could not determine the format of {}, writing {FALLBACK_EXTENSION}",
                source.path.display()
            );
            return Ok(Self {
                format: ImageFormat::Png,
                extension: FALLBACK_EXTENSION.to_string(),
            });
        };

        let extension = match source_extension {
            Some(ext) if from_extension == Some(format) => ext,
            _ => format
                .extensions_str()
                .first()
                .copied()
                .unwrap_or(FALLBACK_EXTENSION)
                .to_string(),
        };

        Ok(Self { format, extension })
    }
}

/// Convert `tile` to a color type the target encoder accepts
///
/// JPEG cannot store alpha or 16-bit samples, so anything other than 8-bit
/// gray or RGB becomes 8-bit RGB. Other formats receive the tile unchanged.
pub fn prepare_for_format(tile: DynamicImage, format: ImageFormat) -> DynamicImage {
    match (format, tile.color()) {
        (ImageFormat::Jpeg, ColorType::L8 | ColorType::Rgb8) => tile,
        (ImageFormat::Jpeg, _) => DynamicImage::ImageRgb8(tile.to_rgb8()),
        _ => tile,
    }
}

/// Encode one tile to `path`
///
/// # Errors
///
/// Returns a write error naming `cell` if the file cannot be created or the
/// encoder rejects the tile
pub fn save_tile(tile: DynamicImage, path: &Path, format: ImageFormat, cell: &Cell) -> Result<()> {
    prepare_for_format(tile, format)
        .save_with_format(path, format)
        .map_err(|e| SliceError::Write {
            path: path.to_path_buf(),
            cell: Some((cell.row, cell.col)),
            source: e,
        })
}
