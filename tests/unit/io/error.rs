//! Tests for error types including source chaining and message formatting

#[cfg(test)]
mod tests {
    use std::error::Error;
    use std::path::PathBuf;
    use stickercut::SliceError;
    use stickercut::io::error::{dimension_error, invalid_parameter};

    fn io_image_error(kind: std::io::ErrorKind, message: &str) -> image::ImageError {
        image::ImageError::IoError(std::io::Error::new(kind, message))
    }

    // Tests decode errors name the file and chain the source
    // Verified by omitting the path from the message
    #[test]
    fn test_decode_error() {
        let error = SliceError::Decode {
            path: PathBuf::from("/stickers/sheet.png"),
            source: io_image_error(std::io::ErrorKind::NotFound, "file not found"),
        };

        let message = error.to_string();
        assert!(message.contains("/stickers/sheet.png"));
        assert!(message.contains("file not found"));
        assert!(error.source().is_some());
    }

    // Tests dimension errors include the image size
    // Verified by omitting the size from the message
    #[test]
    fn test_dimension_error() {
        let error = dimension_error(300, 200, &"cells of 0x100 pixels");

        let message = error.to_string();
        assert!(message.contains("300x200"));
        assert!(message.contains("cells of 0x100 pixels"));
        assert!(error.source().is_none());
    }

    // Tests write errors identify the cell being written
    // Verified by dropping the cell from the message
    #[test]
    fn test_write_error_with_cell() {
        let error = SliceError::Write {
            path: PathBuf::from("/restricted/tile_1_2.png"),
            cell: Some((1, 2)),
            source: io_image_error(std::io::ErrorKind::PermissionDenied, "access denied"),
        };

        let message = error.to_string();
        assert!(message.contains("(1, 2)"));
        assert!(message.contains("/restricted/tile_1_2.png"));
        assert!(message.contains("access denied"));
        assert!(error.source().is_some());
    }

    // Tests write errors without a cell describe only the path
    // Verified by formatting a placeholder cell
    #[test]
    fn test_write_error_without_cell() {
        let error = SliceError::Write {
            path: PathBuf::from("/restricted"),
            cell: None,
            source: io_image_error(std::io::ErrorKind::PermissionDenied, "access denied"),
        };

        let message = error.to_string();
        assert!(message.starts_with("Failed to write '/restricted'"));
        assert!(!message.contains("tile ("));
    }

    // Tests InvalidParameter error contains all fields
    // Verified by omitting value from message
    #[test]
    fn test_invalid_parameter_error() {
        let error = invalid_parameter("format", &"xyz", &"unrecognized image format");

        let message = error.to_string();
        assert!(message.contains("format"));
        assert!(message.contains("xyz"));
        assert!(message.contains("unrecognized image format"));
        assert!(error.source().is_none());
    }

    // Tests file system errors chain the I/O source
    // Verified by breaking source chain
    #[test]
    fn test_file_system_error() {
        let error = SliceError::FileSystem {
            path: "/tmp/info.txt".into(),
            operation: "write summary",
            source: std::io::Error::other("disk full"),
        };

        assert!(error.to_string().contains("write summary"));
        assert!(error.source().is_some());
    }
}
