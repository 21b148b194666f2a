//! Tests for previews, plan listings and the info summary

#[cfg(test)]
mod tests {
    use crate::support::write_png;
    use std::fs;
    use stickercut::io::configuration::INFO_FILE_NAME;
    use stickercut::io::image::SourceImage;
    use stickercut::io::report::{
        ImagePreview, describe_plan, format_file_size, render_info, write_info_file,
    };
    use stickercut::slicing::grid::GridSpec;
    use stickercut::slicing::slicer::{SliceOptions, Slicer};

    // Tests byte counts scale through units with one decimal
    // Verified by dividing by 1000 instead of 1024
    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0.0 B");
        assert_eq!(format_file_size(1023), "1023.0 B");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_file_size(3 * 1024_u64.pow(5)), "3072.0 TB");
    }

    // Tests previews describe size, format and file size
    // Verified by reporting the color type as the format
    #[test]
    fn test_image_preview() {
        let temp = tempfile::tempdir().unwrap();
        let path = write_png(temp.path(), "sheet.png", 30, 20);
        let source = SourceImage::open(&path).unwrap();

        let preview = ImagePreview::from_source(&source).unwrap();

        assert_eq!((preview.width, preview.height), (30, 20));
        assert_eq!(preview.format, "Png");
        assert_eq!(preview.color, "Rgba8");
        assert_eq!(preview.file_size, fs::metadata(&path).unwrap().len());
        assert!(preview.to_string().contains("Size: 30x20 pixels"));
    }

    // Tests the plan listing shows the grid and every tile
    // Verified by listing only the first row
    #[test]
    fn test_describe_plan() {
        let temp = tempfile::tempdir().unwrap();
        let source = SourceImage::open(write_png(temp.path(), "sheet.png", 305, 200)).unwrap();
        let plan = Slicer::new(SliceOptions::new(GridSpec::Divisions { rows: 2, cols: 3 }))
            .plan(&source, Some(temp.path()))
            .unwrap();

        let listing = describe_plan(&plan);

        assert!(listing.contains("Grid: 2 rows x 3 columns (6 tiles)"));
        assert!(listing.contains("Tile size: 101x100 pixels"));
        assert!(listing.contains("Uncovered: 2 right, 0 bottom pixels"));
        assert!(listing.contains("(1, 2) 101x100+202+100 -> tile_1_2.png"));
    }

    // Tests the info summary records source and grid parameters
    // Verified by omitting the column count
    #[test]
    fn test_render_info() {
        let temp = tempfile::tempdir().unwrap();
        let source = SourceImage::open(write_png(temp.path(), "sheet.png", 40, 40)).unwrap();
        let plan = Slicer::new(SliceOptions::new(GridSpec::Divisions { rows: 4, cols: 2 }))
            .plan(&source, Some(temp.path()))
            .unwrap();

        let info = render_info(&source, &plan, 8);

        assert!(info.contains("Size: 40x40 pixels"));
        assert!(info.contains("Rows: 4"));
        assert!(info.contains("Columns: 2"));
        assert!(info.contains("Tile size: 20x10 pixels"));
        assert!(info.contains("Tiles written: 8"));
    }

    // Tests the info file lands in the output directory
    // Verified by writing next to the source instead
    #[test]
    fn test_write_info_file() {
        let temp = tempfile::tempdir().unwrap();
        let out = temp.path().join("out");
        fs::create_dir_all(&out).unwrap();
        let source = SourceImage::open(write_png(temp.path(), "sheet.png", 20, 20)).unwrap();
        let plan = Slicer::new(SliceOptions::new(GridSpec::Divisions { rows: 1, cols: 1 }))
            .plan(&source, Some(out.as_path()))
            .unwrap();

        let path = write_info_file(&source, &plan, 1).unwrap();

        assert_eq!(path, out.join(INFO_FILE_NAME));
        assert!(fs::read_to_string(path).unwrap().contains("Tiles written: 1"));
    }

    // Tests a missing output directory surfaces as a file system error
    // Verified by creating the directory on demand
    #[test]
    fn test_write_info_file_missing_dir() {
        let temp = tempfile::tempdir().unwrap();
        let source = SourceImage::open(write_png(temp.path(), "sheet.png", 20, 20)).unwrap();
        let plan = Slicer::new(SliceOptions::new(GridSpec::Divisions { rows: 1, cols: 1 }))
            .plan(&source, Some(temp.path().join("absent").as_path()))
            .unwrap();

        assert!(matches!(
            write_info_file(&source, &plan, 1),
            Err(stickercut::SliceError::FileSystem { .. })
        ));
    }
}
