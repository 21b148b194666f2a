//! CLI entry point for the sticker sheet slicer

use clap::Parser;
use stickercut::io::cli::{Cli, SliceProcessor};

fn main() -> stickercut::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    SliceProcessor::new(cli).process()
}
