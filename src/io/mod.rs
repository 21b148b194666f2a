//! Command line, image codecs, progress and reporting

/// Command-line parsing and invocation orchestration
pub mod cli;
/// Constants and defaults
pub mod configuration;
/// Error types and result alias
pub mod error;
/// Source decoding and tile encoding
pub mod image;
/// Progress display for tile writes
pub mod progress;
/// Source previews and run summaries
pub mod report;
