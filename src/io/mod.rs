/// Command-line interface and batch processing
pub mod cli;
/// Compile-time defaults and limits
pub mod configuration;
/// Crate error type
pub mod error;
/// Path overlay export
pub mod image;
/// Cost map decoding, generation, and grid construction
pub mod map;
/// Progress reporting for batch runs
pub mod progress;
