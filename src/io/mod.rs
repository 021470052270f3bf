//! Input/output operations and error handling

/// Command-line interface
pub mod cli;
/// Constants and runtime configuration
pub mod configuration;
/// Error types
pub mod error;
/// Image loading and PNG export
pub mod image;
/// Terminal progress display
pub mod progress;
/// Stroke sources
pub mod strokes;
/// Rendering surface
pub mod surface;
/// GIF capture of the animation
pub mod visualization;
