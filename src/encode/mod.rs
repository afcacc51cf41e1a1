//! Frame sinks.
//!
//! Sinks consume rendered frames in tick order and are driven by [`crate::Player`].

/// `ffmpeg`-based sink (MP4 output via system `ffmpeg`).
pub(crate) mod ffmpeg;
/// Generic frame sink trait and built-in sinks.
pub(crate) mod sink;
