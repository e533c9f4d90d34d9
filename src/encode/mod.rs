//! Frame sinks: in-memory capture and `ffmpeg` MP4 encoding.

pub mod ffmpeg;
pub mod sink;
