use std::path::PathBuf;

use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::StoryreelResult;
use crate::render::backend::FrameRGBA;

/// Configuration handed to a [`FrameSink`] before the first frame of a range.
#[derive(Debug, Clone, PartialEq)]
pub struct SinkConfig {
    pub width: u32,
    pub height: u32,
    pub fps: Fps,
    /// Narration track to mux alongside the frames.
    pub audio: Option<AudioInputConfig>,
}

/// Narration audio file for sinks that can mux audio.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioInputConfig {
    /// Any container/codec `ffmpeg` can decode.
    pub path: PathBuf,
    /// Audio is cut at this length (the rendered range's duration).
    pub duration_secs: f64,
}

/// Consumer of rendered frames.
///
/// `push_frame` is called in strictly increasing `FrameIndex` order within the requested range,
/// between exactly one `begin` and one `end`.
pub trait FrameSink: Send {
    fn begin(&mut self, cfg: SinkConfig) -> StoryreelResult<()>;
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> StoryreelResult<()>;
    fn end(&mut self) -> StoryreelResult<()>;
}

/// Keeps every pushed frame in memory. Used by tests and the PNG path.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, FrameRGBA)>,
    ended: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> Option<&SinkConfig> {
        self.cfg.as_ref()
    }

    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> StoryreelResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> StoryreelResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> StoryreelResult<()> {
        self.ended = true;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
