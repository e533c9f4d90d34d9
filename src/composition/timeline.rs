use crate::composition::settings::CompositionSettings;
use crate::foundation::core::{Fps, FrameIndex, FrameRange};
use crate::foundation::error::StoryreelResult;
use crate::storyboard::model::Storyboard;

/// Frame layout of the video: an intro title card followed by equal-length segment slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Timeline {
    pub fps: Fps,
    pub title_frames: u64,
    pub segment_frames: u64,
    pub segment_count: usize,
    /// Composition length; may be shorter or longer than [`Timeline::total_frames`].
    pub duration: u64,
}

/// What occupies a given frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    Intro { local: u64 },
    Segment { index: usize, start: u64, local: u64 },
    /// Past the last segment: background and overlay only.
    Tail,
}

impl Timeline {
    pub fn new(settings: &CompositionSettings, segment_count: usize) -> StoryreelResult<Self> {
        settings.validate()?;
        let fps = settings.fps()?;
        let title_frames = fps.secs_to_frames_round(settings.title_secs);
        let segment_frames = fps.secs_to_frames_round(settings.segment_secs);
        let total = title_frames + segment_count as u64 * segment_frames;
        Ok(Self {
            fps,
            title_frames,
            segment_frames,
            segment_count,
            duration: settings.duration_frames.unwrap_or(total).max(1),
        })
    }

    /// Frames needed to show the intro and every segment.
    pub fn total_frames(&self) -> u64 {
        self.title_frames + self.segment_count as u64 * self.segment_frames
    }

    pub fn segment_start(&self, index: usize) -> u64 {
        self.title_frames + index as u64 * self.segment_frames
    }

    pub fn intro_range(&self) -> FrameRange {
        FrameRange {
            start: FrameIndex(0),
            end: FrameIndex(self.title_frames),
        }
    }

    pub fn segment_range(&self, index: usize) -> FrameRange {
        let start = self.segment_start(index);
        FrameRange {
            start: FrameIndex(start),
            end: FrameIndex(start + self.segment_frames),
        }
    }

    pub fn full_range(&self) -> FrameRange {
        FrameRange {
            start: FrameIndex(0),
            end: FrameIndex(self.duration),
        }
    }

    pub fn slot_at(&self, frame: FrameIndex) -> Slot {
        let f = frame.0;
        if f < self.title_frames {
            return Slot::Intro { local: f };
        }
        if self.segment_frames == 0 {
            return Slot::Tail;
        }
        let index = ((f - self.title_frames) / self.segment_frames) as usize;
        if index >= self.segment_count {
            return Slot::Tail;
        }
        let start = self.segment_start(index);
        Slot::Segment {
            index,
            start,
            local: f - start,
        }
    }

    /// Human-readable schedule of `storyboard` on this timeline.
    pub fn entries(&self, storyboard: &Storyboard) -> Vec<TimelineEntry> {
        let mut out = Vec::with_capacity(storyboard.segments.len() + 1);
        out.push(self.entry("intro", None, self.intro_range(), &storyboard.title, ""));
        for (i, seg) in storyboard.segments.iter().enumerate() {
            out.push(self.entry(
                seg.visual.tag(),
                Some(i),
                self.segment_range(i),
                &seg.title,
                &seg.narration,
            ));
        }
        out
    }

    fn entry(
        &self,
        kind: &str,
        segment: Option<usize>,
        range: FrameRange,
        title: &str,
        narration: &str,
    ) -> TimelineEntry {
        TimelineEntry {
            kind: kind.to_string(),
            segment,
            start_frame: range.start.0,
            end_frame: range.end.0,
            start_secs: self.fps.frames_to_secs(range.start.0),
            end_secs: self.fps.frames_to_secs(range.end.0),
            truncated: range.end.0 > self.duration,
            title: title.to_string(),
            narration: narration.to_string(),
        }
    }
}

/// One row of the JSON timeline dump.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TimelineEntry {
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment: Option<usize>,
    pub start_frame: u64,
    pub end_frame: u64,
    pub start_secs: f64,
    pub end_secs: f64,
    /// The slot extends past the composition duration and will be cut.
    pub truncated: bool,
    pub title: String,
    pub narration: String,
}

#[cfg(test)]
#[path = "../../tests/unit/composition/timeline.rs"]
mod tests;
