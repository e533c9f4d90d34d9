use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{StoryreelError, StoryreelResult};

/// Render-time configuration of the composition.
///
/// Every field has a default, so a settings file only needs the keys it overrides.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CompositionSettings {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    /// Fixed composition length. `None` derives it from the timeline.
    pub duration_frames: Option<u64>,
    pub title_secs: f64,
    pub segment_secs: f64,
    /// Base directory for `audioSrc` lookups.
    pub public_dir: PathBuf,
    /// Extra directory scanned for `.ttf`/`.otf`/`.ttc` files before system fonts.
    pub fonts_dir: Option<PathBuf>,
    pub intro_subtitle: String,
    pub brand_line: String,
}

impl Default for CompositionSettings {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            fps: 30,
            duration_frames: Some(30 * 20),
            title_secs: 2.0,
            segment_secs: 6.0,
            public_dir: PathBuf::from("public"),
            fonts_dir: None,
            intro_subtitle: "A systems view".to_string(),
            brand_line: "AI Agents for Production · Practical Playbook".to_string(),
        }
    }
}

impl CompositionSettings {
    pub fn from_path(path: impl AsRef<Path>) -> StoryreelResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read settings '{}'", path.display()))?;
        let settings: Self = serde_json::from_str(&s)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> StoryreelResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(StoryreelError::validation("canvas width/height must be > 0"));
        }
        if self.width > u32::from(u16::MAX) || self.height > u32::from(u16::MAX) {
            return Err(StoryreelError::validation(
                "canvas width/height must fit in 16 bits",
            ));
        }
        if self.fps == 0 {
            return Err(StoryreelError::validation("fps must be > 0"));
        }
        if self.duration_frames == Some(0) {
            return Err(StoryreelError::validation("duration_frames must be > 0"));
        }
        for (name, v) in [
            ("title_secs", self.title_secs),
            ("segment_secs", self.segment_secs),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(StoryreelError::validation(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        Ok(())
    }

    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    pub fn fps(&self) -> StoryreelResult<Fps> {
        Fps::new(self.fps, 1)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/settings.rs"]
mod tests;
