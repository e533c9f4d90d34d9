//! Frame → display list evaluation.
//!
//! Every function here is pure: the same storyboard, settings and frame always produce the same
//! [`display::DisplayList`].

pub mod artifact;
pub mod compose;
pub mod diagram;
pub mod display;
pub mod segment;
pub mod title;

use crate::composition::settings::CompositionSettings;
use crate::composition::theme::{PALETTE, Palette};
use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::StoryreelResult;

/// Shared, read-only inputs of every scene renderer.
#[derive(Clone, Copy, Debug)]
pub struct SceneCtx<'a> {
    pub canvas: Canvas,
    pub fps: Fps,
    pub palette: &'a Palette,
    pub intro_subtitle: &'a str,
    pub brand_line: &'a str,
}

impl<'a> SceneCtx<'a> {
    pub fn from_settings(settings: &'a CompositionSettings) -> StoryreelResult<Self> {
        Ok(Self {
            canvas: settings.canvas(),
            fps: settings.fps()?,
            palette: &PALETTE,
            intro_subtitle: &settings.intro_subtitle,
            brand_line: &settings.brand_line,
        })
    }
}

#[cfg(test)]
pub(crate) fn test_ctx() -> SceneCtx<'static> {
    SceneCtx {
        canvas: Canvas {
            width: 1920,
            height: 1080,
        },
        fps: Fps { num: 30, den: 1 },
        palette: &PALETTE,
        intro_subtitle: "A systems view",
        brand_line: "AI Agents for Production · Practical Playbook",
    }
}
