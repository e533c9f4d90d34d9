use crate::animation::ease::ease_out_cubic;
use crate::animation::interp::lerp;
use crate::foundation::core::Point;
use crate::scene::display::{Anchor, DisplayList, DrawItem, FontRole, TextItem};
use crate::scene::SceneCtx;

const TITLE_SIZE: f32 = 62.0;
const SUBTITLE_SIZE: f32 = 26.0;
const SUBTITLE_GAP: f64 = 22.0;
const TITLE_MAX_WIDTH: f64 = 1400.0;
const SUBTITLE_MAX_WIDTH: f64 = 1200.0;
const PADDING: f64 = 120.0;
const RISE_PX: f64 = 16.0;
const REVEAL_SECS: f64 = 0.6;

/// Opacity and downward offset of the title block at sequence-local frame `local`.
pub fn title_motion(local: u64, fps: f64) -> (f64, f64) {
    let o = ease_out_cubic((local as f64 / (REVEAL_SECS * fps)).min(1.0));
    (o, lerp(RISE_PX, 0.0, o))
}

/// Centered title card with an optional subtitle and the brand line.
pub fn title_scene(
    ctx: &SceneCtx<'_>,
    title: &str,
    subtitle: Option<&str>,
    local: u64,
    out: &mut DisplayList,
) {
    let subtitle = subtitle.filter(|s| !s.is_empty());
    let (opacity, y) = title_motion(local, ctx.fps.as_f64());
    let size = ctx.canvas.size();
    let inner = (size.x - 2.0 * PADDING).max(1.0);
    let cx = size.x / 2.0;
    let cy = size.y / 2.0 + y;

    let (title_anchor, title_y) = match subtitle {
        Some(_) => (Anchor::BottomCenter, cy - SUBTITLE_GAP / 2.0),
        None => (Anchor::Center, cy),
    };
    out.push(DrawItem::Text(TextItem {
        text: title.to_string(),
        pos: Point::new(cx, title_y),
        anchor: title_anchor,
        max_width: Some(TITLE_MAX_WIDTH.min(inner)),
        role: FontRole::SansBold,
        size_px: TITLE_SIZE,
        color: ctx.palette.text,
        opacity,
    }));

    if let Some(sub) = subtitle {
        out.push(DrawItem::Text(TextItem {
            text: sub.to_string(),
            pos: Point::new(cx, cy + SUBTITLE_GAP / 2.0),
            anchor: Anchor::TopCenter,
            max_width: Some(SUBTITLE_MAX_WIDTH.min(inner)),
            role: FontRole::Sans,
            size_px: SUBTITLE_SIZE,
            color: ctx.palette.muted,
            opacity,
        }));
    }

    out.push(DrawItem::Text(TextItem {
        text: ctx.brand_line.to_string(),
        pos: Point::new(80.0, size.y - 60.0),
        anchor: Anchor::BottomLeft,
        max_width: None,
        role: FontRole::Mono,
        size_px: 16.0,
        color: ctx.palette.muted,
        opacity: 0.9,
    }));
}

#[cfg(test)]
#[path = "../../tests/unit/scene/title.rs"]
mod tests;
