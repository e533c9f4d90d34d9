use crate::foundation::core::Point;
use crate::scene::SceneCtx;
use crate::scene::artifact::artifact_scene;
use crate::scene::diagram::diagram_scene;
use crate::scene::display::{Anchor, DisplayList, DrawItem, FontRole, TextItem};
use crate::scene::title::title_scene;
use crate::storyboard::model::{Segment, Visual};

/// Where a segment sits on the timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SegmentPlacement {
    pub index: usize,
    pub count: usize,
    pub start: u64,
}

/// `SEGMENT i/n` counter and the segment title, top-left.
pub fn segment_chrome(
    ctx: &SceneCtx<'_>,
    segment: &Segment,
    at: SegmentPlacement,
    out: &mut DisplayList,
) {
    out.push(DrawItem::Text(TextItem {
        text: format!("SEGMENT {}/{}", at.index + 1, at.count),
        pos: Point::new(90.0, 60.0),
        anchor: Anchor::TopLeft,
        max_width: None,
        role: FontRole::Mono,
        size_px: 18.0,
        color: ctx.palette.muted,
        opacity: 1.0,
    }));
    out.push(DrawItem::Text(TextItem {
        text: segment.title.clone(),
        pos: Point::new(90.0, 90.0),
        anchor: Anchor::TopLeft,
        max_width: None,
        role: FontRole::SansBold,
        size_px: 34.0,
        color: ctx.palette.text,
        opacity: 1.0,
    }));
}

/// Pick the scene renderer for the segment's visual variant.
pub fn segment_scene(
    ctx: &SceneCtx<'_>,
    segment: &Segment,
    frame: u64,
    start: u64,
    out: &mut DisplayList,
) {
    match &segment.visual {
        Visual::Title { subtitle } => title_scene(
            ctx,
            &segment.title,
            subtitle.as_deref(),
            frame.saturating_sub(start),
            out,
        ),
        Visual::Diagram { nodes, edges } => diagram_scene(ctx, nodes, edges, frame, start, out),
        Visual::Artifact { heading, body } => artifact_scene(ctx, heading, body, out),
    }
}

/// Chrome plus the segment's scene.
pub fn render_segment(
    ctx: &SceneCtx<'_>,
    segment: &Segment,
    at: SegmentPlacement,
    frame: u64,
    out: &mut DisplayList,
) {
    segment_chrome(ctx, segment, at, out);
    segment_scene(ctx, segment, frame, at.start, out);
}

#[cfg(test)]
#[path = "../../tests/unit/scene/segment.rs"]
mod tests;
