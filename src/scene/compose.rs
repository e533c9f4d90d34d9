use crate::composition::timeline::{Slot, Timeline};
use crate::foundation::core::{FrameIndex, Point};
use crate::foundation::error::{StoryreelError, StoryreelResult};
use crate::scene::SceneCtx;
use crate::scene::display::{Anchor, DisplayList, DrawItem, FontRole, TextItem};
use crate::scene::segment::{SegmentPlacement, render_segment};
use crate::scene::title::title_scene;
use crate::storyboard::model::Storyboard;

/// Build the display list for one composition frame.
pub fn compose_frame(
    ctx: &SceneCtx<'_>,
    storyboard: &Storyboard,
    timeline: &Timeline,
    frame: FrameIndex,
) -> StoryreelResult<DisplayList> {
    if frame.0 >= timeline.duration {
        return Err(StoryreelError::evaluation(format!(
            "frame {} is out of bounds (duration {})",
            frame.0, timeline.duration
        )));
    }

    let mut out = DisplayList::new(frame, ctx.palette.bg);
    match timeline.slot_at(frame) {
        Slot::Intro { local } => {
            title_scene(
                ctx,
                &storyboard.title,
                Some(ctx.intro_subtitle),
                local,
                &mut out,
            );
        }
        Slot::Segment { index, start, .. } => {
            let segment = storyboard.segments.get(index).ok_or_else(|| {
                StoryreelError::evaluation(format!("timeline slot {index} has no segment"))
            })?;
            let at = SegmentPlacement {
                index,
                count: storyboard.segments.len(),
                start,
            };
            render_segment(ctx, segment, at, frame.0, &mut out);
        }
        Slot::Tail => {}
    }

    format_overlay(ctx, &mut out);
    Ok(out)
}

fn format_overlay(ctx: &SceneCtx<'_>, out: &mut DisplayList) {
    let size = ctx.canvas.size();
    out.push(DrawItem::Text(TextItem {
        text: format!(
            "{}×{} · {}fps",
            ctx.canvas.width, ctx.canvas.height, ctx.fps
        ),
        pos: Point::new(size.x - 80.0, size.y - 60.0),
        anchor: Anchor::BottomRight,
        max_width: None,
        role: FontRole::Mono,
        size_px: 16.0,
        color: ctx.palette.muted,
        opacity: 0.85,
    }));
}

#[cfg(test)]
#[path = "../../tests/unit/scene/compose.rs"]
mod tests;
