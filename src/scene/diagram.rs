use crate::animation::interp::interp_clamped;
use crate::foundation::core::{Point, Rect};
use crate::scene::SceneCtx;
use crate::scene::display::{Anchor, DisplayList, DrawItem, FontRole, RectItem, TextItem};
use crate::storyboard::model::{DiagramEdge, DiagramNode};

pub const NODE_WIDTH: f64 = 360.0;
pub const NODE_HEIGHT: f64 = 64.0;
const NODE_RADIUS: f64 = 14.0;
const NODE_PAD_X: f64 = 20.0;
const DOT_SIZE: f64 = 10.0;
const DOT_GAP: f64 = 10.0;
const LABEL_SIZE: f32 = 22.0;

const SCENE_FADE: [f64; 2] = [0.0, 18.0];
const NODE_STAGGER: f64 = 6.0;
const NODE_FADE: [f64; 2] = [0.0, 12.0];
const NODE_SLIDE_PX: f64 = 18.0;
const SIGNALS_FADE: [f64; 2] = [40.0, 60.0];
const MAX_SIGNALS: usize = 3;

/// Per-node reveal state at scene-local frame `local`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeReveal {
    pub opacity: f64,
    pub slide: f64,
}

pub fn scene_appear(local: i64) -> f64 {
    interp_clamped(local as f64, SCENE_FADE, [0.0, 1.0])
}

pub fn node_reveal(local: i64, index: usize) -> NodeReveal {
    let t = (local as f64 - index as f64 * NODE_STAGGER).max(0.0);
    NodeReveal {
        opacity: interp_clamped(t, NODE_FADE, [0.0, 1.0]),
        slide: interp_clamped(t, NODE_FADE, [NODE_SLIDE_PX, 0.0]),
    }
}

/// `"Signals: a · b · c …"` for the first edges, or empty when there are none.
pub fn signals_caption(edges: &[DiagramEdge]) -> String {
    if edges.is_empty() {
        return String::new();
    }
    let shown = edges
        .iter()
        .take(MAX_SIGNALS)
        .map(DiagramEdge::caption)
        .collect::<Vec<_>>()
        .join(" · ");
    let more = if edges.len() > MAX_SIGNALS { " …" } else { "" };
    format!("Signals: {shown}{more}")
}

/// Box geometry of a node centered on its normalized position.
pub fn node_rect(ctx: &SceneCtx<'_>, node: &DiagramNode, slide: f64) -> Rect {
    let size = ctx.canvas.size();
    let cx = node.x * size.x;
    let cy = node.y * size.y + slide;
    Rect::new(
        cx - NODE_WIDTH / 2.0,
        cy - NODE_HEIGHT / 2.0,
        cx + NODE_WIDTH / 2.0,
        cy + NODE_HEIGHT / 2.0,
    )
}

/// Nodes fade and slide in one after another; the signals caption follows.
///
/// `frame` and `start` are both absolute composition frames.
pub fn diagram_scene(
    ctx: &SceneCtx<'_>,
    nodes: &[DiagramNode],
    edges: &[DiagramEdge],
    frame: u64,
    start: u64,
    out: &mut DisplayList,
) {
    let local = frame as i64 - start as i64;
    let appear = scene_appear(local);
    if appear <= 0.0 {
        return;
    }

    for (i, node) in nodes.iter().enumerate() {
        let reveal = node_reveal(local, i);
        let opacity = appear * reveal.opacity;
        let rect = node_rect(ctx, node, reveal.slide);
        out.push(DrawItem::Rect(RectItem {
            rect,
            radius: NODE_RADIUS,
            fill: ctx.palette.panel.with_alpha_f(0.95),
            border: Some(ctx.palette.border),
            opacity,
        }));

        let mid_y = rect.y0 + NODE_HEIGHT / 2.0;
        let dot_x = rect.x0 + NODE_PAD_X;
        out.push(DrawItem::Rect(RectItem {
            rect: Rect::new(
                dot_x,
                mid_y - DOT_SIZE / 2.0,
                dot_x + DOT_SIZE,
                mid_y + DOT_SIZE / 2.0,
            ),
            radius: DOT_SIZE / 2.0,
            fill: ctx.palette.accent_for(node.kind_or_default()),
            border: None,
            opacity,
        }));
        out.push(DrawItem::Text(TextItem {
            text: node.label.clone(),
            pos: Point::new(dot_x + DOT_SIZE + DOT_GAP, mid_y),
            anchor: Anchor::CenterLeft,
            max_width: None,
            role: FontRole::SansBold,
            size_px: LABEL_SIZE,
            color: ctx.palette.text,
            opacity,
        }));
    }

    let caption = signals_caption(edges);
    if !caption.is_empty() {
        out.push(DrawItem::Text(TextItem {
            text: caption,
            pos: Point::new(80.0, ctx.canvas.size().y - 80.0),
            anchor: Anchor::BottomLeft,
            max_width: None,
            role: FontRole::Sans,
            size_px: 18.0,
            color: ctx.palette.muted,
            opacity: appear * interp_clamped(local as f64, SIGNALS_FADE, [0.0, 1.0]),
        }));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/diagram.rs"]
mod tests;
