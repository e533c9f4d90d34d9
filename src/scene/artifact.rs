use crate::foundation::core::{Point, Rect};
use crate::scene::SceneCtx;
use crate::scene::display::{Anchor, DisplayList, DrawItem, FontRole, RectItem, TextItem};

const INSET_X: f64 = 90.0;
/// Top of the panel, below the segment title.
const PANEL_TOP: f64 = 160.0;
const PADDING: f64 = 32.0;
const RADIUS: f64 = 16.0;
const HEADING_SIZE: f32 = 18.0;
const HEADING_GAP: f64 = 16.0;
const BODY_SIZE: f32 = 20.0;
const BODY_LINE_HEIGHT: f64 = 1.45;
/// Advance of one monospace cell relative to the font size.
const MONO_ADVANCE_EM: f64 = 0.6;

/// Split preformatted text into display lines of at most `max_chars` characters.
///
/// Source newlines are kept. Overlong lines break at the last space that fits, or hard-break when
/// there is none.
pub fn wrap_preformatted(body: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut out = Vec::new();
    for line in body.split('\n') {
        let mut rest: Vec<char> = line.trim_end_matches('\r').chars().collect();
        if rest.is_empty() {
            out.push(String::new());
            continue;
        }
        while rest.len() > max_chars {
            let cut = rest[..=max_chars]
                .iter()
                .rposition(|c| *c == ' ')
                .filter(|&i| i > 0)
                .unwrap_or(max_chars);
            out.push(rest[..cut].iter().collect());
            let skip = usize::from(rest.get(cut) == Some(&' '));
            rest.drain(..cut + skip);
        }
        out.push(rest.into_iter().collect());
    }
    out
}

/// Heading + monospace body inside a bordered panel.
pub fn artifact_scene(ctx: &SceneCtx<'_>, heading: &str, body: &str, out: &mut DisplayList) {
    let size = ctx.canvas.size();
    let panel_w = (size.x - 2.0 * INSET_X).max(2.0 * PADDING + 1.0);
    let content_w = panel_w - 2.0 * PADDING;
    let max_chars = (content_w / (MONO_ADVANCE_EM * f64::from(BODY_SIZE))).floor() as usize;
    let lines = wrap_preformatted(body, max_chars);

    let line_h = f64::from(BODY_SIZE) * BODY_LINE_HEIGHT;
    let heading_h = if heading.is_empty() {
        0.0
    } else {
        f64::from(HEADING_SIZE) * 1.2 + HEADING_GAP
    };
    let content_h = heading_h + lines.len() as f64 * line_h;
    let max_h = (size.y - PANEL_TOP - INSET_X).max(2.0 * PADDING);
    let panel_h = (content_h + 2.0 * PADDING).min(max_h);

    out.push(DrawItem::Rect(RectItem {
        rect: Rect::new(INSET_X, PANEL_TOP, INSET_X + panel_w, PANEL_TOP + panel_h),
        radius: RADIUS,
        fill: ctx.palette.panel,
        border: Some(ctx.palette.border),
        opacity: 1.0,
    }));

    let x = INSET_X + PADDING;
    let mut y = PANEL_TOP + PADDING;
    if !heading.is_empty() {
        out.push(DrawItem::Text(TextItem {
            text: heading.to_string(),
            pos: Point::new(x, y),
            anchor: Anchor::TopLeft,
            max_width: Some(content_w),
            role: FontRole::Sans,
            size_px: HEADING_SIZE,
            color: ctx.palette.muted,
            opacity: 1.0,
        }));
        y += heading_h;
    }

    let bottom = PANEL_TOP + panel_h - PADDING;
    for line in lines {
        if y + line_h > bottom + 0.5 {
            break;
        }
        if !line.is_empty() {
            out.push(DrawItem::Text(TextItem {
                text: line,
                pos: Point::new(x, y),
                anchor: Anchor::TopLeft,
                max_width: None,
                role: FontRole::Mono,
                size_px: BODY_SIZE,
                color: ctx.palette.text,
                opacity: 1.0,
            }));
        }
        y += line_h;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/artifact.rs"]
mod tests;
