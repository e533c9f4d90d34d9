use kurbo::Shape;

use crate::foundation::core::{Canvas, Rect, Rgba8};
use crate::foundation::error::{StoryreelError, StoryreelResult};
use crate::render::backend::{FrameRGBA, RenderBackend};
use crate::render::fonts::FontSet;
use crate::render::text::{ShapedText, TextEngine};
use crate::scene::display::{DisplayList, DrawItem, RectItem, TextItem};

/// CPU rasterizer built on `vello_cpu`. One instance per worker thread.
pub struct CpuBackend {
    width: u16,
    height: u16,
    text: TextEngine,
}

impl CpuBackend {
    pub fn new(canvas: Canvas, fonts: &FontSet) -> StoryreelResult<Self> {
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| StoryreelError::render("canvas width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| StoryreelError::render("canvas height exceeds u16"))?;
        if width == 0 || height == 0 {
            return Err(StoryreelError::render("canvas width/height must be > 0"));
        }
        Ok(Self {
            width,
            height,
            text: TextEngine::new(fonts)?,
        })
    }
}

impl RenderBackend for CpuBackend {
    fn render(&mut self, list: &DisplayList) -> StoryreelResult<FrameRGBA> {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);

        ctx.set_paint(color_to_cpu(list.background));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(self.width),
            f64::from(self.height),
        ));

        for item in &list.items {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
            match item {
                DrawItem::Rect(r) => draw_rect(&mut ctx, r),
                DrawItem::Text(t) => {
                    let shaped = self
                        .text
                        .shape(&t.text, t.role, t.size_px, t.color, t.max_width)?;
                    let Some(shaped) = shaped else {
                        continue;
                    };
                    draw_text(&mut ctx, t, &shaped);
                }
            }
        }

        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);

        Ok(FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn with_opacity(
    ctx: &mut vello_cpu::RenderContext,
    opacity: f64,
    draw: impl FnOnce(&mut vello_cpu::RenderContext),
) {
    let opacity = opacity.clamp(0.0, 1.0) as f32;
    if opacity < 1.0 {
        ctx.push_opacity_layer(opacity);
        draw(ctx);
        ctx.pop_layer();
    } else {
        draw(ctx);
    }
}

fn draw_rect(ctx: &mut vello_cpu::RenderContext, r: &RectItem) {
    with_opacity(ctx, r.opacity, |ctx| match r.border {
        Some(border) => {
            ctx.set_paint(color_to_cpu(border));
            ctx.fill_path(&rounded_rect_path(r.rect, r.radius));
            ctx.set_paint(color_to_cpu(r.fill));
            ctx.fill_path(&rounded_rect_path(
                r.rect.inset(-1.0),
                (r.radius - 1.0).max(0.0),
            ));
        }
        None => {
            ctx.set_paint(color_to_cpu(r.fill));
            ctx.fill_path(&rounded_rect_path(r.rect, r.radius));
        }
    });
}

fn draw_text(ctx: &mut vello_cpu::RenderContext, t: &TextItem, shaped: &ShapedText) {
    let (w, h) = shaped.size();
    let origin = t.anchor.top_left(t.pos, w, h);
    ctx.set_transform(vello_cpu::kurbo::Affine::translate((
        origin.x.round(),
        origin.y.round(),
    )));

    with_opacity(ctx, t.opacity, |ctx| {
        for line in shaped.layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };

                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));

                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(run.run().font())
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
    });
}

/// Rounded rectangle as a `vello_cpu` path; the radius is clamped to half the short side.
fn rounded_rect_path(rect: Rect, radius: f64) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let max_r = (rect.width().min(rect.height()) / 2.0).max(0.0);
    let shape = kurbo::RoundedRect::from_rect(rect, radius.clamp(0.0, max_r));

    let pt = |p: kurbo::Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for el in shape.path_elements(0.1) {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
