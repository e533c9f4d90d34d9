use std::collections::HashMap;
use std::sync::Arc;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{StoryreelError, StoryreelResult};
use crate::render::fonts::{FontFace, FontSet};
use crate::scene::display::FontRole;

/// RGBA8 brush color carried through Parley layouts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextBrushRgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl From<Rgba8> for TextBrushRgba8 {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct LayoutKey {
    text: String,
    role: FontRole,
    size_bits: u32,
    max_width_bits: Option<u64>,
    color: Rgba8,
}

/// Family name and weight that select a registered face in the font collection.
struct RoleFont {
    family: String,
    weight: f32,
}

/// A shaped text block. Each glyph run carries the font its glyph ids refer to.
pub struct ShapedText {
    pub layout: Arc<parley::Layout<TextBrushRgba8>>,
}

impl ShapedText {
    pub fn size(&self) -> (f64, f64) {
        (
            f64::from(self.layout.width()),
            f64::from(self.layout.height()),
        )
    }
}

/// Parley layout engine bound to one [`FontSet`], caching layouts by content and style.
pub struct TextEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    roles: HashMap<FontRole, Arc<RoleFont>>,
    layouts: HashMap<LayoutKey, Arc<parley::Layout<TextBrushRgba8>>>,
}

impl TextEngine {
    pub fn new(fonts: &FontSet) -> StoryreelResult<Self> {
        let mut engine = Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            roles: HashMap::new(),
            layouts: HashMap::new(),
        };

        // Faces shared between roles are registered once.
        let mut by_family: HashMap<String, Arc<RoleFont>> = HashMap::new();
        for role in [FontRole::Sans, FontRole::SansBold, FontRole::Mono] {
            let Some(face) = fonts.face_for(role) else {
                continue;
            };
            let key = format!("{}#{}#{}", face.family, face.index, face.bytes.len());
            let font = match by_family.get(&key) {
                Some(f) => f.clone(),
                None => {
                    let f = Arc::new(engine.register(face)?);
                    by_family.insert(key, f.clone());
                    f
                }
            };
            engine.roles.insert(role, font);
        }
        Ok(engine)
    }

    fn register(&mut self, face: &FontFace) -> StoryreelResult<RoleFont> {
        let families = self.font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(face.bytes.as_ref().clone()),
            None,
        );

        let mut names = families
            .iter()
            .filter_map(|(id, _)| {
                self.font_ctx
                    .collection
                    .family_name(*id)
                    .map(str::to_string)
            });
        let first = names.next().ok_or_else(|| {
            StoryreelError::render(format!(
                "font '{}' registered no families",
                face.family
            ))
        })?;
        let family = std::iter::once(first.clone())
            .chain(names)
            .find(|n| n == &face.family)
            .unwrap_or(first);

        Ok(RoleFont {
            family,
            weight: f32::from(face.weight),
        })
    }

    /// Shape `text`; `None` when no font is available for any role.
    pub fn shape(
        &mut self,
        text: &str,
        role: FontRole,
        size_px: f32,
        color: Rgba8,
        max_width_px: Option<f64>,
    ) -> StoryreelResult<Option<ShapedText>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(StoryreelError::render(
                "text size_px must be finite and > 0",
            ));
        }
        let Some(font) = self.roles.get(&role).cloned() else {
            return Ok(None);
        };

        let key = LayoutKey {
            text: text.to_string(),
            role,
            size_bits: size_px.to_bits(),
            max_width_bits: max_width_px.map(f64::to_bits),
            color,
        };
        if let Some(layout) = self.layouts.get(&key) {
            return Ok(Some(ShapedText {
                layout: layout.clone(),
            }));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(font.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::style::FontWeight::new(font.weight),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(
            TextBrushRgba8::from(color),
        ));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        match max_width_px {
            Some(w) => {
                let w = w as f32;
                layout.break_all_lines(Some(w));
                layout.align(
                    Some(w),
                    parley::Alignment::Start,
                    parley::AlignmentOptions::default(),
                );
            }
            None => layout.break_all_lines(None),
        }

        let layout = Arc::new(layout);
        self.layouts.insert(key, layout.clone());
        Ok(Some(ShapedText { layout }))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
