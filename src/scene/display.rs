use crate::foundation::core::{FrameIndex, Point, Rect, Rgba8};

/// Font family role; the backend maps roles to concrete faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FontRole {
    Sans,
    SansBold,
    Mono,
}

/// Which point of the laid-out text block sits at [`TextItem::pos`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    TopLeft,
    TopCenter,
    CenterLeft,
    Center,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Anchor {
    /// Top-left corner of a `w`×`h` block anchored at `pos`.
    pub fn top_left(self, pos: Point, w: f64, h: f64) -> Point {
        let (fx, fy) = match self {
            Self::TopLeft => (0.0, 0.0),
            Self::TopCenter => (0.5, 0.0),
            Self::CenterLeft => (0.0, 0.5),
            Self::Center => (0.5, 0.5),
            Self::BottomLeft => (0.0, 1.0),
            Self::BottomCenter => (0.5, 1.0),
            Self::BottomRight => (1.0, 1.0),
        };
        Point::new(pos.x - w * fx, pos.y - h * fy)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RectItem {
    pub rect: Rect,
    pub radius: f64,
    pub fill: Rgba8,
    /// 1px inner border.
    pub border: Option<Rgba8>,
    pub opacity: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TextItem {
    pub text: String,
    pub pos: Point,
    pub anchor: Anchor,
    /// Wrap width in pixels; `None` lays out on one line per `\n`.
    pub max_width: Option<f64>,
    pub role: FontRole,
    pub size_px: f32,
    pub color: Rgba8,
    pub opacity: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawItem {
    Rect(RectItem),
    Text(TextItem),
}

impl DrawItem {
    pub fn opacity(&self) -> f64 {
        match self {
            Self::Rect(r) => r.opacity,
            Self::Text(t) => t.opacity,
        }
    }
}

/// Everything drawn for one frame, back to front.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct DisplayList {
    pub frame: FrameIndex,
    pub background: Rgba8,
    pub items: Vec<DrawItem>,
}

impl DisplayList {
    pub fn new(frame: FrameIndex, background: Rgba8) -> Self {
        Self {
            frame,
            background,
            items: Vec::new(),
        }
    }

    /// Push an item unless it is fully transparent.
    pub fn push(&mut self, item: DrawItem) {
        if item.opacity() > 0.0 {
            self.items.push(item);
        }
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextItem> {
        self.items.iter().filter_map(|i| match i {
            DrawItem::Text(t) => Some(t),
            DrawItem::Rect(_) => None,
        })
    }

    pub fn rects(&self) -> impl Iterator<Item = &RectItem> {
        self.items.iter().filter_map(|i| match i {
            DrawItem::Rect(r) => Some(r),
            DrawItem::Text(_) => None,
        })
    }

    pub fn find_text(&self, needle: &str) -> Option<&TextItem> {
        self.texts().find(|t| t.text == needle)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/display.rs"]
mod tests;
