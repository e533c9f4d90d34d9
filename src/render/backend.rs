use crate::foundation::error::StoryreelResult;
use crate::scene::display::DisplayList;

/// One rendered frame as tightly packed RGBA8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Rasterizes display lists. Implementations may cache fonts and text layouts across frames.
pub trait RenderBackend {
    fn render(&mut self, list: &DisplayList) -> StoryreelResult<FrameRGBA>;
}
