use crate::foundation::core::Rgba8;
use crate::storyboard::model::NodeKind;

/// Fixed dark palette of the explainer template.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub bg: Rgba8,
    pub panel: Rgba8,
    pub border: Rgba8,
    pub text: Rgba8,
    pub muted: Rgba8,
    pub cyan: Rgba8,
    pub amber: Rgba8,
    pub red: Rgba8,
}

pub const PALETTE: Palette = Palette {
    bg: Rgba8::rgb(0x0B, 0x0F, 0x14),
    panel: Rgba8::rgb(0x0F, 0x17, 0x20),
    border: Rgba8::rgb(0x1F, 0x2A, 0x37),
    text: Rgba8::rgb(0xE5, 0xE7, 0xEB),
    muted: Rgba8::rgb(0x93, 0xA4, 0xB8),
    cyan: Rgba8::rgb(0x22, 0xD3, 0xEE),
    amber: Rgba8::rgb(0xFB, 0xBF, 0x24),
    red: Rgba8::rgb(0xF8, 0x71, 0x71),
};

impl Palette {
    pub fn accent_for(&self, kind: NodeKind) -> Rgba8 {
        match kind {
            NodeKind::System => self.cyan,
            NodeKind::Risk => self.red,
            NodeKind::Artifact => self.amber,
        }
    }
}
