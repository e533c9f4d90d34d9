//! Storyreel renders storyboard explainer videos.
//!
//! A storyboard (title plus ordered segments, each with a title card, a node/edge diagram or a
//! code artifact) is laid out on a fixed frame timeline, evaluated into a per-frame display list
//! and rasterized on the CPU. Frames can be written as PNG or streamed into `ffmpeg` as an MP4
//! with the narration track muxed in.
//!
//! - Load [`InputProps`] and [`CompositionSettings`]
//! - Create a [`RenderSession`]
//! - Render single frames or stream a range into a [`FrameSink`]
#![forbid(unsafe_code)]

mod animation;
mod assets;
mod foundation;

pub mod composition;
pub mod encode;
pub mod render;
pub mod scene;
pub mod session;
pub mod storyboard;

pub use crate::animation::ease::ease_out_cubic;
pub use crate::animation::interp::{interp_clamped, lerp};
pub use crate::assets::paths::resolve_static_file;
pub use crate::foundation::core::{Canvas, Fps, FrameIndex, FrameRange, Point, Rect, Rgba8};
pub use crate::foundation::error::{StoryreelError, StoryreelResult};

pub use crate::composition::settings::CompositionSettings;
pub use crate::composition::timeline::{Slot, Timeline, TimelineEntry};
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
pub use crate::encode::sink::{AudioInputConfig, FrameSink, InMemorySink, SinkConfig};
pub use crate::render::backend::{FrameRGBA, RenderBackend};
pub use crate::render::cpu::CpuBackend;
pub use crate::render::fonts::{FontFace, FontSet};
pub use crate::scene::display::DisplayList;
pub use crate::session::render_session::{RenderSession, RenderSessionOpts, RenderStats};
pub use crate::storyboard::demo::demo_props;
pub use crate::storyboard::model::{
    DiagramEdge, DiagramNode, InputProps, NodeKind, Segment, Storyboard, Visual,
};
