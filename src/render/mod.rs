//! Display list rasterization.

pub mod backend;
pub mod cpu;
pub mod fonts;
pub mod text;
