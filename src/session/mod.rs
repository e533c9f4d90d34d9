//! Front-loaded validation plus single-frame and range rendering.

pub mod render_session;
