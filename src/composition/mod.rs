pub mod settings;
pub mod theme;
pub mod timeline;
