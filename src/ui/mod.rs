pub mod status_renderer;

pub use status_renderer::StatusRenderer;
