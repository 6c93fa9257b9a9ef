//! Output formatting

pub mod console;
pub mod renderer;
pub mod toon;

pub use console::ConsoleFormatter;
pub use renderer::OutputRenderer;
pub use toon::to_toon;
