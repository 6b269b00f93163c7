pub mod app;
pub mod input;
pub mod input_line;
pub mod render;
pub mod theme;

pub use app::run;
