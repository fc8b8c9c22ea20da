pub mod braille;
pub mod overlay;
pub mod render;
pub mod table;

pub use render::render;
