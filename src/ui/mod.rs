//! Watch face UI

pub mod catalog;
pub mod color;
pub mod complications;
pub mod dial;
pub mod editor;
pub mod geometry;
pub mod painter;
pub mod palette;
pub mod pixel_buffer;
pub mod reducer;
pub mod renderer;
pub mod state;
pub mod time_display;
