//! Render adapter: cell state to RGBA, drawn onto any [`Surface`].
//!
//! The engine never talks to a graphics API. A host implements `Surface`
//! (or reuses [`PixelBuffer`] and uploads it) and picks a [`Palette`].

mod palette;
mod surface;

pub use palette::{normalize, GrayScottPalette, LifePalette, Palette, SandPalette, BACKGROUND};
pub use surface::{PixelBuffer, Rgba, Surface};
