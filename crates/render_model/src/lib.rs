//! Render Model - Renderable primitives and drawing surfaces
//!
//! Shapes produce [`Renderable`] values; a renderer implements [`Surface`]
//! to present and erase them by shape name.

mod render_item;
mod surface;

pub use render_item::*;
pub use surface::*;
