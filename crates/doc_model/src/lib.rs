//! Document Model - Shapes, decorators and the layered shape document
//!
//! This crate provides the in-memory model edited by the command engine:
//! drawable shapes and the decorators that wrap them, the document that
//! owns them in z-order, the ordering strategies used for listing and
//! export, and the mementos that make deletion and paste reversible.

mod error;
mod color;
mod geometry;
mod attribute;
mod shape;
mod decorator;
mod document;
mod layer;
mod ordering;
mod memento;

pub use error::*;
pub use color::*;
pub use geometry::*;
pub use attribute::*;
pub use shape::*;
pub use decorator::*;
pub use document::*;
pub use layer::*;
pub use ordering::*;
pub use memento::*;
