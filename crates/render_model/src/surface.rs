//! Drawing surfaces
//!
//! A [`Surface`] receives renderables keyed by shape name. Shapes erase
//! their previous output before presenting a new one, so a well-behaved
//! caller never presents a name that is already visible.

use crate::Renderable;
use std::collections::BTreeMap;

/// Sink for shape renderables
pub trait Surface {
    /// Show `renderable` under `name`
    fn present(&mut self, name: &str, renderable: &Renderable);

    /// Remove whatever is shown under `name`
    fn erase(&mut self, name: &str);
}

/// Surface that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn present(&mut self, _name: &str, _renderable: &Renderable) {}

    fn erase(&mut self, _name: &str) {}
}

/// A surface operation as recorded by [`RecordingSurface`]
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    Present(String),
    Erase(String),
}

/// Retained surface that keeps the currently visible renderables
///
/// Used headless by the command line front end and by tests to check that
/// no renderable is presented twice without an erase in between.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    visible: BTreeMap<String, Renderable>,
    log: Vec<SurfaceOp>,
    overdraws: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// The renderable currently shown under `name`
    pub fn visible(&self, name: &str) -> Option<&Renderable> {
        self.visible.get(name)
    }

    /// Names currently shown, sorted
    pub fn visible_names(&self) -> impl Iterator<Item = &str> {
        self.visible.keys().map(String::as_str)
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    /// Every present/erase call in order
    pub fn log(&self) -> &[SurfaceOp] {
        &self.log
    }

    /// Number of presents that replaced a still-visible renderable
    pub fn overdraws(&self) -> usize {
        self.overdraws
    }

    /// Forget the operation log, keeping the visible set
    pub fn clear_log(&mut self) {
        self.log.clear();
    }
}

impl Surface for RecordingSurface {
    fn present(&mut self, name: &str, renderable: &Renderable) {
        if self
            .visible
            .insert(name.to_string(), renderable.clone())
            .is_some()
        {
            tracing::warn!("Renderable for '{}' presented while still visible", name);
            self.overdraws += 1;
        }
        self.log.push(SurfaceOp::Present(name.to_string()));
    }

    fn erase(&mut self, name: &str) {
        self.visible.remove(name);
        self.log.push(SurfaceOp::Erase(name.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Primitive, Rect};

    fn outline() -> Renderable {
        Renderable::from_primitives(vec![Primitive::DashedOutline {
            bounds: Rect::new(0.0, 0.0, 1.0, 1.0),
            color: Color::BLACK,
        }])
    }

    #[test]
    fn test_present_and_erase() {
        let mut surface = RecordingSurface::new();
        surface.present("a", &outline());
        assert_eq!(surface.visible_count(), 1);
        assert!(surface.visible("a").is_some());

        surface.erase("a");
        assert_eq!(surface.visible_count(), 0);
        assert_eq!(
            surface.log(),
            &[SurfaceOp::Present("a".into()), SurfaceOp::Erase("a".into())]
        );
        assert_eq!(surface.overdraws(), 0);
    }

    #[test]
    fn test_overdraw_is_counted() {
        let mut surface = RecordingSurface::new();
        surface.present("a", &outline());
        surface.present("a", &outline());
        assert_eq!(surface.overdraws(), 1);
        assert_eq!(surface.visible_count(), 1);
    }
}
