//! The shape document
//!
//! A document owns its shapes in z-order: index 0 is the back-most shape
//! and the last index is the front-most. Every name in a shape's decorator
//! chain is reserved, so a shape can be found by its decorated name or by
//! the name of the shape it wraps. The selection marker is kept apart from
//! the z-order and is always drawn in front.

use crate::{
    Area, BasicShape, Decoration, Decorator, DocModelError, Drawable, Result, Shape, ShapeColor,
    ShapeKind, ShapeStyle, DECORATION_SEPARATOR,
};
use render_model::Surface;

/// Name of the selection marker pseudo-shape
pub const SELECTION_MARKER_NAME: &str = "__selection__";

/// An ordered collection of uniquely named shapes
#[derive(Debug, Clone, Default)]
pub struct Document {
    name: String,
    shapes: Vec<Shape>,
    selection: Option<Shape>,
}

impl Document {
    /// Create an empty document
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shapes: Vec::new(),
            selection: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Shapes back to front
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn shape_at(&self, index: usize) -> Option<&Shape> {
        self.shapes.get(index)
    }

    /// Z-index of the shape answering to `name`
    pub fn index_of(&self, name: &str) -> Result<usize> {
        self.shapes
            .iter()
            .position(|s| s.names().contains(&name))
            .ok_or_else(|| DocModelError::ShapeNotFound(name.to_string()))
    }

    /// Find a shape by its decorated name or any name in its chain
    pub fn find_by_name(&self, name: &str) -> Result<&Shape> {
        let index = self.index_of(name)?;
        Ok(&self.shapes[index])
    }

    pub fn find_by_name_mut(&mut self, name: &str) -> Result<&mut Shape> {
        let index = self.index_of(name)?;
        Ok(&mut self.shapes[index])
    }

    /// Whether any shape's chain reserves `name`
    pub fn contains_name(&self, name: &str) -> bool {
        self.shapes.iter().any(|s| s.names().contains(&name))
    }

    /// Fail with `DuplicateName` if `name` is taken
    pub fn check_available(&self, name: &str) -> Result<()> {
        if self.contains_name(name) {
            return Err(DocModelError::DuplicateName(name.to_string()));
        }
        Ok(())
    }

    /// Check that a user supplied name can be given to a new base shape
    pub fn check_base_name(&self, name: &str) -> Result<()> {
        if name.is_empty() || name.contains(DECORATION_SEPARATOR) || name.contains(char::is_whitespace)
        {
            return Err(DocModelError::InvalidOperation(format!(
                "'{}' is not a valid shape name",
                name
            )));
        }
        if name == SELECTION_MARKER_NAME {
            return Err(DocModelError::InvalidOperation(format!(
                "'{}' is reserved",
                name
            )));
        }
        self.check_available(name)
    }

    /// Check that none of the names in `shape`'s chain is taken
    pub fn check_insertable(&self, shape: &Shape) -> Result<()> {
        shape
            .names()
            .into_iter()
            .try_for_each(|name| self.check_available(name))
    }

    /// Insert at `index`, or at the front when `index` is `None`
    pub fn insert(&mut self, shape: Shape, index: Option<usize>) -> Result<usize> {
        let index = index.unwrap_or(self.shapes.len());
        if index > self.shapes.len() {
            return Err(DocModelError::ArgumentRange {
                index,
                len: self.shapes.len(),
            });
        }
        self.check_insertable(&shape)?;
        tracing::debug!("Inserting '{}' at layer {}", shape.unique_name(), index);
        self.shapes.insert(index, shape);
        Ok(index)
    }

    /// Insert and present a shape, returning its index
    pub fn insert_displayed(
        &mut self,
        shape: Shape,
        index: Option<usize>,
        surface: &mut dyn Surface,
    ) -> Result<usize> {
        let index = self.insert(shape, index)?;
        self.shapes[index].display(surface);
        Ok(index)
    }

    /// Append a shape at the front
    pub fn add(&mut self, shape: Shape) -> Result<usize> {
        self.insert(shape, None)
    }

    /// Remove a shape without touching any surface
    pub fn remove(&mut self, name: &str) -> Result<(usize, Shape)> {
        let index = self.index_of(name)?;
        let shape = self.shapes.remove(index);
        tracing::debug!("Removed '{}' from layer {}", shape.unique_name(), index);
        Ok((index, shape))
    }

    /// First free name of the form `base_copy`, `base_copy2`, ...
    pub fn unique_copy_name(&self, base: &str) -> String {
        let first = format!("{}_copy", base);
        if !self.contains_name(&first) {
            return first;
        }
        (2..)
            .map(|n| format!("{}_copy{}", base, n))
            .find(|candidate| !self.contains_name(candidate))
            .unwrap_or(first)
    }

    /// Wrap the named shape in a decorator, keeping its z-index.
    ///
    /// Returns the decorated shape's new unique name.
    pub fn decorate(
        &mut self,
        name: &str,
        decoration: Decoration,
        surface: &mut dyn Surface,
    ) -> Result<String> {
        let index = self.index_of(name)?;
        let shape = &self.shapes[index];
        if shape.has_decoration(decoration.type_name()) {
            return Err(DocModelError::InvalidOperation(format!(
                "'{}' already has a {} decoration",
                shape.unique_name(),
                decoration.type_name()
            )));
        }
        let decorated_name = Decorator::decorated_name(shape.unique_name(), &decoration);
        self.check_available(&decorated_name)?;

        let mut shape = self.shapes.remove(index);
        shape.destroy(surface);
        let mut decorated = shape.decorate(decoration);
        decorated.display(surface);
        self.shapes.insert(index, decorated);
        tracing::debug!("Decorated layer {} as '{}'", index, decorated_name);
        Ok(decorated_name)
    }

    /// Remove the outermost decoration of the named shape.
    ///
    /// Returns the unwrapped shape's name and the removed decoration.
    pub fn strip_decoration(
        &mut self,
        name: &str,
        surface: &mut dyn Surface,
    ) -> Result<(String, Decoration)> {
        let index = self.index_of(name)?;
        if self.shapes[index].as_decorator().is_none() {
            return Err(DocModelError::InvalidOperation(format!(
                "'{}' has no decoration",
                self.shapes[index].unique_name()
            )));
        }

        let mut shape = self.shapes.remove(index);
        shape.destroy(surface);
        match shape.undecorate() {
            Ok((mut inner, decoration)) => {
                inner.display(surface);
                let inner_name = inner.unique_name().to_string();
                self.shapes.insert(index, inner);
                tracing::debug!(
                    "Removed {} decoration from '{}'",
                    decoration.type_name(),
                    inner_name
                );
                Ok((inner_name, decoration))
            }
            Err(mut shape) => {
                shape.display(surface);
                self.shapes.insert(index, shape);
                Err(DocModelError::InvalidOperation(format!(
                    "'{}' has no decoration",
                    name
                )))
            }
        }
    }

    /// Show a dashed outline of `area` in front of every shape
    pub fn set_selection_marker(&mut self, area: &Area, surface: &mut dyn Surface) {
        self.clear_selection_marker(surface);
        let mut marker = Shape::from(
            BasicShape::new(
                SELECTION_MARKER_NAME,
                ShapeKind::SelectionMarker {
                    width: area.width(),
                    height: area.height(),
                },
                area.center(),
            )
            .with_style(ShapeStyle {
                stroke: ShapeColor::GRAY,
                ..ShapeStyle::default()
            }),
        );
        marker.display(surface);
        self.selection = Some(marker);
    }

    /// Remove the selection marker if present
    pub fn clear_selection_marker(&mut self, surface: &mut dyn Surface) {
        if let Some(mut marker) = self.selection.take() {
            marker.destroy(surface);
        }
    }

    pub fn has_selection_marker(&self) -> bool {
        self.selection.is_some()
    }

    pub fn selection_marker(&self) -> Option<&Shape> {
        self.selection.as_ref()
    }

    /// Present every shape that is not yet displayed, marker last
    pub fn display_all(&mut self, surface: &mut dyn Surface) {
        for shape in self.shapes.iter_mut().chain(self.selection.as_mut()) {
            shape.display(surface);
        }
    }

    /// Erase every shape and the marker from `surface`
    pub fn destroy_all(&mut self, surface: &mut dyn Surface) {
        for shape in self.shapes.iter_mut().chain(self.selection.as_mut()) {
            shape.destroy(surface);
        }
    }

    /// Attribute maps of every shape chain in z-order
    pub fn snapshot(&self) -> Vec<Vec<crate::AttributeMap>> {
        self.shapes.iter().map(Shape::accept_chain).collect()
    }

    pub(crate) fn shapes_mut(&mut self) -> &mut Vec<Shape> {
        &mut self.shapes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Point, TexturePattern};
    use render_model::RecordingSurface;

    fn doc_with(names: &[&str]) -> Document {
        let mut doc = Document::new("test");
        for (i, name) in names.iter().enumerate() {
            doc.add(Shape::rectangle(*name, Point::new(i as f64, 0.0), 10.0, 10.0))
                .unwrap();
        }
        doc
    }

    #[test]
    fn test_insert_and_find() {
        let doc = doc_with(&["a", "b", "c"]);
        assert_eq!(doc.len(), 3);
        assert_eq!(doc.index_of("b").unwrap(), 1);
        assert!(matches!(
            doc.find_by_name("z"),
            Err(DocModelError::ShapeNotFound(_))
        ));
    }

    #[test]
    fn test_insert_rejects_duplicates_and_bad_index() {
        let mut doc = doc_with(&["a"]);
        assert!(matches!(
            doc.add(Shape::ellipse("a", Point::ORIGIN, 1.0, 1.0)),
            Err(DocModelError::DuplicateName(_))
        ));
        assert!(matches!(
            doc.insert(Shape::ellipse("b", Point::ORIGIN, 1.0, 1.0), Some(5)),
            Err(DocModelError::ArgumentRange { index: 5, len: 1 })
        ));
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_base_name_validation() {
        let doc = doc_with(&["a"]);
        assert!(doc.check_base_name("b").is_ok());
        assert!(doc.check_base_name("a").is_err());
        assert!(doc.check_base_name("a+shadow").is_err());
        assert!(doc.check_base_name(SELECTION_MARKER_NAME).is_err());
        assert!(doc.check_base_name("").is_err());
    }

    #[test]
    fn test_decorate_keeps_index_and_reserves_names() {
        let mut surface = RecordingSurface::new();
        let mut doc = doc_with(&["a", "b", "c"]);
        doc.display_all(&mut surface);

        let name = doc.decorate("b", Decoration::shadow(), &mut surface).unwrap();
        assert_eq!(name, "b+shadow");
        assert_eq!(doc.index_of("b+shadow").unwrap(), 1);
        assert_eq!(doc.index_of("b").unwrap(), 1);
        assert!(doc.check_available("b").is_err());
        assert!(surface.visible("b+shadow").is_some());
        assert!(surface.visible("b").is_none());
        assert_eq!(surface.overdraws(), 0);

        assert!(matches!(
            doc.decorate("b", Decoration::shadow(), &mut surface),
            Err(DocModelError::InvalidOperation(_))
        ));
    }

    #[test]
    fn test_strip_decoration_restores_inner() {
        let mut surface = RecordingSurface::new();
        let mut doc = doc_with(&["a"]);
        doc.display_all(&mut surface);
        doc.decorate("a", Decoration::texture(TexturePattern::Dots), &mut surface)
            .unwrap();

        let (inner, decoration) = doc.strip_decoration("a+texture", &mut surface).unwrap();
        assert_eq!(inner, "a");
        assert_eq!(decoration, Decoration::texture(TexturePattern::Dots));
        assert!(surface.visible("a").is_some());
        assert!(surface.visible("a+texture").is_none());

        assert!(doc.strip_decoration("a", &mut surface).is_err());
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_unique_copy_name() {
        let mut doc = doc_with(&["a"]);
        assert_eq!(doc.unique_copy_name("a"), "a_copy");
        doc.add(Shape::rectangle("a_copy", Point::ORIGIN, 1.0, 1.0)).unwrap();
        assert_eq!(doc.unique_copy_name("a"), "a_copy2");
    }

    #[test]
    fn test_selection_marker_is_replaced() {
        let mut surface = RecordingSurface::new();
        let mut doc = doc_with(&["a"]);
        let area = Area::from_corners(Point::ORIGIN, Point::new(5.0, 5.0));
        doc.set_selection_marker(&area, &mut surface);
        doc.set_selection_marker(&area, &mut surface);
        assert_eq!(doc.len(), 1);
        assert!(doc.has_selection_marker());
        assert!(surface.visible(SELECTION_MARKER_NAME).is_some());
        assert!(doc.find_by_name(SELECTION_MARKER_NAME).is_err());
        assert_eq!(doc.index_of("a").unwrap(), 0);

        doc.clear_selection_marker(&mut surface);
        assert_eq!(doc.len(), 1);
        assert!(surface.visible(SELECTION_MARKER_NAME).is_none());
        assert_eq!(surface.overdraws(), 0);
    }
}
