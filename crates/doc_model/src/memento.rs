//! Mementos that make deletion and area paste reversible

use crate::{Area, Document, Drawable, Point, Result, Shape};
use render_model::Surface;

/// A deleted shape and the z-index it occupied
#[derive(Debug, Clone)]
pub struct DeletionMemento {
    index: usize,
    shape: Shape,
}

impl DeletionMemento {
    /// Remove the named shape from the document and erase it
    pub fn capture(document: &mut Document, name: &str, surface: &mut dyn Surface) -> Result<Self> {
        let (index, mut shape) = document.remove(name)?;
        shape.destroy(surface);
        Ok(Self { index, shape })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Reinsert the shape at its recorded index and present it.
    ///
    /// If the document shrank since the capture the shape goes to the front.
    pub fn restore(&self, document: &mut Document, surface: &mut dyn Surface) -> Result<usize> {
        let index = if self.index > document.len() {
            tracing::warn!(
                "Layer {} no longer exists, restoring '{}' at the front",
                self.index,
                self.shape.unique_name()
            );
            document.len()
        } else {
            self.index
        };
        document.insert_displayed(self.shape.duplicate(), Some(index), surface)
    }
}

/// Shapes captured by an area selection
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionMemento {
    area: Area,
    captured: Vec<String>,
}

impl SelectionMemento {
    /// Capture the names of every shape whose center lies in the area
    pub fn save_area(document: &Document, top_left: Point, bottom_right: Point) -> Self {
        let area = Area::from_corners(top_left, bottom_right);
        let captured: Vec<String> = document
            .shapes()
            .iter()
            .filter(|s| area.contains(s.center()))
            .map(|s| s.unique_name().to_string())
            .collect();
        tracing::debug!("Selected {} shapes in {:?}", captured.len(), area);
        Self { area, captured }
    }

    pub fn area(&self) -> &Area {
        &self.area
    }

    /// Names of the captured shapes in document order
    pub fn captured(&self) -> &[String] {
        &self.captured
    }

    pub fn is_empty(&self) -> bool {
        self.captured.is_empty()
    }

    /// Clone every captured shape, translated so the area's top-left corner
    /// lands on `new_top_left`.
    ///
    /// Shapes deleted since the selection are skipped. Returns the names of
    /// the new shapes; on failure no clone is left in the document.
    pub fn paste_area(
        &self,
        document: &mut Document,
        new_top_left: Point,
        surface: &mut dyn Surface,
    ) -> Result<Vec<String>> {
        let delta = new_top_left - self.area.top_left;
        let mut pasted: Vec<String> = Vec::with_capacity(self.captured.len());

        for name in &self.captured {
            let mut clone = match document.find_by_name(name) {
                Ok(shape) => shape.duplicate(),
                Err(_) => {
                    tracing::warn!("'{}' was deleted after selection, skipping", name);
                    continue;
                }
            };
            let base = document.unique_copy_name(clone.base_name());
            clone.rename(&base);

            let index = match document.insert_displayed(clone, None, surface) {
                Ok(index) => index,
                Err(e) => {
                    for name in pasted.iter().rev() {
                        if let Ok((_, mut shape)) = document.remove(name.as_str()) {
                            shape.destroy(surface);
                        }
                    }
                    return Err(e);
                }
            };
            let shape = &mut document.shapes_mut()[index];
            shape.move_by(delta.x, delta.y, surface);
            pasted.push(shape.unique_name().to_string());
        }
        Ok(pasted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AttributeValue, Decoration};
    use render_model::RecordingSurface;

    fn five_shapes() -> Document {
        let mut doc = Document::new("five");
        for i in 0..5 {
            doc.add(Shape::rectangle(
                format!("s{}", i),
                Point::new(f64::from(i) * 10.0, 5.0),
                2.0,
                2.0,
            ))
            .unwrap();
        }
        doc
    }

    #[test]
    fn test_deletion_restores_index() {
        let mut surface = RecordingSurface::new();
        let mut doc = five_shapes();
        doc.display_all(&mut surface);

        let memento = DeletionMemento::capture(&mut doc, "s2", &mut surface).unwrap();
        assert_eq!(memento.index(), 2);
        assert_eq!(doc.len(), 4);
        assert!(surface.visible("s2").is_none());

        assert_eq!(memento.restore(&mut doc, &mut surface).unwrap(), 2);
        assert_eq!(doc.index_of("s2").unwrap(), 2);
        assert!(surface.visible("s2").is_some());
        assert_eq!(surface.overdraws(), 0);
    }

    #[test]
    fn test_deletion_restore_clamps_index() {
        let mut doc = five_shapes();
        let memento = DeletionMemento::capture(&mut doc, "s4", &mut render_model::NullSurface)
            .unwrap();
        doc.remove("s3").unwrap();
        assert_eq!(memento.restore(&mut doc, &mut render_model::NullSurface).unwrap(), 3);
    }

    #[test]
    fn test_save_area_uses_asymmetric_edges() {
        let doc = five_shapes();
        // s0..s4 sit at x = 0, 10, 20, 30, 40 with y = 5
        let memento = SelectionMemento::save_area(&doc, Point::new(10.0, 0.0), Point::new(30.0, 10.0));
        assert_eq!(memento.captured(), &["s1", "s2", "s3"]);

        let on_top_edge = SelectionMemento::save_area(&doc, Point::new(0.0, 5.0), Point::new(50.0, 9.0));
        assert!(on_top_edge.is_empty());
    }

    #[test]
    fn test_paste_clones_and_translates() {
        let mut surface = RecordingSurface::new();
        let mut doc = five_shapes();
        doc.decorate("s1", Decoration::shadow(), &mut surface).unwrap();
        doc.display_all(&mut surface);

        let memento = SelectionMemento::save_area(&doc, Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        let pasted = memento
            .paste_area(&mut doc, Point::new(100.0, 100.0), &mut surface)
            .unwrap();

        assert_eq!(pasted, vec!["s0_copy", "s1_copy+shadow"]);
        assert_eq!(doc.len(), 7);
        let copy = doc.find_by_name("s1_copy").unwrap();
        assert_eq!(copy.center(), Point::new(110.0, 105.0));
        assert_eq!(copy.attribute("shadow_dx").unwrap(), AttributeValue::Number(4.0));
        assert_eq!(doc.find_by_name("s1").unwrap().center(), Point::new(10.0, 5.0));
        assert!(surface.visible("s1_copy+shadow").is_some());
        assert_eq!(surface.overdraws(), 0);
    }

    #[test]
    fn test_paste_skips_deleted_shapes() {
        let mut doc = five_shapes();
        let memento = SelectionMemento::save_area(&doc, Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        doc.remove("s0").unwrap();

        let pasted = memento
            .paste_area(&mut doc, Point::new(0.0, 20.0), &mut render_model::NullSurface)
            .unwrap();
        assert_eq!(pasted, vec!["s1_copy"]);
    }
}
