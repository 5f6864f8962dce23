//! Z-order (layer) operations on a document
//!
//! Every operation returns the index the shape occupied before the move so
//! that the caller can reverse it with [`Document::move_to_layer`].

use crate::{Boundary, DocModelError, Document, Drawable, Result};
use serde::{Deserialize, Serialize};

/// Z-order operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZOrderOperation {
    /// Bring to front (topmost)
    BringToFront,
    /// Send to back (bottommost)
    SendToBack,
    /// Bring forward one level
    BringForward,
    /// Send backward one level
    SendBackward,
}

impl ZOrderOperation {
    /// The operation that moves in the other direction
    pub fn opposite(&self) -> Self {
        match self {
            ZOrderOperation::BringToFront => ZOrderOperation::SendToBack,
            ZOrderOperation::SendToBack => ZOrderOperation::BringToFront,
            ZOrderOperation::BringForward => ZOrderOperation::SendBackward,
            ZOrderOperation::SendBackward => ZOrderOperation::BringForward,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ZOrderOperation::BringToFront => "bring to front",
            ZOrderOperation::SendToBack => "send to back",
            ZOrderOperation::BringForward => "bring forward",
            ZOrderOperation::SendBackward => "send backward",
        }
    }
}

impl Document {
    fn at_boundary(&self, index: usize, boundary: Boundary) -> DocModelError {
        DocModelError::AlreadyAtBoundary {
            name: self.shapes()[index].unique_name().to_string(),
            boundary,
        }
    }

    /// Swap the shape with the one in front of it
    pub fn bring_forward(&mut self, name: &str) -> Result<usize> {
        let index = self.index_of(name)?;
        if index + 1 >= self.len() {
            return Err(self.at_boundary(index, Boundary::Front));
        }
        self.shapes_mut().swap(index, index + 1);
        tracing::debug!("'{}' brought forward from layer {}", name, index);
        Ok(index)
    }

    /// Swap the shape with the one behind it
    pub fn send_backward(&mut self, name: &str) -> Result<usize> {
        let index = self.index_of(name)?;
        if index == 0 {
            return Err(self.at_boundary(index, Boundary::Back));
        }
        self.shapes_mut().swap(index, index - 1);
        tracing::debug!("'{}' sent backward from layer {}", name, index);
        Ok(index)
    }

    /// Move the shape to the last index
    pub fn bring_to_front(&mut self, name: &str) -> Result<usize> {
        let index = self.index_of(name)?;
        if index + 1 >= self.len() {
            return Err(self.at_boundary(index, Boundary::Front));
        }
        let shape = self.shapes_mut().remove(index);
        self.shapes_mut().push(shape);
        tracing::debug!("'{}' brought to front from layer {}", name, index);
        Ok(index)
    }

    /// Move the shape to index 0
    pub fn send_to_back(&mut self, name: &str) -> Result<usize> {
        let index = self.index_of(name)?;
        if index == 0 {
            return Err(self.at_boundary(index, Boundary::Back));
        }
        let shape = self.shapes_mut().remove(index);
        self.shapes_mut().insert(0, shape);
        tracing::debug!("'{}' sent to back from layer {}", name, index);
        Ok(index)
    }

    /// Move the shape to an explicit layer index
    pub fn move_to_layer(&mut self, name: &str, target: usize) -> Result<usize> {
        let index = self.index_of(name)?;
        if target >= self.len() {
            return Err(DocModelError::ArgumentRange {
                index: target,
                len: self.len(),
            });
        }
        if target != index {
            let shape = self.shapes_mut().remove(index);
            self.shapes_mut().insert(target, shape);
            tracing::debug!("'{}' moved from layer {} to {}", name, index, target);
        }
        Ok(index)
    }

    /// Apply a relative z-order operation
    pub fn apply_z_order(&mut self, name: &str, operation: ZOrderOperation) -> Result<usize> {
        match operation {
            ZOrderOperation::BringToFront => self.bring_to_front(name),
            ZOrderOperation::SendToBack => self.send_to_back(name),
            ZOrderOperation::BringForward => self.bring_forward(name),
            ZOrderOperation::SendBackward => self.send_backward(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Point, Shape};

    fn doc_with(names: &[&str]) -> Document {
        let mut doc = Document::new("layers");
        for name in names {
            doc.add(Shape::rectangle(*name, Point::ORIGIN, 1.0, 1.0)).unwrap();
        }
        doc
    }

    fn order(doc: &Document) -> Vec<&str> {
        doc.shapes().iter().map(|s| s.unique_name()).collect()
    }

    #[test]
    fn test_bring_forward_and_send_backward() {
        let mut doc = doc_with(&["a", "b", "c"]);
        assert_eq!(doc.bring_forward("a").unwrap(), 0);
        assert_eq!(order(&doc), vec!["b", "a", "c"]);
        assert_eq!(doc.send_backward("c").unwrap(), 2);
        assert_eq!(order(&doc), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_front_and_back() {
        let mut doc = doc_with(&["a", "b", "c", "d"]);
        assert_eq!(doc.bring_to_front("b").unwrap(), 1);
        assert_eq!(order(&doc), vec!["a", "c", "d", "b"]);
        assert_eq!(doc.send_to_back("d").unwrap(), 2);
        assert_eq!(order(&doc), vec!["d", "a", "c", "b"]);
    }

    #[test]
    fn test_boundaries_leave_document_unchanged() {
        let mut doc = doc_with(&["a", "b"]);
        let err = doc.bring_to_front("b").unwrap_err();
        assert_eq!(
            err,
            DocModelError::AlreadyAtBoundary {
                name: "b".into(),
                boundary: Boundary::Front
            }
        );
        assert!(err.is_warning());
        assert!(doc.bring_forward("b").is_err());
        assert!(doc.send_to_back("a").is_err());
        assert!(doc.send_backward("a").is_err());
        assert_eq!(order(&doc), vec!["a", "b"]);
    }

    #[test]
    fn test_move_to_layer_reverses_moves() {
        let mut doc = doc_with(&["a", "b", "c", "d"]);
        let before = order(&doc).iter().map(|s| s.to_string()).collect::<Vec<_>>();

        let previous = doc.bring_to_front("b").unwrap();
        doc.move_to_layer("b", previous).unwrap();
        assert_eq!(order(&doc), before);

        let previous = doc.send_to_back("c").unwrap();
        doc.move_to_layer("c", previous).unwrap();
        assert_eq!(order(&doc), before);
    }

    #[test]
    fn test_move_to_layer_range() {
        let mut doc = doc_with(&["a", "b"]);
        assert!(matches!(
            doc.move_to_layer("a", 2),
            Err(DocModelError::ArgumentRange { index: 2, len: 2 })
        ));
        assert_eq!(doc.move_to_layer("a", 0).unwrap(), 0);
    }

    #[test]
    fn test_opposite() {
        assert_eq!(
            ZOrderOperation::BringToFront.opposite(),
            ZOrderOperation::SendToBack
        );
        assert_eq!(
            ZOrderOperation::SendBackward.opposite(),
            ZOrderOperation::BringForward
        );
    }
}
