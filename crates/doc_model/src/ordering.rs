//! Shape ordering strategies for listing and export

use crate::{Document, Drawable, Shape};
use serde::{Deserialize, Serialize};

/// How shapes are ordered when listed or saved.
///
/// Neither strategy lists the selection marker or reorders the document
/// itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderingStrategy {
    /// Document order, back to front
    #[default]
    Creation,
    /// Top to bottom by center, then left to right
    Spatial,
}

impl OrderingStrategy {
    pub const NAMES: &'static [&'static str] = &["creation", "spatial"];

    /// Shapes of `document` in this order
    pub fn order<'a>(&self, document: &'a Document) -> Vec<&'a Shape> {
        let mut shapes: Vec<&Shape> = document.shapes().iter().collect();
        if let OrderingStrategy::Spatial = self {
            // sort_by is stable: equal centers keep document order
            shapes.sort_by(|a, b| {
                let (a, b) = (a.center(), b.center());
                a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x))
            });
        }
        shapes
    }

    /// Unique names in this order
    pub fn names<'a>(&self, document: &'a Document) -> Vec<&'a str> {
        self.order(document)
            .into_iter()
            .map(|s| s.unique_name())
            .collect()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderingStrategy::Creation => "creation",
            OrderingStrategy::Spatial => "spatial",
        }
    }
}

impl std::fmt::Display for OrderingStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderingStrategy {
    type Err = crate::DocModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "creation" => Ok(OrderingStrategy::Creation),
            "spatial" => Ok(OrderingStrategy::Spatial),
            other => Err(crate::DocModelError::InvalidOperation(format!(
                "unknown ordering '{}', expected creation or spatial",
                other
            ))),
        }
    }
}
