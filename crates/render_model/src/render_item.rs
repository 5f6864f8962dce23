//! Render item types

use serde::{Deserialize, Serialize};

/// A rectangle in render coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle of the given size centered on `(cx, cy)`
    pub fn centered(cx: f64, cy: f64, width: f64, height: f64) -> Self {
        Self {
            x: cx - width / 2.0,
            y: cy - height / 2.0,
            width,
            height,
        }
    }

    /// Shift the rectangle by an offset
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

/// Color representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Fill pattern drawn over a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HatchStyle {
    /// Diagonal lines
    Diagonal,
    /// Crossed diagonal lines
    Cross,
    /// Dot grid
    Dots,
}

/// A single drawing instruction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    /// An axis-aligned rectangle
    Rectangle {
        bounds: Rect,
        fill: Option<Color>,
        stroke: Option<Color>,
        stroke_width: f64,
    },
    /// An ellipse inscribed in `bounds`
    Ellipse {
        bounds: Rect,
        fill: Option<Color>,
        stroke: Option<Color>,
        stroke_width: f64,
    },
    /// A closed polygon
    Polygon {
        points: Vec<(f64, f64)>,
        fill: Option<Color>,
        stroke: Option<Color>,
        stroke_width: f64,
    },
    /// A line
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: Color,
        width: f64,
    },
    /// A text label anchored at its center
    Text {
        text: String,
        x: f64,
        y: f64,
        font_size: f64,
        color: Color,
    },
    /// Pattern overlay clipped to `bounds`
    Hatch {
        bounds: Rect,
        style: HatchStyle,
        spacing: f64,
        color: Color,
    },
    /// Dashed outline (selection marker)
    DashedOutline { bounds: Rect, color: Color },
}

/// Everything a renderer needs to draw one shape, back to front
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Renderable {
    primitives: Vec<Primitive>,
}

impl Renderable {
    /// Create an empty renderable
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderable from primitives
    pub fn from_primitives(primitives: Vec<Primitive>) -> Self {
        Self { primitives }
    }

    /// Append a primitive drawn above the existing ones
    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    /// Insert a primitive drawn beneath the existing ones
    pub fn push_under(&mut self, primitive: Primitive) {
        self.primitives.insert(0, primitive);
    }

    /// Append all primitives of another renderable above this one
    pub fn extend(&mut self, other: Renderable) {
        self.primitives.extend(other.primitives);
    }

    /// The primitives in paint order
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_centered() {
        let rect = Rect::centered(10.0, 20.0, 4.0, 6.0);
        assert_eq!(rect, Rect::new(8.0, 17.0, 4.0, 6.0));
        assert_eq!(rect.offset(1.0, -1.0), Rect::new(9.0, 16.0, 4.0, 6.0));
    }

    #[test]
    fn test_push_under_paints_first() {
        let mut renderable = Renderable::new();
        renderable.push(Primitive::Line {
            x1: 0.0,
            y1: 0.0,
            x2: 1.0,
            y2: 1.0,
            color: Color::BLACK,
            width: 1.0,
        });
        renderable.push_under(Primitive::DashedOutline {
            bounds: Rect::default(),
            color: Color::WHITE,
        });

        assert_eq!(renderable.len(), 2);
        assert!(matches!(renderable.primitives()[0], Primitive::DashedOutline { .. }));
    }
}
