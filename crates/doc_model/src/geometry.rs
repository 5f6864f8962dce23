//! Points and axis-aligned areas in document coordinates
//!
//! The y axis grows downward: the top-left corner of an area has the
//! smallest coordinates.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A point in document coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// This point shifted by an offset
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A rectangular selection area given by two corners
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub top_left: Point,
    pub bottom_right: Point,
}

impl Area {
    /// Create an area from any two opposite corners
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            top_left: Point::new(a.x.min(b.x), a.y.min(b.y)),
            bottom_right: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn width(&self) -> f64 {
        self.bottom_right.x - self.top_left.x
    }

    pub fn height(&self) -> f64 {
        self.bottom_right.y - self.top_left.y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.top_left.x + self.bottom_right.x) / 2.0,
            (self.top_left.y + self.bottom_right.y) / 2.0,
        )
    }

    /// Whether `point` lies inside the area.
    ///
    /// The top edge is exclusive and the other three are inclusive, so a
    /// point on the edge shared by two vertically stacked areas belongs to
    /// exactly one of them.
    pub fn contains(&self, point: Point) -> bool {
        self.top_left.x <= point.x
            && self.top_left.y < point.y
            && point.x <= self.bottom_right.x
            && point.y <= self.bottom_right.y
    }
}
