//! Drawable shapes
//!
//! A [`Shape`] is either a [`BasicShape`] or a [`Decorator`] that owns
//! another shape. Both implement [`Drawable`], the capability set the
//! document and the command engine work against.

use crate::{
    AttributeDescriptor, AttributeKind, AttributeMap, AttributeValue, Decoration, Decorator,
    DocModelError, Point, Result, ShapeColor,
};
use render_model::{Color, Primitive, Rect, Renderable, Surface};
use std::f64::consts::PI;

// =============================================================================
// Capabilities
// =============================================================================

/// Capabilities shared by every shape
///
/// Implementors provide the pure model operations. The provided methods
/// combine them with a [`Surface`] so that an appearance-changing edit is
/// always applied to the model first and then erased and presented again,
/// never leaving a stale renderable on the surface.
pub trait Drawable {
    /// Stable identifier, unique within a document
    fn unique_name(&self) -> &str;

    /// Name of the innermost shape of a decorator chain
    fn base_name(&self) -> &str;

    /// Type name used in attribute maps ("rectangle", "texture", ...)
    fn type_name(&self) -> &'static str;

    fn center(&self) -> Point;

    /// Axis-aligned bounding box
    fn bounds(&self) -> Rect;

    /// Read an attribute by name
    fn attribute(&self, name: &str) -> Result<AttributeValue>;

    /// Set an attribute without touching any surface, returning the old value.
    ///
    /// Fails without mutating anything if the attribute is unknown or the
    /// value cannot be cast to its type.
    fn set_attribute(&mut self, name: &str, value: &AttributeValue) -> Result<AttributeValue>;

    /// Editable attributes; decorators list the wrapped shape's first
    fn attributes_to_edit_with_names(&self) -> Vec<AttributeDescriptor>;

    /// Flat attribute map for serializers
    fn accept(&self) -> AttributeMap;

    /// Place the center at `center` without touching any surface
    fn place_at(&mut self, center: Point);

    /// The renderable for the current state, built on first access
    fn renderable(&mut self) -> &Renderable;

    /// Drop the cached renderable
    fn invalidate(&mut self);

    fn is_displayed(&self) -> bool;

    fn set_displayed(&mut self, displayed: bool);

    /// Present the renderable on `surface`
    fn display(&mut self, surface: &mut dyn Surface) {
        if self.is_displayed() {
            return;
        }
        let name = self.unique_name().to_string();
        surface.present(&name, self.renderable());
        self.set_displayed(true);
    }

    /// Erase the renderable from `surface` and drop the cache
    fn destroy(&mut self, surface: &mut dyn Surface) {
        if self.is_displayed() {
            surface.erase(self.unique_name());
            self.set_displayed(false);
        }
        self.invalidate();
    }

    /// Replace what the surface shows with the current state
    fn redraw(&mut self, surface: &mut dyn Surface) {
        if self.is_displayed() {
            self.destroy(surface);
            self.display(surface);
        } else {
            self.invalidate();
        }
    }

    /// Edit an attribute and redraw, returning the previous value
    fn edit(
        &mut self,
        attribute: &str,
        value: &AttributeValue,
        surface: &mut dyn Surface,
    ) -> Result<AttributeValue> {
        let previous = self.set_attribute(attribute, value)?;
        self.redraw(surface);
        Ok(previous)
    }

    /// Check every editable attribute's current value against its descriptor
    fn validate(&self) -> Result<()> {
        for descriptor in self.attributes_to_edit_with_names() {
            let value = self.attribute(descriptor.name)?;
            descriptor.kind.cast(descriptor.name, &value)?;
        }
        Ok(())
    }

    /// Translate by an offset and redraw
    fn move_by(&mut self, dx: f64, dy: f64, surface: &mut dyn Surface) {
        let center = self.center();
        self.move_to(center.translated(dx, dy), surface);
    }

    /// Move the center to `center` and redraw
    fn move_to(&mut self, center: Point, surface: &mut dyn Surface) {
        self.place_at(center);
        self.redraw(surface);
    }
}

// =============================================================================
// Basic shapes
// =============================================================================

/// Stroke and fill shared by all basic shapes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeStyle {
    pub fill: ShapeColor,
    pub stroke: ShapeColor,
    pub stroke_width: f64,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            fill: ShapeColor::TRANSPARENT,
            stroke: ShapeColor::BLACK,
            stroke_width: 1.0,
        }
    }
}

/// Geometry of a basic shape
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    Rectangle { width: f64, height: f64 },
    Ellipse { radius_x: f64, radius_y: f64 },
    /// Segment through the center spanning `dx` by `dy`
    Line { dx: f64, dy: f64 },
    /// Regular polygon inscribed in a circle of `radius`
    Polygon { sides: u32, radius: f64 },
    Text { text: String, font_size: f64 },
    /// Dashed outline of the current selection area
    SelectionMarker { width: f64, height: f64 },
}

/// Most sides a polygon may have
pub const MAX_POLYGON_SIDES: u32 = 1024;

const COMMON_ATTRIBUTES: &[AttributeDescriptor] = &[
    AttributeDescriptor::new("x", AttributeKind::Number, "horizontal position of the center"),
    AttributeDescriptor::new("y", AttributeKind::Number, "vertical position of the center"),
];

const STYLE_ATTRIBUTES: &[AttributeDescriptor] = &[
    AttributeDescriptor::new("fill", AttributeKind::Color, "interior color, 'none' for hollow"),
    AttributeDescriptor::new("stroke", AttributeKind::Color, "outline color"),
    AttributeDescriptor::new("stroke_width", AttributeKind::Positive, "outline width"),
];

const RECTANGLE_ATTRIBUTES: &[AttributeDescriptor] = &[
    AttributeDescriptor::new("width", AttributeKind::Positive, "width"),
    AttributeDescriptor::new("height", AttributeKind::Positive, "height"),
];

const ELLIPSE_ATTRIBUTES: &[AttributeDescriptor] = &[
    AttributeDescriptor::new("radius_x", AttributeKind::Positive, "horizontal radius"),
    AttributeDescriptor::new("radius_y", AttributeKind::Positive, "vertical radius"),
];

const LINE_ATTRIBUTES: &[AttributeDescriptor] = &[
    AttributeDescriptor::new("dx", AttributeKind::Number, "horizontal extent"),
    AttributeDescriptor::new("dy", AttributeKind::Number, "vertical extent"),
];

const POLYGON_ATTRIBUTES: &[AttributeDescriptor] = &[
    AttributeDescriptor::new(
        "sides",
        AttributeKind::Count {
            min: 3,
            max: MAX_POLYGON_SIDES,
        },
        "number of sides",
    ),
    AttributeDescriptor::new("radius", AttributeKind::Positive, "circumscribed radius"),
];

const TEXT_ATTRIBUTES: &[AttributeDescriptor] = &[
    AttributeDescriptor::new("text", AttributeKind::Text, "label text"),
    AttributeDescriptor::new("font_size", AttributeKind::Positive, "font size in points"),
];

impl ShapeKind {
    /// Type names of the kinds that can be created by name
    pub const TYPE_NAMES: &'static [&'static str] =
        &["rectangle", "ellipse", "line", "polygon", "text"];

    pub fn type_name(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle { .. } => "rectangle",
            ShapeKind::Ellipse { .. } => "ellipse",
            ShapeKind::Line { .. } => "line",
            ShapeKind::Polygon { .. } => "polygon",
            ShapeKind::Text { .. } => "text",
            ShapeKind::SelectionMarker { .. } => "marker",
        }
    }

    /// A kind with default geometry for a type name
    pub fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "rectangle" => Some(ShapeKind::Rectangle { width: 40.0, height: 30.0 }),
            "ellipse" => Some(ShapeKind::Ellipse { radius_x: 20.0, radius_y: 15.0 }),
            "line" => Some(ShapeKind::Line { dx: 40.0, dy: 0.0 }),
            "polygon" => Some(ShapeKind::Polygon { sides: 6, radius: 20.0 }),
            "text" => Some(ShapeKind::Text { text: String::new(), font_size: 12.0 }),
            _ => None,
        }
    }

    fn descriptors(&self) -> &'static [AttributeDescriptor] {
        match self {
            ShapeKind::Rectangle { .. } | ShapeKind::SelectionMarker { .. } => RECTANGLE_ATTRIBUTES,
            ShapeKind::Ellipse { .. } => ELLIPSE_ATTRIBUTES,
            ShapeKind::Line { .. } => LINE_ATTRIBUTES,
            ShapeKind::Polygon { .. } => POLYGON_ATTRIBUTES,
            ShapeKind::Text { .. } => TEXT_ATTRIBUTES,
        }
    }

    fn get(&self, attribute: &str) -> Option<AttributeValue> {
        let value = match (self, attribute) {
            (ShapeKind::Rectangle { width, .. }, "width")
            | (ShapeKind::SelectionMarker { width, .. }, "width") => AttributeValue::Number(*width),
            (ShapeKind::Rectangle { height, .. }, "height")
            | (ShapeKind::SelectionMarker { height, .. }, "height") => {
                AttributeValue::Number(*height)
            }
            (ShapeKind::Ellipse { radius_x, .. }, "radius_x") => AttributeValue::Number(*radius_x),
            (ShapeKind::Ellipse { radius_y, .. }, "radius_y") => AttributeValue::Number(*radius_y),
            (ShapeKind::Line { dx, .. }, "dx") => AttributeValue::Number(*dx),
            (ShapeKind::Line { dy, .. }, "dy") => AttributeValue::Number(*dy),
            (ShapeKind::Polygon { sides, .. }, "sides") => AttributeValue::Number(f64::from(*sides)),
            (ShapeKind::Polygon { radius, .. }, "radius") => AttributeValue::Number(*radius),
            (ShapeKind::Text { text, .. }, "text") => AttributeValue::Text(text.clone()),
            (ShapeKind::Text { font_size, .. }, "font_size") => AttributeValue::Number(*font_size),
            _ => return None,
        };
        Some(value)
    }

    /// Apply an already-cast value
    fn set(&mut self, attribute: &str, value: &AttributeValue) {
        let number = value.as_number().unwrap_or_default();
        match (self, attribute) {
            (ShapeKind::Rectangle { width, .. }, "width")
            | (ShapeKind::SelectionMarker { width, .. }, "width") => *width = number,
            (ShapeKind::Rectangle { height, .. }, "height")
            | (ShapeKind::SelectionMarker { height, .. }, "height") => *height = number,
            (ShapeKind::Ellipse { radius_x, .. }, "radius_x") => *radius_x = number,
            (ShapeKind::Ellipse { radius_y, .. }, "radius_y") => *radius_y = number,
            (ShapeKind::Line { dx, .. }, "dx") => *dx = number,
            (ShapeKind::Line { dy, .. }, "dy") => *dy = number,
            (ShapeKind::Polygon { sides, .. }, "sides") => {
                *sides = number.clamp(3.0, f64::from(MAX_POLYGON_SIDES)) as u32
            }
            (ShapeKind::Polygon { radius, .. }, "radius") => *radius = number,
            (ShapeKind::Text { text, .. }, "text") => {
                *text = value.as_text().unwrap_or_default().to_string()
            }
            (ShapeKind::Text { font_size, .. }, "font_size") => *font_size = number,
            _ => {}
        }
    }

    fn bounds(&self, center: Point) -> Rect {
        let (width, height) = match self {
            ShapeKind::Rectangle { width, height }
            | ShapeKind::SelectionMarker { width, height } => (*width, *height),
            ShapeKind::Ellipse { radius_x, radius_y } => (radius_x * 2.0, radius_y * 2.0),
            ShapeKind::Line { dx, dy } => (dx.abs(), dy.abs()),
            ShapeKind::Polygon { radius, .. } => (radius * 2.0, radius * 2.0),
            ShapeKind::Text { text, font_size } => {
                (font_size * 0.6 * text.chars().count() as f64, *font_size)
            }
        };
        Rect::centered(center.x, center.y, width, height)
    }
}

/// A plain, undecorated shape
#[derive(Debug, Clone)]
pub struct BasicShape {
    name: String,
    kind: ShapeKind,
    center: Point,
    style: ShapeStyle,
    renderable: Option<Renderable>,
    displayed: bool,
}

impl BasicShape {
    /// Create a shape with the default style
    pub fn new(name: impl Into<String>, kind: ShapeKind, center: Point) -> Self {
        Self {
            name: name.into(),
            kind,
            center,
            style: ShapeStyle::default(),
            renderable: None,
            displayed: false,
        }
    }

    /// Set the style
    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    pub fn style(&self) -> &ShapeStyle {
        &self.style
    }

    pub(crate) fn rename(&mut self, name: &str) {
        self.name = name.to_string();
        self.renderable = None;
    }

    fn descriptor(&self, attribute: &str) -> Option<&'static AttributeDescriptor> {
        COMMON_ATTRIBUTES
            .iter()
            .chain(self.kind.descriptors())
            .chain(STYLE_ATTRIBUTES)
            .find(|d| d.name == attribute)
    }

    fn build_renderable(kind: &ShapeKind, center: Point, style: &ShapeStyle) -> Renderable {
        let fill = style.fill.paint();
        let stroke = style.stroke.paint();
        let stroke_width = style.stroke_width;
        let primitive = match kind {
            ShapeKind::Rectangle { .. } => Primitive::Rectangle {
                bounds: kind.bounds(center),
                fill,
                stroke,
                stroke_width,
            },
            ShapeKind::Ellipse { .. } => Primitive::Ellipse {
                bounds: kind.bounds(center),
                fill,
                stroke,
                stroke_width,
            },
            ShapeKind::Line { dx, dy } => Primitive::Line {
                x1: center.x - dx / 2.0,
                y1: center.y - dy / 2.0,
                x2: center.x + dx / 2.0,
                y2: center.y + dy / 2.0,
                color: stroke.unwrap_or(Color::TRANSPARENT),
                width: stroke_width,
            },
            ShapeKind::Polygon { sides, radius } => {
                let step = 2.0 * PI / f64::from(*sides);
                let points = (0..*sides)
                    .map(|i| {
                        let angle = -PI / 2.0 + step * f64::from(i);
                        (center.x + radius * angle.cos(), center.y + radius * angle.sin())
                    })
                    .collect();
                Primitive::Polygon {
                    points,
                    fill,
                    stroke,
                    stroke_width,
                }
            }
            ShapeKind::Text { text, font_size } => Primitive::Text {
                text: text.clone(),
                x: center.x,
                y: center.y,
                font_size: *font_size,
                color: stroke.unwrap_or(Color::TRANSPARENT),
            },
            ShapeKind::SelectionMarker { .. } => Primitive::DashedOutline {
                bounds: kind.bounds(center),
                color: stroke.unwrap_or(Color::BLACK),
            },
        };
        Renderable::from_primitives(vec![primitive])
    }
}

impl Drawable for BasicShape {
    fn unique_name(&self) -> &str {
        &self.name
    }

    fn base_name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    fn center(&self) -> Point {
        self.center
    }

    fn bounds(&self) -> Rect {
        self.kind.bounds(self.center)
    }

    fn attribute(&self, name: &str) -> Result<AttributeValue> {
        let value = match name {
            "x" => Some(AttributeValue::Number(self.center.x)),
            "y" => Some(AttributeValue::Number(self.center.y)),
            "fill" => Some(AttributeValue::Color(self.style.fill)),
            "stroke" => Some(AttributeValue::Color(self.style.stroke)),
            "stroke_width" => Some(AttributeValue::Number(self.style.stroke_width)),
            other => self.kind.get(other),
        };
        value.ok_or_else(|| DocModelError::UnknownAttribute {
            shape: self.name.clone(),
            attribute: name.to_string(),
        })
    }

    fn set_attribute(&mut self, name: &str, value: &AttributeValue) -> Result<AttributeValue> {
        let descriptor = self
            .descriptor(name)
            .ok_or_else(|| DocModelError::UnknownAttribute {
                shape: self.name.clone(),
                attribute: name.to_string(),
            })?;
        let value = descriptor.kind.cast(name, value)?;
        let previous = self.attribute(name)?;

        match name {
            "x" => self.center.x = value.as_number().unwrap_or(self.center.x),
            "y" => self.center.y = value.as_number().unwrap_or(self.center.y),
            "fill" => self.style.fill = value.as_color().unwrap_or(self.style.fill),
            "stroke" => self.style.stroke = value.as_color().unwrap_or(self.style.stroke),
            "stroke_width" => {
                self.style.stroke_width = value.as_number().unwrap_or(self.style.stroke_width)
            }
            other => self.kind.set(other, &value),
        }
        self.invalidate();
        Ok(previous)
    }

    fn attributes_to_edit_with_names(&self) -> Vec<AttributeDescriptor> {
        COMMON_ATTRIBUTES
            .iter()
            .chain(self.kind.descriptors())
            .chain(STYLE_ATTRIBUTES)
            .copied()
            .collect()
    }

    fn accept(&self) -> AttributeMap {
        let mut map = AttributeMap::new();
        map.insert(AttributeMap::NAME, self.name.as_str());
        map.insert(
            AttributeMap::TYPE,
            AttributeValue::Choice(self.kind.type_name().to_string()),
        );
        for descriptor in self.attributes_to_edit_with_names() {
            if let Ok(value) = self.attribute(descriptor.name) {
                map.insert(descriptor.name, value);
            }
        }
        map
    }

    fn place_at(&mut self, center: Point) {
        self.center = center;
        self.invalidate();
    }

    fn renderable(&mut self) -> &Renderable {
        let BasicShape {
            kind,
            center,
            style,
            renderable,
            ..
        } = self;
        renderable.get_or_insert_with(|| Self::build_renderable(kind, *center, style))
    }

    fn invalidate(&mut self) {
        self.renderable = None;
    }

    fn is_displayed(&self) -> bool {
        self.displayed
    }

    fn set_displayed(&mut self, displayed: bool) {
        self.displayed = displayed;
    }
}

// =============================================================================
// Shape
// =============================================================================

/// A shape in a document: a basic shape or a decorator chain around one
#[derive(Debug, Clone)]
pub enum Shape {
    Basic(BasicShape),
    Decorated(Decorator),
}

impl Shape {
    /// Create a rectangle
    pub fn rectangle(name: impl Into<String>, center: Point, width: f64, height: f64) -> Self {
        Shape::Basic(BasicShape::new(
            name,
            ShapeKind::Rectangle { width, height },
            center,
        ))
    }

    /// Create an ellipse
    pub fn ellipse(name: impl Into<String>, center: Point, radius_x: f64, radius_y: f64) -> Self {
        Shape::Basic(BasicShape::new(
            name,
            ShapeKind::Ellipse { radius_x, radius_y },
            center,
        ))
    }

    /// Create a line through `center`
    pub fn line(name: impl Into<String>, center: Point, dx: f64, dy: f64) -> Self {
        Shape::Basic(BasicShape::new(name, ShapeKind::Line { dx, dy }, center))
    }

    /// Create a regular polygon with its side count clamped to
    /// `3..=MAX_POLYGON_SIDES`
    pub fn polygon(name: impl Into<String>, center: Point, sides: u32, radius: f64) -> Self {
        Shape::Basic(BasicShape::new(
            name,
            ShapeKind::Polygon {
                sides: sides.clamp(3, MAX_POLYGON_SIDES),
                radius,
            },
            center,
        ))
    }

    /// Create a text label
    pub fn text(
        name: impl Into<String>,
        center: Point,
        text: impl Into<String>,
        font_size: f64,
    ) -> Self {
        Shape::Basic(BasicShape::new(
            name,
            ShapeKind::Text {
                text: text.into(),
                font_size,
            },
            center,
        ))
    }

    /// Wrap this shape in a decorator
    pub fn decorate(self, decoration: Decoration) -> Shape {
        Shape::Decorated(Decorator::new(self, decoration))
    }

    /// Remove the outermost decorator, if any
    pub fn undecorate(self) -> std::result::Result<(Shape, Decoration), Shape> {
        match self {
            Shape::Decorated(decorator) => Ok(decorator.into_parts()),
            basic => Err(basic),
        }
    }

    pub fn as_basic(&self) -> Option<&BasicShape> {
        match self {
            Shape::Basic(basic) => Some(basic),
            Shape::Decorated(_) => None,
        }
    }

    pub fn as_decorator(&self) -> Option<&Decorator> {
        match self {
            Shape::Basic(_) => None,
            Shape::Decorated(decorator) => Some(decorator),
        }
    }

    /// Every name in the chain, outermost first
    pub fn names(&self) -> Vec<&str> {
        match self {
            Shape::Basic(basic) => vec![basic.unique_name()],
            Shape::Decorated(decorator) => {
                let mut names = vec![decorator.unique_name()];
                names.extend(decorator.inner().names());
                names
            }
        }
    }

    /// Whether `name` identifies this shape, decorated or not
    pub fn answers_to(&self, name: &str) -> bool {
        self.unique_name() == name || self.base_name() == name
    }

    /// Whether the chain already has a decoration of the given type
    pub fn has_decoration(&self, type_name: &str) -> bool {
        match self {
            Shape::Basic(_) => false,
            Shape::Decorated(decorator) => {
                decorator.decoration().type_name() == type_name
                    || decorator.inner().has_decoration(type_name)
            }
        }
    }

    /// Independent copy that has not been displayed anywhere
    pub fn duplicate(&self) -> Shape {
        let mut copy = self.clone();
        copy.reset_display_state();
        copy
    }

    /// Give the base shape a new name and re-derive decorator names
    pub fn rename(&mut self, base: &str) {
        match self {
            Shape::Basic(basic) => basic.rename(base),
            Shape::Decorated(decorator) => decorator.rename_base(base),
        }
    }

    /// Attribute maps of the whole chain, innermost first
    pub fn accept_chain(&self) -> Vec<AttributeMap> {
        match self {
            Shape::Basic(basic) => vec![basic.accept()],
            Shape::Decorated(decorator) => {
                let mut maps = decorator.inner().accept_chain();
                maps.push(decorator.accept());
                maps
            }
        }
    }

    pub(crate) fn reset_display_state(&mut self) {
        self.set_displayed(false);
        if let Shape::Decorated(decorator) = self {
            decorator.inner_mut().reset_display_state();
        }
    }

    fn as_drawable(&self) -> &dyn Drawable {
        match self {
            Shape::Basic(basic) => basic,
            Shape::Decorated(decorator) => decorator,
        }
    }

    fn as_drawable_mut(&mut self) -> &mut dyn Drawable {
        match self {
            Shape::Basic(basic) => basic,
            Shape::Decorated(decorator) => decorator,
        }
    }
}

impl Drawable for Shape {
    fn unique_name(&self) -> &str {
        self.as_drawable().unique_name()
    }

    fn base_name(&self) -> &str {
        self.as_drawable().base_name()
    }

    fn type_name(&self) -> &'static str {
        self.as_drawable().type_name()
    }

    fn center(&self) -> Point {
        self.as_drawable().center()
    }

    fn bounds(&self) -> Rect {
        self.as_drawable().bounds()
    }

    fn attribute(&self, name: &str) -> Result<AttributeValue> {
        self.as_drawable().attribute(name)
    }

    fn set_attribute(&mut self, name: &str, value: &AttributeValue) -> Result<AttributeValue> {
        self.as_drawable_mut().set_attribute(name, value)
    }

    fn attributes_to_edit_with_names(&self) -> Vec<AttributeDescriptor> {
        self.as_drawable().attributes_to_edit_with_names()
    }

    fn accept(&self) -> AttributeMap {
        self.as_drawable().accept()
    }

    fn place_at(&mut self, center: Point) {
        self.as_drawable_mut().place_at(center)
    }

    fn renderable(&mut self) -> &Renderable {
        self.as_drawable_mut().renderable()
    }

    fn invalidate(&mut self) {
        self.as_drawable_mut().invalidate()
    }

    fn is_displayed(&self) -> bool {
        self.as_drawable().is_displayed()
    }

    fn set_displayed(&mut self, displayed: bool) {
        self.as_drawable_mut().set_displayed(displayed)
    }
}

impl From<BasicShape> for Shape {
    fn from(basic: BasicShape) -> Self {
        Shape::Basic(basic)
    }
}
