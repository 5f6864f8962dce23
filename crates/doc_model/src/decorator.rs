//! Decorators that wrap a shape and add to its appearance
//!
//! A [`Decorator`] exclusively owns its inner shape. Its unique name is
//! derived from the inner shape's name, attributes it does not own are
//! delegated inward, and its renderable is the inner renderable plus the
//! decoration.

use crate::{
    AttributeDescriptor, AttributeKind, AttributeMap, AttributeValue, DocModelError, Drawable,
    Point, Result, Shape, ShapeColor,
};
use render_model::{HatchStyle, Primitive, Rect, Renderable};

/// Separator between a wrapped shape's name and the decoration type
pub const DECORATION_SEPARATOR: char = '+';

/// Pattern of a texture overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TexturePattern {
    Hatch,
    Cross,
    Dots,
}

impl TexturePattern {
    pub const NAMES: &'static [&'static str] = &["hatch", "cross", "dots"];

    pub fn as_str(&self) -> &'static str {
        match self {
            TexturePattern::Hatch => "hatch",
            TexturePattern::Cross => "cross",
            TexturePattern::Dots => "dots",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "hatch" => Some(TexturePattern::Hatch),
            "cross" => Some(TexturePattern::Cross),
            "dots" => Some(TexturePattern::Dots),
            _ => None,
        }
    }

    fn hatch_style(&self) -> HatchStyle {
        match self {
            TexturePattern::Hatch => HatchStyle::Diagonal,
            TexturePattern::Cross => HatchStyle::Cross,
            TexturePattern::Dots => HatchStyle::Dots,
        }
    }
}

/// What a decorator adds to the shape it wraps
#[derive(Debug, Clone, PartialEq)]
pub enum Decoration {
    /// Pattern overlay across the wrapped shape's bounds
    Texture {
        pattern: TexturePattern,
        spacing: f64,
        color: ShapeColor,
    },
    /// Offset shadow beneath the wrapped shape
    Shadow {
        offset_x: f64,
        offset_y: f64,
        color: ShapeColor,
    },
}

const TEXTURE_ATTRIBUTES: &[AttributeDescriptor] = &[
    AttributeDescriptor::new(
        "pattern",
        AttributeKind::Choice(TexturePattern::NAMES),
        "texture pattern",
    ),
    AttributeDescriptor::new("spacing", AttributeKind::Positive, "distance between pattern lines"),
    AttributeDescriptor::new("texture_color", AttributeKind::Color, "pattern color"),
];

const SHADOW_ATTRIBUTES: &[AttributeDescriptor] = &[
    AttributeDescriptor::new("shadow_dx", AttributeKind::Number, "horizontal shadow offset"),
    AttributeDescriptor::new("shadow_dy", AttributeKind::Number, "vertical shadow offset"),
    AttributeDescriptor::new("shadow_color", AttributeKind::Color, "shadow color"),
];

impl Decoration {
    pub const TYPE_NAMES: &'static [&'static str] = &["texture", "shadow"];

    /// Texture with default spacing and color
    pub fn texture(pattern: TexturePattern) -> Self {
        Decoration::Texture {
            pattern,
            spacing: 6.0,
            color: ShapeColor::GRAY,
        }
    }

    /// Shadow with default offset and color
    pub fn shadow() -> Self {
        Decoration::Shadow {
            offset_x: 4.0,
            offset_y: 4.0,
            color: ShapeColor::SHADOW,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Decoration::Texture { .. } => "texture",
            Decoration::Shadow { .. } => "shadow",
        }
    }

    /// A decoration with default settings for a type name
    pub fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "texture" => Some(Self::texture(TexturePattern::Hatch)),
            "shadow" => Some(Self::shadow()),
            _ => None,
        }
    }

    pub fn descriptors(&self) -> &'static [AttributeDescriptor] {
        match self {
            Decoration::Texture { .. } => TEXTURE_ATTRIBUTES,
            Decoration::Shadow { .. } => SHADOW_ATTRIBUTES,
        }
    }

    fn owns(&self, attribute: &str) -> Option<&'static AttributeDescriptor> {
        self.descriptors().iter().find(|d| d.name == attribute)
    }

    fn get(&self, attribute: &str) -> Option<AttributeValue> {
        let value = match (self, attribute) {
            (Decoration::Texture { pattern, .. }, "pattern") => {
                AttributeValue::Choice(pattern.as_str().to_string())
            }
            (Decoration::Texture { spacing, .. }, "spacing") => AttributeValue::Number(*spacing),
            (Decoration::Texture { color, .. }, "texture_color") => AttributeValue::Color(*color),
            (Decoration::Shadow { offset_x, .. }, "shadow_dx") => AttributeValue::Number(*offset_x),
            (Decoration::Shadow { offset_y, .. }, "shadow_dy") => AttributeValue::Number(*offset_y),
            (Decoration::Shadow { color, .. }, "shadow_color") => AttributeValue::Color(*color),
            _ => return None,
        };
        Some(value)
    }

    /// Apply an already-cast value
    fn set(&mut self, attribute: &str, value: &AttributeValue) {
        match (self, attribute) {
            (Decoration::Texture { pattern, .. }, "pattern") => {
                if let Some(parsed) = value.as_text().and_then(TexturePattern::parse) {
                    *pattern = parsed;
                }
            }
            (Decoration::Texture { spacing, .. }, "spacing") => {
                *spacing = value.as_number().unwrap_or(*spacing)
            }
            (Decoration::Texture { color, .. }, "texture_color")
            | (Decoration::Shadow { color, .. }, "shadow_color") => {
                *color = value.as_color().unwrap_or(*color)
            }
            (Decoration::Shadow { offset_x, .. }, "shadow_dx") => {
                *offset_x = value.as_number().unwrap_or(*offset_x)
            }
            (Decoration::Shadow { offset_y, .. }, "shadow_dy") => {
                *offset_y = value.as_number().unwrap_or(*offset_y)
            }
            _ => {}
        }
    }

    fn compose(&self, inner_bounds: Rect, inner: &Renderable) -> Renderable {
        let mut renderable = inner.clone();
        match self {
            Decoration::Texture {
                pattern,
                spacing,
                color,
            } => {
                renderable.push(Primitive::Hatch {
                    bounds: inner_bounds,
                    style: pattern.hatch_style(),
                    spacing: *spacing,
                    color: (*color).into(),
                });
            }
            Decoration::Shadow {
                offset_x,
                offset_y,
                color,
            } => {
                renderable.push_under(Primitive::Rectangle {
                    bounds: inner_bounds.offset(*offset_x, *offset_y),
                    fill: color.paint(),
                    stroke: None,
                    stroke_width: 0.0,
                });
            }
        }
        renderable
    }
}

/// A shape that wraps another shape
#[derive(Debug, Clone)]
pub struct Decorator {
    name: String,
    decoration: Decoration,
    inner: Box<Shape>,
    renderable: Option<Renderable>,
    displayed: bool,
}

impl Decorator {
    /// Wrap `inner`; the decorator's name is derived from the inner name
    pub fn new(inner: Shape, decoration: Decoration) -> Self {
        let name = Self::decorated_name(inner.unique_name(), &decoration);
        Self {
            name,
            decoration,
            inner: Box::new(inner),
            renderable: None,
            displayed: false,
        }
    }

    /// Name a decorator of `decoration` around a shape named `inner_name` gets
    pub fn decorated_name(inner_name: &str, decoration: &Decoration) -> String {
        format!(
            "{}{}{}",
            inner_name,
            DECORATION_SEPARATOR,
            decoration.type_name()
        )
    }

    pub fn decoration(&self) -> &Decoration {
        &self.decoration
    }

    pub fn inner(&self) -> &Shape {
        &self.inner
    }

    pub(crate) fn inner_mut(&mut self) -> &mut Shape {
        &mut self.inner
    }

    /// Split into the wrapped shape and the decoration
    pub fn into_parts(self) -> (Shape, Decoration) {
        (*self.inner, self.decoration)
    }

    pub(crate) fn rename_base(&mut self, base: &str) {
        self.inner.rename(base);
        self.name = Self::decorated_name(self.inner.unique_name(), &self.decoration);
        self.renderable = None;
    }
}

impl Drawable for Decorator {
    fn unique_name(&self) -> &str {
        &self.name
    }

    fn base_name(&self) -> &str {
        self.inner.base_name()
    }

    fn type_name(&self) -> &'static str {
        self.decoration.type_name()
    }

    fn center(&self) -> Point {
        self.inner.center()
    }

    fn bounds(&self) -> Rect {
        self.inner.bounds()
    }

    fn attribute(&self, name: &str) -> Result<AttributeValue> {
        match self.decoration.get(name) {
            Some(value) => Ok(value),
            None => self.inner.attribute(name),
        }
    }

    fn set_attribute(&mut self, name: &str, value: &AttributeValue) -> Result<AttributeValue> {
        let previous = match self.decoration.owns(name) {
            Some(descriptor) => {
                let value = descriptor.kind.cast(name, value)?;
                let previous = self.decoration.get(name).ok_or_else(|| {
                    DocModelError::UnknownAttribute {
                        shape: self.name.clone(),
                        attribute: name.to_string(),
                    }
                })?;
                self.decoration.set(name, &value);
                previous
            }
            None => self.inner.set_attribute(name, value)?,
        };
        self.invalidate();
        Ok(previous)
    }

    fn attributes_to_edit_with_names(&self) -> Vec<AttributeDescriptor> {
        let mut descriptors = self.inner.attributes_to_edit_with_names();
        descriptors.extend_from_slice(self.decoration.descriptors());
        descriptors
    }

    fn accept(&self) -> AttributeMap {
        let mut map = AttributeMap::new();
        map.insert(AttributeMap::NAME, self.name.as_str());
        map.insert(
            AttributeMap::TYPE,
            AttributeValue::Choice(self.decoration.type_name().to_string()),
        );
        map.insert(AttributeMap::WRAPS, self.inner.unique_name());
        for descriptor in self.decoration.descriptors() {
            if let Some(value) = self.decoration.get(descriptor.name) {
                map.insert(descriptor.name, value);
            }
        }
        map
    }

    fn place_at(&mut self, center: Point) {
        self.inner.place_at(center);
        self.invalidate();
    }

    fn renderable(&mut self) -> &Renderable {
        let Decorator {
            decoration,
            inner,
            renderable,
            ..
        } = self;
        renderable.get_or_insert_with(|| {
            let bounds = inner.bounds();
            decoration.compose(bounds, inner.renderable())
        })
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ShapeKind;
    use render_model::RecordingSurface;

    fn textured_rect() -> Shape {
        Shape::rectangle("r1", Point::new(10.0, 10.0), 20.0, 10.0)
            .decorate(Decoration::texture(TexturePattern::Hatch))
    }

    #[test]
    fn test_decorated_name_is_derived() {
        let shape = textured_rect();
        assert_eq!(shape.unique_name(), "r1+texture");
        assert_eq!(shape.base_name(), "r1");
        assert!(shape.answers_to("r1"));
        assert!(shape.answers_to("r1+texture"));

        let shadowed = shape.decorate(Decoration::shadow());
        assert_eq!(shadowed.unique_name(), "r1+texture+shadow");
        assert_eq!(shadowed.names(), vec!["r1+texture+shadow", "r1+texture", "r1"]);
    }

    #[test]
    fn test_edit_delegates_unowned_attributes() {
        let mut shape = textured_rect();
        let previous = shape.set_attribute("width", &50.0.into()).unwrap();
        assert_eq!(previous, AttributeValue::Number(20.0));
        let inner = shape.as_decorator().unwrap().inner();
        assert_eq!(inner.attribute("width").unwrap(), AttributeValue::Number(50.0));
    }

    #[test]
    fn test_edit_own_attribute() {
        let mut shape = textured_rect();
        let previous = shape.set_attribute("pattern", &"dots".into()).unwrap();
        assert_eq!(previous, AttributeValue::Choice("hatch".into()));
        assert_eq!(
            shape.attribute("pattern").unwrap(),
            AttributeValue::Choice("dots".into())
        );
        assert!(shape.set_attribute("pattern", &"plaid".into()).is_err());
    }

    #[test]
    fn test_attributes_listed_inner_first() {
        let shape = textured_rect();
        let names: Vec<&str> = shape
            .attributes_to_edit_with_names()
            .iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(
            names,
            vec![
                "x",
                "y",
                "width",
                "height",
                "fill",
                "stroke",
                "stroke_width",
                "pattern",
                "spacing",
                "texture_color"
            ]
        );
    }

    #[test]
    fn test_accept_references_wrapped_shape() {
        let shape = textured_rect();
        let map = shape.accept();
        assert_eq!(map.wraps(), Some("r1"));
        assert_eq!(map.type_name(), Some("texture"));
        assert!(!map.contains_key("width"));

        let chain = shape.accept_chain();
        assert_eq!(chain.len(), 2);
        assert_eq!(chain[0].name(), Some("r1"));
        assert_eq!(chain[1].name(), Some("r1+texture"));
    }

    #[test]
    fn test_clone_is_independent() {
        let original = textured_rect();
        let mut copy = original.duplicate();
        copy.set_attribute("spacing", &12.0.into()).unwrap();
        copy.set_attribute("width", &99.0.into()).unwrap();

        assert_eq!(original.attribute("spacing").unwrap(), AttributeValue::Number(6.0));
        assert_eq!(original.attribute("width").unwrap(), AttributeValue::Number(20.0));
    }

    #[test]
    fn test_rename_rederives_chain() {
        let mut shape = textured_rect().decorate(Decoration::shadow());
        shape.rename("r1_copy");
        assert_eq!(
            shape.names(),
            vec!["r1_copy+texture+shadow", "r1_copy+texture", "r1_copy"]
        );
    }

    #[test]
    fn test_renderable_layers() {
        let mut shape = Shape::ellipse("e", Point::ORIGIN, 5.0, 5.0)
            .decorate(Decoration::texture(TexturePattern::Cross))
            .decorate(Decoration::shadow());
        let primitives = shape.renderable().primitives().to_vec();
        assert_eq!(primitives.len(), 3);
        assert!(matches!(primitives[0], Primitive::Rectangle { stroke: None, .. }));
        assert!(matches!(primitives[1], Primitive::Ellipse { .. }));
        assert!(matches!(
            primitives[2],
            Primitive::Hatch { style: HatchStyle::Cross, .. }
        ));
    }

    #[test]
    fn test_inner_edit_redraws_decorator() {
        let mut surface = RecordingSurface::new();
        let mut shape = textured_rect();
        shape.display(&mut surface);
        shape.edit("width", &40.0.into(), &mut surface).unwrap();

        assert_eq!(surface.overdraws(), 0);
        let names: Vec<&str> = surface.visible_names().collect();
        assert_eq!(names, vec!["r1+texture"]);
        match &surface.visible("r1+texture").unwrap().primitives()[1] {
            Primitive::Hatch { bounds, .. } => assert_eq!(bounds.width, 40.0),
            other => panic!("unexpected primitive {:?}", other),
        }
    }

    #[test]
    fn test_undecorate_returns_parts() {
        let shape = textured_rect();
        let (inner, decoration) = shape.undecorate().unwrap();
        assert_eq!(inner.unique_name(), "r1");
        assert_eq!(decoration.type_name(), "texture");
        assert!(matches!(
            inner.as_basic().map(|b| b.kind()),
            Some(ShapeKind::Rectangle { .. })
        ));
    }
}
