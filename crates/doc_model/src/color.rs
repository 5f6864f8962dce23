//! Colors for shape fills, strokes and decorations

use serde::{Deserialize, Serialize};

/// Color representation for shape fills and strokes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ShapeColor {
    /// Create an opaque RGB color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create an RGBA color
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Common colors
    pub const BLACK: ShapeColor = ShapeColor::rgb(0, 0, 0);
    pub const WHITE: ShapeColor = ShapeColor::rgb(255, 255, 255);
    pub const TRANSPARENT: ShapeColor = ShapeColor::rgba(0, 0, 0, 0);
    pub const BLUE: ShapeColor = ShapeColor::rgb(68, 114, 196);
    pub const RED: ShapeColor = ShapeColor::rgb(192, 0, 0);
    pub const GREEN: ShapeColor = ShapeColor::rgb(84, 130, 53);
    pub const YELLOW: ShapeColor = ShapeColor::rgb(255, 192, 0);
    pub const ORANGE: ShapeColor = ShapeColor::rgb(237, 125, 49);
    pub const PURPLE: ShapeColor = ShapeColor::rgb(112, 48, 160);
    pub const GRAY: ShapeColor = ShapeColor::rgb(128, 128, 128);
    pub const SHADOW: ShapeColor = ShapeColor::rgba(0, 0, 0, 96);

    const NAMED: &'static [(&'static str, ShapeColor)] = &[
        ("black", ShapeColor::BLACK),
        ("white", ShapeColor::WHITE),
        ("none", ShapeColor::TRANSPARENT),
        ("transparent", ShapeColor::TRANSPARENT),
        ("blue", ShapeColor::BLUE),
        ("red", ShapeColor::RED),
        ("green", ShapeColor::GREEN),
        ("yellow", ShapeColor::YELLOW),
        ("orange", ShapeColor::ORANGE),
        ("purple", ShapeColor::PURPLE),
        ("gray", ShapeColor::GRAY),
        ("grey", ShapeColor::GRAY),
    ];

    /// Whether the color paints nothing
    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Convert to hex string (e.g., "#RRGGBB" or "#RRGGBBAA")
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }

    /// Parse from hex string
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }
        match hex.len() {
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Self::rgb(r, g, b))
            }
            8 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                let a = u8::from_str_radix(&hex[6..8], 16).ok()?;
                Some(Self::rgba(r, g, b, a))
            }
            _ => None,
        }
    }

    /// Parse a color name ("red", "none") or a "#RRGGBB[AA]" hex string
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.starts_with('#') {
            return Self::from_hex(input);
        }
        Self::NAMED
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(input))
            .map(|(_, color)| *color)
    }

    /// The render color, or `None` when nothing should be painted
    pub fn paint(&self) -> Option<render_model::Color> {
        if self.is_transparent() {
            None
        } else {
            Some((*self).into())
        }
    }
}

impl Default for ShapeColor {
    fn default() -> Self {
        Self::BLACK
    }
}

impl std::fmt::Display for ShapeColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_transparent() {
            write!(f, "none")
        } else {
            write!(f, "{}", self.to_hex())
        }
    }
}

impl From<ShapeColor> for render_model::Color {
    fn from(c: ShapeColor) -> Self {
        render_model::Color::rgba(c.r, c.g, c.b, c.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        assert_eq!(ShapeColor::RED.to_hex(), "#C00000");
        assert_eq!(ShapeColor::from_hex("#C00000"), Some(ShapeColor::RED));
        assert_eq!(ShapeColor::from_hex("#00000060"), Some(ShapeColor::SHADOW));
        assert_eq!(ShapeColor::from_hex("C00000"), None);
        assert_eq!(ShapeColor::from_hex("#C0000"), None);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(ShapeColor::parse("Blue"), Some(ShapeColor::BLUE));
        assert_eq!(ShapeColor::parse("none"), Some(ShapeColor::TRANSPARENT));
        assert_eq!(ShapeColor::parse("chartreuse"), None);
    }

    #[test]
    fn test_transparent_paints_nothing() {
        assert!(ShapeColor::TRANSPARENT.paint().is_none());
        assert_eq!(ShapeColor::TRANSPARENT.to_string(), "none");
        assert!(ShapeColor::GREEN.paint().is_some());
    }
}
