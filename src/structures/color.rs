use serde::Serialize;

use super::super::parser::{ConversionError, SaveFileValue};

/// An RGB color, as defined in the country files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// Reads a `{ r g b }` value.
    /// Returns `None` when the value does not hold exactly three tokens,
    /// and an error when one of the three is not an integer in the 0-255 range.
    pub fn from_value(value: &SaveFileValue) -> Result<Option<Color>, ConversionError> {
        let object = value.as_object()?;
        let tokens: Vec<_> = object.token_strings().collect();
        if tokens.len() != 3 {
            return Ok(None);
        }
        Ok(Some(Color {
            r: tokens[0].trim().parse()?,
            g: tokens[1].trim().parse()?,
            b: tokens[2].trim().parse()?,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::super::super::parser::{parse_slice, GameObjectMapping};
    use super::*;

    #[test]
    fn test_color() {
        let object = parse_slice(b"color = { 1 2 3 }").unwrap();
        let color = Color::from_value(object.get_err("color").unwrap()).unwrap();
        assert_eq!(color, Some(Color::new(1, 2, 3)));
    }

    #[test]
    fn test_wrong_count() {
        let object = parse_slice(b"color = { 1 2 }").unwrap();
        let color = Color::from_value(object.get_err("color").unwrap()).unwrap();
        assert_eq!(color, None);
    }

    #[test]
    fn test_out_of_range() {
        let object = parse_slice(b"color = { 1 2 300 }").unwrap();
        assert!(Color::from_value(object.get_err("color").unwrap()).is_err());
        let object = parse_slice(b"color = { 1 two 3 }").unwrap();
        assert!(Color::from_value(object.get_err("color").unwrap()).is_err());
    }
}
