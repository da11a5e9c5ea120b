//! Color parsing for the `%fore` directive.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// An RGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Color {
    /// Solid black.
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };

    /// Solid white.
    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
    };

    /// Channel values as ratios in `0.0..=1.0`.
    pub fn ratios(&self) -> (f32, f32, f32) {
        (
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

/// Parse a MagicPoint color value.
///
/// Accepts the named colors `black` and `white`, 3-digit hex (`#rgb`, each
/// digit duplicated) and 6-digit hex (`#rrggbb`). There is no general
/// named-color table; anything else fails with [`Error::Color`].
pub fn parse_color(value: &str) -> Result<Color> {
    match value {
        "black" => Ok(Color::BLACK),
        "white" => Ok(Color::WHITE),
        _ => match value.strip_prefix('#') {
            // length checks count bytes, so non-ASCII input must fail
            // before any fixed-offset slicing
            Some(hex) if !hex.is_ascii() => Err(Error::Color(value.to_string())),
            Some(hex) if hex.len() == 3 => {
                let mut channels = [0u8; 3];
                for (slot, digit) in channels.iter_mut().zip(hex.chars()) {
                    let nibble = digit
                        .to_digit(16)
                        .ok_or_else(|| Error::Color(value.to_string()))?
                        as u8;
                    *slot = nibble * 16 + nibble;
                }
                Ok(Color {
                    r: channels[0],
                    g: channels[1],
                    b: channels[2],
                })
            }
            Some(hex) if hex.len() == 6 => {
                let parse_pair = |s: &str| {
                    u8::from_str_radix(s, 16).map_err(|_| Error::Color(value.to_string()))
                };
                Ok(Color {
                    r: parse_pair(&hex[0..2])?,
                    g: parse_pair(&hex[2..4])?,
                    b: parse_pair(&hex[4..6])?,
                })
            }
            _ => Err(Error::Color(value.to_string())),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_colors() {
        assert_eq!(parse_color("black").unwrap(), Color { r: 0, g: 0, b: 0 });
        assert_eq!(
            parse_color("white").unwrap(),
            Color {
                r: 255,
                g: 255,
                b: 255
            }
        );
    }

    #[test]
    fn test_short_hex_expands_digits() {
        // #c96 expands to #cc9966
        assert_eq!(parse_color("#c96").unwrap(), parse_color("#cc9966").unwrap());
    }

    #[test]
    fn test_long_hex() {
        let color = parse_color("#3366cc").unwrap();
        assert_eq!(color, Color { r: 0x33, g: 0x66, b: 0xcc });
        let (r, g, b) = color.ratios();
        assert!((r - 0x33 as f32 / 255.0).abs() < f32::EPSILON);
        assert!((g - 0x66 as f32 / 255.0).abs() < f32::EPSILON);
        assert!((b - 0xcc as f32 / 255.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_unknown_name_fails() {
        assert!(matches!(parse_color("fuchsia"), Err(Error::Color(_))));
    }

    #[test]
    fn test_malformed_hex_fails() {
        assert!(parse_color("#12345").is_err());
        assert!(parse_color("#xyz").is_err());
        assert!(parse_color("#").is_err());
    }

    #[test]
    fn test_multibyte_hex_is_an_error() {
        // two 3-byte chars give a byte length of 6; must not be sliced
        assert!(matches!(parse_color("#ああ"), Err(Error::Color(_))));
        assert!(matches!(parse_color("#あ"), Err(Error::Color(_))));
    }
}
