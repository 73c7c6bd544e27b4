//! sRGB colour parsing for the material colour parameter.

use crate::error::{Result, SceneError};
use std::fmt;
use std::str::FromStr;

/// An 8-bit-per-channel sRGB colour as edited in the colour panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or the short `#rgb` form. The leading `#` is optional.
    pub fn parse_hex(s: &str) -> Result<Self> {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bad = || SceneError::InvalidColor(s.to_string());
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(bad());
        }
        match hex.len() {
            6 => {
                let v = u32::from_str_radix(hex, 16).map_err(|_| bad())?;
                Ok(Self::new((v >> 16) as u8, (v >> 8) as u8, v as u8))
            }
            3 => {
                let v = u32::from_str_radix(hex, 16).map_err(|_| bad())?;
                let expand = |n: u32| (n * 0x11) as u8;
                Ok(Self::new(
                    expand((v >> 8) & 0xf),
                    expand((v >> 4) & 0xf),
                    expand(v & 0xf),
                ))
            }
            _ => Err(bad()),
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Linear-light RGB in [0, 1], suitable for shader uniforms.
    pub fn to_linear(self) -> [f32; 3] {
        [
            srgb_to_linear(self.r),
            srgb_to_linear(self.g),
            srgb_to_linear(self.b),
        ]
    }
}

impl FromStr for Rgb {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_hex(s)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[inline]
fn srgb_to_linear(c: u8) -> f32 {
    let c = c as f32 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_forms() {
        assert_eq!(Rgb::parse_hex("#ffeded").unwrap(), Rgb::new(0xff, 0xed, 0xed));
        assert_eq!(Rgb::parse_hex("0a0B0c").unwrap(), Rgb::new(0x0a, 0x0b, 0x0c));
        assert_eq!(Rgb::parse_hex("#f0a").unwrap(), Rgb::new(0xff, 0x00, 0xaa));
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(Rgb::parse_hex("").is_err());
        assert!(Rgb::parse_hex("#ff").is_err());
        assert!(Rgb::parse_hex("#gggggg").is_err());
        assert!(Rgb::parse_hex("#+fffff").is_err());
    }

    #[test]
    fn hex_output_is_lowercase_and_padded() {
        assert_eq!(Rgb::new(1, 2, 255).to_hex(), "#0102ff");
        assert_eq!(Rgb::new(1, 2, 255).to_string(), "#0102ff");
    }

    #[test]
    fn linear_conversion_hits_endpoints() {
        let black = Rgb::new(0, 0, 0).to_linear();
        let white = Rgb::WHITE.to_linear();
        assert_eq!(black, [0.0, 0.0, 0.0]);
        for c in white {
            assert!((c - 1.0).abs() < 1e-6);
        }
        let mid = Rgb::new(128, 128, 128).to_linear()[0];
        assert!(mid > 0.2 && mid < 0.23);
    }
}
