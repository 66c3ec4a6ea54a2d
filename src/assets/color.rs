use crate::foundation::error::{CardError, CardResult};
use crate::foundation::math::percent_to_u8;

/// Straight-alpha color token: an RGB triple plus a 0..=100 opacity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Opacity percentage, `100` is fully opaque.
    pub alpha: u8,
}

impl Color {
    /// Opaque color from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r,
            g,
            b,
            alpha: 100,
        }
    }

    /// Fully transparent black.
    pub const fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            alpha: 0,
        }
    }

    /// Parse a hex (`#RGB`, `RGB`, `#RRGGBB`, `RRGGBB`) or named color with an opacity in
    /// percent. Alpha values above 100 are clamped.
    pub fn parse(token: &str, alpha: u8) -> CardResult<Self> {
        let s = token.trim();
        let rgb = match named(s) {
            Some(rgb) => rgb,
            None => parse_hex(s)?,
        };
        Ok(Self {
            r: rgb[0],
            g: rgb[1],
            b: rgb[2],
            alpha: alpha.min(100),
        })
    }

    /// Same color with a different opacity.
    pub fn with_alpha(self, alpha: u8) -> Self {
        Self {
            alpha: alpha.min(100),
            ..self
        }
    }

    /// Straight-alpha RGBA8 channels.
    pub fn to_rgba8(self) -> [u8; 4] {
        [self.r, self.g, self.b, percent_to_u8(self.alpha)]
    }
}

fn parse_hex(s: &str) -> CardResult<[u8; 3]> {
    let s = s.strip_prefix('#').unwrap_or(s);

    fn hex_byte(pair: &str) -> CardResult<u8> {
        u8::from_str_radix(pair, 16)
            .map_err(|_| CardError::configuration(format!("invalid hex byte \"{pair}\"")))
    }

    if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(CardError::configuration(format!("invalid color \"{s}\"")));
    }

    match s.len() {
        3 => {
            let mut out = [0u8; 3];
            for (i, c) in s.chars().enumerate() {
                let v = hex_byte(&c.to_string())?;
                out[i] = v * 17;
            }
            Ok(out)
        }
        6 => Ok([
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
        ]),
        _ => Err(CardError::configuration(format!(
            "color \"{s}\" must be a name, #RGB or #RRGGBB"
        ))),
    }
}

fn named(s: &str) -> Option<[u8; 3]> {
    let rgb = match s.to_ascii_lowercase().as_str() {
        "black" => [0, 0, 0],
        "white" => [255, 255, 255],
        "red" => [255, 0, 0],
        "lime" => [0, 255, 0],
        "green" => [0, 128, 0],
        "blue" => [0, 0, 255],
        "yellow" => [255, 255, 0],
        "cyan" | "aqua" => [0, 255, 255],
        "magenta" | "fuchsia" => [255, 0, 255],
        "gray" | "grey" => [128, 128, 128],
        "silver" => [192, 192, 192],
        "maroon" => [128, 0, 0],
        "olive" => [128, 128, 0],
        "purple" => [128, 0, 128],
        "teal" => [0, 128, 128],
        "navy" => [0, 0, 128],
        "orange" => [255, 165, 0],
        _ => return None,
    };
    Some(rgb)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/color.rs"]
mod tests;
