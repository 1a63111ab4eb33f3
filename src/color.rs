//! Colors and canvas color strings.
//!
//! Particles carry an [`Rgb`] triple. At draw time it is combined with the
//! resolved opacity into an [`Rgba`] and handed to the surface as a CSS-style
//! `rgba(...)` string.
//!
//! Configured colors are strings: a hex value (`"#ff0000"`, `"#f00"`), a basic
//! CSS color name (`"white"`), or the sentinel [`RANDOM`].

use rand::Rng;
use std::fmt;

/// Configuration value that asks for a fresh random color on every use.
pub const RANDOM: &str = "random";

/// Basic CSS color names understood by [`Rgb::parse`].
const NAMED: &[(&str, Rgb)] = &[
    ("black", Rgb::new(0, 0, 0)),
    ("white", Rgb::new(255, 255, 255)),
    ("red", Rgb::new(255, 0, 0)),
    ("lime", Rgb::new(0, 255, 0)),
    ("green", Rgb::new(0, 128, 0)),
    ("blue", Rgb::new(0, 0, 255)),
    ("yellow", Rgb::new(255, 255, 0)),
    ("cyan", Rgb::new(0, 255, 255)),
    ("aqua", Rgb::new(0, 255, 255)),
    ("magenta", Rgb::new(255, 0, 255)),
    ("fuchsia", Rgb::new(255, 0, 255)),
    ("gray", Rgb::new(128, 128, 128)),
    ("grey", Rgb::new(128, 128, 128)),
    ("silver", Rgb::new(192, 192, 192)),
    ("maroon", Rgb::new(128, 0, 0)),
    ("olive", Rgb::new(128, 128, 0)),
    ("purple", Rgb::new(128, 0, 128)),
    ("teal", Rgb::new(0, 128, 128)),
    ("navy", Rgb::new(0, 0, 128)),
    ("orange", Rgb::new(255, 165, 0)),
];

/// An 8-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a color from its components.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or the shorthand `#rgb`. The leading `#` is optional.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match digits.len() {
            3 => {
                // #abc is #aabbcc
                let mut expanded = [0u8; 3];
                for (slot, c) in expanded.iter_mut().zip(digits.chars()) {
                    let v = c.to_digit(16)? as u8;
                    *slot = v * 16 + v;
                }
                Some(Self::new(expanded[0], expanded[1], expanded[2]))
            }
            6 => Some(Self::new(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            _ => None,
        }
    }

    /// Look up a basic CSS color name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        NAMED
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, c)| *c)
    }

    /// Parse a configured color: hex first, then a color name.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.starts_with('#') {
            Self::from_hex(value)
        } else {
            Self::from_name(value).or_else(|| Self::from_hex(value))
        }
    }

    /// Sample a random color. Each channel is uniform in `0..255`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(rng.gen_range(0..255), rng.gen_range(0..255), rng.gen_range(0..255))
    }

    /// Attach an alpha value.
    pub fn with_alpha(self, a: f64) -> Rgba {
        Rgba { rgb: self, a }
    }
}

/// An RGB triple with a floating-point alpha, as consumed by canvas styles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub rgb: Rgb,
    pub a: f64,
}

impl Rgba {
    /// `rgba(r,g,b,a)` without spaces, the form used for grab lines.
    pub fn to_css_compact(&self) -> String {
        format!("rgba({},{},{},{})", self.rgb.r, self.rgb.g, self.rgb.b, self.a)
    }
}

/// Formats as `rgba(r, g, b, a)`.
impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.rgb.r, self.rgb.g, self.rgb.b, self.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_hex_long_and_short() {
        assert_eq!(Rgb::from_hex("#ff8000"), Some(Rgb::new(255, 128, 0)));
        assert_eq!(Rgb::from_hex("#f80"), Some(Rgb::new(255, 136, 0)));
        assert_eq!(Rgb::from_hex("00ff00"), Some(Rgb::new(0, 255, 0)));
    }

    #[test]
    fn test_hex_rejects_garbage() {
        assert_eq!(Rgb::from_hex("#ff80"), None);
        assert_eq!(Rgb::from_hex("#gggggg"), None);
        assert_eq!(Rgb::from_hex(""), None);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(Rgb::parse("White"), Some(Rgb::new(255, 255, 255)));
        assert_eq!(Rgb::parse(" #000 "), Some(Rgb::new(0, 0, 0)));
        assert_eq!(Rgb::parse(RANDOM), None);
    }

    #[test]
    fn test_rgba_strings() {
        let c = Rgb::new(10, 20, 30).with_alpha(0.5);
        assert_eq!(c.to_string(), "rgba(10, 20, 30, 0.5)");
        assert_eq!(c.to_css_compact(), "rgba(10,20,30,0.5)");

        let opaque = Rgb::new(1, 2, 3).with_alpha(1.0);
        assert_eq!(opaque.to_string(), "rgba(1, 2, 3, 1)");
    }

    #[test]
    fn test_random_is_seedable() {
        let a = Rgb::random(&mut StdRng::seed_from_u64(7));
        let b = Rgb::random(&mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }
}
