//! Background color used when compositing translucent pixels.

use core::fmt;
use core::str::FromStr;

use alloc::string::ToString;
use rgb::RGB8;

use crate::error::PackError;

/// Opaque color that translucent pixels are blended onto.
///
/// Only consulted for `ARGB` formats; defaults to white.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Background(pub RGB8);

impl Background {
    pub const WHITE: Background = Background::new(255, 255, 255);
    pub const BLACK: Background = Background::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self(RGB8 { r, g, b })
    }

    pub const fn rgb(self) -> RGB8 {
        self.0
    }
}

impl Default for Background {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<RGB8> for Background {
    fn from(c: RGB8) -> Self {
        Self(c)
    }
}

impl fmt::Display for Background {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0.r, self.0.g, self.0.b)
    }
}

const NAMED: [(&str, Background); 10] = [
    ("white", Background::new(255, 255, 255)),
    ("black", Background::new(0, 0, 0)),
    ("red", Background::new(255, 0, 0)),
    ("lime", Background::new(0, 255, 0)),
    ("green", Background::new(0, 128, 0)),
    ("blue", Background::new(0, 0, 255)),
    ("yellow", Background::new(255, 255, 0)),
    ("cyan", Background::new(0, 255, 255)),
    ("magenta", Background::new(255, 0, 255)),
    ("gray", Background::new(128, 128, 128)),
];

impl FromStr for Background {
    type Err = PackError;

    /// Parse `#RGB`, `#RRGGBB`, `#AARRGGBB` (alpha ignored), `#RRRGGGBBB`
    /// or `#RRRRGGGGBBBB` (high 8 bits kept), the same without `#`, a
    /// decimal `r,g,b` triple, or a basic color name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || PackError::InvalidBackgroundColor(s.to_string());

        if let Some((_, bg)) = NAMED.iter().find(|(n, _)| n.eq_ignore_ascii_case(s)) {
            return Ok(*bg);
        }
        if s.eq_ignore_ascii_case("grey") {
            return Ok(Background::new(128, 128, 128));
        }

        if s.contains(',') {
            let mut parts = s.split(',').map(|p| p.trim().parse::<u8>());
            return match (parts.next(), parts.next(), parts.next(), parts.next()) {
                (Some(Ok(r)), Some(Ok(g)), Some(Ok(b)), None) => Ok(Background::new(r, g, b)),
                _ => Err(invalid()),
            };
        }

        let hex = s.strip_prefix('#').unwrap_or(s);
        if !hex.bytes().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        // Channel `i` of `digits` hex digits each, starting at `skip`.
        let channel = |skip: usize, digits: usize, i: usize| -> Result<u8, PackError> {
            let start = skip + i * digits;
            let v = u16::from_str_radix(&hex[start..start + digits], 16).map_err(|_| invalid())?;
            Ok(match digits {
                1 => (v * 17) as u8,
                _ => (v >> (4 * (digits - 2))) as u8,
            })
        };
        let (skip, digits) = match hex.len() {
            3 => (0, 1),
            6 => (0, 2),
            8 => (2, 2),
            9 => (0, 3),
            12 => (0, 4),
            _ => return Err(invalid()),
        };
        Ok(Background::new(
            channel(skip, digits, 0)?,
            channel(skip, digits, 1)?,
            channel(skip, digits, 2)?,
        ))
    }
}
