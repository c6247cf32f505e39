use core::fmt;
use core::str::FromStr;

use alloc::string::ToString;

use crate::error::PackError;

/// Packed framebuffer pixel format.
///
/// Digits give bits per channel, alpha first when present.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// 32-bit `a,r,g,b`.
    #[default]
    Argb8888,
    /// 16-bit: alpha in bit 15, then 5 bits each of blue, green, red.
    Argb1555,
    /// 16-bit: 4 bits each of alpha, blue, green, red.
    Argb4444,
    /// 16-bit container holding the low 16 bits of an 18-bit `r,g,b` value.
    Rgb666,
    /// 16-bit `r5 g6 b5`.
    Rgb565,
    /// 16-bit, top nibble zero, then 4 bits each of red, green, blue.
    Rgb444,
    /// Three bytes `r,g,b`, unaffected by byte order.
    Rgb888,
}

impl PixelFormat {
    /// Every supported format, in the order the tool has always listed them.
    pub const ALL: [PixelFormat; 7] = [
        PixelFormat::Argb8888,
        PixelFormat::Argb1555,
        PixelFormat::Argb4444,
        PixelFormat::Rgb666,
        PixelFormat::Rgb565,
        PixelFormat::Rgb444,
        PixelFormat::Rgb888,
    ];

    /// Bytes written per pixel.
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Argb8888 => 4,
            Self::Argb1555 | Self::Argb4444 => 2,
            Self::Rgb666 | Self::Rgb565 | Self::Rgb444 => 2,
            Self::Rgb888 => 3,
        }
    }

    /// Whether translucent pixels are blended against the background.
    ///
    /// Only the `ARGB` family blends. `RGB` formats drop alpha without
    /// compositing, so a translucent pixel keeps its raw color.
    pub const fn composites(self) -> bool {
        matches!(self, Self::Argb8888 | Self::Argb1555 | Self::Argb4444)
    }

    /// Canonical upper-case name, e.g. `"RGB565"`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Argb8888 => "ARGB8888",
            Self::Argb1555 => "ARGB1555",
            Self::Argb4444 => "ARGB4444",
            Self::Rgb666 => "RGB666",
            Self::Rgb565 => "RGB565",
            Self::Rgb444 => "RGB444",
            Self::Rgb888 => "RGB888",
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PixelFormat {
    type Err = PackError;

    /// Parse a format name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| PackError::UnknownFormat(s.to_string()))
    }
}

/// Byte order of each packed 16- or 32-bit pixel value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    /// Least-significant byte first.
    #[default]
    LittleEndian,
    /// Most-significant byte first.
    BigEndian,
}

impl ByteOrder {
    pub const fn name(self) -> &'static str {
        match self {
            Self::LittleEndian => "little",
            Self::BigEndian => "big",
        }
    }
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ByteOrder {
    type Err = PackError;

    /// Accepts `little`/`le`/`<` and `big`/`be`/`>` (ASCII case ignored),
    /// plus the long `little-endian`/`big-endian` spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        const LITTLE: [&str; 5] = ["little", "le", "<", "little-endian", "littleendian"];
        const BIG: [&str; 5] = ["big", "be", ">", "big-endian", "bigendian"];
        if LITTLE.iter().any(|n| n.eq_ignore_ascii_case(s)) {
            Ok(Self::LittleEndian)
        } else if BIG.iter().any(|n| n.eq_ignore_ascii_case(s)) {
            Ok(Self::BigEndian)
        } else {
            Err(PackError::UnknownByteOrder(s.to_string()))
        }
    }
}
