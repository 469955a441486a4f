//! Cell color values.

use crate::error::CanvasError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Color of a single grid cell (RGBA8).
///
/// `CellColor::EMPTY` is the fully transparent sentinel: new layers are
/// filled with it, erasing writes it, and it is never painted on refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CellColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl CellColor {
    /// Transparent sentinel.
    pub const EMPTY: CellColor = CellColor::new(0, 0, 0, 0);
    /// Preview color for the bucket cursor and the selection marquee.
    pub const INDICATOR: CellColor = CellColor::new(125, 125, 125, 128);
    /// Preview color for the eraser cursor.
    pub const ERASER_INDICATOR: CellColor = CellColor::new(255, 255, 255, 128);

    pub const BLACK: CellColor = CellColor::rgb(0, 0, 0);
    pub const WHITE: CellColor = CellColor::rgb(255, 255, 255);
    pub const RED: CellColor = CellColor::rgb(255, 0, 0);
    pub const GREEN: CellColor = CellColor::rgb(0, 255, 0);
    pub const BLUE: CellColor = CellColor::rgb(0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Whether this is the `EMPTY` sentinel.
    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }

    /// Format as `#rrggbbaa` (or `#rrggbb` when opaque).
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl fmt::Display for CellColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("transparent")
        } else {
            f.write_str(&self.to_hex())
        }
    }
}

impl FromStr for CellColor {
    type Err = CanvasError;

    /// Parse `transparent`, `#rgb`, `#rrggbb` or `#rrggbbaa`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("transparent") {
            return Ok(Self::EMPTY);
        }

        let invalid = || CanvasError::InvalidColor(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if !hex.is_ascii() {
            return Err(invalid());
        }
        let byte = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
        };

        match hex.len() {
            3 => {
                // #rgb -> #rrggbb
                let r = byte(0..1)? * 17;
                let g = byte(1..2)? * 17;
                let b = byte(2..3)? * 17;
                Ok(Self::rgb(r, g, b))
            }
            6 => Ok(Self::rgb(byte(0..2)?, byte(2..4)?, byte(4..6)?)),
            8 => Ok(Self::new(byte(0..2)?, byte(2..4)?, byte(4..6)?, byte(6..8)?)),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for CellColor {
    type Error = CanvasError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CellColor> for String {
    fn from(color: CellColor) -> Self {
        color.to_string()
    }
}
