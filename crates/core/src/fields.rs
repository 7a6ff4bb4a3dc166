//! Validated command-line field values.
//!
//! Each type parses a raw CLI token, clamps it to the range the mouse
//! accepts, and renders the fixed-width lowercase hex encoding the wire
//! format uses. Parsing failures are errors; out-of-range numeric values are
//! clamped silently.

use crate::error::{Error, Result};
use crate::{DEFAULT_BRIGHTNESS_PCT, DEFAULT_RATE_MS};
use tracing::debug;

/// Blink/cycle rate bounds, in milliseconds.
pub const RATE_MIN_MS: u16 = 1000;
pub const RATE_MAX_MS: u16 = 65535;

/// Brightness bounds, in percent.
pub const BRIGHTNESS_MIN_PCT: u8 = 1;
pub const BRIGHTNESS_MAX_PCT: u8 = 100;

/// Sensor resolution bounds.
pub const DPI_MIN: u16 = 200;
pub const DPI_MAX: u16 = 8000;

/// An RGB color, parsed from a 6-hex-digit token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color([u8; 3]);

impl Color {
    /// Parse a color token.
    ///
    /// One leading `#` is stripped; the rest must be exactly six hex digits,
    /// case-insensitive.
    pub fn parse(token: &str) -> Result<Self> {
        let digits = token.strip_prefix('#').unwrap_or(token);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::InvalidColor {
                value: token.to_string(),
            });
        }

        let mut rgb = [0u8; 3];
        for (i, chunk) in rgb.iter_mut().enumerate() {
            *chunk = u8::from_str_radix(&digits[2 * i..2 * i + 2], 16).map_err(|_| {
                Error::InvalidColor {
                    value: token.to_string(),
                }
            })?;
        }
        Ok(Self(rgb))
    }

    /// Red, green, blue bytes.
    pub fn rgb(&self) -> [u8; 3] {
        self.0
    }

    /// Six lowercase hex digits, without a leading `#`.
    pub fn to_hex(&self) -> String {
        format!("{:02x}{:02x}{:02x}", self.0[0], self.0[1], self.0[2])
    }
}

/// Effect rate in milliseconds, clamped to [1000, 65535].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlinkRate(u16);

impl BlinkRate {
    /// Parse a rate token; an absent token means the compiled-in default.
    pub fn parse(token: Option<&str>) -> Result<Self> {
        match token {
            None => Ok(Self(DEFAULT_RATE_MS)),
            Some(raw) => Ok(Self(parse_clamped(
                "rate",
                raw,
                RATE_MIN_MS as i64,
                RATE_MAX_MS as i64,
            )? as u16)),
        }
    }

    pub fn as_millis(&self) -> u16 {
        self.0
    }

    /// Big-endian wire bytes.
    pub fn to_be_bytes(&self) -> [u8; 2] {
        self.0.to_be_bytes()
    }

    /// Four lowercase hex digits.
    pub fn to_hex(&self) -> String {
        format!("{:04x}", self.0)
    }
}

/// Effect brightness in percent, clamped to [1, 100].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Brightness(u8);

impl Brightness {
    /// Parse a brightness token; an absent token means the compiled-in default.
    pub fn parse(token: Option<&str>) -> Result<Self> {
        match token {
            None => Ok(Self(DEFAULT_BRIGHTNESS_PCT)),
            Some(raw) => Ok(Self(parse_clamped(
                "brightness",
                raw,
                BRIGHTNESS_MIN_PCT as i64,
                BRIGHTNESS_MAX_PCT as i64,
            )? as u8)),
        }
    }

    pub fn percent(&self) -> u8 {
        self.0
    }

    /// Two lowercase hex digits.
    pub fn to_hex(&self) -> String {
        format!("{:02x}", self.0)
    }
}

/// Sensor resolution, clamped to [200, 8000].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dpi(u16);

impl Dpi {
    /// Parse a DPI token. Unlike rate and brightness there is no default.
    pub fn parse(token: &str) -> Result<Self> {
        Ok(Self(parse_clamped(
            "DPI",
            token,
            DPI_MIN as i64,
            DPI_MAX as i64,
        )? as u16))
    }

    pub fn value(&self) -> u16 {
        self.0
    }

    /// Big-endian wire bytes.
    pub fn to_be_bytes(&self) -> [u8; 2] {
        self.0.to_be_bytes()
    }

    /// Four lowercase hex digits.
    pub fn to_hex(&self) -> String {
        format!("{:04x}", self.0)
    }
}

/// Power-on intro effect switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntroToggle {
    On,
    Off,
}

impl IntroToggle {
    /// Parse an intro token: `on`/`1` enable, `off`/`0` disable.
    pub fn parse(token: &str) -> Result<Self> {
        match token {
            "on" | "1" => Ok(Self::On),
            "off" | "0" => Ok(Self::Off),
            other => Err(Error::InvalidToggle {
                value: other.to_string(),
            }),
        }
    }

    /// Wire byte: the device encodes enable as 0x01 and disable as 0x02.
    pub fn wire_byte(&self) -> u8 {
        match self {
            Self::On => 0x01,
            Self::Off => 0x02,
        }
    }
}

/// Parse an integer token and clamp it into [min, max].
fn parse_clamped(field: &'static str, raw: &str, min: i64, max: i64) -> Result<i64> {
    let value: i64 = raw.trim().parse().map_err(|_| Error::InvalidInteger {
        field,
        value: raw.to_string(),
    })?;

    let clamped = value.clamp(min, max);
    if clamped != value {
        debug!(field, value, clamped, "clamped out-of-range value");
    }
    Ok(clamped)
}
