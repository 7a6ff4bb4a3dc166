//! Error types for g203-led-core.

use thiserror::Error;

/// Core library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// USB transport failure (control transfer, interrupt read, claim, ...).
    #[error("USB error: {0}")]
    Usb(#[from] rusb::Error),

    /// Target device not present on the bus.
    #[error("device {vid:04x}:{pid:04x} not found")]
    DeviceNotFound { vid: u16, pid: u16 },

    /// Color token is not six hex digits.
    #[error("invalid color {value:?} (expected six hex digits, e.g. 88ffcc)")]
    InvalidColor { value: String },

    /// Numeric token did not parse as an integer.
    #[error("invalid {field}: {value:?} is not a whole number")]
    InvalidInteger {
        field: &'static str,
        value: String,
    },

    /// Intro toggle token was neither on/1 nor off/0.
    #[error("invalid intro toggle {value:?} (expected on, off, 1 or 0)")]
    InvalidToggle { value: String },
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, Error>;
