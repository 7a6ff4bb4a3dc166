//! Vendor command encoding for the G203's lighting and DPI protocol.
//!
//! The mouse takes two report sizes:
//! - Short reports: 7 bytes (report ID 0x10), sent to wValue 0x0210
//! - Long reports: 20 bytes (report ID 0x11), sent to wValue 0x0211
//!
//! Lighting commands share a fixed frame: a 5-byte prefix, a mode byte,
//! 8 data bytes, and a 6-byte zero suffix. Protocol knowledge comes from
//! USB captures of the vendor software; it is not publicly documented.

use crate::fields::{BlinkRate, Brightness, Color, Dpi, IntroToggle};

/// Short report length (7 bytes, wValue 0x0210).
pub const SHORT_REPORT_LEN: usize = 7;
/// Long report length (20 bytes, wValue 0x0211).
pub const LONG_REPORT_LEN: usize = 20;

/// wValue for short output reports.
pub const W_VALUE_SHORT: u16 = 0x0210;
/// wValue for long output reports.
pub const W_VALUE_LONG: u16 = 0x0211;

/// Frame prefix shared by all lighting-effect commands.
const LED_PREFIX: [u8; 5] = [0x11, 0xFF, 0x0E, 0x3B, 0x00];
/// Zero suffix closing every lighting-effect frame.
const LED_SUFFIX: [u8; 6] = [0x00; 6];

/// Frame head of the intro-effect command.
const INTRO_PREFIX: [u8; 6] = [0x11, 0xFF, 0x0E, 0x5B, 0x00, 0x01];

/// Frame head of the DPI command.
const DPI_PREFIX: [u8; 5] = [0x10, 0xFF, 0x0A, 0x3B, 0x00];

/// Report that bypasses the mouse's onboard lighting memory.
const BYPASS_ONBOARD_MEMORY: [u8; SHORT_REPORT_LEN] = [0x10, 0xFF, 0x0E, 0x5B, 0x01, 0x03, 0x05];

/// Head of the "triple" per-zone effect family. Commands in this family
/// need a follow-up apply report before they take effect.
const TRIPLE_PREFIX: [u8; 4] = [0x11, 0xFF, 0x12, 0x1B];

/// Apply report for the triple effect family.
const APPLY_TRIPLE: [u8; 5] = [0x11, 0xFF, 0x12, 0x7B, 0x00];

/// Lighting mode bytes.
mod mode {
    pub const SOLID: u8 = 0x01;
    pub const CYCLE: u8 = 0x02;
    pub const BREATHE: u8 = 0x03;
}

/// An encoded vendor command, ready to be written as a single report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    payload: Vec<u8>,
}

impl Command {
    /// Static single-color lighting.
    pub fn solid(color: Color) -> Self {
        let [r, g, b] = color.rgb();
        Self::led_frame(mode::SOLID, [r, g, b, 0x00, 0x00, 0x00, 0x00, 0x00])
    }

    /// Rotate through the full color wheel.
    pub fn cycle(rate: BlinkRate, brightness: Brightness) -> Self {
        let [rate_hi, rate_lo] = rate.to_be_bytes();
        Self::led_frame(
            mode::CYCLE,
            [
                0x00,
                0x00,
                0x00,
                0x00,
                0x00,
                rate_hi,
                rate_lo,
                brightness.percent(),
            ],
        )
    }

    /// Pulse a single color.
    pub fn breathe(color: Color, rate: BlinkRate, brightness: Brightness) -> Self {
        let [r, g, b] = color.rgb();
        let [rate_hi, rate_lo] = rate.to_be_bytes();
        Self::led_frame(
            mode::BREATHE,
            [r, g, b, rate_hi, rate_lo, 0x00, brightness.percent(), 0x00],
        )
    }

    /// Enable or disable the power-on intro effect.
    pub fn intro(toggle: IntroToggle) -> Self {
        let mut payload = Vec::with_capacity(LONG_REPORT_LEN);
        payload.extend_from_slice(&INTRO_PREFIX);
        payload.push(toggle.wire_byte());
        payload.resize(LONG_REPORT_LEN, 0x00);
        Self { payload }
    }

    /// Set the sensor resolution.
    pub fn dpi(dpi: Dpi) -> Self {
        let mut payload = Vec::with_capacity(SHORT_REPORT_LEN);
        payload.extend_from_slice(&DPI_PREFIX);
        payload.extend_from_slice(&dpi.to_be_bytes());
        Self { payload }
    }

    /// Tell the mouse to take effect commands from the host instead of its
    /// onboard memory. Sent ahead of commands that request the bypass.
    pub fn bypass_onboard_memory() -> Self {
        Self {
            payload: BYPASS_ONBOARD_MEMORY.to_vec(),
        }
    }

    /// Follow-up report committing a pending triple-family effect.
    pub fn apply_triple() -> Self {
        let mut payload = Vec::with_capacity(LONG_REPORT_LEN);
        payload.extend_from_slice(&APPLY_TRIPLE);
        payload.resize(LONG_REPORT_LEN, 0x00);
        Self { payload }
    }

    /// Build a command from raw payload bytes, for protocol families the
    /// public constructors do not cover.
    #[cfg(test)]
    pub(crate) fn from_payload(payload: Vec<u8>) -> Self {
        Self { payload }
    }

    fn led_frame(mode: u8, data: [u8; 8]) -> Self {
        let mut payload = Vec::with_capacity(LONG_REPORT_LEN);
        payload.extend_from_slice(&LED_PREFIX);
        payload.push(mode);
        payload.extend_from_slice(&data);
        payload.extend_from_slice(&LED_SUFFIX);
        Self { payload }
    }

    /// Raw report bytes.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// wValue for the control transfer: short reports go to 0x0210,
    /// everything else to 0x0211.
    pub fn w_value(&self) -> u16 {
        if self.payload.len() == SHORT_REPORT_LEN {
            W_VALUE_SHORT
        } else {
            W_VALUE_LONG
        }
    }

    /// Whether this command belongs to the triple effect family and needs
    /// the apply follow-up after the acknowledgement.
    pub fn needs_apply(&self) -> bool {
        self.payload.starts_with(&TRIPLE_PREFIX)
    }

    /// Lowercase hex rendering, for logs and tests.
    pub fn to_hex(&self) -> String {
        self.payload.iter().map(|b| format!("{b:02x}")).collect()
    }
}
