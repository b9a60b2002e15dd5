//! Device class and speed presets
//!
//! The only runtime configuration of a match: which of two speed presets to
//! play with. Chosen once when the match state is built.

use serde::{Deserialize, Serialize};

use crate::consts::MOBILE_MAX_WIDTH;

/// Kind of device the game runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DeviceClass {
    #[default]
    Desktop,
    Mobile,
}

impl DeviceClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceClass::Desktop => "desktop",
            DeviceClass::Mobile => "mobile",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "desktop" | "pc" => Some(DeviceClass::Desktop),
            "mobile" | "touch" => Some(DeviceClass::Mobile),
            _ => None,
        }
    }

    /// Classify by viewport width (matches a `(max-width: 600px)` media query)
    pub fn from_viewport_width(width: f32) -> Self {
        if width <= MOBILE_MAX_WIDTH {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        }
    }

    /// Speed preset for this device class
    pub fn preset(&self) -> SpeedPreset {
        match self {
            DeviceClass::Desktop => SpeedPreset::DESKTOP,
            DeviceClass::Mobile => SpeedPreset::MOBILE,
        }
    }
}

/// Starting speeds for a match
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedPreset {
    /// Vertical ball speed at match start (negative = toward the player)
    pub initial_vertical_speed: f32,
    /// Pixels per tick the AI paddle moves
    pub ai_speed: f32,
}

impl SpeedPreset {
    pub const DESKTOP: SpeedPreset = SpeedPreset {
        initial_vertical_speed: -1.0,
        ai_speed: 3.0,
    };

    pub const MOBILE: SpeedPreset = SpeedPreset {
        initial_vertical_speed: -2.0,
        ai_speed: 4.0,
    };
}

impl Default for SpeedPreset {
    fn default() -> Self {
        Self::DESKTOP
    }
}
