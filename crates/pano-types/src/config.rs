//! Engine configuration for viewport interaction.
//!
//! Loaded from TOML by the embedding application and handed to the UI
//! context. All fields have conservative defaults.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Tunables for drag, inertia, and snapping behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct UiConfig {
    /// Distance in pixels a pressed pointer must travel before the press
    /// becomes a drag.
    pub drag_radius: f32,
    /// Scale from release velocity to inertial travel distance. Zero
    /// disables inertial scrolling.
    pub inertia_amplitude: f32,
    /// Time constant of the inertial deceleration, in seconds.
    pub inertia_time_constant: f32,
    /// Logical screen width in pixels, used to derive snap-animation speed.
    pub screen_width: u32,
    /// Logical screen height in pixels.
    pub screen_height: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            drag_radius: 10.0,
            inertia_amplitude: 20.0,
            inertia_time_constant: 0.325,
            screen_width: 480,
            screen_height: 272,
        }
    }
}

impl UiConfig {
    /// Parse a config from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}
