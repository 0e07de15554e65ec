//! Resolved style inputs consumed by the viewport core.
//!
//! The box-model/property system lives outside this core; by the time a
//! viewport renders, style has been resolved to plain numbers and flags.

use serde::{Deserialize, Serialize};

/// Numeric style inputs for a viewport or grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    /// Minimum visible width/height.
    pub xminimum: f32,
    pub yminimum: f32,
    /// When set, the visible extent is forced to the configured size even
    /// if the content is smaller.
    pub xfill: bool,
    pub yfill: bool,
    /// Inter-cell spacing (grids).
    pub xspacing: f32,
    pub yspacing: f32,
    /// Outer margins (grids).
    pub left_margin: f32,
    pub right_margin: f32,
    pub top_margin: f32,
    pub bottom_margin: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            xminimum: 0.0,
            yminimum: 0.0,
            xfill: false,
            yfill: false,
            xspacing: 0.0,
            yspacing: 0.0,
            left_margin: 0.0,
            right_margin: 0.0,
            top_margin: 0.0,
            bottom_margin: 0.0,
        }
    }
}
