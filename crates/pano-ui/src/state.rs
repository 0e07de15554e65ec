//! Versioned persistence for scroll state.
//!
//! A [`ScrollerState`] captures everything needed to restore a scroller
//! across a save/load or a process restart: axis values and ranges plus any
//! drag in progress. The version field guards against loading state written
//! by an incompatible build.

use pano_types::error::{PanoError, Result};
use serde::{Deserialize, Serialize};

use crate::scroller::Scroller;

/// Current serialization version of [`ScrollerState`].
pub const SCROLLER_STATE_VERSION: u32 = 1;

/// Serializable snapshot of a scroller's interactive state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollerState {
    pub version: u32,
    pub xvalue: f32,
    pub xrange: f32,
    pub yvalue: f32,
    pub yrange: f32,
    pub drag_position: Option<(i32, i32)>,
    pub drag_position_time: Option<f64>,
    pub drag_speed: (f32, f32),
}

impl Scroller {
    /// Snapshot the scroll and drag state.
    pub fn save_state(&self) -> ScrollerState {
        let xadj = self.xadjustment.borrow();
        let yadj = self.yadjustment.borrow();
        ScrollerState {
            version: SCROLLER_STATE_VERSION,
            xvalue: xadj.value(),
            xrange: xadj.range(),
            yvalue: yadj.value(),
            yrange: yadj.range(),
            drag_position: self.drag_position(),
            drag_position_time: self.drag_position_time(),
            drag_speed: self.drag_speed(),
        }
    }

    /// Restore a snapshot. States written by unknown versions are rejected;
    /// values are re-clamped against the restored ranges, and the next
    /// render recomputes range/page from actual content anyway.
    pub fn restore_state(&mut self, state: &ScrollerState) -> Result<()> {
        if state.version != SCROLLER_STATE_VERSION {
            return Err(PanoError::State(format!(
                "unknown scroller state version {}",
                state.version
            )));
        }

        {
            let mut xadj = self.xadjustment.borrow_mut();
            xadj.set_range(state.xrange);
            xadj.set_value(state.xvalue);
        }
        {
            let mut yadj = self.yadjustment.borrow_mut();
            yadj.set_range(state.yrange);
            yadj.set_value(state.yvalue);
        }
        self.set_drag_state(state.drag_position, state.drag_position_time, state.drag_speed);
        Ok(())
    }
}
