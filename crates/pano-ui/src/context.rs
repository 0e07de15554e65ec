//! Per-frame UI context.
//!
//! Render and event calls receive a [`Ui`] carrying the focus/grab state,
//! the redraw queue, the interaction config, and the input-to-action map.
//! Passing it explicitly keeps the core free of global state.

use pano_types::config::UiConfig;
use pano_types::input::{InputMap, WidgetId};

use crate::focus::FocusContext;

/// A coalesced redraw demand: "re-render `widget` at or before `at`".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RedrawRequest {
    pub widget: WidgetId,
    /// Interaction time offset in seconds; `0.0` means next frame.
    pub at: f64,
}

/// Monotonic redraw demand signal. Requests are only ever added; the
/// rendering driver coalesces and drains them once per tick. Over-triggering
/// is benign, a missed trigger is a correctness bug.
#[derive(Debug, Default)]
pub struct RedrawQueue {
    requests: Vec<RedrawRequest>,
}

impl RedrawQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a redraw of `widget` at or before time offset `at`.
    pub fn request(&mut self, widget: WidgetId, at: f64) {
        self.requests.push(RedrawRequest { widget, at });
    }

    /// Earliest pending request for `widget`, if any.
    pub fn earliest_for(&self, widget: WidgetId) -> Option<f64> {
        self.requests
            .iter()
            .filter(|r| r.widget == widget)
            .map(|r| r.at)
            .fold(None, |acc, at| Some(acc.map_or(at, |a: f64| a.min(at))))
    }

    /// All pending requests, in arrival order.
    pub fn requests(&self) -> &[RedrawRequest] {
        &self.requests
    }

    /// Drain at the end of a tick.
    pub fn clear(&mut self) {
        self.requests.clear();
    }
}

/// Per-frame context handed to every render and event call.
#[derive(Debug, Default)]
pub struct Ui {
    pub focus: FocusContext,
    pub redraw: RedrawQueue,
    /// True during a measuring pass: adjustments must not be rewritten.
    pub sizing: bool,
    pub config: UiConfig,
    pub input_map: InputMap,
}

impl Ui {
    pub fn new(config: UiConfig, input_map: InputMap) -> Self {
        Self {
            focus: FocusContext::new(),
            redraw: RedrawQueue::new(),
            sizing: false,
            config,
            input_map,
        }
    }
}
