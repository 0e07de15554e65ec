//! pano-ui: the PANO viewport core.
//!
//! A [`Viewport`] pans one child element larger than its visible window;
//! a [`GridViewport`] lays out N children in a grid over the same
//! scrolling machinery. Scroll position per axis lives in an
//! [`Adjustment`], and all interaction (drag with inertia, mouse wheel,
//! arrow/page keys, edge-scroll) runs through the shared [`Scroller`].
//!
//! Everything is single-threaded and frame-driven: render and event
//! dispatch happen once per UI tick through a [`Ui`] context.

pub mod adjustment;
pub mod canvas;
pub mod context;
pub mod focus;
pub mod grid;
pub mod scroller;
pub mod state;
pub mod style;
pub mod viewport;

#[cfg(test)]
pub(crate) mod test_utils;

pub use adjustment::{Adjustment, ForceStep, SharedAdjustment};
pub use canvas::{Canvas, Element, Null};
pub use context::{RedrawQueue, Ui};
pub use focus::FocusContext;
pub use grid::{GridConfig, GridViewport};
pub use scroller::{EdgeScroll, Mousewheel, Scroller, Target};
pub use state::{SCROLLER_STATE_VERSION, ScrollerState};
pub use style::Style;
pub use viewport::{Viewport, ViewportConfig};
