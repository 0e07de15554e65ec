//! Viewport: a container that pans one child larger than its window.
//!
//! The child renders at its natural (or overridden) size; the viewport
//! synchronizes the axis adjustments with the scrollable range and blits the
//! child at the negated adjustment offsets. All interaction is delegated to
//! the shared [`Scroller`].

use pano_types::input::{EventResult, InputEvent, WidgetId};

use crate::adjustment::SharedAdjustment;
use crate::canvas::{Canvas, Element};
use crate::context::Ui;
use crate::scroller::{EdgeScroll, Mousewheel, Scroller, Target};
use crate::style::Style;

/// Construction-time options shared by [`Viewport`] and
/// [`crate::grid::GridViewport`].
pub struct ViewportConfig {
    pub style: Style,
    pub draggable: bool,
    pub mousewheel: Mousewheel,
    pub arrowkeys: bool,
    pub pagekeys: bool,
    pub edgescroll: Option<EdgeScroll>,
    /// Fixed natural size overrides for the child; `None` asks the child to
    /// size itself to the visible area.
    pub child_size: (Option<f32>, Option<f32>),
    /// One-shot initial scroll targets.
    pub xinitial: Option<Target>,
    pub yinitial: Option<Target>,
    /// Caller-owned adjustments. When supplied, the viewport shares them.
    pub xadjustment: Option<SharedAdjustment>,
    pub yadjustment: Option<SharedAdjustment>,
    /// When false the adjustments are treated as caller-managed and their
    /// range/page are never rewritten.
    pub set_adjustments: bool,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            style: Style::default(),
            draggable: false,
            mousewheel: Mousewheel::None,
            arrowkeys: false,
            pagekeys: false,
            edgescroll: None,
            child_size: (None, None),
            xinitial: None,
            yinitial: None,
            xadjustment: None,
            yadjustment: None,
            set_adjustments: true,
        }
    }
}

impl ViewportConfig {
    /// Build the scroller described by this config.
    pub(crate) fn build_scroller(&mut self) -> Scroller {
        let mut scroller = match (self.xadjustment.take(), self.yadjustment.take()) {
            (Some(x), Some(y)) => Scroller::new(x, y),
            (Some(x), None) => {
                let mut s = Scroller::with_own_adjustments();
                s.xadjustment = x;
                s
            }
            (None, Some(y)) => {
                let mut s = Scroller::with_own_adjustments();
                s.yadjustment = y;
                s
            }
            (None, None) => Scroller::with_own_adjustments(),
        };
        scroller.set_adjustments = self.set_adjustments;
        scroller.style = self.style;
        scroller.draggable = self.draggable;
        scroller.mousewheel = self.mousewheel;
        scroller.arrowkeys = self.arrowkeys;
        scroller.pagekeys = self.pagekeys;
        if let Some(edge) = self.edgescroll {
            scroller.edge = edge;
        }
        scroller.xoffset = self.xinitial;
        scroller.yoffset = self.yinitial;
        scroller
    }
}

/// Scrollable single-child container.
pub struct Viewport {
    pub scroller: Scroller,
    child: Option<Box<dyn Element>>,
    child_width: Option<f32>,
    child_height: Option<f32>,
}

impl Viewport {
    pub fn new(mut config: ViewportConfig) -> Self {
        let (child_width, child_height) = config.child_size;
        Self {
            scroller: config.build_scroller(),
            child: None,
            child_width,
            child_height,
        }
    }

    pub fn id(&self) -> WidgetId {
        self.scroller.id
    }

    pub fn set_child(&mut self, child: Box<dyn Element>) {
        self.child = Some(child);
    }

    /// Inherit interactive state from the viewport this one replaces, so
    /// in-progress drags and scroll positions survive a screen rebuild.
    pub fn replaces(&mut self, prev: &Viewport) {
        self.scroller.adopt(&prev.scroller);
    }

    /// Once-per-interaction-cycle hook: register with the adjustments so
    /// external value changes can be routed back as redraws.
    pub fn per_interact(&mut self) {
        let id = self.scroller.id;
        self.scroller.xadjustment.borrow_mut().register(id);
        self.scroller.yadjustment.borrow_mut().register(id);
    }

    /// Set a one-shot horizontal scroll target and request a redraw.
    pub fn set_xoffset(&mut self, ui: &mut Ui, target: Target) {
        self.scroller.xoffset = Some(target);
        ui.redraw.request(self.scroller.id, 0.0);
    }

    /// Set a one-shot vertical scroll target and request a redraw.
    pub fn set_yoffset(&mut self, ui: &mut Ui, target: Target) {
        self.scroller.yoffset = Some(target);
        ui.redraw.request(self.scroller.id, 0.0);
    }

    /// Render at the configured size and return the clipped canvas with the
    /// child blitted at the scroll offset.
    pub fn render(&mut self, ui: &mut Ui, width: f32, height: f32, st: f64) -> Canvas {
        self.scroller.width = width;
        self.scroller.height = height;

        let child_width = self.child_width.unwrap_or(width);
        let child_height = self.child_height.unwrap_or(height);

        let surf = match self.child.as_mut() {
            Some(child) => child.render(ui, child_width, child_height, st),
            None => Canvas::new(0.0, 0.0),
        };

        let (cw, ch) = surf.size();
        let (cxo, cyo, width, height) = self.scroller.update_offsets(ui, cw, ch, st);

        let mut rv = Canvas::new(width, height);
        rv.blit(surf, cxo, cyo);
        let mut rv = rv.into_clipped(width, height);

        if self.scroller.arrowkeys || self.scroller.draggable {
            // Focus target only; direct pointer hits still reach the child.
            rv.add_focus(self.scroller.id, false, 0, 0, width, height);
        }

        rv
    }

    /// Dispatch one input event at viewport-local coordinates.
    pub fn event(&mut self, ui: &mut Ui, ev: &InputEvent, x: i32, y: i32, st: f64) -> EventResult {
        self.scroller.handle_event(ui, ev, x, y, st)
    }
}
