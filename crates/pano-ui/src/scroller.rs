//! The shared scrolling controller.
//!
//! [`Scroller`] owns everything `Viewport` and `GridViewport` have in
//! common: the two axis adjustments, offset computation from rendered
//! content size, and the drag / wheel / keyboard / edge-scroll event state
//! machine. The viewport variants supply layout and rendering on top.

use pano_types::input::{EventResult, InputEvent, ScrollAction, WidgetId};

use crate::adjustment::{Adjustment, ForceStep, SharedAdjustment};
use crate::context::Ui;
use crate::style::Style;

/// Mouse-wheel handling mode.
///
/// The `*Change` modes are boundary-sensitive: a wheel event that would push
/// past the boundary is left unhandled so a parent can react (e.g. flip to
/// the next gallery page). The plain modes always act and consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mousewheel {
    #[default]
    None,
    Vertical,
    Horizontal,
    VerticalChange,
    HorizontalChange,
}

/// One-shot scroll target applied on the next offset computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Target {
    /// Fraction of the scrollable range, 0.0 = start, 1.0 = end.
    Fraction(f32),
    /// Absolute position in pixels.
    Pixels(f32),
}

/// The proportional edge-scroll response: speed grows linearly with
/// proximity to the edge.
pub fn edgescroll_proportional(n: f32) -> f32 {
    n
}

/// Edge-triggered auto-scroll configuration.
#[derive(Debug, Clone, Copy)]
pub struct EdgeScroll {
    /// Width of the zone along each boundary that triggers scrolling.
    pub size: f32,
    /// Maximum scroll speed in pixels per second, reached at the boundary.
    pub speed: f32,
    /// Response curve applied to the normalized [-1, 1] ramp value.
    pub function: fn(f32) -> f32,
}

impl EdgeScroll {
    pub fn new(size: f32, speed: f32) -> Self {
        Self { size, speed, function: edgescroll_proportional }
    }
}

/// Shared offset-computation and event-handling state machine.
pub struct Scroller {
    pub id: WidgetId,
    pub xadjustment: SharedAdjustment,
    pub yadjustment: SharedAdjustment,
    /// False when the adjustments are caller-owned; the scroller then never
    /// rewrites their range/page.
    pub set_adjustments: bool,
    pub style: Style,

    // Capability flags.
    pub draggable: bool,
    pub mousewheel: Mousewheel,
    pub arrowkeys: bool,
    pub pagekeys: bool,

    /// One-shot targets consumed by the next offset computation.
    pub xoffset: Option<Target>,
    pub yoffset: Option<Target>,

    // Drag state. `drag_position` is owned exclusively while dragging.
    drag_position: Option<(i32, i32)>,
    drag_position_time: Option<f64>,
    /// Exponentially smoothed velocity estimate, in units per 1/60 s tick.
    drag_speed: (f32, f32),

    // Edge-scroll configuration and live state.
    pub edge: EdgeScroll,
    edge_xspeed: f32,
    edge_yspeed: f32,
    edge_last_st: Option<f64>,

    /// Visible window size from the last offset computation.
    pub width: f32,
    pub height: f32,
}

impl Scroller {
    pub fn new(xadjustment: SharedAdjustment, yadjustment: SharedAdjustment) -> Self {
        Self {
            id: WidgetId::next(),
            xadjustment,
            yadjustment,
            set_adjustments: true,
            style: Style::default(),
            draggable: false,
            mousewheel: Mousewheel::None,
            arrowkeys: false,
            pagekeys: false,
            xoffset: None,
            yoffset: None,
            drag_position: None,
            drag_position_time: None,
            drag_speed: (0.0, 0.0),
            edge: EdgeScroll::new(0.0, 0.0),
            edge_xspeed: 0.0,
            edge_yspeed: 0.0,
            edge_last_st: None,
            width: 0.0,
            height: 0.0,
        }
    }

    /// Fresh scroller with its own adjustments.
    pub fn with_own_adjustments() -> Self {
        Self::new(
            Adjustment::new(1.0, 0.0).shared(),
            Adjustment::new(1.0, 0.0).shared(),
        )
    }

    /// Current drag anchor, if a drag candidate or drag is active.
    pub fn drag_position(&self) -> Option<(i32, i32)> {
        self.drag_position
    }

    /// Timestamp of the last drag anchor update.
    pub fn drag_position_time(&self) -> Option<f64> {
        self.drag_position_time
    }

    /// Smoothed drag velocity estimate.
    pub fn drag_speed(&self) -> (f32, f32) {
        self.drag_speed
    }

    /// Current edge-scroll velocities in pixels per second.
    pub fn edge_speeds(&self) -> (f32, f32) {
        (self.edge_xspeed, self.edge_yspeed)
    }

    pub(crate) fn set_drag_state(
        &mut self,
        position: Option<(i32, i32)>,
        time: Option<f64>,
        speed: (f32, f32),
    ) {
        self.drag_position = position;
        self.drag_position_time = time;
        self.drag_speed = speed;
    }

    /// Carry interactive state over from the scroller of a structurally
    /// compatible predecessor (a screen rebuild replacing this viewport).
    pub fn adopt(&mut self, prev: &Scroller) {
        if !std::rc::Rc::ptr_eq(&self.xadjustment, &prev.xadjustment) {
            self.xadjustment.borrow_mut().adopt(&prev.xadjustment.borrow());
        }
        if !std::rc::Rc::ptr_eq(&self.yadjustment, &prev.yadjustment) {
            self.yadjustment.borrow_mut().adopt(&prev.yadjustment.borrow());
        }
        self.xoffset = prev.xoffset;
        self.yoffset = prev.yoffset;
        self.drag_position = prev.drag_position;
        self.drag_position_time = prev.drag_position_time;
        self.drag_speed = prev.drag_speed;
    }

    /// Compute the blit offsets for rendered content of size `cw` x `ch` at
    /// interaction time `st`.
    ///
    /// Returns `(xoffset, yoffset, visible_width, visible_height)`; the
    /// offsets are always <= 0. `self.width`/`self.height` must hold the
    /// configured size on entry and are updated to the visible size.
    pub fn update_offsets(&mut self, ui: &mut Ui, cw: f32, ch: f32, st: f64) -> (i32, i32, f32, f32) {
        let cw = cw.ceil();
        let ch = ch.ceil();

        let mut width = self.width;
        let mut height = self.height;

        if !self.style.xfill {
            width = cw.min(width);
        }
        if !self.style.yfill {
            height = ch.min(height);
        }

        width = width.max(self.style.xminimum);
        height = height.max(self.style.yminimum);

        if !ui.sizing && self.set_adjustments {
            let xrange = (cw - width).max(0.0);
            {
                let mut xadj = self.xadjustment.borrow_mut();
                if xadj.adjustable && (xadj.range() != xrange || xadj.page() != width) {
                    xadj.set_range(xrange);
                    xadj.set_page(width);
                    xadj.update();
                }
            }

            let yrange = (ch - height).max(0.0);
            {
                let mut yadj = self.yadjustment.borrow_mut();
                if yadj.adjustable && (yadj.range() != yrange || yadj.page() != height) {
                    yadj.set_range(yrange);
                    yadj.set_page(height);
                    yadj.update();
                }
            }
        }

        if let Some(target) = self.xoffset.take() {
            let value = match target {
                Target::Pixels(v) => v,
                Target::Fraction(f) => (cw - width).max(0.0) * f,
            };
            self.xadjustment.borrow_mut().set_value(value);
        }

        if let Some(target) = self.yoffset.take() {
            let value = match target {
                Target::Pixels(v) => v,
                Target::Fraction(f) => (ch - height).max(0.0) * f,
            };
            self.yadjustment.borrow_mut().set_value(value);
        }

        if self.edge.size > 0.0 && (self.edge_xspeed != 0.0 || self.edge_yspeed != 0.0) {
            if let Some(last) = self.edge_last_st {
                let duration = (st - last).max(0.0) as f32;
                let xvalue = self.xadjustment.borrow().value();
                self.xadjustment.borrow_mut().change(xvalue + duration * self.edge_xspeed);
                let yvalue = self.yadjustment.borrow().value();
                self.yadjustment.borrow_mut().change(yvalue + duration * self.edge_yspeed);

                self.check_edge_redraw(ui, st, true);
            }
        }

        if let Some(at) = self.xadjustment.borrow_mut().periodic(st) {
            ui.redraw.request(self.id, at);
        }
        if let Some(at) = self.yadjustment.borrow_mut().periodic(st) {
            ui.redraw.request(self.id, at);
        }

        let cxo = -(self.xadjustment.borrow().value().round() as i32);
        let cyo = -(self.yadjustment.borrow().value().round() as i32);

        self.width = width;
        self.height = height;

        (cxo, cyo, width, height)
    }

    /// Keep per-frame redraws flowing while an edge-scroll velocity can
    /// still move its axis toward a boundary.
    fn check_edge_redraw(&mut self, ui: &mut Ui, st: f64, reset_st: bool) {
        let mut redraw = false;

        {
            let xadj = self.xadjustment.borrow();
            if self.edge_xspeed > 0.0 && xadj.value() < xadj.range() {
                redraw = true;
            }
            if self.edge_xspeed < 0.0 && xadj.value() > 0.0 {
                redraw = true;
            }
        }
        {
            let yadj = self.yadjustment.borrow();
            if self.edge_yspeed > 0.0 && yadj.value() < yadj.range() {
                redraw = true;
            }
            if self.edge_yspeed < 0.0 && yadj.value() > 0.0 {
                redraw = true;
            }
        }

        if redraw {
            ui.redraw.request(self.id, 0.0);
            if reset_st || self.edge_last_st.is_none() {
                self.edge_last_st = Some(st);
            }
        } else {
            self.edge_last_st = None;
        }
    }

    /// Handle a drag release on one axis: glide on inertia, animate to the
    /// nearest step, or snap instantly, per the adjustment's policy.
    fn release_axis(
        adjustment: &SharedAdjustment,
        speed: f32,
        old_value: f32,
        inertia_amplitude: f32,
        inertia_time_constant: f64,
        screen_extent: f32,
        st: f64,
    ) {
        let mut adj = adjustment.borrow_mut();
        if speed != 0.0 && inertia_amplitude != 0.0 && adj.force_step == ForceStep::None {
            adj.inertia(inertia_amplitude * speed, inertia_time_constant, st);
        } else if adj.force_step == ForceStep::Release {
            let value = adj.round_value(old_value, true);
            let time_constant = (adj.step / (screen_extent * 2.0)).max(1e-6) as f64;
            adj.inertia(value - old_value, time_constant, st);
        } else {
            let value = adj.round_value(old_value, true);
            adj.change(value);
        }
    }

    /// Dispatch one input event at viewport-local position `(x, y)` and
    /// interaction time `st`.
    pub fn handle_event(&mut self, ui: &mut Ui, ev: &InputEvent, x: i32, y: i32, st: f64) -> EventResult {
        // Any interaction invalidates pending one-shot targets; they are
        // mutually exclusive with dragging.
        self.xoffset = None;
        self.yoffset = None;

        let inside = x >= 0 && (x as f32) < self.width && y >= 0 && (y as f32) < self.height;

        if !inside {
            self.edge_xspeed = 0.0;
            self.edge_yspeed = 0.0;
            self.edge_last_st = None;
        }

        // Dragging only makes sense when there is somewhere to scroll.
        let draggable = self.draggable
            && (self.xadjustment.borrow().range() > 0.0 || self.yadjustment.borrow().range() > 0.0);

        let grab = ui.focus.grab();

        if ui.focus.grab_is_draggable() && grab != Some(self.id) {
            // Another draggable widget took the pointer; abandon our drag.
            self.drag_position = None;
        } else if draggable {
            if grab.is_none() && ui.input_map.matches(ev, ScrollAction::DragEnd) {
                self.drag_position = None;
            }
        } else {
            self.drag_position = None;
        }

        // Drag-candidate promotion: the pointer was pressed here earlier and
        // has now traveled past the drag radius.
        if inside && draggable && grab != Some(self.id) {
            if let (Some((oldx, oldy)), InputEvent::PointerMove { .. }) = (self.drag_position, ev) {
                let distance = ((oldx - x) as f32).hypot((oldy - y) as f32);
                let grabbed_elsewhere = ui.focus.grab_is_draggable()
                    && grab.is_some_and(|g| ui.focus.is_focused(g));

                if distance >= ui.config.drag_radius && !grabbed_elsewhere {
                    log::debug!("drag steal: widget {:?} at ({x}, {y})", self.id);
                    let rv = ui.focus.force_focus(self.id);
                    ui.focus.set_grab(Some(self.id), true);
                    self.drag_position = Some((x, y));
                    self.drag_position_time = Some(st);
                    self.drag_speed = (0.0, 0.0);

                    if let Some(change) = rv {
                        return EventResult::Redirect(change);
                    }
                }
            }
        }

        if ui.focus.grab() == Some(self.id) {
            if let Some((oldx, oldy)) = self.drag_position {
                let old_xvalue = self.xadjustment.borrow().value();
                let old_yvalue = self.yadjustment.borrow().value();

                let dx = x - oldx;
                let dy = y - oldy;

                if let Some(t0) = self.drag_position_time {
                    let dt = st - t0;
                    if dt > 0.0 {
                        // Exponential blend, time-normalized so one long
                        // frame fully replaces a stale estimate.
                        let (old_xspeed, old_yspeed) = self.drag_speed;
                        let new_xspeed = -(dx as f32) / dt as f32 / 60.0;
                        let new_yspeed = -(dy as f32) / dt as f32 / 60.0;

                        let done = (dt * 60.0).min(1.0) as f32;

                        self.drag_speed = (
                            old_xspeed + done * (new_xspeed - old_xspeed),
                            old_yspeed + done * (new_yspeed - old_yspeed),
                        );
                    }
                }

                if ui.input_map.matches(ev, ScrollAction::DragEnd) {
                    log::debug!("drag end: widget {:?}, speed {:?}", self.id, self.drag_speed);
                    ui.focus.set_grab(None, false);

                    let (xspeed, yspeed) = self.drag_speed;
                    Self::release_axis(
                        &self.xadjustment,
                        xspeed,
                        old_xvalue,
                        ui.config.inertia_amplitude,
                        ui.config.inertia_time_constant as f64,
                        ui.config.screen_width as f32,
                        st,
                    );
                    Self::release_axis(
                        &self.yadjustment,
                        yspeed,
                        old_yvalue,
                        ui.config.inertia_amplitude,
                        ui.config.inertia_time_constant as f64,
                        ui.config.screen_height as f32,
                        st,
                    );

                    self.drag_position = None;
                    self.drag_position_time = None;

                    return EventResult::Consumed;
                }

                // The anchor only moves when the rounded value actually
                // changed; otherwise fine stepping would staircase.
                let new_xvalue = self.xadjustment.borrow().round_value(old_xvalue - dx as f32, false);
                let newx = if new_xvalue == old_xvalue {
                    oldx
                } else {
                    self.xadjustment.borrow_mut().change(new_xvalue);
                    x
                };

                let new_yvalue = self.yadjustment.borrow().round_value(old_yvalue - dy as f32, false);
                let newy = if new_yvalue == old_yvalue {
                    oldy
                } else {
                    self.yadjustment.borrow_mut().change(new_yvalue);
                    y
                };

                self.drag_position = Some((newx, newy));
                self.drag_position_time = Some(st);
            }
        }

        // (adjustment, boundary_sensitive); wheel only acts inside.
        let wheel = if inside {
            match self.mousewheel {
                Mousewheel::None => None,
                Mousewheel::HorizontalChange => Some((&self.xadjustment, true)),
                Mousewheel::VerticalChange => Some((&self.yadjustment, true)),
                Mousewheel::Horizontal => Some((&self.xadjustment, false)),
                Mousewheel::Vertical => Some((&self.yadjustment, false)),
            }
        } else {
            None
        };

        if let Some((adjustment, boundary_sensitive)) = wheel {
            if ui.input_map.matches(ev, ScrollAction::WheelUp) {
                let (value, step) = {
                    let adj = adjustment.borrow();
                    (adj.value(), adj.step)
                };
                if boundary_sensitive && value == 0.0 {
                    return EventResult::Unhandled;
                }
                return match adjustment.borrow_mut().change(value - step) {
                    Some(change) => EventResult::Redirect(change),
                    None => EventResult::Consumed,
                };
            }

            if ui.input_map.matches(ev, ScrollAction::WheelDown) {
                let (value, range, step) = {
                    let adj = adjustment.borrow();
                    (adj.value(), adj.range(), adj.step)
                };
                if boundary_sensitive && value == range {
                    return EventResult::Unhandled;
                }
                return match adjustment.borrow_mut().change(value + step) {
                    Some(change) => EventResult::Redirect(change),
                    None => EventResult::Consumed,
                };
            }
        }

        // Key events are delivered by keyboard focus, not pointer position.
        let key_focused = ui.focus.is_focused(self.id);

        if self.arrowkeys && key_focused {
            if let Some(result) = self.handle_arrow(ui, ev) {
                return result;
            }
        }

        if self.pagekeys && key_focused {
            if ui.input_map.matches(ev, ScrollAction::PageUp) {
                let (value, page) = {
                    let adj = self.yadjustment.borrow();
                    (adj.value(), adj.page())
                };
                return match self.yadjustment.borrow_mut().change(value - page) {
                    Some(change) => EventResult::Redirect(change),
                    None => EventResult::Consumed,
                };
            }

            if ui.input_map.matches(ev, ScrollAction::PageDown) {
                let (value, page) = {
                    let adj = self.yadjustment.borrow();
                    (adj.value(), adj.page())
                };
                return match self.yadjustment.borrow_mut().change(value + page) {
                    Some(change) => EventResult::Redirect(change),
                    None => EventResult::Consumed,
                };
            }
        }

        if inside && self.edge.size > 0.0 && ev.is_pointer() {
            // Two-sided linear ramp: 0 in the dead zone, growing to 1 at the
            // outer edge, negated on the near side.
            fn ramp(n: f32, zero: f32, one: f32) -> f32 {
                let t = (n - zero) / (one - zero);
                if !(0.0..=1.0).contains(&t) { 0.0 } else { t }
            }

            let mut xspeed = ramp(x as f32, self.width - self.edge.size, self.width);
            xspeed -= ramp(x as f32, self.edge.size, 0.0);
            self.edge_xspeed = self.edge.speed * (self.edge.function)(xspeed);

            let mut yspeed = ramp(y as f32, self.height - self.edge.size, self.height);
            yspeed -= ramp(y as f32, self.edge.size, 0.0);
            self.edge_yspeed = self.edge.speed * (self.edge.function)(yspeed);

            if xspeed != 0.0 || yspeed != 0.0 {
                // Keep the elapsed-time anchor so integration in
                // update_offsets stays continuous.
                self.check_edge_redraw(ui, st, false);
            } else {
                self.edge_last_st = None;
            }
        }

        if inside && draggable && ui.input_map.matches(ev, ScrollAction::DragStart) {
            log::debug!("drag candidate: widget {:?} at ({x}, {y})", self.id);
            self.drag_position = Some((x, y));
            self.drag_position_time = Some(st);
            self.drag_speed = (0.0, 0.0);

            self.xadjustment.borrow_mut().end_animation(true);
            self.yadjustment.borrow_mut().end_animation(true);

            if ui.focus.focused().is_none() {
                ui.focus.set_grab(Some(self.id), true);
            }

            return EventResult::Consumed;
        }

        EventResult::Unhandled
    }

    fn handle_arrow(&mut self, ui: &mut Ui, ev: &InputEvent) -> Option<EventResult> {
        // (action, adjustment, direction)
        let cases: [(ScrollAction, &SharedAdjustment, f32); 4] = [
            (ScrollAction::LeftArrow, &self.xadjustment, -1.0),
            (ScrollAction::RightArrow, &self.xadjustment, 1.0),
            (ScrollAction::UpArrow, &self.yadjustment, -1.0),
            (ScrollAction::DownArrow, &self.yadjustment, 1.0),
        ];

        for (action, adjustment, direction) in cases {
            if !ui.input_map.matches(ev, action) {
                continue;
            }
            let (value, range, step) = {
                let adj = adjustment.borrow();
                (adj.value(), adj.range(), adj.step)
            };
            // Refuse (without consuming) at the relevant boundary.
            if (direction < 0.0 && value == 0.0) || (direction > 0.0 && value == range) {
                return Some(EventResult::Unhandled);
            }
            return Some(match adjustment.borrow_mut().change(value + direction * step) {
                Some(change) => EventResult::Redirect(change),
                None => EventResult::Consumed,
            });
        }

        None
    }
}
