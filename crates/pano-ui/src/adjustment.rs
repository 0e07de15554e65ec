//! Adjustment: the bounded scalar scroll-position model.
//!
//! One adjustment holds the scroll state of one axis: a `value` in
//! `[0, range]`, the visible `page`, and a keyboard/wheel `step`. It is the
//! single source of truth for that axis and may be shared with external
//! observers such as a scrollbar, so viewports hold it behind
//! `Rc<RefCell<_>>`.

use std::cell::RefCell;
use std::rc::Rc;

use pano_types::input::{FocusChange, WidgetId};

/// Shared handle to an adjustment. The toolkit is single-threaded and
/// frame-driven, so `Rc<RefCell<_>>` is the ownership model.
pub type SharedAdjustment = Rc<RefCell<Adjustment>>;

/// Hook invoked when the value changes. May return a focus-change value to
/// propagate up to the caller.
pub type ChangedHook = Box<dyn FnMut(f32) -> Option<FocusChange>>;

/// Snapping policy constraining the value to multiples of `step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ForceStep {
    /// No snapping.
    #[default]
    None,
    /// Snap only when a drag is released.
    Release,
    /// Snap continuously, including mid-drag.
    Continuous,
}

/// An in-flight smooth transition toward a target value.
///
/// The value approaches the target exponentially:
/// `value(t) = start + delta * (1 - e^(-t / time_constant))`.
#[derive(Debug, Clone, Copy)]
struct Animation {
    start_value: f32,
    delta: f32,
    time_constant: f64,
    start_time: f64,
}

/// Bounded scroll-position model for one axis.
pub struct Adjustment {
    value: f32,
    range: f32,
    page: f32,
    /// Keyboard/wheel increment.
    pub step: f32,
    /// Snapping policy.
    pub force_step: ForceStep,
    /// Whether the owning viewport may rewrite range/page each frame.
    pub adjustable: bool,
    changed: Option<ChangedHook>,
    animation: Option<Animation>,
    pending_redraw: bool,
    updates: u64,
    registered: Vec<WidgetId>,
}

impl std::fmt::Debug for Adjustment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Adjustment")
            .field("value", &self.value)
            .field("range", &self.range)
            .field("page", &self.page)
            .field("step", &self.step)
            .field("force_step", &self.force_step)
            .finish_non_exhaustive()
    }
}

impl Default for Adjustment {
    fn default() -> Self {
        Self::new(1.0, 0.0)
    }
}

impl Adjustment {
    pub fn new(range: f32, value: f32) -> Self {
        let range = range.max(0.0);
        Self {
            value: value.clamp(0.0, range),
            range,
            page: 0.0,
            step: 32.0,
            force_step: ForceStep::None,
            adjustable: true,
            changed: None,
            animation: None,
            pending_redraw: false,
            updates: 0,
            registered: Vec::new(),
        }
    }

    /// Wrap in a shared handle.
    pub fn shared(self) -> SharedAdjustment {
        Rc::new(RefCell::new(self))
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn range(&self) -> f32 {
        self.range
    }

    pub fn page(&self) -> f32 {
        self.page
    }

    /// Record a widget interested in this adjustment, so redraws caused by
    /// external value changes can be routed to it. Idempotent.
    pub fn register(&mut self, widget: WidgetId) {
        if !self.registered.contains(&widget) {
            self.registered.push(widget);
        }
    }

    /// Widgets registered for this interaction cycle.
    pub fn registered(&self) -> &[WidgetId] {
        &self.registered
    }

    /// Register the change hook. Replaces any previous hook.
    pub fn set_changed(&mut self, hook: ChangedHook) {
        self.changed = Some(hook);
    }

    /// Set the scrollable extent. The value is re-clamped; no update
    /// notification is issued for an unchanged range.
    pub fn set_range(&mut self, range: f32) {
        let range = range.max(0.0);
        if range != self.range {
            self.range = range;
            self.value = self.value.clamp(0.0, range);
        }
    }

    /// Set the visible extent.
    pub fn set_page(&mut self, page: f32) {
        self.page = page;
    }

    /// Notify observers that range/page changed. Callers must only invoke
    /// this for real changes; redundant calls would cause redraw storms.
    pub fn update(&mut self) {
        self.updates += 1;
        self.pending_redraw = true;
    }

    /// Number of update notifications issued so far. Observable so tests
    /// can assert idempotence of range/page writes.
    pub fn updates(&self) -> u64 {
        self.updates
    }

    /// Set the value, clamped to `[0, range]`. A real change ends any
    /// running animation, marks a redraw, and runs the change hook; the
    /// hook's result is propagated. Setting the current value is a no-op.
    pub fn change(&mut self, value: f32) -> Option<FocusChange> {
        let value = value.clamp(0.0, self.range);
        if value == self.value {
            return None;
        }
        self.animation = None;
        self.value = value;
        self.pending_redraw = true;
        if let Some(hook) = self.changed.as_mut() { hook(value) } else { None }
    }

    /// Force the value without running the change hook. Used when seeding a
    /// one-shot scroll target or restoring persisted state. Cancels any
    /// running animation so the forced value sticks.
    pub fn set_value(&mut self, value: f32) {
        let value = value.clamp(0.0, self.range);
        self.animation = None;
        if value != self.value {
            self.value = value;
            self.pending_redraw = true;
        }
    }

    /// Apply the snapping policy to a proposed value.
    ///
    /// Boundary values always pass through so a drag can reach the ends of
    /// the range regardless of step size.
    pub fn round_value(&self, value: f32, release: bool) -> f32 {
        if value <= 0.0 {
            return 0.0;
        }
        if value >= self.range {
            return self.range;
        }
        match self.force_step {
            ForceStep::None => value,
            ForceStep::Release if !release => value,
            _ => {
                if self.step > 0.0 {
                    // The nearest step multiple may overshoot the range.
                    (self.step * (value / self.step).round()).clamp(0.0, self.range)
                } else {
                    value
                }
            }
        }
    }

    /// Begin a smooth transition by `delta` units from the current value,
    /// anchored at time `st`. Used both for inertial glide after a drag
    /// release and for snap-to-step animations.
    pub fn inertia(&mut self, delta: f32, time_constant: f64, st: f64) {
        let target = (self.value + delta).clamp(0.0, self.range);
        let delta = target - self.value;
        if delta == 0.0 {
            self.animation = None;
            return;
        }
        self.animation = Some(Animation {
            start_value: self.value,
            delta,
            time_constant: time_constant.max(1e-6),
            start_time: st,
        });
        self.pending_redraw = true;
    }

    /// Cancel any running animation. With `instantly` the value freezes
    /// where it is (a new drag grabbing a gliding viewport); otherwise it
    /// jumps to the animation target.
    pub fn end_animation(&mut self, instantly: bool) {
        if let Some(anim) = self.animation.take() {
            if !instantly {
                let target = (anim.start_value + anim.delta).clamp(0.0, self.range);
                self.value = target;
                self.pending_redraw = true;
            }
        }
    }

    /// Whether a smooth transition is running.
    pub fn animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Per-frame tick. Advances any animation to time `st` and returns the
    /// next requested redraw time (`0.0` = next frame), or `None` when the
    /// adjustment is settled.
    pub fn periodic(&mut self, st: f64) -> Option<f64> {
        let mut redraw = if self.pending_redraw {
            self.pending_redraw = false;
            Some(0.0)
        } else {
            None
        };

        if let Some(anim) = self.animation {
            let target = (anim.start_value + anim.delta).clamp(0.0, self.range);
            let t = (st - anim.start_time).max(0.0);
            let done = 1.0 - (-t / anim.time_constant).exp();
            let value = anim.start_value + anim.delta * done as f32;
            self.value = value.clamp(0.0, self.range);

            let settled = (target - self.value).abs() < 0.1
                || (anim.delta < 0.0 && self.value <= 0.0)
                || (anim.delta > 0.0 && self.value >= self.range);

            if settled {
                self.value = target;
                self.animation = None;
            } else {
                redraw = Some(0.0);
            }
        }

        redraw
    }

    /// Carry scroll state over from the adjustment of a structurally
    /// compatible predecessor viewport.
    pub fn adopt(&mut self, prev: &Adjustment) {
        self.range = prev.range;
        self.page = prev.page;
        self.value = prev.value;
        self.animation = prev.animation;
        self.pending_redraw = prev.pending_redraw;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pano_types::input::WidgetId;

    #[test]
    fn new_clamps_value_to_range() {
        let adj = Adjustment::new(100.0, 250.0);
        assert_eq!(adj.value(), 100.0);
        let adj = Adjustment::new(100.0, -5.0);
        assert_eq!(adj.value(), 0.0);
    }

    #[test]
    fn negative_range_is_zero() {
        let adj = Adjustment::new(-10.0, 0.0);
        assert_eq!(adj.range(), 0.0);
    }

    #[test]
    fn change_clamps_and_reports() {
        let mut adj = Adjustment::new(100.0, 0.0);
        adj.change(150.0);
        assert_eq!(adj.value(), 100.0);
        adj.change(-3.0);
        assert_eq!(adj.value(), 0.0);
    }

    #[test]
    fn change_to_same_value_is_noop() {
        use std::cell::Cell;
        use std::rc::Rc;

        let mut adj = Adjustment::new(100.0, 50.0);
        let calls = Rc::new(Cell::new(0u32));
        let calls_in_hook = Rc::clone(&calls);
        adj.set_changed(Box::new(move |_| {
            calls_in_hook.set(calls_in_hook.get() + 1);
            None
        }));
        assert!(adj.change(50.0).is_none());
        assert_eq!(calls.get(), 0);
        assert!(adj.periodic(0.0).is_none());
    }

    #[test]
    fn change_hook_result_propagates() {
        let mut adj = Adjustment::new(100.0, 0.0);
        let id = WidgetId(42);
        adj.set_changed(Box::new(move |_| Some(FocusChange { target: id })));
        let rv = adj.change(10.0);
        assert_eq!(rv, Some(FocusChange { target: WidgetId(42) }));
    }

    #[test]
    fn set_range_reclamps_value() {
        let mut adj = Adjustment::new(100.0, 80.0);
        adj.set_range(50.0);
        assert_eq!(adj.value(), 50.0);
    }

    #[test]
    fn update_counter_increments() {
        let mut adj = Adjustment::new(100.0, 0.0);
        assert_eq!(adj.updates(), 0);
        adj.update();
        assert_eq!(adj.updates(), 1);
    }

    #[test]
    fn update_requests_one_redraw() {
        let mut adj = Adjustment::new(100.0, 0.0);
        adj.update();
        assert_eq!(adj.periodic(0.0), Some(0.0));
        assert_eq!(adj.periodic(0.0), None);
    }

    #[test]
    fn register_is_idempotent() {
        let mut adj = Adjustment::new(100.0, 0.0);
        let id = WidgetId(7);
        adj.register(id);
        adj.register(id);
        assert_eq!(adj.registered(), &[id]);
    }

    // -- round_value --

    #[test]
    fn round_value_passes_boundaries() {
        let mut adj = Adjustment::new(100.0, 0.0);
        adj.step = 30.0;
        adj.force_step = ForceStep::Continuous;
        assert_eq!(adj.round_value(-5.0, false), 0.0);
        assert_eq!(adj.round_value(0.0, false), 0.0);
        assert_eq!(adj.round_value(100.0, false), 100.0);
        assert_eq!(adj.round_value(130.0, true), 100.0);
    }

    #[test]
    fn round_value_none_is_identity() {
        let adj = Adjustment::new(100.0, 0.0);
        assert_eq!(adj.round_value(33.3, false), 33.3);
        assert_eq!(adj.round_value(33.3, true), 33.3);
    }

    #[test]
    fn round_value_release_only_snaps_on_release() {
        let mut adj = Adjustment::new(100.0, 0.0);
        adj.step = 10.0;
        adj.force_step = ForceStep::Release;
        assert_eq!(adj.round_value(33.3, false), 33.3);
        assert_eq!(adj.round_value(33.3, true), 30.0);
    }

    #[test]
    fn round_value_clamps_when_step_exceeds_range() {
        let mut adj = Adjustment::new(1.5, 0.0);
        adj.step = 2.0;
        adj.force_step = ForceStep::Continuous;
        assert_eq!(adj.round_value(1.2, true), 1.5);
        assert_eq!(adj.round_value(0.4, true), 0.0);
    }

    #[test]
    fn round_value_continuous_always_snaps() {
        let mut adj = Adjustment::new(100.0, 0.0);
        adj.step = 10.0;
        adj.force_step = ForceStep::Continuous;
        assert_eq!(adj.round_value(33.3, false), 30.0);
        assert_eq!(adj.round_value(37.0, false), 40.0);
    }

    // -- animation --

    #[test]
    fn inertia_approaches_target() {
        let mut adj = Adjustment::new(1000.0, 100.0);
        adj.inertia(200.0, 0.3, 0.0);
        assert!(adj.animating());

        adj.periodic(0.1);
        let early = adj.value();
        assert!(early > 100.0 && early < 300.0, "early = {early}");

        adj.periodic(0.3);
        let later = adj.value();
        assert!(later > early);

        // Several time constants later the animation has settled.
        adj.periodic(5.0);
        assert!(!adj.animating());
        assert_eq!(adj.value(), 300.0);
    }

    #[test]
    fn inertia_clamps_target_to_range() {
        let mut adj = Adjustment::new(100.0, 90.0);
        adj.inertia(500.0, 0.3, 0.0);
        adj.periodic(10.0);
        assert_eq!(adj.value(), 100.0);
        assert!(!adj.animating());
    }

    #[test]
    fn inertia_with_no_travel_is_noop() {
        let mut adj = Adjustment::new(100.0, 100.0);
        adj.inertia(50.0, 0.3, 0.0);
        assert!(!adj.animating());
    }

    #[test]
    fn periodic_requests_redraw_while_animating() {
        let mut adj = Adjustment::new(1000.0, 0.0);
        adj.inertia(500.0, 0.3, 0.0);
        assert_eq!(adj.periodic(0.05), Some(0.0));
        assert_eq!(adj.periodic(0.10), Some(0.0));
    }

    #[test]
    fn end_animation_instantly_freezes_value() {
        let mut adj = Adjustment::new(1000.0, 0.0);
        adj.inertia(500.0, 0.3, 0.0);
        adj.periodic(0.1);
        let mid = adj.value();
        adj.end_animation(true);
        assert_eq!(adj.value(), mid);
        assert!(!adj.animating());
    }

    #[test]
    fn end_animation_completes_to_target() {
        let mut adj = Adjustment::new(1000.0, 0.0);
        adj.inertia(500.0, 0.3, 0.0);
        adj.periodic(0.1);
        adj.end_animation(false);
        assert_eq!(adj.value(), 500.0);
    }

    #[test]
    fn change_cancels_animation() {
        let mut adj = Adjustment::new(1000.0, 0.0);
        adj.inertia(500.0, 0.3, 0.0);
        adj.change(42.0);
        assert!(!adj.animating());
        assert_eq!(adj.value(), 42.0);
    }

    // -- adopt --

    #[test]
    fn adopt_carries_value_range_and_animation() {
        let mut prev = Adjustment::new(1000.0, 0.0);
        prev.set_page(100.0);
        prev.change(250.0);
        prev.inertia(100.0, 0.3, 1.0);

        let mut next = Adjustment::new(1.0, 0.0);
        next.adopt(&prev);
        assert_eq!(next.range(), 1000.0);
        assert_eq!(next.page(), 100.0);
        assert_eq!(next.value(), 250.0);
        assert!(next.animating());
    }

    // -- properties --

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn value_always_within_range(
                range in 0.0f32..10_000.0,
                value in -10_000.0f32..20_000.0,
            ) {
                let mut adj = Adjustment::new(range, 0.0);
                adj.change(value);
                prop_assert!(adj.value() >= 0.0);
                prop_assert!(adj.value() <= adj.range());
            }

            #[test]
            fn round_value_stays_within_range(
                range in 1.0f32..10_000.0,
                value in -10_000.0f32..20_000.0,
                step in 0.0f32..500.0,
            ) {
                let mut adj = Adjustment::new(range, 0.0);
                adj.step = step;
                adj.force_step = ForceStep::Continuous;
                let rounded = adj.round_value(value, true);
                prop_assert!(rounded >= 0.0);
                prop_assert!(rounded <= range);
            }
        }
    }
}
