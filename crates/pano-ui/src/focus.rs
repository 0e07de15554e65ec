//! Focus and pointer-grab bookkeeping.
//!
//! The pointer grab is process-wide shared state: at most one widget holds
//! it at a time, and a widget that loses it must abandon its own drag. It is
//! carried in an explicit context object (no ambient globals) so that event
//! handling stays deterministic under test.

use pano_types::input::{FocusChange, WidgetId};

/// Shared focus/grab state for one UI tree.
#[derive(Debug, Default)]
pub struct FocusContext {
    grab: Option<WidgetId>,
    grab_draggable: bool,
    focused: Option<WidgetId>,
}

impl FocusContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// The widget currently holding the pointer grab, if any.
    pub fn grab(&self) -> Option<WidgetId> {
        self.grab
    }

    /// Whether the current grab holder is itself a draggable widget.
    pub fn grab_is_draggable(&self) -> bool {
        self.grab.is_some() && self.grab_draggable
    }

    /// Claim or release the grab. Claiming supersedes any previous holder.
    pub fn set_grab(&mut self, widget: Option<WidgetId>, draggable: bool) {
        if widget != self.grab {
            log::debug!("grab: {:?} -> {:?}", self.grab, widget);
        }
        self.grab = widget;
        self.grab_draggable = widget.is_some() && draggable;
    }

    /// The widget currently holding keyboard/selection focus.
    pub fn focused(&self) -> Option<WidgetId> {
        self.focused
    }

    pub fn is_focused(&self, widget: WidgetId) -> bool {
        self.focused == Some(widget)
    }

    pub fn set_focus(&mut self, widget: Option<WidgetId>) {
        self.focused = widget;
    }

    /// Force focus onto `widget`. Returns a [`FocusChange`] to propagate up
    /// when focus actually moved (the side effect other widgets may need to
    /// observe), or `None` when the widget already held focus.
    pub fn force_focus(&mut self, widget: WidgetId) -> Option<FocusChange> {
        if self.focused == Some(widget) {
            return None;
        }
        log::debug!("focus forced: {:?} -> {:?}", self.focused, widget);
        self.focused = Some(widget);
        Some(FocusChange { target: widget })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_grab_initially() {
        let focus = FocusContext::new();
        assert_eq!(focus.grab(), None);
        assert!(!focus.grab_is_draggable());
    }

    #[test]
    fn claim_and_release_grab() {
        let mut focus = FocusContext::new();
        let id = WidgetId(1);
        focus.set_grab(Some(id), true);
        assert_eq!(focus.grab(), Some(id));
        assert!(focus.grab_is_draggable());

        focus.set_grab(None, false);
        assert_eq!(focus.grab(), None);
        assert!(!focus.grab_is_draggable());
    }

    #[test]
    fn grab_supersedes_previous_holder() {
        let mut focus = FocusContext::new();
        focus.set_grab(Some(WidgetId(1)), true);
        focus.set_grab(Some(WidgetId(2)), false);
        assert_eq!(focus.grab(), Some(WidgetId(2)));
        assert!(!focus.grab_is_draggable());
    }

    #[test]
    fn force_focus_reports_change_once() {
        let mut focus = FocusContext::new();
        let id = WidgetId(3);
        let rv = focus.force_focus(id);
        assert_eq!(rv, Some(FocusChange { target: id }));
        assert!(focus.is_focused(id));

        // Already focused: no side effect to propagate.
        assert_eq!(focus.force_focus(id), None);
    }

    #[test]
    fn set_focus_clears() {
        let mut focus = FocusContext::new();
        focus.set_focus(Some(WidgetId(4)));
        assert_eq!(focus.focused(), Some(WidgetId(4)));
        focus.set_focus(None);
        assert_eq!(focus.focused(), None);
    }
}
