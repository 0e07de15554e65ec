//! Platform-agnostic input event types and the logical scroll-action map.
//!
//! Every backend maps its native input to these enums. The viewport core
//! never sees raw platform input; it asks the [`InputMap`] whether an event
//! matches a logical [`ScrollAction`].

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// A platform-agnostic input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Pointer moved to a new position (viewport-local coordinates are
    /// supplied separately to the handler; these are screen coordinates).
    PointerMove { x: i32, y: i32 },
    /// A pointer button was pressed.
    ButtonDown { button: PointerButton, x: i32, y: i32 },
    /// A pointer button was released.
    ButtonUp { button: PointerButton, x: i32, y: i32 },
    /// A key was pressed.
    KeyPress(Key),
}

impl InputEvent {
    /// True for pointer-originated events (move, button down, button up).
    pub fn is_pointer(&self) -> bool {
        matches!(
            self,
            InputEvent::PointerMove { .. }
                | InputEvent::ButtonDown { .. }
                | InputEvent::ButtonUp { .. }
        )
    }
}

/// Pointer buttons. Wheel notches arrive as button presses, which is how
/// most display servers deliver them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerButton {
    Left,
    Middle,
    Right,
    WheelUp,
    WheelDown,
}

/// Keys that the viewport core reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    PageUp,
    PageDown,
}

/// Logical actions a viewport responds to. The binding from physical input
/// to these actions is configuration, not code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScrollAction {
    DragStart,
    DragEnd,
    WheelUp,
    WheelDown,
    LeftArrow,
    RightArrow,
    UpArrow,
    DownArrow,
    PageUp,
    PageDown,
}

/// One physical binding for a logical action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Binding {
    ButtonDown(PointerButton),
    ButtonUp(PointerButton),
    Key(Key),
}

impl Binding {
    fn matches(&self, ev: &InputEvent) -> bool {
        match (self, ev) {
            (Binding::ButtonDown(b), InputEvent::ButtonDown { button, .. }) => b == button,
            (Binding::ButtonUp(b), InputEvent::ButtonUp { button, .. }) => b == button,
            (Binding::Key(k), InputEvent::KeyPress(key)) => k == key,
            _ => false,
        }
    }
}

/// Maps logical scroll actions to physical bindings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputMap {
    bindings: Vec<(ScrollAction, Binding)>,
}

impl InputMap {
    /// An empty map that matches nothing.
    pub fn empty() -> Self {
        Self { bindings: Vec::new() }
    }

    /// Add a binding for an action.
    pub fn bind(&mut self, action: ScrollAction, binding: Binding) {
        self.bindings.push((action, binding));
    }

    /// Whether `ev` matches any binding for `action`.
    pub fn matches(&self, ev: &InputEvent, action: ScrollAction) -> bool {
        self.bindings
            .iter()
            .any(|(a, b)| *a == action && b.matches(ev))
    }
}

impl Default for InputMap {
    /// Left button drags, wheel notches scroll, arrow and page keys step.
    fn default() -> Self {
        let mut map = Self::empty();
        map.bind(ScrollAction::DragStart, Binding::ButtonDown(PointerButton::Left));
        map.bind(ScrollAction::DragEnd, Binding::ButtonUp(PointerButton::Left));
        map.bind(ScrollAction::WheelUp, Binding::ButtonDown(PointerButton::WheelUp));
        map.bind(ScrollAction::WheelDown, Binding::ButtonDown(PointerButton::WheelDown));
        map.bind(ScrollAction::LeftArrow, Binding::Key(Key::Left));
        map.bind(ScrollAction::RightArrow, Binding::Key(Key::Right));
        map.bind(ScrollAction::UpArrow, Binding::Key(Key::Up));
        map.bind(ScrollAction::DownArrow, Binding::Key(Key::Down));
        map.bind(ScrollAction::PageUp, Binding::Key(Key::PageUp));
        map.bind(ScrollAction::PageDown, Binding::Key(Key::PageDown));
        map
    }
}

/// Identity of an interactive widget, used for focus and grab bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WidgetId(pub u64);

static NEXT_WIDGET_ID: AtomicU64 = AtomicU64::new(1);

impl WidgetId {
    /// Allocate a fresh id.
    pub fn next() -> Self {
        Self(NEXT_WIDGET_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A focus change that must propagate to the caller, e.g. when a drag
/// steals focus from another widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusChange {
    /// The widget that now holds focus.
    pub target: WidgetId,
}

/// Outcome of dispatching one input event to a widget.
///
/// `Unhandled` propagates the event to siblings/parents, `Consumed` stops
/// propagation, and `Redirect` carries a focus-change value up the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Unhandled,
    Consumed,
    Redirect(FocusChange),
}

impl EventResult {
    /// True unless the event should keep propagating.
    pub fn is_handled(&self) -> bool {
        !matches!(self, EventResult::Unhandled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- InputEvent variants --

    #[test]
    fn pointer_move_event() {
        let e = InputEvent::PointerMove { x: 100, y: 200 };
        assert_eq!(e, InputEvent::PointerMove { x: 100, y: 200 });
        assert!(e.is_pointer());
    }

    #[test]
    fn button_events_are_pointer() {
        let down = InputEvent::ButtonDown { button: PointerButton::Left, x: 1, y: 2 };
        let up = InputEvent::ButtonUp { button: PointerButton::Left, x: 1, y: 2 };
        assert!(down.is_pointer());
        assert!(up.is_pointer());
        assert_ne!(down, up);
    }

    #[test]
    fn key_press_is_not_pointer() {
        assert!(!InputEvent::KeyPress(Key::PageDown).is_pointer());
    }

    #[test]
    fn key_serde_roundtrip() {
        let k = Key::PageUp;
        let json = serde_json::to_string(&k).unwrap();
        let k2: Key = serde_json::from_str(&json).unwrap();
        assert_eq!(k, k2);
    }

    // -- InputMap --

    #[test]
    fn empty_map_matches_nothing() {
        let map = InputMap::empty();
        let ev = InputEvent::ButtonDown { button: PointerButton::Left, x: 0, y: 0 };
        assert!(!map.matches(&ev, ScrollAction::DragStart));
    }

    #[test]
    fn default_drag_start_is_left_down() {
        let map = InputMap::default();
        let ev = InputEvent::ButtonDown { button: PointerButton::Left, x: 3, y: 4 };
        assert!(map.matches(&ev, ScrollAction::DragStart));
        assert!(!map.matches(&ev, ScrollAction::DragEnd));
    }

    #[test]
    fn default_drag_end_is_left_up() {
        let map = InputMap::default();
        let ev = InputEvent::ButtonUp { button: PointerButton::Left, x: 3, y: 4 };
        assert!(map.matches(&ev, ScrollAction::DragEnd));
    }

    #[test]
    fn default_wheel_bindings() {
        let map = InputMap::default();
        let up = InputEvent::ButtonDown { button: PointerButton::WheelUp, x: 0, y: 0 };
        let down = InputEvent::ButtonDown { button: PointerButton::WheelDown, x: 0, y: 0 };
        assert!(map.matches(&up, ScrollAction::WheelUp));
        assert!(map.matches(&down, ScrollAction::WheelDown));
        assert!(!map.matches(&up, ScrollAction::WheelDown));
    }

    #[test]
    fn default_arrow_and_page_bindings() {
        let map = InputMap::default();
        assert!(map.matches(&InputEvent::KeyPress(Key::Left), ScrollAction::LeftArrow));
        assert!(map.matches(&InputEvent::KeyPress(Key::Right), ScrollAction::RightArrow));
        assert!(map.matches(&InputEvent::KeyPress(Key::Up), ScrollAction::UpArrow));
        assert!(map.matches(&InputEvent::KeyPress(Key::Down), ScrollAction::DownArrow));
        assert!(map.matches(&InputEvent::KeyPress(Key::PageUp), ScrollAction::PageUp));
        assert!(map.matches(&InputEvent::KeyPress(Key::PageDown), ScrollAction::PageDown));
    }

    #[test]
    fn custom_binding() {
        let mut map = InputMap::empty();
        map.bind(ScrollAction::DragStart, Binding::ButtonDown(PointerButton::Middle));
        let mid = InputEvent::ButtonDown { button: PointerButton::Middle, x: 0, y: 0 };
        let left = InputEvent::ButtonDown { button: PointerButton::Left, x: 0, y: 0 };
        assert!(map.matches(&mid, ScrollAction::DragStart));
        assert!(!map.matches(&left, ScrollAction::DragStart));
    }

    #[test]
    fn input_map_serde_roundtrip() {
        let map = InputMap::default();
        let json = serde_json::to_string(&map).unwrap();
        let map2: InputMap = serde_json::from_str(&json).unwrap();
        let ev = InputEvent::KeyPress(Key::PageDown);
        assert_eq!(
            map.matches(&ev, ScrollAction::PageDown),
            map2.matches(&ev, ScrollAction::PageDown)
        );
    }

    // -- WidgetId --

    #[test]
    fn widget_ids_are_unique() {
        let a = WidgetId::next();
        let b = WidgetId::next();
        assert_ne!(a, b);
    }

    // -- EventResult --

    #[test]
    fn unhandled_is_not_handled() {
        assert!(!EventResult::Unhandled.is_handled());
    }

    #[test]
    fn consumed_is_handled() {
        assert!(EventResult::Consumed.is_handled());
    }

    #[test]
    fn redirect_is_handled() {
        let r = EventResult::Redirect(FocusChange { target: WidgetId(7) });
        assert!(r.is_handled());
    }
}
