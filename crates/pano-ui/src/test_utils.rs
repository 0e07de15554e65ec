//! Shared test doubles for widget tests.

use std::cell::RefCell;
use std::rc::Rc;

use crate::canvas::{Canvas, Element};
use crate::context::Ui;

/// Element that renders at a fixed size regardless of the requested size and
/// logs each requested size through a shared handle.
pub struct FixedSize {
    width: f32,
    height: f32,
    log: Rc<RefCell<Vec<(f32, f32)>>>,
}

impl FixedSize {
    /// Returns the element and a handle to its request log.
    pub fn new(width: f32, height: f32) -> (Self, Rc<RefCell<Vec<(f32, f32)>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        (
            Self { width, height, log: Rc::clone(&log) },
            log,
        )
    }
}

impl Element for FixedSize {
    fn render(&mut self, _ui: &mut Ui, width: f32, height: f32, _st: f64) -> Canvas {
        self.log.borrow_mut().push((width, height));
        Canvas::new(self.width, self.height)
    }
}
