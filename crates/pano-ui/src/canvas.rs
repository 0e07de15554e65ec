//! Composition contract between the viewport core and the renderer.
//!
//! A [`Canvas`] is the owned result of rendering one element: its reported
//! size, child blits at integer offsets, an optional clip rectangle, and the
//! focus-hit regions collected along the way. The actual rasterization
//! backend consumes canvases elsewhere; the core only builds them.

use pano_types::input::WidgetId;

use crate::context::Ui;

/// A renderable UI element.
///
/// `width`/`height` are the requested size; the returned canvas reports the
/// size the element actually rendered at, which may differ. `st` is
/// monotonic interaction time in seconds.
pub trait Element {
    fn render(&mut self, ui: &mut Ui, width: f32, height: f32, st: f64) -> Canvas;
}

/// A focus-hit region registered on a canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusHit {
    pub widget: WidgetId,
    /// When false, the region is a focus target that does not claim direct
    /// pointer hits, so inner focusable elements still receive them.
    pub pointer: bool,
    pub x: i32,
    pub y: i32,
    pub w: f32,
    pub h: f32,
}

/// A child canvas placed at an integer offset.
#[derive(Debug)]
pub struct Blit {
    pub canvas: Canvas,
    pub x: i32,
    pub y: i32,
}

/// Owned render result of one element.
#[derive(Debug, Default)]
pub struct Canvas {
    width: f32,
    height: f32,
    blits: Vec<Blit>,
    clip: Option<(f32, f32)>,
    focus_hits: Vec<FocusHit>,
}

impl Canvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            blits: Vec::new(),
            clip: None,
            focus_hits: Vec::new(),
        }
    }

    /// Actual rendered size.
    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Place a child canvas at an integer offset.
    pub fn blit(&mut self, canvas: Canvas, x: i32, y: i32) {
        self.blits.push(Blit { canvas, x, y });
    }

    /// Clip to the sub-rectangle `(0, 0, width, height)`, preserving focus
    /// metadata, and take on that size.
    pub fn into_clipped(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self.clip = Some((width, height));
        self
    }

    /// Register a focus-hit region. `pointer = false` registers a focus
    /// target without claiming direct pointer hits.
    pub fn add_focus(&mut self, widget: WidgetId, pointer: bool, x: i32, y: i32, w: f32, h: f32) {
        self.focus_hits.push(FocusHit { widget, pointer, x, y, w, h });
    }

    pub fn blits(&self) -> &[Blit] {
        &self.blits
    }

    pub fn clip(&self) -> Option<(f32, f32)> {
        self.clip
    }

    pub fn focus_hits(&self) -> &[FocusHit] {
        &self.focus_hits
    }
}

/// An element that renders nothing. Used to pad underfull grids.
#[derive(Debug, Clone, Copy, Default)]
pub struct Null;

impl Element for Null {
    fn render(&mut self, _ui: &mut Ui, _width: f32, _height: f32, _st: f64) -> Canvas {
        Canvas::new(0.0, 0.0)
    }
}
