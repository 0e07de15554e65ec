//! GridViewport: a scrolling grid of uniformly sized cells.
//!
//! All cells share the size of the first child's render. The grid needs at
//! least one of `rows`/`cols`; the missing axis is derived from the child
//! count by ceiling division. Placement is row-major unless transposed, and
//! offscreen cells are skipped at render time while their positions are
//! still recorded.

use pano_types::error::{PanoError, Result};
use pano_types::input::{EventResult, InputEvent, WidgetId};

use crate::canvas::{Canvas, Element, Null};
use crate::context::Ui;
use crate::scroller::Scroller;
use crate::viewport::ViewportConfig;

/// Grid shape and fullness policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridConfig {
    pub cols: Option<u32>,
    pub rows: Option<u32>,
    /// Column-major placement. Defaults to true when only `rows` is given.
    pub transpose: Option<bool>,
    /// Pad a partially filled grid with null cells instead of erroring.
    pub allow_underfull: bool,
    /// Accept more children than `rows * cols` instead of erroring.
    pub allow_overfull: bool,
}

/// Scrollable fixed-cell grid container.
pub struct GridViewport {
    pub scroller: Scroller,
    children: Vec<Box<dyn Element>>,
    cols: Option<u32>,
    rows: Option<u32>,
    transpose: bool,
    allow_underfull: bool,
    allow_overfull: bool,
    child_width: Option<f32>,
    child_height: Option<f32>,
    /// Cell positions from the last render, one per child, including cells
    /// that were skipped as offscreen.
    placements: Vec<(i32, i32)>,
}

impl GridViewport {
    pub fn new(mut config: ViewportConfig, grid: GridConfig) -> Result<Self> {
        if grid.cols.is_none() && grid.rows.is_none() {
            return Err(PanoError::Config(
                "a grid viewport needs rows, cols, or both".into(),
            ));
        }
        if grid.cols == Some(0) || grid.rows == Some(0) {
            return Err(PanoError::Config("grid rows and cols must be positive".into()));
        }

        let transpose = grid
            .transpose
            .unwrap_or(grid.rows.is_some() && grid.cols.is_none());

        let (child_width, child_height) = config.child_size;
        Ok(Self {
            scroller: config.build_scroller(),
            children: Vec::new(),
            cols: grid.cols,
            rows: grid.rows,
            transpose,
            allow_underfull: grid.allow_underfull,
            allow_overfull: grid.allow_overfull,
            child_width,
            child_height,
            placements: Vec::new(),
        })
    }

    pub fn id(&self) -> WidgetId {
        self.scroller.id
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Append a cell. Errs when both dimensions are fixed and the grid is
    /// already full, unless overfull grids are allowed.
    pub fn add(&mut self, child: Box<dyn Element>) -> Result<()> {
        if let (Some(cols), Some(rows)) = (self.cols, self.rows) {
            let cells = (cols * rows) as usize;
            if self.children.len() >= cells && !self.allow_overfull {
                return Err(PanoError::Config(format!(
                    "grid is full: {cols}x{rows} = {cells} cells"
                )));
            }
        }
        self.children.push(child);
        Ok(())
    }

    /// Inherit interactive state from the grid this one replaces.
    pub fn replaces(&mut self, prev: &GridViewport) {
        self.scroller.adopt(&prev.scroller);
    }

    /// Once-per-interaction-cycle hook. Validates fullness, padding a
    /// permitted underfull grid with null cells, and registers with the
    /// adjustments.
    pub fn per_interact(&mut self) -> Result<()> {
        let id = self.scroller.id;
        self.scroller.xadjustment.borrow_mut().register(id);
        self.scroller.yadjustment.borrow_mut().register(id);

        let children = self.children.len() as u32;
        let delta = match (self.cols, self.rows) {
            (Some(cols), Some(rows)) => (cols * rows).saturating_sub(children),
            (Some(given), None) | (None, Some(given)) => {
                let rem = children % given;
                if rem == 0 { 0 } else { given - rem }
            }
            (None, None) => 0,
        };

        if delta == 0 {
            return Ok(());
        }
        if !self.allow_underfull {
            return Err(PanoError::Config(format!(
                "grid is underfull: {children} children, {delta} cells missing"
            )));
        }

        log::debug!("grid {:?}: padding {delta} underfull cells", id);
        for _ in 0..delta {
            self.children.push(Box::new(Null));
        }
        Ok(())
    }

    /// Cell positions from the last render, including skipped cells.
    pub fn placements(&self) -> &[(i32, i32)] {
        &self.placements
    }

    /// Render at the configured size: measure the first child, lay out the
    /// grid, and blit the visible cells at the scroll offset.
    pub fn render(&mut self, ui: &mut Ui, width: f32, height: f32, st: f64) -> Canvas {
        self.scroller.width = width;
        self.scroller.height = height;
        self.placements.clear();

        if self.children.is_empty() {
            return Canvas::new(0.0, 0.0);
        }

        let child_width = self.child_width.unwrap_or(width);
        let child_height = self.child_height.unwrap_or(height);

        let lc = self.children.len() as u32;
        let (cols, rows) = match (self.cols, self.rows) {
            (Some(cols), Some(rows)) => (cols, rows),
            (Some(cols), None) => (cols, lc.div_ceil(cols)),
            (None, Some(rows)) => (lc.div_ceil(rows), rows),
            // Rejected at construction.
            (None, None) => (lc, 1),
        };

        let style = self.scroller.style;

        // All cells take the size of the first child.
        let measured = self.children[0].render(ui, child_width, child_height, st);
        let (mut cw, mut ch) = measured.size();

        let mut tw =
            (cw + style.xspacing) * cols as f32 - style.xspacing + style.left_margin + style.right_margin;
        let mut th =
            (ch + style.yspacing) * rows as f32 - style.yspacing + style.top_margin + style.bottom_margin;

        if style.xfill {
            tw = child_width;
            cw = (tw - (cols - 1) as f32 * style.xspacing - style.left_margin - style.right_margin)
                / cols as f32;
        }
        if style.yfill {
            th = child_height;
            ch = (th - (rows - 1) as f32 * style.yspacing - style.top_margin - style.bottom_margin)
                / rows as f32;
        }

        let (mut cxo, mut cyo, width, height) = self.scroller.update_offsets(ui, tw, th, st);
        cxo += style.left_margin.round() as i32;
        cyo += style.top_margin.round() as i32;

        let mut rv = Canvas::new(width, height);

        for (index, child) in self.children.iter_mut().enumerate() {
            let index = index as u32;
            let (gx, gy) = if self.transpose {
                (index / rows, index % rows)
            } else {
                (index % cols, index / cols)
            };

            let x = gx as f32 * (cw + style.xspacing) + cxo as f32;
            let y = gy as f32 * (ch + style.yspacing) + cyo as f32;
            let xi = x.round() as i32;
            let yi = y.round() as i32;
            self.placements.push((xi, yi));

            // Offscreen cells are positioned but not rendered.
            if x + cw < 0.0 || y + ch < 0.0 || x >= width || y >= height {
                continue;
            }

            let surf = child.render(ui, cw, ch, st);
            rv.blit(surf, xi, yi);
        }

        let mut rv = rv.into_clipped(width, height);
        if self.scroller.arrowkeys || self.scroller.draggable {
            rv.add_focus(self.scroller.id, false, 0, 0, width, height);
        }
        rv
    }

    /// Dispatch one input event at grid-local coordinates.
    pub fn event(&mut self, ui: &mut Ui, ev: &InputEvent, x: i32, y: i32, st: f64) -> EventResult {
        self.scroller.handle_event(ui, ev, x, y, st)
    }
}
