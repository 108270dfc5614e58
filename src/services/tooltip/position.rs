//! Tooltip placement.
//!
//! Places the popup to the left of its anchor, vertically centered, then
//! clamps it into the visible part of the page. Inputs are viewport
//! coordinates for the anchor and page coordinates (viewport plus scroll)
//! for the result.

/// Gap between the anchor and the popup.
pub const TOOLTIP_MARGIN: f64 = 4.0;
/// Minimum distance kept from the viewport edges.
pub const WINDOW_MARGIN: f64 = 16.0;
/// Leftmost page x the popup may start at.
pub const MIN_LEFT: f64 = 10.0;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.left + self.width && y >= self.top && y <= self.top + self.height
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// A popup that has not been laid out yet measures zero.
    pub fn is_measured(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Visible window extents and scroll offsets.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub scroll_x: f64,
    pub scroll_y: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            scroll_x: 0.0,
            scroll_y: 0.0,
        }
    }

    pub fn scrolled(mut self, scroll_x: f64, scroll_y: f64) -> Self {
        self.scroll_x = scroll_x;
        self.scroll_y = scroll_y;
        self
    }
}

/// Page position of the popup's top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Compute the clamped popup position. Pure; zero-sized popups are not
/// special-cased, callers wait for a measured size.
pub fn place(anchor: Rect, popup: Size, viewport: Viewport) -> Position {
    let pos_x = anchor.left - popup.width - TOOLTIP_MARGIN + viewport.scroll_x;
    let pos_y = anchor.top + anchor.height / 2.0 - popup.height / 2.0 + viewport.scroll_y;

    let x = (MIN_LEFT + viewport.scroll_x)
        .max(pos_x)
        .min(viewport.width + viewport.scroll_x - popup.width / 2.0 - WINDOW_MARGIN);

    let top = viewport.scroll_y + WINDOW_MARGIN;
    let bottom = viewport.scroll_y + viewport.height - WINDOW_MARGIN;

    let mut y = pos_y;
    if pos_y + popup.height > bottom {
        y = bottom - popup.height;
    }
    // Top edge wins when the popup does not fit at all
    if y < top {
        y = top;
    }

    Position { x, y }
}
