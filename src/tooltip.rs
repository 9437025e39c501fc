//! Tooltip renderer
//!
//! A tooltip is mounted near the cursor, follows the pointer while visible,
//! fades, and is then removed. Placement prefers above-right of the cursor
//! and flips when that would leave the viewport.

use std::fmt;
use uuid::Uuid;

use crate::config::TooltipConfig;
use crate::page::{Page, Point, Size};

/// Class name given to every mounted tooltip element.
pub const TOOLTIP_CLASS: &str = "subify-tooltip";

/// Identity of one mounted tooltip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TooltipId(Uuid);

impl TooltipId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TooltipId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TooltipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", TOOLTIP_CLASS, self.0)
    }
}

/// Content of a tooltip as handed to the page.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipView {
    pub id: TooltipId,
    /// Hovered caption text
    pub original: String,
    /// Translation, or the fallback text
    pub translated: String,
    pub max_width: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Entering,
    Visible,
    Fading,
}

/// Presentation state pushed to the page on every change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipStyle {
    pub left: f64,
    pub top: f64,
    pub opacity: f64,
    /// Vertical slide applied during the enter/leave transition, in pixels
    pub translate_y: f64,
    pub phase: Phase,
}

impl TooltipStyle {
    fn at(position: Point, phase: Phase) -> Self {
        let (opacity, translate_y) = match phase {
            Phase::Visible => (1.0, 0.0),
            Phase::Entering | Phase::Fading => (0.0, 5.0),
        };
        Self {
            left: position.x,
            top: position.y,
            opacity,
            translate_y,
            phase,
        }
    }
}

/// Position a tooltip of `size` for a cursor at `cursor`.
///
/// Above-right of the cursor by default; flips to the left when the right
/// edge would overflow, and below the cursor when the top would go negative.
pub fn place(cursor: Point, size: Size, viewport: Size, config: &TooltipConfig) -> Point {
    let mut x = cursor.x + config.offset_x;
    let mut y = cursor.y - size.height - config.offset_y;

    if x + size.width > viewport.width {
        x = cursor.x - size.width - config.offset_x;
    }
    if y < 0.0 {
        y = cursor.y + config.offset_y;
    }

    Point { x, y }
}

/// A mounted tooltip.
#[derive(Debug)]
pub struct Tooltip {
    view: TooltipView,
    size: Size,
    style: TooltipStyle,
}

impl Tooltip {
    /// Mount a tooltip and animate it in.
    pub fn show(
        page: &dyn Page,
        original: &str,
        translated: &str,
        cursor: Point,
        config: &TooltipConfig,
    ) -> Self {
        let view = TooltipView {
            id: TooltipId::new(),
            original: original.to_string(),
            translated: translated.to_string(),
            max_width: config.max_width,
        };

        let size = page.mount_tooltip(&view);
        let position = place(cursor, size, page.viewport(), config);

        page.style_tooltip(&view.id, &TooltipStyle::at(position, Phase::Entering));
        let style = TooltipStyle::at(position, Phase::Visible);
        page.style_tooltip(&view.id, &style);

        tracing::debug!(tooltip = %view.id, x = position.x, y = position.y, "Tooltip shown");
        Self { view, size, style }
    }

    pub fn phase(&self) -> Phase {
        self.style.phase
    }

    /// Reposition for a new cursor location. Ignored once fading.
    pub fn follow(&mut self, page: &dyn Page, cursor: Point, config: &TooltipConfig) {
        if self.style.phase != Phase::Visible {
            return;
        }
        let position = place(cursor, self.size, page.viewport(), config);
        self.style = TooltipStyle::at(position, Phase::Visible);
        page.style_tooltip(&self.view.id, &self.style);
    }

    /// Start the fade-out. Removal is a separate step.
    pub fn fade(&mut self, page: &dyn Page) {
        let position = Point {
            x: self.style.left,
            y: self.style.top,
        };
        self.style = TooltipStyle::at(position, Phase::Fading);
        page.style_tooltip(&self.view.id, &self.style);
    }

    pub fn remove(self, page: &dyn Page) {
        page.remove_tooltip(&self.view.id);
        tracing::debug!(tooltip = %self.view.id, "Tooltip removed");
    }
}
