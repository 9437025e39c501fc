//! Overlay state
//!
//! Everything the caption overlay mutates from its event loop and hover
//! tasks: the attached caption segments and the single active hover.

use std::collections::HashSet;
use tokio::task::AbortHandle;

use crate::page::{ElementId, Page};
use crate::tooltip::Tooltip;

/// The hover currently in flight or on screen.
#[derive(Debug)]
pub struct ActiveHover {
    pub generation: u64,
    pub task: Option<AbortHandle>,
    /// Set once the translation arrives and the tooltip is mounted
    pub tooltip: Option<Tooltip>,
}

#[derive(Debug, Default)]
pub struct OverlayState {
    /// Caption segments currently carrying a hover listener
    pub attached: HashSet<ElementId>,
    pub active: Option<ActiveHover>,
    /// Incremented for every accepted hover
    pub generation: u64,
}

impl OverlayState {
    /// Start a new hover, cancelling the previous one. Returns its generation.
    pub fn begin_hover(&mut self, page: &dyn Page) -> u64 {
        self.cancel_active(page);
        self.generation += 1;
        self.active = Some(ActiveHover {
            generation: self.generation,
            task: None,
            tooltip: None,
        });
        self.generation
    }

    /// The active hover, if it is still `generation`.
    pub fn active_mut(&mut self, generation: u64) -> Option<&mut ActiveHover> {
        self.active
            .as_mut()
            .filter(|active| active.generation == generation)
    }

    /// Abort the in-flight hover task and remove its tooltip.
    pub fn cancel_active(&mut self, page: &dyn Page) {
        if let Some(active) = self.active.take() {
            if let Some(task) = active.task {
                task.abort();
            }
            if let Some(tooltip) = active.tooltip {
                page.set_pointer_tracking(false);
                tooltip.remove(page);
            }
            tracing::debug!(generation = active.generation, "Hover superseded");
        }
    }

    /// Finish `generation`: remove its tooltip and clear the slot.
    pub fn finish(&mut self, generation: u64, page: &dyn Page) {
        if self.active_mut(generation).is_none() {
            return;
        }
        if let Some(active) = self.active.take() {
            if let Some(tooltip) = active.tooltip {
                tooltip.remove(page);
            }
        }
    }
}
