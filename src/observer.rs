//! Subtitle observer
//!
//! Caption segments are created and destroyed continuously while a video
//! plays. Each mutation batch triggers a rescan that (re)attaches exactly one
//! hover listener per caption element.

use std::collections::HashSet;

use crate::page::{ElementId, Page};

#[derive(Debug, Clone)]
pub struct SubtitleObserver {
    class_name: String,
}

impl SubtitleObserver {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
        }
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Attach a hover listener to every caption segment on the page.
    ///
    /// Any listener a previous scan attached is removed first, so a segment
    /// never carries two. Segments that left the page are dropped from
    /// `attached`. Returns the number of segments currently attached.
    pub fn attach_listeners(&self, page: &dyn Page, attached: &mut HashSet<ElementId>) -> usize {
        let segments = page.elements_by_class(&self.class_name);

        for &segment in &segments {
            page.remove_hover_listener(segment);
            page.add_hover_listener(segment);
        }

        let current: HashSet<ElementId> = segments.into_iter().collect();
        attached.retain(|el| current.contains(el));
        attached.extend(current);

        tracing::trace!(count = attached.len(), "Caption listeners attached");
        attached.len()
    }

    /// Remove every listener this observer attached.
    pub fn detach_all(&self, page: &dyn Page, attached: &mut HashSet<ElementId>) {
        for segment in attached.drain() {
            page.remove_hover_listener(segment);
        }
    }
}
