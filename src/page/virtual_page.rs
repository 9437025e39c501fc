//! In-memory page
//!
//! Stands in for a browser document: captions are inserted and hovered
//! programmatically, and every tooltip the overlay renders is recorded so
//! it can be inspected.

use parking_lot::Mutex;
use std::collections::BTreeMap;

use crate::tooltip::{TooltipId, TooltipStyle, TooltipView};

use super::{ElementId, EventSink, Page, PageEvent, Point, Size};

/// Approximate glyph width used to measure tooltips.
const CHAR_WIDTH: f64 = 8.0;
/// Horizontal padding inside a tooltip.
const PADDING_X: f64 = 24.0;
/// Two text lines plus padding.
const TOOLTIP_HEIGHT: f64 = 48.0;

#[derive(Debug)]
struct VirtualElement {
    class_name: String,
    text: String,
    hover_listeners: usize,
}

/// A tooltip as it currently appears on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedTooltip {
    pub id: TooltipId,
    pub original: String,
    pub translated: String,
    pub size: Size,
    /// `None` until the first style is applied
    pub style: Option<TooltipStyle>,
}

#[derive(Debug, Default)]
struct PageState {
    next_id: u64,
    elements: BTreeMap<ElementId, VirtualElement>,
    sink: Option<EventSink>,
    pointer_tracking: bool,
    tooltips: Vec<RenderedTooltip>,
    mounted_total: usize,
}

impl PageState {
    fn emit(&self, event: PageEvent) {
        if let Some(sink) = &self.sink {
            // A closed receiver means the overlay stopped; nothing to deliver to.
            let _ = sink.send(event);
        }
    }
}

/// In-memory implementation of [`Page`].
#[derive(Debug)]
pub struct VirtualPage {
    viewport: Size,
    state: Mutex<PageState>,
}

impl VirtualPage {
    pub fn new(viewport: Size) -> Self {
        Self {
            viewport,
            state: Mutex::new(PageState::default()),
        }
    }

    /// Insert an element under the body.
    pub fn insert_element(&self, class_name: &str, text: &str) -> ElementId {
        let mut state = self.state.lock();
        state.next_id += 1;
        let id = ElementId(state.next_id);
        state.elements.insert(
            id,
            VirtualElement {
                class_name: class_name.to_string(),
                text: text.to_string(),
                hover_listeners: 0,
            },
        );
        state.emit(PageEvent::Mutation);
        id
    }

    pub fn set_text(&self, element: ElementId, text: &str) {
        let mut state = self.state.lock();
        let changed = match state.elements.get_mut(&element) {
            Some(el) => {
                el.text = text.to_string();
                true
            }
            None => false,
        };
        if changed {
            state.emit(PageEvent::Mutation);
        }
    }

    pub fn remove_element(&self, element: ElementId) {
        let mut state = self.state.lock();
        if state.elements.remove(&element).is_some() {
            state.emit(PageEvent::Mutation);
        }
    }

    /// Move the pointer onto `element`. Every attached listener fires once.
    pub fn hover(&self, element: ElementId, cursor: Point) {
        let state = self.state.lock();
        let listeners = state
            .elements
            .get(&element)
            .map(|el| el.hover_listeners)
            .unwrap_or(0);
        for _ in 0..listeners {
            state.emit(PageEvent::MouseOver { element, cursor });
        }
    }

    /// Move the pointer. Delivered only while pointer tracking is on.
    pub fn move_pointer(&self, cursor: Point) {
        let state = self.state.lock();
        if state.pointer_tracking {
            state.emit(PageEvent::MouseMove { cursor });
        }
    }

    pub fn listener_count(&self, element: ElementId) -> usize {
        self.state
            .lock()
            .elements
            .get(&element)
            .map(|el| el.hover_listeners)
            .unwrap_or(0)
    }

    pub fn is_observed(&self) -> bool {
        self.state.lock().sink.is_some()
    }

    pub fn is_tracking_pointer(&self) -> bool {
        self.state.lock().pointer_tracking
    }

    /// Tooltips currently mounted, oldest first.
    pub fn tooltips(&self) -> Vec<RenderedTooltip> {
        self.state.lock().tooltips.clone()
    }

    /// Number of tooltips ever mounted.
    pub fn mounted_total(&self) -> usize {
        self.state.lock().mounted_total
    }
}

impl Page for VirtualPage {
    fn observe(&self, sink: EventSink) {
        self.state.lock().sink = Some(sink);
    }

    fn disconnect(&self) {
        let mut state = self.state.lock();
        state.sink = None;
        state.pointer_tracking = false;
    }

    fn elements_by_class(&self, class_name: &str) -> Vec<ElementId> {
        self.state
            .lock()
            .elements
            .iter()
            .filter(|(_, el)| el.class_name.split_whitespace().any(|c| c == class_name))
            .map(|(id, _)| *id)
            .collect()
    }

    fn text_content(&self, element: ElementId) -> Option<String> {
        self.state
            .lock()
            .elements
            .get(&element)
            .map(|el| el.text.clone())
    }

    fn add_hover_listener(&self, element: ElementId) {
        if let Some(el) = self.state.lock().elements.get_mut(&element) {
            el.hover_listeners += 1;
        }
    }

    fn remove_hover_listener(&self, element: ElementId) {
        if let Some(el) = self.state.lock().elements.get_mut(&element) {
            el.hover_listeners = el.hover_listeners.saturating_sub(1);
        }
    }

    fn set_pointer_tracking(&self, enabled: bool) {
        self.state.lock().pointer_tracking = enabled;
    }

    fn viewport(&self) -> Size {
        self.viewport
    }

    fn mount_tooltip(&self, view: &TooltipView) -> Size {
        let longest = view
            .original
            .chars()
            .count()
            .max(view.translated.chars().count());
        let size = Size {
            width: (longest as f64 * CHAR_WIDTH + PADDING_X).min(view.max_width as f64),
            height: TOOLTIP_HEIGHT,
        };

        let mut state = self.state.lock();
        state.tooltips.push(RenderedTooltip {
            id: view.id,
            original: view.original.clone(),
            translated: view.translated.clone(),
            size,
            style: None,
        });
        state.mounted_total += 1;
        size
    }

    fn style_tooltip(&self, id: &TooltipId, style: &TooltipStyle) {
        let mut state = self.state.lock();
        if let Some(tip) = state.tooltips.iter_mut().find(|t| t.id == *id) {
            tip.style = Some(*style);
        }
    }

    fn remove_tooltip(&self, id: &TooltipId) {
        self.state.lock().tooltips.retain(|t| t.id != *id);
    }
}
