//! Host page abstraction
//!
//! The overlay never touches a document directly. A [`Page`] exposes the few
//! operations it needs: find caption elements, read their text, manage hover
//! listeners, and mount tooltip overlays. Page events (mutations, hovers,
//! pointer movement) are delivered through an [`EventSink`].

pub mod virtual_page;

use tokio::sync::mpsc;

use crate::tooltip::{TooltipId, TooltipStyle, TooltipView};

pub use virtual_page::{RenderedTooltip, VirtualPage};

/// Handle to an element on the host page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

/// A point in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Something that happened on the page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// A batch of subtree mutations under the body.
    Mutation,
    /// The pointer entered an element that carries a hover listener.
    MouseOver { element: ElementId, cursor: Point },
    /// The pointer moved while pointer tracking is on.
    MouseMove { cursor: Point },
}

pub type EventSink = mpsc::UnboundedSender<PageEvent>;

/// Operations the overlay needs from the host page.
pub trait Page: Send + Sync {
    /// Start observing subtree mutations on the body and route page events
    /// to `sink`.
    fn observe(&self, sink: EventSink);

    /// Stop observing and drop the sink.
    fn disconnect(&self);

    fn elements_by_class(&self, class_name: &str) -> Vec<ElementId>;

    fn text_content(&self, element: ElementId) -> Option<String>;

    fn add_hover_listener(&self, element: ElementId);

    /// Removing a listener that is not attached is a no-op.
    fn remove_hover_listener(&self, element: ElementId);

    /// Toggle document-level pointer movement events.
    fn set_pointer_tracking(&self, enabled: bool);

    fn viewport(&self) -> Size;

    /// Append a tooltip to the body and return its rendered size.
    fn mount_tooltip(&self, view: &TooltipView) -> Size;

    fn style_tooltip(&self, id: &TooltipId, style: &TooltipStyle);

    /// Removing a tooltip that is already gone is a no-op.
    fn remove_tooltip(&self, id: &TooltipId);
}
