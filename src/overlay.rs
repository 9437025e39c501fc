//! Caption overlay controller
//!
//! Owns the whole hover-to-tooltip loop for one page:
//!
//! attach → observe → hover → fetch → render → auto-dismiss → detach
//!
//! `start` connects the page's mutation observer and spawns a single event
//! loop. Each accepted hover gets its own task; a newer hover aborts the
//! older task and removes its tooltip, so at most one tooltip is on screen.

use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::{CaptionConfig, TooltipConfig};
use crate::error::{Result, SubifyError};
use crate::hover::HoverHandler;
use crate::observer::SubtitleObserver;
use crate::page::{ElementId, Page, PageEvent, Point};
use crate::state::OverlayState;
use crate::tooltip::Tooltip;

struct Shared {
    page: Arc<dyn Page>,
    handler: HoverHandler,
    observer: SubtitleObserver,
    tooltip: TooltipConfig,
    state: Mutex<OverlayState>,
}

pub struct CaptionOverlay {
    shared: Arc<Shared>,
    event_loop: Mutex<Option<JoinHandle<()>>>,
}

impl CaptionOverlay {
    pub fn new(
        page: Arc<dyn Page>,
        handler: HoverHandler,
        captions: &CaptionConfig,
        tooltip: TooltipConfig,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                page,
                handler,
                observer: SubtitleObserver::new(captions.class_name.clone()),
                tooltip,
                state: Mutex::new(OverlayState::default()),
            }),
            event_loop: Mutex::new(None),
        }
    }

    /// Connect the observer, attach to existing captions, and start handling
    /// page events. Must be called from within a tokio runtime.
    pub fn start(&self) -> Result<()> {
        let mut event_loop = self.event_loop.lock();
        if event_loop.is_some() {
            return Err(SubifyError::AlreadyRunning);
        }

        let (tx, mut rx) = mpsc::unbounded_channel();
        self.shared.page.observe(tx);
        let attached = self.shared.rescan();

        let shared = Arc::clone(&self.shared);
        *event_loop = Some(tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                match event {
                    PageEvent::Mutation => {
                        shared.rescan();
                    }
                    PageEvent::MouseOver { element, cursor } => shared.on_hover(element, cursor),
                    PageEvent::MouseMove { cursor } => shared.on_pointer_move(cursor),
                }
            }
        }));

        tracing::info!(
            class_name = self.shared.observer.class_name(),
            attached,
            "Caption overlay started"
        );
        Ok(())
    }

    /// Disconnect from the page: stop observing, cancel any hover, remove the
    /// tooltip, and detach every listener. Safe to call more than once.
    pub fn stop(&self) {
        let Some(event_loop) = self.event_loop.lock().take() else {
            return;
        };
        event_loop.abort();

        let page = self.shared.page.as_ref();
        page.disconnect();

        let mut state = self.shared.state.lock();
        state.cancel_active(page);
        let mut attached = std::mem::take(&mut state.attached);
        self.shared.observer.detach_all(page, &mut attached);

        tracing::info!("Caption overlay stopped");
    }

    pub fn is_running(&self) -> bool {
        self.event_loop.lock().is_some()
    }

    /// Number of caption segments currently carrying a listener.
    pub fn attached_count(&self) -> usize {
        self.shared.state.lock().attached.len()
    }

    /// Whether a hover is in flight or its tooltip is on screen.
    pub fn has_active_hover(&self) -> bool {
        self.shared.state.lock().active.is_some()
    }
}

impl Drop for CaptionOverlay {
    fn drop(&mut self) {
        self.stop();
    }
}

impl Shared {
    fn rescan(&self) -> usize {
        let mut state = self.state.lock();
        self.observer
            .attach_listeners(self.page.as_ref(), &mut state.attached)
    }

    fn on_hover(self: &Arc<Self>, element: ElementId, cursor: Point) {
        let Some(text) = HoverHandler::caption_text(self.page.as_ref(), element) else {
            tracing::trace!(?element, "Ignoring hover over empty caption");
            return;
        };

        let mut state = self.state.lock();
        let generation = state.begin_hover(self.page.as_ref());
        tracing::debug!(generation, text = %text, "Caption hovered");

        let shared = Arc::clone(self);
        let task = tokio::spawn(async move { shared.run_hover(generation, text, cursor).await });
        if let Some(active) = state.active_mut(generation) {
            active.task = Some(task.abort_handle());
        }
    }

    fn on_pointer_move(&self, cursor: Point) {
        let mut state = self.state.lock();
        if let Some(tooltip) = state
            .active
            .as_mut()
            .and_then(|active| active.tooltip.as_mut())
        {
            tooltip.follow(self.page.as_ref(), cursor, &self.tooltip);
        }
    }

    async fn run_hover(self: Arc<Self>, generation: u64, text: String, cursor: Point) {
        let translation = self.handler.translate(&text).await;
        let page = self.page.as_ref();

        {
            let mut state = self.state.lock();
            let Some(active) = state.active_mut(generation) else {
                return;
            };
            active.tooltip = Some(Tooltip::show(
                page,
                &translation.original,
                &translation.translated,
                cursor,
                &self.tooltip,
            ));
            page.set_pointer_tracking(true);
        }

        tokio::time::sleep(self.tooltip.lifetime()).await;

        {
            let mut state = self.state.lock();
            let Some(tooltip) = state
                .active_mut(generation)
                .and_then(|active| active.tooltip.as_mut())
            else {
                return;
            };
            tooltip.fade(page);
            page.set_pointer_tracking(false);
        }

        tokio::time::sleep(self.tooltip.fade()).await;

        self.state.lock().finish(generation, page);
        tracing::debug!(generation, "Hover finished");
    }
}
