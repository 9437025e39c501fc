//! Overlay lifecycle tests on a paused clock

use std::sync::Arc;
use std::time::Duration;

use crate::config::TooltipConfig;
use crate::error::SubifyError;
use crate::language::LanguageCode;
use crate::page::{Page, Point};
use crate::tests::fixtures::{advance_ms, settle, FakeTranslator, Harness, Reply, CAPTION_CLASS};
use crate::tooltip::Phase;

const CURSOR: Point = Point { x: 400.0, y: 500.0 };

#[tokio::test(start_paused = true)]
async fn hover_shows_tooltip_then_dismisses_itself() {
    let h = Harness::new(FakeTranslator::replying("හලෝ"));
    h.preferences
        .set_language(&LanguageCode::parse("si").unwrap())
        .await;
    let caption = h.page.insert_element(CAPTION_CLASS, "Hello");
    h.overlay.start().unwrap();

    h.page.hover(caption, CURSOR);
    settle().await;

    let tips = h.page.tooltips();
    assert_eq!(tips.len(), 1);
    assert_eq!(tips[0].original, "Hello");
    assert_eq!(tips[0].translated, "හලෝ");
    assert_eq!(tips[0].style.unwrap().phase, Phase::Visible);
    assert_eq!(
        h.translator.requests(),
        vec![("Hello".to_string(), "si".to_string())]
    );

    advance_ms(1900).await;
    assert_eq!(h.page.tooltips()[0].style.unwrap().opacity, 1.0);

    advance_ms(200).await;
    let fading = h.page.tooltips();
    assert_eq!(fading.len(), 1);
    assert_eq!(fading[0].style.unwrap().phase, Phase::Fading);
    assert!(!h.page.is_tracking_pointer());

    advance_ms(300).await;
    assert!(h.page.tooltips().is_empty());
    assert!(!h.overlay.has_active_hover());
}

#[tokio::test(start_paused = true)]
async fn empty_caption_is_ignored() {
    let h = Harness::new(FakeTranslator::replying("x"));
    let blank = h.page.insert_element(CAPTION_CLASS, "  \n ");
    let empty = h.page.insert_element(CAPTION_CLASS, "");
    h.overlay.start().unwrap();

    h.page.hover(blank, CURSOR);
    h.page.hover(empty, CURSOR);
    settle().await;
    advance_ms(3000).await;

    assert_eq!(h.translator.calls(), 0);
    assert_eq!(h.page.mounted_total(), 0);
    assert!(!h.overlay.has_active_hover());
}

#[tokio::test(start_paused = true)]
async fn failed_translation_shows_fallback() {
    let h = Harness::new(FakeTranslator::failing());
    let caption = h.page.insert_element(CAPTION_CLASS, "Hello");
    h.overlay.start().unwrap();

    h.page.hover(caption, CURSOR);
    settle().await;

    let tips = h.page.tooltips();
    assert_eq!(tips.len(), 1);
    assert_eq!(tips[0].original, "Hello");
    assert_eq!(tips[0].translated, "Error translating text");
    assert_eq!(h.translator.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn dead_storage_translates_into_default_language() {
    let h = Harness::new(FakeTranslator::replying("ok"));
    h.preferences
        .set_language(&LanguageCode::parse("fr").unwrap())
        .await;
    h.area.invalidate();

    let caption = h.page.insert_element(CAPTION_CLASS, "Hello");
    h.overlay.start().unwrap();
    h.page.hover(caption, CURSOR);
    settle().await;

    assert_eq!(
        h.translator.requests(),
        vec![("Hello".to_string(), "si".to_string())]
    );
    assert_eq!(h.page.tooltips().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn newer_hover_cancels_in_flight_request() {
    let translator = Arc::new(FakeTranslator::new(
        Reply::Text("t".to_string()),
        Duration::from_millis(500),
    ));
    let h = Harness::with_translator(translator, TooltipConfig::default());
    let first = h.page.insert_element(CAPTION_CLASS, "first");
    let second = h.page.insert_element(CAPTION_CLASS, "second");
    h.overlay.start().unwrap();

    h.page.hover(first, CURSOR);
    settle().await;
    advance_ms(100).await;
    h.page.hover(second, CURSOR);
    settle().await;

    advance_ms(600).await;
    let tips = h.page.tooltips();
    assert_eq!(tips.len(), 1);
    assert_eq!(tips[0].original, "second");
    assert_eq!(h.page.mounted_total(), 1);
    assert_eq!(h.translator.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn newer_hover_replaces_visible_tooltip() {
    let h = Harness::new(FakeTranslator::replying("t"));
    let first = h.page.insert_element(CAPTION_CLASS, "first");
    let second = h.page.insert_element(CAPTION_CLASS, "second");
    h.overlay.start().unwrap();

    h.page.hover(first, CURSOR);
    settle().await;
    assert_eq!(h.page.tooltips()[0].original, "first");

    advance_ms(1000).await;
    h.page.hover(second, CURSOR);
    settle().await;

    let tips = h.page.tooltips();
    assert_eq!(tips.len(), 1);
    assert_eq!(tips[0].original, "second");

    // The first tooltip's timers must not touch the second one.
    advance_ms(1500).await;
    assert_eq!(h.page.tooltips().len(), 1);
    assert_eq!(h.page.tooltips()[0].style.unwrap().phase, Phase::Visible);

    advance_ms(1000).await;
    assert!(h.page.tooltips().is_empty());
}

#[tokio::test(start_paused = true)]
async fn tooltip_follows_pointer_while_visible() {
    let h = Harness::new(FakeTranslator::replying("t"));
    let caption = h.page.insert_element(CAPTION_CLASS, "Hello");
    h.overlay.start().unwrap();

    h.page.hover(caption, CURSOR);
    settle().await;
    assert!(h.page.is_tracking_pointer());
    let before = h.page.tooltips()[0].style.unwrap();

    h.page.move_pointer(Point { x: 600.0, y: 300.0 });
    settle().await;
    let after = h.page.tooltips()[0].style.unwrap();
    assert_eq!(after.left, 615.0);
    assert_ne!(before.left, after.left);
}

#[tokio::test(start_paused = true)]
async fn captions_inserted_later_get_exactly_one_listener() {
    let h = Harness::new(FakeTranslator::replying("t"));
    h.overlay.start().unwrap();
    assert_eq!(h.overlay.attached_count(), 0);

    let caption = h.page.insert_element(CAPTION_CLASS, "late");
    for i in 0..5 {
        h.page.insert_element("ytp-caption-window", &format!("noise {}", i));
    }
    settle().await;

    assert_eq!(h.overlay.attached_count(), 1);
    assert_eq!(h.page.listener_count(caption), 1);

    h.page.hover(caption, CURSOR);
    settle().await;
    assert_eq!(h.translator.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn caption_text_changes_are_picked_up() {
    let h = Harness::new(FakeTranslator::replying("t"));
    let caption = h.page.insert_element(CAPTION_CLASS, "old");
    h.overlay.start().unwrap();

    h.page.set_text(caption, "new  words");
    settle().await;
    h.page.hover(caption, CURSOR);
    settle().await;

    assert_eq!(h.translator.requests()[0].0, "new words");
}

#[tokio::test(start_paused = true)]
async fn stop_detaches_and_cleans_up() {
    let h = Harness::new(FakeTranslator::replying("t"));
    let caption = h.page.insert_element(CAPTION_CLASS, "Hello");
    h.overlay.start().unwrap();
    assert!(matches!(h.overlay.start(), Err(SubifyError::AlreadyRunning)));

    h.page.hover(caption, CURSOR);
    settle().await;
    assert_eq!(h.page.tooltips().len(), 1);

    h.overlay.stop();
    h.overlay.stop();
    assert!(!h.overlay.is_running());
    assert!(h.page.tooltips().is_empty());
    assert_eq!(h.page.listener_count(caption), 0);
    assert!(!h.page.is_observed());

    h.page.hover(caption, CURSOR);
    settle().await;
    assert_eq!(h.translator.calls(), 1);

    h.overlay.start().unwrap();
    assert_eq!(h.page.listener_count(caption), 1);
    h.page.hover(caption, CURSOR);
    settle().await;
    assert_eq!(h.translator.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn custom_duration_is_honoured() {
    let tooltip = TooltipConfig {
        duration_ms: 4500,
        ..Default::default()
    };
    let h = Harness::with_translator(Arc::new(FakeTranslator::replying("t")), tooltip);
    let caption = h.page.insert_element(CAPTION_CLASS, "Hello");
    h.overlay.start().unwrap();

    h.page.hover(caption, CURSOR);
    settle().await;
    advance_ms(4000).await;
    assert_eq!(h.page.tooltips()[0].style.unwrap().phase, Phase::Visible);

    advance_ms(1000).await;
    assert!(h.page.tooltips().is_empty());
}

#[test]
fn page_trait_is_object_safe() {
    fn takes(_: &dyn Page) {}
    let h = Harness::new(FakeTranslator::replying("t"));
    takes(h.page.as_ref());
}
