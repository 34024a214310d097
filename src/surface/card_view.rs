//! Card View - In-memory render target backed by signals.
//!
//! Holds everything a renderer needs to draw a card: HTML content, opacity,
//! body classes, scroll position, image load states and whether the
//! type-answer box has focus. All of it is reactive.

use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use spark_signals::{signal, Signal};
use tokio::sync::Notify;
use tracing::trace;

use super::animate;
use super::RenderTarget;
use crate::config::{RevealConfig, DEFAULT_FPS};
use crate::error::ContentError;
use crate::types::{ImageState, ScrollPosition};

/// Element id of the type-answer input.
pub const TYPE_ANSWER_ID: &str = "typeans";

struct CardViewInner {
    id: String,
    fps: u8,
    content: Signal<String>,
    opacity: Signal<f32>,
    body_class: Signal<String>,
    scroll: Signal<ScrollPosition>,
    images: Signal<Vec<ImageState>>,
    type_answer_focused: Signal<bool>,
    images_changed: Notify,
}

/// Headless card element. Cheap to clone, clones share state.
#[derive(Clone)]
pub struct CardView {
    inner: Rc<CardViewInner>,
}

impl CardView {
    pub fn new(id: impl Into<String>) -> Self {
        Self::with_fps(id, DEFAULT_FPS)
    }

    /// View animated at the frame rate of `config`.
    pub fn from_config(id: impl Into<String>, config: &RevealConfig) -> Self {
        Self::with_fps(id, config.fps)
    }

    /// View whose fades step at `fps` frames per second.
    pub fn with_fps(id: impl Into<String>, fps: u8) -> Self {
        Self {
            inner: Rc::new(CardViewInner {
                id: id.into(),
                fps,
                content: signal(String::new()),
                opacity: signal(1.0),
                body_class: signal(String::new()),
                scroll: signal(ScrollPosition::Top),
                images: signal(Vec::new()),
                type_answer_focused: signal(false),
                images_changed: Notify::new(),
            }),
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn content(&self) -> String {
        self.inner.content.get()
    }

    pub fn opacity(&self) -> f32 {
        self.inner.opacity.get()
    }

    pub fn body_class(&self) -> String {
        self.inner.body_class.get()
    }

    pub fn scroll(&self) -> ScrollPosition {
        self.inner.scroll.get()
    }

    pub fn images(&self) -> Vec<ImageState> {
        self.inner.images.get()
    }

    pub fn type_answer_focused(&self) -> bool {
        self.inner.type_answer_focused.get()
    }

    pub fn content_signal(&self) -> Signal<String> {
        self.inner.content.clone()
    }

    pub fn opacity_signal(&self) -> Signal<f32> {
        self.inner.opacity.clone()
    }

    /// Whether the content has an element with this id.
    pub fn has_element(&self, id: &str) -> bool {
        let content = self.inner.content.get();
        has_id(&content, id)
    }

    // =========================================================================
    // Writes
    // =========================================================================

    pub fn set_body_class(&self, classes: impl Into<String>) {
        self.inner.body_class.set(classes.into());
    }

    pub fn scroll_to_top(&self) {
        self.inner.scroll.set(ScrollPosition::Top);
    }

    /// Scroll the element with `id` into view. Returns false if there is none.
    pub fn scroll_to_anchor(&self, id: &str) -> bool {
        if !self.has_element(id) {
            return false;
        }
        self.inner.scroll.set(ScrollPosition::Anchor(id.to_string()));
        true
    }

    /// Focus the type-answer box if the card has one.
    pub fn focus_type_answer(&self) -> bool {
        let present = self.has_element(TYPE_ANSWER_ID);
        self.inner.type_answer_focused.set(present);
        present
    }

    /// Record that image `index` finished loading.
    pub fn image_loaded(&self, index: usize) {
        self.set_image_state(index, ImageState::Loaded);
    }

    /// Record that image `index` failed to load.
    pub fn image_failed(&self, index: usize) {
        self.set_image_state(index, ImageState::Failed);
    }

    fn set_image_state(&self, index: usize, state: ImageState) {
        let mut images = self.inner.images.get();
        let Some(slot) = images.get_mut(index) else {
            return;
        };
        *slot = state;
        self.inner.images.set(images);
        self.inner.images_changed.notify_waiters();
    }

    fn images_pending(&self) -> bool {
        self.inner.images.get().iter().any(|s| !s.is_settled())
    }
}

#[async_trait(?Send)]
impl RenderTarget for CardView {
    fn id(&self) -> &str {
        &self.inner.id
    }

    async fn fade_to(&self, opacity: f32, duration: Duration) {
        animate::fade(&self.inner.opacity, opacity, duration, self.inner.fps).await;
    }

    fn set_content(&self, html: &str) -> Result<(), ContentError> {
        validate(html)?;

        let image_count = count_tags(html, "<img");
        self.inner.content.set(html.to_string());
        self.inner.images.set(vec![ImageState::Loading; image_count]);
        self.inner.type_answer_focused.set(false);
        self.inner.images_changed.notify_waiters();
        trace!(target_id = %self.inner.id, images = image_count, "card content replaced");
        Ok(())
    }

    async fn images_settled(&self) {
        loop {
            // Registered before the check so a change in between is not lost
            let changed = self.inner.images_changed.notified();
            if !self.images_pending() {
                return;
            }
            changed.await;
        }
    }
}

// =============================================================================
// HTML helpers
// =============================================================================

/// Reject markup the view cannot hold: an unterminated `<script>` element
/// would swallow the rest of the card.
fn validate(html: &str) -> Result<(), ContentError> {
    let lower = html.to_ascii_lowercase();
    let mut rest = lower.as_str();
    let mut offset = 0;
    while let Some(start) = rest.find("<script") {
        let after = &rest[start..];
        match after.find("</script>") {
            Some(end) => {
                let consumed = start + end + "</script>".len();
                offset += consumed;
                rest = &rest[consumed..];
            }
            None => {
                return Err(ContentError::new(
                    "SyntaxError: unterminated script element",
                    format!("at byte {} of card content", offset + start),
                ));
            }
        }
    }
    Ok(())
}

fn count_tags(html: &str, tag: &str) -> usize {
    html.to_ascii_lowercase().matches(tag).count()
}

fn has_id(html: &str, id: &str) -> bool {
    html.contains(&format!("id=\"{id}\""))
        || html.contains(&format!("id='{id}'"))
        || html.contains(&format!("id={id}>"))
        || html.contains(&format!("id={id} "))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::task::LocalSet;
    use tokio::time::{sleep, timeout, Instant};

    #[test]
    fn test_set_content_counts_images() {
        let view = CardView::new("qa");
        view.set_content("<p>a</p><img src=a.png><IMG src=b.png>").unwrap();

        assert_eq!(view.content(), "<p>a</p><img src=a.png><IMG src=b.png>");
        assert_eq!(view.images(), vec![ImageState::Loading; 2]);
    }

    #[test]
    fn test_unterminated_script_rejected() {
        let view = CardView::new("qa");
        view.set_content("old").unwrap();

        let err = view
            .set_content("<script>ok()</script><SCRIPT>broken(")
            .unwrap_err();

        assert!(err.message.contains("unterminated"));
        assert_eq!(err.detail, "at byte 21 of card content");
        assert_eq!(view.content(), "old");
    }

    #[test]
    fn test_scroll_to_anchor() {
        let view = CardView::new("qa");
        view.set_content("<hr id=answer>Back").unwrap();

        assert!(view.scroll_to_anchor("answer"));
        assert_eq!(view.scroll(), ScrollPosition::Anchor("answer".into()));
        assert!(!view.scroll_to_anchor("missing"));

        view.scroll_to_top();
        assert_eq!(view.scroll(), ScrollPosition::Top);
    }

    #[test]
    fn test_focus_type_answer() {
        let view = CardView::new("qa");
        view.set_content("Front").unwrap();
        assert!(!view.focus_type_answer());

        view.set_content("Front <input id=\"typeans\">").unwrap();
        assert!(view.focus_type_answer());
        assert!(view.type_answer_focused());

        view.set_content("Back").unwrap();
        assert!(!view.type_answer_focused());
    }

    #[tokio::test(start_paused = true)]
    async fn test_images_settled_without_images() {
        let view = CardView::new("qa");
        view.set_content("text only").unwrap();

        let start = Instant::now();
        view.images_settled().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_images_settled_after_load_and_error() {
        LocalSet::new()
            .run_until(async {
                let view = CardView::new("qa");
                view.set_content("<img src=a><img src=b>").unwrap();

                let loader = view.clone();
                tokio::task::spawn_local(async move {
                    sleep(Duration::from_millis(10)).await;
                    loader.image_loaded(0);
                    sleep(Duration::from_millis(10)).await;
                    loader.image_failed(1);
                });

                let start = Instant::now();
                view.images_settled().await;
                assert_eq!(start.elapsed(), Duration::from_millis(20));
                assert_eq!(view.images(), vec![ImageState::Loaded, ImageState::Failed]);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_images_never_settle() {
        let view = CardView::new("qa");
        view.set_content("<img src=slow>").unwrap();

        let waited = timeout(Duration::from_millis(100), view.images_settled()).await;
        assert!(waited.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fade_to_updates_opacity() {
        let view = CardView::with_fps("qa", 50);
        view.fade_to(0.0, Duration::from_millis(100)).await;
        assert_eq!(view.opacity(), 0.0);
        view.fade_to(1.0, Duration::from_millis(100)).await;
        assert_eq!(view.opacity(), 1.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_fps_from_config_jumps() {
        let view = CardView::from_config("qa", &RevealConfig::default().with_fps(0));

        let start = tokio::time::Instant::now();
        view.fade_to(0.0, Duration::from_millis(100)).await;

        assert_eq!(start.elapsed(), Duration::ZERO);
        assert_eq!(view.opacity(), 0.0);
    }
}
