//! Per-action render state and stages.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use futures::future::{FutureExt, LocalBoxFuture};

use crate::config::DEFAULT_FADE;
use crate::error::HookError;

/// Future returned by a reveal hook.
pub type HookFuture = LocalBoxFuture<'static, Result<(), HookError>>;

/// A reveal hook. Called once, may finish immediately or later.
pub type Hook = Box<dyn FnOnce() -> HookFuture>;

/// Wrap a synchronous closure as a hook.
pub fn hook<F>(f: F) -> Hook
where
    F: FnOnce() -> Result<(), HookError> + 'static,
{
    Box::new(move || {
        let result = f();
        async move { result }.boxed_local()
    })
}

/// Wrap an async closure as a hook.
pub fn async_hook<F, Fut>(f: F) -> Hook
where
    F: FnOnce() -> Fut + 'static,
    Fut: Future<Output = Result<(), HookError>> + 'static,
{
    Box::new(move || f().boxed_local())
}

/// Everything one queued card update needs.
///
/// ```ignore
/// let state = CardRenderState::new("<b>Front</b>")
///     .with_fade(Duration::ZERO)
///     .pre_reveal(hook(move || { view.scroll_to_top(); Ok(()) }));
/// ```
pub struct CardRenderState {
    pub html: String,
    pub fade: Duration,
    /// Run after the content swap, before typesetting.
    pub pre_reveal: Vec<Hook>,
    /// Run after the card has faded back in.
    pub post_reveal: Vec<Hook>,
}

impl CardRenderState {
    pub fn new(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            fade: DEFAULT_FADE,
            pre_reveal: Vec::new(),
            post_reveal: Vec::new(),
        }
    }

    pub fn with_fade(mut self, fade: Duration) -> Self {
        self.fade = fade;
        self
    }

    pub fn pre_reveal(mut self, hook: Hook) -> Self {
        self.pre_reveal.push(hook);
        self
    }

    pub fn post_reveal(mut self, hook: Hook) -> Self {
        self.post_reveal.push(hook);
        self
    }
}

impl fmt::Debug for CardRenderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardRenderState")
            .field("html_len", &self.html.len())
            .field("fade", &self.fade)
            .field("pre_reveal", &self.pre_reveal.len())
            .field("post_reveal", &self.post_reveal.len())
            .finish()
    }
}

/// Where an action is in its life.
///
/// ```text
/// Queued → FadingOut → ContentSwapped → MathRendering → AwaitingImages
///        → FadingIn → Revealed → Done
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionStage {
    Queued,
    FadingOut,
    ContentSwapped,
    MathRendering,
    AwaitingImages,
    FadingIn,
    Revealed,
    Done,
}

impl fmt::Display for ActionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActionStage::Queued => "queued",
            ActionStage::FadingOut => "fading-out",
            ActionStage::ContentSwapped => "content-swapped",
            ActionStage::MathRendering => "math-rendering",
            ActionStage::AwaitingImages => "awaiting-images",
            ActionStage::FadingIn => "fading-in",
            ActionStage::Revealed => "revealed",
            ActionStage::Done => "done",
        };
        f.write_str(name)
    }
}
