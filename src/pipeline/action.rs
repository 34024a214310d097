//! One render action: fade out, swap, typeset, fade in.

use futures::future::try_join_all;
use spark_signals::Signal;
use tokio::time::timeout;
use tracing::{debug, trace};

use super::error_block::render_error;
use super::state::{ActionStage, CardRenderState, Hook};
use crate::config::RevealConfig;
use crate::error::{HookError, RenderError, TypesetError};
use crate::surface::{RenderTarget, Typesetter};

/// Run one action to completion.
///
/// Content and typesetting failures are drawn on the card and never fail the
/// action. Hook failures do; the card then stays wherever the action stopped.
pub(crate) async fn run_action(
    target: &dyn RenderTarget,
    typesetter: &dyn Typesetter,
    config: &RevealConfig,
    state: CardRenderState,
    stage: &Signal<ActionStage>,
) -> Result<(), RenderError> {
    let CardRenderState {
        html,
        fade,
        pre_reveal,
        post_reveal,
    } = state;

    advance(stage, ActionStage::FadingOut);
    target.fade_to(0.0, fade).await;

    if let Err(err) = target.set_content(&html) {
        debug!(target_id = %target.id(), %err, "card content rejected");
        show_error(target, "HTML", &err.message, &err.detail, config);
    }
    advance(stage, ActionStage::ContentSwapped);

    run_hooks(pre_reveal).await.map_err(RenderError::PreReveal)?;

    advance(stage, ActionStage::MathRendering);
    if let Err(err) = typeset(target, typesetter).await {
        debug!(target_id = %target.id(), %err, "typesetting failed");
        show_error(target, "MathJax", &err.message, &err.detail, config);
    }

    advance(stage, ActionStage::AwaitingImages);
    if timeout(config.image_wait, target.images_settled()).await.is_err() {
        trace!(target_id = %target.id(), "images still loading, revealing anyway");
    }

    advance(stage, ActionStage::FadingIn);
    target.fade_to(1.0, fade).await;
    advance(stage, ActionStage::Revealed);

    run_hooks(post_reveal).await.map_err(RenderError::PostReveal)
}

fn advance(stage: &Signal<ActionStage>, next: ActionStage) {
    trace!(stage = %next, "render action");
    stage.set(next);
}

/// Start every hook, then wait for all of them. The first error wins.
async fn run_hooks(hooks: Vec<Hook>) -> Result<(), HookError> {
    if hooks.is_empty() {
        return Ok(());
    }
    try_join_all(hooks.into_iter().map(|hook| hook())).await?;
    Ok(())
}

async fn typeset(
    target: &dyn RenderTarget,
    typesetter: &dyn Typesetter,
) -> Result<(), TypesetError> {
    typesetter.ready().await?;
    typesetter.clear(target);
    typesetter.typeset(target).await
}

fn show_error(
    target: &dyn RenderTarget,
    kind: &str,
    message: &str,
    detail: &str,
    config: &RevealConfig,
) {
    let block = render_error(kind, message, detail, config.max_error_len);
    if let Err(err) = target.set_content(&block) {
        debug!(target_id = %target.id(), %err, "error block rejected by target");
    }
}
