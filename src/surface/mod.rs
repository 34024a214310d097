//! Render Surface - What the render queue draws on.
//!
//! The queue never touches a concrete view directly. It talks to two
//! collaborators:
//!
//! - [`RenderTarget`] - the element whose content one queue owns (fades,
//!   content swaps, image readiness)
//! - [`Typesetter`] - the external math typesetting engine
//!
//! [`CardView`] is the in-memory target used by the reviewer: its content,
//! opacity, scroll and image states are signals, so any renderer can observe
//! it with an effect.

pub mod animate;
mod card_view;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::{ContentError, TypesetError};

pub use card_view::CardView;

/// The element a render queue exclusively manages.
#[async_trait(?Send)]
pub trait RenderTarget {
    /// Identifier used in logs.
    fn id(&self) -> &str;

    /// Animate opacity from its current value to `opacity`.
    async fn fade_to(&self, opacity: f32, duration: Duration);

    /// Replace the content of the target.
    fn set_content(&self, html: &str) -> Result<(), ContentError>;

    /// Resolve once every image in the target has loaded or failed.
    async fn images_settled(&self);
}

/// External typesetting engine (math rendering).
#[async_trait(?Send)]
pub trait Typesetter {
    /// Resolve when the engine has finished starting up.
    async fn ready(&self) -> Result<(), TypesetError>;

    /// Forget output produced for the previous content of `target`.
    fn clear(&self, target: &dyn RenderTarget);

    /// Typeset the current content of `target`.
    async fn typeset(&self, target: &dyn RenderTarget) -> Result<(), TypesetError>;
}

/// Typesetter for targets that never contain math.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTypesetter;

#[async_trait(?Send)]
impl Typesetter for NoTypesetter {
    async fn ready(&self) -> Result<(), TypesetError> {
        Ok(())
    }

    fn clear(&self, _target: &dyn RenderTarget) {}

    async fn typeset(&self, _target: &dyn RenderTarget) -> Result<(), TypesetError> {
        Ok(())
    }
}
