//! Reveal Pipeline
//!
//! Serializes card updates on a render target.
//!
//! # Action Flow
//!
//! ```text
//! enqueue → fade out → swap content → pre-reveal hooks → typeset
//!         → images (≤ 100ms) → fade in → post-reveal hooks
//! ```
//!
//! ## Failure Isolation
//!
//! - **Content errors**: rendered on the card as `Invalid HTML on card: ...`
//! - **Typesetting errors**: rendered as `Invalid MathJax on card: ...`
//! - **Hook errors**: fail that action only; the next action still runs
//!
//! ## Key Design Principles
//!
//! - **One queue per target**: the queue is the only writer of its target
//! - **Failure-agnostic chaining**: each action waits for the previous one to
//!   settle, not to succeed
//! - **Explicit hooks**: hooks travel with each [`CardRenderState`], there is
//!   no shared hook registry

mod action;
pub mod error_block;
mod queue;
mod state;

pub use queue::{RenderQueue, RenderTicket};
pub use state::{async_hook, hook, ActionStage, CardRenderState, Hook, HookFuture};
