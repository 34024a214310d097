//! # card-reveal
//!
//! Reactive card presentation core for flashcard reviewers.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! fine-grained reactivity and a current-thread tokio `LocalSet` for the async
//! side.
//!
//! ## Architecture
//!
//! Two pieces carry the ordering guarantees:
//!
//! - [`reactive::use_async_reactive`] turns an async producer into `value`,
//!   `error` and `loading` signals that follow their dependencies
//! - [`pipeline::RenderQueue`] runs card updates on one target strictly one
//!   after another
//!
//! ```text
//! show_question/show_answer → RenderQueue → fade out → swap → hooks → typeset
//!                                         → images → fade in → hooks
//! ```
//!
//! Everything runs on a single thread. Build bindings and queues inside a
//! [`tokio::task::LocalSet`].
//!
//! ## Modules
//!
//! - [`types`] - Card side, flags, image states, body classes
//! - [`reactive`] - Async reactive bindings
//! - [`pipeline`] - The per-target render queue
//! - [`surface`] - Render target and typesetter traits, the in-memory card view
//! - [`reviewer`] - Question/answer presentation and shortcuts
//! - [`bridge`] - One-way commands to the host application
//! - [`state`] - Keyboard event model

pub mod bridge;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod reactive;
pub mod reviewer;
pub mod state;
pub mod surface;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use bridge::{BridgeCommand, ChannelBridge, HostBridge};
pub use config::RevealConfig;
pub use error::{BridgeError, ContentError, HookError, RenderError, TypesetError};

pub use pipeline::{
    async_hook, hook, ActionStage, CardRenderState, Hook, RenderQueue, RenderTicket,
};

pub use reactive::{use_async_reactive, AsyncBinding, Dependency};

pub use reviewer::Reviewer;

pub use state::{convert_key_event, KeyState, KeyboardEvent, Modifiers};

pub use surface::{CardView, NoTypesetter, RenderTarget, Typesetter};
