//! Reactive helpers on top of spark-signals.
//!
//! - [`use_async_reactive`] - Derive `value`/`error`/`loading` signals from an
//!   async producer that re-runs when its dependencies change
//! - [`Dependency`] - A watched upstream input (signal or getter)

mod async_binding;
mod dependency;

pub use async_binding::{use_async_reactive, AsyncBinding};
pub use dependency::Dependency;
