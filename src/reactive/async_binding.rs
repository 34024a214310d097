//! Async Binding - Promise-backed reactive state.
//!
//! Bridges an async producer into three signals: `value`, `error` and
//! `loading`. The producer is re-run every time a watched dependency changes.
//!
//! # Lifecycle
//!
//! ```text
//! dependency change → fetch() → pending = Some(id), loading = true, error = None
//!                                   └─ settles → value or error, loading = false
//! ```
//!
//! The watcher subscribes while the binding is built, so the first fetch is
//! dispatched from the constructor. There is no separate eager fetch for an
//! initial value: until something is pending, `value`/`error` are `None` and
//! `loading` is `true`.
//!
//! # Ordering
//!
//! A superseded future is not cancelled and carries no generation check.
//! If it settles after a newer one was dispatched it still writes `value`,
//! `error` and `loading`. Callers that need latest-wins must compare their
//! own sequence numbers.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::future::Future;
use std::rc::Rc;

use spark_signals::{effect, signal, untrack, Signal};
use tokio::task::spawn_local;
use tracing::trace;

use super::Dependency;

/// Identifies one dispatched fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DispatchId(u64);

/// Reactive view over the latest dispatched fetch.
///
/// Dropping the binding (or calling [`AsyncBinding::dispose`]) stops watching
/// the dependencies. Futures already dispatched still settle into the signals.
pub struct AsyncBinding<T, E>
where
    T: Clone + PartialEq + 'static,
    E: Clone + PartialEq + 'static,
{
    value: Signal<Option<T>>,
    error: Signal<Option<E>>,
    loading: Signal<bool>,
    pending: Signal<Option<DispatchId>>,
    stop: RefCell<Option<Box<dyn FnOnce()>>>,
}

impl<T, E> AsyncBinding<T, E>
where
    T: Clone + PartialEq + 'static,
    E: Clone + PartialEq + 'static,
{
    /// Last fulfilled result.
    pub fn value(&self) -> Option<T> {
        self.value.get()
    }

    /// Last rejection reason, cleared whenever a new fetch is dispatched.
    pub fn error(&self) -> Option<E> {
        self.error.get()
    }

    pub fn loading(&self) -> bool {
        self.loading.get()
    }

    /// Signal for reactive tracking of the value.
    pub fn value_signal(&self) -> Signal<Option<T>> {
        self.value.clone()
    }

    pub fn error_signal(&self) -> Signal<Option<E>> {
        self.error.clone()
    }

    pub fn loading_signal(&self) -> Signal<bool> {
        self.loading.clone()
    }

    /// Whether any fetch has been dispatched yet.
    pub fn has_dispatched(&self) -> bool {
        self.pending.get().is_some()
    }

    /// Stop watching dependencies. Safe to call more than once.
    pub fn dispose(&self) {
        if let Some(stop) = self.stop.borrow_mut().take() {
            stop();
        }
    }
}

impl<T, E> Drop for AsyncBinding<T, E>
where
    T: Clone + PartialEq + 'static,
    E: Clone + PartialEq + 'static,
{
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<T, E> fmt::Debug for AsyncBinding<T, E>
where
    T: Clone + PartialEq + fmt::Debug + 'static,
    E: Clone + PartialEq + fmt::Debug + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncBinding")
            .field("value", &self.value.get())
            .field("error", &self.error.get())
            .field("loading", &self.loading.get())
            .finish()
    }
}

/// Bind an async producer to reactive dependencies.
///
/// `fetch` runs inside the watching effect, once when the binding is built
/// and again on every change of any dependency. A panic in `fetch` itself is
/// a bug and propagates; only errors returned by the future land in
/// `error`.
///
/// Settlement runs on the current [`tokio::task::LocalSet`]; calling this
/// outside one panics.
///
/// # Panics
///
/// If `deps` is empty.
///
/// # Example
///
/// ```ignore
/// let deck = signal(1i64);
/// let deck_for_fetch = deck.clone();
/// let stats = use_async_reactive(
///     move || load_graph_data(deck_for_fetch.get()),
///     vec![Dependency::from(&deck)],
/// );
///
/// deck.set(2); // stats.loading() is true until the new data arrives
/// ```
pub fn use_async_reactive<T, E, F, Fut>(fetch: F, deps: Vec<Dependency>) -> AsyncBinding<T, E>
where
    T: Clone + PartialEq + 'static,
    E: Clone + PartialEq + 'static,
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = Result<T, E>> + 'static,
{
    assert!(
        !deps.is_empty(),
        "use_async_reactive needs at least one dependency"
    );

    let value: Signal<Option<T>> = signal(None);
    let error: Signal<Option<E>> = signal(None);
    let loading = signal(true);
    let pending: Signal<Option<DispatchId>> = signal(None);

    let slots = Slots {
        value: value.clone(),
        error: error.clone(),
        loading: loading.clone(),
        pending: pending.clone(),
    };
    let next_id = Rc::new(Cell::new(0u64));

    let stop = effect(move || {
        for dep in &deps {
            dep.track();
        }

        // Only `deps` are watched. Reads inside `fetch` must not subscribe.
        let future = untrack(&fetch);
        let id = DispatchId(next_id.get());
        next_id.set(id.0 + 1);
        slots.dispatch(id, future);
    });

    AsyncBinding {
        value,
        error,
        loading,
        pending,
        stop: RefCell::new(Some(Box::new(stop))),
    }
}

/// Signals written by dispatched futures.
struct Slots<T, E>
where
    T: Clone + PartialEq + 'static,
    E: Clone + PartialEq + 'static,
{
    value: Signal<Option<T>>,
    error: Signal<Option<E>>,
    loading: Signal<bool>,
    pending: Signal<Option<DispatchId>>,
}

impl<T, E> Slots<T, E>
where
    T: Clone + PartialEq + 'static,
    E: Clone + PartialEq + 'static,
{
    fn dispatch<Fut>(&self, id: DispatchId, future: Fut)
    where
        Fut: Future<Output = Result<T, E>> + 'static,
    {
        self.pending.set(Some(id));
        self.loading.set(true);
        self.error.set(None);
        trace!(dispatch = id.0, "async binding dispatched");

        let value = self.value.clone();
        let error = self.error.clone();
        let loading = self.loading.clone();
        spawn_local(async move {
            match future.await {
                Ok(result) => value.set(Some(result)),
                Err(reason) => error.set(Some(reason)),
            };
            loading.set(false);
            trace!(dispatch = id.0, "async binding settled");
        });
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::task::{yield_now, LocalSet};
    use tokio::time::sleep;

    async fn settle() {
        sleep(Duration::from_millis(1)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_counter_doubles() {
        LocalSet::new()
            .run_until(async {
                let counter = signal(0i32);
                let counter_for_fetch = counter.clone();
                let binding = use_async_reactive(
                    move || {
                        let d = counter_for_fetch.get();
                        async move {
                            yield_now().await;
                            Ok::<i32, String>(d * 2)
                        }
                    },
                    vec![Dependency::from(&counter)],
                );

                assert!(binding.loading());
                assert_eq!(binding.value(), None);

                settle().await;
                assert!(!binding.loading());
                assert_eq!(binding.value(), Some(0));

                counter.set(1);
                assert!(binding.loading());
                assert_eq!(binding.value(), Some(0));

                settle().await;
                assert!(!binding.loading());
                assert_eq!(binding.value(), Some(2));
                assert_eq!(binding.error(), None);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_startup_fetch() {
        LocalSet::new()
            .run_until(async {
                let calls = Rc::new(Cell::new(0));
                let calls_for_fetch = calls.clone();
                let dep = signal(0u8);
                let binding = use_async_reactive(
                    move || {
                        calls_for_fetch.set(calls_for_fetch.get() + 1);
                        async { Ok::<u8, String>(7) }
                    },
                    vec![Dependency::from(&dep)],
                );

                assert_eq!(calls.get(), 1);
                assert!(binding.has_dispatched());
                settle().await;
                assert_eq!(calls.get(), 1);
                assert_eq!(binding.value(), Some(7));
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_is_reset_on_new_dispatch() {
        LocalSet::new()
            .run_until(async {
                let dep = signal(1i32);
                let dep_for_fetch = dep.clone();
                let binding = use_async_reactive(
                    move || {
                        let d = dep_for_fetch.get();
                        async move {
                            sleep(Duration::from_millis(5)).await;
                            if d % 2 == 1 {
                                Err(format!("odd input {d}"))
                            } else {
                                Ok(d)
                            }
                        }
                    },
                    vec![Dependency::from(&dep)],
                );

                sleep(Duration::from_millis(10)).await;
                assert_eq!(binding.error(), Some("odd input 1".to_string()));
                assert!(!binding.loading());

                dep.set(2);
                assert_eq!(binding.error(), None);
                assert!(binding.loading());

                sleep(Duration::from_millis(10)).await;
                assert_eq!(binding.value(), Some(2));
                assert_eq!(binding.error(), None);
                assert!(!binding.loading());
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_result_still_applies() {
        LocalSet::new()
            .run_until(async {
                let dep = signal(0u64);
                let dep_for_fetch = dep.clone();
                let binding = use_async_reactive(
                    move || {
                        let d = dep_for_fetch.get();
                        // First fetch is slow, later ones are fast.
                        let delay = if d == 0 { 50 } else { 10 };
                        async move {
                            sleep(Duration::from_millis(delay)).await;
                            Ok::<u64, String>(d)
                        }
                    },
                    vec![Dependency::from(&dep)],
                );

                dep.set(1);
                sleep(Duration::from_millis(20)).await;
                assert_eq!(binding.value(), Some(1));
                assert!(!binding.loading());

                sleep(Duration::from_millis(40)).await;
                assert_eq!(binding.value(), Some(0));
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_settle_clears_loading() {
        LocalSet::new()
            .run_until(async {
                let dep = signal(0u64);
                let dep_for_fetch = dep.clone();
                let binding = use_async_reactive(
                    move || {
                        let d = dep_for_fetch.get();
                        let delay = if d == 0 { 10 } else { 50 };
                        async move {
                            sleep(Duration::from_millis(delay)).await;
                            Ok::<u64, String>(d)
                        }
                    },
                    vec![Dependency::from(&dep)],
                );

                dep.set(1);
                sleep(Duration::from_millis(20)).await;
                // The first future settled while the second is still running.
                assert!(!binding.loading());
                assert_eq!(binding.value(), Some(0));

                sleep(Duration::from_millis(40)).await;
                assert_eq!(binding.value(), Some(1));
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_any_dependency_triggers() {
        LocalSet::new()
            .run_until(async {
                let a = signal(1i32);
                let b = signal(10i32);
                let (a2, b2) = (a.clone(), b.clone());
                let binding = use_async_reactive(
                    move || {
                        let sum = a2.get() + b2.get();
                        async move { Ok::<i32, String>(sum) }
                    },
                    vec![Dependency::from(&a), Dependency::from(&b)],
                );

                settle().await;
                assert_eq!(binding.value(), Some(11));

                b.set(20);
                settle().await;
                assert_eq!(binding.value(), Some(21));

                a.set(5);
                settle().await;
                assert_eq!(binding.value(), Some(25));
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_reads_inside_fetch_are_not_watched() {
        LocalSet::new()
            .run_until(async {
                let calls = Rc::new(Cell::new(0));
                let calls_for_fetch = calls.clone();
                let watched = signal(1i32);
                let scale = signal(100i32);
                let (watched2, scale2) = (watched.clone(), scale.clone());
                let binding = use_async_reactive(
                    move || {
                        calls_for_fetch.set(calls_for_fetch.get() + 1);
                        let result = watched2.get() * scale2.get();
                        async move { Ok::<i32, String>(result) }
                    },
                    vec![Dependency::from(&watched)],
                );

                settle().await;
                assert_eq!(calls.get(), 1);
                assert_eq!(binding.value(), Some(100));

                scale.set(200);
                settle().await;
                assert_eq!(calls.get(), 1);
                assert_eq!(binding.value(), Some(100));

                watched.set(2);
                settle().await;
                assert_eq!(calls.get(), 2);
                assert_eq!(binding.value(), Some(400));
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispose_stops_watching() {
        LocalSet::new()
            .run_until(async {
                let calls = Rc::new(Cell::new(0));
                let calls_for_fetch = calls.clone();
                let dep = signal(0i32);
                let binding = use_async_reactive(
                    move || {
                        calls_for_fetch.set(calls_for_fetch.get() + 1);
                        async { Ok::<(), String>(()) }
                    },
                    vec![Dependency::from(&dep)],
                );

                binding.dispose();
                dep.set(1);
                dep.set(2);
                assert_eq!(calls.get(), 1);
                binding.dispose();
            })
            .await;
    }

    #[test]
    #[should_panic(expected = "at least one dependency")]
    fn test_empty_dependencies_panic() {
        let _binding = use_async_reactive(|| async { Ok::<(), String>(()) }, Vec::new());
    }
}
