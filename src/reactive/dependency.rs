//! Watched inputs of an async binding.

use std::rc::Rc;

use spark_signals::Signal;

/// An upstream reactive input.
///
/// Tracking a dependency reads it inside the binding's effect, which is what
/// subscribes the effect to it. Build one from a signal, or from a getter that
/// reads whatever it needs.
///
/// ```ignore
/// let deck = signal(1i64);
/// let search = signal(String::new());
/// let deps = vec![Dependency::from(&deck), Dependency::getter(move || { search.get(); })];
/// ```
#[derive(Clone)]
pub struct Dependency(Rc<dyn Fn()>);

impl Dependency {
    /// Getter dependency (every signal it reads is watched).
    pub fn getter<F>(read: F) -> Self
    where
        F: Fn() + 'static,
    {
        Self(Rc::new(read))
    }

    pub(crate) fn track(&self) {
        (self.0)();
    }
}

impl<T: Clone + PartialEq + 'static> From<Signal<T>> for Dependency {
    fn from(signal: Signal<T>) -> Self {
        Self::getter(move || {
            let _ = signal.get();
        })
    }
}

impl<T: Clone + PartialEq + 'static> From<&Signal<T>> for Dependency {
    fn from(signal: &Signal<T>) -> Self {
        Self::from(signal.clone())
    }
}
