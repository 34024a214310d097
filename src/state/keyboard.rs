//! Keyboard Module - Keyboard event model
//!
//! The reviewer reacts to a handful of keys (reveal, ease buttons, editing).
//! Events arrive in this model regardless of where they came from; see
//! [`super::input`] for the crossterm conversion.
//!
//! The last event is kept in a signal so UI code can react to it.

use spark_signals::{signal, Signal};

// =============================================================================
// TYPES
// =============================================================================

/// Keyboard modifier state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Create empty modifiers
    pub fn none() -> Self {
        Self::default()
    }

    /// Create modifiers with ctrl
    pub fn ctrl() -> Self {
        Self { ctrl: true, ..Self::default() }
    }

    /// Create modifiers with shift
    pub fn shift() -> Self {
        Self { shift: true, ..Self::default() }
    }

    /// Any of ctrl, alt or meta held. Shift alone does not count.
    pub fn has_command(&self) -> bool {
        self.ctrl || self.alt || self.meta
    }
}

/// Key event state (press, repeat, release)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyState {
    #[default]
    Press,
    Repeat,
    Release,
}

/// Keyboard event
#[derive(Clone, Debug, PartialEq)]
pub struct KeyboardEvent {
    /// The key that was pressed (e.g., "a", "Enter", " ")
    pub key: String,
    /// Modifier keys state
    pub modifiers: Modifiers,
    /// Press/repeat/release state
    pub state: KeyState,
}

impl KeyboardEvent {
    /// Create a simple key press event
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            modifiers: Modifiers::default(),
            state: KeyState::Press,
        }
    }

    /// Create a key press with modifiers
    pub fn with_modifiers(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
            state: KeyState::Press,
        }
    }

    /// Check if this is a press event
    pub fn is_press(&self) -> bool {
        self.state == KeyState::Press
    }

    /// Enter or Return, pressed without command modifiers.
    pub fn is_plain_enter(&self) -> bool {
        self.is_press() && self.key == "Enter" && !self.modifiers.has_command()
    }
}

// =============================================================================
// STATE
// =============================================================================

/// Last keyboard event seen by one consumer.
#[derive(Clone)]
pub struct KeyTracker {
    last: Signal<Option<KeyboardEvent>>,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self { last: signal(None) }
    }

    pub fn record(&self, event: &KeyboardEvent) {
        self.last.set(Some(event.clone()));
    }

    /// Get the last keyboard event
    pub fn last_event(&self) -> Option<KeyboardEvent> {
        self.last.get()
    }

    /// Get the last key pressed
    pub fn last_key(&self) -> String {
        self.last_event().map(|e| e.key).unwrap_or_default()
    }

    pub fn last_event_signal(&self) -> Signal<Option<KeyboardEvent>> {
        self.last.clone()
    }
}

impl Default for KeyTracker {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TESTS
// =============================================================================
