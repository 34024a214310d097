//! State Module - Input state for the reviewer
//!
//! - **Keyboard** - Event types and last-event tracking
//! - **Input** - crossterm key event conversion

mod input;
mod keyboard;

pub use input::convert_key_event;
pub use keyboard::*;
