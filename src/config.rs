//! Reveal timing configuration.

use std::time::Duration;

/// Default fade duration for each half of a card swap.
pub const DEFAULT_FADE: Duration = Duration::from_millis(100);

/// Upper bound on waiting for card images before fading in.
pub const IMAGE_WAIT: Duration = Duration::from_millis(100);

/// Error messages and details shown on a card are cut to this many characters.
pub const MAX_ERROR_LEN: usize = 2000;

/// Frame rate of opacity animations.
pub const DEFAULT_FPS: u8 = 60;

/// Timing knobs for a render queue and the card view it drives.
///
/// The queue reads `image_wait` and `max_error_len`, reviewers take `fade` for
/// every card, and [`CardView::from_config`](crate::surface::CardView::from_config)
/// animates at `fps`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealConfig {
    /// Fade duration used when a render state does not set its own.
    pub fade: Duration,
    /// How long an action waits for images before fading in anyway.
    pub image_wait: Duration,
    /// Truncation length for error text rendered on the card.
    pub max_error_len: usize,
    /// Opacity animation frame rate. 0 jumps straight to the end value.
    pub fps: u8,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            fade: DEFAULT_FADE,
            image_wait: IMAGE_WAIT,
            max_error_len: MAX_ERROR_LEN,
            fps: DEFAULT_FPS,
        }
    }
}

impl RevealConfig {
    /// Configuration for software rendering, where fades are disabled.
    pub fn software() -> Self {
        Self {
            fade: Duration::ZERO,
            ..Self::default()
        }
    }

    pub fn with_fade(mut self, fade: Duration) -> Self {
        self.fade = fade;
        self
    }

    pub fn with_fps(mut self, fps: u8) -> Self {
        self.fps = fps;
        self
    }
}
