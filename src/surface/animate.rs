//! Opacity Animation - Frame-clocked fades
//!
//! Fades are linear tweens of an opacity signal, stepped on a tokio interval
//! at a fixed frame rate. Every frame writes the signal, so effects observing
//! the opacity redraw at that rate.
//!
//! # Pattern
//!
//! - Start from whatever the signal currently holds (a fade can begin mid-way)
//! - One write per frame, the last frame writes the exact end value
//! - Zero duration or 0 FPS writes the end value immediately
//!
//! # Example
//!
//! ```ignore
//! use card_reveal::surface::animate::fade;
//!
//! let opacity = signal(1.0f32);
//! fade(&opacity, 0.0, Duration::from_millis(100), 60).await;
//! assert_eq!(opacity.get(), 0.0);
//! ```

use std::time::Duration;

use spark_signals::Signal;
use tokio::time::{interval, MissedTickBehavior};

/// Length of one frame at `fps`.
pub fn frame_duration(fps: u8) -> Option<Duration> {
    if fps == 0 {
        return None;
    }
    Some(Duration::from_secs(1) / u32::from(fps))
}

/// Number of frames a fade of `duration` takes at `fps`, at least one.
pub fn frame_count(duration: Duration, fps: u8) -> u32 {
    match frame_duration(fps) {
        Some(frame) if !duration.is_zero() => {
            let frames = duration.as_nanos().div_ceil(frame.as_nanos());
            u32::try_from(frames).unwrap_or(u32::MAX).max(1)
        }
        _ => 1,
    }
}

/// Tween `opacity` to `to` over `duration`.
///
/// Resolves after the final frame has been written.
pub async fn fade(opacity: &Signal<f32>, to: f32, duration: Duration, fps: u8) {
    let from = opacity.get();
    let frame = match frame_duration(fps) {
        Some(frame) if !duration.is_zero() && from != to => frame,
        _ => {
            opacity.set(to);
            return;
        }
    };

    let frames = frame_count(duration, fps);
    let mut clock = interval(frame);
    clock.set_missed_tick_behavior(MissedTickBehavior::Skip);

    // The first tick completes immediately
    clock.tick().await;
    for step in 1..frames {
        clock.tick().await;
        let t = step as f32 / frames as f32;
        opacity.set(from + (to - from) * t);
    }
    clock.tick().await;
    opacity.set(to);
}

// =============================================================================
// TESTS
// =============================================================================
