//! Core types for card-reveal.
//!
//! These types flow through the reactive state of a card view and the render
//! queue. They are small, `Clone + PartialEq` values so they can live inside
//! signals.

use std::fmt;

// =============================================================================
// Card Side
// =============================================================================

/// Which side of the card is currently revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardSide {
    Question,
    Answer,
}

impl fmt::Display for CardSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardSide::Question => f.write_str("question"),
            CardSide::Answer => f.write_str("answer"),
        }
    }
}

// =============================================================================
// Flag
// =============================================================================

/// User flag drawn in the corner of the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Flag {
    #[default]
    None,
    Red,
    Orange,
    Green,
    Blue,
    Pink,
    Turquoise,
    Purple,
}

impl Flag {
    /// Flag from its stored number. Unknown numbers clear the flag.
    pub fn from_number(n: u8) -> Self {
        match n {
            1 => Flag::Red,
            2 => Flag::Orange,
            3 => Flag::Green,
            4 => Flag::Blue,
            5 => Flag::Pink,
            6 => Flag::Turquoise,
            7 => Flag::Purple,
            _ => Flag::None,
        }
    }

    pub fn number(self) -> u8 {
        self as u8
    }

    /// CSS class of the flag indicator, `None` when hidden.
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            Flag::None => None,
            Flag::Red => Some("flag1"),
            Flag::Orange => Some("flag2"),
            Flag::Green => Some("flag3"),
            Flag::Blue => Some("flag4"),
            Flag::Pink => Some("flag5"),
            Flag::Turquoise => Some("flag6"),
            Flag::Purple => Some("flag7"),
        }
    }
}

// =============================================================================
// Images
// =============================================================================

/// Load state of an image element inside a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageState {
    Loading,
    Loaded,
    Failed,
}

impl ImageState {
    /// Loaded and failed images are treated the same: both are settled.
    pub fn is_settled(self) -> bool {
        !matches!(self, ImageState::Loading)
    }
}

// =============================================================================
// Scroll
// =============================================================================

/// Where the card view is scrolled to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ScrollPosition {
    #[default]
    Top,
    /// Scrolled so the element with this id is in view.
    Anchor(String),
}

// =============================================================================
// Body Classes (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Environment classes applied to the card body alongside `card cardN`.
    ///
    /// Combine with bitwise OR: `BodyFlags::NIGHT_MODE | BodyFlags::MAC`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct BodyFlags: u8 {
        const NONE = 0;
        const NIGHT_MODE = 1 << 0;
        const MAC = 1 << 1;
        const WIN = 1 << 2;
        const LINUX = 1 << 3;
    }
}

/// Body class string for a card template ordinal (0-based).
///
/// ```
/// use card_reveal::{body_classes_for_card_ord, BodyFlags};
///
/// assert_eq!(body_classes_for_card_ord(0, BodyFlags::NONE), "card card1");
/// assert_eq!(
///     body_classes_for_card_ord(2, BodyFlags::NIGHT_MODE),
///     "card card3 nightMode night_mode"
/// );
/// ```
pub fn body_classes_for_card_ord(ord: u16, flags: BodyFlags) -> String {
    let mut classes = vec!["card".to_string(), format!("card{}", u32::from(ord) + 1)];
    if flags.contains(BodyFlags::NIGHT_MODE) {
        classes.push("nightMode".into());
        classes.push("night_mode".into());
    }
    if flags.contains(BodyFlags::MAC) {
        classes.push("isMac".into());
    }
    if flags.contains(BodyFlags::WIN) {
        classes.push("isWin".into());
    }
    if flags.contains(BodyFlags::LINUX) {
        classes.push("isLin".into());
    }
    classes.join(" ")
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_numbers() {
        for n in 0..=7 {
            assert_eq!(Flag::from_number(n).number(), n);
        }
        assert_eq!(Flag::from_number(42), Flag::None);
        assert_eq!(Flag::None.css_class(), None);
        assert_eq!(Flag::Purple.css_class(), Some("flag7"));
    }

    #[test]
    fn test_image_settled() {
        assert!(!ImageState::Loading.is_settled());
        assert!(ImageState::Loaded.is_settled());
        assert!(ImageState::Failed.is_settled());
    }

    #[test]
    fn test_body_classes_platforms() {
        let classes = body_classes_for_card_ord(1, BodyFlags::NIGHT_MODE | BodyFlags::LINUX);
        assert_eq!(classes, "card card2 nightMode night_mode isLin");
    }
}
