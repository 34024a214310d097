//! Reviewer key shortcuts.

use crate::bridge::BridgeCommand;
use crate::state::KeyboardEvent;
use crate::types::CardSide;

/// Answer buttons shown when the host has not said otherwise.
pub const DEFAULT_ANSWER_BUTTONS: u8 = 4;

/// Ease sent when the answer is confirmed with Enter or space.
///
/// "Good" is the third of four buttons, the second of two or three.
pub fn default_ease(answer_buttons: u8) -> u8 {
    if answer_buttons == 4 { 3 } else { 2 }
}

/// Map a key press to the host command it triggers.
///
/// While the type-answer box has focus every key belongs to the box, except
/// Enter which reveals the answer. Ease keys above `answer_buttons` are
/// ignored.
pub fn command_for(
    event: &KeyboardEvent,
    side: Option<CardSide>,
    typing: bool,
    answer_buttons: u8,
) -> Option<BridgeCommand> {
    if !event.is_press() {
        return None;
    }
    if typing {
        return event.is_plain_enter().then_some(BridgeCommand::ShowAnswer);
    }
    if event.modifiers.has_command() {
        return None;
    }

    match (event.key.as_str(), side) {
        ("Enter" | " ", Some(CardSide::Question)) => Some(BridgeCommand::ShowAnswer),
        ("Enter" | " ", Some(CardSide::Answer)) => {
            Some(BridgeCommand::Ease(default_ease(answer_buttons)))
        }
        (key @ ("1" | "2" | "3" | "4"), Some(CardSide::Answer)) => key
            .parse::<u8>()
            .ok()
            .filter(|ease| *ease <= answer_buttons)
            .map(BridgeCommand::Ease),
        ("e", Some(_)) => Some(BridgeCommand::Edit),
        ("m", Some(_)) => Some(BridgeCommand::More),
        _ => None,
    }
}
