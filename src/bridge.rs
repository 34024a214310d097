//! Host Bridge - One-way commands from the card UI to the host application.
//!
//! Commands travel as plain strings (`"ans"`, `"ease3"`,
//! `"browserSearch: deck:current"`). Sending is fire-and-forget: there is no
//! reply and a host that went away only shows up in the logs.

use std::fmt;
use std::str::FromStr;

use tokio::sync::mpsc;
use tracing::debug;

use crate::error::BridgeError;

/// A command understood by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeCommand {
    /// Reveal the answer (`ans`).
    ShowAnswer,
    /// Open the editor on the current card (`edit`).
    Edit,
    /// Open the context menu (`more`).
    More,
    /// Answer the card with the given ease (`ease1`..`ease4`).
    Ease(u8),
    /// Replay a sound tag (`play:q:0`).
    Play(String),
    /// Open the browser with a search (`browserSearch: <query>`).
    BrowserSearch(String),
    /// Anything else, passed through untouched.
    Other(String),
}

impl fmt::Display for BridgeCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BridgeCommand::ShowAnswer => f.write_str("ans"),
            BridgeCommand::Edit => f.write_str("edit"),
            BridgeCommand::More => f.write_str("more"),
            BridgeCommand::Ease(ease) => write!(f, "ease{ease}"),
            BridgeCommand::Play(tag) => write!(f, "play:{tag}"),
            BridgeCommand::BrowserSearch(query) => write!(f, "browserSearch: {query}"),
            BridgeCommand::Other(raw) => f.write_str(raw),
        }
    }
}

impl FromStr for BridgeCommand {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(BridgeError::Empty);
        }
        let command = match s {
            "ans" => BridgeCommand::ShowAnswer,
            "edit" => BridgeCommand::Edit,
            "more" => BridgeCommand::More,
            _ => {
                if let Some(ease) = s.strip_prefix("ease") {
                    let ease = ease
                        .parse::<u8>()
                        .ok()
                        .filter(|e| (1..=4).contains(e))
                        .ok_or_else(|| BridgeError::InvalidEase(s.to_string()))?;
                    BridgeCommand::Ease(ease)
                } else if let Some(tag) = s.strip_prefix("play:") {
                    BridgeCommand::Play(tag.to_string())
                } else if let Some(query) = s.strip_prefix("browserSearch:") {
                    BridgeCommand::BrowserSearch(query.trim_start().to_string())
                } else {
                    BridgeCommand::Other(s.to_string())
                }
            }
        };
        Ok(command)
    }
}

/// Sink for commands sent to the host.
pub trait HostBridge {
    fn send(&self, command: BridgeCommand);

    /// Open the host's card browser with `query`.
    fn browser_search(&self, query: &str) {
        self.send(BridgeCommand::BrowserSearch(query.to_string()));
    }
}

/// Bridge that forwards wire strings over a channel to the host loop.
#[derive(Debug, Clone)]
pub struct ChannelBridge {
    sender: mpsc::UnboundedSender<String>,
}

impl ChannelBridge {
    /// Create a bridge and the receiving end the host reads from.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl HostBridge for ChannelBridge {
    fn send(&self, command: BridgeCommand) {
        let wire = command.to_string();
        if self.sender.send(wire).is_err() {
            debug!(%command, "host bridge closed, command dropped");
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
