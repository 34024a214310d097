//! Reviewer - Question/answer presentation on a card view.
//!
//! Wires a [`CardView`] to its [`RenderQueue`] and the host bridge:
//!
//! - [`Reviewer::show_question`] / [`Reviewer::show_answer`] queue card
//!   updates with the hooks each side needs
//! - [`Reviewer::draw_flag`] / [`Reviewer::draw_mark`] update the corner
//!   indicators immediately, outside the queue
//! - [`Reviewer::handle_key`] turns key presses into host commands
//!
//! # Example
//!
//! ```ignore
//! let (bridge, mut host) = ChannelBridge::channel();
//! let reviewer = Reviewer::new(
//!     "qa",
//!     Rc::new(NoTypesetter),
//!     Rc::new(bridge),
//!     RevealConfig::default(),
//! );
//!
//! let _ = reviewer.show_question("<b>Front</b>", body_classes_for_card_ord(0, BodyFlags::NONE));
//! reviewer.handle_key(&KeyboardEvent::new(" "));
//! assert_eq!(host.recv().await.as_deref(), Some("ans"));
//! ```

mod shortcuts;

use std::rc::Rc;

use spark_signals::{signal, Signal};
use tracing::debug;

use crate::bridge::HostBridge;
use crate::config::RevealConfig;
use crate::pipeline::{hook, CardRenderState, RenderQueue, RenderTicket};
use crate::state::{KeyTracker, KeyboardEvent};
use crate::surface::{CardView, Typesetter};
use crate::types::{CardSide, Flag};

pub use shortcuts::{command_for, default_ease, DEFAULT_ANSWER_BUTTONS};

/// Element id the answer side scrolls to.
pub const ANSWER_ANCHOR: &str = "answer";

pub struct Reviewer {
    view: CardView,
    queue: RenderQueue,
    bridge: Rc<dyn HostBridge>,
    config: RevealConfig,
    side: Signal<Option<CardSide>>,
    flag: Signal<Flag>,
    marked: Signal<bool>,
    answer_buttons: Signal<u8>,
    keys: KeyTracker,
}

impl Reviewer {
    /// Builds the card view `view_id` from `config` and its render queue.
    ///
    /// Must be called inside a [`tokio::task::LocalSet`].
    pub fn new(
        view_id: impl Into<String>,
        typesetter: Rc<dyn Typesetter>,
        bridge: Rc<dyn HostBridge>,
        config: RevealConfig,
    ) -> Self {
        let view = CardView::from_config(view_id, &config);
        let queue = RenderQueue::new(Rc::new(view.clone()), typesetter, config);
        Self {
            view,
            queue,
            bridge,
            config,
            side: signal(None),
            flag: signal(Flag::None),
            marked: signal(false),
            answer_buttons: signal(DEFAULT_ANSWER_BUTTONS),
            keys: KeyTracker::new(),
        }
    }

    // =========================================================================
    // Card sides
    // =========================================================================

    /// Queue the question side.
    ///
    /// Before the reveal the body classes are applied and the view scrolls to
    /// the top. After it, the type-answer box (if any) takes focus.
    pub fn show_question(
        &self,
        html: impl Into<String>,
        body_class: impl Into<String>,
    ) -> RenderTicket {
        self.side.set(Some(CardSide::Question));

        let before = self.view.clone();
        let classes = body_class.into();
        let after = self.view.clone();
        let state = CardRenderState::new(html)
            .with_fade(self.config.fade)
            .pre_reveal(hook(move || {
                before.set_body_class(classes);
                before.scroll_to_top();
                Ok(())
            }))
            .post_reveal(hook(move || {
                after.focus_type_answer();
                Ok(())
            }));

        let ticket = self.queue.enqueue(state);
        debug!(seq = ticket.seq(), "question queued");
        ticket
    }

    /// Queue the answer side.
    ///
    /// Body classes are only replaced when given. After the reveal the view
    /// scrolls to the answer anchor when the card has one.
    pub fn show_answer(&self, html: impl Into<String>, body_class: Option<String>) -> RenderTicket {
        self.side.set(Some(CardSide::Answer));

        let mut state = CardRenderState::new(html).with_fade(self.config.fade);
        if let Some(classes) = body_class {
            let view = self.view.clone();
            state = state.pre_reveal(hook(move || {
                view.set_body_class(classes);
                Ok(())
            }));
        }
        let view = self.view.clone();
        state = state.post_reveal(hook(move || {
            view.scroll_to_anchor(ANSWER_ANCHOR);
            Ok(())
        }));

        let ticket = self.queue.enqueue(state);
        debug!(seq = ticket.seq(), "answer queued");
        ticket
    }

    pub fn side(&self) -> Option<CardSide> {
        self.side.get()
    }

    pub fn side_signal(&self) -> Signal<Option<CardSide>> {
        self.side.clone()
    }

    // =========================================================================
    // Indicators
    // =========================================================================

    pub fn draw_flag(&self, flag: Flag) {
        self.flag.set(flag);
    }

    pub fn draw_mark(&self, marked: bool) {
        self.marked.set(marked);
    }

    pub fn flag(&self) -> Flag {
        self.flag.get()
    }

    pub fn marked(&self) -> bool {
        self.marked.get()
    }

    pub fn flag_signal(&self) -> Signal<Flag> {
        self.flag.clone()
    }

    pub fn marked_signal(&self) -> Signal<bool> {
        self.marked.clone()
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Handle a key press. Returns true if it was turned into a host command.
    pub fn handle_key(&self, event: &KeyboardEvent) -> bool {
        self.keys.record(event);

        let typing = self.view.type_answer_focused();
        match command_for(event, self.side.get(), typing, self.answer_buttons.get()) {
            Some(command) => {
                debug!(%command, key = %event.key, "shortcut");
                self.bridge.send(command);
                true
            }
            None => false,
        }
    }

    /// Number of answer buttons on the current card, 2 to 4.
    pub fn set_answer_buttons(&self, count: u8) {
        self.answer_buttons.set(count.clamp(2, 4));
    }

    pub fn answer_buttons(&self) -> u8 {
        self.answer_buttons.get()
    }

    pub fn last_key(&self) -> String {
        self.keys.last_key()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn view(&self) -> &CardView {
        &self.view
    }

    pub fn queue(&self) -> &RenderQueue {
        &self.queue
    }

    pub fn bridge(&self) -> &dyn HostBridge {
        self.bridge.as_ref()
    }
}

// =============================================================================
// TESTS
// =============================================================================
