//! Render Queue - Strictly ordered card updates per target.
//!
//! One worker task per target drains a FIFO of actions. An action starts only
//! after the previous one has finished, whether it succeeded or failed, so a
//! broken hook never blocks the cards after it. A panicking action is caught
//! and reported as [`RenderError::Panicked`]; the worker keeps draining.

use std::any::Any;
use std::cell::Cell;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{ready, Context, Poll};

use futures::FutureExt;
use spark_signals::{signal, Signal};
use tokio::sync::{mpsc, oneshot};
use tokio::task::spawn_local;
use tracing::{debug, debug_span, warn, Instrument};

use super::action::run_action;
use super::state::{ActionStage, CardRenderState};
use crate::config::RevealConfig;
use crate::error::RenderError;
use crate::surface::{RenderTarget, Typesetter};

struct QueuedAction {
    seq: u64,
    state: CardRenderState,
    done: oneshot::Sender<Result<(), RenderError>>,
}

/// Outcome of an enqueued action.
///
/// Awaiting is optional: dropping the ticket does not cancel the action.
#[must_use = "drop the ticket explicitly if the outcome does not matter"]
pub struct RenderTicket {
    seq: u64,
    outcome: oneshot::Receiver<Result<(), RenderError>>,
}

impl RenderTicket {
    /// Position of the action in its queue, starting at 0.
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

impl Future for RenderTicket {
    type Output = Result<(), RenderError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match ready!(Pin::new(&mut self.outcome).poll(cx)) {
            Ok(outcome) => Poll::Ready(outcome),
            Err(_) => Poll::Ready(Err(RenderError::QueueClosed)),
        }
    }
}

/// FIFO of render actions for one target.
///
/// Must be created inside a [`tokio::task::LocalSet`]. Dropping the queue
/// lets already enqueued actions finish, then the worker exits.
pub struct RenderQueue {
    target_id: String,
    sender: mpsc::UnboundedSender<QueuedAction>,
    next_seq: Cell<u64>,
    queued: Rc<Cell<usize>>,
    stage: Signal<ActionStage>,
}

impl RenderQueue {
    pub fn new(
        target: Rc<dyn RenderTarget>,
        typesetter: Rc<dyn Typesetter>,
        config: RevealConfig,
    ) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let queued = Rc::new(Cell::new(0));
        let stage = signal(ActionStage::Done);
        let target_id = target.id().to_string();

        let worker = Worker {
            target,
            typesetter,
            config,
            queued: queued.clone(),
            stage: stage.clone(),
        };
        spawn_local(worker.drain(receiver));

        Self {
            target_id,
            sender,
            next_seq: Cell::new(0),
            queued,
            stage,
        }
    }

    /// Append an action and return immediately.
    pub fn enqueue(&self, state: CardRenderState) -> RenderTicket {
        let seq = self.next_seq.get();
        self.next_seq.set(seq + 1);

        let (done, outcome) = oneshot::channel();
        let action = QueuedAction { seq, state, done };
        match self.sender.send(action) {
            Ok(()) => self.queued.set(self.queued.get() + 1),
            // The receiver is gone, the ticket resolves to QueueClosed.
            Err(_) => warn!(target_id = %self.target_id, seq, "render queue worker is gone"),
        }
        RenderTicket { seq, outcome }
    }

    /// Actions enqueued but not finished, including the running one.
    pub fn len(&self) -> usize {
        self.queued.get()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stage of the running action, `Done` when idle.
    pub fn stage(&self) -> ActionStage {
        self.stage.get()
    }

    pub fn stage_signal(&self) -> Signal<ActionStage> {
        self.stage.clone()
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }
}

struct Worker {
    target: Rc<dyn RenderTarget>,
    typesetter: Rc<dyn Typesetter>,
    config: RevealConfig,
    queued: Rc<Cell<usize>>,
    stage: Signal<ActionStage>,
}

impl Worker {
    async fn drain(self, mut receiver: mpsc::UnboundedReceiver<QueuedAction>) {
        while let Some(QueuedAction { seq, state, done }) = receiver.recv().await {
            self.stage.set(ActionStage::Queued);

            let span = debug_span!("render_action", target_id = %self.target.id(), seq);
            let action = run_action(
                &*self.target,
                &*self.typesetter,
                &self.config,
                state,
                &self.stage,
            )
            .instrument(span);
            let outcome = match AssertUnwindSafe(action).catch_unwind().await {
                Ok(outcome) => outcome,
                Err(payload) => Err(RenderError::Panicked(panic_message(payload.as_ref()))),
            };

            self.stage.set(ActionStage::Done);
            self.queued.set(self.queued.get().saturating_sub(1));
            if let Err(err) = &outcome {
                warn!(target_id = %self.target.id(), seq, %err, "render action failed");
            }
            // Nobody may be waiting on the ticket.
            let _ = done.send(outcome);
        }
        debug!(target_id = %self.target.id(), "render queue closed");
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        String::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
