//! Chat conversation controller.
//!
//! Owns the request/response cycle of one chat session: accepts user text,
//! builds the provider request, awaits the completion and folds the outcome
//! back into the transcript.
//!
//! ```text
//! Idle --submit(non-blank)--> Pending --provider settles--> Idle
//!                              |   |
//!                              |   +--submit future dropped--> Idle (interrupted)
//!                              +--submit(..)--> ignored
//! ```

use std::sync::{Mutex, MutexGuard, PoisonError};

use llm::{ChatMessage, ChatModel, ChatRequest, ProviderError, ProviderResult};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::error::ChatError;
use crate::persona::{GREETING, PersonaPrimer};
use crate::store::ConversationStore;
use crate::turn::DisplayTurn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    /// A provider call is in flight.
    Pending,
}

/// Why a submission was dropped without touching the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    Blank,
    Busy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Ignored(IgnoreReason),
    Answered(DisplayTurn),
    Failed { error: ChatError, notice: DisplayTurn },
}

/// What the widget needs to draw its chrome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatStatus {
    pub phase: Phase,
    pub error: Option<String>,
    pub turns: usize,
    pub open: bool,
}

#[derive(Debug)]
struct ChatState {
    store: ConversationStore,
    phase: Phase,
    primer_sent: bool,
    error: Option<String>,
    open: bool,
}

impl ChatState {
    fn fail(&mut self, error: &ChatError) -> DisplayTurn {
        self.error = Some(error.user_message());
        self.store.append_notice(error.notice())
    }
}

/// Settles a round as interrupted if the `submit` future is dropped while
/// the provider call is in flight.
struct PendingGuard<'a> {
    state: &'a Mutex<ChatState>,
    armed: bool,
}

impl<'a> PendingGuard<'a> {
    fn arm(state: &'a Mutex<ChatState>) -> Self {
        Self { state, armed: true }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.phase == Phase::Pending {
            warn!("submission dropped before the provider answered");
            state.phase = Phase::Idle;
            state.fail(&ChatError::Interrupted);
        }
    }
}

pub struct ChatController<M> {
    model: M,
    primer: PersonaPrimer,
    state: Mutex<ChatState>,
}

impl<M: ChatModel + Send + Sync> ChatController<M> {
    pub fn new(model: M, primer: PersonaPrimer, greeting: impl Into<String>) -> Self {
        Self {
            model,
            primer,
            state: Mutex::new(ChatState {
                store: ConversationStore::seeded(greeting),
                phase: Phase::Idle,
                primer_sent: false,
                error: None,
                open: false,
            }),
        }
    }

    /// Controller with the agency persona and greeting.
    pub fn with_agency_persona(model: M) -> Self {
        Self::new(model, PersonaPrimer::agency(), GREETING)
    }

    // The lock is never held across an await, so a poisoned state is still consistent.
    fn state(&self) -> MutexGuard<'_, ChatState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Send one user message and wait for the answer.
    ///
    /// Blank input and calls made while another one is pending are ignored.
    /// Provider failures never escape: they become an inline notice and the
    /// banner error. Dropping the returned future mid-call settles the round
    /// as `ChatError::Interrupted`.
    pub async fn submit(&self, user_text: &str) -> SubmitOutcome {
        let request = match self.begin(user_text) {
            Ok(request) => request,
            Err(reason) => {
                debug!(?reason, "submission ignored");
                return SubmitOutcome::Ignored(reason);
            }
        };

        info!(messages = request.len(), "sending conversation to provider");
        let guard = PendingGuard::arm(&self.state);
        let result = self.model.chat(&request).await;
        guard.disarm();
        self.settle(result)
    }

    fn begin(&self, user_text: &str) -> Result<ChatRequest, IgnoreReason> {
        let mut state = self.state();
        if user_text.trim().is_empty() {
            return Err(IgnoreReason::Blank);
        }
        if state.phase == Phase::Pending {
            return Err(IgnoreReason::Busy);
        }

        state.store.append_user(user_text);
        state.phase = Phase::Pending;
        state.error = None;

        let mut messages = Vec::with_capacity(state.store.provider_len() + 2);
        if !state.primer_sent {
            debug!("prepending persona primer");
            messages.extend(self.primer.messages());
            state.primer_sent = true;
        }
        messages.extend(state.store.provider_turns().iter().cloned());

        Ok(ChatRequest::new(messages))
    }

    fn settle(&self, result: ProviderResult<ChatMessage>) -> SubmitOutcome {
        let mut state = self.state();
        state.phase = Phase::Idle;

        let result = result.and_then(|message| {
            if message.content.trim().is_empty() {
                Err(ProviderError::Empty)
            } else {
                Ok(message)
            }
        });

        match result {
            Ok(message) => {
                state.error = None;
                let turn = state.store.append_assistant(message.content);
                info!(turn = %turn.id, "assistant answered");
                SubmitOutcome::Answered(turn)
            }
            Err(err) => {
                let error = ChatError::classify(&err);
                warn!(error = %err, "completion failed");
                let notice = state.fail(&error);
                SubmitOutcome::Failed { error, notice }
            }
        }
    }

    pub fn phase(&self) -> Phase {
        self.state().phase
    }

    pub fn is_pending(&self) -> bool {
        self.phase() == Phase::Pending
    }

    /// Banner-level error of the last round, if it failed.
    pub fn error(&self) -> Option<String> {
        self.state().error.clone()
    }

    pub fn clear_error(&self) {
        self.state().error = None;
    }

    pub fn primer_sent(&self) -> bool {
        self.state().primer_sent
    }

    pub fn snapshot(&self) -> Vec<DisplayTurn> {
        self.state().store.snapshot()
    }

    pub fn provider_snapshot(&self) -> Vec<ChatMessage> {
        self.state().store.provider_snapshot()
    }

    pub fn len(&self) -> usize {
        self.state().store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state().store.is_empty()
    }

    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<DisplayTurn> {
        self.state().store.subscribe()
    }

    pub fn status(&self) -> ChatStatus {
        let state = self.state();
        ChatStatus {
            phase: state.phase,
            error: state.error.clone(),
            turns: state.store.len(),
            open: state.open,
        }
    }

    pub fn open(&self) {
        self.state().open = true;
    }

    pub fn close(&self) {
        self.state().open = false;
    }

    /// Flip the panel; returns whether it is now open.
    pub fn toggle(&self) -> bool {
        let mut state = self.state();
        state.open = !state.open;
        state.open
    }

    pub fn is_open(&self) -> bool {
        self.state().open
    }

    pub fn model(&self) -> &M {
        &self.model
    }
}
