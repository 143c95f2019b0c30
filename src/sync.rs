//! Session and message synchronization.
//!
//! [`SyncController`] is the only writer of [`ChatState`]. Every user intent
//! (switch, new chat, send, delete) goes through it, talks to the backend and
//! reconciles local state with the answer. Remote failures never escape: each
//! call site degrades to an empty list, the current list, or an error-flagged
//! assistant message.
//!
//! State transitions run on a single-threaded event loop. Requests are never
//! cancelled; a history fetch that resolves after the user moved on is
//! detected with a generation counter and dropped.

use crate::api::ChatBackend;
use crate::types::{ChatMessage, Session};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const SEND_FAILED_TEXT: &str = "Sorry, I couldn't reach the server. Please try again.";

/// Sessions in sidebar order (most recent first, as the backend sends them).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionStore {
    sessions: Vec<Session>,
}

impl SessionStore {
    pub fn replace(&mut self, sessions: Vec<Session>) {
        self.sessions = sessions;
    }

    pub fn as_slice(&self) -> &[Session] {
        &self.sessions
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Session> {
        self.sessions.iter().find(|session| session.id == id)
    }

    /// The session with the latest `lastModified`; the earliest entry wins ties.
    pub fn most_recent(&self) -> Option<&Session> {
        self.sessions
            .iter()
            .fold(None, |best: Option<&Session>, session| match best {
                Some(best) if best.last_modified >= session.last_modified => Some(best),
                _ => Some(session),
            })
    }

    pub fn rename(&mut self, id: &str, title: &str) -> bool {
        match self.sessions.iter_mut().find(|session| session.id == id) {
            Some(session) => {
                session.title = title.to_string();
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.sessions.len();
        self.sessions.retain(|session| session.id != id);
        self.sessions.len() != before
    }
}

/// Messages of the active session in display order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MessageStore {
    messages: Vec<ChatMessage>,
}

impl MessageStore {
    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn replace(&mut self, messages: Vec<ChatMessage>) {
        self.messages = messages;
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn as_slice(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChatState {
    pub sessions: SessionStore,
    pub messages: MessageStore,
    pub active: Option<String>,
    pub input: String,
    pub loading: bool,
    /// Bumped whenever the displayed conversation changes identity.
    generation: u64,
}

impl ChatState {
    pub fn active_session(&self) -> Option<&Session> {
        self.active.as_deref().and_then(|id| self.sessions.get(id))
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active.as_deref() == Some(id)
    }

    fn begin_view(&mut self, active: Option<String>) -> u64 {
        self.active = active;
        self.generation += 1;
        self.messages.clear();
        self.generation
    }

    fn is_current(&self, id: Option<&str>, generation: u64) -> bool {
        self.generation == generation && self.active.as_deref() == id
    }
}

/// A send whose optimistic half has been applied.
#[derive(Debug)]
pub struct PendingSend {
    text: String,
    session_id: Option<String>,
    generation: u64,
}

type Observer = Rc<dyn Fn(&ChatState)>;

/// Orchestrates backend calls and owns every mutation of [`ChatState`].
#[derive(Clone)]
pub struct SyncController {
    backend: Arc<dyn ChatBackend>,
    state: Rc<RefCell<ChatState>>,
    observer: Option<Observer>,
}

impl SyncController {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self {
            backend,
            state: Rc::new(RefCell::new(ChatState::default())),
            observer: None,
        }
    }

    /// Called with the new state after every transition.
    pub fn with_observer(mut self, observer: impl Fn(&ChatState) + 'static) -> Self {
        self.observer = Some(Rc::new(observer));
        self
    }

    pub fn state(&self) -> ChatState {
        self.state.borrow().clone()
    }

    pub fn set_input(&self, text: impl Into<String>) {
        let text = text.into();
        self.update(|state| state.input = text);
    }

    /// Startup: show the most recent session, or start a fresh one.
    pub async fn load_initial(&self) {
        let sessions = self.fetch_sessions().await.unwrap_or_default();
        self.update(|state| state.sessions.replace(sessions));

        let most_recent = self
            .state
            .borrow()
            .sessions
            .most_recent()
            .map(|session| session.id.clone());
        match most_recent {
            Some(id) => self.switch_session(&id).await,
            None => self.new_chat().await,
        }
    }

    pub async fn new_chat(&self) {
        let generation = self.state.borrow().generation;
        let id = match self.backend.new_chat().await {
            Ok(id) => id,
            Err(err) => {
                warn!(%err, "failed to create session");
                return;
            }
        };
        info!(session_id = %id, "created session");
        self.update(|state| {
            if state.generation == generation {
                state.begin_view(Some(id));
                state.input.clear();
            } else {
                debug!(session_id = %id, "view changed while creating session; not switching");
            }
        });
        self.refresh_sessions().await;
    }

    pub async fn switch_session(&self, id: &str) {
        let generation = self.update(|state| state.begin_view(Some(id.to_string())));
        let history = self.fetch_history(id).await;

        let current = self.state.borrow().is_current(Some(id), generation);
        if current {
            self.update(|state| state.messages.replace(history));
        } else {
            debug!(session_id = %id, "discarding stale history");
        }
    }

    pub async fn send_message(&self, text: &str) {
        if let Some(pending) = self.begin_send(text) {
            self.complete_send(pending).await;
        }
    }

    /// The synchronous half of a send: optimistic user message, cleared
    /// input and the loading flag. Returns `None` for blank text or while
    /// another send is still in flight.
    pub fn begin_send(&self, text: &str) -> Option<PendingSend> {
        let text = text.trim();
        if text.is_empty() || self.state.borrow().loading {
            return None;
        }
        let (session_id, generation) = self.update(|state| {
            state.messages.push(ChatMessage::user(text));
            state.input.clear();
            state.loading = true;
            (state.active.clone(), state.generation)
        });
        Some(PendingSend {
            text: text.to_string(),
            session_id,
            generation,
        })
    }

    /// Post a send started with [`begin_send`](Self::begin_send) and
    /// reconcile the reply.
    pub async fn complete_send(&self, pending: PendingSend) {
        let PendingSend {
            text,
            mut session_id,
            generation,
        } = pending;

        if session_id.is_none() {
            match self.backend.new_chat().await {
                Ok(id) => {
                    info!(session_id = %id, "created session for first message");
                    self.update(|state| {
                        if state.is_current(None, generation) {
                            state.active = Some(id.clone());
                        }
                    });
                    session_id = Some(id);
                }
                // The backend creates a session itself when none is given.
                Err(err) => warn!(%err, "failed to create session before sending"),
            }
        }

        match self.backend.send_chat(&text, session_id.as_deref()).await {
            Ok(reply) => {
                let target = session_id.or(reply.session_id);
                self.update(|state| {
                    if state.is_current(None, generation) {
                        state.active = target.clone();
                    }
                    if let (Some(id), Some(title)) = (&target, &reply.new_title) {
                        state.sessions.rename(id, title);
                    }
                    if state.is_current(target.as_deref(), generation) {
                        state.messages.push(ChatMessage::assistant(reply.response));
                    } else {
                        debug!("reply arrived for a conversation no longer displayed");
                    }
                    state.loading = false;
                });
                self.refresh_sessions().await;
            }
            Err(err) => {
                warn!(%err, "chat request failed");
                self.update(|state| {
                    if state.generation == generation {
                        state.messages.push(ChatMessage::error(SEND_FAILED_TEXT));
                    }
                    state.loading = false;
                });
            }
        }
    }

    pub async fn delete_session(&self, id: &str) {
        if let Err(err) = self.backend.delete_session(id).await {
            warn!(session_id = %id, %err, "failed to delete session");
            return;
        }
        info!(session_id = %id, "deleted session");

        let was_active = self.update(|state| {
            state.sessions.remove(id);
            state.is_active(id)
        });
        self.refresh_sessions().await;
        if !was_active {
            return;
        }

        self.update(|state| {
            state.begin_view(None);
        });
        let next = self
            .state
            .borrow()
            .sessions
            .as_slice()
            .iter()
            .find(|session| session.id != id)
            .map(|session| session.id.clone());
        match next {
            Some(next) => self.switch_session(&next).await,
            None => self.new_chat().await,
        }
    }

    async fn fetch_sessions(&self) -> Option<Vec<Session>> {
        match self.backend.list_sessions().await {
            Ok(sessions) => Some(sessions),
            Err(err) => {
                warn!(%err, "failed to fetch sessions");
                None
            }
        }
    }

    /// Re-read the sidebar; on failure the current list stays.
    async fn refresh_sessions(&self) {
        if let Some(sessions) = self.fetch_sessions().await {
            debug!(count = sessions.len(), "refreshed sessions");
            self.update(|state| state.sessions.replace(sessions));
        }
    }

    async fn fetch_history(&self, id: &str) -> Vec<ChatMessage> {
        self.backend.chat_history(id).await.unwrap_or_else(|err| {
            warn!(session_id = %id, %err, "failed to fetch history");
            Vec::new()
        })
    }

    fn update<R>(&self, mutate: impl FnOnce(&mut ChatState) -> R) -> R {
        let result = mutate(&mut self.state.borrow_mut());
        if let Some(observer) = &self.observer {
            observer(&self.state.borrow());
        }
        result
    }
}
