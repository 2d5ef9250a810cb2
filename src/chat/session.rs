use std::cell::{Cell, RefCell};

use serde_json::json;
use thiserror::Error;
use tracing::warn;

use crate::api::models::ChatReply;
use crate::api::transport::{Request, Transport};
use crate::chat::transcript::{Speaker, Turn};

/// Reply recorded in place of the assistant's answer when a round trip fails.
pub const FALLBACK_REPLY: &str =
    "An error occurred while processing your message. Please try again.";

#[derive(Debug, Error)]
pub enum ChatError {
    /// A chat round trip is already outstanding; the input was discarded.
    #[error("a chat request is already in flight")]
    Busy,
    /// The round trip failed; the fallback reply has been appended.
    #[error("chat request failed: {0}")]
    TransportFailed(String),
}

/// One conversation against the backend: an append-only transcript, the
/// latest token-usage summary, and at most one request in flight.
///
/// State is interior-mutable so `send` takes `&self`; an overlapping call in
/// the same cooperative scheduler observes `pending` and fails fast.
pub struct ChatSession<T> {
    transport: T,
    transcript: RefCell<Vec<Turn>>,
    token_info: RefCell<Option<String>>,
    pending: Cell<bool>,
    next_seq: Cell<u64>,
}

impl<T: Transport> ChatSession<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            transcript: RefCell::new(Vec::new()),
            token_info: RefCell::new(None),
            pending: Cell::new(false),
            next_seq: Cell::new(0),
        }
    }

    /// Submits one user utterance and resolves it into transcript entries.
    ///
    /// Blank input (after trimming) is a no-op, not an error. The user turn
    /// is appended before the network call, so it survives any failure; the
    /// round trip then appends exactly one assistant turn, either the
    /// backend's reply or [`FALLBACK_REPLY`].
    pub async fn send(&self, input: &str) -> Result<(), ChatError> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(());
        }
        if self.pending.get() {
            return Err(ChatError::Busy);
        }

        self.append(Speaker::User, input.to_owned());
        self.pending.set(true);

        let request = Request::post_json("/chat", json!({ "input": input }));
        let outcome = match self.transport.dispatch(request).await {
            Ok(body) => self.accept_reply(&body),
            Err(err) => Err(ChatError::TransportFailed(err.to_string())),
        };
        if let Err(err) = &outcome {
            warn!("chat round trip failed: {err}");
            self.append(Speaker::Assistant, FALLBACK_REPLY.to_owned());
        }
        self.pending.set(false);
        outcome
    }

    fn accept_reply(&self, body: &str) -> Result<(), ChatError> {
        let reply: ChatReply = serde_json::from_str(body)
            .map_err(|err| ChatError::TransportFailed(format!("undecodable chat reply: {err}")))?;
        self.append(Speaker::Assistant, reply.response);
        *self.token_info.borrow_mut() = Some(reply.token_info);
        Ok(())
    }

    fn append(&self, speaker: Speaker, content: String) {
        let seq = self.next_seq.get();
        self.next_seq.set(seq + 1);
        self.transcript.borrow_mut().push(Turn {
            speaker,
            content,
            seq,
        });
    }

    /// Snapshot of the transcript in append order.
    pub fn transcript(&self) -> Vec<Turn> {
        self.transcript.borrow().clone()
    }

    /// The backend's latest token-usage summary, if any reply carried one.
    pub fn token_info(&self) -> Option<String> {
        self.token_info.borrow().clone()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }

    /// Content of the most recent assistant turn.
    pub fn last_reply(&self) -> Option<String> {
        self.transcript
            .borrow()
            .iter()
            .rev()
            .find(|t| t.speaker == Speaker::Assistant)
            .map(|t| t.content.clone())
    }
}
