use thiserror::Error;
use tokio::sync::mpsc;

use super::models::Transcript;
use crate::openai::{Message, Role, completion, completion_stream};

/// The system message prepended to every request. It is not stored in
/// the transcript: the backend sees it as the zeroth message of every
/// request, followed by the full history.
pub const PERSONA: &str = "You are a helpful assistant.";

/// Failure surfaced when the chat backend cannot produce a reply. The
/// cause (auth, network, rate limit, malformed response) is opaque to
/// the caller and nothing is retried.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("chat backend request failed: {0}")]
    Backend(#[source] anyhow::Error),
}

/// The core abstraction around interacting with an LLM in a chat
/// completion style using an OpenAI compatible API.
///
/// Owns the conversation transcript for one session and runs one
/// request/response turn at a time:
/// - the user message is appended before the request goes out
/// - every request replays the full history, prefixed by the persona
///   system message
/// - the assistant reply is appended only after the backend succeeds
///
/// Use `Chat::builder()` to construct a valid `Chat`.
pub struct Chat {
    api_hostname: String,
    api_key: String,
    model: String,
    tx: Option<mpsc::UnboundedSender<String>>,
    transcript: Transcript,
}

impl Chat {
    pub fn builder(api_hostname: &str, api_key: &str, model: &str) -> ChatBuilder {
        ChatBuilder::new(api_hostname, api_key, model)
    }

    /// Run one request/response turn for `text`.
    ///
    /// Blank input (empty after trimming) is a no-op: nothing is
    /// appended, no request is made, and `Ok(None)` is returned. This
    /// is the only input validation rule.
    ///
    /// On success the transcript has grown by exactly two messages,
    /// user then assistant, and the full reply text is returned. When
    /// a streaming sender is registered, reply fragments are delivered
    /// on it while the request is in flight.
    ///
    /// On a backend failure the user message stays in the transcript
    /// with no assistant message after it. The next call starts a
    /// fresh cycle; the failed message is not resubmitted.
    pub async fn send(&mut self, text: &str) -> Result<Option<String>, ChatError> {
        if text.trim().is_empty() {
            return Ok(None);
        }

        self.transcript.push(Message::new(Role::User, text));

        let mut context = Vec::with_capacity(self.transcript.len() + 1);
        context.push(Message::new(Role::System, PERSONA));
        context.extend(self.transcript.iter().cloned());

        let result = if let Some(tx) = &self.tx {
            completion_stream(
                tx.clone(),
                &context,
                &self.api_hostname,
                &self.api_key,
                &self.model,
            )
            .await
        } else {
            completion(&context, &self.api_hostname, &self.api_key, &self.model).await
        };

        let reply = result.map_err(ChatError::Backend)?;
        self.transcript.push(Message::new(Role::Assistant, &reply));

        Ok(Some(reply))
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }
}

#[derive(Default)]
pub struct ChatBuilder {
    api_hostname: String,
    api_key: String,
    model: String,
    tx: Option<mpsc::UnboundedSender<String>>,
    transcript: Transcript,
}

impl ChatBuilder {
    pub fn new(api_hostname: &str, api_key: &str, model: &str) -> Self {
        Self {
            api_hostname: api_hostname.to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            tx: None,
            transcript: Transcript::new(),
        }
    }

    /// Seed the chat with an existing transcript so the next turn
    /// replays it.
    pub fn transcript(mut self, messages: Vec<Message>) -> Self {
        self.transcript = Transcript::new_with_messages(messages);
        self
    }

    /// Deliver reply fragments on `transmitter` while a request is in
    /// flight.
    pub fn streaming(mut self, transmitter: mpsc::UnboundedSender<String>) -> Self {
        self.tx = Some(transmitter);
        self
    }

    pub fn build(self) -> Chat {
        Chat {
            api_hostname: self.api_hostname,
            api_key: self.api_key,
            model: self.model,
            tx: self.tx,
            transcript: self.transcript,
        }
    }
}
