//! The core models for managing a stateful chat with an LLM.
use crate::openai::Message;

/// The ordered, append-only log of messages for one chat session.
///
/// Insertion order is conversational order and is exactly the context
/// that gets replayed to the LLM on every turn. Messages are never
/// edited, reordered, or removed once appended. The persona system
/// message is not part of the transcript; it is prepended to each
/// request by the turn protocol.
#[derive(Default, Clone, Debug)]
pub struct Transcript(Vec<Message>);

impl Transcript {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn new_with_messages(messages: Vec<Message>) -> Self {
        Self(messages)
    }

    /// Append a message to the end of the transcript.
    pub fn push(&mut self, msg: Message) {
        self.0.push(msg)
    }

    /// The full message sequence, front-to-back.
    pub fn messages(&self) -> Vec<Message> {
        self.0.clone()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openai::Role;

    #[test]
    fn test_transcript_starts_empty() {
        let transcript = Transcript::new();
        assert!(transcript.is_empty());
        assert_eq!(transcript.len(), 0);
        assert!(transcript.messages().is_empty());
    }

    #[test]
    fn test_push_preserves_order() {
        let mut transcript = Transcript::new();
        transcript.push(Message::new(Role::User, "first"));
        transcript.push(Message::new(Role::Assistant, "second"));
        transcript.push(Message::new(Role::User, "third"));

        let messages = transcript.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].content, "first");
        assert_eq!(messages[1].content, "second");
        assert_eq!(messages[2].content, "third");
    }

    #[test]
    fn test_push_leaves_prior_messages_untouched() {
        let mut transcript = Transcript::new();
        transcript.push(Message::new(Role::User, "original"));
        let before = transcript.messages();

        transcript.push(Message::new(Role::Assistant, "new"));

        assert_eq!(transcript.messages()[..1], before[..]);
    }

    #[test]
    fn test_new_with_messages_seeds_history() {
        let seed = vec![
            Message::new(Role::User, "Hello"),
            Message::new(Role::Assistant, "Hi there"),
        ];
        let transcript = Transcript::new_with_messages(seed.clone());
        assert_eq!(transcript.messages(), seed);
    }
}
