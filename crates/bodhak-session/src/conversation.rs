//! Chat history for one session.

use bodhak_ai::{ChatReply, ChatResponder};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::error::SessionError;

/// One question and the reply it received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatExchange {
    pub user_text: String,
    pub reply: ChatReply,
    pub asked_at: DateTime<Utc>,
}

/// Ordered chat history. Replies come from a [`ChatResponder`].
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    exchanges: Vec<ChatExchange>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `message` and append the exchange to the history.
    pub fn ask(
        &mut self,
        responder: &ChatResponder<'_>,
        message: &str,
        exam: Option<&str>,
    ) -> Result<&ChatExchange, SessionError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(SessionError::EmptyMessage);
        }

        let reply = responder.respond(message, exam);
        info!(kind = ?reply.kind, exam = exam.unwrap_or("-"), "chat reply");
        self.exchanges.push(ChatExchange {
            user_text: message.to_string(),
            reply,
            asked_at: Utc::now(),
        });
        Ok(&self.exchanges[self.exchanges.len() - 1])
    }

    pub fn history(&self) -> &[ChatExchange] {
        &self.exchanges
    }

    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }

    /// Forget every exchange and return the greeting shown in its place.
    pub fn clear(&mut self, exam: Option<&str>) -> String {
        self.exchanges.clear();
        greeting(exam)
    }
}

/// Opening line of a fresh conversation.
pub fn greeting(exam: Option<&str>) -> String {
    format!(
        "Chat cleared! How can I help you with your {} preparation?",
        exam.unwrap_or("exam")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use bodhak_ai::ReplyKind;
    use bodhak_core::Catalog;

    #[test]
    fn ask_appends_in_order() {
        let responder = ChatResponder::new(Catalog::builtin());
        let mut chat = Conversation::new();

        chat.ask(&responder, "mitosis?", Some("NEET")).unwrap();
        let second = chat.ask(&responder, "  hello  ", None).unwrap();
        assert_eq!(second.user_text, "hello");
        assert_eq!(second.reply.kind, ReplyKind::Generic);

        let kinds: Vec<_> = chat.history().iter().map(|e| e.reply.kind).collect();
        assert_eq!(kinds, vec![ReplyKind::Canned(0), ReplyKind::Generic]);
    }

    #[test]
    fn blank_message_is_refused() {
        let responder = ChatResponder::new(Catalog::builtin());
        let mut chat = Conversation::new();
        assert_eq!(
            chat.ask(&responder, "   ", None).unwrap_err(),
            SessionError::EmptyMessage
        );
        assert!(chat.is_empty());
    }

    #[test]
    fn clear_resets_history() {
        let responder = ChatResponder::new(Catalog::builtin());
        let mut chat = Conversation::new();
        chat.ask(&responder, "photoelectric", None).unwrap();

        let greeting = chat.clear(Some("JEE"));
        assert_eq!(
            greeting,
            "Chat cleared! How can I help you with your JEE preparation?"
        );
        assert!(chat.is_empty());
        assert!(chat.clear(None).ends_with("your exam preparation?"));
    }
}
