//! Transcript and in-flight state for a single chat session.
//!
//! [`ChatSession`] is the bookkeeping half of the chat controller: it decides
//! whether a submission is accepted, records messages, and folds an exchange
//! outcome back into the transcript. It performs no I/O; the caller sends the
//! [`ChatRequest`] returned by [`ChatSession::begin_submit`] and hands the
//! result to [`ChatSession::settle`].

use tracing::{debug, info, warn};

use crate::api::{ChatReply, ChatRequest};
use crate::core::chat_exchange::ExchangeError;
use crate::core::constants::FALLBACK_REPLY;
use crate::core::language::Language;
use crate::core::message::Message;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Pending,
}

#[derive(Debug, Clone)]
pub struct ChatSession {
    transcript: Vec<Message>,
    pending: bool,
    language: Language,
}

impl ChatSession {
    /// Session with an empty transcript.
    pub fn new(language: Language) -> Self {
        Self {
            transcript: Vec::new(),
            pending: false,
            language,
        }
    }

    /// Session whose transcript starts with the greeting for `language`.
    pub fn seeded(language: Language) -> Self {
        Self {
            transcript: vec![Message::assistant(language.greeting())],
            pending: false,
            language,
        }
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn phase(&self) -> SessionPhase {
        if self.pending {
            SessionPhase::Pending
        } else {
            SessionPhase::Idle
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.transcript.last()
    }

    /// Accepts a submission if the trimmed text is non-empty and nothing is in
    /// flight. Rejected submissions leave the session untouched.
    pub fn begin_submit(&mut self, text: &str, language: Language) -> Option<ChatRequest> {
        let trimmed = text.trim();
        if trimmed.is_empty() || self.pending {
            return None;
        }

        self.transcript.push(Message::user(trimmed));
        self.pending = true;
        debug!(language = %language, chars = trimmed.chars().count(), "chat submission accepted");

        Some(ChatRequest {
            message: trimmed.to_string(),
            language,
        })
    }

    /// Records the outcome of the in-flight exchange and returns to idle.
    ///
    /// Returns the appended assistant message, or `None` when no exchange was
    /// pending.
    pub fn settle(&mut self, outcome: Result<ChatReply, ExchangeError>) -> Option<&Message> {
        if !self.pending {
            debug!("ignoring exchange outcome with no pending submission");
            return None;
        }

        let content = match outcome {
            Ok(reply) => reply.response,
            Err(err) => {
                warn!(error = %err, "chat exchange failed");
                FALLBACK_REPLY.to_string()
            }
        };

        self.transcript.push(Message::assistant(content));
        self.pending = false;
        self.transcript.last()
    }

    /// Switches language and reseeds the transcript with its greeting.
    /// The in-flight flag is left as it is.
    pub fn change_language(&mut self, language: Language) {
        info!(from = %self.language, to = %language, "language changed; transcript reset");
        self.language = language;
        self.transcript.clear();
        self.transcript.push(Message::assistant(language.greeting()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::TranscriptRole;

    fn reply(text: &str) -> Result<ChatReply, ExchangeError> {
        Ok(ChatReply {
            response: text.to_string(),
        })
    }

    fn server_error() -> Result<ChatReply, ExchangeError> {
        Err(ExchangeError::Status {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            body: "{\"error\":\"boom\"}".to_string(),
        })
    }

    #[test]
    fn accepted_submit_records_trimmed_user_message() {
        let mut session = ChatSession::new(Language::En);
        let request = session
            .begin_submit("  How do I treat aphids?\n", Language::En)
            .expect("valid text should be accepted");

        assert_eq!(request.message, "How do I treat aphids?");
        assert_eq!(request.language, Language::En);
        assert_eq!(session.phase(), SessionPhase::Pending);
        assert_eq!(
            session.transcript(),
            &[Message::user("How do I treat aphids?")]
        );
    }

    #[test]
    fn whitespace_only_submit_is_ignored() {
        let mut session = ChatSession::seeded(Language::En);
        assert!(session.begin_submit(" \t\n ", Language::En).is_none());
        assert_eq!(session.transcript().len(), 1);
        assert!(!session.is_pending());
    }

    #[test]
    fn submit_while_pending_is_ignored() {
        let mut session = ChatSession::new(Language::En);
        session.begin_submit("first", Language::En).expect("accepted");

        assert!(session.begin_submit("second", Language::Hi).is_none());
        assert_eq!(session.transcript().len(), 1);
        assert!(session.is_pending());
    }

    #[test]
    fn success_appends_reply_and_returns_to_idle() {
        let mut session = ChatSession::new(Language::En);
        session
            .begin_submit("How do I treat aphids?", Language::En)
            .expect("accepted");

        let appended = session
            .settle(reply("Use neem oil spray."))
            .expect("an exchange was pending")
            .clone();

        assert_eq!(appended, Message::assistant("Use neem oil spray."));
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert_eq!(
            session.transcript(),
            &[
                Message::user("How do I treat aphids?"),
                Message::assistant("Use neem oil spray."),
            ]
        );
    }

    #[test]
    fn failure_appends_fallback_text() {
        let mut session = ChatSession::new(Language::Hi);
        session.begin_submit("मदद", Language::Hi).expect("accepted");
        session.settle(server_error());

        assert!(!session.is_pending());
        assert_eq!(session.transcript().len(), 2);
        let last = session.last_message().expect("fallback appended");
        assert_eq!(last.role, TranscriptRole::Assistant);
        assert_eq!(last.content, FALLBACK_REPLY);
    }

    #[test]
    fn stray_outcome_is_ignored_when_idle() {
        let mut session = ChatSession::seeded(Language::En);
        assert!(session.settle(reply("late")).is_none());
        assert_eq!(session.transcript().len(), 1);
    }

    #[test]
    fn change_language_reseeds_transcript() {
        let mut session = ChatSession::new(Language::En);
        session.begin_submit("hello", Language::En).expect("accepted");
        session.settle(reply("hi there"));

        session.change_language(Language::Hi);

        assert_eq!(session.language(), Language::Hi);
        assert_eq!(
            session.transcript(),
            &[Message::assistant(
                "नमस्ते! मैं आपका AI कृषि सहायक हूँ। आज मैं आपकी खेती की जरूरतों में कैसे मदद कर सकता हूँ?"
            )]
        );
    }

    #[test]
    fn change_language_keeps_pending_flag() {
        let mut session = ChatSession::new(Language::En);
        session.begin_submit("hello", Language::En).expect("accepted");

        session.change_language(Language::Hi);
        assert!(session.is_pending());

        session.settle(reply("उत्तर"));
        assert_eq!(
            session.transcript(),
            &[
                Message::assistant(Language::Hi.greeting()),
                Message::assistant("उत्तर"),
            ]
        );
    }
}
