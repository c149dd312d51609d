//! Chat session controller.
//!
//! [`ChatController`] pairs a [`ChatSession`] with the presentation-only
//! typing indicator and notifies a [`TranscriptView`] after every change. The
//! hosting front end calls [`ChatController::submit`],
//! [`ChatController::settle`] and [`ChatController::change_language`]
//! directly; the controller never draws anything itself.
//!
//! Event order for an accepted submission is always:
//! `MessageAppended(User)`, `TypingShown`, then once the exchange settles
//! `TypingHidden`, `MessageAppended(Assistant)`.

use crate::api::{ChatReply, ChatRequest};
use crate::core::chat_exchange::{ChatTransport, ExchangeError};
use crate::core::language::Language;
use crate::core::message::{Message, TranscriptRole};
use crate::core::session::ChatSession;

/// What changed since the previous render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    /// A message was appended; views should scroll to it.
    MessageAppended(TranscriptRole),
    TypingShown,
    TypingHidden,
    /// The transcript was replaced by a language greeting.
    TranscriptReset,
}

/// Read-only snapshot handed to the view alongside each event.
#[derive(Debug, Clone, Copy)]
pub struct ViewState<'a> {
    pub transcript: &'a [Message],
    pub typing: bool,
    pub pending: bool,
    pub language: Language,
}

/// Render callback supplied by the presentation layer.
pub trait TranscriptView {
    fn render(&mut self, event: ViewEvent, state: ViewState<'_>);
}

impl<F> TranscriptView for F
where
    F: FnMut(ViewEvent, ViewState<'_>),
{
    fn render(&mut self, event: ViewEvent, state: ViewState<'_>) {
        self(event, state)
    }
}

/// View that ignores every update.
#[derive(Debug, Default, Clone, Copy)]
pub struct DetachedView;

impl TranscriptView for DetachedView {
    fn render(&mut self, _event: ViewEvent, _state: ViewState<'_>) {}
}

pub struct ChatController<V> {
    session: ChatSession,
    typing: bool,
    view: V,
}

impl<V: TranscriptView> ChatController<V> {
    pub fn new(session: ChatSession, view: V) -> Self {
        Self {
            session,
            typing: false,
            view,
        }
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    pub fn transcript(&self) -> &[Message] {
        self.session.transcript()
    }

    pub fn is_pending(&self) -> bool {
        self.session.is_pending()
    }

    pub fn is_typing(&self) -> bool {
        self.typing
    }

    pub fn language(&self) -> Language {
        self.session.language()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Starts an exchange for `text`. Returns the request the caller must send,
    /// or `None` when the submission was dropped (blank text or already
    /// pending). Dropped submissions produce no events.
    pub fn submit(&mut self, text: &str, language: Language) -> Option<ChatRequest> {
        let request = self.session.begin_submit(text, language)?;
        self.notify(ViewEvent::MessageAppended(TranscriptRole::User));
        self.typing = true;
        self.notify(ViewEvent::TypingShown);
        Some(request)
    }

    /// Folds the exchange outcome into the transcript. The typing indicator is
    /// hidden before the assistant message is appended.
    pub fn settle(&mut self, outcome: Result<ChatReply, ExchangeError>) {
        if !self.session.is_pending() {
            return;
        }

        if self.typing {
            self.typing = false;
            self.notify(ViewEvent::TypingHidden);
        }

        if self.session.settle(outcome).is_some() {
            self.notify(ViewEvent::MessageAppended(TranscriptRole::Assistant));
        }
    }

    pub fn change_language(&mut self, language: Language) {
        self.session.change_language(language);
        self.notify(ViewEvent::TranscriptReset);
    }

    /// Submits and awaits the exchange in one step. Returns `false` when the
    /// submission was dropped.
    pub async fn exchange<T>(&mut self, text: &str, language: Language, transport: &T) -> bool
    where
        T: ChatTransport + ?Sized,
    {
        let Some(request) = self.submit(text, language) else {
            return false;
        };
        let outcome = transport.send(&request).await;
        self.settle(outcome);
        true
    }

    fn notify(&mut self, event: ViewEvent) {
        let state = ViewState {
            transcript: self.session.transcript(),
            typing: self.typing,
            pending: self.session.is_pending(),
            language: self.session.language(),
        };
        self.view.render(event, state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::chat_exchange::test_support::ScriptedTransport;
    use crate::core::constants::FALLBACK_REPLY;

    #[derive(Default)]
    struct RecordingView {
        events: Vec<ViewEvent>,
        typing_at_append: Vec<bool>,
        transcript_lengths: Vec<usize>,
    }

    impl TranscriptView for RecordingView {
        fn render(&mut self, event: ViewEvent, state: ViewState<'_>) {
            if let ViewEvent::MessageAppended(_) = event {
                self.typing_at_append.push(state.typing);
            }
            self.events.push(event);
            self.transcript_lengths.push(state.transcript.len());
        }
    }

    fn controller() -> ChatController<RecordingView> {
        ChatController::new(ChatSession::new(Language::En), RecordingView::default())
    }

    #[test]
    fn valid_submit_enters_pending_with_typing_indicator() {
        let mut chat = controller();

        let request = chat
            .submit("  How do I treat aphids?  ", Language::En)
            .expect("accepted");

        assert_eq!(request.message, "How do I treat aphids?");
        assert!(chat.is_pending());
        assert!(chat.is_typing());
        assert_eq!(chat.transcript(), &[Message::user("How do I treat aphids?")]);
        assert_eq!(
            chat.view().events,
            vec![
                ViewEvent::MessageAppended(TranscriptRole::User),
                ViewEvent::TypingShown,
            ]
        );
    }

    #[test]
    fn blank_submit_produces_no_events() {
        let mut chat = controller();

        assert!(chat.submit("   \n\t", Language::En).is_none());

        assert!(chat.transcript().is_empty());
        assert!(!chat.is_pending());
        assert!(chat.view().events.is_empty());
    }

    #[test]
    fn submit_while_pending_is_dropped() {
        let mut chat = controller();
        chat.submit("first", Language::En).expect("accepted");
        let events_before = chat.view().events.len();

        assert!(chat.submit("second", Language::En).is_none());

        assert_eq!(chat.transcript().len(), 1);
        assert!(chat.is_pending());
        assert_eq!(chat.view().events.len(), events_before);
    }

    #[test]
    fn typing_hidden_before_reply_is_appended() {
        let mut chat = controller();
        chat.submit("How do I treat aphids?", Language::En)
            .expect("accepted");

        chat.settle(Ok(ChatReply {
            response: "Use neem oil spray.".to_string(),
        }));

        assert_eq!(
            chat.view().events,
            vec![
                ViewEvent::MessageAppended(TranscriptRole::User),
                ViewEvent::TypingShown,
                ViewEvent::TypingHidden,
                ViewEvent::MessageAppended(TranscriptRole::Assistant),
            ]
        );
        assert_eq!(chat.view().typing_at_append, vec![false, false]);
        assert_eq!(chat.view().transcript_lengths, vec![1, 1, 1, 2]);
        assert!(!chat.is_pending());
        assert!(!chat.is_typing());
    }

    #[test]
    fn failed_exchange_appends_fallback() {
        let mut chat = controller();
        chat.submit("How do I treat aphids?", Language::En)
            .expect("accepted");

        chat.settle(Err(ExchangeError::Malformed(
            serde_json::from_str::<ChatReply>("not json").expect_err("invalid json"),
        )));

        assert!(!chat.is_pending());
        assert!(!chat.is_typing());
        assert_eq!(
            chat.transcript(),
            &[
                Message::user("How do I treat aphids?"),
                Message::assistant(FALLBACK_REPLY),
            ]
        );
    }

    #[tokio::test]
    async fn aphid_scenario_round_trip() {
        let transport = ScriptedTransport::replying("Use neem oil spray.");
        let mut chat = controller();

        let accepted = chat
            .exchange("How do I treat aphids?", Language::En, &transport)
            .await;

        assert!(accepted);
        assert!(!chat.is_pending());
        assert_eq!(
            chat.transcript(),
            &[
                Message::user("How do I treat aphids?"),
                Message::assistant("Use neem oil spray."),
            ]
        );
        let sent = transport.sent.lock().expect("sent lock");
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].language, Language::En);
    }

    #[tokio::test]
    async fn failing_transport_yields_fallback() {
        let transport = ScriptedTransport::failing();
        let mut chat = controller();

        chat.exchange("hello", Language::En, &transport).await;

        assert_eq!(
            chat.transcript().last(),
            Some(&Message::assistant(FALLBACK_REPLY))
        );
        assert!(!chat.is_pending());
    }

    #[tokio::test]
    async fn blank_exchange_never_reaches_transport() {
        let transport = ScriptedTransport::default();
        let mut chat = controller();

        assert!(!chat.exchange("   ", Language::En, &transport).await);
        assert!(transport.sent.lock().expect("sent lock").is_empty());
    }

    #[test]
    fn change_language_resets_regardless_of_history() {
        let mut chat = controller();
        chat.submit("hello", Language::En).expect("accepted");
        chat.settle(Ok(ChatReply {
            response: "hi".to_string(),
        }));

        chat.change_language(Language::Hi);

        assert_eq!(
            chat.transcript(),
            &[Message::assistant(
                "नमस्ते! मैं आपका AI कृषि सहायक हूँ। आज मैं आपकी खेती की जरूरतों में कैसे मदद कर सकता हूँ?"
            )]
        );
        assert_eq!(chat.language(), Language::Hi);
        assert_eq!(chat.view().events.last(), Some(&ViewEvent::TranscriptReset));
    }

    #[test]
    fn change_language_while_pending_keeps_indicator() {
        let mut chat = controller();
        chat.submit("hello", Language::En).expect("accepted");

        chat.change_language(Language::Hi);
        assert!(chat.is_pending());
        assert!(chat.is_typing());

        chat.settle(Ok(ChatReply {
            response: "नमस्ते".to_string(),
        }));
        assert_eq!(chat.transcript().len(), 2);
        assert!(!chat.is_typing());
    }

    #[test]
    fn closures_work_as_views() {
        let mut seen = Vec::new();
        {
            let mut chat = ChatController::new(
                ChatSession::seeded(Language::En),
                |event: ViewEvent, state: ViewState<'_>| {
                    seen.push((event, state.pending));
                },
            );
            chat.submit("hi", Language::En).expect("accepted");
        }
        assert_eq!(
            seen,
            vec![
                (ViewEvent::MessageAppended(TranscriptRole::User), true),
                (ViewEvent::TypingShown, true),
            ]
        );
    }
}
