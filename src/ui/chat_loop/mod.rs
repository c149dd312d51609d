//! Interactive chat loop and the application state it drives.
//!
//! [`ChatApp`] glues a [`ChatController`] rendering into a [`ChatView`] to the
//! [`ChatExchangeService`] that runs requests in the background. The event
//! loop in [`event_loop`] feeds it key presses and exchange outcomes.

use tracing::{debug, info};
use tui_textarea::Input as TAInput;

use crate::core::chat_exchange::{ChatExchangeService, ExchangeOutcome};
use crate::core::controller::ChatController;
use crate::core::language::Language;
use crate::core::session::ChatSession;
use crate::ui::theme::Theme;
use crate::ui::view::ChatView;

pub mod event_loop;
pub mod keybindings;
pub mod lifecycle;

pub use event_loop::run_chat;
pub use keybindings::{resolve_key, KeyAction};

pub struct ChatApp {
    controller: ChatController<ChatView>,
    exchanges: ChatExchangeService,
    next_exchange_id: u64,
    in_flight: Option<u64>,
    exit_requested: bool,
}

impl ChatApp {
    pub fn new(language: Language, exchanges: ChatExchangeService) -> Self {
        Self {
            controller: ChatController::new(
                ChatSession::seeded(language),
                ChatView::new(Theme::default()),
            ),
            exchanges,
            next_exchange_id: 0,
            in_flight: None,
            exit_requested: false,
        }
    }

    pub fn controller(&self) -> &ChatController<ChatView> {
        &self.controller
    }

    pub fn view(&self) -> &ChatView {
        self.controller.view()
    }

    pub fn view_mut(&mut self) -> &mut ChatView {
        self.controller.view_mut()
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// Submits the input box. The input is only cleared when the submission
    /// was accepted, so text typed while a reply is pending stays put.
    pub fn submit_input(&mut self) -> bool {
        let text = self.view().input_text();
        let language = self.controller.language();
        let Some(request) = self.controller.submit(&text, language) else {
            debug!(pending = self.controller.is_pending(), "submission dropped");
            return false;
        };

        self.view_mut().clear_input();
        self.next_exchange_id += 1;
        let exchange_id = self.next_exchange_id;
        self.in_flight = Some(exchange_id);
        self.exchanges.spawn_exchange(request, exchange_id);
        true
    }

    pub fn handle_outcome(&mut self, outcome: ExchangeOutcome) {
        if self.in_flight != Some(outcome.exchange_id) {
            debug!(exchange_id = outcome.exchange_id, "ignoring stale exchange outcome");
            return;
        }
        self.in_flight = None;
        self.controller.settle(outcome.result);
    }

    pub fn cycle_language(&mut self) {
        let language = self.controller.language().next();
        info!(language = language.code(), "switching language");
        self.controller.change_language(language);
    }

    pub fn apply(&mut self, action: KeyAction) {
        match action {
            KeyAction::Submit => {
                self.submit_input();
            }
            KeyAction::InsertNewline => self.view_mut().textarea_mut().insert_newline(),
            KeyAction::CycleLanguage => self.cycle_language(),
            KeyAction::ScrollUp(lines) => self.view_mut().scroll_up(lines),
            KeyAction::ScrollDown(lines) => self.view_mut().scroll_down(lines),
            KeyAction::Quit => self.exit_requested = true,
            KeyAction::Edit(key) => {
                self.view_mut().textarea_mut().input(TAInput::from(key));
            }
        }
    }
}
