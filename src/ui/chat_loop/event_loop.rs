//! Event polling, dispatching, and UI rendering loop.
//!
//! Terminal input is read on a background task and forwarded over a channel.
//! The loop drains that channel and the exchange outcome channel, then redraws
//! when something changed or while the typing indicator is animating.

use std::{
    error::Error,
    sync::Arc,
    time::{Duration, Instant},
};

use ratatui::crossterm::event::{self, Event, KeyEventKind};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::core::chat_exchange::{ChatExchangeService, ChatTransport, ExchangeOutcome};
use crate::core::language::Language;
use crate::ui::renderer::ui;

use super::keybindings::resolve_key;
use super::lifecycle::{restore_terminal, setup_terminal, ChatTerminal};
use super::ChatApp;

const MAX_FPS: u64 = 30;
const INDICATOR_FRAME: Duration = Duration::from_millis(100);

#[derive(Debug)]
pub enum UiEvent {
    Crossterm(Event),
}

fn spawn_event_reader(event_tx: mpsc::UnboundedSender<UiEvent>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            if let Ok(true) = event::poll(Duration::from_millis(10)) {
                match event::read() {
                    Ok(ev) => {
                        if event_tx.send(UiEvent::Crossterm(ev)).is_err() {
                            break;
                        }
                    }
                    Err(_) => continue,
                }
            } else {
                tokio::task::yield_now().await;
            }
        }
    })
}

/// Drains pending terminal events into `app`. Returns whether any arrived.
fn process_ui_events(app: &mut ChatApp, event_rx: &mut mpsc::UnboundedReceiver<UiEvent>) -> bool {
    let mut processed = false;
    while let Ok(ev) = event_rx.try_recv() {
        processed = true;
        match ev {
            UiEvent::Crossterm(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                app.apply(resolve_key(key));
                if app.exit_requested() {
                    break;
                }
            }
            UiEvent::Crossterm(Event::Paste(text)) => {
                let text = text.replace("\r\n", "\n").replace('\r', "\n");
                app.view_mut().textarea_mut().insert_str(text);
            }
            UiEvent::Crossterm(Event::Resize(_, _)) => app.view_mut().request_redraw(),
            UiEvent::Crossterm(_) => {}
        }
    }
    processed
}

fn process_exchange_outcomes(
    app: &mut ChatApp,
    outcome_rx: &mut mpsc::UnboundedReceiver<ExchangeOutcome>,
) -> bool {
    let mut received = false;
    while let Ok(outcome) = outcome_rx.try_recv() {
        received = true;
        app.handle_outcome(outcome);
    }
    received
}

fn try_draw_frame(
    terminal: &mut ChatTerminal,
    app: &mut ChatApp,
    last_draw: &mut Instant,
    frame_duration: Duration,
) -> std::io::Result<()> {
    let now = Instant::now();
    if now.duration_since(*last_draw) < frame_duration {
        app.view_mut().request_redraw();
        return Ok(());
    }
    terminal.draw(|f| ui(f, app))?;
    *last_draw = now;
    Ok(())
}

async fn drive(
    terminal: &mut ChatTerminal,
    app: &mut ChatApp,
    event_rx: &mut mpsc::UnboundedReceiver<UiEvent>,
    outcome_rx: &mut mpsc::UnboundedReceiver<ExchangeOutcome>,
) -> Result<(), Box<dyn Error>> {
    let frame_duration = Duration::from_millis(1000 / MAX_FPS);
    let mut last_draw = Instant::now() - frame_duration;
    let mut last_indicator_frame = Instant::now();

    loop {
        if app.view_mut().take_redraw_request() {
            try_draw_frame(terminal, app, &mut last_draw, frame_duration)?;
        }

        let events_processed = process_ui_events(app, event_rx);
        if app.exit_requested() {
            return Ok(());
        }

        let received_any = process_exchange_outcomes(app, outcome_rx);

        if app.view().is_typing() {
            let now = Instant::now();
            if now.duration_since(last_indicator_frame) >= INDICATOR_FRAME {
                app.view_mut().request_redraw();
                last_indicator_frame = now;
            }
        }

        if !events_processed && !received_any {
            tokio::time::sleep(Duration::from_millis(16)).await;
        }
    }
}

pub async fn run_chat(
    transport: Arc<dyn ChatTransport>,
    language: Language,
) -> Result<(), Box<dyn Error>> {
    let (exchanges, mut outcome_rx) = ChatExchangeService::new(transport);
    let mut app = ChatApp::new(language, exchanges);
    info!(language = language.code(), "starting chat session");

    let mut terminal = setup_terminal()?;

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<UiEvent>();
    let event_reader_handle = spawn_event_reader(event_tx);

    let result = drive(&mut terminal, &mut app, &mut event_rx, &mut outcome_rx).await;

    event_reader_handle.abort();
    let restored = restore_terminal(&mut terminal);
    debug!(
        messages = app.controller().transcript().len(),
        "chat session ended"
    );

    result.and(restored)
}

#[cfg(test)]
#[path = "event_loop_tests.rs"]
mod tests;
