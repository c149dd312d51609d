use std::time::Instant;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::core::constants::INDICATOR_SPACE;
use crate::core::message::{Message, TranscriptRole};
use crate::ui::chat_loop::ChatApp;
use crate::ui::theme::Theme;
use crate::ui::view::ChatView;
use crate::ui::wrap::wrap_text;

const USER_PREFIX: &str = "You: ";
const ASSISTANT_PREFIX: &str = "Khet AI: ";
const MAX_INPUT_LINES: u16 = 6;

/// Builds the visual transcript lines for a content area `width` columns wide.
pub fn build_transcript_lines(
    transcript: &[Message],
    view: &ChatView,
    width: u16,
    now: Instant,
) -> Vec<Line<'static>> {
    let theme = &view.theme;
    let mut lines = Vec::new();

    for message in transcript {
        let (prefix, prefix_style, text_style) = match message.role {
            TranscriptRole::User => (USER_PREFIX, theme.user_prefix_style, theme.user_text_style),
            TranscriptRole::Assistant => (
                ASSISTANT_PREFIX,
                theme.assistant_prefix_style,
                theme.assistant_text_style,
            ),
        };

        let body_width = (width as usize).saturating_sub(prefix.len()).max(1);
        let indent = " ".repeat(prefix.len());
        for (index, segment) in wrap_text(&message.content, body_width)
            .into_iter()
            .enumerate()
        {
            let lead = if index == 0 {
                Span::styled(prefix, prefix_style)
            } else {
                Span::raw(indent.clone())
            };
            lines.push(Line::from(vec![lead, Span::styled(segment, text_style)]));
        }
        lines.push(Line::default());
    }

    if let Some(dots) = view.typing_dots(now) {
        lines.push(typing_line(theme, dots));
    }

    lines
}

fn typing_line(theme: &Theme, dots: usize) -> Line<'static> {
    let mut indicator = "●".repeat(dots);
    indicator.push_str(&"○".repeat(3 - dots));
    Line::from(vec![
        Span::styled(ASSISTANT_PREFIX, theme.assistant_prefix_style),
        Span::styled(indicator, theme.typing_indicator_style),
    ])
}

pub fn ui(f: &mut Frame, app: &mut ChatApp) {
    let input_height = app.view().input_line_count().min(MAX_INPUT_LINES);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(input_height + 2), // +2 for borders
        ])
        .split(f.area());

    let language = app.controller().language();
    let title = format!(
        "Khet.ai Assistant v{} • Language: {} ({}){}",
        env!("CARGO_PKG_VERSION"),
        language.display_name(),
        language.code(),
        if app.controller().is_pending() {
            " • waiting for reply"
        } else {
            ""
        }
    );

    let transcript_area = chunks[0];
    let lines = build_transcript_lines(
        app.controller().transcript(),
        app.view(),
        transcript_area.width,
        Instant::now(),
    );
    let available_height = transcript_area.height.saturating_sub(1); // Account for title
    let total_lines = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    let scroll_offset = app
        .view_mut()
        .resolve_scroll(total_lines, available_height);

    let theme = app.view().theme.clone();
    let messages_paragraph = Paragraph::new(lines)
        .block(Block::default().title(Span::styled(title, theme.title_style)))
        .scroll((scroll_offset, 0));
    f.render_widget(messages_paragraph, transcript_area);

    let input_title = if app.controller().is_pending() {
        "Waiting for Khet AI… (Tab to switch language, Esc to quit)"
    } else {
        "Ask a question (Enter to send, Alt+Enter for new line, Tab to switch language, Esc to quit)"
    };

    let input_area = chunks[1];
    let mut textarea = app.view().textarea().clone();
    textarea.set_block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.input_border_style)
            .title(Span::styled(input_title, theme.input_title_style)),
    );
    f.render_widget(&textarea, input_area);

    if let Some(dots) = app.view().typing_dots(Instant::now()) {
        let indicator_x = input_area.right().saturating_sub(INDICATOR_SPACE);
        if indicator_x > input_area.x {
            let symbol = ["◔", "◑", "◕"][dots - 1];
            f.buffer_mut()
                .set_string(indicator_x, input_area.y, symbol, theme.typing_indicator_style);
        }
    }
}
