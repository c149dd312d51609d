//! Terminal-side view state: input box, scroll position and typing indicator.

use std::time::{Duration, Instant};

use tui_textarea::TextArea;

use crate::core::controller::{TranscriptView, ViewEvent, ViewState};
use crate::ui::theme::Theme;

const TYPING_FRAME: Duration = Duration::from_millis(400);

pub struct ChatView {
    pub theme: Theme,
    textarea: TextArea<'static>,
    scroll_offset: u16,
    auto_scroll: bool,
    typing_since: Option<Instant>,
    redraw_requested: bool,
}

impl ChatView {
    pub fn new(theme: Theme) -> Self {
        let mut view = Self {
            theme,
            textarea: TextArea::default(),
            scroll_offset: 0,
            auto_scroll: true,
            typing_since: None,
            redraw_requested: true,
        };
        view.style_textarea();
        view
    }

    fn style_textarea(&mut self) {
        self.textarea.set_style(self.theme.input_text_style);
        self.textarea.set_cursor_style(self.theme.input_cursor_style);
        self.textarea
            .set_cursor_line_style(self.theme.input_cursor_line_style);
        self.textarea
            .set_placeholder_text("Ask about crops, soil, pests or weather…");
    }

    pub fn textarea(&self) -> &TextArea<'static> {
        &self.textarea
    }

    pub fn textarea_mut(&mut self) -> &mut TextArea<'static> {
        self.redraw_requested = true;
        &mut self.textarea
    }

    pub fn input_text(&self) -> String {
        self.textarea.lines().join("\n")
    }

    pub fn clear_input(&mut self) {
        self.textarea = TextArea::default();
        self.style_textarea();
        self.redraw_requested = true;
    }

    pub fn input_line_count(&self) -> u16 {
        self.textarea.lines().len().max(1) as u16
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.auto_scroll = false;
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
        self.redraw_requested = true;
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_offset = self.scroll_offset.saturating_add(lines);
        self.redraw_requested = true;
    }

    /// Resolves the scroll offset for a transcript of `total_lines` shown in
    /// `available_height` rows. Following mode always pins to the bottom;
    /// scrolling back down to the bottom re-enables it.
    pub fn resolve_scroll(&mut self, total_lines: u16, available_height: u16) -> u16 {
        let max_offset = total_lines.saturating_sub(available_height);
        if self.auto_scroll || self.scroll_offset >= max_offset {
            self.auto_scroll = true;
            self.scroll_offset = max_offset;
        }
        self.scroll_offset
    }

    pub fn is_following(&self) -> bool {
        self.auto_scroll
    }

    pub fn is_typing(&self) -> bool {
        self.typing_since.is_some()
    }

    /// Number of lit dots (1..=3) in the typing animation at `now`.
    pub fn typing_dots(&self, now: Instant) -> Option<usize> {
        let since = self.typing_since?;
        let frame = now.duration_since(since).as_millis() / TYPING_FRAME.as_millis();
        Some((frame % 3) as usize + 1)
    }

    pub fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }

    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }
}

impl TranscriptView for ChatView {
    fn render(&mut self, event: ViewEvent, _state: ViewState<'_>) {
        match event {
            ViewEvent::MessageAppended(_) | ViewEvent::TranscriptReset => {
                self.auto_scroll = true;
            }
            ViewEvent::TypingShown => {
                self.typing_since = Some(Instant::now());
            }
            ViewEvent::TypingHidden => {
                self.typing_since = None;
            }
        }
        self.redraw_requested = true;
    }
}
