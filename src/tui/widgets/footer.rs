//! Footer with key hints, lock indicator and status message.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::input::KEY_HINTS;
use crate::tui::state::AppState;
use crate::tui::style::Styles;

pub fn render_footer(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut spans: Vec<Span> = Vec::new();
    for (key, action) in KEY_HINTS {
        spans.push(Span::styled(format!(" {}", key), Styles::help_key()));
        spans.push(Span::styled(format!(" {} ", action), Styles::help()));
    }
    if state.sort_locked {
        spans.push(Span::styled(" LOCKED ", Styles::locked()));
    }
    if let Some(msg) = &state.status_message {
        spans.push(Span::styled(format!(" {}", msg), Styles::status()));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
