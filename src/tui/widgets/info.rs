//! Info panel widget.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::state::InfoLine;
use crate::tui::style::Styles;

/// Height needed to show `lines` inside a bordered block.
pub fn info_height(lines: &[InfoLine]) -> u16 {
    u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(2)
}

/// Renders `label: value` lines, labels padded to a common width.
pub fn render_info(frame: &mut Frame, area: Rect, title: &str, lines: &[InfoLine]) {
    let label_width = lines.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    let text: Vec<Line> = lines
        .iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!("{:<width$} ", label, width = label_width), Styles::label()),
                Span::styled(value.clone(), Styles::default()),
            ])
        })
        .collect();

    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .style(Styles::default());
    frame.render_widget(Paragraph::new(text).block(block), area);
}
