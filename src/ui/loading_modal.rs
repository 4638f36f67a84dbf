use super::centered_rect;
use crate::constants::LOADING_TEXT;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Modal shown for as long as a generation request is in flight.
pub fn draw_loading_modal(f: &mut Frame<'_>, area: Rect) {
    let popup = centered_rect(area, 30, 3);
    f.render_widget(Clear, popup);

    let modal = Paragraph::new(LOADING_TEXT)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .style(Style::default().fg(Color::White).bg(Color::Black)),
        )
        .style(Style::default().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);

    f.render_widget(modal, popup);
}
