use crate::app::{App, AppState};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Paragraph, Wrap},
    Frame,
};

/// Draws the footer with dynamic instructions
pub fn draw_footer(f: &mut Frame<'_>, area: Rect, app: &App) {
    let instructions = match (app.state, app.selected) {
        (AppState::QuitConfirm, _) => "Press 'y' to confirm quit or 'n' to cancel.",
        (_, Some(_)) => "Ctrl+Y copy · Ctrl+Up/Down select · Esc clear selection",
        _ => "Enter send · Ctrl+Up select · Ctrl+Y copy last · PgUp/PgDn scroll · Esc quit",
    };

    let footer = Paragraph::new(instructions)
        .style(Style::default().fg(Color::LightCyan))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(footer, area);
}
