// src/ui.rs

pub mod footer;
pub mod header;
pub mod loading_modal;
pub mod quit_confirm;

use crate::app::{App, AppState};
use crate::chat_view::draw_chat;
use crate::constants::TICK_RATE_MS;
use crate::key_handlers::handle_key;
use crossterm::{
    event::{self, Event as CEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    Terminal,
};
use std::{
    io,
    time::{Duration, Instant},
};
use tokio::sync::mpsc;

/// Enum for different types of events.
enum Event {
    Input(CEvent),
    Tick,
}

/// A `width` x `height` rectangle centered in `area`, clamped to fit.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Runs the terminal UI until the user quits.
pub async fn run_ui(app: App, notices: mpsc::UnboundedReceiver<String>) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app, notices).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!("UI loop failed: {}", err);
    }
    res
}

/// Draws one frame straight from the store. The lock is released before
/// returning, so key handlers and typing ticks can take it again.
async fn draw_frame<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &App,
    is_loading: bool,
) -> io::Result<()> {
    let store = app.session.store();
    let store = store.lock().await;
    terminal.draw(|f| draw_chat(f, app, store.messages(), is_loading))?;
    Ok(())
}

/// Main loop of the application.
async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    mut notices: mpsc::UnboundedReceiver<String>,
) -> io::Result<()> {
    let (tx, mut rx) = mpsc::channel::<Event>(100);

    // crossterm's poll/read block, so keep them off the async workers
    tokio::task::spawn_blocking(move || {
        let tick_rate = Duration::from_millis(TICK_RATE_MS);
        let mut last_tick = Instant::now();
        loop {
            let timeout = tick_rate.saturating_sub(last_tick.elapsed());
            match event::poll(timeout) {
                Ok(true) => {
                    if let Ok(event) = event::read() {
                        if tx.blocking_send(Event::Input(event)).is_err() {
                            return;
                        }
                    }
                }
                Ok(false) => {}
                Err(_) => return,
            }

            if last_tick.elapsed() >= tick_rate {
                if tx.blocking_send(Event::Tick).is_err() {
                    return;
                }
                last_tick = Instant::now();
            }
        }
    });

    let mut revisions = app.session.store().lock().await.subscribe();
    let mut loading = app.session.subscribe_loading();
    info!("chat session started");

    loop {
        let is_loading = *loading.borrow_and_update();
        app.status_indicator.set_thinking(is_loading);
        draw_frame(terminal, &app, is_loading).await?;

        tokio::select! {
            event = rx.recv() => match event {
                Some(Event::Input(CEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                    handle_key(key, &mut app).await;
                }
                Some(Event::Input(_)) => {}
                Some(Event::Tick) => app.status_indicator.tick(Instant::now()),
                None => break,
            },
            Ok(()) = revisions.changed() => {}
            Ok(()) = loading.changed() => {}
            Some(notice) = notices.recv() => app.status_indicator.show_toast(notice),
        }

        if app.state == AppState::Quit {
            break;
        }
    }

    app.session.cancel_typing().await;
    info!("chat session ended");
    Ok(())
}
