use crate::app::{App, AppState};
use crate::clipboard::copy_message;
use crate::constants::COPIED_TEXT;
use crate::errors::ChatError;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::{debug, warn};
use std::sync::Arc;

pub async fn handle_key(key: KeyEvent, app: &mut App) {
    match app.state {
        AppState::Chat => handle_chat_input(key, app).await,
        AppState::QuitConfirm => handle_quit_confirm_input(key, app),
        AppState::Quit => {}
    }
}

pub async fn handle_chat_input(key: KeyEvent, app: &mut App) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => {
            if app.selected.is_some() {
                app.clear_selection();
            } else {
                app.state = AppState::QuitConfirm;
            }
        }
        KeyCode::Enter => submit_input(app),
        KeyCode::Up if ctrl => {
            let count = app.session.store().lock().await.len();
            app.select_previous(count);
        }
        KeyCode::Down if ctrl => {
            let count = app.session.store().lock().await.len();
            app.select_next(count);
        }
        KeyCode::PageUp => app.scroll_up(),
        KeyCode::PageDown => app.scroll_down(),
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Char(c) if ctrl => match c {
            'c' => app.state = AppState::QuitConfirm,
            'y' => copy_selected(app).await,
            'u' => app.scroll_up(),
            'd' => app.scroll_down(),
            _ => {}
        },
        KeyCode::Char(c) => app.input.push(c),
        _ => {}
    }
}

/// Hands the input line to the session on a background task so the UI keeps
/// drawing while the request is in flight.
fn submit_input(app: &mut App) {
    let text = app.take_input();
    if text.trim().is_empty() {
        return;
    }

    app.scroll_back = 0;
    app.clear_selection();

    let session = Arc::clone(&app.session);
    let notices = app.notices.clone();
    tokio::spawn(async move {
        match session.submit(&text).await {
            Ok(_) | Err(ChatError::EmptyInput) | Err(ChatError::Superseded) => {}
            Err(e) => {
                let _ = notices.send(format!("Request failed: {}", e));
            }
        }
    });
}

/// Copies the selected message, or the newest one when nothing is selected.
async fn copy_selected(app: &mut App) {
    let store = app.session.store();
    let store = store.lock().await;
    let message = match app.selected {
        Some(i) => store.messages().get(i),
        None => store.last(),
    };
    let Some(message) = message else {
        debug!("nothing to copy");
        return;
    };

    let Some(clipboard) = app.clipboard.as_mut() else {
        app.status_indicator.show_toast("Clipboard unavailable");
        return;
    };

    match copy_message(&mut **clipboard, message) {
        Ok(()) => app.status_indicator.show_toast(COPIED_TEXT),
        Err(e) => {
            warn!("{}", e);
            app.status_indicator.show_toast(e.to_string());
        }
    }
}

pub fn handle_quit_confirm_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            app.state = AppState::Quit;
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            app.state = AppState::Chat;
        }
        _ => {}
    }
}
