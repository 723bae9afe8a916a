use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use crate::app::{App, InputMode, Tab};
use crate::tui::AppEvent;

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

pub fn handle_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => handle_key(app, key)?,
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Resize(_, _) => {}
        AppEvent::Tick => {
            app.tick_animation();
        }
    }
    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) -> Result<()> {
    // Global keys that work in any mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return Ok(());
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Editing => handle_editing_mode(app, key),
    }

    Ok(())
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    // Language picker steals input while open
    if app.show_language_picker {
        match key.code {
            KeyCode::Esc => {
                app.show_language_picker = false;
            }
            KeyCode::Char('j') | KeyCode::Down => {
                app.language_picker_nav_down();
            }
            KeyCode::Char('k') | KeyCode::Up => {
                app.language_picker_nav_up();
            }
            KeyCode::Enter => {
                app.select_language();
            }
            _ => {}
        }
        return;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') => app.should_quit = true,

        // Tab navigation
        KeyCode::Tab => app.next_tab(),
        KeyCode::BackTab => app.prev_tab(),
        KeyCode::Char('1') => app.select_tab(Tab::Chat),
        KeyCode::Char('2') => app.select_tab(Tab::History),
        KeyCode::Char('3') => app.select_tab(Tab::Vaccine),
        KeyCode::Char('4') => app.select_tab(Tab::Help),
        KeyCode::Char('5') => app.select_tab(Tab::Contact),

        // Chat scrolling
        KeyCode::Char('j') | KeyCode::Down => app.scroll_chat_down(),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_chat_up(),
        KeyCode::Char('G') => app.scroll_chat_to_bottom(),

        // Sidebar toggle
        KeyCode::Char('b') => app.toggle_sidebar(),

        // Language picker
        KeyCode::Char('L') => app.open_language_picker(),

        // Start typing (chat tab only)
        KeyCode::Char('i') | KeyCode::Char('/') | KeyCode::Enter => {
            if app.active_tab == Tab::Chat {
                app.input_mode = InputMode::Editing;
            }
        }

        _ => {}
    }
}

fn handle_editing_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => {
            // Blank input is suppressed inside submit_input; the editing
            // mode stays active so the next message can be typed directly.
            app.submit_input();
        }
        KeyCode::Backspace => {
            if app.input_cursor > 0 {
                app.input_cursor -= 1;
                let byte_pos = char_to_byte_index(&app.input, app.input_cursor);
                app.input.remove(byte_pos);
            }
        }
        KeyCode::Delete => {
            let char_count = app.input.chars().count();
            if app.input_cursor < char_count {
                let byte_pos = char_to_byte_index(&app.input, app.input_cursor);
                app.input.remove(byte_pos);
            }
        }
        KeyCode::Left => {
            app.input_cursor = app.input_cursor.saturating_sub(1);
        }
        KeyCode::Right => {
            let char_count = app.input.chars().count();
            app.input_cursor = (app.input_cursor + 1).min(char_count);
        }
        KeyCode::Home => {
            app.input_cursor = 0;
        }
        KeyCode::End => {
            app.input_cursor = app.input.chars().count();
        }
        KeyCode::Char(c) => {
            let byte_pos = char_to_byte_index(&app.input, app.input_cursor);
            app.input.insert(byte_pos, c);
            app.input_cursor += 1;
        }
        _ => {}
    }
}

/// Check if a point is within a rectangle
fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let x = mouse.column;
    let y = mouse.row;

    let in_chat = app.chat_area.map(|r| point_in_rect(x, y, r)).unwrap_or(false);
    let in_sidebar = app.sidebar_area.map(|r| point_in_rect(x, y, r)).unwrap_or(false);

    match mouse.kind {
        MouseEventKind::ScrollDown => {
            if in_chat {
                app.chat_scroll = app.chat_scroll.saturating_add(3);
            } else if in_sidebar {
                app.next_tab();
            }
        }
        MouseEventKind::ScrollUp => {
            if in_chat {
                app.chat_scroll = app.chat_scroll.saturating_sub(3);
            } else if in_sidebar {
                app.prev_tab();
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn test_app() -> App {
        // Default config keeps tests independent of the host config dir.
        App::new(Config::new())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[tokio::test(start_paused = true)]
    async fn test_typed_chars_respect_cursor() {
        let mut app = test_app();
        app.input_mode = InputMode::Editing;

        for c in "fevr".chars() {
            handle_key(&mut app, key(KeyCode::Char(c))).unwrap();
        }
        handle_key(&mut app, key(KeyCode::Left)).unwrap();
        handle_key(&mut app, key(KeyCode::Char('e'))).unwrap();

        assert_eq!(app.input, "fever");
        assert_eq!(app.input_cursor, 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_enter_in_normal_mode_only_edits_on_chat_tab() {
        let mut app = test_app();
        app.active_tab = Tab::Help;
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert_eq!(app.input_mode, InputMode::Normal);

        app.active_tab = Tab::Chat;
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert_eq!(app.input_mode, InputMode::Editing);
    }

    #[tokio::test(start_paused = true)]
    async fn test_number_keys_select_tabs() {
        let mut app = test_app();
        handle_key(&mut app, key(KeyCode::Char('3'))).unwrap();
        assert_eq!(app.active_tab, Tab::Vaccine);
        handle_key(&mut app, key(KeyCode::Char('1'))).unwrap();
        assert_eq!(app.active_tab, Tab::Chat);
    }
}
