use crate::app::{App, AppResult, InputMode, Tab};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Handles the key events and updates the state of [`App`].
pub fn handle_key_events(key_event: KeyEvent, app: &mut App) -> AppResult<()> {
    #[cfg(windows)]
    match key_event.kind {
        KeyEventKind::Press => {}
        _ => return Ok(()),
    }

    match app.input_mode {
        InputMode::EditName => return handle_name_input(key_event, app),
        InputMode::EditContact => return handle_contact_input(key_event, app),
        InputMode::Normal => {}
    }

    match key_event.code {
        // Exit application on `ESC` or `q`
        KeyCode::Esc | KeyCode::Char('q') => {
            if app.show_keybinds {
                app.show_keybinds = false;
            } else {
                app.quit();
            }
        }
        // Exit application on `Ctrl-C`; a bare `c` jumps to Contact
        KeyCode::Char('c') | KeyCode::Char('C') => {
            if key_event.modifiers == KeyModifiers::CONTROL {
                app.quit();
            } else {
                app.goto_tab(Tab::Contact);
            }
        }
        // Tab cycling and direct jumps
        KeyCode::Tab => {
            app.next_tab();
        }
        KeyCode::BackTab => {
            app.prev_tab();
        }
        KeyCode::Char('h') => {
            app.goto_tab(Tab::Home);
        }
        KeyCode::Char('p') => {
            app.goto_tab(Tab::Projects);
        }
        KeyCode::Char('a') => {
            app.goto_tab(Tab::Activity);
        }
        // List navigation
        KeyCode::Down | KeyCode::Char('j') => {
            app.next_element();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.prev_element();
        }
        // Spotlight panel selection
        KeyCode::Left => {
            if app.active_tab == Tab::Projects {
                app.projects.prev_spotlight();
            }
        }
        KeyCode::Right => {
            if app.active_tab == Tab::Projects {
                app.projects.next_spotlight();
            }
        }
        KeyCode::Char('t') => {
            app.toggle_theme();
        }
        // Refresh always bypasses the cooldown
        KeyCode::Char('r') => {
            app.refresh_feed();
        }
        KeyCode::Char('s') => {
            if app.active_tab == Tab::Projects {
                app.cycle_sort();
            }
        }
        KeyCode::Char('g') => {
            if app.active_tab == Tab::Projects {
                app.toggle_grid();
            }
        }
        KeyCode::Char('n') => {
            if app.active_tab == Tab::Home {
                app.input_mode = InputMode::EditName;
            }
        }
        KeyCode::Char('x') => {
            if app.active_tab == Tab::Home {
                app.clear_name();
            }
        }
        KeyCode::Char('i') => {
            if app.active_tab == Tab::Contact {
                app.input_mode = InputMode::EditContact;
            }
        }
        KeyCode::Enter => match app.active_tab {
            Tab::Home => app.input_mode = InputMode::EditName,
            Tab::Projects => app.toggle_selected_details(),
            Tab::Contact => app.submit_contact(),
            Tab::Activity => {}
        },
        KeyCode::Char('?') => {
            app.show_keybinds = !app.show_keybinds;
        }
        _ => {}
    }
    Ok(())
}

fn handle_name_input(key_event: KeyEvent, app: &mut App) -> AppResult<()> {
    match key_event.code {
        KeyCode::Esc => app.input_mode = InputMode::Normal,
        KeyCode::Enter => {
            app.submit_name();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => app.name_input.backspace(),
        KeyCode::Left => app.name_input.left(),
        KeyCode::Right => app.name_input.right(),
        KeyCode::Char(c) => app.name_input.insert(c),
        _ => {}
    }
    Ok(())
}

fn handle_contact_input(key_event: KeyEvent, app: &mut App) -> AppResult<()> {
    match key_event.code {
        KeyCode::Esc | KeyCode::Enter => app.input_mode = InputMode::Normal,
        KeyCode::Tab => app.form.focus_next(),
        KeyCode::BackTab => app.form.focus_prev(),
        KeyCode::Backspace => {
            app.form.focused().backspace();
            app.form.after_edit();
        }
        KeyCode::Left => app.form.focused().left(),
        KeyCode::Right => app.form.focused().right(),
        KeyCode::Char(c) => {
            app.form.focused().insert(c);
            app.form.after_edit();
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::form::FieldId;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn test_app() -> App {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        file.write_all(b"[data]\ncache = false\n").unwrap();
        App::init(Config::read_from_path(Some(file.path())).unwrap()).unwrap()
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key_events(KeyEvent::from(code), app).unwrap();
    }

    #[test]
    fn q_quits_but_closes_the_overlay_first() {
        let mut app = test_app();
        app.show_keybinds = true;

        press(&mut app, KeyCode::Char('q'));
        assert!(app.running);
        assert!(!app.show_keybinds);

        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[test]
    fn typing_a_name_flows_through_edit_mode() {
        let mut app = test_app();
        app.clear_name();

        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.input_mode, InputMode::EditName);

        for c in "Sam".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.input_mode, InputMode::Normal);
        app.greeting.tick();
        assert!(app.greeting.line().contains("Sam"));
    }

    #[test]
    fn contact_editing_cycles_fields_with_tab() {
        let mut app = test_app();
        app.goto_tab(Tab::Contact);

        press(&mut app, KeyCode::Char('i'));
        assert_eq!(app.input_mode, InputMode::EditContact);
        assert_eq!(app.form.focus, FieldId::Name);

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.form.focus, FieldId::Email);

        for c in "me@example.com".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        assert_eq!(app.form.email.value, "me@example.com");

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn sort_and_grid_keys_only_act_on_the_projects_tab() {
        let mut app = test_app();
        let initial = app.projects.sort;

        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.projects.sort, initial);

        app.goto_tab(Tab::Projects);
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.projects.sort, initial.next());

        press(&mut app, KeyCode::Char('g'));
        assert!(!app.projects.grid_visible);
    }

    #[test]
    fn spotlight_arrows_wrap() {
        let mut app = test_app();
        app.goto_tab(Tab::Projects);

        press(&mut app, KeyCode::Right);
        assert_eq!(app.projects.spotlight, 1);
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Left);
        assert_ne!(app.projects.spotlight, 0);
    }
}
