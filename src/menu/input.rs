// Menu input handling

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use std::io;
use std::time::Duration;

use foosball::config::KeyBindings;
use foosball::game::key_matches;
use foosball::tournament::GameMode;

use super::state::{Cursor, MenuItem, MenuState};

/// Menu action result
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MenuAction {
    /// Continue in menu
    None,
    /// Resume the saved match
    Continue,
    Start(GameMode),
    Quit,
}

/// Result of a key on a list screen (team select)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ListAction {
    None,
    Pick(usize),
    Back,
}

/// Wait briefly for a key press
pub fn read_key(timeout: Duration) -> Result<Option<KeyCode>, io::Error> {
    if event::poll(timeout)? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(Some(key.code));
            }
        }
    }
    Ok(None)
}

pub fn handle_menu_key(menu: &mut MenuState, bindings: &KeyBindings, code: KeyCode) -> MenuAction {
    if key_matches(&bindings.menu_up, code) || code == KeyCode::Char('k') {
        menu.select_previous();
        MenuAction::None
    } else if key_matches(&bindings.menu_down, code) || code == KeyCode::Char('j') {
        menu.select_next();
        MenuAction::None
    } else if key_matches(&bindings.menu_select, code) || code == KeyCode::Char(' ') {
        let item = menu.selected_item();
        match item {
            MenuItem::Continue => MenuAction::Continue,
            MenuItem::Quit => MenuAction::Quit,
            _ => item.mode().map_or(MenuAction::None, MenuAction::Start),
        }
    } else if key_matches(&bindings.menu_back, code) || key_matches(&bindings.quit, code) {
        MenuAction::Quit
    } else {
        MenuAction::None
    }
}

pub fn handle_list_key(cursor: &mut Cursor, bindings: &KeyBindings, code: KeyCode) -> ListAction {
    if key_matches(&bindings.menu_up, code) || code == KeyCode::Char('k') {
        cursor.previous();
        ListAction::None
    } else if key_matches(&bindings.menu_down, code) || code == KeyCode::Char('j') {
        cursor.next();
        ListAction::None
    } else if key_matches(&bindings.menu_select, code) || code == KeyCode::Char(' ') {
        if cursor.len == 0 {
            ListAction::None
        } else {
            ListAction::Pick(cursor.index)
        }
    } else if key_matches(&bindings.menu_back, code) {
        ListAction::Back
    } else {
        ListAction::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_starts_mode() {
        let bindings = KeyBindings::default();
        let mut menu = MenuState::new(false);
        menu.select_next();
        let action = handle_menu_key(&mut menu, &bindings, KeyCode::Enter);
        assert_eq!(action, MenuAction::Start(GameMode::WorldCup));
    }

    #[test]
    fn test_continue_and_quit() {
        let bindings = KeyBindings::default();
        let mut menu = MenuState::new(true);
        assert_eq!(handle_menu_key(&mut menu, &bindings, KeyCode::Enter), MenuAction::Continue);
        assert_eq!(handle_menu_key(&mut menu, &bindings, KeyCode::Esc), MenuAction::Quit);
    }

    #[test]
    fn test_list_pick_and_back() {
        let bindings = KeyBindings::default();
        let mut cursor = Cursor::new(3);
        handle_list_key(&mut cursor, &bindings, KeyCode::Up);
        assert_eq!(handle_list_key(&mut cursor, &bindings, KeyCode::Enter), ListAction::Pick(2));
        assert_eq!(handle_list_key(&mut cursor, &bindings, KeyCode::Esc), ListAction::Back);
    }
}
