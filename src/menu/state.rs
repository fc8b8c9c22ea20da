// Menu state management

use foosball::tournament::GameMode;

/// Main menu entries
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MenuItem {
    Continue,
    Arcade,
    WorldCup,
    League,
    Penalties,
    Quit,
}

impl MenuItem {
    /// Get display text for menu item
    pub fn display_text(&self) -> &str {
        match self {
            MenuItem::Continue => "Continue",
            MenuItem::Arcade => "Arcade Match",
            MenuItem::WorldCup => "World Cup",
            MenuItem::League => "League",
            MenuItem::Penalties => "Penalty Shootout",
            MenuItem::Quit => "Quit",
        }
    }

    /// The mode an entry starts, if it starts one
    pub fn mode(&self) -> Option<GameMode> {
        match self {
            MenuItem::Arcade => Some(GameMode::Arcade),
            MenuItem::WorldCup => Some(GameMode::WorldCup),
            MenuItem::League => Some(GameMode::League),
            MenuItem::Penalties => Some(GameMode::Penalties),
            MenuItem::Continue | MenuItem::Quit => None,
        }
    }

    /// Menu entries in order; Continue only when there is a save to continue
    pub fn all(has_save: bool) -> Vec<MenuItem> {
        let mut items = Vec::with_capacity(6);
        if has_save {
            items.push(MenuItem::Continue);
        }
        items.extend([
            MenuItem::Arcade,
            MenuItem::WorldCup,
            MenuItem::League,
            MenuItem::Penalties,
            MenuItem::Quit,
        ]);
        items
    }
}

/// A wrapping cursor over a list of `len` entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub index: usize,
    pub len: usize,
}

impl Cursor {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    /// Move selection up
    pub fn previous(&mut self) {
        if self.len == 0 {
            return;
        }
        if self.index > 0 {
            self.index -= 1;
        } else {
            self.index = self.len - 1;
        }
    }

    /// Move selection down
    pub fn next(&mut self) {
        if self.len == 0 {
            return;
        }
        if self.index < self.len - 1 {
            self.index += 1;
        } else {
            self.index = 0;
        }
    }
}

pub struct MenuState {
    pub items: Vec<MenuItem>,
    pub cursor: Cursor,
}

impl MenuState {
    pub fn new(has_save: bool) -> Self {
        let items = MenuItem::all(has_save);
        let cursor = Cursor::new(items.len());
        Self { items, cursor }
    }

    /// Get currently selected menu item
    pub fn selected_item(&self) -> MenuItem {
        self.items
            .get(self.cursor.index)
            .copied()
            .unwrap_or(MenuItem::Quit)
    }

    pub fn selected_index(&self) -> usize {
        self.cursor.index
    }

    pub fn select_previous(&mut self) {
        self.cursor.previous();
    }

    pub fn select_next(&mut self) {
        self.cursor.next();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_continue_only_with_save() {
        assert_eq!(MenuState::new(false).selected_item(), MenuItem::Arcade);
        assert_eq!(MenuState::new(true).selected_item(), MenuItem::Continue);
        assert_eq!(MenuState::new(true).items.len(), 6);
    }

    #[test]
    fn test_selection_wraps() {
        let mut menu = MenuState::new(false);
        menu.select_previous();
        assert_eq!(menu.selected_item(), MenuItem::Quit);
        menu.select_next();
        assert_eq!(menu.selected_item(), MenuItem::Arcade);
    }

    #[test]
    fn test_empty_cursor_stays_put() {
        let mut cursor = Cursor::new(0);
        cursor.next();
        cursor.previous();
        assert_eq!(cursor.index, 0);
    }
}
