// Main menu and team selection screens

pub mod input;
pub mod render;
pub mod state;

pub use input::{handle_list_key, handle_menu_key, read_key, ListAction, MenuAction};
pub use render::{render_menu, render_team_select};
pub use state::{Cursor, MenuState};
