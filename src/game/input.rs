use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use std::time::Duration;

use crate::config::KeyBindings;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputAction {
    Quit,
    Proceed,
    DefenseUp,
    DefenseDown,
    DefenseKick,
    AttackUp,
    AttackDown,
    AttackKick,
    AimLeft,
    AimCenter,
    AimRight,
    PowerSoft,
    PowerMedium,
    PowerStrong,
    Shoot,
}

/// Parse a key name from the config file into a key code
pub fn parse_key(name: &str) -> Option<KeyCode> {
    match name {
        "Up" => Some(KeyCode::Up),
        "Down" => Some(KeyCode::Down),
        "Left" => Some(KeyCode::Left),
        "Right" => Some(KeyCode::Right),
        "Enter" => Some(KeyCode::Enter),
        "Esc" => Some(KeyCode::Esc),
        "Space" => Some(KeyCode::Char(' ')),
        "Tab" => Some(KeyCode::Tab),
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(KeyCode::Char(c.to_ascii_lowercase())),
                _ => None,
            }
        }
    }
}

/// Whether a configured key name refers to this key code
pub fn key_matches(binding: &str, code: KeyCode) -> bool {
    let code = match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    };
    parse_key(binding) == Some(code)
}

/// Map a key to every action bound to it.
/// A key may carry one meaning in open play and another in the shootout,
/// so all matches are returned and the caller picks by context.
pub fn actions_for_key(bindings: &KeyBindings, code: KeyCode) -> Vec<InputAction> {
    let table = [
        (&bindings.quit, InputAction::Quit),
        (&bindings.proceed, InputAction::Proceed),
        (&bindings.defense_up, InputAction::DefenseUp),
        (&bindings.defense_down, InputAction::DefenseDown),
        (&bindings.defense_kick, InputAction::DefenseKick),
        (&bindings.attack_up, InputAction::AttackUp),
        (&bindings.attack_down, InputAction::AttackDown),
        (&bindings.attack_kick, InputAction::AttackKick),
        (&bindings.aim_left, InputAction::AimLeft),
        (&bindings.aim_center, InputAction::AimCenter),
        (&bindings.aim_right, InputAction::AimRight),
        (&bindings.power_soft, InputAction::PowerSoft),
        (&bindings.power_medium, InputAction::PowerMedium),
        (&bindings.power_strong, InputAction::PowerStrong),
        (&bindings.shoot, InputAction::Shoot),
    ];

    let mut actions: Vec<InputAction> = table
        .iter()
        .filter(|(binding, _)| key_matches(binding, code))
        .map(|(_, action)| *action)
        .collect();

    // Esc always backs out of a match
    if code == KeyCode::Esc && !actions.contains(&InputAction::Quit) {
        actions.push(InputAction::Quit);
    }
    actions
}

/// Poll for input events and return actions.
/// Each Press event generates an immediate action - no state tracking needed.
pub fn poll_input(bindings: &KeyBindings) -> Result<Vec<InputAction>, std::io::Error> {
    let mut actions = Vec::new();

    while event::poll(Duration::from_millis(0))? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                actions.extend(actions_for_key(bindings, key.code));
            }
        }
    }

    Ok(actions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_and_char_keys() {
        assert_eq!(parse_key("Up"), Some(KeyCode::Up));
        assert_eq!(parse_key("Space"), Some(KeyCode::Char(' ')));
        assert_eq!(parse_key("W"), Some(KeyCode::Char('w')));
        assert_eq!(parse_key("Nope"), None);
    }

    #[test]
    fn test_shared_key_yields_every_binding() {
        let bindings = KeyBindings::default();
        let actions = actions_for_key(&bindings, KeyCode::Char('S'));
        assert!(actions.contains(&InputAction::DefenseDown));
        assert!(actions.contains(&InputAction::AimCenter));
    }

    #[test]
    fn test_esc_quits() {
        let bindings = KeyBindings::default();
        assert_eq!(actions_for_key(&bindings, KeyCode::Esc), vec![InputAction::Quit]);
    }
}
