use binscope_core::Key;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub fn map_key(key: KeyEvent) -> Key {
    if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return Key::Other;
    }
    match key.code {
        KeyCode::Char(c) => Key::from_char(c),
        _ => Key::Other,
    }
}

/// Key presses become keys; a resize becomes a no-op key so the next frame picks up the
/// new geometry. Releases, mouse and focus events are swallowed.
pub fn map_event(ev: Event) -> Option<Key> {
    match ev {
        Event::Key(key) if key.kind != KeyEventKind::Release => Some(map_key(key)),
        Event::Resize(_, _) => Some(Key::Other),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(c: char, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), modifiers)
    }

    #[test]
    fn shifted_letters_map_to_upper_keys() {
        assert_eq!(map_key(press('N', KeyModifiers::SHIFT)), Key::MoreBins);
        assert_eq!(map_key(press('n', KeyModifiers::NONE)), Key::FewerBins);
        assert_eq!(map_key(press('q', KeyModifiers::NONE)), Key::Confirm);
    }

    #[test]
    fn control_chords_are_unmapped() {
        assert_eq!(map_key(press('q', KeyModifiers::CONTROL)), Key::Other);
        assert_eq!(map_key(press('n', KeyModifiers::ALT)), Key::Other);
    }

    #[test]
    fn non_char_keys_are_unmapped() {
        assert_eq!(map_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)), Key::Other);
        assert_eq!(map_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)), Key::Other);
    }

    #[test]
    fn resize_redraws_and_focus_is_ignored() {
        assert_eq!(map_event(Event::Resize(10, 10)), Some(Key::Other));
        assert_eq!(map_event(Event::FocusGained), None);
    }
}
