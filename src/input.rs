/// Translation of raw terminal events into `GameEvent`s.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
///   `Press` / `Repeat` / `Release` events, so releases map straight to
///   `KeyUp`.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`).  A held key is treated as released once no press or
///   repeat has arrived for `HOLD_WINDOW` frames.

use std::collections::HashMap;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use alien_invasion::entities::{GameEvent, Key};

use crate::display::Viewport;

/// Frames a key stays "held" after its last press/repeat: 8 frames, ≈133 ms
/// at 60 FPS.  Once the OS is auto-repeating (≥ 15 Hz) every repeat lands
/// inside the window.  The initial repeat delay (≈250–600 ms) is longer, so
/// on classic terminals a held key briefly releases after the first press
/// and picks up again with the first repeat.
const HOLD_WINDOW: u64 = 8;

fn map_key(code: KeyCode, modifiers: KeyModifiers) -> Option<Key> {
    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Key::Quit),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::Right),
        KeyCode::Char(' ') => Some(Key::Fire),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Key::Quit),
        KeyCode::Enter | KeyCode::Char('p') | KeyCode::Char('P') => Some(Key::Play),
        _ => None,
    }
}

#[derive(Default)]
pub struct InputTranslator {
    /// Movement key → frame it was last seen (press or repeat).
    held: HashMap<Key, u64>,
}

impl InputTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translate one terminal event seen during `frame`.
    pub fn translate(&mut self, event: Event, frame: u64, viewport: &Viewport) -> Option<GameEvent> {
        match event {
            Event::Key(KeyEvent { code, modifiers, kind, .. }) => {
                let key = map_key(code, modifiers)?;
                let is_movement = matches!(key, Key::Left | Key::Right);
                match kind {
                    KeyEventKind::Press => {
                        if is_movement {
                            self.held.insert(key, frame);
                        }
                        Some(GameEvent::KeyDown(key))
                    }
                    // Repeat only refreshes the hold; firing stays one shot per press.
                    KeyEventKind::Repeat => {
                        if is_movement {
                            self.held.insert(key, frame);
                        }
                        None
                    }
                    KeyEventKind::Release => {
                        self.held.remove(&key);
                        Some(GameEvent::KeyUp(key))
                    }
                }
            }
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => {
                let (x, y) = viewport.to_world(column, row);
                Some(GameEvent::Click { x, y })
            }
            _ => None,
        }
    }

    /// Synthesize `KeyUp` for movement keys that have gone quiet.
    pub fn expire(&mut self, frame: u64) -> Vec<GameEvent> {
        let stale: Vec<Key> = self
            .held
            .iter()
            .filter(|(_, &last)| frame.saturating_sub(last) > HOLD_WINDOW)
            .map(|(&key, _)| key)
            .collect();
        for key in &stale {
            self.held.remove(key);
        }
        stale.into_iter().map(GameEvent::KeyUp).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind))
    }

    fn viewport() -> Viewport {
        Viewport::new(120, 40, 1200, 800)
    }

    #[test]
    fn press_maps_to_key_down() {
        let mut input = InputTranslator::new();
        let vp = viewport();
        assert_eq!(
            input.translate(key(KeyCode::Left, KeyEventKind::Press), 1, &vp),
            Some(GameEvent::KeyDown(Key::Left))
        );
        assert_eq!(
            input.translate(key(KeyCode::Char(' '), KeyEventKind::Press), 1, &vp),
            Some(GameEvent::KeyDown(Key::Fire))
        );
        assert_eq!(
            input.translate(key(KeyCode::Enter, KeyEventKind::Press), 1, &vp),
            Some(GameEvent::KeyDown(Key::Play))
        );
        assert_eq!(input.translate(key(KeyCode::Char('x'), KeyEventKind::Press), 1, &vp), None);
    }

    #[test]
    fn ctrl_c_quits_but_plain_c_does_not() {
        let mut input = InputTranslator::new();
        let vp = viewport();
        let ctrl_c = Event::Key(KeyEvent::new_with_kind(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
            KeyEventKind::Press,
        ));
        assert_eq!(input.translate(ctrl_c, 1, &vp), Some(GameEvent::KeyDown(Key::Quit)));
        assert_eq!(input.translate(key(KeyCode::Char('c'), KeyEventKind::Press), 1, &vp), None);
    }

    #[test]
    fn held_key_expires_after_window() {
        let mut input = InputTranslator::new();
        input.translate(key(KeyCode::Right, KeyEventKind::Press), 1, &viewport());
        assert!(input.expire(1 + HOLD_WINDOW).is_empty());
        assert_eq!(input.expire(2 + HOLD_WINDOW), vec![GameEvent::KeyUp(Key::Right)]);
        // Released once only
        assert!(input.expire(100).is_empty());
    }

    #[test]
    fn repeat_refreshes_hold_without_firing() {
        let mut input = InputTranslator::new();
        let vp = viewport();
        input.translate(key(KeyCode::Left, KeyEventKind::Press), 1, &vp);
        assert_eq!(input.translate(key(KeyCode::Left, KeyEventKind::Repeat), 6, &vp), None);
        assert!(input.expire(2 + HOLD_WINDOW).is_empty());
        assert_eq!(input.expire(7 + HOLD_WINDOW), vec![GameEvent::KeyUp(Key::Left)]);

        // Fire does not auto-repeat
        assert_eq!(input.translate(key(KeyCode::Char(' '), KeyEventKind::Repeat), 6, &vp), None);
    }

    #[test]
    fn release_maps_to_key_up() {
        let mut input = InputTranslator::new();
        let vp = viewport();
        input.translate(key(KeyCode::Char('d'), KeyEventKind::Press), 1, &vp);
        assert_eq!(
            input.translate(key(KeyCode::Char('d'), KeyEventKind::Release), 2, &vp),
            Some(GameEvent::KeyUp(Key::Right))
        );
        assert!(input.expire(100).is_empty());
    }

    #[test]
    fn fire_is_never_tracked_as_held() {
        let mut input = InputTranslator::new();
        input.translate(key(KeyCode::Char(' '), KeyEventKind::Press), 1, &viewport());
        assert!(input.expire(100).is_empty());
    }

    #[test]
    fn left_click_maps_to_world_coordinates() {
        let mut input = InputTranslator::new();
        let click = |button| {
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(button),
                column: 60,
                row: 19,
                modifiers: KeyModifiers::NONE,
            })
        };
        assert_eq!(
            input.translate(click(MouseButton::Left), 1, &viewport()),
            Some(GameEvent::Click { x: 605, y: 390 })
        );
        assert_eq!(input.translate(click(MouseButton::Right), 1, &viewport()), None);
    }
}
