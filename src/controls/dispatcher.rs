use std::time::{Duration, Instant};

use crossterm::event::KeyCode;

use crate::player::Command;

/// Maps key presses to playback commands with repeat-key suppression.
///
/// The skip keys share a clock window: a fired skip arms it for `cooldown`
/// and presses inside it are dropped. Space is gated by key state instead
/// of the clock: the first press fires and every repeat is swallowed until
/// the key is released, however long it is held. While either guard is
/// active the other group is blocked too.
pub struct ShortcutDispatcher {
    cooldown: Duration,
    locked_until: Option<Instant>,
    pause_held: bool,
}

impl ShortcutDispatcher {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            locked_until: None,
            pause_held: false,
        }
    }

    /// Map a key press to a playback command.
    ///
    /// `typing` is true while a text input owns the keyboard; pause is
    /// suppressed there, skips are not.
    pub fn key_down(&mut self, code: KeyCode, typing: bool, now: Instant) -> Option<Command> {
        if self.locked(now) {
            return None;
        }

        match code {
            KeyCode::Right => {
                self.arm(now);
                Some(Command::Next)
            }
            KeyCode::Left => {
                self.arm(now);
                Some(Command::Prev)
            }
            KeyCode::Char(' ') => {
                if typing {
                    return None;
                }
                self.pause_held = true;
                Some(Command::PlayPause)
            }
            _ => None,
        }
    }

    /// Release a key. Releasing space clears the pause gate.
    pub fn key_up(&mut self, code: KeyCode) {
        if code == KeyCode::Char(' ') {
            self.pause_held = false;
        }
    }

    fn arm(&mut self, now: Instant) {
        self.locked_until = Some(now + self.cooldown);
    }

    fn locked(&self, now: Instant) -> bool {
        if self.pause_held {
            return true;
        }
        match self.locked_until {
            Some(deadline) => now < deadline,
            None => false,
        }
    }
}
