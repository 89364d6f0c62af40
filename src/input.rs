/// Input model.
///
/// Each tick the game sees one `InputFrame`: a snapshot of which movement
/// and fire keys are held, plus the discrete events (Escape, R, clicks,
/// quit) queued since the previous tick.
///
/// Terminals report key presses, not key state.  `KeyTracker` records the
/// frame of the last press/repeat event for every key; a key counts as held
/// while that record is fresh (within `HOLD_WINDOW` frames).  Terminals that
/// support keyboard enhancement also send release events, which drop the key
/// immediately.
use std::collections::HashMap;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};

use crate::display::Viewport;

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  OS key-repeat runs at 15 Hz or faster, so 8 frames at
/// 60 FPS is always refreshed before expiry.
pub const HOLD_WINDOW: u64 = 8;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// Toggle pause.
    Escape,
    /// Leave the game-over screen.
    Restart,
    /// Keyboard stand-in for clicking "start".
    Confirm,
    /// Mouse button pressed at a logical canvas position.
    Click { x: f32, y: f32 },
    /// Leave the program, from any state.
    Quit,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputFrame {
    pub held: HeldKeys,
    pub events: Vec<InputEvent>,
}

impl InputFrame {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn holding(held: HeldKeys) -> Self {
        Self {
            held,
            events: Vec::new(),
        }
    }

    pub fn with_event(event: InputEvent) -> Self {
        Self {
            held: HeldKeys::default(),
            events: vec![event],
        }
    }
}

/// Folds raw terminal events into `InputFrame`s.
#[derive(Debug, Default)]
pub struct KeyTracker {
    /// Maps each held key → the frame it was last seen (press or repeat).
    key_frame: HashMap<KeyCode, u64>,
    frame: u64,
    pending: Vec<InputEvent>,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Letters are tracked lower-case so Shift doesn't split a key in two.
    fn normalize(code: KeyCode) -> KeyCode {
        match code {
            KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
            other => other,
        }
    }

    /// Feed one terminal event.
    pub fn handle(&mut self, event: &Event, viewport: &Viewport) {
        match event {
            Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) => {
                let code = Self::normalize(*code);
                match kind {
                    KeyEventKind::Press => {
                        self.key_frame.insert(code, self.frame);
                        match code {
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                self.pending.push(InputEvent::Quit)
                            }
                            KeyCode::Char('q') => self.pending.push(InputEvent::Quit),
                            KeyCode::Esc => self.pending.push(InputEvent::Escape),
                            KeyCode::Char('r') => self.pending.push(InputEvent::Restart),
                            KeyCode::Enter => self.pending.push(InputEvent::Confirm),
                            _ => {}
                        }
                    }
                    KeyEventKind::Repeat => {
                        self.key_frame.insert(code, self.frame);
                    }
                    KeyEventKind::Release => {
                        self.key_frame.remove(&code);
                    }
                }
            }
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(_),
                column,
                row,
                ..
            }) => {
                let (x, y) = viewport.to_logical(*column, *row);
                self.pending.push(InputEvent::Click { x, y });
            }
            _ => {}
        }
    }

    fn is_held(&self, key: KeyCode) -> bool {
        self.key_frame
            .get(&key)
            .map(|&last| self.frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    pub fn held(&self) -> HeldKeys {
        HeldKeys {
            up: self.is_held(KeyCode::Char('w')) || self.is_held(KeyCode::Up),
            down: self.is_held(KeyCode::Char('s')) || self.is_held(KeyCode::Down),
            left: self.is_held(KeyCode::Char('a')) || self.is_held(KeyCode::Left),
            right: self.is_held(KeyCode::Char('d')) || self.is_held(KeyCode::Right),
            fire: self.is_held(KeyCode::Char(' ')),
        }
    }

    /// Snapshot the current tick's input and advance to the next frame.
    pub fn take_frame(&mut self) -> InputFrame {
        let frame = InputFrame {
            held: self.held(),
            events: std::mem::take(&mut self.pending),
        };
        self.frame += 1;
        frame
    }
}
