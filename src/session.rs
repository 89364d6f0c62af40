/// The session context and its state machine.
///
/// One `Session` lives for the whole process.  It owns the playfield, the
/// score table and the audio handle, and `step` moves it through
/// Menu → Playing ⇄ Paused → GameOver → Menu one frame at a time.
use rand::Rng;
use tracing::{error, info};

use crate::compute::{tick, World};
use crate::constants::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::entities::GameState;
use crate::input::{InputEvent, InputFrame};
use crate::score::ScoreManager;
use crate::sound::{SoundCue, SoundManager};
use crate::sprites::SpriteSheet;

/// Axis-aligned rectangle on the logical canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Region {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Region {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.w && y >= self.y && y < self.y + self.h
    }
}

/// The "Click here to Start" button on the menu, centred 150 units above
/// the bottom edge.
pub const START_BUTTON: Region = Region {
    x: CANVAS_WIDTH / 2.0 - 250.0,
    y: CANVAS_HEIGHT - 150.0 - 30.0,
    w: 500.0,
    h: 60.0,
};

/// What the main loop should do after a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug)]
pub struct Session {
    pub state: GameState,
    pub world: World,
    pub scores: ScoreManager,
    pub sound: SoundManager,
    pub sprites: SpriteSheet,
}

impl Session {
    /// A session sitting on the menu with a fresh playfield.
    pub fn new(sprites: SpriteSheet, scores: ScoreManager, sound: SoundManager) -> Self {
        let mut session = Self {
            state: GameState::Menu,
            world: World::new(&sprites),
            scores,
            sound,
            sprites,
        };
        session.enter_menu();
        session
    }

    fn reset_world(&mut self) {
        self.world = World::new(&self.sprites);
        self.scores.reset();
    }

    fn enter_menu(&mut self) {
        self.reset_world();
        self.state = GameState::Menu;
    }

    fn start_game(&mut self) {
        self.reset_world();
        self.state = GameState::Playing;
        self.sound.play_music();
        info!("game started");
    }

    fn enter_game_over(&mut self) {
        self.state = GameState::GameOver;
        self.sound.stop_music();
        self.sound.play(SoundCue::GameOver);
        info!("game over with score {}", self.scores.score);
    }

    /// Record the final score and go back to the menu.
    fn restart(&mut self) {
        if let Err(e) = self.scores.save_high_score() {
            error!("could not persist high scores: {e}");
        }
        self.enter_menu();
    }

    fn handle_event(&mut self, event: InputEvent) -> Flow {
        match (self.state, event) {
            (_, InputEvent::Quit) => return Flow::Quit,
            (GameState::Menu, InputEvent::Click { x, y }) if START_BUTTON.contains(x, y) => {
                self.start_game()
            }
            (GameState::Menu, InputEvent::Confirm) => self.start_game(),
            (GameState::Playing, InputEvent::Escape) => self.state = GameState::Paused,
            (GameState::Paused, InputEvent::Escape) => self.state = GameState::Playing,
            (GameState::GameOver, InputEvent::Restart) => self.restart(),
            _ => {}
        }
        Flow::Continue
    }

    /// Process one frame of input and, if the game was already running,
    /// advance it by one tick.
    pub fn step(&mut self, input: &InputFrame, rng: &mut impl Rng) -> Flow {
        let was = self.state;
        for &event in &input.events {
            if self.handle_event(event) == Flow::Quit {
                info!("quit requested");
                return Flow::Quit;
            }
        }

        if was == GameState::Playing && self.state == GameState::Playing {
            let next = tick(
                &mut self.world,
                &input.held,
                &mut self.scores,
                &mut self.sound,
                &self.sprites,
                rng,
            );
            if next == GameState::GameOver {
                self.enter_game_over();
            }
        }
        Flow::Continue
    }
}
