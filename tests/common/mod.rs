#![allow(dead_code)]

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use void_raiders::compute::World;
use void_raiders::entities::{Enemy, EnemyColor, Laser, PowerUp, PowerUpKind};
use void_raiders::score::ScoreManager;
use void_raiders::session::Session;
use void_raiders::sound::{AudioBackend, SoundCue, SoundManager};
use void_raiders::sprites::SpriteSheet;

pub fn assets_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("assets")
}

pub fn sprites() -> SpriteSheet {
    SpriteSheet::load(&assets_dir().join("sprites"), 10, 20).expect("bundled sprites load")
}

pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// Audio backend that remembers what it was asked to do.
#[derive(Clone, Default)]
pub struct Recorder(Rc<RefCell<Vec<String>>>);

impl Recorder {
    pub fn events(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    pub fn count(&self, name: &str) -> usize {
        self.0.borrow().iter().filter(|e| e.as_str() == name).count()
    }

    pub fn manager(&self) -> SoundManager {
        SoundManager::new(Box::new(self.clone()))
    }
}

impl AudioBackend for Recorder {
    fn play(&mut self, cue: SoundCue) {
        self.0.borrow_mut().push(cue.name().to_string());
    }
    fn play_music(&mut self) {
        self.0.borrow_mut().push("music:start".to_string());
    }
    fn stop_music(&mut self) {
        self.0.borrow_mut().push("music:stop".to_string());
    }
}

pub fn world() -> World {
    World::new(&sprites())
}

pub fn scores_in(dir: &tempfile::TempDir) -> ScoreManager {
    ScoreManager::open(dir.path().join("high_scores.json"))
}

pub fn session_in(dir: &tempfile::TempDir, recorder: &Recorder) -> Session {
    Session::new(sprites(), scores_in(dir), recorder.manager())
}

pub fn enemy_at(x: f32, y: f32) -> Enemy {
    Enemy::new(x, y, EnemyColor::Red, &sprites())
}

pub fn power_up_at(x: f32, y: f32, kind: PowerUpKind) -> PowerUp {
    PowerUp::new(x, y, kind, &sprites())
}

pub fn player_laser_at(x: f32, y: f32) -> Laser {
    Laser::new(x, y, sprites().player_laser.clone())
}

pub fn enemy_laser_at(x: f32, y: f32) -> Laser {
    Laser::new(x, y, sprites().red_laser.clone())
}
