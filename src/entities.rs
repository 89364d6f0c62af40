/// All game entity types: data, constructors and geometry accessors.
/// Behaviour lives in `ship` and `compute`.
use std::rc::Rc;

use crate::constants::{
    COOLDOWN_TIME, ENEMY_HEALTH, MAX_SHIELD_CHARGES, PLAYER_MAX_HEALTH, PLAYER_SPEED,
    POWER_UP_VELOCITY,
};
use crate::mask::{Collider, Mask};
use crate::sprites::{Sprite, SpriteSheet};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    Menu,
    Playing,
    Paused,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyColor {
    Red,
    Green,
    Blue,
}

impl EnemyColor {
    pub const ALL: [EnemyColor; 3] = [EnemyColor::Red, EnemyColor::Blue, EnemyColor::Green];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PowerUpKind {
    /// Refills the shield to `MAX_SHIELD_CHARGES`.
    Shield,
    /// One more laser per volley until the next unblocked hit.
    MultiShot,
    /// +30 health, capped at the maximum.
    Health,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::Shield,
        PowerUpKind::MultiShot,
        PowerUpKind::Health,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PowerUpKind::Shield => "shield",
            PowerUpKind::MultiShot => "multi_shot",
            PowerUpKind::Health => "health",
        }
    }
}

/// Result of hitting the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageOutcome {
    /// A shield charge absorbed the hit.
    Blocked,
    /// Health was reduced.
    Taken,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Laser {
    pub x: f32,
    pub y: f32,
    pub sprite: Rc<Sprite>,
}

impl Laser {
    pub fn new(x: f32, y: f32, sprite: Rc<Sprite>) -> Self {
        Self { x, y, sprite }
    }
}

// ── Ships ─────────────────────────────────────────────────────────────────────

/// State shared by the player and the enemies.
#[derive(Clone, Debug)]
pub struct Ship {
    pub x: f32,
    pub y: f32,
    pub health: i32,
    /// 0 means ready to fire; otherwise counts up to `cooldown_time`.
    pub cooldown: u32,
    pub cooldown_time: u32,
    /// Lasers fired by this ship that are still in flight.
    pub lasers: Vec<Laser>,
    pub sprite: Rc<Sprite>,
    pub laser_sprite: Rc<Sprite>,
}

impl Ship {
    pub fn new(x: f32, y: f32, health: i32, sprite: Rc<Sprite>, laser_sprite: Rc<Sprite>) -> Self {
        Self {
            x,
            y,
            health,
            cooldown: 0,
            cooldown_time: COOLDOWN_TIME,
            lasers: Vec::new(),
            sprite,
            laser_sprite,
        }
    }

    pub fn width(&self) -> f32 {
        self.sprite.width()
    }

    pub fn height(&self) -> f32 {
        self.sprite.height()
    }
}

#[derive(Clone, Debug)]
pub struct Player {
    pub ship: Ship,
    pub max_health: i32,
    pub shield_charges: u32,
    pub max_shield_charges: u32,
    pub laser_count: u32,
    pub speed: f32,
}

impl Player {
    pub fn new(x: f32, y: f32, sprites: &SpriteSheet) -> Self {
        Self {
            ship: Ship::new(
                x,
                y,
                PLAYER_MAX_HEALTH,
                sprites.player_ship.clone(),
                sprites.player_laser.clone(),
            ),
            max_health: PLAYER_MAX_HEALTH,
            shield_charges: 0,
            max_shield_charges: MAX_SHIELD_CHARGES,
            laser_count: 1,
            speed: PLAYER_SPEED,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub ship: Ship,
    pub color: EnemyColor,
}

impl Enemy {
    pub fn new(x: f32, y: f32, color: EnemyColor, sprites: &SpriteSheet) -> Self {
        let (sprite, laser_sprite) = sprites.enemy(color);
        Self {
            ship: Ship::new(x, y, ENEMY_HEALTH, sprite, laser_sprite),
            color,
        }
    }
}

// ── Power-ups ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct PowerUp {
    pub x: f32,
    pub y: f32,
    pub kind: PowerUpKind,
    pub velocity: f32,
    pub sprite: Rc<Sprite>,
}

impl PowerUp {
    pub fn new(x: f32, y: f32, kind: PowerUpKind, sprites: &SpriteSheet) -> Self {
        Self {
            x,
            y,
            kind,
            velocity: POWER_UP_VELOCITY,
            sprite: sprites.power_up.clone(),
        }
    }
}

// ── Collision geometry ────────────────────────────────────────────────────────

impl Collider for Laser {
    fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }
    fn mask(&self) -> &Mask {
        &self.sprite.mask
    }
}

impl Collider for Ship {
    fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }
    fn mask(&self) -> &Mask {
        &self.sprite.mask
    }
}

impl Collider for Player {
    fn position(&self) -> (f32, f32) {
        self.ship.position()
    }
    fn mask(&self) -> &Mask {
        self.ship.mask()
    }
}

impl Collider for Enemy {
    fn position(&self) -> (f32, f32) {
        self.ship.position()
    }
    fn mask(&self) -> &Mask {
        self.ship.mask()
    }
}

impl Collider for PowerUp {
    fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }
    fn mask(&self) -> &Mask {
        &self.sprite.mask
    }
}
