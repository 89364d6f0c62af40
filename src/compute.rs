/// Game logic for one Playing tick.
///
/// `tick` mutates the world in place.  All randomness comes through the
/// injected `rng` so callers control determinism (tests use a seeded RNG).
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::constants::{
    CANVAS_WIDTH, PASS_THROUGH_DAMAGE, PASS_THROUGH_PENALTY, PLAYER_LASER_VELOCITY,
    PLAYER_SPAWN, POWER_UP_CHANCE, RAM_DAMAGE, RAM_PENALTY, SPAWN_X_MARGIN, SPAWN_X_MIN,
    SPAWN_Y_RANGE,
};
use crate::entities::{DamageOutcome, Enemy, EnemyColor, GameState, Player, PowerUp, PowerUpKind};
use crate::input::HeldKeys;
use crate::mask::collide;
use crate::score::ScoreManager;
use crate::sound::{SoundCue, SoundManager};
use crate::sprites::SpriteSheet;

// ── Difficulty ────────────────────────────────────────────────────────────────

/// Difficulty knobs, a pure function of the current score.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Difficulty {
    pub level: i64,
    /// Downward pixels per tick for every enemy.
    pub enemy_speed: f32,
    /// Each enemy fires with probability 1 / `enemy_shoot_chance` per tick.
    pub enemy_shoot_chance: u32,
    pub max_enemies: usize,
    pub enemy_laser_velocity: f32,
}

impl Difficulty {
    /// Levels step every 100 points, using floor division so a negative
    /// score drops to level 0 and below.
    pub fn from_score(score: i64) -> Self {
        let level = score.div_euclid(100) + 1;
        Self {
            level,
            enemy_speed: 1.0 + level as f32 * 0.2,
            enemy_shoot_chance: (140 - level * 10).max(60) as u32,
            max_enemies: (5 + level.div_euclid(2)).clamp(0, 12) as usize,
            enemy_laser_velocity: (5 + level) as f32,
        }
    }
}

// ── World ─────────────────────────────────────────────────────────────────────

/// Everything that lives on the playfield during one game.
#[derive(Clone, Debug)]
pub struct World {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub power_ups: Vec<PowerUp>,
}

impl World {
    /// A fresh playfield: the player at the spawn point, nothing else.
    pub fn new(sprites: &SpriteSheet) -> Self {
        Self {
            player: Player::new(PLAYER_SPAWN.0, PLAYER_SPAWN.1, sprites),
            enemies: Vec::new(),
            power_ups: Vec::new(),
        }
    }
}

/// A random spawn point above the top edge.
fn spawn_point(rng: &mut impl Rng) -> (f32, f32) {
    let x = rng.gen_range(SPAWN_X_MIN as i32..(CANVAS_WIDTH - SPAWN_X_MARGIN) as i32);
    let y = rng.gen_range(SPAWN_Y_RANGE.0..SPAWN_Y_RANGE.1);
    (x as f32, y as f32)
}

// ── Per-frame tick ────────────────────────────────────────────────────────────

/// Advance the playfield by one frame and report the state to continue in.
pub fn tick(
    world: &mut World,
    held: &HeldKeys,
    scores: &mut ScoreManager,
    sound: &mut SoundManager,
    sprites: &SpriteSheet,
    rng: &mut impl Rng,
) -> GameState {
    let difficulty = Difficulty::from_score(scores.score);

    // ── 1. Player input ──────────────────────────────────────────────────────
    world.player.move_within(held);
    if held.fire {
        world.player.shoot(sound);
    }

    // ── 2. Spawn one enemy if the fleet is short ─────────────────────────────
    if world.enemies.len() < difficulty.max_enemies {
        let (x, y) = spawn_point(rng);
        let color = *EnemyColor::ALL.choose(rng).unwrap_or(&EnemyColor::Red);
        debug!("spawning {:?} enemy at ({}, {})", color, x, y);
        world.enemies.push(Enemy::new(x, y, color, sprites));
    }

    // ── 3. Enemies: move, fire, ram, slip past ───────────────────────────────
    let player = &mut world.player;
    let mut survivors = Vec::with_capacity(world.enemies.len());
    for mut enemy in std::mem::take(&mut world.enemies) {
        enemy.move_by(difficulty.enemy_speed);
        enemy.ship.move_lasers(difficulty.enemy_laser_velocity, player);

        if rng.gen_range(0..difficulty.enemy_shoot_chance) == 1 {
            enemy.shoot();
        }

        if collide(&enemy, &*player) {
            // The enemy is gone either way; only an unblocked ram costs score.
            if player.take_damage(RAM_DAMAGE) == DamageOutcome::Taken {
                scores.add_score(RAM_PENALTY);
            }
            sound.play(SoundCue::Explosion);
            continue;
        }
        if enemy.passed_bottom() {
            player.ship.health -= PASS_THROUGH_DAMAGE;
            scores.add_score(PASS_THROUGH_PENALTY);
            continue;
        }
        survivors.push(enemy);
    }
    world.enemies = survivors;

    // ── 4. Player lasers ─────────────────────────────────────────────────────
    world
        .player
        .move_lasers(PLAYER_LASER_VELOCITY, &mut world.enemies, scores, sound);

    // ── 5. Power-ups ─────────────────────────────────────────────────────────
    if rng.gen_range(0..POWER_UP_CHANCE) == 1 {
        let (x, y) = spawn_point(rng);
        let kind = *PowerUpKind::ALL.choose(rng).unwrap_or(&PowerUpKind::Health);
        debug!("spawning {} power-up at ({}, {})", kind.name(), x, y);
        world.power_ups.push(PowerUp::new(x, y, kind, sprites));
    }

    let player = &mut world.player;
    world.power_ups.retain_mut(|power_up| {
        power_up.move_down();
        if power_up.off_screen() {
            return false;
        }
        if collide(&*power_up, &*player) {
            power_up.apply_to(player);
            debug!("picked up {}", power_up.kind.name());
            return false;
        }
        true
    });

    // ── 6. Game over? ────────────────────────────────────────────────────────
    if world.player.is_dead() {
        GameState::GameOver
    } else {
        GameState::Playing
    }
}
