/// Entity behaviour: lasers, the shared ship mechanics, and the player,
/// enemy and power-up rules built on top of them.
use crate::constants::{
    CANVAS_HEIGHT, CANVAS_WIDTH, ENEMY_LASER_OFFSET, HEALTH_PICKUP, KILL_SCORE, LASER_DAMAGE,
    LASER_SPREAD,
};
use crate::entities::{DamageOutcome, Enemy, Laser, Player, PowerUp, PowerUpKind, Ship};
use crate::input::HeldKeys;
use crate::mask::{collide, Collider};
use crate::score::ScoreManager;
use crate::sound::{SoundCue, SoundManager};

// ── Laser ─────────────────────────────────────────────────────────────────────

impl Laser {
    /// Negative velocity moves up the screen.
    pub fn move_by(&mut self, velocity: f32) {
        self.y += velocity;
    }

    /// Outside `[0, height]`.  Both bounds count as on-screen.
    pub fn off_screen(&self, height: f32) -> bool {
        !(0.0..=height).contains(&self.y)
    }

    pub fn collision(&self, other: &impl Collider) -> bool {
        collide(self, other)
    }
}

// ── Ship ──────────────────────────────────────────────────────────────────────

impl Ship {
    /// Advance the fire-rate limiter.  After a shot the counter runs
    /// 1, 2, ... `cooldown_time` and only then drops back to 0.
    pub fn cool_down(&mut self) {
        if self.cooldown >= self.cooldown_time {
            self.cooldown = 0;
        } else if self.cooldown > 0 {
            self.cooldown += 1;
        }
    }

    pub fn can_shoot(&self) -> bool {
        self.cooldown == 0
    }

    /// Fire one laser from the ship's corner.  Returns whether it fired.
    pub fn shoot(&mut self) -> bool {
        if !self.can_shoot() {
            return false;
        }
        self.fire_at(self.x);
        true
    }

    /// Spawn a laser at `x` on the ship's row and start the cooldown.
    fn fire_at(&mut self, x: f32) {
        self.lasers
            .push(Laser::new(x, self.y, self.laser_sprite.clone()));
        self.cooldown = 1;
    }

    /// Move this ship's lasers against the player.  A laser touching the
    /// player deals `LASER_DAMAGE` and is spent even if a shield absorbed it.
    pub fn move_lasers(&mut self, velocity: f32, target: &mut Player) {
        self.cool_down();

        let lasers = std::mem::take(&mut self.lasers);
        for mut laser in lasers {
            laser.move_by(velocity);
            if laser.off_screen(CANVAS_HEIGHT) {
                continue;
            }
            if laser.collision(&*target) {
                target.take_damage(LASER_DAMAGE);
                continue;
            }
            self.lasers.push(laser);
        }
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

impl Player {
    pub fn x(&self) -> f32 {
        self.ship.x
    }

    pub fn y(&self) -> f32 {
        self.ship.y
    }

    pub fn health(&self) -> i32 {
        self.ship.health
    }

    /// A charged shield eats the hit; otherwise health drops (possibly
    /// below zero) and the multi-shot bonus is lost.
    pub fn take_damage(&mut self, amount: i32) -> DamageOutcome {
        if self.shield_charges > 0 {
            self.shield_charges -= 1;
            DamageOutcome::Blocked
        } else {
            self.ship.health -= amount;
            self.laser_count = 1;
            DamageOutcome::Taken
        }
    }

    /// Fire a volley of `laser_count` lasers spaced `LASER_SPREAD` apart and
    /// centred on the ship's x.  Returns whether anything fired.
    pub fn shoot(&mut self, sound: &mut SoundManager) -> bool {
        if !self.ship.can_shoot() {
            return false;
        }
        if self.laser_count <= 1 {
            self.ship.fire_at(self.ship.x);
        } else {
            let n = self.laser_count;
            let start_x = self.ship.x - LASER_SPREAD * (n - 1) as f32 / 2.0;
            for i in 0..n {
                self.ship.fire_at(start_x + LASER_SPREAD * i as f32);
            }
        }
        sound.play(SoundCue::Laser);
        true
    }

    /// Move the player's lasers against the enemy fleet.  Each laser kills
    /// at most the first enemy it overlaps.  Returns the number of kills.
    pub fn move_lasers(
        &mut self,
        velocity: f32,
        enemies: &mut Vec<Enemy>,
        score: &mut ScoreManager,
        sound: &mut SoundManager,
    ) -> usize {
        self.ship.cool_down();

        let mut kills = 0;
        let lasers = std::mem::take(&mut self.ship.lasers);
        for mut laser in lasers {
            laser.move_by(velocity);
            if laser.off_screen(CANVAS_HEIGHT) {
                continue;
            }
            if let Some(hit) = enemies.iter().position(|enemy| laser.collision(enemy)) {
                enemies.remove(hit);
                score.add_score(KILL_SCORE);
                sound.play(SoundCue::Explosion);
                kills += 1;
                continue;
            }
            self.ship.lasers.push(laser);
        }
        kills
    }

    /// Apply held direction keys.  A step is taken only if it keeps the
    /// ship strictly inside the canvas.
    pub fn move_within(&mut self, held: &HeldKeys) {
        let speed = self.speed;
        let (w, h) = (self.ship.width(), self.ship.height());
        let ship = &mut self.ship;

        if held.left && ship.x - speed > 0.0 {
            ship.x -= speed;
        }
        if held.right && ship.x + speed + w < CANVAS_WIDTH {
            ship.x += speed;
        }
        if held.up && ship.y - speed > 0.0 {
            ship.y -= speed;
        }
        if held.down && ship.y + speed + h < CANVAS_HEIGHT {
            ship.y += speed;
        }
    }

    /// The shield ring and counter are only drawn while charges remain.
    pub fn shield_visible(&self) -> bool {
        self.shield_charges > 0
    }

    /// Share of the health bar drawn green, in `[0, 1]`.
    pub fn health_fraction(&self) -> f32 {
        if self.max_health <= 0 {
            return 0.0;
        }
        (self.ship.health as f32 / self.max_health as f32).clamp(0.0, 1.0)
    }

    pub fn is_dead(&self) -> bool {
        self.ship.health <= 0
    }
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

impl Enemy {
    pub fn move_by(&mut self, velocity: f32) {
        self.ship.y += velocity;
    }

    /// Fire one laser from just left of the hull's centre line.
    pub fn shoot(&mut self) -> bool {
        if !self.ship.can_shoot() {
            return false;
        }
        let x = self.ship.x + (self.ship.width() / 2.0).floor() - ENEMY_LASER_OFFSET;
        self.ship.fire_at(x);
        true
    }

    /// The hull's bottom edge is below the canvas.
    pub fn passed_bottom(&self) -> bool {
        self.ship.y + self.ship.height() > CANVAS_HEIGHT
    }
}

// ── PowerUp ───────────────────────────────────────────────────────────────────

impl PowerUp {
    pub fn move_down(&mut self) {
        self.y += self.velocity;
    }

    pub fn off_screen(&self) -> bool {
        self.y + self.sprite.height() > CANVAS_HEIGHT
    }

    /// Grant the pickup's effect.
    pub fn apply_to(&self, player: &mut Player) {
        match self.kind {
            PowerUpKind::Shield => player.shield_charges = player.max_shield_charges,
            PowerUpKind::MultiShot => player.laser_count += 1,
            PowerUpKind::Health => {
                player.ship.health = (player.ship.health + HEALTH_PICKUP).min(player.max_health)
            }
        }
    }
}
