/// Sprite assets.
///
/// Sprites are text art files under `<assets>/sprites/`.  Each character is
/// one `cell_w × cell_h` block of logical pixels; spaces are transparent.
/// The collision mask is derived once at load time and shared by every
/// entity drawn with the sprite.
use std::path::Path;
use std::rc::Rc;

use tracing::debug;

use crate::constants::POWER_UP_SIZE;
use crate::entities::EnemyColor;
use crate::error::{GameError, GameResult};
use crate::mask::Mask;

#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub name: String,
    pub art: Vec<String>,
    /// Logical size of one art character.
    pub cell: (u32, u32),
    pub mask: Mask,
}

impl Sprite {
    /// Parse text art.  Trailing whitespace and trailing blank lines are
    /// dropped; leading spaces are kept because they position the art.
    pub fn from_art(name: &str, text: &str, cell_w: u32, cell_h: u32) -> Option<Self> {
        let mut art: Vec<String> = text.lines().map(|l| l.trim_end().to_string()).collect();
        while art.last().is_some_and(|l| l.is_empty()) {
            art.pop();
        }
        let mask = Mask::from_art(&art, cell_w, cell_h);
        if mask.count() == 0 {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            art,
            cell: (cell_w, cell_h),
            mask,
        })
    }

    /// The square marker used for power-ups.
    pub fn power_up() -> Self {
        Self {
            name: "power_up".to_string(),
            art: vec!["██".to_string()],
            cell: (POWER_UP_SIZE / 2, POWER_UP_SIZE),
            mask: Mask::filled(POWER_UP_SIZE, POWER_UP_SIZE),
        }
    }

    pub fn width(&self) -> f32 {
        self.mask.width() as f32
    }

    pub fn height(&self) -> f32 {
        self.mask.height() as f32
    }
}

/// Every sprite the game draws, loaded once at startup.
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    pub player_ship: Rc<Sprite>,
    pub player_laser: Rc<Sprite>,
    pub red_ship: Rc<Sprite>,
    pub red_laser: Rc<Sprite>,
    pub green_ship: Rc<Sprite>,
    pub green_laser: Rc<Sprite>,
    pub blue_ship: Rc<Sprite>,
    pub blue_laser: Rc<Sprite>,
    pub power_up: Rc<Sprite>,
}

impl SpriteSheet {
    /// Load all sprites from `dir`.  Any missing or empty file is fatal:
    /// the game cannot be played without its visuals.
    pub fn load(dir: &Path, cell_w: u32, cell_h: u32) -> GameResult<Self> {
        let load = |name: &str| -> GameResult<Rc<Sprite>> {
            let path = dir.join(format!("{name}.txt"));
            let text = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => GameError::MissingAsset { path: path.clone() },
                _ => GameError::Io {
                    path: path.clone(),
                    source: e,
                },
            })?;
            let sprite =
                Sprite::from_art(name, &text, cell_w, cell_h).ok_or_else(|| GameError::InvalidAsset {
                    path: path.clone(),
                    reason: "art has no opaque characters".to_string(),
                })?;
            debug!(
                "loaded sprite '{}' ({}x{})",
                name,
                sprite.mask.width(),
                sprite.mask.height()
            );
            Ok(Rc::new(sprite))
        };

        Ok(Self {
            player_ship: load("ship_yellow")?,
            player_laser: load("laser_yellow")?,
            red_ship: load("ship_red")?,
            red_laser: load("laser_red")?,
            green_ship: load("ship_green")?,
            green_laser: load("laser_green")?,
            blue_ship: load("ship_blue")?,
            blue_laser: load("laser_blue")?,
            power_up: Rc::new(Sprite::power_up()),
        })
    }

    /// Ship and laser sprites for an enemy colour.
    pub fn enemy(&self, color: EnemyColor) -> (Rc<Sprite>, Rc<Sprite>) {
        match color {
            EnemyColor::Red => (self.red_ship.clone(), self.red_laser.clone()),
            EnemyColor::Green => (self.green_ship.clone(), self.green_laser.clone()),
            EnemyColor::Blue => (self.blue_ship.clone(), self.blue_laser.clone()),
        }
    }
}
