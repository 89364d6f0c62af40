/// Rendering layer.  All terminal output lives here.
///
/// `render` reads the session and queues crossterm commands for one frame.
/// Positions are logical canvas units; `Viewport` decides which terminal
/// cell each one lands in.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::compute::Difficulty;
use crate::constants::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::entities::{EnemyColor, GameState, Player, PowerUpKind};
use crate::score::insert_high_score;
use crate::session::{Region, Session, START_BUTTON};
use crate::sprites::Sprite;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_TEXT: Color = Color::White;
const C_START: Color = Color::Yellow;
const C_PLAYER: Color = Color::Yellow;
const C_SHIELD: Color = Color::Rgb { r: 0, g: 191, b: 255 };
const C_HEALTH_FULL: Color = Color::Green;
const C_HEALTH_LOST: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

fn enemy_color(color: EnemyColor) -> Color {
    match color {
        EnemyColor::Red => Color::Red,
        EnemyColor::Green => Color::Green,
        EnemyColor::Blue => Color::Blue,
    }
}

fn power_up_color(kind: PowerUpKind) -> Color {
    match kind {
        PowerUpKind::Shield => Color::Red,
        PowerUpKind::MultiShot => Color::Yellow,
        PowerUpKind::Health => Color::Green,
    }
}

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Maps logical canvas units to terminal cells and back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols: cols.max(1),
            rows: rows.max(1),
        }
    }

    /// Terminal cell containing a logical point, if it is on the canvas.
    pub fn to_cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        if !(0.0..CANVAS_WIDTH).contains(&x) || !(0.0..CANVAS_HEIGHT).contains(&y) {
            return None;
        }
        let col = (x / CANVAS_WIDTH * self.cols as f32) as u16;
        let row = (y / CANVAS_HEIGHT * self.rows as f32) as u16;
        Some((col.min(self.cols - 1), row.min(self.rows - 1)))
    }

    /// Logical point at the centre of a terminal cell.
    pub fn to_logical(&self, col: u16, row: u16) -> (f32, f32) {
        (
            (col as f32 + 0.5) * CANVAS_WIDTH / self.cols as f32,
            (row as f32 + 0.5) * CANVAS_HEIGHT / self.rows as f32,
        )
    }

    /// The cells whose centres fall inside `region`: the first row that
    /// qualifies and the inclusive column range on it.  A click on any of
    /// these cells lands inside the region.
    pub fn cell_span(&self, region: &Region) -> Option<(u16, u16, u16)> {
        let row = (0..self.rows).find(|&r| {
            let (_, y) = self.to_logical(0, r);
            region.contains(region.x, y)
        })?;
        let mut cols = (0..self.cols).filter(|&c| {
            let (x, _) = self.to_logical(c, row);
            region.contains(x, region.y)
        });
        let first = cols.next()?;
        let last = cols.last().unwrap_or(first);
        Some((row, first, last))
    }
}

/// Fit `label` into exactly `width` cells: centred with padding, or cut
/// short when the span is too narrow.
pub fn fit_label(label: &str, width: usize) -> String {
    if label.chars().count() >= width {
        label.chars().take(width).collect()
    } else {
        format!("{label:^width$}")
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame for whatever state the session is in.
pub fn render<W: Write>(out: &mut W, session: &Session, vp: &Viewport) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    match session.state {
        GameState::Menu => draw_menu(out, session, vp)?,
        GameState::Playing => draw_playfield(out, session, vp)?,
        GameState::Paused => {
            draw_playfield(out, session, vp)?;
            draw_centered(out, vp, CANVAS_HEIGHT / 2.0, "GAME PAUSED", C_TEXT)?;
        }
        GameState::GameOver => draw_game_over(out, session, vp)?,
    }

    // Leave the cursor on the bottom row.
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, vp.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Primitives ────────────────────────────────────────────────────────────────

fn draw_text<W: Write>(
    out: &mut W,
    vp: &Viewport,
    x: f32,
    y: f32,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    if let Some((col, row)) = vp.to_cell(x, y) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(text))?;
    }
    Ok(())
}

/// Text centred horizontally on the row containing logical `y`.
fn draw_centered<W: Write>(
    out: &mut W,
    vp: &Viewport,
    y: f32,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    if let Some((_, row)) = vp.to_cell(CANVAS_WIDTH / 2.0, y) {
        let col = (vp.cols / 2).saturating_sub(text.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(text))?;
    }
    Ok(())
}

/// Blit a sprite's art with its top-left corner at logical `(x, y)`.
fn draw_sprite<W: Write>(
    out: &mut W,
    vp: &Viewport,
    sprite: &Sprite,
    x: f32,
    y: f32,
    color: Color,
) -> std::io::Result<()> {
    let (cell_w, cell_h) = sprite.cell;
    out.queue(style::SetForegroundColor(color))?;
    for (r, line) in sprite.art.iter().enumerate() {
        for (c, ch) in line.chars().enumerate() {
            if ch == ' ' {
                continue;
            }
            let lx = x + (c as u32 * cell_w) as f32;
            let ly = y + (r as u32 * cell_h) as f32;
            if let Some((col, row)) = vp.to_cell(lx, ly) {
                out.queue(cursor::MoveTo(col, row))?;
                out.queue(Print(ch))?;
            }
        }
    }
    Ok(())
}

/// A horizontal bar of `width` logical units starting at `(x, y)`.
fn draw_bar<W: Write>(
    out: &mut W,
    vp: &Viewport,
    x: f32,
    y: f32,
    width: f32,
    color: Color,
) -> std::io::Result<()> {
    if width <= 0.0 {
        return Ok(());
    }
    let Some((start, row)) = vp.to_cell(x, y) else {
        return Ok(());
    };
    let end = vp
        .to_cell((x + width).min(CANVAS_WIDTH - 1.0), y)
        .map(|(c, _)| c)
        .unwrap_or(start);
    out.queue(cursor::MoveTo(start, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print("▄".repeat(end.saturating_sub(start) as usize + 1)))?;
    Ok(())
}

// ── Menu ──────────────────────────────────────────────────────────────────────

const CONTROLS: &[&str] = &[
    "Controls:",
    "W - Move Up",
    "S - Move Down",
    "A - Move Left",
    "D - Move Right",
    "SPACE - Shoot",
    "ESC - Pause Game",
    "Q - Quit",
    "Note: Game gets harder as your score increases!",
];

fn draw_menu<W: Write>(out: &mut W, session: &Session, vp: &Viewport) -> std::io::Result<()> {
    draw_centered(out, vp, 200.0, "SPACE INVADERS", C_TEXT)?;

    for (i, line) in CONTROLS.iter().enumerate() {
        draw_centered(out, vp, 300.0 + i as f32 * 45.0, line, C_TEXT)?;
    }

    if !session.scores.high_scores.is_empty() {
        let best = session
            .scores
            .high_scores
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join("  ");
        draw_centered(out, vp, 740.0, &format!("High Scores: {best}"), C_HINT)?;
    }

    // The label covers exactly the cells that accept the click.
    if let Some((row, first, last)) = vp.cell_span(&START_BUTTON) {
        let text = fit_label("[ Click here to Start ]", (last - first + 1) as usize);
        out.queue(cursor::MoveTo(first, row))?;
        out.queue(style::SetForegroundColor(C_START))?;
        out.queue(Print(text))?;
    }
    let cy = START_BUTTON.y + START_BUTTON.h / 2.0;
    draw_centered(out, vp, cy + 60.0, "(or press Enter)", C_HINT)?;
    Ok(())
}

// ── Playfield ─────────────────────────────────────────────────────────────────

fn draw_playfield<W: Write>(out: &mut W, session: &Session, vp: &Viewport) -> std::io::Result<()> {
    let world = &session.world;

    for enemy in &world.enemies {
        let color = enemy_color(enemy.color);
        draw_sprite(out, vp, &enemy.ship.sprite, enemy.ship.x, enemy.ship.y, color)?;
        for laser in &enemy.ship.lasers {
            draw_sprite(out, vp, &laser.sprite, laser.x, laser.y, color)?;
        }
    }

    draw_player(out, &world.player, vp)?;

    for power_up in &world.power_ups {
        let color = power_up_color(power_up.kind);
        draw_sprite(out, vp, &power_up.sprite, power_up.x, power_up.y, color)?;
    }

    draw_hud(out, session, vp)
}

fn draw_player<W: Write>(out: &mut W, player: &Player, vp: &Viewport) -> std::io::Result<()> {
    let ship = &player.ship;
    draw_sprite(out, vp, &ship.sprite, ship.x, ship.y, C_PLAYER)?;
    for laser in &ship.lasers {
        draw_sprite(out, vp, &laser.sprite, laser.x, laser.y, C_PLAYER)?;
    }

    // Health bar: red underneath, green for what's left.
    let bar_y = ship.y + ship.height() + 10.0;
    draw_bar(out, vp, ship.x, bar_y, ship.width(), C_HEALTH_LOST)?;
    draw_bar(
        out,
        vp,
        ship.x,
        bar_y,
        ship.width() * player.health_fraction(),
        C_HEALTH_FULL,
    )?;

    if player.shield_visible() {
        draw_shield(out, player, vp)?;
    }
    Ok(())
}

/// Ring around the ship plus a charge counter above it.
fn draw_shield<W: Write>(out: &mut W, player: &Player, vp: &Viewport) -> std::io::Result<()> {
    let ship = &player.ship;
    let radius = ship.width().max(ship.height()) + 10.0;
    let cx = ship.x + ship.width() / 2.0;
    let cy = ship.y + ship.height() / 2.0;

    const SEGMENTS: usize = 48;
    out.queue(style::SetForegroundColor(C_SHIELD))?;
    for i in 0..SEGMENTS {
        let angle = i as f32 / SEGMENTS as f32 * std::f32::consts::TAU;
        let x = cx + radius * angle.cos();
        let y = cy + radius * angle.sin();
        if let Some((col, row)) = vp.to_cell(x, y) {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(Print("·"))?;
        }
    }

    let label = format!("Shield: {}", player.shield_charges);
    draw_text(out, vp, ship.x, ship.y - 20.0, &label, C_SHIELD)
}

// ── HUD ───────────────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, session: &Session, vp: &Viewport) -> std::io::Result<()> {
    let level = Difficulty::from_score(session.scores.score).level;
    let lines = [
        format!("Score: {}", session.scores.score),
        format!("Health: {}", session.world.player.health()),
        format!("Level: {}", level),
    ];
    for (i, line) in lines.iter().enumerate() {
        draw_text(out, vp, 10.0, 10.0 + i as f32 * 40.0, line, C_TEXT)?;
    }
    Ok(())
}

// ── Game-over screen ──────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, session: &Session, vp: &Viewport) -> std::io::Result<()> {
    let mid = CANVAS_HEIGHT / 2.0;
    let score_line = format!("Final Score: {}", session.scores.score);
    draw_centered(out, vp, mid - 100.0, "GAME OVER", Color::Red)?;
    draw_centered(out, vp, mid - 50.0, &score_line, C_TEXT)?;
    draw_centered(out, vp, mid + 50.0, "Press R to Restart", C_TEXT)?;

    // The table as it will be saved, this run included.
    let mut table = session.scores.high_scores.clone();
    insert_high_score(&mut table, session.scores.score);
    for (i, score) in table.iter().enumerate() {
        let line = format!("{}. {:>6}", i + 1, score);
        draw_centered(out, vp, mid + 120.0 + i as f32 * 40.0, &line, C_HINT)?;
    }
    Ok(())
}
