mod common;

use std::path::{Path, PathBuf};

use common::*;
use void_raiders::config::GameConfig;
use void_raiders::display::{fit_label, render, Viewport};
use void_raiders::entities::GameState;
use void_raiders::error::GameError;
use void_raiders::session::START_BUTTON;
use void_raiders::sound::{available_cues, SoundCue};
use void_raiders::sprites::{Sprite, SpriteSheet};

// ── Config ────────────────────────────────────────────────────────────────────

#[test]
fn partial_config_keeps_other_defaults() {
    let config = GameConfig::from_toml(Path::new("t.toml"), "fps = 30\nassets_dir = \"data\"\n").unwrap();
    assert_eq!(config.fps, 30);
    assert_eq!(config.assets_dir, PathBuf::from("data"));
    assert_eq!(config.sprites_dir(), PathBuf::from("data").join("sprites"));
    assert_eq!(config.high_score_path, GameConfig::default().high_score_path);
    assert_eq!(config.cell_width, 10);
}

#[test]
fn degenerate_numbers_are_repaired() {
    let config =
        GameConfig::from_toml(Path::new("t.toml"), "fps = 0\ncell_width = 0\ncell_height = 0\n").unwrap();
    assert_eq!(config.fps, 60);
    assert_eq!((config.cell_width, config.cell_height), (1, 1));
}

#[test]
fn malformed_config_is_an_error() {
    let err = GameConfig::from_toml(Path::new("t.toml"), "fps = \"fast\"").unwrap_err();
    assert!(matches!(err, GameError::Config { .. }));
}

#[test]
fn missing_config_file_is_silently_default() {
    let dir = tempfile::tempdir().unwrap();
    let (config, error) = GameConfig::load_or_default(&dir.path().join("void_raiders.toml"));
    assert_eq!(config, GameConfig::default());
    assert!(error.is_none());
}

#[test]
fn broken_config_file_returns_defaults_and_the_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("void_raiders.toml");
    std::fs::write(&path, "fps = [").unwrap();

    let (config, error) = GameConfig::load_or_default(&path);
    assert_eq!(config, GameConfig::default());
    let error = error.expect("parse failure is reported to the caller");
    assert!(matches!(error, GameError::Config { .. }));
    assert!(error.to_string().contains("void_raiders.toml"));
}

#[test]
fn valid_config_file_is_loaded_without_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("void_raiders.toml");
    std::fs::write(&path, "fps = 120").unwrap();

    let (config, error) = GameConfig::load_or_default(&path);
    assert_eq!(config.fps, 120);
    assert!(error.is_none());
}

// ── Sprites ───────────────────────────────────────────────────────────────────

#[test]
fn bundled_sprites_have_expected_sizes() {
    let sheet = sprites();
    assert_eq!((sheet.player_ship.width(), sheet.player_ship.height()), (90.0, 80.0));
    assert_eq!((sheet.player_laser.width(), sheet.player_laser.height()), (50.0, 40.0));
    for ship in [&sheet.red_ship, &sheet.green_ship, &sheet.blue_ship] {
        assert_eq!((ship.width(), ship.height()), (50.0, 40.0));
    }
    assert_eq!((sheet.power_up.width(), sheet.power_up.height()), (20.0, 20.0));
}

#[test]
fn art_trims_trailing_blank_lines_but_keeps_indent() {
    let sprite = Sprite::from_art("t", "  #\n\n   \n", 10, 20).unwrap();
    assert_eq!(sprite.art, vec!["  #".to_string()]);
    assert_eq!((sprite.width(), sprite.height()), (30.0, 20.0));
    assert!(!sprite.mask.get(0, 0));
    assert!(sprite.mask.get(25, 10));
}

#[test]
fn blank_art_is_rejected() {
    assert!(Sprite::from_art("t", "   \n  \n", 10, 20).is_none());
}

#[test]
fn missing_sprite_dir_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let err = SpriteSheet::load(&dir.path().join("sprites"), 10, 20).unwrap_err();
    assert!(matches!(err, GameError::MissingAsset { .. }));
    assert!(err.to_string().contains("ship_yellow.txt"));
}

#[test]
fn empty_sprite_file_is_invalid() {
    let dir = tempfile::tempdir().unwrap();
    for entry in std::fs::read_dir(assets_dir().join("sprites")).unwrap() {
        let entry = entry.unwrap();
        std::fs::copy(entry.path(), dir.path().join(entry.file_name())).unwrap();
    }
    std::fs::write(dir.path().join("laser_green.txt"), "\n").unwrap();

    let err = SpriteSheet::load(dir.path(), 10, 20).unwrap_err();
    assert!(matches!(err, GameError::InvalidAsset { .. }));
}

// ── Sound ─────────────────────────────────────────────────────────────────────

#[test]
fn only_present_cue_files_are_available() {
    let dir = tempfile::tempdir().unwrap();
    assert!(available_cues(dir.path()).is_empty());

    std::fs::write(dir.path().join(SoundCue::Explosion.file_name()), b"").unwrap();
    assert_eq!(available_cues(dir.path()), vec![SoundCue::Explosion]);
}

#[test]
fn recorder_sees_cues_in_order() {
    let recorder = Recorder::default();
    let mut sound = recorder.manager();
    sound.play_music();
    sound.play(SoundCue::Laser);
    sound.stop_music();
    assert_eq!(recorder.events(), vec!["music:start", "laser", "music:stop"]);
}

// ── Rendering ─────────────────────────────────────────────────────────────────

fn screen(session: &void_raiders::session::Session) -> String {
    let mut out = Vec::new();
    render(&mut out, session, &Viewport::new(200, 100)).unwrap();
    String::from_utf8_lossy(&out).into_owned()
}

#[test]
fn menu_screen_lists_controls_and_start() {
    let dir = tempfile::tempdir().unwrap();
    let s = session_in(&dir, &Recorder::default());
    let text = screen(&s);
    assert!(text.contains("SPACE INVADERS"));
    assert!(text.contains("SPACE - Shoot"));
    assert!(text.contains("Click here to Start"));
}

#[test]
fn playing_screen_shows_hud_and_shield_only_when_charged() {
    let dir = tempfile::tempdir().unwrap();
    let mut s = session_in(&dir, &Recorder::default());
    s.state = GameState::Playing;
    s.scores.score = 250;

    let text = screen(&s);
    assert!(text.contains("Score: 250"));
    assert!(text.contains("Health: 100"));
    assert!(text.contains("Level: 3"));
    assert!(!text.contains("Shield:"));

    s.world.player.shield_charges = 3;
    assert!(screen(&s).contains("Shield: 3"));
}

#[test]
fn paused_and_game_over_screens() {
    let dir = tempfile::tempdir().unwrap();
    let mut s = session_in(&dir, &Recorder::default());

    s.state = GameState::Paused;
    let text = screen(&s);
    assert!(text.contains("GAME PAUSED"));
    assert!(text.contains("Score: 0"));

    s.state = GameState::GameOver;
    s.scores.score = 77;
    s.scores.high_scores = vec![300, 120];
    let text = screen(&s);
    assert!(text.contains("GAME OVER"));
    assert!(text.contains("Final Score: 77"));
    assert!(text.contains("Press R to Restart"));
    assert!(text.contains("1.    300"));
    // The run just finished is already in the table, in its final place.
    assert!(text.contains("3.     77"));
}

#[test]
fn game_over_table_shows_a_new_best_on_top() {
    let dir = tempfile::tempdir().unwrap();
    let mut s = session_in(&dir, &Recorder::default());
    s.state = GameState::GameOver;
    s.scores.high_scores = vec![50, 40, 30, 20, 10];
    s.scores.score = 999;

    let text = screen(&s);
    assert!(text.contains("1.    999"));
    assert!(text.contains("5.     20"));
    assert!(!text.contains("    10"));
    // Drawing never touches the stored table.
    assert_eq!(s.scores.high_scores, vec![50, 40, 30, 20, 10]);
}

#[test]
fn start_label_covers_only_clickable_cells() {
    for cols in [20, 30, 45, 80, 200] {
        let vp = Viewport::new(cols, 50);
        let (row, first, last) = vp.cell_span(&START_BUTTON).expect("button is on screen");
        for col in first..=last {
            let (x, y) = vp.to_logical(col, row);
            assert!(START_BUTTON.contains(x, y), "col {col} of {cols}");
        }
        if first > 0 {
            let (x, y) = vp.to_logical(first - 1, row);
            assert!(!START_BUTTON.contains(x, y));
        }
        if last + 1 < cols {
            let (x, y) = vp.to_logical(last + 1, row);
            assert!(!START_BUTTON.contains(x, y));
        }
    }
}

#[test]
fn start_label_is_cut_to_the_button_on_narrow_terminals() {
    assert_eq!(fit_label("[ Start ]", 5), "[ Sta");
    assert_eq!(fit_label("ab", 6), "  ab  ");
    assert_eq!(fit_label("abc", 3), "abc");

    let dir = tempfile::tempdir().unwrap();
    let s = session_in(&dir, &Recorder::default());
    let vp = Viewport::new(30, 50);
    let (_, first, last) = vp.cell_span(&START_BUTTON).unwrap();
    let mut out = Vec::new();
    render(&mut out, &s, &vp).unwrap();
    let text = String::from_utf8_lossy(&out).into_owned();
    let expected = fit_label("[ Click here to Start ]", (last - first + 1) as usize);
    assert!(expected.chars().count() < 23);
    assert!(text.contains(&expected));
}
