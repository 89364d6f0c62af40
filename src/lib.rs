pub mod compute;
pub mod config;
pub mod constants;
pub mod display;
pub mod entities;
pub mod error;
pub mod input;
pub mod mask;
pub mod score;
pub mod ship;
pub mod sound;
pub mod sprites;
pub mod session;
