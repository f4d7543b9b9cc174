//! Tile Platformer - a grid-quantized platformer simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (vectors, actors, obstacle grid, level state)
//! - `levels`: Level pack loading (JSON schemas)
//! - `settings`: Runner configuration
//! - `error`: Error taxonomy for the core

pub mod error;
pub mod levels;
pub mod settings;
pub mod sim;

pub use error::{LoadError, SimError, SimResult};
pub use levels::LevelPack;
pub use settings::Settings;

/// Simulation constants
pub mod consts {
    use glam::DVec2;

    /// Largest time slice a single actor update may cover
    pub const MAX_STEP: f64 = 0.05;
    /// Sub-step cap per tick; time past it is dropped
    pub const MAX_SUBSTEPS: u32 = 200;
    /// Grace period between an outcome and the level reporting finished
    pub const FINISH_DELAY: f64 = 1.0;

    /// Player box (feet sit on the spawn cell, body extends upward)
    pub const PLAYER_SIZE: DVec2 = DVec2::new(0.8, 1.5);
    pub const PLAYER_OFFSET: DVec2 = DVec2::new(0.0, -0.5);

    /// Coin box, centered inside its 1x1 cell
    pub const COIN_SIZE: DVec2 = DVec2::new(0.6, 0.6);
    pub const COIN_OFFSET: DVec2 = DVec2::new(0.2, 0.1);
    /// Spring animation: phase advance (radians/s) and vertical reach
    pub const SPRING_SPEED: f64 = 8.0;
    pub const SPRING_AMPLITUDE: f64 = 0.07;

    /// Fireballs are always a single cell
    pub const FIREBALL_SIZE: DVec2 = DVec2::new(1.0, 1.0);
    pub const HORIZONTAL_FIREBALL_VELOCITY: DVec2 = DVec2::new(2.0, 0.0);
    pub const VERTICAL_FIREBALL_VELOCITY: DVec2 = DVec2::new(0.0, 2.0);
    pub const FIRE_RAIN_VELOCITY: DVec2 = DVec2::new(0.0, 3.0);
}
