//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through explicit deltas
//! - Seeded RNG only
//! - Stable iteration order (arena order)
//! - No rendering or platform dependencies

pub mod actor;
pub mod grid;
pub mod level;
pub mod parser;
pub mod tick;
pub mod vector;

pub use actor::{Actor, ActorKind, Spring, Variant};
pub use grid::{Cell, Grid, Obstacle};
pub use level::{ActorId, Contact, Level, Outcome};
pub use parser::{LevelParser, Symbol, obstacle_from_symbol};
pub use tick::{RunReport, resolve_player_contacts, run_level, tick, tick_with_step};
pub use vector::{Vector, VectorExt};
