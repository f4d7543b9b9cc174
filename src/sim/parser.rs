//! Level schema parser
//!
//! A schema is a list of rows, one character per cell. Each character maps
//! through a fixed symbol table to terrain, an actor spawn, or nothing.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::actor::Actor;
use super::grid::{Cell, Grid, Obstacle};
use super::level::Level;
use super::vector::Vector;
use crate::error::SimResult;

/// Every character a schema understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Wall,
    Lava,
    Player,
    Coin,
    HorizontalFireball,
    VerticalFireball,
    FireRain,
}

impl Symbol {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'x' => Some(Symbol::Wall),
            '!' => Some(Symbol::Lava),
            '@' => Some(Symbol::Player),
            'o' => Some(Symbol::Coin),
            '=' => Some(Symbol::HorizontalFireball),
            '|' => Some(Symbol::VerticalFireball),
            'v' => Some(Symbol::FireRain),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Symbol::Wall => 'x',
            Symbol::Lava => '!',
            Symbol::Player => '@',
            Symbol::Coin => 'o',
            Symbol::HorizontalFireball => '=',
            Symbol::VerticalFireball => '|',
            Symbol::FireRain => 'v',
        }
    }

    /// Terrain this symbol paints, if any
    pub fn obstacle(&self) -> Cell {
        match self {
            Symbol::Wall => Some(Obstacle::Wall),
            Symbol::Lava => Some(Obstacle::Lava),
            _ => None,
        }
    }

    /// Whether this symbol spawns an actor
    pub fn is_actor(&self) -> bool {
        self.obstacle().is_none()
    }
}

/// Terrain for a single schema character
pub fn obstacle_from_symbol(c: char) -> Cell {
    Symbol::from_char(c).and_then(|s| s.obstacle())
}

/// Builds levels from schemas. Owns the RNG that seeds coin animation
/// phases, so the same seed always yields the same level.
#[derive(Debug, Clone)]
pub struct LevelParser {
    rng: Pcg32,
}

impl LevelParser {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Construct the actor for `symbol` spawned at `spawn`
    pub fn actor_from_symbol(&mut self, symbol: Symbol, spawn: Vector) -> SimResult<Option<Actor>> {
        let actor = match symbol {
            Symbol::Wall | Symbol::Lava => return Ok(None),
            Symbol::Player => Actor::player(spawn)?,
            Symbol::Coin => Actor::coin(spawn, &mut self.rng)?,
            Symbol::HorizontalFireball => Actor::horizontal_fireball(spawn)?,
            Symbol::VerticalFireball => Actor::vertical_fireball(spawn)?,
            Symbol::FireRain => Actor::fire_rain(spawn)?,
        };
        Ok(Some(actor))
    }

    pub fn create_grid<S: AsRef<str>>(&self, scene: &[S]) -> Grid {
        Grid::new(
            scene
                .iter()
                .map(|row| row.as_ref().chars().map(obstacle_from_symbol).collect())
                .collect(),
        )
    }

    /// One actor per actor symbol, spawned at its (column, row)
    pub fn create_actors<S: AsRef<str>>(&mut self, scene: &[S]) -> SimResult<Vec<Actor>> {
        let mut actors = Vec::new();
        for (y, row) in scene.iter().enumerate() {
            for (x, c) in row.as_ref().chars().enumerate() {
                let Some(symbol) = Symbol::from_char(c) else {
                    continue;
                };
                if let Some(actor) = self.actor_from_symbol(symbol, Vector::new(x as f64, y as f64))? {
                    actors.push(actor);
                }
            }
        }
        Ok(actors)
    }

    pub fn parse<S: AsRef<str>>(&mut self, scene: &[S]) -> SimResult<Level> {
        let grid = self.create_grid(scene);
        let actors = self.create_actors(scene)?;
        log::info!(
            "Parsed level {}x{} with {} actors",
            grid.width(),
            grid.height(),
            actors.len()
        );
        Ok(Level::new(grid, actors))
    }
}

impl Default for LevelParser {
    fn default() -> Self {
        Self::new(0)
    }
}
