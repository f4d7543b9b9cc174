//! Actor model
//!
//! Every moving thing in a level is an axis-aligned box with a position, a
//! size and a velocity. Per-type behavior is selected by a closed `Variant`
//! tag rather than a trait object: `act` and `handle_obstacle` are the only
//! two places where variants differ.

use std::f64::consts::TAU;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::grid::Grid;
use super::vector::{Vector, VectorExt};
use crate::consts::*;
use crate::error::{SimError, SimResult};

/// Outcome-relevant classification of an actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorKind {
    Actor,
    Player,
    Coin,
    Fireball,
}

impl ActorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActorKind::Actor => "actor",
            ActorKind::Player => "player",
            ActorKind::Coin => "coin",
            ActorKind::Fireball => "fireball",
        }
    }
}

/// Vertical bob animation of a coin around its anchor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spring {
    /// Anchor position; never changes after construction
    real_position: Vector,
    /// Current phase (radians)
    phase: f64,
    speed: f64,
    amplitude: f64,
}

impl Spring {
    pub fn new(real_position: Vector, phase: f64) -> Self {
        Self {
            real_position,
            phase,
            speed: SPRING_SPEED,
            amplitude: SPRING_AMPLITUDE,
        }
    }

    pub fn real_position(&self) -> Vector {
        self.real_position
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// Advance the phase; negative time runs the animation backward
    pub fn advance(&mut self, time: f64) {
        self.phase += self.speed * time;
    }

    /// Current offset from the anchor
    pub fn offset(&self) -> Vector {
        Vector::new(0.0, self.phase.sin() * self.amplitude)
    }

    pub fn position(&self) -> Vector {
        self.real_position.plus(self.offset())
    }
}

/// Concrete actor type and its per-type state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Variant {
    /// Plain actor with no behavior
    Generic,
    Player,
    Coin(Spring),
    /// Fireball with an arbitrary velocity and the default bounce
    Fireball,
    HorizontalFireball,
    VerticalFireball,
    /// Falls and respawns at `start` instead of bouncing
    FireRain { start: Vector },
}

impl Variant {
    pub fn kind(&self) -> ActorKind {
        match self {
            Variant::Generic => ActorKind::Actor,
            Variant::Player => ActorKind::Player,
            Variant::Coin(_) => ActorKind::Coin,
            Variant::Fireball
            | Variant::HorizontalFireball
            | Variant::VerticalFireball
            | Variant::FireRain { .. } => ActorKind::Fireball,
        }
    }
}

/// An axis-aligned box in level space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub position: Vector,
    pub size: Vector,
    pub velocity: Vector,
    variant: Variant,
}

impl Actor {
    /// Create a generic actor
    pub fn new(position: Vector, size: Vector, velocity: Vector) -> SimResult<Self> {
        Self::with_variant(position, size, velocity, Variant::Generic)
    }

    fn with_variant(
        position: Vector,
        size: Vector,
        velocity: Vector,
        variant: Variant,
    ) -> SimResult<Self> {
        if !position.is_finite() || !velocity.is_finite() {
            return Err(SimError::InvalidArgument(format!(
                "actor position {position} and velocity {velocity} must be finite"
            )));
        }
        if !size.is_finite() || size.x < 0.0 || size.y < 0.0 {
            return Err(SimError::InvalidArgument(format!(
                "actor size {size} must be finite and non-negative"
            )));
        }
        Ok(Self {
            position,
            size,
            velocity,
            variant,
        })
    }

    /// Player standing on the `spawn` cell
    pub fn player(spawn: Vector) -> SimResult<Self> {
        Self::with_variant(
            spawn.plus(PLAYER_OFFSET),
            PLAYER_SIZE,
            Vector::ZERO,
            Variant::Player,
        )
    }

    /// Coin on the `spawn` cell with a random starting phase
    pub fn coin<R: Rng>(spawn: Vector, rng: &mut R) -> SimResult<Self> {
        let phase = rng.random_range(0.0..TAU);
        Self::coin_with_phase(spawn, phase)
    }

    /// Coin on the `spawn` cell with a fixed starting phase
    pub fn coin_with_phase(spawn: Vector, phase: f64) -> SimResult<Self> {
        if !phase.is_finite() {
            return Err(SimError::InvalidArgument(format!(
                "coin phase {phase} is not finite"
            )));
        }
        let position = spawn.plus(COIN_OFFSET);
        Self::with_variant(
            position,
            COIN_SIZE,
            Vector::ZERO,
            Variant::Coin(Spring::new(position, phase)),
        )
    }

    /// Single-cell fireball with an arbitrary velocity
    pub fn fireball(position: Vector, velocity: Vector) -> SimResult<Self> {
        Self::with_variant(position, FIREBALL_SIZE, velocity, Variant::Fireball)
    }

    pub fn horizontal_fireball(spawn: Vector) -> SimResult<Self> {
        Self::with_variant(
            spawn,
            FIREBALL_SIZE,
            HORIZONTAL_FIREBALL_VELOCITY,
            Variant::HorizontalFireball,
        )
    }

    pub fn vertical_fireball(spawn: Vector) -> SimResult<Self> {
        Self::with_variant(
            spawn,
            FIREBALL_SIZE,
            VERTICAL_FIREBALL_VELOCITY,
            Variant::VerticalFireball,
        )
    }

    pub fn fire_rain(spawn: Vector) -> SimResult<Self> {
        Self::with_variant(
            spawn,
            FIREBALL_SIZE,
            FIRE_RAIN_VELOCITY,
            Variant::FireRain { start: spawn },
        )
    }

    pub fn variant(&self) -> &Variant {
        &self.variant
    }

    pub fn kind(&self) -> ActorKind {
        self.variant.kind()
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.position.x
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.position.y
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.position.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.position.y + self.size.y
    }

    /// Strict box overlap; shared edges do not count and an actor never
    /// intersects itself
    pub fn is_intersect(&self, other: &Actor) -> bool {
        if std::ptr::eq(self, other) {
            return false;
        }
        overlaps(self, other.left(), other.top(), other.right(), other.bottom())
    }

    /// Where straight-line motion would put the actor after `time`
    pub fn next_position(&self, time: f64) -> Vector {
        self.position.plus(self.velocity.times(time))
    }

    /// Advance this actor by `time` against the static terrain
    pub fn act(&mut self, time: f64, grid: &Grid) -> SimResult<()> {
        if !time.is_finite() {
            return Err(SimError::InvalidArgument(format!(
                "time step {time} is not finite"
            )));
        }

        match &mut self.variant {
            Variant::Generic | Variant::Player => {}
            Variant::Coin(spring) => {
                let mut advanced = *spring;
                advanced.advance(time);
                let position = advanced.position();
                if !advanced.phase.is_finite() || !position.is_finite() {
                    return Err(SimError::InvalidArgument(format!(
                        "time step {time} overflows the coin animation"
                    )));
                }
                *spring = advanced;
                self.position = position;
            }
            Variant::Fireball
            | Variant::HorizontalFireball
            | Variant::VerticalFireball
            | Variant::FireRain { .. } => {
                let next = self.next_position(time);
                if grid.obstacle_at(next, self.size)?.is_some() {
                    self.handle_obstacle();
                } else {
                    self.position = next;
                }
            }
        }
        Ok(())
    }

    /// Reaction to a blocked next position
    pub fn handle_obstacle(&mut self) {
        match self.variant {
            Variant::FireRain { start } => {
                log::debug!("fire rain respawned at ({}, {})", start.x, start.y);
                self.position = start;
            }
            _ => self.velocity = self.velocity.times(-1.0),
        }
    }
}

/// Whether `actor` strictly overlaps the box `[left, right) x [top, bottom)`
pub(crate) fn overlaps(actor: &Actor, left: f64, top: f64, right: f64, bottom: f64) -> bool {
    left < actor.right() && top < actor.bottom() && right > actor.left() && bottom > actor.top()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::grid::Obstacle;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn open_grid(width: usize, height: usize) -> Grid {
        Grid::new(vec![vec![None; width]; height])
    }

    fn boxed(x: f64, y: f64, w: f64, h: f64) -> Actor {
        Actor::new(Vector::new(x, y), Vector::new(w, h), Vector::ZERO).unwrap()
    }

    #[test]
    fn test_default_actor_edges() {
        let a = boxed(1.0, 2.0, 3.0, 4.0);
        assert_eq!(a.left(), 1.0);
        assert_eq!(a.top(), 2.0);
        assert_eq!(a.right(), 4.0);
        assert_eq!(a.bottom(), 6.0);
        assert_eq!(a.kind(), ActorKind::Actor);
    }

    #[test]
    fn test_constructor_rejects_bad_values() {
        let bad = Actor::new(Vector::new(f64::NAN, 0.0), Vector::ONE, Vector::ZERO);
        assert!(matches!(bad, Err(SimError::InvalidArgument(_))));
        assert!(Actor::new(Vector::ZERO, Vector::new(-1.0, 1.0), Vector::ZERO).is_err());
        assert!(Actor::new(Vector::ZERO, Vector::ONE, Vector::splat(f64::INFINITY)).is_err());
        assert!(Actor::player(Vector::new(f64::NAN, 1.0)).is_err());
        assert!(Actor::coin_with_phase(Vector::ZERO, f64::NAN).is_err());
    }

    #[test]
    fn test_not_intersecting_itself() {
        let a = boxed(0.0, 0.0, 1.0, 1.0);
        assert!(!a.is_intersect(&a));
        // A distinct actor with the same box does intersect
        let twin = a.clone();
        assert!(a.is_intersect(&twin));
    }

    #[test]
    fn test_edge_touching_is_not_intersection() {
        let a = boxed(0.0, 0.0, 1.0, 1.0);
        assert!(!a.is_intersect(&boxed(1.0, 0.0, 1.0, 1.0)));
        assert!(!a.is_intersect(&boxed(0.0, 1.0, 1.0, 1.0)));
        assert!(!a.is_intersect(&boxed(-1.0, -1.0, 1.0, 1.0)));
        assert!(a.is_intersect(&boxed(0.5, 0.5, 1.0, 1.0)));
        // Fully contained
        assert!(a.is_intersect(&boxed(0.25, 0.25, 0.5, 0.5)));
    }

    #[test]
    fn test_variant_sizes_and_offsets() {
        let player = Actor::player(Vector::new(2.0, 3.0)).unwrap();
        assert_eq!(player.kind(), ActorKind::Player);
        assert_eq!(player.position, Vector::new(2.0, 2.5));
        assert_eq!(player.size, Vector::new(0.8, 1.5));

        let coin = Actor::coin_with_phase(Vector::new(1.0, 1.0), 0.0).unwrap();
        assert_eq!(coin.kind(), ActorKind::Coin);
        assert_eq!(coin.position, Vector::new(1.2, 1.1));
        assert_eq!(coin.size, Vector::new(0.6, 0.6));

        let h = Actor::horizontal_fireball(Vector::ZERO).unwrap();
        let v = Actor::vertical_fireball(Vector::ZERO).unwrap();
        let r = Actor::fire_rain(Vector::ZERO).unwrap();
        assert_eq!(h.velocity, Vector::new(2.0, 0.0));
        assert_eq!(v.velocity, Vector::new(0.0, 2.0));
        assert_eq!(r.velocity, Vector::new(0.0, 3.0));
        for f in [&h, &v, &r] {
            assert_eq!(f.kind(), ActorKind::Fireball);
            assert_eq!(f.size, Vector::ONE);
        }
    }

    #[test]
    fn test_random_coin_phase_in_range() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..32 {
            let coin = Actor::coin(Vector::ZERO, &mut rng).unwrap();
            let Variant::Coin(spring) = coin.variant() else {
                panic!("expected coin variant");
            };
            assert!((0.0..TAU).contains(&spring.phase()));
            assert_eq!(spring.real_position(), coin.position);
        }
    }

    #[test]
    fn test_fireball_bounces_off_wall() {
        // Single open cell surrounded by level edges
        let grid = open_grid(1, 1);
        let mut fireball = Actor::horizontal_fireball(Vector::ZERO).unwrap();
        fireball.act(1.0, &grid).unwrap();
        assert_eq!(fireball.velocity, Vector::new(-2.0, 0.0));
        assert_eq!(fireball.position, Vector::ZERO);
    }

    #[test]
    fn test_fireball_moves_when_clear() {
        let grid = open_grid(3, 1);
        let mut fireball = Actor::horizontal_fireball(Vector::ZERO).unwrap();
        fireball.act(1.0, &grid).unwrap();
        assert_eq!(fireball.position, Vector::new(2.0, 0.0));
        assert_eq!(fireball.velocity, Vector::new(2.0, 0.0));
    }

    #[test]
    fn test_fireball_bounces_off_terrain_cell() {
        let grid = Grid::new(vec![vec![None, None, Some(Obstacle::Wall)]]);
        let mut fireball = Actor::fireball(Vector::ZERO, Vector::new(1.5, 0.0)).unwrap();
        fireball.act(1.0, &grid).unwrap();
        assert_eq!(fireball.position, Vector::ZERO);
        assert_eq!(fireball.velocity, Vector::new(-1.5, 0.0));
    }

    #[test]
    fn test_fire_rain_respawns() {
        let grid = open_grid(1, 5);
        let mut rain = Actor::fire_rain(Vector::ZERO).unwrap();
        rain.act(1.0, &grid).unwrap();
        assert_eq!(rain.position, Vector::new(0.0, 3.0));
        // Next step would fall out of the level
        rain.act(1.0, &grid).unwrap();
        assert_eq!(rain.position, Vector::ZERO);
        assert_eq!(rain.velocity, Vector::new(0.0, 3.0));
    }

    #[test]
    fn test_fireball_act_rejects_non_finite_time() {
        let grid = open_grid(3, 3);
        let mut fireball = Actor::vertical_fireball(Vector::ZERO).unwrap();
        assert!(fireball.act(f64::NAN, &grid).is_err());
        assert_eq!(fireball.position, Vector::ZERO);
    }

    #[test]
    fn test_coin_act_rejects_unusable_time() {
        let grid = Grid::default();
        let mut coin = Actor::coin_with_phase(Vector::new(1.0, 1.0), 0.0).unwrap();
        let before = coin.clone();
        assert!(matches!(
            coin.act(f64::INFINITY, &grid),
            Err(SimError::InvalidArgument(_))
        ));
        assert!(coin.act(f64::NAN, &grid).is_err());
        // Finite, but the phase overflows to infinity
        assert!(coin.act(1e308, &grid).is_err());
        assert_eq!(coin, before);
        assert!(coin.position.is_finite());
    }

    #[test]
    fn test_coin_bobs_deterministically() {
        let grid = Grid::default();
        let mut coin = Actor::coin_with_phase(Vector::new(1.0, 1.0), 0.0).unwrap();
        coin.act(0.5, &grid).unwrap();
        let expected = 1.1 + (4.0f64).sin() * 0.07;
        assert!((coin.position.y - expected).abs() < 1e-12);
        assert!((coin.position.x - 1.2).abs() < 1e-12);

        // Negative time runs the phase backward
        let mut coin = Actor::coin_with_phase(Vector::new(1.0, 1.0), 0.0).unwrap();
        coin.act(-0.5, &grid).unwrap();
        let expected = 1.1 + (-4.0f64).sin() * 0.07;
        assert!((coin.position.y - expected).abs() < 1e-12);
    }

    #[test]
    fn test_player_and_generic_do_not_move() {
        let grid = open_grid(5, 5);
        let mut player = Actor::player(Vector::new(1.0, 2.0)).unwrap();
        let before = player.position;
        player.act(1.0, &grid).unwrap();
        assert_eq!(player.position, before);

        let mut generic = Actor::new(Vector::ONE, Vector::ONE, Vector::new(5.0, 0.0)).unwrap();
        generic.act(1.0, &grid).unwrap();
        assert_eq!(generic.position, Vector::ONE);
    }

    proptest! {
        #[test]
        fn prop_intersection_is_symmetric(
            ax in -10.0f64..10.0, ay in -10.0f64..10.0, aw in 0.0f64..5.0, ah in 0.0f64..5.0,
            bx in -10.0f64..10.0, by in -10.0f64..10.0, bw in 0.0f64..5.0, bh in 0.0f64..5.0,
        ) {
            let a = boxed(ax, ay, aw, ah);
            let b = boxed(bx, by, bw, bh);
            prop_assert_eq!(a.is_intersect(&b), b.is_intersect(&a));
        }
    }
}
