//! 2D vector primitive
//!
//! Positions, sizes and velocities are all plain `DVec2` values. They are
//! `Copy`, so every operation produces a fresh vector and nothing is ever
//! mutated through a shared handle.

use crate::error::{SimError, SimResult};

pub use glam::DVec2 as Vector;

/// Point/displacement arithmetic used by the actor model
pub trait VectorExt: Sized {
    /// Component-wise sum
    fn plus(self, other: Vector) -> Vector;

    /// Component-wise sum that rejects a non-finite operand
    fn try_plus(self, other: Vector) -> SimResult<Vector>;

    /// Component-wise scale
    fn times(self, scalar: f64) -> Vector;
}

impl VectorExt for Vector {
    #[inline]
    fn plus(self, other: Vector) -> Vector {
        self + other
    }

    fn try_plus(self, other: Vector) -> SimResult<Vector> {
        if !other.is_finite() {
            return Err(SimError::InvalidOperand(format!(
                "cannot add non-finite vector ({}, {})",
                other.x, other.y
            )));
        }
        Ok(self.plus(other))
    }

    #[inline]
    fn times(self, scalar: f64) -> Vector {
        self * scalar
    }
}
