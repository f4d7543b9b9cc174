//! Simulation step
//!
//! Advances a level by a frame delta. Long frames are split into sub-steps of
//! at most `max_step` so fast actors never skip across a cell. Within each
//! sub-step actors update in arena order, then the player's contacts are
//! reported to the level, then the finish delay counts down.

use serde::{Deserialize, Serialize};

use super::level::{Level, Outcome};
use crate::consts::{MAX_STEP, MAX_SUBSTEPS};
use crate::error::{SimError, SimResult};
use crate::settings::Settings;

/// Advance the level by `dt` seconds
pub fn tick(level: &mut Level, dt: f64) -> SimResult<()> {
    tick_with_step(level, dt, MAX_STEP)
}

/// Advance the level by `dt` seconds using sub-steps of at most `max_step`
pub fn tick_with_step(level: &mut Level, dt: f64, max_step: f64) -> SimResult<()> {
    if !dt.is_finite() || dt < 0.0 {
        return Err(SimError::InvalidArgument(format!(
            "frame delta {dt} must be finite and non-negative"
        )));
    }
    if !max_step.is_finite() || max_step <= 0.0 {
        return Err(SimError::InvalidArgument(format!(
            "max step {max_step} must be finite and positive"
        )));
    }

    let mut remaining = dt;
    let mut substeps = 0;
    while remaining > 0.0 && substeps < MAX_SUBSTEPS {
        let step = remaining.min(max_step);
        step_once(level, step)?;
        remaining -= step;
        substeps += 1;
    }
    if remaining > 0.0 {
        log::warn!(
            "Frame delta {:.3}s exceeds {} sub-steps, dropping {:.3}s",
            dt,
            MAX_SUBSTEPS,
            remaining
        );
    }
    Ok(())
}

fn step_once(level: &mut Level, step: f64) -> SimResult<()> {
    for id in level.actor_ids() {
        // An earlier update in this step may have removed it
        if level.get(id).is_some() {
            level.act_actor(id, step)?;
        }
    }
    resolve_player_contacts(level)?;
    level.count_down(step);
    Ok(())
}

/// Report whatever the player currently overlaps: terrain first, then the
/// first overlapping actor
pub fn resolve_player_contacts(level: &mut Level) -> SimResult<()> {
    let Some(player_id) = level.player() else {
        return Ok(());
    };
    let Some(player) = level.get(player_id) else {
        return Ok(());
    };

    if let Some(obstacle) = level.obstacle_at(player.position, player.size)? {
        level.player_touched(obstacle, None);
    }
    if let Some(other) = level.actor_at(player_id)? {
        if let Some(kind) = level.get(other).map(|a| a.kind()) {
            level.player_touched(kind, Some(other));
        }
    }
    Ok(())
}

/// Summary of a headless run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// `None` if the frame budget ran out first
    pub outcome: Option<Outcome>,
    pub frames: u32,
    pub elapsed: f64,
}

/// Tick at the configured frame rate until the level finishes or the frame
/// budget runs out
pub fn run_level(level: &mut Level, settings: &Settings) -> SimResult<RunReport> {
    let mut frames = 0;
    while frames < settings.max_frames && !level.is_finished() {
        tick_with_step(level, settings.frame_dt, settings.max_step)?;
        frames += 1;
    }
    Ok(RunReport {
        outcome: level.status(),
        frames,
        elapsed: frames as f64 * settings.frame_dt,
    })
}
