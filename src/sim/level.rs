//! Level state
//!
//! A level owns the static obstacle grid and every live actor. Actors live in
//! an arena of slots addressed by `ActorId`; removing an actor empties its
//! slot, and slots are never handed out again, so a stale id can never alias
//! a different actor. Arena order is the update and lookup order.

use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorKind, overlaps};
use super::grid::{Cell, Grid, Obstacle};
use super::vector::Vector;
use crate::consts::FINISH_DELAY;
use crate::error::{SimError, SimResult};

/// Stable handle to an actor slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub usize);

/// Final result of a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
}

/// Anything the player can touch: terrain or another actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Contact {
    Wall,
    Lava,
    Actor,
    Player,
    Coin,
    Fireball,
}

impl From<Obstacle> for Contact {
    fn from(obstacle: Obstacle) -> Self {
        match obstacle {
            Obstacle::Wall => Contact::Wall,
            Obstacle::Lava => Contact::Lava,
        }
    }
}

impl From<ActorKind> for Contact {
    fn from(kind: ActorKind) -> Self {
        match kind {
            ActorKind::Actor => Contact::Actor,
            ActorKind::Player => Contact::Player,
            ActorKind::Coin => Contact::Coin,
            ActorKind::Fireball => Contact::Fireball,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    grid: Grid,
    slots: Vec<Option<Actor>>,
    status: Option<Outcome>,
    finish_delay: f64,
}

impl Level {
    pub fn new(grid: Grid, actors: Vec<Actor>) -> Self {
        Self {
            grid,
            slots: actors.into_iter().map(Some).collect(),
            status: None,
            finish_delay: FINISH_DELAY,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn status(&self) -> Option<Outcome> {
        self.status
    }

    pub fn finish_delay(&self) -> f64 {
        self.finish_delay
    }

    /// Count the finish delay down; only meaningful once an outcome is set
    pub fn count_down(&mut self, step: f64) {
        if self.status.is_some() {
            self.finish_delay -= step;
        }
    }

    /// True once an outcome is decided and the grace delay has run out
    pub fn is_finished(&self) -> bool {
        self.status.is_some() && self.finish_delay < 0.0
    }

    /// Append an actor; it goes last in update order
    pub fn add_actor(&mut self, actor: Actor) -> ActorId {
        let id = ActorId(self.slots.len());
        self.slots.push(Some(actor));
        id
    }

    pub fn get(&self, id: ActorId) -> Option<&Actor> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Live actors in arena order
    pub fn actors(&self) -> impl Iterator<Item = (ActorId, &Actor)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|a| (ActorId(i), a)))
    }

    /// Ids of live actors in arena order
    pub fn actor_ids(&self) -> Vec<ActorId> {
        self.actors().map(|(id, _)| id).collect()
    }

    /// Number of live actors
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// First live player, if any
    pub fn player(&self) -> Option<ActorId> {
        self.actors()
            .find(|(_, a)| a.kind() == ActorKind::Player)
            .map(|(id, _)| id)
    }

    fn live(&self, id: ActorId) -> SimResult<&Actor> {
        self.get(id)
            .ok_or_else(|| SimError::InvalidArgument(format!("{id:?} is not a live actor")))
    }

    /// Handle-based intersection; an actor never intersects itself
    pub fn is_intersect(&self, a: ActorId, b: ActorId) -> SimResult<bool> {
        let first = self.live(a)?;
        let second = self.live(b)?;
        Ok(a != b && first.is_intersect(second))
    }

    /// First other actor overlapping `target`
    pub fn actor_at(&self, target: ActorId) -> SimResult<Option<ActorId>> {
        let actor = self.live(target)?;
        Ok(self.actor_overlapping(actor, Some(target)))
    }

    /// First actor overlapping a free-standing box, skipping `exclude`
    pub fn actor_overlapping(&self, target: &Actor, exclude: Option<ActorId>) -> Option<ActorId> {
        self.actor_at_rect(target.position, target.size, exclude)
    }

    /// First actor overlapping the box at `position` with extent `size`,
    /// skipping `exclude`
    pub fn actor_at_rect(
        &self,
        position: Vector,
        size: Vector,
        exclude: Option<ActorId>,
    ) -> Option<ActorId> {
        let (left, top) = (position.x, position.y);
        let (right, bottom) = (left + size.x, top + size.y);
        self.actors()
            .filter(|(id, _)| Some(*id) != exclude)
            .find(|(_, a)| overlaps(a, left, top, right, bottom))
            .map(|(id, _)| id)
    }

    /// What terrain blocks the box at `position` with extent `size`
    pub fn obstacle_at(&self, position: Vector, size: Vector) -> SimResult<Cell> {
        self.grid.obstacle_at(position, size)
    }

    /// Remove an actor; no-op for an id that is already gone
    pub fn remove_actor(&mut self, id: ActorId) -> Option<Actor> {
        self.slots.get_mut(id.0).and_then(Option::take)
    }

    pub fn no_more_actors(&self, kind: ActorKind) -> bool {
        !self.actors().any(|(_, a)| a.kind() == kind)
    }

    /// Advance one actor against this level's terrain
    pub fn act_actor(&mut self, id: ActorId, time: f64) -> SimResult<()> {
        let Self { grid, slots, .. } = self;
        match slots.get_mut(id.0).and_then(Option::as_mut) {
            Some(actor) => actor.act(time, grid),
            None => Err(SimError::InvalidArgument(format!(
                "{id:?} is not a live actor"
            ))),
        }
    }

    /// Report that the player touched terrain or another actor.
    ///
    /// Only lava, fireballs and coins change anything, and nothing changes
    /// once an outcome has been decided.
    pub fn player_touched(&mut self, contact: impl Into<Contact>, actor: Option<ActorId>) {
        if self.status.is_some() {
            return;
        }

        match contact.into() {
            Contact::Lava | Contact::Fireball => {
                log::info!("Player touched a hazard, level lost");
                self.status = Some(Outcome::Lost);
            }
            Contact::Coin => {
                let Some(id) = actor else { return };
                if self.get(id).map(Actor::kind) != Some(ActorKind::Coin) {
                    return;
                }
                self.remove_actor(id);
                log::debug!("Coin {:?} collected", id);
                if self.no_more_actors(ActorKind::Coin) {
                    log::info!("All coins collected, level won");
                    self.status = Some(Outcome::Won);
                }
            }
            Contact::Wall | Contact::Actor | Contact::Player => {}
        }
    }
}
