#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Treasure Hunt.

mod grid;

pub use grid::{Cell, Grid, GridBuilder, Terrain};

use tracing::debug;
use treasure_hunt_core::{
    AdventurerId, AdventurerSpec, BlockedReason, CellCoord, Command, Event, Movement, Orientation,
    SetupError,
};

/// Named agent walking the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Adventurer {
    id: AdventurerId,
    name: String,
    orientation: Orientation,
    cell: CellCoord,
    collected: u32,
}

impl Adventurer {
    /// Identifier assigned when the adventurer was placed.
    #[must_use]
    pub const fn id(&self) -> AdventurerId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Direction the adventurer currently faces.
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Cell the adventurer currently occupies.
    #[must_use]
    pub const fn cell(&self) -> CellCoord {
        self.cell
    }

    /// Number of treasures collected so far.
    #[must_use]
    pub const fn collected(&self) -> u32 {
        self.collected
    }
}

/// Represents the authoritative Treasure Hunt world state.
///
/// Adventurer positions are stored twice: on the adventurer record and as the
/// occupant of a grid cell. Only placement and forward moves write them.
#[derive(Clone, Debug)]
pub struct World {
    grid: Grid,
    adventurers: Vec<Adventurer>,
}

impl World {
    /// Creates a world over a frozen grid with no adventurers yet.
    #[must_use]
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            adventurers: Vec::new(),
        }
    }

    /// Places a new adventurer on its start cell and returns its identifier.
    ///
    /// Identifiers are allocated in placement order, which is the turn order.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::OutOfBounds`] when the start cell lies outside
    /// the grid, [`SetupError::MountainOccupied`] when it is a mountain and
    /// [`SetupError::CellOccupied`] when another adventurer stands there.
    pub fn place(&mut self, spec: &AdventurerSpec) -> Result<AdventurerId, SetupError> {
        let id = AdventurerId::new(self.adventurers.len() as u32);
        let cell = self.grid.cell_mut(spec.start)?;
        if cell.is_mountain() {
            return Err(SetupError::MountainOccupied {
                name: spec.name.clone(),
                cell: spec.start,
            });
        }
        if cell.has_occupant() {
            return Err(SetupError::CellOccupied {
                name: spec.name.clone(),
                cell: spec.start,
            });
        }
        cell.set_occupant(Some(id));
        self.adventurers.push(Adventurer {
            id,
            name: spec.name.clone(),
            orientation: spec.orientation,
            cell: spec.start,
            collected: 0,
        });
        Ok(id)
    }

    fn adventurer_index(&self, adventurer: AdventurerId) -> Option<usize> {
        self.adventurers
            .iter()
            .position(|candidate| candidate.id == adventurer)
    }

    fn rotate(
        &mut self,
        index: usize,
        turn: fn(Orientation) -> Orientation,
        out_events: &mut Vec<Event>,
    ) {
        let adventurer = &mut self.adventurers[index];
        adventurer.orientation = turn(adventurer.orientation);
        debug!(
            adventurer = adventurer.id.get(),
            orientation = ?adventurer.orientation,
            "adventurer rotated"
        );
        out_events.push(Event::Rotated {
            adventurer: adventurer.id,
            orientation: adventurer.orientation,
        });
    }

    fn advance(&mut self, index: usize, out_events: &mut Vec<Event>) {
        let (id, from, orientation) = {
            let adventurer = &self.adventurers[index];
            (adventurer.id, adventurer.cell, adventurer.orientation)
        };

        let blocked = |reason| Event::MoveBlocked {
            adventurer: id,
            at: from,
            reason,
        };

        let destination = from
            .step(orientation)
            .and_then(|to| self.grid.cell(to).ok().map(|cell| (to, cell)));
        let Some((to, target)) = destination else {
            debug!(adventurer = id.get(), ?from, ?orientation, "move leaves the grid");
            out_events.push(blocked(BlockedReason::OutOfBounds));
            return;
        };

        let reason = if target.is_mountain() {
            Some(BlockedReason::Mountain)
        } else if target.has_occupant() {
            Some(BlockedReason::Occupied)
        } else {
            None
        };
        if let Some(reason) = reason {
            debug!(adventurer = id.get(), ?from, ?to, ?reason, "move blocked");
            out_events.push(blocked(reason));
            return;
        }

        let remaining = self.grid.transfer_occupant(from, to).take_treasure();
        let adventurer = &mut self.adventurers[index];
        adventurer.cell = to;
        debug!(adventurer = id.get(), ?from, ?to, "adventurer advanced");
        out_events.push(Event::Advanced {
            adventurer: id,
            from,
            to,
        });

        if let Some(remaining) = remaining {
            adventurer.collected = adventurer.collected.saturating_add(1);
            debug!(adventurer = id.get(), cell = ?to, remaining, "treasure collected");
            out_events.push(Event::TreasureCollected {
                adventurer: id,
                cell: to,
                remaining,
            });
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Blocked movements are not errors: they leave the world unchanged and are
/// reported through [`Event::MoveBlocked`]. Commands addressed to unknown
/// adventurers are ignored.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Move {
            adventurer,
            movement,
        } => {
            let Some(index) = world.adventurer_index(adventurer) else {
                return;
            };
            match movement {
                Movement::Forward => world.advance(index, out_events),
                Movement::RotateLeft => world.rotate(index, Orientation::rotated_left, out_events),
                Movement::RotateRight => {
                    world.rotate(index, Orientation::rotated_right, out_events)
                }
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{Adventurer, Grid, World};
    use treasure_hunt_core::{AdventurerId, CellCoord};

    /// Provides read-only access to the grid.
    #[must_use]
    pub fn grid(world: &World) -> &Grid {
        &world.grid
    }

    /// Adventurers in turn order.
    #[must_use]
    pub fn adventurers(world: &World) -> &[Adventurer] {
        &world.adventurers
    }

    /// Looks up a single adventurer.
    #[must_use]
    pub fn adventurer(world: &World, adventurer: AdventurerId) -> Option<&Adventurer> {
        world
            .adventurers
            .iter()
            .find(|candidate| candidate.id == adventurer)
    }

    /// Cell currently occupied by the adventurer.
    #[must_use]
    pub fn position(world: &World, adventurer: AdventurerId) -> Option<CellCoord> {
        self::adventurer(world, adventurer).map(Adventurer::cell)
    }

    /// Treasures collected so far by the adventurer.
    #[must_use]
    pub fn collected(world: &World, adventurer: AdventurerId) -> Option<u32> {
        self::adventurer(world, adventurer).map(Adventurer::collected)
    }

    /// Adventurer standing on the provided cell, if any.
    #[must_use]
    pub fn occupant(world: &World, cell: CellCoord) -> Option<&Adventurer> {
        let occupant = world.grid.cell(cell).ok()?.occupant()?;
        self::adventurer(world, occupant)
    }
}
