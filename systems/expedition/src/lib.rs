#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic turn engine that replays recorded adventurer itineraries.
//!
//! An [`Expedition`] builds the world from declarative specs, then runs rounds
//! until every itinerary is exhausted. Each round visits adventurers in input
//! order and applies at most one movement per adventurer immediately, so later
//! adventurers observe the moves made earlier in the same round.

use std::collections::VecDeque;

use tracing::info;
use treasure_hunt_core::{
    AdventurerId, AdventurerSpec, Command, Event, GridSpec, Movement, SetupError,
};
use treasure_hunt_world::{self as world, GridBuilder, World};

#[derive(Clone, Debug)]
struct Itinerary {
    adventurer: AdventurerId,
    pending: VecDeque<Option<Movement>>,
}

impl Itinerary {
    fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Owns the world for a single run together with every pending itinerary.
#[derive(Clone, Debug)]
pub struct Expedition {
    world: World,
    itineraries: Vec<Itinerary>,
    rounds: u32,
    log: Vec<Event>,
}

impl Expedition {
    /// Builds the grid and places every adventurer in input order.
    ///
    /// # Errors
    ///
    /// Returns the first [`SetupError`] raised while building the grid or
    /// placing an adventurer. No partially configured expedition is returned.
    pub fn new(grid: &GridSpec, adventurers: &[AdventurerSpec]) -> Result<Self, SetupError> {
        let grid = GridBuilder::from_spec(grid)?.build()?;
        let mut world = World::new(grid);
        let mut itineraries = Vec::with_capacity(adventurers.len());
        for spec in adventurers {
            let adventurer = world.place(spec)?;
            itineraries.push(Itinerary {
                adventurer,
                pending: spec.movements.iter().copied().collect(),
            });
        }

        Ok(Self {
            world,
            itineraries,
            rounds: 0,
            log: Vec::new(),
        })
    }

    /// Reports whether every itinerary has been exhausted.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.itineraries.iter().all(Itinerary::is_idle)
    }

    /// Plays a single round, returning `false` when nothing was left to play.
    pub fn play_round(&mut self, out_events: &mut Vec<Event>) -> bool {
        if self.is_finished() {
            return false;
        }

        for itinerary in &mut self.itineraries {
            let Some(Some(movement)) = itinerary.pending.pop_front() else {
                continue;
            };
            world::apply(
                &mut self.world,
                Command::Move {
                    adventurer: itinerary.adventurer,
                    movement,
                },
                out_events,
            );
        }

        self.rounds = self.rounds.saturating_add(1);
        true
    }

    /// Plays rounds until every itinerary is exhausted and returns the number
    /// of rounds played by this call.
    pub fn run(&mut self) -> u32 {
        info!(adventurers = self.itineraries.len(), "expedition started");
        let mut played = 0_u32;
        let mut events = Vec::new();
        while self.play_round(&mut events) {
            played = played.saturating_add(1);
            self.log.append(&mut events);
        }
        info!(rounds = played, events = self.log.len(), "expedition finished");
        played
    }

    /// Read-only access to the world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Consumes the expedition, yielding the final world.
    #[must_use]
    pub fn into_world(self) -> World {
        self.world
    }

    /// Total number of rounds played so far.
    #[must_use]
    pub const fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Events recorded by [`Expedition::run`] in the order they happened.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.log
    }

    /// Identifiers of the adventurers in turn order.
    pub fn adventurers(&self) -> impl Iterator<Item = AdventurerId> + '_ {
        self.itineraries.iter().map(|itinerary| itinerary.adventurer)
    }

    /// Number of entries left in the adventurer's itinerary.
    #[must_use]
    pub fn pending(&self, adventurer: AdventurerId) -> Option<usize> {
        self.itineraries
            .iter()
            .find(|itinerary| itinerary.adventurer == adventurer)
            .map(|itinerary| itinerary.pending.len())
    }
}
