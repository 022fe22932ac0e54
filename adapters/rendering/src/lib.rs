#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Text presentations of a Treasure Hunt world.
//!
//! [`Report`] captures the end-of-run state in the same line-oriented format
//! that configurations are written in, with the movement letters replaced by
//! the number of treasures collected. [`MapView`] draws the grid as a block of
//! single-character cells for a quick visual check.

use std::fmt;

use treasure_hunt_core::{CellCoord, Orientation};
use treasure_hunt_world::{query, World};

/// Adventurer line of a [`Report`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportedAdventurer {
    /// Display name.
    pub name: String,
    /// Final cell.
    pub cell: CellCoord,
    /// Final orientation.
    pub orientation: Orientation,
    /// Treasures collected during the run.
    pub collected: u32,
}

/// Snapshot of the reportable world state in row-major scan order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    height: u32,
    width: u32,
    mountains: Vec<CellCoord>,
    treasures: Vec<(CellCoord, u32)>,
    adventurers: Vec<ReportedAdventurer>,
}

impl Report {
    /// Captures the report from the world.
    #[must_use]
    pub fn capture(world: &World) -> Self {
        let grid = query::grid(world);
        let mut mountains = Vec::new();
        let mut treasures = Vec::new();
        let mut adventurers = Vec::new();

        for (coord, cell) in grid.iter() {
            if cell.is_mountain() {
                mountains.push(coord);
            }
            if cell.has_treasure() {
                treasures.push((coord, cell.treasures()));
            }
            if let Some(adventurer) = query::occupant(world, coord) {
                adventurers.push(ReportedAdventurer {
                    name: adventurer.name().to_owned(),
                    cell: coord,
                    orientation: adventurer.orientation(),
                    collected: adventurer.collected(),
                });
            }
        }

        Self {
            height: grid.height(),
            width: grid.width(),
            mountains,
            treasures,
            adventurers,
        }
    }

    /// Mountain cells in scan order.
    #[must_use]
    pub fn mountains(&self) -> &[CellCoord] {
        &self.mountains
    }

    /// Cells with remaining treasure and their counts, in scan order.
    #[must_use]
    pub fn treasures(&self) -> &[(CellCoord, u32)] {
        &self.treasures
    }

    /// Adventurers in scan order of the cells they occupy.
    #[must_use]
    pub fn adventurers(&self) -> &[ReportedAdventurer] {
        &self.adventurers
    }
}

// Every coordinate is written column first, then row.
impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "C - {} - {}", self.width, self.height)?;
        for mountain in &self.mountains {
            writeln!(f, "M - {} - {}", mountain.column(), mountain.row())?;
        }
        for (cell, count) in &self.treasures {
            writeln!(f, "T - {} - {} - {}", cell.column(), cell.row(), count)?;
        }
        for adventurer in &self.adventurers {
            writeln!(
                f,
                "A - {} - {} - {} - {} - {}",
                adventurer.name,
                adventurer.cell.column(),
                adventurer.cell.row(),
                adventurer.orientation.letter(),
                adventurer.collected
            )?;
        }
        Ok(())
    }
}

/// Renders the end-of-run report as text.
#[must_use]
pub fn render_report(world: &World) -> String {
    Report::capture(world).to_string()
}

/// Grid drawing where each cell is a single glyph followed by a space.
///
/// Occupied cells show the first letter of the adventurer's name, mountains
/// show `M`, treasure cells show their remaining count and plains show `.`.
#[derive(Clone, Copy, Debug)]
pub struct MapView<'a> {
    world: &'a World,
}

impl<'a> MapView<'a> {
    /// Wraps the world for drawing.
    #[must_use]
    pub const fn new(world: &'a World) -> Self {
        Self { world }
    }
}

impl fmt::Display for MapView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let grid = query::grid(self.world);
        for (coord, cell) in grid.iter() {
            if let Some(initial) = query::occupant(self.world, coord)
                .and_then(|adventurer| adventurer.name().chars().next())
            {
                write!(f, "{initial}")?;
            } else if cell.is_plain() {
                f.write_str(".")?;
            } else if cell.is_mountain() {
                f.write_str("M")?;
            } else {
                write!(f, "{}", cell.treasures())?;
            }
            f.write_str(" ")?;
            if coord.column() + 1 == grid.width() {
                f.write_str("\n")?;
            }
        }
        Ok(())
    }
}

/// Renders the grid drawing as text.
#[must_use]
pub fn render_map(world: &World) -> String {
    MapView::new(world).to_string()
}
