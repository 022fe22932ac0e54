//! Fixed-size playing field and its validating builder.

use std::collections::HashSet;

use treasure_hunt_core::{AdventurerId, CellCoord, GridSpec, SetupError, TreasureSpec};

/// Static content of a grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Terrain {
    /// Impassable cell.
    Mountain,
    /// Empty, walkable cell.
    Plain,
    /// Walkable cell holding a strictly positive number of treasures.
    Treasure(u32),
}

/// Single grid position together with its optional occupant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    terrain: Terrain,
    occupant: Option<AdventurerId>,
}

impl Cell {
    const fn with_terrain(terrain: Terrain) -> Self {
        Self {
            terrain,
            occupant: None,
        }
    }

    /// Terrain currently stored in the cell.
    #[must_use]
    pub const fn terrain(&self) -> Terrain {
        self.terrain
    }

    /// Reports whether the cell is a mountain.
    #[must_use]
    pub const fn is_mountain(&self) -> bool {
        matches!(self.terrain, Terrain::Mountain)
    }

    /// Reports whether the cell is walkable and holds no treasure.
    #[must_use]
    pub const fn is_plain(&self) -> bool {
        !self.is_mountain() && self.treasures() == 0
    }

    /// Reports whether at least one treasure remains in the cell.
    #[must_use]
    pub const fn has_treasure(&self) -> bool {
        self.treasures() > 0
    }

    /// Number of treasures left in the cell.
    #[must_use]
    pub const fn treasures(&self) -> u32 {
        match self.terrain {
            Terrain::Treasure(count) => count,
            Terrain::Mountain | Terrain::Plain => 0,
        }
    }

    /// Reports whether an adventurer stands on the cell.
    #[must_use]
    pub const fn has_occupant(&self) -> bool {
        self.occupant.is_some()
    }

    /// Adventurer standing on the cell, if any.
    #[must_use]
    pub const fn occupant(&self) -> Option<AdventurerId> {
        self.occupant
    }

    pub(crate) fn set_occupant(&mut self, occupant: Option<AdventurerId>) {
        self.occupant = occupant;
    }

    /// Removes one treasure and returns how many are left, or `None` when the
    /// cell held no treasure.
    pub(crate) fn take_treasure(&mut self) -> Option<u32> {
        let Terrain::Treasure(count) = self.terrain else {
            return None;
        };
        let remaining = count.saturating_sub(1);
        self.terrain = if remaining == 0 {
            Terrain::Plain
        } else {
            Terrain::Treasure(remaining)
        };
        Some(remaining)
    }
}

/// Dense row-major grid of cells.
#[derive(Clone, Debug)]
pub struct Grid {
    height: u32,
    width: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Reports whether the coordinate lies inside the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.row() < self.height && cell.column() < self.width
    }

    /// Retrieves the cell at the provided coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::OutOfBounds`] when the row is not below the height
    /// or the column is not below the width.
    pub fn cell(&self, cell: CellCoord) -> Result<&Cell, SetupError> {
        let index = self.index(cell)?;
        Ok(&self.cells[index])
    }

    pub(crate) fn cell_mut(&mut self, cell: CellCoord) -> Result<&mut Cell, SetupError> {
        let index = self.index(cell)?;
        Ok(&mut self.cells[index])
    }

    /// Iterates over every cell in row-major order together with its coordinate.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, &Cell)> + '_ {
        let width = self.width;
        (0..self.height)
            .flat_map(move |row| (0..width).map(move |column| CellCoord::new(row, column)))
            .zip(self.cells.iter())
    }

    /// Hands the occupant of `from` over to `to` and returns the destination.
    ///
    /// Both coordinates must lie inside the grid.
    pub(crate) fn transfer_occupant(&mut self, from: CellCoord, to: CellCoord) -> &mut Cell {
        let source = self.offset(from);
        let target = self.offset(to);
        let occupant = self.cells[source].occupant.take();
        let destination = &mut self.cells[target];
        destination.occupant = occupant;
        destination
    }

    fn index(&self, cell: CellCoord) -> Result<usize, SetupError> {
        if self.contains(cell) {
            Ok(self.offset(cell))
        } else {
            Err(self.out_of_bounds(cell))
        }
    }

    // u32 widens losslessly into usize on every supported target.
    const fn offset(&self, cell: CellCoord) -> usize {
        cell.row() as usize * self.width as usize + cell.column() as usize
    }

    fn out_of_bounds(&self, cell: CellCoord) -> SetupError {
        SetupError::OutOfBounds {
            cell,
            height: self.height,
            width: self.width,
        }
    }
}

/// Accumulates mountain and treasure placements before freezing them into a [`Grid`].
#[derive(Clone, Debug)]
pub struct GridBuilder {
    height: u32,
    width: u32,
    mountains: Vec<CellCoord>,
    treasures: Vec<TreasureSpec>,
}

impl GridBuilder {
    /// Starts a builder for a grid with the provided dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::InvalidDimension`] when either dimension is zero.
    pub fn new(height: u32, width: u32) -> Result<Self, SetupError> {
        if height == 0 || width == 0 {
            return Err(SetupError::InvalidDimension { height, width });
        }
        Ok(Self {
            height,
            width,
            mountains: Vec::new(),
            treasures: Vec::new(),
        })
    }

    /// Replays every placement described by a [`GridSpec`], mountains first.
    ///
    /// # Errors
    ///
    /// Propagates the first error raised by [`GridBuilder::new`],
    /// [`GridBuilder::place_mountain`] or [`GridBuilder::place_treasure`].
    pub fn from_spec(spec: &GridSpec) -> Result<Self, SetupError> {
        let mut builder = Self::new(spec.height, spec.width)?;
        for mountain in &spec.mountains {
            let _ = builder.place_mountain(*mountain)?;
        }
        for treasure in &spec.treasures {
            let _ = builder.place_treasure(treasure.cell, treasure.amount)?;
        }
        Ok(builder)
    }

    /// Records a mountain at the provided cell.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::OutOfBounds`] when the cell lies outside the grid.
    pub fn place_mountain(&mut self, cell: CellCoord) -> Result<&mut Self, SetupError> {
        self.check_bounds(cell)?;
        self.mountains.push(cell);
        Ok(self)
    }

    /// Records a treasure stack at the provided cell.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::InvalidArgument`] when `amount` is zero and
    /// [`SetupError::OutOfBounds`] when the cell lies outside the grid.
    pub fn place_treasure(
        &mut self,
        cell: CellCoord,
        amount: u32,
    ) -> Result<&mut Self, SetupError> {
        if amount == 0 {
            return Err(SetupError::InvalidArgument { cell });
        }
        self.check_bounds(cell)?;
        self.treasures.push(TreasureSpec { cell, amount });
        Ok(self)
    }

    /// Materializes the grid; unlisted cells become plains.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::DuplicatePlacement`] when two placements of any
    /// category target the same cell and [`SetupError::GridTooLarge`] when the
    /// cells cannot be allocated.
    pub fn build(self) -> Result<Grid, SetupError> {
        let mut seen = HashSet::with_capacity(self.mountains.len() + self.treasures.len());
        let placed = self
            .mountains
            .iter()
            .copied()
            .chain(self.treasures.iter().map(|treasure| treasure.cell));
        for cell in placed {
            if !seen.insert(cell) {
                return Err(SetupError::DuplicatePlacement { cell });
            }
        }

        let too_large = SetupError::GridTooLarge {
            height: self.height,
            width: self.width,
        };
        let capacity = usize::try_from(u64::from(self.height) * u64::from(self.width))
            .map_err(|_| too_large.clone())?;
        let mut cells = Vec::new();
        cells.try_reserve_exact(capacity).map_err(|_| too_large)?;
        cells.resize(capacity, Cell::with_terrain(Terrain::Plain));

        let mut grid = Grid {
            height: self.height,
            width: self.width,
            cells,
        };
        for mountain in self.mountains {
            grid.cell_mut(mountain)?.terrain = Terrain::Mountain;
        }
        for treasure in self.treasures {
            grid.cell_mut(treasure.cell)?.terrain = Terrain::Treasure(treasure.amount);
        }
        Ok(grid)
    }

    fn check_bounds(&self, cell: CellCoord) -> Result<(), SetupError> {
        if cell.row() < self.height && cell.column() < self.width {
            Ok(())
        } else {
            Err(SetupError::OutOfBounds {
                cell,
                height: self.height,
                width: self.width,
            })
        }
    }
}
