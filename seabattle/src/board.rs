// Copyright 2020 Zachary Stewart
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Types that make up the game board.

use std::fmt;

use rand::{Rng, RngCore};
use tracing::{debug, trace};

use crate::ships::{Fleet, Orientation, Placement, Ship, ShipName};

use self::grid::Grid;
pub use self::{
    attack::{AttackKind, AttackResult},
    coordinate::Coordinate,
    dimensions::{RectDimensions, DEFAULT_HEIGHT, DEFAULT_WIDTH},
    errors::{AlreadyShotError, CannotPlaceReason, OccupiedError, OutOfBoundsError, PlacementError},
    tile::{Tile, TileView},
};

mod attack;
mod coordinate;
mod dimensions;
mod errors;
pub(crate) mod grid;
mod tile;

/// Number of random placements tried per ship before giving up on a random deployment.
const MAX_PLACEMENT_ATTEMPTS: usize = 1000;

/// Read-only access to the tiles of a grid. This is all a targeting engine gets to see
/// of its opponent.
pub trait SeaGridView {
    /// Dimensions of the grid.
    fn dimensions(&self) -> RectDimensions;

    /// Get the view of the tile at the given position.
    fn item(&self, row: usize, col: usize) -> Result<TileView, OutOfBoundsError>;

    fn width(&self) -> usize {
        self.dimensions().width()
    }

    fn height(&self) -> usize {
        self.dimensions().height()
    }

    /// Returns true if any tile in the view has not been shot.
    fn has_sea(&self) -> bool {
        self.dimensions()
            .iter_coordinates()
            .flatten()
            .any(|c| self.item(c.row, c.col) == Ok(TileView::Sea))
    }
}

/// Callback invoked after every attempted change to a [`SeaGrid`].
type ChangeListener = Box<dyn FnMut()>;

/// The grid upon which one player's ships are deployed and attacked.
pub struct SeaGrid {
    /// Every tile of the grid.
    grid: Grid,

    /// The ships that can be deployed on this grid.
    fleet: Fleet,

    /// Number of ships sunk by attacks on this grid.
    ships_killed: usize,

    /// Listeners notified after each placement or attack.
    listeners: Vec<ChangeListener>,
}

impl SeaGrid {
    /// Construct a standard 10x10 grid for the given fleet. All tiles start as sea.
    pub fn new(fleet: Fleet) -> Self {
        Self::with_dimensions(RectDimensions::default(), fleet)
    }

    /// Construct a grid with the given dimensions for the given fleet.
    pub fn with_dimensions(dim: RectDimensions, fleet: Fleet) -> Self {
        Self {
            grid: Grid::new(dim),
            fleet,
            ships_killed: 0,
            listeners: Vec::new(),
        }
    }

    /// Get the [`RectDimensions`] of this grid.
    pub fn dimensions(&self) -> RectDimensions {
        self.grid.dim
    }

    pub fn width(&self) -> usize {
        self.grid.dim.width()
    }

    pub fn height(&self) -> usize {
        self.grid.dim.height()
    }

    /// Number of ships that attacks on this grid have destroyed.
    pub fn ships_killed(&self) -> usize {
        self.ships_killed
    }

    /// True once every ship of the fleet has been destroyed.
    pub fn is_destroyed(&self) -> bool {
        !self.fleet.is_empty() && self.ships_killed == self.fleet.len()
    }

    /// True if every ship of the fleet is deployed.
    pub fn all_deployed(&self) -> bool {
        self.fleet.all_deployed()
    }

    /// The fleet deployed on this grid.
    pub fn ships(&self) -> &Fleet {
        &self.fleet
    }

    pub fn ship(&self, name: ShipName) -> Option<&Ship> {
        self.fleet.get(name)
    }

    /// Get the tile at the given coordinate, if it is on the grid.
    pub fn tile(&self, coord: Coordinate) -> Option<&Tile> {
        self.grid.get(coord)
    }

    /// Iterate all tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.grid.iter()
    }

    /// Get the view of the tile at the given position, with ships revealed.
    pub fn item(&self, row: usize, col: usize) -> Result<TileView, OutOfBoundsError> {
        let coord = Coordinate::new(row, col);
        self.grid
            .get(coord)
            .map(Tile::view)
            .ok_or_else(|| self.out_of_bounds(coord))
    }

    /// A view of this grid as the opponent sees it: ships that have not been hit look
    /// like open sea.
    pub fn enemy_view(&self) -> EnemyView<'_> {
        EnemyView { grid: self }
    }

    /// Register a listener to be called after every placement or attack on this grid.
    pub fn on_change<F: FnMut() + 'static>(&mut self, listener: F) {
        self.listeners.push(Box::new(listener));
    }

    /// Move the given ship so that it starts at (`row`, `col`) and runs along
    /// `orientation`. Any previous deployment of the ship is cleared first. If the new
    /// position does not fit, the ship is left undeployed and the error says why.
    pub fn move_ship(
        &mut self,
        row: usize,
        col: usize,
        ship: ShipName,
        orientation: Orientation,
    ) -> Result<(), PlacementError> {
        let placement = Placement::new(Coordinate::new(row, col), orientation);
        let result = self.add_ship(ship, placement);
        match &result {
            Ok(()) => debug!(%ship, ?placement, "ship deployed"),
            Err(err) => debug!(%ship, ?placement, error = %err, "ship placement rejected"),
        }
        self.notify();
        result
    }

    /// Detach the ship from wherever it was and walk its new tiles one at a time,
    /// rolling back on the first one that can't take it.
    fn add_ship(&mut self, name: ShipName, placement: Placement) -> Result<(), PlacementError> {
        let dim = self.grid.dim;
        let ship = self
            .fleet
            .get_mut(name)
            .ok_or_else(|| PlacementError::new(name, CannotPlaceReason::UnknownShip))?;
        ship.remove(&mut self.grid);

        let outside = |coord| {
            CannotPlaceReason::OutOfBounds(OutOfBoundsError::new(coord, dim.width(), dim.height()))
        };
        for cell in placement.cells(ship.size()) {
            let assigned = match cell {
                // The ship runs past the largest representable index.
                None => Err(outside(placement.start)),
                Some(coord) => match self.grid.get_mut(coord) {
                    None => Err(outside(coord)),
                    Some(tile) => tile.set_ship(ship).map_err(CannotPlaceReason::from),
                },
            };
            if let Err(reason) = assigned {
                ship.remove(&mut self.grid);
                return Err(PlacementError::new(name, reason));
            }
        }
        ship.place(placement);
        Ok(())
    }

    /// Deploy every ship of the fleet at a random position, smallest ship first.
    pub fn randomize_deployment(&mut self, rng: &mut dyn RngCore) -> Result<(), PlacementError> {
        let names: Vec<_> = self.fleet.names().collect();
        for name in names {
            let mut attempts = 0;
            loop {
                let row = rng.gen_range(0..self.height());
                let col = rng.gen_range(0..self.width());
                let orientation: Orientation = rng.gen();
                match self.move_ship(row, col, name, orientation) {
                    Ok(()) => break,
                    Err(err) => {
                        attempts += 1;
                        if attempts >= MAX_PLACEMENT_ATTEMPTS {
                            return Err(err);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Take every ship off the grid. Shots already taken are kept.
    pub fn clear_deployment(&mut self) {
        for name in ShipName::ALL.iter().copied() {
            if let Some(ship) = self.fleet.get_mut(name) {
                ship.remove(&mut self.grid);
            }
        }
        debug!("deployment cleared");
        self.notify();
    }

    /// Fire at the tile at (`row`, `col`). Shooting a tile twice is not an error; it
    /// reports [`AttackKind::AlreadyShot`] and changes nothing.
    pub fn hit_tile(&mut self, row: usize, col: usize) -> Result<AttackResult, OutOfBoundsError> {
        let coord = Coordinate::new(row, col);
        let out_of_bounds = self.out_of_bounds(coord);
        let tile = self.grid.get_mut(coord).ok_or(out_of_bounds)?;
        let kind = match tile.shoot(&mut self.fleet) {
            Err(_) => AttackKind::AlreadyShot,
            Ok(()) => match tile.ship() {
                None => AttackKind::Miss,
                Some(name) if self.fleet.get(name).map_or(false, Ship::is_destroyed) => {
                    self.ships_killed += 1;
                    AttackKind::Destroyed(name)
                }
                Some(_) => AttackKind::Hit,
            },
        };
        debug!(%coord, ?kind, ships_killed = self.ships_killed, "tile attacked");
        self.notify();
        Ok(AttackResult::new(kind, coord))
    }

    fn notify(&mut self) {
        trace!(listeners = self.listeners.len(), "sea grid changed");
        for listener in self.listeners.iter_mut() {
            listener();
        }
    }

    fn out_of_bounds(&self, coord: Coordinate) -> OutOfBoundsError {
        OutOfBoundsError::new(coord, self.width(), self.height())
    }
}

impl Default for SeaGrid {
    /// A standard 10x10 grid with the standard fleet.
    fn default() -> Self {
        Self::new(Fleet::default())
    }
}

impl fmt::Debug for SeaGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("SeaGrid")
            .field("dimensions", &self.grid.dim)
            .field("fleet", &self.fleet)
            .field("ships_killed", &self.ships_killed)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl SeaGridView for SeaGrid {
    fn dimensions(&self) -> RectDimensions {
        SeaGrid::dimensions(self)
    }

    fn item(&self, row: usize, col: usize) -> Result<TileView, OutOfBoundsError> {
        SeaGrid::item(self, row, col)
    }
}

/// Handle to a [`SeaGrid`] that hides ships which have not been hit.
#[derive(Debug, Copy, Clone)]
pub struct EnemyView<'a> {
    grid: &'a SeaGrid,
}

impl<'a> EnemyView<'a> {
    /// Number of ships destroyed on the underlying grid.
    pub fn ships_killed(&self) -> usize {
        self.grid.ships_killed()
    }
}

impl SeaGridView for EnemyView<'_> {
    fn dimensions(&self) -> RectDimensions {
        self.grid.dimensions()
    }

    fn item(&self, row: usize, col: usize) -> Result<TileView, OutOfBoundsError> {
        self.grid.item(row, col).map(|view| match view {
            TileView::Ship => TileView::Sea,
            other => other,
        })
    }
}
