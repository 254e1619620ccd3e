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
//! Errors used by the [`Tile`][crate::board::Tile] and
//! [`SeaGrid`][crate::board::SeaGrid].

use thiserror::Error;

use crate::{board::Coordinate, ships::ShipName};

/// Error returned when shooting a tile that was already shot.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
#[error("you have already shot the tile at {coord}")]
pub struct AlreadyShotError {
    coord: Coordinate,
}

impl AlreadyShotError {
    pub(crate) fn new(coord: Coordinate) -> Self {
        Self { coord }
    }

    /// The coordinate of the tile that was shot twice.
    pub fn coord(&self) -> Coordinate {
        self.coord
    }
}

/// Error returned when assigning a ship to a tile that already holds one.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
#[error("there is already a {occupant} at {coord}")]
pub struct OccupiedError {
    coord: Coordinate,
    occupant: ShipName,
}

impl OccupiedError {
    pub(crate) fn new(coord: Coordinate, occupant: ShipName) -> Self {
        Self { coord, occupant }
    }

    /// The coordinate of the occupied tile.
    pub fn coord(&self) -> Coordinate {
        self.coord
    }

    /// The ship that already occupies the tile.
    pub fn occupant(&self) -> ShipName {
        self.occupant
    }
}

/// Error returned when a coordinate lies outside of the grid.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
#[error("{coord} is outside of the {width}x{height} grid")]
pub struct OutOfBoundsError {
    coord: Coordinate,
    width: usize,
    height: usize,
}

impl OutOfBoundsError {
    pub(crate) fn new(coord: Coordinate, width: usize, height: usize) -> Self {
        Self {
            coord,
            width,
            height,
        }
    }

    /// The offending coordinate.
    pub fn coord(&self) -> Coordinate {
        self.coord
    }
}

/// Reason why a ship could not be placed at a given position.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum CannotPlaceReason {
    /// The ship is not part of this grid's fleet.
    #[error("the ship is not part of this fleet")]
    UnknownShip,
    /// Part of the ship would hang off the edge of the grid.
    #[error("ship can't fit on the board: {0}")]
    OutOfBounds(#[source] OutOfBoundsError),
    /// Part of the ship would overlap another ship.
    #[error(transparent)]
    Occupied(#[from] OccupiedError),
}

/// Error caused when attempting to place a ship in an invalid position. The ship is
/// left unplaced.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
#[error("could not place the {ship}: {reason}")]
pub struct PlacementError {
    ship: ShipName,
    #[source]
    reason: CannotPlaceReason,
}

impl PlacementError {
    pub(crate) fn new(ship: ShipName, reason: CannotPlaceReason) -> Self {
        Self { ship, reason }
    }

    /// The ship that could not be placed.
    pub fn ship(&self) -> ShipName {
        self.ship
    }

    /// Get the reason placement was aborted.
    pub fn reason(&self) -> CannotPlaceReason {
        self.reason
    }
}
