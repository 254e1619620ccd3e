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
//! Types used for defining ships, their kinds, and how they lie on the grid.
use std::{fmt, str::FromStr};

use rand::{
    distributions::{Distribution, Standard},
    Rng,
};

use crate::board::Coordinate;

pub use self::{fleet::Fleet, ship::Ship};

mod fleet;
mod ship;

/// Kind of a ship. The ordinal of each kind is also its length.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum ShipName {
    /// Tug: length 1.
    Tug = 1,
    /// Submarine: length 2.
    Submarine = 2,
    /// Destroyer: length 3.
    Destroyer = 3,
    /// Battleship: length 4.
    Battleship = 4,
    /// Aircraft carrier: length 5.
    AircraftCarrier = 5,
}

impl ShipName {
    /// Every kind of ship, in ascending order of size.
    pub const ALL: &'static [ShipName] = &[
        ShipName::Tug,
        ShipName::Submarine,
        ShipName::Destroyer,
        ShipName::Battleship,
        ShipName::AircraftCarrier,
    ];

    /// Number of tiles a ship of this kind occupies.
    pub fn size(self) -> usize {
        self as usize
    }

    /// Player-facing name of this kind of ship.
    pub fn name(self) -> &'static str {
        match self {
            ShipName::Tug => "Tug",
            ShipName::Submarine => "Submarine",
            ShipName::Destroyer => "Destroyer",
            ShipName::Battleship => "Battleship",
            ShipName::AircraftCarrier => "Aircraft Carrier",
        }
    }
}

impl fmt::Display for ShipName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Error returned when parsing an unknown ship name.
#[derive(Debug, thiserror::Error, Clone, Eq, PartialEq)]
#[error("unknown ship {0:?}")]
pub struct ParseShipNameError(String);

impl FromStr for ShipName {
    type Err = ParseShipNameError;

    /// Parses full names and the usual short forms, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tug" | "tg" | "1" => Ok(ShipName::Tug),
            "submarine" | "sub" | "ss" | "2" => Ok(ShipName::Submarine),
            "destroyer" | "dd" | "3" => Ok(ShipName::Destroyer),
            "battleship" | "bb" | "4" => Ok(ShipName::Battleship),
            "aircraftcarrier" | "aircraft carrier" | "carrier" | "cv" | "5" => {
                Ok(ShipName::AircraftCarrier)
            }
            _ => Err(ParseShipNameError(s.to_owned())),
        }
    }
}

/// Axis a ship lies along.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Orientation {
    /// Occupies a run of columns in a single row.
    Horizontal,
    /// Occupies a run of rows in a single column.
    Vertical,
}

impl Orientation {
    /// Move `coord` forward by `distance` cells along this axis, or `None` on overflow.
    fn advance(self, coord: Coordinate, distance: usize) -> Option<Coordinate> {
        match self {
            Orientation::Horizontal => coord
                .col
                .checked_add(distance)
                .map(|col| Coordinate::new(coord.row, col)),
            Orientation::Vertical => coord
                .row
                .checked_add(distance)
                .map(|row| Coordinate::new(row, coord.col)),
        }
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Orientation::Horizontal
    }
}

impl Distribution<Orientation> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Orientation {
        if rng.gen() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }
}

/// Deployment of a ship: where it starts and which way it runs.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct Placement {
    /// Top-left cell of the ship.
    pub start: Coordinate,
    /// Axis the ship lies along.
    pub orientation: Orientation,
}

impl Placement {
    /// Construct a placement starting at `start` running along `orientation`.
    pub fn new(start: Coordinate, orientation: Orientation) -> Self {
        Self { start, orientation }
    }

    /// Iterate the `len` cells covered by this placement, starting at `start`. The
    /// cells are not bounds checked against any grid, but a cell whose index would not
    /// fit in a `usize` is yielded as `None`.
    pub fn cells(self, len: usize) -> impl Iterator<Item = Option<Coordinate>> {
        (0..len).map(move |i| self.orientation.advance(self.start, i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinal_is_size() {
        let sizes: Vec<_> = ShipName::ALL.iter().map(|s| s.size()).collect();
        assert_eq!(sizes, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn carrier_has_spaced_name() {
        assert_eq!(ShipName::AircraftCarrier.to_string(), "Aircraft Carrier");
        assert_eq!(ShipName::Tug.to_string(), "Tug");
    }

    #[test]
    fn parse_short_forms() {
        assert_eq!("cv".parse(), Ok(ShipName::AircraftCarrier));
        assert_eq!("SUB".parse(), Ok(ShipName::Submarine));
        assert!("dinghy".parse::<ShipName>().is_err());
    }

    #[test]
    fn placement_walks_along_orientation() {
        let across: Vec<_> = Placement::new(Coordinate::new(2, 3), Orientation::Horizontal)
            .cells(3)
            .collect();
        assert_eq!(
            across,
            vec![
                Some(Coordinate::new(2, 3)),
                Some(Coordinate::new(2, 4)),
                Some(Coordinate::new(2, 5))
            ]
        );
        let down: Vec<_> = Placement::new(Coordinate::new(8, 0), Orientation::Vertical)
            .cells(3)
            .collect();
        assert_eq!(
            down,
            vec![
                Some(Coordinate::new(8, 0)),
                Some(Coordinate::new(9, 0)),
                Some(Coordinate::new(10, 0))
            ]
        );
    }

    #[test]
    fn placement_cells_stop_at_usize_overflow() {
        let edge: Vec<_> =
            Placement::new(Coordinate::new(3, usize::MAX - 1), Orientation::Horizontal)
                .cells(3)
                .collect();
        assert_eq!(
            edge,
            vec![
                Some(Coordinate::new(3, usize::MAX - 1)),
                Some(Coordinate::new(3, usize::MAX)),
                None
            ]
        );
        let mut below =
            Placement::new(Coordinate::new(usize::MAX, 0), Orientation::Vertical).cells(2);
        assert_eq!(below.next(), Some(Some(Coordinate::new(usize::MAX, 0))));
        assert_eq!(below.next(), Some(None));
    }

    #[test]
    fn default_placement_is_horizontal_at_origin() {
        let placement = Placement::default();
        assert_eq!(placement.start, Coordinate::default());
        assert_eq!(placement.start, Coordinate::new(0, 0));
        assert_eq!(placement.orientation, Orientation::Horizontal);
    }
}
