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
use crate::{
    board::{grid::Grid, Coordinate},
    ships::{Orientation, Placement, ShipName},
};

/// A ship of one [`ShipName`] kind, placed or not.
///
/// The ship does not own its tiles; the grid does. The ship only remembers which
/// coordinates currently point back at it, so that it can detach itself when it is
/// moved.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Ship {
    name: ShipName,
    hits: usize,
    /// Coordinates of the tiles that reference this ship.
    tiles: Vec<Coordinate>,
    /// Deployment recorded by the last successful placement.
    placement: Placement,
}

impl Ship {
    /// Create an unplaced ship of the given kind.
    pub fn new(name: ShipName) -> Self {
        Self {
            name,
            hits: 0,
            tiles: Vec::with_capacity(name.size()),
            placement: Placement::default(),
        }
    }

    /// Kind of this ship.
    pub fn name(&self) -> ShipName {
        self.name
    }

    /// Number of tiles this ship occupies when deployed.
    pub fn size(&self) -> usize {
        self.name.size()
    }

    /// Number of hits this ship has taken.
    pub fn hits(&self) -> usize {
        self.hits
    }

    /// Row of the top-left cell of the ship.
    pub fn row(&self) -> usize {
        self.placement.start.row
    }

    /// Column of the top-left cell of the ship.
    pub fn col(&self) -> usize {
        self.placement.start.col
    }

    pub fn orientation(&self) -> Orientation {
        self.placement.orientation
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Coordinates of the tiles currently assigned to this ship.
    pub fn tiles(&self) -> &[Coordinate] {
        &self.tiles
    }

    /// A ship is deployed while it holds at least one tile.
    pub fn is_deployed(&self) -> bool {
        !self.tiles.is_empty()
    }

    /// A ship is destroyed once it has taken as many hits as it is long.
    pub fn is_destroyed(&self) -> bool {
        self.hits == self.size()
    }

    /// Register a tile as belonging to this ship. Called by the tile when the ship is
    /// assigned to it.
    pub(crate) fn add_tile(&mut self, coord: Coordinate) {
        self.tiles.push(coord);
    }

    /// Record the deployment. Does not touch any tiles; the grid assigns those one at
    /// a time.
    pub(crate) fn place(&mut self, placement: Placement) {
        self.placement = placement;
    }

    /// Detach every tile from this ship and forget them.
    pub(crate) fn remove(&mut self, grid: &mut Grid) {
        for coord in self.tiles.drain(..) {
            // Tiles are only registered after a successful bounds check.
            grid[coord].clear_ship();
        }
    }

    pub(crate) fn hit(&mut self) {
        self.hits += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::RectDimensions;

    #[test]
    fn new_ship_is_undeployed_and_intact() {
        let ship = Ship::new(ShipName::Tug);
        assert_eq!(ship.name().to_string(), "Tug");
        assert_eq!(ship.size(), 1);
        assert_eq!(ship.hits(), 0);
        assert_eq!(ship.row(), 0);
        assert_eq!(ship.col(), 0);
        assert_eq!(ship.orientation(), Orientation::Horizontal);
        assert!(!ship.is_deployed());
        assert!(!ship.is_destroyed());
    }

    #[test]
    fn destroyed_after_size_hits() {
        let mut ship = Ship::new(ShipName::Submarine);
        ship.hit();
        assert_eq!(ship.hits(), 1);
        assert!(!ship.is_destroyed());
        ship.hit();
        assert!(ship.is_destroyed());
    }

    #[test]
    fn remove_detaches_tiles() {
        let mut grid = Grid::new(RectDimensions::default());
        let mut ship = Ship::new(ShipName::Submarine);
        for coord in Placement::new(Coordinate::new(4, 4), Orientation::Vertical)
            .cells(2)
            .flatten()
        {
            grid[coord].set_ship(&mut ship).unwrap();
        }
        assert!(ship.is_deployed());
        assert_eq!(grid[Coordinate::new(5, 4)].ship(), Some(ShipName::Submarine));

        ship.remove(&mut grid);
        assert!(!ship.is_deployed());
        assert!(grid.iter().all(|tile| tile.ship().is_none()));
    }
}
