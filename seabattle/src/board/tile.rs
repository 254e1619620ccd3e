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
    board::{AlreadyShotError, Coordinate, OccupiedError},
    ships::{Fleet, Ship, ShipName},
};

/// What a tile looks like from the outside. Always derived from the tile's state,
/// never stored.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TileView {
    /// Empty water that has not been shot.
    Sea,
    /// A ship segment that has not been shot.
    Ship,
    /// A ship segment that has been shot.
    Hit,
    /// Empty water that has been shot.
    Miss,
}

/// A single cell in a player's grid.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Tile {
    coord: Coordinate,
    /// Whether this tile has been shot previously or not.
    shot: bool,
    /// Kind of the ship that occupies this tile, if any.
    ship: Option<ShipName>,
}

impl Tile {
    pub(crate) fn new(coord: Coordinate) -> Self {
        Self {
            coord,
            shot: false,
            ship: None,
        }
    }

    /// Where this tile sits in its grid.
    pub fn coord(&self) -> Coordinate {
        self.coord
    }

    pub fn row(&self) -> usize {
        self.coord.row
    }

    pub fn col(&self) -> usize {
        self.coord.col
    }

    /// Whether this tile has been shot.
    pub fn shot(&self) -> bool {
        self.shot
    }

    /// Kind of the ship on this tile, if any.
    pub fn ship(&self) -> Option<ShipName> {
        self.ship
    }

    pub fn view(&self) -> TileView {
        match (self.shot, self.ship.is_some()) {
            (false, false) => TileView::Sea,
            (false, true) => TileView::Ship,
            (true, true) => TileView::Hit,
            (true, false) => TileView::Miss,
        }
    }

    /// Mark this tile as shot and, if a ship occupies it, record the hit on that ship.
    pub(crate) fn shoot(&mut self, fleet: &mut Fleet) -> Result<(), AlreadyShotError> {
        if self.shot {
            return Err(AlreadyShotError::new(self.coord));
        }
        self.shot = true;
        if let Some(ship) = self.ship.and_then(|name| fleet.get_mut(name)) {
            ship.hit();
        }
        Ok(())
    }

    /// Assign `ship` to this tile and register the tile with the ship. Fails if any
    /// ship, including the same one, already occupies the tile.
    pub(crate) fn set_ship(&mut self, ship: &mut Ship) -> Result<(), OccupiedError> {
        if let Some(occupant) = self.ship {
            return Err(OccupiedError::new(self.coord, occupant));
        }
        self.ship = Some(ship.name());
        ship.add_tile(self.coord);
        Ok(())
    }

    pub(crate) fn clear_ship(&mut self) {
        self.ship = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tug_fleet() -> Fleet {
        vec![ShipName::Tug].into_iter().collect()
    }

    #[test]
    fn view_follows_state() {
        let mut fleet = tug_fleet();
        let mut tile = Tile::new(Coordinate::new(1, 1));
        assert_eq!(tile.view(), TileView::Sea);

        tile.set_ship(fleet.get_mut(ShipName::Tug).unwrap()).unwrap();
        assert_eq!(tile.view(), TileView::Ship);

        tile.shoot(&mut fleet).unwrap();
        assert_eq!(tile.view(), TileView::Hit);

        tile.clear_ship();
        assert_eq!(tile.ship(), None);
        assert_eq!(tile.view(), TileView::Miss);
    }

    #[test]
    fn second_ship_is_rejected() {
        let mut fleet = tug_fleet();
        let mut tile = Tile::new(Coordinate::new(1, 1));
        let tug = fleet.get_mut(ShipName::Tug).unwrap();
        tile.set_ship(tug).unwrap();

        let err = tile.set_ship(tug).unwrap_err();
        assert_eq!(err.coord(), Coordinate::new(1, 1));
        assert_eq!(err.occupant(), ShipName::Tug);
        assert_eq!(tug.tiles().len(), 1);

        tile.clear_ship();
        tile.clear_ship();
        assert!(tile.set_ship(tug).is_ok());
        assert_eq!(tile.ship(), Some(ShipName::Tug));
    }

    #[test]
    fn shooting_twice_fails() {
        let mut fleet = tug_fleet();
        let mut tile = Tile::new(Coordinate::new(3, 7));
        assert!(!tile.shot());
        tile.shoot(&mut fleet).unwrap();
        assert!(tile.shot());
        assert_eq!(
            tile.shoot(&mut fleet),
            Err(AlreadyShotError::new(Coordinate::new(3, 7)))
        );
    }

    #[test]
    fn shooting_occupied_tile_hits_ship() {
        let mut fleet = tug_fleet();
        let mut tile = Tile::new(Coordinate::new(0, 0));
        tile.set_ship(fleet.get_mut(ShipName::Tug).unwrap()).unwrap();
        tile.shoot(&mut fleet).unwrap();
        let tug = fleet.get(ShipName::Tug).unwrap();
        assert_eq!(tug.hits(), 1);
        assert!(tug.is_destroyed());
    }
}
