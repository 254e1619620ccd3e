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
//! Linear storage for the tiles of a [`SeaGrid`][crate::board::SeaGrid].

use std::{
    borrow::Borrow,
    ops::{Index, IndexMut},
};

use crate::board::{Coordinate, RectDimensions, Tile};

/// Owns one [`Tile`] per cell. Tiles are created up front and never destroyed while
/// the grid is alive.
#[derive(Debug)]
pub(crate) struct Grid {
    /// Dimensions of this grid.
    pub(crate) dim: RectDimensions,
    /// Tiles that make up this grid, in row-major order.
    tiles: Box<[Tile]>,
}

impl Grid {
    pub(crate) fn new(dim: RectDimensions) -> Self {
        let tiles = (0..dim.total_size())
            .map(|idx| Tile::new(dim.un_linearize(idx)))
            .collect();
        Self { dim, tiles }
    }

    /// Get a reference to the tile at the given [`Coordinate`].
    pub(crate) fn get<B: Borrow<Coordinate>>(&self, coord: B) -> Option<&Tile> {
        self.dim
            .try_linearize(coord.borrow())
            .and_then(|i| self.tiles.get(i))
    }

    /// Get a mutable reference to the tile at the given [`Coordinate`].
    pub(crate) fn get_mut<B: Borrow<Coordinate>>(&mut self, coord: B) -> Option<&mut Tile> {
        self.dim
            .try_linearize(coord.borrow())
            .and_then(move |i| self.tiles.get_mut(i))
    }

    /// Iterate every tile in row-major order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }
}

impl<B: Borrow<Coordinate>> Index<B> for Grid {
    type Output = Tile;

    fn index(&self, coord: B) -> &Self::Output {
        self.get(coord).expect("coordinate out of bounds")
    }
}

impl<B: Borrow<Coordinate>> IndexMut<B> for Grid {
    fn index_mut(&mut self, coord: B) -> &mut Self::Output {
        self.get_mut(coord).expect("coordinate out of bounds")
    }
}
