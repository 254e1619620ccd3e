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
use std::fmt;

/// The coordinates of a [`Tile`][crate::board::Tile] in a sea grid.
///
/// A coordinate is just a pair of numbers and may lie outside of any particular grid;
/// bounds are checked by the grid when the coordinate is used.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Default)]
pub struct Coordinate {
    /// Vertical position of the cell, counted from the top.
    pub row: usize,
    /// Horizontal position of the cell, counted from the left.
    pub col: usize,
}

impl Coordinate {
    /// Construct a [`Coordinate`] from the given `row` and `col`.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The cell above this one, if the row does not underflow.
    pub fn up(self) -> Option<Self> {
        self.row.checked_sub(1).map(|row| Self::new(row, self.col))
    }

    /// The cell to the left of this one, if the column does not underflow.
    pub fn left(self) -> Option<Self> {
        self.col.checked_sub(1).map(|col| Self::new(self.row, col))
    }

    /// The cell below this one, if the row does not overflow.
    pub fn down(self) -> Option<Self> {
        self.row.checked_add(1).map(|row| Self::new(row, self.col))
    }

    /// The cell to the right of this one, if the column does not overflow.
    pub fn right(self) -> Option<Self> {
        self.col.checked_add(1).map(|col| Self::new(self.row, col))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}, {}]", self.row, self.col)
    }
}

impl From<(usize, usize)> for Coordinate {
    /// Construct a [`Coordinate`] from the given `(row, col)` pair.
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl From<Coordinate> for (usize, usize) {
    /// Convert the [`Coordinate`] into a `(row, col)` pair.
    fn from(coord: Coordinate) -> Self {
        (coord.row, coord.col)
    }
}
