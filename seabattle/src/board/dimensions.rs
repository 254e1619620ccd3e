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
//! Rectangular dimensions of a sea grid.
use crate::board::Coordinate;

/// Width of the standard sea grid.
pub const DEFAULT_WIDTH: usize = 10;
/// Height of the standard sea grid.
pub const DEFAULT_HEIGHT: usize = 10;

/// Simple rectangular dimensions. Rows run along the height and columns along the width.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RectDimensions {
    /// Number of columns.
    width: usize,
    /// Number of rows.
    height: usize,
}

impl RectDimensions {
    /// Dimensions of a grid `width` columns wide and `height` rows tall. `None` if either
    /// side is zero or the tile count would overflow.
    pub fn try_new(width: usize, height: usize) -> Option<Self> {
        match width.checked_mul(height) {
            Some(total) if total > 0 => Some(Self { width, height }),
            _ => None,
        }
    }

    /// Get the width of these [`RectDimensions`].
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get the height of these [`RectDimensions`].
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of tiles in a grid of these dimensions.
    pub fn total_size(&self) -> usize {
        self.width * self.height
    }

    /// Row-major index of `coord`, or `None` if it lies outside these dimensions.
    pub fn try_linearize(&self, coord: &Coordinate) -> Option<usize> {
        if coord.row < self.height && coord.col < self.width {
            Some(coord.row * self.width + coord.col)
        } else {
            None
        }
    }

    /// Coordinate of the tile at row-major index `idx`.
    pub fn un_linearize(&self, idx: usize) -> Coordinate {
        Coordinate {
            row: idx / self.width,
            col: idx % self.width,
        }
    }

    /// Iterate the rows of the grid, each as an iterator over its coordinates.
    pub fn iter_coordinates(&self) -> impl Iterator<Item = impl Iterator<Item = Coordinate>> {
        let width = self.width;
        (0..self.height).map(move |row| (0..width).map(move |col| Coordinate { row, col }))
    }
}

impl Default for RectDimensions {
    /// Construct the default rectangular dimensions, a 10x10 board.
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linearize_is_row_major() {
        let dim = RectDimensions::try_new(4, 3).unwrap();
        assert_eq!(dim.try_linearize(&Coordinate::new(0, 0)), Some(0));
        assert_eq!(dim.try_linearize(&Coordinate::new(1, 2)), Some(6));
        assert_eq!(dim.try_linearize(&Coordinate::new(2, 3)), Some(11));
        assert_eq!(dim.un_linearize(6), Coordinate::new(1, 2));
    }

    #[test]
    fn out_of_range_is_rejected() {
        let dim = RectDimensions::try_new(4, 3).unwrap();
        assert_eq!(dim.try_linearize(&Coordinate::new(3, 0)), None);
        assert_eq!(dim.try_linearize(&Coordinate::new(0, 4)), None);
    }

    #[test]
    fn zero_sized_dimensions_are_invalid() {
        assert_eq!(RectDimensions::try_new(0, 10), None);
        assert_eq!(RectDimensions::try_new(10, 0), None);
    }

    #[test]
    fn iter_coordinates_covers_grid() {
        let dim = RectDimensions::default();
        let all: Vec<_> = dim.iter_coordinates().flatten().collect();
        assert_eq!(all.len(), 100);
        assert_eq!(all[0], Coordinate::new(0, 0));
        assert_eq!(all[13], Coordinate::new(1, 3));
    }
}
