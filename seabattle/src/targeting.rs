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
//! Computer players' choice of where to shoot next.
//!
//! Each strategy implements [`Targeting`]. A turn controller asks for a coordinate
//! with [`Targeting::next_shot`], fires it at the opponent's grid, and hands the
//! result back through [`Targeting::process_shot`].
//!
//! [`HardTargeting`] is the interesting one: after a hit it keeps a stack of
//! neighbouring cells to try, promotes the cells on the ship's axis once a second hit
//! reveals it, and drops the leftovers around a ship once it sinks.

use std::{fmt, str::FromStr};

use rand::{Rng, RngCore};
use thiserror::Error;
use tracing::trace;

use crate::board::{AttackResult, Coordinate, SeaGridView, TileView};

pub use self::{hard::HardTargeting, hunt::HuntTargeting, random::RandomTargeting};

mod hard;
mod hunt;
mod random;

/// Errors reported by a targeting engine.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum TargetingError {
    /// The engine was told that one of its own shots landed on a tile that had already
    /// been shot. Engines only generate shots at unshot tiles, so this means the
    /// caller and the engine disagree about the board.
    #[error("shot at {0} was reported as already shot")]
    UnexpectedAlreadyShot(Coordinate),

    /// Every tile of the opponent's grid has been shot.
    #[error("no unshot tiles remain")]
    NoTargetsRemaining,
}

/// Strategy used by a computer player to pick coordinates.
pub trait Targeting {
    /// Choose the next coordinate to attack. The returned coordinate is always on the
    /// grid and shows [`TileView::Sea`] in `view`.
    fn next_shot(
        &mut self,
        view: &dyn SeaGridView,
        rng: &mut dyn RngCore,
    ) -> Result<Coordinate, TargetingError>;

    /// Update the strategy with the outcome of the shot at `coord`.
    fn process_shot(
        &mut self,
        coord: Coordinate,
        result: &AttackResult,
    ) -> Result<(), TargetingError>;
}

impl<T: Targeting + ?Sized> Targeting for Box<T> {
    fn next_shot(
        &mut self,
        view: &dyn SeaGridView,
        rng: &mut dyn RngCore,
    ) -> Result<Coordinate, TargetingError> {
        (**self).next_shot(view, rng)
    }

    fn process_shot(
        &mut self,
        coord: Coordinate,
        result: &AttackResult,
    ) -> Result<(), TargetingError> {
        (**self).process_shot(coord, result)
    }
}

/// How strong the computer opponent is.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Difficulty {
    /// Shoots at random.
    Easy,
    /// Searches around hits, but without inferring the axis of a ship.
    Medium,
    /// Infers ship axes and cleans up around sunk ships.
    Hard,
}

impl Difficulty {
    pub const ALL: &'static [Difficulty] =
        &[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Construct a fresh targeting engine of this difficulty.
    pub fn targeting(self) -> Box<dyn Targeting> {
        match self {
            Difficulty::Easy => Box::new(RandomTargeting::new()),
            Difficulty::Medium => Box::new(HuntTargeting::new()),
            Difficulty::Hard => Box::new(HardTargeting::new()),
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Hard
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        })
    }
}

/// Error returned when parsing an unknown difficulty.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
#[error("unknown difficulty {0:?}, expected easy, medium, or hard")]
pub struct ParseDifficultyError(String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ParseDifficultyError(s.to_owned())),
        }
    }
}

/// A candidate coordinate along with the hit that suggested it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Target {
    /// Where to shoot.
    pub shot_at: Coordinate,
    /// The hit whose neighbour this is. `None` for a random search shot.
    pub source: Option<Coordinate>,
}

impl Target {
    pub fn new(shot_at: Coordinate, source: Option<Coordinate>) -> Self {
        Self { shot_at, source }
    }

    /// True if the target and its source lie in the same row.
    pub fn same_row(&self) -> bool {
        self.source.map_or(false, |source| source.row == self.shot_at.row)
    }

    /// True if the target and its source lie in the same column.
    pub fn same_col(&self) -> bool {
        self.source.map_or(false, |source| source.col == self.shot_at.col)
    }

    /// The four orthogonal neighbours of a hit, in the order up, left, down, right,
    /// each tagged with the hit as its source. Neighbours that would fall below row or
    /// column zero are not representable and are skipped; everything else is kept and
    /// checked when popped.
    pub(crate) fn around(hit: Coordinate) -> impl Iterator<Item = Target> {
        let neighbours = [hit.up(), hit.left(), hit.down(), hit.right()];
        IntoIterator::into_iter(neighbours)
            .flatten()
            .map(move |coord| Target::new(coord, Some(hit)))
    }
}

/// What a frontier-based engine is currently doing.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Mode {
    /// Shooting at random, looking for a ship.
    Searching,
    /// A ship was hit once; trying its neighbours.
    TargetingShip,
    /// A ship was hit more than once; working along its axis.
    HittingShip,
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Searching
    }
}

/// True if `coord` is on the grid and has not been shot.
pub(crate) fn is_open(view: &dyn SeaGridView, coord: Coordinate) -> bool {
    view.item(coord.row, coord.col) == Ok(TileView::Sea)
}

/// Pick a uniformly random coordinate on the grid. It may already have been shot.
pub(crate) fn random_coordinate(view: &dyn SeaGridView, rng: &mut dyn RngCore) -> Coordinate {
    let row = rng.gen_range(0..view.height());
    let col = rng.gen_range(0..view.width());
    Coordinate::new(row, col)
}

/// Draw random coordinates until one is open. The view must contain some sea.
pub(crate) fn search(view: &dyn SeaGridView, rng: &mut dyn RngCore) -> Target {
    loop {
        let coord = random_coordinate(view, rng);
        if is_open(view, coord) {
            return Target::new(coord, None);
        }
    }
}

/// Pop targets off the top of the frontier, discarding any that have been shot or lie
/// off the grid, until an open one turns up.
pub(crate) fn pop_open(frontier: &mut Vec<Target>, view: &dyn SeaGridView) -> Option<Target> {
    while let Some(target) = frontier.pop() {
        if is_open(view, target.shot_at) {
            return Some(target);
        }
        trace!(coord = %target.shot_at, "discarding stale target");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbours_in_push_order() {
        let around: Vec<_> = Target::around(Coordinate::new(4, 4))
            .map(|t| t.shot_at)
            .collect();
        assert_eq!(
            around,
            vec![
                Coordinate::new(3, 4),
                Coordinate::new(4, 3),
                Coordinate::new(5, 4),
                Coordinate::new(4, 5),
            ]
        );
    }

    #[test]
    fn corner_neighbours_skip_negative() {
        let around: Vec<_> = Target::around(Coordinate::new(0, 0)).collect();
        assert_eq!(around.len(), 2);
        assert!(around.iter().all(|t| t.source == Some(Coordinate::new(0, 0))));
    }

    #[test]
    fn axis_relative_to_source() {
        let t = Target::new(Coordinate::new(2, 5), Some(Coordinate::new(2, 4)));
        assert!(t.same_row());
        assert!(!t.same_col());
        assert!(!Target::new(Coordinate::new(2, 5), None).same_row());
    }

    #[test]
    fn parse_difficulty() {
        assert_eq!("HARD".parse(), Ok(Difficulty::Hard));
        assert_eq!("easy".parse(), Ok(Difficulty::Easy));
        assert!("nightmare".parse::<Difficulty>().is_err());
        assert_eq!(Difficulty::default(), Difficulty::Hard);
    }
}
