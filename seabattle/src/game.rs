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
//! Turn-based play between a human and a computer opponent.
//!
//! A game starts as a [`GameSetup`], where the human deploys their fleet. Once every
//! human ship is on the board, [`GameSetup::start`] deploys the computer's fleet at
//! random and produces a [`Game`]. Players keep shooting until they miss; the first to
//! sink the whole enemy fleet wins.
use std::fmt;

use rand::RngCore;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    board::{AttackKind, AttackResult, Coordinate, OutOfBoundsError, PlacementError, SeaGrid},
    ships::{Fleet, Orientation, ShipName},
    targeting::{Difficulty, Targeting, TargetingError},
};

/// Points for each hit.
const HIT_POINTS: i64 = 12;
/// Points lost for each of your own ships that gets sunk.
const SUNK_PENALTY: i64 = 20;

/// One of the two players.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Side {
    Human,
    Computer,
}

impl Side {
    /// Get the opponent of this side.
    pub fn opponent(self) -> Self {
        match self {
            Side::Human => Side::Computer,
            Side::Computer => Side::Human,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(match self {
            Side::Human => "human",
            Side::Computer => "computer",
        })
    }
}

/// Errors from attempting a move in a [`Game`].
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum GameError {
    /// Somebody has already won.
    #[error("the game is already over")]
    AlreadyOver,

    /// The given side tried to shoot while it was the other side's turn.
    #[error("it is not the {0} player's turn")]
    OutOfTurn(Side),

    /// The shot landed off the grid.
    #[error(transparent)]
    OutOfBounds(#[from] OutOfBoundsError),

    /// The computer's targeting engine failed.
    #[error("computer targeting failed: {0}")]
    Targeting(#[from] TargetingError),
}

/// Shooting record for one player.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct PlayerStats {
    shots: usize,
    hits: usize,
    missed: usize,
}

impl PlayerStats {
    /// Every attack, including repeats of tiles already shot.
    pub fn shots(&self) -> usize {
        self.shots
    }

    /// Attacks that struck a ship.
    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn missed(&self) -> usize {
        self.missed
    }

    fn record(&mut self, result: &AttackResult) {
        self.shots += 1;
        match result.kind() {
            AttackKind::Hit | AttackKind::Destroyed(_) => self.hits += 1,
            AttackKind::Miss => self.missed += 1,
            AttackKind::AlreadyShot => {}
        }
    }

    /// Score for a player with these stats whose own grid is `own`. A player whose
    /// whole fleet was sunk scores zero.
    pub fn score(&self, own: &SeaGrid) -> i64 {
        if own.is_destroyed() {
            return 0;
        }
        self.hits as i64 * HIT_POINTS - self.shots as i64 - own.ships_killed() as i64 * SUNK_PENALTY
    }
}

/// Deployment phase of a game.
#[derive(Debug)]
pub struct GameSetup {
    human: SeaGrid,
    computer: SeaGrid,
    difficulty: Difficulty,
    first: Side,
}

impl GameSetup {
    /// Create a setup with the standard fleet on a standard grid for both sides. The
    /// human moves first unless changed with [`GameSetup::set_first_player`].
    pub fn new(difficulty: Difficulty) -> Self {
        Self::from_grids(
            SeaGrid::new(Fleet::default()),
            SeaGrid::new(Fleet::default()),
            difficulty,
        )
    }

    /// Create a setup from grids prepared by the caller. If the computer's grid is
    /// already fully deployed, [`GameSetup::start`] leaves it as is.
    pub fn from_grids(human: SeaGrid, computer: SeaGrid, difficulty: Difficulty) -> Self {
        Self {
            human,
            computer,
            difficulty,
            first: Side::Human,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Choose which side shoots first.
    pub fn set_first_player(&mut self, side: Side) {
        self.first = side;
    }

    pub fn first_player(&self) -> Side {
        self.first
    }

    /// Get the grid belonging to the given side.
    pub fn grid(&self, side: Side) -> &SeaGrid {
        match side {
            Side::Human => &self.human,
            Side::Computer => &self.computer,
        }
    }

    /// Mutable access to the human grid, e.g. to register change listeners.
    pub fn human_grid_mut(&mut self) -> &mut SeaGrid {
        &mut self.human
    }

    /// Move one of the human's ships. See [`SeaGrid::move_ship`].
    pub fn move_ship(
        &mut self,
        ship: ShipName,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<(), PlacementError> {
        self.human.move_ship(row, col, ship, orientation)
    }

    /// Deploy the human's whole fleet at random.
    pub fn randomize_deployment(&mut self, rng: &mut dyn RngCore) -> Result<(), PlacementError> {
        self.human.randomize_deployment(rng)
    }

    /// Take all of the human's ships back off the grid.
    pub fn clear_deployment(&mut self) {
        self.human.clear_deployment();
    }

    /// The human's ships which still need to be placed.
    pub fn pending_ships(&self) -> impl Iterator<Item = ShipName> + '_ {
        self.human
            .ships()
            .iter()
            .filter(|ship| !ship.is_deployed())
            .map(|ship| ship.name())
    }

    /// True once every human ship is deployed.
    pub fn ready(&self) -> bool {
        self.human.all_deployed()
    }

    /// Tries to start the game. If the human is ready and the computer's fleet could be
    /// deployed, returns a [`Game`], otherwise returns self.
    pub fn start(mut self, rng: &mut dyn RngCore) -> Result<Game, Self> {
        if !self.ready() {
            return Err(self);
        }
        if !self.computer.all_deployed() {
            if let Err(err) = self.computer.randomize_deployment(rng) {
                warn!(error = %err, "could not deploy the computer's fleet");
                return Err(self);
            }
        }
        debug!(difficulty = %self.difficulty, first = %self.first, "game started");
        Ok(Game {
            human: self.human,
            computer: self.computer,
            human_stats: PlayerStats::default(),
            computer_stats: PlayerStats::default(),
            targeting: self.difficulty.targeting(),
            current: self.first,
            winner: None,
        })
    }
}

/// Battle phase of a game.
pub struct Game {
    human: SeaGrid,
    computer: SeaGrid,
    human_stats: PlayerStats,
    computer_stats: PlayerStats,
    /// Picks the computer's shots.
    targeting: Box<dyn Targeting>,
    current: Side,
    winner: Option<Side>,
}

impl Game {
    /// The side whose turn it is. Once the game is over this is the winner.
    pub fn current(&self) -> Side {
        self.current
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Get the grid belonging to the given side.
    pub fn grid(&self, side: Side) -> &SeaGrid {
        match side {
            Side::Human => &self.human,
            Side::Computer => &self.computer,
        }
    }

    pub fn stats(&self, side: Side) -> PlayerStats {
        match side {
            Side::Human => self.human_stats,
            Side::Computer => self.computer_stats,
        }
    }

    pub fn score(&self, side: Side) -> i64 {
        self.stats(side).score(self.grid(side))
    }

    /// Fire at `coord` on the grid of `side`'s opponent. The turn passes to the
    /// opponent on a miss only.
    pub fn shoot(&mut self, side: Side, coord: Coordinate) -> Result<AttackResult, GameError> {
        if self.winner.is_some() {
            return Err(GameError::AlreadyOver);
        }
        if side != self.current {
            return Err(GameError::OutOfTurn(side));
        }
        let (target, stats) = match side {
            Side::Human => (&mut self.computer, &mut self.human_stats),
            Side::Computer => (&mut self.human, &mut self.computer_stats),
        };
        let result = target.hit_tile(coord.row, coord.col)?;
        stats.record(&result);

        if target.is_destroyed() {
            debug!(winner = %side, "game over");
            self.winner = Some(side);
        } else if result.kind() == AttackKind::Miss {
            self.current = side.opponent();
            debug!(current = %self.current, "turn passed");
        }
        Ok(result)
    }

    /// Let the computer take shots until it misses or wins. Returns the result of every
    /// shot in order.
    pub fn computer_turn(&mut self, rng: &mut dyn RngCore) -> Result<Vec<AttackResult>, GameError> {
        if self.winner.is_some() {
            return Err(GameError::AlreadyOver);
        }
        if self.current != Side::Computer {
            return Err(GameError::OutOfTurn(Side::Computer));
        }
        let mut results = Vec::new();
        while self.current == Side::Computer && self.winner.is_none() {
            let coord = self.targeting.next_shot(&self.human.enemy_view(), rng)?;
            let result = self.shoot(Side::Computer, coord)?;
            self.targeting.process_shot(coord, &result)?;
            results.push(result);
        }
        Ok(results)
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Game")
            .field("human", &self.human)
            .field("computer", &self.computer)
            .field("human_stats", &self.human_stats)
            .field("computer_stats", &self.computer_stats)
            .field("current", &self.current)
            .field("winner", &self.winner)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    /// A grid with a single tug at (`row`, `col`).
    fn tug_grid(row: usize, col: usize) -> SeaGrid {
        let mut grid = SeaGrid::new(vec![ShipName::Tug].into_iter().collect());
        grid.move_ship(row, col, ShipName::Tug, Orientation::Horizontal).unwrap();
        grid
    }

    fn tug_game(first: Side) -> Game {
        let mut setup = GameSetup::from_grids(tug_grid(0, 0), tug_grid(9, 9), Difficulty::Hard);
        setup.set_first_player(first);
        setup.start(&mut ChaCha8Rng::seed_from_u64(0)).unwrap()
    }

    #[test]
    fn cannot_start_until_deployed() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut setup = GameSetup::new(Difficulty::Easy);
        assert_eq!(setup.pending_ships().count(), 5);
        setup.move_ship(ShipName::Tug, 0, 0, Orientation::Horizontal).unwrap();
        assert_eq!(setup.pending_ships().count(), 4);

        let mut setup = setup.start(&mut rng).unwrap_err();
        setup.randomize_deployment(&mut rng).unwrap();
        assert!(setup.ready());
        let game = setup.start(&mut rng).unwrap();
        assert!(game.grid(Side::Computer).all_deployed());
        assert_eq!(game.current(), Side::Human);
    }

    #[test]
    fn clear_undoes_deployment() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let mut setup = GameSetup::new(Difficulty::Medium);
        setup.randomize_deployment(&mut rng).unwrap();
        setup.clear_deployment();
        assert!(!setup.ready());
        assert_eq!(setup.pending_ships().count(), 5);
    }

    #[test]
    fn human_grid_listener_sees_setup_changes() {
        let changes = Rc::new(Cell::new(0));
        let mut setup = GameSetup::new(Difficulty::Hard);
        let counter = Rc::clone(&changes);
        setup
            .human_grid_mut()
            .on_change(move || counter.set(counter.get() + 1));

        setup.move_ship(ShipName::Tug, 0, 0, Orientation::Horizontal).unwrap();
        assert_eq!(changes.get(), 1);
        setup.clear_deployment();
        assert_eq!(changes.get(), 2);
        assert!(!setup.ready());
    }

    #[test]
    fn miss_passes_the_turn() {
        let mut game = tug_game(Side::Human);
        let result = game.shoot(Side::Human, Coordinate::new(5, 5)).unwrap();
        assert_eq!(result.kind(), AttackKind::Miss);
        assert_eq!(game.current(), Side::Computer);
        assert_eq!(
            game.shoot(Side::Human, Coordinate::new(5, 6)),
            Err(GameError::OutOfTurn(Side::Human))
        );
    }

    #[test]
    fn repeat_shot_counts_but_keeps_turn() {
        let mut game = tug_game(Side::Computer);
        let coord = Coordinate::new(4, 4);
        game.shoot(Side::Computer, coord).unwrap();
        game.shoot(Side::Human, Coordinate::new(3, 3)).unwrap();
        let result = game.shoot(Side::Computer, coord).unwrap();
        assert_eq!(result.kind(), AttackKind::AlreadyShot);
        assert_eq!(game.current(), Side::Computer);
        let stats = game.stats(Side::Computer);
        assert_eq!((stats.shots(), stats.hits(), stats.missed()), (2, 0, 1));
    }

    #[test]
    fn sinking_the_fleet_wins() {
        let mut game = tug_game(Side::Human);
        let result = game.shoot(Side::Human, Coordinate::new(9, 9)).unwrap();
        assert_eq!(result.destroyed_ship(), Some(ShipName::Tug));
        assert_eq!(game.winner(), Some(Side::Human));
        assert_eq!(
            game.shoot(Side::Human, Coordinate::new(1, 1)),
            Err(GameError::AlreadyOver)
        );
        assert_eq!(game.score(Side::Human), 12 - 1);
        assert_eq!(game.score(Side::Computer), 0);
    }

    #[test]
    fn out_of_bounds_shot_is_rejected() {
        let mut game = tug_game(Side::Human);
        assert!(matches!(
            game.shoot(Side::Human, Coordinate::new(10, 0)),
            Err(GameError::OutOfBounds(_))
        ));
        assert_eq!(game.current(), Side::Human);
        assert_eq!(game.stats(Side::Human).shots(), 0);
    }

    #[test]
    fn computer_turn_runs_until_a_miss_or_a_win() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut game = tug_game(Side::Computer);
        let results = game.computer_turn(&mut rng).unwrap();
        let last = results.last().unwrap();
        if game.is_over() {
            assert_eq!(game.winner(), Some(Side::Computer));
            assert_eq!(last.destroyed_ship(), Some(ShipName::Tug));
        } else {
            assert_eq!(results.len(), 1);
            assert_eq!(last.kind(), AttackKind::Miss);
            assert_eq!(game.current(), Side::Human);
        }
        assert_eq!(game.stats(Side::Computer).shots(), results.len());
    }

    #[test]
    fn computer_waits_for_its_turn() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut game = tug_game(Side::Human);
        assert_eq!(
            game.computer_turn(&mut rng),
            Err(GameError::OutOfTurn(Side::Computer))
        );
    }

    #[test]
    fn score_penalizes_lost_ships() {
        let mut grid = SeaGrid::default();
        grid.move_ship(0, 0, ShipName::Tug, Orientation::Horizontal).unwrap();
        grid.hit_tile(0, 0).unwrap();
        let stats = PlayerStats {
            shots: 10,
            hits: 4,
            missed: 6,
        };
        assert_eq!(stats.score(&grid), 4 * 12 - 10 - 20);
    }
}
