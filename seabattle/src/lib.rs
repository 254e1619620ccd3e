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
//! Rules and computer opponents for two-player Battleships.
//!
//! Each player owns a [`SeaGrid`] of [`Tile`]s holding their [`Fleet`]. Attacks on a
//! grid produce an [`AttackResult`]. Computer players choose where to shoot through a
//! [`Targeting`] strategy, the strongest of which is [`HardTargeting`]. The [`game`]
//! module ties two grids together into a turn-based match.
//!
//! [`Tile`]: board::Tile
//! [`Fleet`]: ships::Fleet
//! [`HardTargeting`]: targeting::HardTargeting

pub use self::{
    board::{AttackKind, AttackResult, Coordinate, SeaGrid, SeaGridView, TileView},
    game::{Game, GameError, GameSetup, Side},
    ships::{Orientation, ShipName},
    targeting::{Difficulty, Targeting},
};

pub mod board;
pub mod game;
pub mod ships;
pub mod targeting;
