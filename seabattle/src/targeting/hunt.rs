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
use rand::RngCore;
use tracing::{debug, trace};

use crate::{
    board::{AttackKind, AttackResult, Coordinate, SeaGridView},
    targeting::{pop_open, search, Mode, Target, Targeting, TargetingError},
};

/// Searches at random until it hits something, then tries the neighbours of every hit
/// in last-in first-out order. It never works out which way a ship runs and never
/// cleans up after a sinking.
#[derive(Debug, Default, Clone)]
pub struct HuntTargeting {
    mode: Mode,
    frontier: Vec<Target>,
}

impl HuntTargeting {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Pending targets, next to be tried first.
    pub fn frontier(&self) -> impl Iterator<Item = &Target> {
        self.frontier.iter().rev()
    }
}

impl Targeting for HuntTargeting {
    fn next_shot(
        &mut self,
        view: &dyn SeaGridView,
        rng: &mut dyn RngCore,
    ) -> Result<Coordinate, TargetingError> {
        if !view.has_sea() {
            return Err(TargetingError::NoTargetsRemaining);
        }
        if self.mode != Mode::Searching {
            if let Some(target) = pop_open(&mut self.frontier, view) {
                return Ok(target.shot_at);
            }
            debug!("hunt frontier exhausted, searching");
            self.mode = Mode::Searching;
        }
        Ok(search(view, rng).shot_at)
    }

    fn process_shot(
        &mut self,
        coord: Coordinate,
        result: &AttackResult,
    ) -> Result<(), TargetingError> {
        match result.kind() {
            AttackKind::AlreadyShot => return Err(TargetingError::UnexpectedAlreadyShot(coord)),
            AttackKind::Hit => {
                self.frontier.extend(Target::around(coord));
                self.mode = Mode::TargetingShip;
                trace!(%coord, frontier = self.frontier.len(), "hunting around hit");
            }
            AttackKind::Miss | AttackKind::Destroyed(_) => {}
        }
        if self.frontier.is_empty() {
            self.mode = Mode::Searching;
        }
        Ok(())
    }
}
