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
use tracing::{debug, trace, warn};

use crate::{
    board::{AttackKind, AttackResult, Coordinate, SeaGridView},
    targeting::{pop_open, search, Mode, Target, Targeting, TargetingError},
};

/// The strongest computer opponent.
///
/// Like [`HuntTargeting`][crate::targeting::HuntTargeting] it keeps a stack of cells
/// next to previous hits, but each entry remembers which hit suggested it. That lets
/// it:
///
/// * notice when a hit lines up with the hit that suggested it and move every pending
///   cell on that line to the top of the stack, and
/// * walk back from the sinking shot through the hits that led to it once a ship goes
///   down, dropping the pending cells those hits suggested.
#[derive(Debug, Default, Clone)]
pub struct HardTargeting {
    mode: Mode,
    /// Pending cells. The top of the stack is the end of the vec.
    frontier: Vec<Target>,
    /// Hits that have not yet been attributed to a sunk ship, oldest first.
    history: Vec<Target>,
    /// The target handed out by the most recent `next_shot`.
    current: Option<Target>,
}

impl HardTargeting {
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

    /// Hits not yet accounted for by a sunk ship, oldest first.
    pub fn history(&self) -> &[Target] {
        &self.history
    }

    fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            debug!(from = ?self.mode, to = ?mode, "targeting mode changed");
            self.mode = mode;
        }
    }

    fn process_hit(&mut self, target: Target) {
        self.history.push(target);
        self.frontier.extend(Target::around(target.shot_at));
        if self.mode == Mode::Searching {
            self.set_mode(Mode::TargetingShip);
        } else {
            self.set_mode(Mode::HittingShip);
            self.promote_axis(target);
        }
    }

    /// If `target` lies on the same line as the hit that suggested it, move every
    /// pending cell on that line to the top, keeping the relative order of both groups.
    fn promote_axis(&mut self, target: Target) {
        let same_row = target.same_row();
        if !same_row && !target.same_col() {
            return;
        }
        let axis = |coord: Coordinate| if same_row { coord.row } else { coord.col };
        let line = axis(target.shot_at);
        let (promoted, rest): (Vec<_>, Vec<_>) = self
            .frontier
            .drain(..)
            .partition(|t| axis(t.shot_at) == line);
        trace!(promoted = promoted.len(), rest = rest.len(), "promoting cells on ship axis");
        self.frontier = rest;
        self.frontier.extend(promoted);
    }

    /// Walk the chain of hits that led to the sinking shot and drop the pending cells
    /// each of them suggested. The chain first follows sources back to the search hit
    /// that found the ship, then follows forward through hits sourced from the ones
    /// already visited, until one link per remaining ship segment has been consumed.
    fn clear_sunk_ship(&mut self, sinking: Target, size: usize) {
        let mut link = sinking;
        let mut found_origin = false;
        for _ in 1..size {
            let source = if found_origin {
                link.shot_at
            } else {
                match link.source {
                    Some(source) => source,
                    None => {
                        found_origin = true;
                        link.shot_at
                    }
                }
            };
            let position = self.history.iter().position(|t| {
                if found_origin {
                    t.source == Some(source)
                } else {
                    t.shot_at == source
                }
            });
            match position {
                Some(idx) => link = self.history.remove(idx),
                None => trace!(%source, "no recorded hit continues the chain"),
            }
            let around = link.shot_at;
            self.frontier.retain(|t| t.source != Some(around));
        }
    }
}

impl Targeting for HardTargeting {
    fn next_shot(
        &mut self,
        view: &dyn SeaGridView,
        rng: &mut dyn RngCore,
    ) -> Result<Coordinate, TargetingError> {
        if !view.has_sea() {
            return Err(TargetingError::NoTargetsRemaining);
        }
        let pending = match self.mode {
            Mode::Searching => None,
            Mode::TargetingShip | Mode::HittingShip => pop_open(&mut self.frontier, view),
        };
        let target = match pending {
            Some(target) => target,
            None => {
                self.set_mode(Mode::Searching);
                search(view, rng)
            }
        };
        trace!(coord = %target.shot_at, source = ?target.source, "next target");
        self.current = Some(target);
        Ok(target.shot_at)
    }

    fn process_shot(
        &mut self,
        coord: Coordinate,
        result: &AttackResult,
    ) -> Result<(), TargetingError> {
        let target = match self.current.take() {
            Some(target) if target.shot_at == coord => target,
            _ => {
                warn!(%coord, "result for a shot this engine did not choose");
                Target::new(coord, None)
            }
        };
        match result.kind() {
            AttackKind::Miss => {}
            AttackKind::Hit => self.process_hit(target),
            AttackKind::Destroyed(ship) => {
                debug!(%ship, %coord, "ship sunk, clearing its leftovers");
                self.clear_sunk_ship(target, ship.size());
            }
            AttackKind::AlreadyShot => return Err(TargetingError::UnexpectedAlreadyShot(coord)),
        }
        if self.frontier.is_empty() {
            self.set_mode(Mode::Searching);
        }
        Ok(())
    }
}
