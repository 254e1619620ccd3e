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

use crate::{
    board::{AttackKind, AttackResult, Coordinate, SeaGridView},
    targeting::{search, Targeting, TargetingError},
};

/// Shoots at random unshot tiles and learns nothing from the results.
#[derive(Debug, Default, Copy, Clone)]
pub struct RandomTargeting;

impl RandomTargeting {
    pub fn new() -> Self {
        RandomTargeting
    }
}

impl Targeting for RandomTargeting {
    fn next_shot(
        &mut self,
        view: &dyn SeaGridView,
        rng: &mut dyn RngCore,
    ) -> Result<Coordinate, TargetingError> {
        if !view.has_sea() {
            return Err(TargetingError::NoTargetsRemaining);
        }
        Ok(search(view, rng).shot_at)
    }

    fn process_shot(
        &mut self,
        coord: Coordinate,
        result: &AttackResult,
    ) -> Result<(), TargetingError> {
        match result.kind() {
            AttackKind::AlreadyShot => Err(TargetingError::UnexpectedAlreadyShot(coord)),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::board::{SeaGrid, TileView};

    #[test]
    fn only_picks_unshot_tiles() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut grid = SeaGrid::default();
        let mut engine = RandomTargeting::new();
        for _ in 0..100 {
            let coord = engine.next_shot(&grid.enemy_view(), &mut rng).unwrap();
            assert_eq!(grid.item(coord.row, coord.col), Ok(TileView::Sea));
            let result = grid.hit_tile(coord.row, coord.col).unwrap();
            engine.process_shot(coord, &result).unwrap();
        }
        assert_eq!(
            engine.next_shot(&grid.enemy_view(), &mut rng),
            Err(TargetingError::NoTargetsRemaining)
        );
    }
}
