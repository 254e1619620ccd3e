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
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use seabattle::{
    targeting::{Difficulty, Targeting},
    AttackKind, Game, GameSetup, SeaGrid, Side,
};

const SEEDS: u64 = 20;

/// Number of shots the given strategy needs to sink a randomly deployed fleet.
fn shots_to_sink(difficulty: Difficulty, seed: u64) -> usize {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut grid = SeaGrid::default();
    grid.randomize_deployment(&mut rng).unwrap();
    let mut engine = difficulty.targeting();
    let mut shots = 0;
    while !grid.is_destroyed() {
        let coord = engine.next_shot(&grid.enemy_view(), &mut rng).unwrap();
        let result = grid.hit_tile(coord.row, coord.col).unwrap();
        assert_ne!(result.kind(), AttackKind::AlreadyShot);
        engine.process_shot(coord, &result).unwrap();
        shots += 1;
    }
    shots
}

/// Play the human side with a computer strategy until the game ends.
fn autoplay(game: &mut Game, human: &mut dyn Targeting, rng: &mut dyn RngCore) {
    while !game.is_over() {
        match game.current() {
            Side::Human => {
                let coord = human
                    .next_shot(&game.grid(Side::Computer).enemy_view(), rng)
                    .unwrap();
                let result = game.shoot(Side::Human, coord).unwrap();
                human.process_shot(coord, &result).unwrap();
            }
            Side::Computer => {
                let results = game.computer_turn(rng).unwrap();
                assert!(!results.is_empty());
            }
        }
    }
}

#[test]
fn every_difficulty_finishes_a_game() {
    for &difficulty in Difficulty::ALL {
        for seed in 0..SEEDS {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut setup = GameSetup::new(difficulty);
            setup.randomize_deployment(&mut rng).unwrap();
            if seed % 2 == 1 {
                setup.set_first_player(Side::Computer);
            }
            let mut game = setup.start(&mut rng).unwrap();
            let mut human = Difficulty::Hard.targeting();
            autoplay(&mut game, &mut human, &mut rng);

            let winner = game.winner().unwrap();
            assert!(game.grid(winner.opponent()).is_destroyed());
            assert!(!game.grid(winner).is_destroyed());
            for &side in &[Side::Human, Side::Computer] {
                let stats = game.stats(side);
                assert!(stats.shots() <= 100);
                assert_eq!(stats.shots(), stats.hits() + stats.missed());
            }
            assert_eq!(game.stats(winner).hits(), 15);
            assert_eq!(game.score(winner.opponent()), 0);
        }
    }
}

#[test]
fn every_strategy_sinks_a_fleet_within_the_board() {
    for &difficulty in Difficulty::ALL {
        for seed in 0..SEEDS {
            let shots = shots_to_sink(difficulty, seed);
            assert!((15..=100).contains(&shots), "{} took {} shots", difficulty, shots);
        }
    }
}

#[test]
fn hard_needs_fewer_shots_than_easy() {
    let total = |difficulty| -> usize {
        (0..SEEDS).map(|seed| shots_to_sink(difficulty, seed)).sum()
    };
    let easy = total(Difficulty::Easy);
    let medium = total(Difficulty::Medium);
    let hard = total(Difficulty::Hard);
    assert!(hard < easy, "hard {} vs easy {}", hard, easy);
    assert!(medium < easy, "medium {} vs easy {}", medium, easy);
}

#[test]
fn seeded_games_are_reproducible() {
    let play = |seed| {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut setup = GameSetup::new(Difficulty::Hard);
        setup.randomize_deployment(&mut rng).unwrap();
        let mut game = setup.start(&mut rng).unwrap();
        let mut human = Difficulty::Medium.targeting();
        autoplay(&mut game, &mut human, &mut rng);
        (game.winner(), game.stats(Side::Human), game.stats(Side::Computer))
    };
    assert_eq!(play(42), play(42));
}
