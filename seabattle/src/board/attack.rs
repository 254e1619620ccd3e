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

use crate::{board::Coordinate, ships::ShipName};

/// What happened when a tile was attacked.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum AttackKind {
    /// The shot did not hit anything.
    Miss,
    /// The shot hit a ship, but did not sink it.
    Hit,
    /// The shot hit the given ship and that was its last intact segment.
    Destroyed(ShipName),
    /// The tile had been shot before. Nothing changed.
    AlreadyShot,
}

/// Outcome of a single attack on a [`SeaGrid`][crate::board::SeaGrid]. Produced once
/// per attack and never modified.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct AttackResult {
    kind: AttackKind,
    coord: Coordinate,
}

impl AttackResult {
    pub(crate) fn new(kind: AttackKind, coord: Coordinate) -> Self {
        Self { kind, coord }
    }

    pub fn kind(&self) -> AttackKind {
        self.kind
    }

    /// The coordinate that was attacked.
    pub fn coord(&self) -> Coordinate {
        self.coord
    }

    pub fn row(&self) -> usize {
        self.coord.row
    }

    pub fn col(&self) -> usize {
        self.coord.col
    }

    /// The ship sunk by this attack, if any.
    pub fn destroyed_ship(&self) -> Option<ShipName> {
        match self.kind {
            AttackKind::Destroyed(ship) => Some(ship),
            _ => None,
        }
    }

    /// True if the attack struck a ship, whether or not it sank.
    pub fn is_hit(&self) -> bool {
        matches!(self.kind, AttackKind::Hit | AttackKind::Destroyed(_))
    }
}

impl fmt::Display for AttackResult {
    /// The message shown to the player for this outcome.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            AttackKind::Miss => f.write_str("missed"),
            AttackKind::Hit => f.write_str("hit something!"),
            AttackKind::Destroyed(ship) => write!(f, "destroyed the enemy's {}!", ship),
            AttackKind::AlreadyShot => write!(
                f,
                "have already attacked [{},{}]!",
                self.coord.col, self.coord.row
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let at = Coordinate::new(2, 7);
        assert_eq!(AttackResult::new(AttackKind::Miss, at).to_string(), "missed");
        assert_eq!(
            AttackResult::new(AttackKind::Destroyed(ShipName::AircraftCarrier), at).to_string(),
            "destroyed the enemy's Aircraft Carrier!"
        );
        assert_eq!(
            AttackResult::new(AttackKind::AlreadyShot, at).to_string(),
            "have already attacked [7,2]!"
        );
    }

    #[test]
    fn destroyed_carries_ship() {
        let result = AttackResult::new(AttackKind::Destroyed(ShipName::Tug), Coordinate::new(0, 0));
        assert_eq!(result.destroyed_ship(), Some(ShipName::Tug));
        assert!(result.is_hit());
        assert!(!AttackResult::new(AttackKind::AlreadyShot, Coordinate::new(0, 0)).is_hit());
    }
}
