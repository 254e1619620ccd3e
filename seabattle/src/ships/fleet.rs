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
use std::{collections::HashMap, iter::FromIterator};

use crate::ships::{Ship, ShipName};

/// Registry of the ships a player deploys, keyed by kind. Holds at most one ship of
/// each kind.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Fleet {
    ships: HashMap<ShipName, Ship>,
}

impl Fleet {
    /// The standard fleet with one ship of every kind.
    pub fn new() -> Self {
        ShipName::ALL.iter().copied().collect()
    }

    /// Number of ships in the fleet.
    pub fn len(&self) -> usize {
        self.ships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }

    /// Get the ship of the given kind, if it is part of the fleet.
    pub fn get(&self, name: ShipName) -> Option<&Ship> {
        self.ships.get(&name)
    }

    pub(crate) fn get_mut(&mut self, name: ShipName) -> Option<&mut Ship> {
        self.ships.get_mut(&name)
    }

    /// Kinds of ship in this fleet, smallest first.
    pub fn names(&self) -> impl Iterator<Item = ShipName> + '_ {
        ShipName::ALL
            .iter()
            .copied()
            .filter(move |name| self.ships.contains_key(name))
    }

    /// Iterate the ships of this fleet, smallest first.
    pub fn iter(&self) -> impl Iterator<Item = &Ship> {
        self.names().filter_map(move |name| self.ships.get(&name))
    }

    /// True if every ship in the fleet currently holds tiles.
    pub fn all_deployed(&self) -> bool {
        self.ships.values().all(Ship::is_deployed)
    }
}

impl Default for Fleet {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<ShipName> for Fleet {
    /// Build a fleet holding one unplaced ship of each given kind. Duplicate kinds
    /// collapse into one ship.
    fn from_iter<T: IntoIterator<Item = ShipName>>(iter: T) -> Self {
        Self {
            ships: iter.into_iter().map(|name| (name, Ship::new(name))).collect(),
        }
    }
}
