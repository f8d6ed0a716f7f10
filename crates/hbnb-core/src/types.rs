// Copyright 2024 Helix Platform
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

//! Common type definitions used throughout HBnB.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier shared by every entity kind.
pub type EntityId = String;

/// A plain key/value record handed to the serialization boundary.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Generates a fresh entity id.
pub fn new_id() -> EntityId {
    Uuid::new_v4().to_string()
}

/// The kinds of entity held by an [`EntityStore`](crate::store::EntityStore).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    State,
    City,
    Place,
    User,
    Review,
    Amenity,
}

impl EntityKind {
    /// Every kind, in the order used for statistics.
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Amenity,
        EntityKind::City,
        EntityKind::Place,
        EntityKind::Review,
        EntityKind::State,
        EntityKind::User,
    ];

    /// Class name as it appears in records and storage keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::State => "State",
            EntityKind::City => "City",
            EntityKind::Place => "Place",
            EntityKind::User => "User",
            EntityKind::Review => "Review",
            EntityKind::Amenity => "Amenity",
        }
    }

    /// Plural collection name (`"states"`, `"amenities"`, ...).
    pub fn collection(&self) -> &'static str {
        match self {
            EntityKind::State => "states",
            EntityKind::City => "cities",
            EntityKind::Place => "places",
            EntityKind::User => "users",
            EntityKind::Review => "reviews",
            EntityKind::Amenity => "amenities",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
