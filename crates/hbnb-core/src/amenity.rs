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

//! Defines the Amenity entity, linked many-to-many with Places.

use crate::entity::{impl_entity, Updatable};
use crate::errors::HbnbError;
use crate::types::{new_id, EntityId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Amenity {
    pub id: EntityId,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
    pub name: String,
}

impl_entity!(Amenity);

impl Amenity {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: new_id(),
            created_at: now,
            updated_at: now,
            name: name.into(),
        }
    }

    pub fn apply(&mut self, update: AmenityUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewAmenity {
    pub name: Option<String>,
}

impl NewAmenity {
    pub fn build(self) -> Result<Amenity, HbnbError> {
        let name = self.name.ok_or_else(|| HbnbError::missing("name"))?;
        Ok(Amenity::new(name))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AmenityUpdate {
    pub name: Option<String>,
}

impl Updatable for Amenity {
    type Update = AmenityUpdate;

    fn apply_update(&mut self, update: AmenityUpdate) {
        self.apply(update)
    }
}
