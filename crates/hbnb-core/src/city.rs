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

//! Defines the City entity: belongs to one State, owns many Places.

use crate::entity::{impl_entity, Updatable};
use crate::errors::HbnbError;
use crate::types::{new_id, EntityId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct City {
    pub id: EntityId,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
    pub state_id: EntityId,
    pub name: String,
}

impl_entity!(City);

impl City {
    pub fn new(state_id: impl Into<EntityId>, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: new_id(),
            created_at: now,
            updated_at: now,
            state_id: state_id.into(),
            name: name.into(),
        }
    }

    /// Applies a partial update. `state_id` is not writable.
    pub fn apply(&mut self, update: CityUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        self.updated_at = Utc::now();
    }
}

/// Payload accepted when creating a City; the owning State comes from the route.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewCity {
    pub name: Option<String>,
}

impl NewCity {
    pub fn build(self, state_id: &str) -> Result<City, HbnbError> {
        let name = self.name.ok_or_else(|| HbnbError::missing("name"))?;
        Ok(City::new(state_id, name))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CityUpdate {
    pub name: Option<String>,
}

impl Updatable for City {
    type Update = CityUpdate;

    fn apply_update(&mut self, update: CityUpdate) {
        self.apply(update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_id_comes_from_the_route() {
        let payload: NewCity =
            serde_json::from_str(r#"{"name": "Reno", "state_id": "other"}"#).unwrap();
        let city = payload.build("nv").unwrap();
        assert_eq!(city.state_id, "nv");
        assert_eq!(city.name, "Reno");
    }

    #[test]
    fn update_cannot_move_city() {
        let mut city = City::new("nv", "Reno");
        let update: CityUpdate =
            serde_json::from_str(r#"{"state_id": "ca", "name": "Sparks"}"#).unwrap();
        city.apply(update);
        assert_eq!(city.state_id, "nv");
        assert_eq!(city.name, "Sparks");
    }
}
