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

//! Defines the Place entity and its Amenity membership.

use crate::entity::{impl_entity, Updatable};
use crate::errors::HbnbError;
use crate::types::{new_id, EntityId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A rentable place, listed in one City by one User.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Place {
    pub id: EntityId,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
    pub city_id: EntityId,
    pub user_id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub number_rooms: u32,
    #[serde(default)]
    pub number_bathrooms: u32,
    #[serde(default)]
    pub max_guest: u32,
    #[serde(default)]
    pub price_by_night: u32,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    /// Ids of the Amenities offered here, in link order.
    #[serde(rename = "amenities", default)]
    pub amenity_ids: Vec<EntityId>,
}

impl_entity!(Place);

impl Place {
    pub fn new(
        city_id: impl Into<EntityId>,
        user_id: impl Into<EntityId>,
        name: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: new_id(),
            created_at: now,
            updated_at: now,
            city_id: city_id.into(),
            user_id: user_id.into(),
            name: name.into(),
            description: String::new(),
            number_rooms: 0,
            number_bathrooms: 0,
            max_guest: 0,
            price_by_night: 0,
            latitude: 0.0,
            longitude: 0.0,
            amenity_ids: Vec::new(),
        }
    }

    pub fn has_amenity(&self, amenity_id: &str) -> bool {
        self.amenity_ids.iter().any(|id| id == amenity_id)
    }

    /// Links an amenity. Returns `false` if it was already linked.
    pub fn link_amenity(&mut self, amenity_id: &str) -> bool {
        if self.has_amenity(amenity_id) {
            return false;
        }
        self.amenity_ids.push(amenity_id.to_string());
        self.updated_at = Utc::now();
        true
    }

    /// Unlinks an amenity. Returns `false` if it was not linked.
    pub fn unlink_amenity(&mut self, amenity_id: &str) -> bool {
        let before = self.amenity_ids.len();
        self.amenity_ids.retain(|id| id != amenity_id);
        let removed = self.amenity_ids.len() != before;
        if removed {
            self.updated_at = Utc::now();
        }
        removed
    }

    /// Applies a partial update. `city_id`, `user_id` and the amenity links
    /// are not writable through it.
    pub fn apply(&mut self, update: PlaceUpdate) {
        let PlaceUpdate {
            name,
            description,
            number_rooms,
            number_bathrooms,
            max_guest,
            price_by_night,
            latitude,
            longitude,
        } = update;

        if let Some(v) = name {
            self.name = v;
        }
        if let Some(v) = description {
            self.description = v;
        }
        if let Some(v) = number_rooms {
            self.number_rooms = v;
        }
        if let Some(v) = number_bathrooms {
            self.number_bathrooms = v;
        }
        if let Some(v) = max_guest {
            self.max_guest = v;
        }
        if let Some(v) = price_by_night {
            self.price_by_night = v;
        }
        if let Some(v) = latitude {
            self.latitude = v;
        }
        if let Some(v) = longitude {
            self.longitude = v;
        }
        self.updated_at = Utc::now();
    }
}

/// Payload accepted when creating a Place; the City comes from the route.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewPlace {
    pub user_id: Option<EntityId>,
    pub name: Option<String>,
    #[serde(flatten)]
    pub details: PlaceUpdate,
}

impl NewPlace {
    /// Checks required fields in the order `user_id`, then `name`.
    pub fn build(self, city_id: &str) -> Result<Place, HbnbError> {
        let user_id = self.user_id.ok_or_else(|| HbnbError::missing("user_id"))?;
        let name = self.name.ok_or_else(|| HbnbError::missing("name"))?;
        let mut place = Place::new(city_id, user_id, name);
        place.apply(PlaceUpdate {
            name: None,
            ..self.details
        });
        place.updated_at = place.created_at;
        Ok(place)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub number_rooms: Option<u32>,
    pub number_bathrooms: Option<u32>,
    pub max_guest: Option<u32>,
    pub price_by_night: Option<u32>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Updatable for Place {
    type Update = PlaceUpdate;

    fn apply_update(&mut self, update: PlaceUpdate) {
        self.apply(update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Entity;

    #[test]
    fn build_checks_user_id_before_name() {
        match NewPlace::default().build("c1") {
            Err(HbnbError::BadRequest(msg)) => assert_eq!(msg, "Missing user_id"),
            other => panic!("expected BadRequest, got {:?}", other),
        }
        let payload: NewPlace = serde_json::from_str(r#"{"user_id": "u1"}"#).unwrap();
        match payload.build("c1") {
            Err(HbnbError::BadRequest(msg)) => assert_eq!(msg, "Missing name"),
            other => panic!("expected BadRequest, got {:?}", other),
        }
    }

    #[test]
    fn build_takes_optional_details() {
        let payload: NewPlace = serde_json::from_str(
            r#"{"user_id": "u1", "name": "Loft", "price_by_night": 120, "max_guest": 3, "amenities": ["x"]}"#,
        )
        .unwrap();
        let place = payload.build("c1").unwrap();
        assert_eq!(place.city_id, "c1");
        assert_eq!(place.price_by_night, 120);
        assert_eq!(place.max_guest, 3);
        assert!(place.amenity_ids.is_empty());
    }

    #[test]
    fn amenity_links_are_unique() {
        let mut place = Place::new("c1", "u1", "Loft");
        assert!(place.link_amenity("wifi"));
        assert!(!place.link_amenity("wifi"));
        assert_eq!(place.amenity_ids, vec!["wifi".to_string()]);
        assert!(place.unlink_amenity("wifi"));
        assert!(!place.unlink_amenity("wifi"));
    }

    #[test]
    fn record_exposes_amenities_key() {
        let mut place = Place::new("c1", "u1", "Loft");
        place.link_amenity("wifi");
        let record = place.to_record().unwrap();
        assert_eq!(record["amenities"], serde_json::json!(["wifi"]));
        assert_eq!(record["__class__"], "Place");
    }
}
