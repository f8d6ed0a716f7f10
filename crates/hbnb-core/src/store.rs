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

// crates/hbnb-core/src/store.rs

//! Defines the entity store abstraction consumed by the search engine and the API.

pub mod in_memory_store;

use crate::amenity::Amenity;
use crate::city::City;
use crate::entity::{AnyEntity, Entity};
use crate::errors::HbnbError;
use crate::place::Place;
use crate::review::Review;
use crate::state::State;
use crate::types::EntityKind;
use async_trait::async_trait;

pub use in_memory_store::InMemoryEntityStore;

/// Generic persistence for all entity kinds.
///
/// Writes commit immediately. Deletes never cascade; readers must tolerate
/// references to entities that no longer exist.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Looks up one entity by kind and id.
    async fn get(&self, kind: EntityKind, id: &str) -> Result<Option<AnyEntity>, HbnbError>;

    /// Lists every entity of `kind`, oldest first.
    async fn all(&self, kind: EntityKind) -> Result<Vec<AnyEntity>, HbnbError>;

    async fn count(&self, kind: EntityKind) -> Result<u64, HbnbError> {
        Ok(self.all(kind).await?.len() as u64)
    }

    /// Inserts or replaces an entity.
    async fn save(&self, entity: AnyEntity) -> Result<(), HbnbError>;

    /// Removes an entity. Returns `true` if it existed.
    async fn delete(&self, kind: EntityKind, id: &str) -> Result<bool, HbnbError>;

    /// Cities belonging to `state`.
    async fn cities_of(&self, state: &State) -> Result<Vec<City>, HbnbError> {
        Ok(self
            .all(EntityKind::City)
            .await?
            .into_iter()
            .filter_map(City::from_any)
            .filter(|city| city.state_id == state.id)
            .collect())
    }

    /// Places listed in `city`.
    async fn places_of(&self, city: &City) -> Result<Vec<Place>, HbnbError> {
        Ok(self
            .all(EntityKind::Place)
            .await?
            .into_iter()
            .filter_map(Place::from_any)
            .filter(|place| place.city_id == city.id)
            .collect())
    }

    /// Reviews written about `place`.
    async fn reviews_of(&self, place: &Place) -> Result<Vec<Review>, HbnbError> {
        Ok(self
            .all(EntityKind::Review)
            .await?
            .into_iter()
            .filter_map(Review::from_any)
            .filter(|review| review.place_id == place.id)
            .collect())
    }

    /// Amenities linked to `place`, in link order. Dangling links are skipped.
    async fn amenities_of(&self, place: &Place) -> Result<Vec<Amenity>, HbnbError> {
        let mut amenities = Vec::with_capacity(place.amenity_ids.len());
        for amenity_id in &place.amenity_ids {
            match self.get(EntityKind::Amenity, amenity_id).await? {
                Some(any) => amenities.extend(Amenity::from_any(any)),
                None => {
                    tracing::debug!(place_id = %place.id, %amenity_id, "Skipping dangling amenity link")
                }
            }
        }
        Ok(amenities)
    }
}

/// Typed convenience layer over [`EntityStore`].
#[async_trait]
pub trait EntityStoreExt: EntityStore {
    async fn get_entity<T: Entity>(&self, id: &str) -> Result<Option<T>, HbnbError> {
        Ok(self.get(T::KIND, id).await?.and_then(T::from_any))
    }

    async fn all_entities<T: Entity>(&self) -> Result<Vec<T>, HbnbError> {
        Ok(self
            .all(T::KIND)
            .await?
            .into_iter()
            .filter_map(T::from_any)
            .collect())
    }

    async fn count_entities<T: Entity>(&self) -> Result<u64, HbnbError> {
        self.count(T::KIND).await
    }

    async fn save_entity<T: Entity>(&self, entity: T) -> Result<(), HbnbError> {
        self.save(entity.into_any()).await
    }

    async fn delete_entity<T: Entity>(&self, id: &str) -> Result<bool, HbnbError> {
        self.delete(T::KIND, id).await
    }
}

impl<S: EntityStore + ?Sized> EntityStoreExt for S {}
