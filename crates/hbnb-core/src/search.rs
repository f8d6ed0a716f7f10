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

//! Place search: resolves State/City/Amenity filters into a de-duplicated
//! list of Place records.
//!
//! The pipeline is Resolve → Combine → Project:
//! - State and City filters are resolved through the store's relationship
//!   accessors and unioned, first-seen order, each Place at most once.
//! - The Amenity filter narrows: a Place survives only if it offers *every*
//!   resolved Amenity. With no State/City candidates it narrows all Places.
//! - Records are projected without their `amenities` key.
//!
//! Ids that do not resolve are skipped, never reported as errors.

use crate::amenity::Amenity;
use crate::city::City;
use crate::entity::{json_object, Entity};
use crate::errors::HbnbError;
use crate::place::Place;
use crate::state::State;
use crate::store::{EntityStore, EntityStoreExt};
use crate::types::{EntityId, Record};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::collections::HashSet;

/// Key stripped from every search result.
const AMENITIES_FIELD: &str = "amenities";

/// Optional filters accepted by the search. Absent and empty lists are the same.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub states: Option<Vec<EntityId>>,
    #[serde(default)]
    pub cities: Option<Vec<EntityId>>,
    #[serde(default)]
    pub amenities: Option<Vec<EntityId>>,
}

impl SearchRequest {
    /// Parses a request body. Anything that is not a JSON object with
    /// list-of-string filters is a `BadRequest`.
    pub fn from_json(body: &[u8]) -> Result<Self, HbnbError> {
        let map = json_object(body)?;
        serde_json::from_value(JsonValue::Object(map)).map_err(|e| {
            tracing::debug!(error = %e, "Rejecting malformed search filters");
            HbnbError::not_a_json()
        })
    }

    pub fn state_ids(&self) -> &[EntityId] {
        self.states.as_deref().unwrap_or_default()
    }

    pub fn city_ids(&self) -> &[EntityId] {
        self.cities.as_deref().unwrap_or_default()
    }

    pub fn amenity_ids(&self) -> &[EntityId] {
        self.amenities.as_deref().unwrap_or_default()
    }

    /// True when no filter list has any entry.
    pub fn is_unfiltered(&self) -> bool {
        self.state_ids().is_empty() && self.city_ids().is_empty() && self.amenity_ids().is_empty()
    }
}

/// Ordered set of Places, keyed by id.
#[derive(Debug, Default)]
struct CandidateSet {
    seen: HashSet<EntityId>,
    places: Vec<Place>,
}

impl CandidateSet {
    fn insert(&mut self, place: Place) {
        if self.seen.insert(place.id.clone()) {
            self.places.push(place);
        }
    }

    fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    fn into_places(self) -> Vec<Place> {
        self.places
    }
}

/// The search engine, bound to the store it reads from. It never writes.
pub struct PlaceSearch<'a> {
    store: &'a dyn EntityStore,
}

impl<'a> PlaceSearch<'a> {
    pub fn new(store: &'a dyn EntityStore) -> Self {
        Self { store }
    }

    /// Runs the full pipeline and returns the projected records.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn run(&self, request: &SearchRequest) -> Result<Vec<Record>, HbnbError> {
        let places = self.matching_places(request).await?;
        tracing::debug!(matched = places.len(), "Place search complete");
        project(&places)
    }

    /// Resolve and combine, without projection.
    pub async fn matching_places(&self, request: &SearchRequest) -> Result<Vec<Place>, HbnbError> {
        if request.is_unfiltered() {
            return self.store.all_entities::<Place>().await;
        }

        let mut candidates = CandidateSet::default();
        self.collect_from_states(request.state_ids(), &mut candidates)
            .await?;
        self.collect_from_cities(request.city_ids(), &mut candidates)
            .await?;

        if request.amenity_ids().is_empty() {
            return Ok(candidates.into_places());
        }

        let required = self.resolve_amenities(request.amenity_ids()).await?;
        if required.is_empty() {
            tracing::debug!("No requested amenity exists; nothing can match");
            return Ok(Vec::new());
        }
        let pool = if candidates.is_empty() {
            self.store.all_entities::<Place>().await?
        } else {
            candidates.into_places()
        };
        Ok(narrow_by_amenities(pool, &required))
    }

    async fn collect_from_states(
        &self,
        state_ids: &[EntityId],
        candidates: &mut CandidateSet,
    ) -> Result<(), HbnbError> {
        for state_id in state_ids {
            let Some(state) = self.store.get_entity::<State>(state_id).await? else {
                tracing::debug!(%state_id, "Search skipping unknown state");
                continue;
            };
            for city in self.store.cities_of(&state).await? {
                for place in self.store.places_of(&city).await? {
                    candidates.insert(place);
                }
            }
        }
        Ok(())
    }

    async fn collect_from_cities(
        &self,
        city_ids: &[EntityId],
        candidates: &mut CandidateSet,
    ) -> Result<(), HbnbError> {
        for city_id in city_ids {
            let Some(city) = self.store.get_entity::<City>(city_id).await? else {
                tracing::debug!(%city_id, "Search skipping unknown city");
                continue;
            };
            for place in self.store.places_of(&city).await? {
                candidates.insert(place);
            }
        }
        Ok(())
    }

    async fn resolve_amenities(&self, amenity_ids: &[EntityId]) -> Result<Vec<Amenity>, HbnbError> {
        let mut amenities = Vec::with_capacity(amenity_ids.len());
        for amenity_id in amenity_ids {
            match self.store.get_entity::<Amenity>(amenity_id).await? {
                Some(amenity) => amenities.push(amenity),
                None => tracing::debug!(%amenity_id, "Search skipping unknown amenity"),
            }
        }
        Ok(amenities)
    }
}

/// Keeps the Places that offer every amenity in `required`, preserving order.
fn narrow_by_amenities(pool: Vec<Place>, required: &[Amenity]) -> Vec<Place> {
    pool.into_iter()
        .filter(|place| {
            let offered: HashSet<&str> = place.amenity_ids.iter().map(String::as_str).collect();
            required
                .iter()
                .all(|amenity| offered.contains(amenity.id.as_str()))
        })
        .collect()
}

/// Projects Places into records with the `amenities` relationship removed.
pub fn project(places: &[Place]) -> Result<Vec<Record>, HbnbError> {
    places
        .iter()
        .map(|place| {
            let mut record = place.to_record()?;
            record.remove(AMENITIES_FIELD);
            Ok(record)
        })
        .collect()
}

/// Convenience wrapper: `PlaceSearch::new(store).run(request)`.
pub async fn search_places(
    store: &dyn EntityStore,
    request: &SearchRequest,
) -> Result<Vec<Record>, HbnbError> {
    PlaceSearch::new(store).run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryEntityStore;
    use crate::test_utils::{seed_scenario, Scenario};

    fn ids(places: &[Place]) -> Vec<&str> {
        places.iter().map(|p| p.id.as_str()).collect()
    }

    fn request(states: &[&str], cities: &[&str], amenities: &[&str]) -> SearchRequest {
        let list = |v: &[&str]| -> Option<Vec<EntityId>> { Some(v.iter().map(|s| s.to_string()).collect()) };
        SearchRequest {
            states: list(states),
            cities: list(cities),
            amenities: list(amenities),
        }
    }

    async fn scenario() -> (InMemoryEntityStore, Scenario) {
        let store = InMemoryEntityStore::new();
        let scenario = seed_scenario(&store).await.unwrap();
        (store, scenario)
    }

    #[test]
    fn from_json_accepts_partial_and_null_filters() {
        let req = SearchRequest::from_json(br#"{"states": ["s1"], "cities": null}"#).unwrap();
        assert_eq!(req.state_ids(), ["s1".to_string()]);
        assert!(req.city_ids().is_empty());
        assert!(req.amenity_ids().is_empty());
        assert!(SearchRequest::from_json(b"{}").unwrap().is_unfiltered());
    }

    #[test]
    fn from_json_rejects_bad_bodies() {
        let bodies: [&[u8]; 4] = [b"", b"{oops", b"[]", br#"{"states": "s1"}"#];
        for body in bodies {
            assert!(matches!(
                SearchRequest::from_json(body),
                Err(HbnbError::BadRequest(_))
            ));
        }
    }

    #[tokio::test]
    async fn states_filter_returns_places_of_state() {
        let (store, s) = scenario().await;
        let found = PlaceSearch::new(&store)
            .matching_places(&request(&[s.state_1.as_str()], &[], &[]))
            .await
            .unwrap();
        assert_eq!(ids(&found), vec![s.place_1.as_str(), s.place_2.as_str()]);
    }

    #[tokio::test]
    async fn cities_filter_returns_places_of_city() {
        let (store, s) = scenario().await;
        let found = PlaceSearch::new(&store)
            .matching_places(&request(&[], &[s.city_2.as_str()], &[]))
            .await
            .unwrap();
        assert_eq!(ids(&found), vec![s.place_3.as_str()]);
    }

    #[tokio::test]
    async fn states_and_cities_are_unioned_once() {
        let (store, s) = scenario().await;
        let found = PlaceSearch::new(&store)
            .matching_places(&request(&[s.state_1.as_str()], &[s.city_1.as_str(), s.city_2.as_str()], &[]))
            .await
            .unwrap();
        assert_eq!(
            ids(&found),
            vec![s.place_1.as_str(), s.place_2.as_str(), s.place_3.as_str()]
        );
    }

    #[tokio::test]
    async fn amenities_alone_narrow_all_places() {
        let (store, s) = scenario().await;
        let found = PlaceSearch::new(&store)
            .matching_places(&request(&[], &[], &[s.wifi.as_str()]))
            .await
            .unwrap();
        assert_eq!(ids(&found), vec![s.place_1.as_str()]);
    }

    #[tokio::test]
    async fn amenities_require_every_requested_amenity() {
        let (store, s) = scenario().await;
        // place_1 has wifi + pool, place_2 has only pool.
        let found = PlaceSearch::new(&store)
            .matching_places(&request(&[s.state_1.as_str()], &[], &[s.wifi.as_str(), s.pool.as_str()]))
            .await
            .unwrap();
        assert_eq!(ids(&found), vec![s.place_1.as_str()]);

        let pool_only = PlaceSearch::new(&store)
            .matching_places(&request(&[s.state_1.as_str()], &[], &[s.pool.as_str()]))
            .await
            .unwrap();
        assert_eq!(ids(&pool_only), vec![s.place_1.as_str(), s.place_2.as_str()]);
    }

    #[tokio::test]
    async fn unknown_ids_contribute_nothing() {
        let (store, s) = scenario().await;
        let search = PlaceSearch::new(&store);

        let found = search
            .matching_places(&request(&["nope"], &["nada", s.city_2.as_str()], &[]))
            .await
            .unwrap();
        assert_eq!(ids(&found), vec![s.place_3.as_str()]);

        let nothing = search
            .matching_places(&request(&["nope"], &[], &[]))
            .await
            .unwrap();
        assert!(nothing.is_empty());
    }

    #[tokio::test]
    async fn unknown_amenity_adds_no_constraint() {
        let (store, s) = scenario().await;
        let found = PlaceSearch::new(&store)
            .matching_places(&request(&[], &[s.city_1.as_str()], &[s.wifi.as_str(), "gone"]))
            .await
            .unwrap();
        assert_eq!(ids(&found), vec![s.place_1.as_str()]);
    }

    #[tokio::test]
    async fn only_unknown_amenities_match_nothing() {
        let (store, s) = scenario().await;
        let search = PlaceSearch::new(&store);

        let found = search
            .matching_places(&request(&[], &[], &["no-such-amenity"]))
            .await
            .unwrap();
        assert!(found.is_empty());

        let scoped = search
            .matching_places(&request(&[s.state_1.as_str()], &[], &["gone", "missing"]))
            .await
            .unwrap();
        assert!(scoped.is_empty());
    }

    #[tokio::test]
    async fn empty_request_returns_everything() {
        let (store, s) = scenario().await;
        let records = search_places(&store, &SearchRequest::default()).await.unwrap();
        let found: Vec<&str> = records.iter().map(|r| r["id"].as_str().unwrap()).collect();
        assert_eq!(
            found,
            vec![s.place_1.as_str(), s.place_2.as_str(), s.place_3.as_str()]
        );

        let empty_lists = search_places(&store, &request(&[], &[], &[])).await.unwrap();
        assert_eq!(empty_lists, records);
    }

    #[tokio::test]
    async fn records_never_carry_amenities() {
        let (store, s) = scenario().await;
        let records = search_places(&store, &request(&[], &[], &[s.wifi.as_str()]))
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
        assert!(!records[0].contains_key("amenities"));
        assert_eq!(records[0]["__class__"], "Place");
        assert_eq!(records[0]["name"], "Sunny loft");
    }
}
