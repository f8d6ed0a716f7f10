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

//! Shared fixtures for tests across the workspace.
//!
//! `seed_scenario` builds a small, fully linked data set:
//!
//! ```text
//! state_1 ── city_1 ── place_1 (wifi, pool)
//!                  └── place_2 (pool)
//! state_2 ── city_2 ── place_3
//! ```

use crate::amenity::Amenity;
use crate::city::City;
use crate::errors::HbnbError;
use crate::place::Place;
use crate::review::Review;
use crate::state::State;
use crate::store::{EntityStore, EntityStoreExt};
use crate::types::EntityId;
use crate::user::User;

/// Ids of everything created by [`seed_scenario`].
#[derive(Debug, Clone)]
pub struct Scenario {
    pub user: EntityId,
    pub state_1: EntityId,
    pub state_2: EntityId,
    pub city_1: EntityId,
    pub city_2: EntityId,
    pub place_1: EntityId,
    pub place_2: EntityId,
    pub place_3: EntityId,
    pub wifi: EntityId,
    pub pool: EntityId,
    pub review: EntityId,
}

/// Populates `store` with the scenario above, in creation order.
pub async fn seed_scenario(store: &dyn EntityStore) -> Result<Scenario, HbnbError> {
    let user = User::new("host@example.com", "hunter2");
    let state_1 = State::new("California");
    let state_2 = State::new("Nevada");
    let city_1 = City::new(&state_1.id, "San Francisco");
    let city_2 = City::new(&state_2.id, "Reno");
    let wifi = Amenity::new("Wifi");
    let pool = Amenity::new("Pool");

    let mut place_1 = Place::new(&city_1.id, &user.id, "Sunny loft");
    place_1.link_amenity(&wifi.id);
    place_1.link_amenity(&pool.id);
    let mut place_2 = Place::new(&city_1.id, &user.id, "Garden flat");
    place_2.link_amenity(&pool.id);
    let place_3 = Place::new(&city_2.id, &user.id, "Desert cabin");
    let review = Review::new(&place_1.id, &user.id, "Lovely light");

    let scenario = Scenario {
        user: user.id.clone(),
        state_1: state_1.id.clone(),
        state_2: state_2.id.clone(),
        city_1: city_1.id.clone(),
        city_2: city_2.id.clone(),
        place_1: place_1.id.clone(),
        place_2: place_2.id.clone(),
        place_3: place_3.id.clone(),
        wifi: wifi.id.clone(),
        pool: pool.id.clone(),
        review: review.id.clone(),
    };

    store.save_entity(user).await?;
    store.save_entity(state_1).await?;
    store.save_entity(state_2).await?;
    store.save_entity(city_1).await?;
    store.save_entity(city_2).await?;
    store.save_entity(wifi).await?;
    store.save_entity(pool).await?;
    store.save_entity(place_1).await?;
    store.save_entity(place_2).await?;
    store.save_entity(place_3).await?;
    store.save_entity(review).await?;

    Ok(scenario)
}
