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

//! Places within a City, and the advanced place search.

use super::{create, fetch, to_records, AppState};
use crate::error::ApiError;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use hbnb_core::city::City;
use hbnb_core::entity::parse_payload;
use hbnb_core::place::NewPlace;
use hbnb_core::user::User;
use hbnb_core::{search_places, EntityStore, Record, SearchRequest};

/// `GET /cities/{city_id}/places`
pub async fn list_places(
    State(app): State<AppState>,
    Path(city_id): Path<String>,
) -> Result<Json<Vec<Record>>, ApiError> {
    let city: City = fetch(app.store.as_ref(), &city_id).await?;
    let places = app.store.places_of(&city).await?;
    Ok(Json(to_records(&places)?))
}

/// `POST /cities/{city_id}/places`: the owner must exist.
pub async fn create_place(
    State(app): State<AppState>,
    Path(city_id): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, Json<Record>), ApiError> {
    let city: City = fetch(app.store.as_ref(), &city_id).await?;
    let place = parse_payload::<NewPlace>("Place", &body)?.build(&city.id)?;
    fetch::<User>(app.store.as_ref(), &place.user_id).await?;
    create(app.store.as_ref(), place).await
}

/// `POST /places_search`
///
/// Body: `{"states": [...], "cities": [...], "amenities": [...]}`, every key
/// optional. An empty object returns every Place.
pub async fn search(
    State(app): State<AppState>,
    body: Bytes,
) -> Result<Json<Vec<Record>>, ApiError> {
    let request = SearchRequest::from_json(&body)?;
    let places = search_places(app.store.as_ref(), &request).await?;
    Ok(Json(places))
}
