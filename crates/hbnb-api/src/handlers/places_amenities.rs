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

//! Links between Places and Amenities.

use super::{fetch, to_records, AppState};
use crate::error::ApiError;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use hbnb_core::amenity::Amenity;
use hbnb_core::entity::Entity;
use hbnb_core::place::Place;
use hbnb_core::{EntityStore, EntityStoreExt, Record};
use serde_json::{json, Value as JsonValue};

/// `GET /places/{place_id}/amenities`
pub async fn list_place_amenities(
    State(app): State<AppState>,
    Path(place_id): Path<String>,
) -> Result<Json<Vec<Record>>, ApiError> {
    let place: Place = fetch(app.store.as_ref(), &place_id).await?;
    let amenities = app.store.amenities_of(&place).await?;
    Ok(Json(to_records(&amenities)?))
}

/// `POST /places/{place_id}/amenities/{amenity_id}`
///
/// 201 when the link is new, 200 when it already existed.
pub async fn link_amenity(
    State(app): State<AppState>,
    Path((place_id, amenity_id)): Path<(String, String)>,
) -> Result<(StatusCode, Json<Record>), ApiError> {
    let mut place: Place = fetch(app.store.as_ref(), &place_id).await?;
    let amenity: Amenity = fetch(app.store.as_ref(), &amenity_id).await?;

    let status = if place.link_amenity(&amenity.id) {
        app.store.save_entity(place).await?;
        tracing::info!(%place_id, %amenity_id, "Linked amenity");
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(amenity.to_record()?)))
}

/// `DELETE /places/{place_id}/amenities/{amenity_id}`
pub async fn unlink_amenity(
    State(app): State<AppState>,
    Path((place_id, amenity_id)): Path<(String, String)>,
) -> Result<Json<JsonValue>, ApiError> {
    let mut place: Place = fetch(app.store.as_ref(), &place_id).await?;
    fetch::<Amenity>(app.store.as_ref(), &amenity_id).await?;

    if !place.unlink_amenity(&amenity_id) {
        return Err(ApiError::not_found(format!(
            "Amenity {} on Place {}",
            amenity_id, place_id
        )));
    }
    app.store.save_entity(place).await?;
    tracing::info!(%place_id, %amenity_id, "Unlinked amenity");
    Ok(Json(json!({})))
}
