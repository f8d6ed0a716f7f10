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

//! Reviews of a Place.

use super::{create, fetch, to_records, AppState};
use crate::error::ApiError;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use hbnb_core::entity::parse_payload;
use hbnb_core::place::Place;
use hbnb_core::review::NewReview;
use hbnb_core::user::User;
use hbnb_core::{EntityStore, Record};

/// `GET /places/{place_id}/reviews`
pub async fn list_reviews(
    State(app): State<AppState>,
    Path(place_id): Path<String>,
) -> Result<Json<Vec<Record>>, ApiError> {
    let place: Place = fetch(app.store.as_ref(), &place_id).await?;
    let reviews = app.store.reviews_of(&place).await?;
    Ok(Json(to_records(&reviews)?))
}

/// `POST /places/{place_id}/reviews`: the author must exist.
pub async fn create_review(
    State(app): State<AppState>,
    Path(place_id): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, Json<Record>), ApiError> {
    let place: Place = fetch(app.store.as_ref(), &place_id).await?;
    let review = parse_payload::<NewReview>("Review", &body)?.build(&place.id)?;
    fetch::<User>(app.store.as_ref(), &review.user_id).await?;
    create(app.store.as_ref(), review).await
}
