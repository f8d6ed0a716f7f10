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

//! Cities, addressed on their own or through their State.

use super::{create, fetch, to_records, AppState};
use crate::error::ApiError;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use hbnb_core::city::NewCity;
use hbnb_core::entity::parse_payload;
use hbnb_core::state::State as StateModel;
use hbnb_core::{EntityStore, Record};

/// `GET /states/{state_id}/cities`
pub async fn list_cities(
    State(app): State<AppState>,
    Path(state_id): Path<String>,
) -> Result<Json<Vec<Record>>, ApiError> {
    let state: StateModel = fetch(app.store.as_ref(), &state_id).await?;
    let cities = app.store.cities_of(&state).await?;
    Ok(Json(to_records(&cities)?))
}

/// `POST /states/{state_id}/cities`
pub async fn create_city(
    State(app): State<AppState>,
    Path(state_id): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, Json<Record>), ApiError> {
    let state: StateModel = fetch(app.store.as_ref(), &state_id).await?;
    let city = parse_payload::<NewCity>("City", &body)?.build(&state.id)?;
    create(app.store.as_ref(), city).await
}
