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

//! Route handlers, one module per resource.

pub mod amenities;
pub mod cities;
pub mod index;
pub mod places;
pub mod places_amenities;
pub mod reviews;
pub mod states;
pub mod users;

use crate::error::ApiError;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use hbnb_core::entity::parse_payload;
use hbnb_core::{Entity, EntityStore, EntityStoreExt, HbnbError, Record, Updatable};
use serde_json::{json, Value as JsonValue};
use std::sync::Arc;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EntityStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }
}

/// Loads an entity or fails with 404.
pub(crate) async fn fetch<T: Entity>(store: &dyn EntityStore, id: &str) -> Result<T, ApiError> {
    store
        .get_entity::<T>(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("{} {}", T::KIND, id)))
}

pub(crate) fn to_records<T: Entity>(entities: &[T]) -> Result<Vec<Record>, HbnbError> {
    entities.iter().map(Entity::to_record).collect()
}

/// Persists a freshly built entity and answers 201 with its record.
pub(crate) async fn create<T: Entity>(
    store: &dyn EntityStore,
    entity: T,
) -> Result<(StatusCode, Json<Record>), ApiError> {
    let record = entity.to_record()?;
    tracing::info!(kind = %T::KIND, id = %entity.id(), "Creating entity");
    store.save_entity(entity).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// `GET /<collection>`
pub async fn list_all<T: Entity>(
    State(app): State<AppState>,
) -> Result<Json<Vec<Record>>, ApiError> {
    let entities = app.store.all_entities::<T>().await?;
    Ok(Json(to_records(&entities)?))
}

/// `GET /<collection>/{id}`
pub async fn get_one<T: Entity>(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Record>, ApiError> {
    let entity: T = fetch(app.store.as_ref(), &id).await?;
    Ok(Json(entity.to_record()?))
}

/// `DELETE /<collection>/{id}`; answers `{}`.
pub async fn delete_one<T: Entity>(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<JsonValue>, ApiError> {
    if !app.store.delete_entity::<T>(&id).await? {
        return Err(ApiError::not_found(format!("{} {}", T::KIND, id)));
    }
    tracing::info!(kind = %T::KIND, %id, "Deleted entity");
    Ok(Json(json!({})))
}

/// `PUT /<collection>/{id}`: applies the writable fields of the body.
pub async fn update_one<T: Updatable>(
    State(app): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Record>, ApiError> {
    let mut entity: T = fetch(app.store.as_ref(), &id).await?;
    let update: T::Update = parse_payload(T::KIND.as_str(), &body)?;
    entity.apply_update(update);
    let record = entity.to_record()?;
    app.store.save_entity(entity).await?;
    Ok(Json(record))
}
