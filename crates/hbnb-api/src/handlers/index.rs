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

//! Service status and per-kind statistics.

use super::AppState;
use crate::error::ApiError;
use axum::{extract::State, response::Json};
use hbnb_core::{EntityKind, EntityStore};
use serde_json::{json, Map, Value as JsonValue};

/// `GET /status`
pub async fn status() -> Json<JsonValue> {
    tracing::debug!("Status requested");
    Json(json!({ "status": "OK" }))
}

/// `GET /stats`: number of stored entities per collection.
pub async fn stats(State(app): State<AppState>) -> Result<Json<Map<String, JsonValue>>, ApiError> {
    let mut counts = Map::new();
    for kind in EntityKind::ALL {
        let count = app.store.count(kind).await?;
        counts.insert(kind.collection().to_string(), json!(count));
    }
    Ok(Json(counts))
}
