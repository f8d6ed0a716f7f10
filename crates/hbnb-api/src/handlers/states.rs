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

use super::{create, AppState};
use crate::error::ApiError;
use axum::{body::Bytes, extract::State, http::StatusCode, response::Json};
use hbnb_core::entity::parse_payload;
use hbnb_core::state::NewState;
use hbnb_core::Record;

/// `POST /states`
pub async fn create_state(
    State(app): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Record>), ApiError> {
    let state = parse_payload::<NewState>("State", &body)?.build()?;
    create(app.store.as_ref(), state).await
}
