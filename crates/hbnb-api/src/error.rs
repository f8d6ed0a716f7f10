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

//! Maps core errors onto HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use hbnb_core::HbnbError;
use serde_json::json;

/// Error returned by every handler.
#[derive(Debug)]
pub struct ApiError(pub HbnbError);

impl ApiError {
    pub fn not_found(what: impl Into<String>) -> Self {
        ApiError(HbnbError::NotFound(what.into()))
    }
}

impl From<HbnbError> for ApiError {
    fn from(err: HbnbError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            HbnbError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            HbnbError::ValidationError { message, .. } => (StatusCode::BAD_REQUEST, message),
            HbnbError::NotFound(what) => {
                tracing::debug!(%what, "Responding 404");
                (StatusCode::NOT_FOUND, "Not found".to_string())
            }
            other => {
                tracing::error!(error = %other, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
