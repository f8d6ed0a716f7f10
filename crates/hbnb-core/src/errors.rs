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

//! Defines common error types for the HBnB core library.

use thiserror::Error;

/// The primary error type for HBnB operations.
#[derive(Error, Debug)]
pub enum HbnbError {
    /// The request body was missing or could not be read as structured data.
    #[error("Bad Request: {0}")]
    BadRequest(String),

    /// Error indicating a requested resource was not found.
    #[error("Resource Not Found: {0}")]
    NotFound(String),

    /// Error indicating a failure during data validation.
    #[error("Validation Error ({context}): {message}")]
    ValidationError {
        /// Context or field where validation failed.
        context: String,
        /// Specific validation failure message.
        message: String,
    },

    /// Error related to configuration loading or validation.
    #[error("Configuration Error: {0}")]
    ConfigError(String),

    /// Error reported by the persistence backend.
    #[error("Storage Error: {0}")]
    StorageError(String),

    /// Error during file or network I/O operations.
    #[error("IO Error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error during serialization or deserialization (e.g., JSON parsing).
    #[error("Serialization/Deserialization Error: {0}")]
    SerdeError(#[from] serde_json::Error),

    /// Represents an unexpected internal error.
    #[error("Internal Error: {0}")]
    InternalError(String),
}

impl HbnbError {
    /// Builds a `ValidationError` from a context and message.
    pub fn validation_error(context: &str, message: &str) -> Self {
        HbnbError::ValidationError {
            context: context.to_string(),
            message: message.to_string(),
        }
    }

    /// Shorthand for the "body is not a JSON object" condition.
    pub fn not_a_json() -> Self {
        HbnbError::BadRequest("Not a JSON".to_string())
    }

    /// Shorthand for a required field absent from a create payload.
    pub fn missing(field: &str) -> Self {
        HbnbError::BadRequest(format!("Missing {}", field))
    }
}
