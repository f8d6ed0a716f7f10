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

//! Server configuration read from `HBNB_*` environment variables.

use axum::http::HeaderValue;
use hbnb_core::HbnbError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_CORS_ORIGIN: &str = "0.0.0.0";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

/// Where entities are persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// Process-local store; contents are lost on exit.
    Memory,
    /// PostgreSQL via a connection pool.
    Postgres { url: String, max_connections: u32 },
}

/// Configuration for the HTTP server.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Interface to bind (`HBNB_API_HOST`).
    pub host: String,
    /// Port to bind (`HBNB_API_PORT`).
    pub port: u16,
    /// Persistence backend (`HBNB_TYPE_STORAGE`, `HBNB_DATABASE_URL`).
    pub storage: StorageBackend,
    /// Allowed CORS origin (`HBNB_CORS_ORIGIN`).
    pub cors_origin: HeaderValue,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            storage: StorageBackend::Memory,
            cors_origin: HeaderValue::from_static(DEFAULT_CORS_ORIGIN),
        }
    }
}

impl ApiConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, HbnbError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name
    /// to its value. Unset or blank variables take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, HbnbError> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(host) = var("HBNB_API_HOST") {
            config.host = host;
        }
        if let Some(port) = var("HBNB_API_PORT") {
            config.port = port.trim().parse().map_err(|e| {
                HbnbError::ConfigError(format!("HBNB_API_PORT '{}' is not a valid port: {}", port, e))
            })?;
        }
        if let Some(origin) = var("HBNB_CORS_ORIGIN") {
            config.cors_origin = HeaderValue::from_str(&origin).map_err(|e| {
                HbnbError::ConfigError(format!("HBNB_CORS_ORIGIN '{}' is invalid: {}", origin, e))
            })?;
        }

        config.storage = match var("HBNB_TYPE_STORAGE").as_deref() {
            None | Some("memory") => StorageBackend::Memory,
            Some("db") => {
                let url = var("HBNB_DATABASE_URL").ok_or_else(|| {
                    HbnbError::ConfigError(
                        "HBNB_DATABASE_URL must be set when HBNB_TYPE_STORAGE=db".to_string(),
                    )
                })?;
                let max_connections = match var("HBNB_DB_MAX_CONNECTIONS") {
                    Some(raw) => raw.trim().parse().map_err(|e| {
                        HbnbError::ConfigError(format!(
                            "HBNB_DB_MAX_CONNECTIONS '{}' is invalid: {}",
                            raw, e
                        ))
                    })?,
                    None => DEFAULT_DB_MAX_CONNECTIONS,
                };
                StorageBackend::Postgres { url, max_connections }
            }
            Some(other) => {
                return Err(HbnbError::ConfigError(format!(
                    "Unknown HBNB_TYPE_STORAGE '{}', expected 'memory' or 'db'",
                    other
                )))
            }
        };

        Ok(config)
    }
}
