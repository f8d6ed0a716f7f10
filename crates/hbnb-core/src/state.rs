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

// crates/hbnb-core/src/state.rs

//! Defines the State entity, which owns many Cities.

use crate::entity::{impl_entity, Updatable};
use crate::errors::HbnbError;
use crate::types::{new_id, EntityId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A geographic state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct State {
    pub id: EntityId,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
    pub name: String,
}

impl_entity!(State);

impl State {
    /// Creates a new State with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: new_id(),
            created_at: now,
            updated_at: now,
            name: name.into(),
        }
    }

    /// Applies a partial update; bumps `updated_at`.
    pub fn apply(&mut self, update: StateUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        self.updated_at = Utc::now();
    }
}

/// Payload accepted when creating a State.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewState {
    pub name: Option<String>,
}

impl NewState {
    pub fn build(self) -> Result<State, HbnbError> {
        let name = self.name.ok_or_else(|| HbnbError::missing("name"))?;
        Ok(State::new(name))
    }
}

/// Writable fields of a State.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StateUpdate {
    pub name: Option<String>,
}

impl Updatable for State {
    type Update = StateUpdate;

    fn apply_update(&mut self, update: StateUpdate) {
        self.apply(update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_requires_name() {
        match NewState::default().build() {
            Err(HbnbError::BadRequest(msg)) => assert_eq!(msg, "Missing name"),
            other => panic!("expected BadRequest, got {:?}", other),
        }
    }

    #[test]
    fn update_ignores_protected_keys() {
        let mut state = State::new("Nevada");
        let original_id = state.id.clone();
        let created_at = state.created_at;
        let update: StateUpdate =
            serde_json::from_str(r#"{"id": "hijack", "created_at": "x", "name": "Utah"}"#).unwrap();

        state.apply(update);

        assert_eq!(state.id, original_id);
        assert_eq!(state.created_at, created_at);
        assert_eq!(state.name, "Utah");
        assert!(state.updated_at >= created_at);
    }
}
