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

//! Defines the Review entity: written by one User about one Place.

use crate::entity::{impl_entity, Updatable};
use crate::errors::HbnbError;
use crate::types::{new_id, EntityId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub id: EntityId,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
    pub place_id: EntityId,
    pub user_id: EntityId,
    pub text: String,
}

impl_entity!(Review);

impl Review {
    pub fn new(
        place_id: impl Into<EntityId>,
        user_id: impl Into<EntityId>,
        text: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: new_id(),
            created_at: now,
            updated_at: now,
            place_id: place_id.into(),
            user_id: user_id.into(),
            text: text.into(),
        }
    }

    pub fn apply(&mut self, update: ReviewUpdate) {
        if let Some(text) = update.text {
            self.text = text;
        }
        self.updated_at = Utc::now();
    }
}

/// Payload accepted when creating a Review; the Place comes from the route.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewReview {
    pub user_id: Option<EntityId>,
    pub text: Option<String>,
}

impl NewReview {
    pub fn build(self, place_id: &str) -> Result<Review, HbnbError> {
        let user_id = self.user_id.ok_or_else(|| HbnbError::missing("user_id"))?;
        let text = self.text.ok_or_else(|| HbnbError::missing("text"))?;
        Ok(Review::new(place_id, user_id, text))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewUpdate {
    pub text: Option<String>,
}

impl Updatable for Review {
    type Update = ReviewUpdate;

    fn apply_update(&mut self, update: ReviewUpdate) {
        self.apply(update)
    }
}
