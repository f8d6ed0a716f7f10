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

//! Defines the User entity.

use crate::entity::{impl_entity, Updatable};
use crate::errors::HbnbError;
use crate::types::{new_id, EntityId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: EntityId,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
    pub email: String,
    /// SHA-256 hex digest of the password; never exposed in records.
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl_entity!(User, hidden = ["password"]);

/// Hashes a plain-text password to lowercase hex.
pub fn hash_password(plain: &str) -> String {
    Sha256::digest(plain.as_bytes())
        .iter()
        .map(|byte| format!("{:02x}", byte))
        .collect()
}

impl User {
    pub fn new(email: impl Into<String>, password: &str) -> Self {
        let now = Utc::now();
        Self {
            id: new_id(),
            created_at: now,
            updated_at: now,
            email: email.into(),
            password: hash_password(password),
            first_name: String::new(),
            last_name: String::new(),
        }
    }

    pub fn check_password(&self, plain: &str) -> bool {
        self.password == hash_password(plain)
    }

    /// Applies a partial update. `email` is not writable.
    pub fn apply(&mut self, update: UserUpdate) {
        if let Some(password) = update.password {
            self.password = hash_password(&password);
        }
        if let Some(first_name) = update.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            self.last_name = last_name;
        }
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewUser {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl NewUser {
    pub fn build(self) -> Result<User, HbnbError> {
        let email = self.email.ok_or_else(|| HbnbError::missing("email"))?;
        let password = self.password.ok_or_else(|| HbnbError::missing("password"))?;
        let mut user = User::new(email, &password);
        user.first_name = self.first_name.unwrap_or_default();
        user.last_name = self.last_name.unwrap_or_default();
        Ok(user)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdate {
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl Updatable for User {
    type Update = UserUpdate;

    fn apply_update(&mut self, update: UserUpdate) {
        self.apply(update)
    }
}
