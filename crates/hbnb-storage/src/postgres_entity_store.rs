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

//! Postgres-based implementation of the `EntityStore` trait using SQLx and PgPool.
//!
//! Every entity lives in one `entities` table as a JSONB document keyed by
//! `(kind, id)`. Relationship accessors filter on the foreign-key members of
//! the document instead of loading whole collections.

use async_trait::async_trait;
use hbnb_core::city::City;
use hbnb_core::entity::{AnyEntity, Entity};
use hbnb_core::errors::HbnbError;
use hbnb_core::place::Place;
use hbnb_core::review::Review;
use hbnb_core::state::State;
use hbnb_core::store::EntityStore;
use hbnb_core::types::EntityKind;
use serde_json::Value as JsonValue;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;

fn db_error(op: &str, e: sqlx::Error) -> HbnbError {
    HbnbError::StorageError(format!("DB {} error: {}", op, e))
}

/// Decodes a `(data)` row into an entity of `kind`.
fn decode_row(kind: EntityKind, row: &PgRow) -> Result<AnyEntity, HbnbError> {
    let value: JsonValue = row
        .try_get("data")
        .map_err(|e| HbnbError::StorageError(format!("DB row get error: {}", e)))?;
    AnyEntity::from_json(kind, value)
}

/// A child-to-parent foreign key stored inside the child's document.
///
/// Each link carries its own literal SQL so the lookup matches the partial
/// expression index created for it in `migrate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParentLink {
    StateOfCity,
    CityOfPlace,
    PlaceOfReview,
}

impl ParentLink {
    fn index_sql(self) -> &'static str {
        match self {
            ParentLink::StateOfCity => {
                "CREATE INDEX IF NOT EXISTS entities_state_id_idx ON entities ((data->>'state_id')) WHERE kind = 'City'"
            }
            ParentLink::CityOfPlace => {
                "CREATE INDEX IF NOT EXISTS entities_city_id_idx ON entities ((data->>'city_id')) WHERE kind = 'Place'"
            }
            ParentLink::PlaceOfReview => {
                "CREATE INDEX IF NOT EXISTS entities_place_id_idx ON entities ((data->>'place_id')) WHERE kind = 'Review'"
            }
        }
    }

    fn select_sql(self) -> &'static str {
        match self {
            ParentLink::StateOfCity => {
                "SELECT data FROM entities WHERE kind = 'City' AND data->>'state_id' = $1 ORDER BY seq"
            }
            ParentLink::CityOfPlace => {
                "SELECT data FROM entities WHERE kind = 'Place' AND data->>'city_id' = $1 ORDER BY seq"
            }
            ParentLink::PlaceOfReview => {
                "SELECT data FROM entities WHERE kind = 'Review' AND data->>'place_id' = $1 ORDER BY seq"
            }
        }
    }
}

/// Postgres-backed EntityStore.
#[derive(Clone, Debug)]
pub struct PostgresEntityStore {
    /// Connection pool to Postgres.
    pool: PgPool,
}

impl PostgresEntityStore {
    /// Creates a new PostgresEntityStore with the given PgPool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a pool against `database_url` and ensures the schema exists.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, HbnbError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| db_error("connect", e))?;
        let store = Self::new(pool);
        store.migrate().await?;
        Ok(store)
    }

    /// Creates the `entities` table and its foreign-key indexes if missing.
    pub async fn migrate(&self) -> Result<(), HbnbError> {
        let statements = [
            r#"
            CREATE TABLE IF NOT EXISTS entities (
                seq BIGSERIAL NOT NULL,
                kind TEXT NOT NULL,
                id TEXT NOT NULL,
                data JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL,
                PRIMARY KEY (kind, id)
            )
            "#,
            ParentLink::StateOfCity.index_sql(),
            ParentLink::CityOfPlace.index_sql(),
            ParentLink::PlaceOfReview.index_sql(),
        ];
        for statement in statements {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| db_error("migrate", e))?;
        }
        tracing::debug!("entities schema ready");
        Ok(())
    }

    /// Lists the `T` entities whose `link` member equals `parent_id`.
    async fn children<T: Entity>(&self, link: ParentLink, parent_id: &str) -> Result<Vec<T>, HbnbError> {
        let rows = sqlx::query(link.select_sql())
            .bind(parent_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("children", e))?;

        let mut children = Vec::with_capacity(rows.len());
        for row in &rows {
            children.extend(T::from_any(decode_row(T::KIND, row)?));
        }
        Ok(children)
    }
}

#[async_trait]
impl EntityStore for PostgresEntityStore {
    async fn get(&self, kind: EntityKind, id: &str) -> Result<Option<AnyEntity>, HbnbError> {
        let row_opt = sqlx::query("SELECT data FROM entities WHERE kind = $1 AND id = $2")
            .bind(kind.as_str())
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("get", e))?;
        row_opt.map(|row| decode_row(kind, &row)).transpose()
    }

    async fn all(&self, kind: EntityKind) -> Result<Vec<AnyEntity>, HbnbError> {
        let rows = sqlx::query("SELECT data FROM entities WHERE kind = $1 ORDER BY seq")
            .bind(kind.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("all", e))?;
        rows.iter().map(|row| decode_row(kind, row)).collect()
    }

    async fn count(&self, kind: EntityKind) -> Result<u64, HbnbError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM entities WHERE kind = $1")
            .bind(kind.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("count", e))?;
        Ok(count.max(0) as u64)
    }

    async fn save(&self, entity: AnyEntity) -> Result<(), HbnbError> {
        sqlx::query(
            r#"INSERT INTO entities (kind, id, data, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5) ON CONFLICT (kind, id)
            DO UPDATE SET data = $3, updated_at = $5"#,
        )
        .bind(entity.kind().as_str())
        .bind(entity.id())
        .bind(entity.to_json()?)
        .bind(entity.created_at())
        .bind(entity.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("save", e))?;
        Ok(())
    }

    async fn delete(&self, kind: EntityKind, id: &str) -> Result<bool, HbnbError> {
        let result = sqlx::query("DELETE FROM entities WHERE kind = $1 AND id = $2")
            .bind(kind.as_str())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("delete", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn cities_of(&self, state: &State) -> Result<Vec<City>, HbnbError> {
        self.children(ParentLink::StateOfCity, &state.id).await
    }

    async fn places_of(&self, city: &City) -> Result<Vec<Place>, HbnbError> {
        self.children(ParentLink::CityOfPlace, &city.id).await
    }

    async fn reviews_of(&self, place: &Place) -> Result<Vec<Review>, HbnbError> {
        self.children(ParentLink::PlaceOfReview, &place.id).await
    }
}
