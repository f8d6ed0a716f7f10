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

//! The `Entity` trait shared by every persisted type, and its type-erased form.

use crate::amenity::Amenity;
use crate::city::City;
use crate::errors::HbnbError;
use crate::place::Place;
use crate::review::Review;
use crate::state::State;
use crate::types::{EntityKind, Record};
use crate::user::User;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

/// Behaviour common to all persisted entities.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// The kind tag used by stores and records.
    const KIND: EntityKind;

    /// Stored fields that must never appear in an outgoing record.
    const HIDDEN_FIELDS: &'static [&'static str] = &[];

    fn id(&self) -> &str;

    fn created_at(&self) -> DateTime<Utc>;

    fn updated_at(&self) -> DateTime<Utc>;

    /// Marks the entity as modified now.
    fn touch(&mut self);

    fn into_any(self) -> AnyEntity;

    /// Recovers the concrete entity, or `None` when `any` holds another kind.
    fn from_any(any: AnyEntity) -> Option<Self>;

    /// Projects the entity into a plain record with a `__class__` tag.
    fn to_record(&self) -> Result<Record, HbnbError> {
        let mut record = match serde_json::to_value(self)? {
            JsonValue::Object(map) => map,
            other => {
                return Err(HbnbError::InternalError(format!(
                    "{} serialized to a non-object value: {}",
                    Self::KIND,
                    other
                )))
            }
        };
        for field in Self::HIDDEN_FIELDS {
            record.remove(*field);
        }
        record.insert(
            "__class__".to_string(),
            JsonValue::String(Self::KIND.as_str().to_string()),
        );
        Ok(record)
    }
}

/// Entities that accept a typed partial update.
pub trait Updatable: Entity {
    /// The writable subset of fields, each optional.
    type Update: DeserializeOwned + Send + 'static;

    /// Applies `update` and bumps `updated_at`.
    fn apply_update(&mut self, update: Self::Update);
}

/// Implements [`Entity`] and the `AnyEntity` conversion for a struct with
/// `id`, `created_at` and `updated_at` fields.
macro_rules! impl_entity {
    ($ty:ident $(, hidden = [$($hidden:literal),*])?) => {
        impl $crate::entity::Entity for $ty {
            const KIND: $crate::types::EntityKind = $crate::types::EntityKind::$ty;
            $(const HIDDEN_FIELDS: &'static [&'static str] = &[$($hidden),*];)?

            fn id(&self) -> &str {
                &self.id
            }

            fn created_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.created_at
            }

            fn updated_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.updated_at
            }

            fn touch(&mut self) {
                self.updated_at = ::chrono::Utc::now();
            }

            fn into_any(self) -> $crate::entity::AnyEntity {
                $crate::entity::AnyEntity::$ty(self)
            }

            fn from_any(any: $crate::entity::AnyEntity) -> Option<Self> {
                match any {
                    $crate::entity::AnyEntity::$ty(entity) => Some(entity),
                    _ => None,
                }
            }
        }

        impl From<$ty> for $crate::entity::AnyEntity {
            fn from(entity: $ty) -> Self {
                $crate::entity::AnyEntity::$ty(entity)
            }
        }
    };
}

pub(crate) use impl_entity;

/// An entity of any kind, as exchanged with an [`EntityStore`](crate::store::EntityStore).
#[derive(Debug, Clone, PartialEq)]
pub enum AnyEntity {
    State(State),
    City(City),
    Place(Place),
    User(User),
    Review(Review),
    Amenity(Amenity),
}

impl AnyEntity {
    pub fn kind(&self) -> EntityKind {
        match self {
            AnyEntity::State(_) => EntityKind::State,
            AnyEntity::City(_) => EntityKind::City,
            AnyEntity::Place(_) => EntityKind::Place,
            AnyEntity::User(_) => EntityKind::User,
            AnyEntity::Review(_) => EntityKind::Review,
            AnyEntity::Amenity(_) => EntityKind::Amenity,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            AnyEntity::State(e) => e.id(),
            AnyEntity::City(e) => e.id(),
            AnyEntity::Place(e) => e.id(),
            AnyEntity::User(e) => e.id(),
            AnyEntity::Review(e) => e.id(),
            AnyEntity::Amenity(e) => e.id(),
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            AnyEntity::State(e) => e.created_at(),
            AnyEntity::City(e) => e.created_at(),
            AnyEntity::Place(e) => e.created_at(),
            AnyEntity::User(e) => e.created_at(),
            AnyEntity::Review(e) => e.created_at(),
            AnyEntity::Amenity(e) => e.created_at(),
        }
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        match self {
            AnyEntity::State(e) => e.updated_at(),
            AnyEntity::City(e) => e.updated_at(),
            AnyEntity::Place(e) => e.updated_at(),
            AnyEntity::User(e) => e.updated_at(),
            AnyEntity::Review(e) => e.updated_at(),
            AnyEntity::Amenity(e) => e.updated_at(),
        }
    }

    pub fn to_record(&self) -> Result<Record, HbnbError> {
        match self {
            AnyEntity::State(e) => e.to_record(),
            AnyEntity::City(e) => e.to_record(),
            AnyEntity::Place(e) => e.to_record(),
            AnyEntity::User(e) => e.to_record(),
            AnyEntity::Review(e) => e.to_record(),
            AnyEntity::Amenity(e) => e.to_record(),
        }
    }

    /// Full stored representation, hidden fields included.
    pub fn to_json(&self) -> Result<JsonValue, HbnbError> {
        let value = match self {
            AnyEntity::State(e) => serde_json::to_value(e)?,
            AnyEntity::City(e) => serde_json::to_value(e)?,
            AnyEntity::Place(e) => serde_json::to_value(e)?,
            AnyEntity::User(e) => serde_json::to_value(e)?,
            AnyEntity::Review(e) => serde_json::to_value(e)?,
            AnyEntity::Amenity(e) => serde_json::to_value(e)?,
        };
        Ok(value)
    }

    /// Rebuilds an entity of `kind` from its stored representation.
    pub fn from_json(kind: EntityKind, value: JsonValue) -> Result<Self, HbnbError> {
        let entity = match kind {
            EntityKind::State => AnyEntity::State(serde_json::from_value(value)?),
            EntityKind::City => AnyEntity::City(serde_json::from_value(value)?),
            EntityKind::Place => AnyEntity::Place(serde_json::from_value(value)?),
            EntityKind::User => AnyEntity::User(serde_json::from_value(value)?),
            EntityKind::Review => AnyEntity::Review(serde_json::from_value(value)?),
            EntityKind::Amenity => AnyEntity::Amenity(serde_json::from_value(value)?),
        };
        Ok(entity)
    }
}

/// Parses a request body that must be a JSON object.
///
/// Anything else (empty body, malformed JSON, arrays, scalars) is a
/// `BadRequest("Not a JSON")`. An empty object is accepted here; callers
/// that need content check for it themselves.
pub fn json_object(body: &[u8]) -> Result<Map<String, JsonValue>, HbnbError> {
    match serde_json::from_slice::<JsonValue>(body) {
        Ok(JsonValue::Object(map)) => Ok(map),
        _ => Err(HbnbError::not_a_json()),
    }
}

/// Parses a create/update payload: a non-empty JSON object deserialized into `T`.
pub fn parse_payload<T: DeserializeOwned>(context: &str, body: &[u8]) -> Result<T, HbnbError> {
    let map = json_object(body)?;
    if map.is_empty() {
        return Err(HbnbError::not_a_json());
    }
    serde_json::from_value(JsonValue::Object(map))
        .map_err(|e| HbnbError::validation_error(context, &e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, serde::Deserialize)]
    struct Named {
        name: Option<String>,
    }

    #[test]
    fn json_object_rejects_non_objects() {
        let bodies: [&[u8]; 5] = [b"", b"not json", b"[1, 2]", b"42", b"null"];
        for body in bodies {
            match json_object(body) {
                Err(HbnbError::BadRequest(msg)) => assert_eq!(msg, "Not a JSON"),
                other => panic!("expected BadRequest, got {:?}", other),
            }
        }
        assert!(json_object(b"{}").unwrap().is_empty());
    }

    #[test]
    fn parse_payload_rejects_empty_object() {
        assert!(matches!(
            parse_payload::<Named>("State", b"{}"),
            Err(HbnbError::BadRequest(_))
        ));
        let named: Named = parse_payload("State", br#"{"name": "Oslo", "extra": 1}"#).unwrap();
        assert_eq!(named.name.as_deref(), Some("Oslo"));
    }

    #[test]
    fn parse_payload_reports_type_mismatch_as_validation_error() {
        match parse_payload::<Named>("State", br#"{"name": 7}"#) {
            Err(HbnbError::ValidationError { context, .. }) => assert_eq!(context, "State"),
            other => panic!("expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn records_carry_class_and_roundtrip_through_any() {
        let state = State::new("California");
        let any: AnyEntity = state.clone().into();
        assert_eq!(any.kind(), EntityKind::State);
        assert_eq!(any.id(), state.id);

        let record = any.to_record().unwrap();
        assert_eq!(record["__class__"], "State");
        assert_eq!(record["name"], "California");

        let restored = AnyEntity::from_json(EntityKind::State, any.to_json().unwrap()).unwrap();
        assert_eq!(State::from_any(restored), Some(state));
    }

    #[test]
    fn from_any_rejects_other_kinds() {
        let any: AnyEntity = Amenity::new("Wifi").into();
        assert!(State::from_any(any).is_none());
    }
}
