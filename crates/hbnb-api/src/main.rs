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

//! REST API for the HBnB rental platform.

mod config;
mod error;
mod handlers;

use axum::{
    extract::Request,
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use config::{ApiConfig, StorageBackend};
use handlers::{
    amenities, cities, delete_one, get_one, index, list_all, places, places_amenities, reviews,
    states, update_one, users, AppState,
};
use hbnb_core::amenity::Amenity;
use hbnb_core::city::City;
use hbnb_core::place::Place;
use hbnb_core::review::Review;
use hbnb_core::state::State as StateModel;
use hbnb_core::user::User;
use hbnb_core::{EntityStore, InMemoryEntityStore};
use hbnb_storage::PostgresEntityStore;
use serde_json::json;
use std::sync::Arc;
use tower::Layer;
use tower_http::{
    cors::{Any, CorsLayer},
    normalize_path::NormalizePathLayer,
    trace::TraceLayer,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ApiConfig::from_env()?;
    let store: Arc<dyn EntityStore> = match &config.storage {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on shutdown");
            Arc::new(InMemoryEntityStore::new())
        }
        StorageBackend::Postgres {
            url,
            max_connections,
        } => Arc::new(PostgresEntityStore::connect(url, *max_connections).await?),
    };

    let app = app(AppState::new(store), config.cors_origin.clone());
    // Trailing slashes are accepted on every route.
    let app = NormalizePathLayer::trim_trailing_slash().layer(app);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, axum::ServiceExt::<Request>::into_make_service(app)).await?;
    Ok(())
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/status", get(index::status))
        .route("/stats", get(index::stats))
        .route(
            "/states",
            get(list_all::<StateModel>).post(states::create_state),
        )
        .route(
            "/states/:state_id",
            get(get_one::<StateModel>)
                .put(update_one::<StateModel>)
                .delete(delete_one::<StateModel>),
        )
        .route(
            "/states/:state_id/cities",
            get(cities::list_cities).post(cities::create_city),
        )
        .route(
            "/cities/:city_id",
            get(get_one::<City>)
                .put(update_one::<City>)
                .delete(delete_one::<City>),
        )
        .route(
            "/cities/:city_id/places",
            get(places::list_places).post(places::create_place),
        )
        .route(
            "/places/:place_id",
            get(get_one::<Place>)
                .put(update_one::<Place>)
                .delete(delete_one::<Place>),
        )
        .route(
            "/places/:place_id/reviews",
            get(reviews::list_reviews).post(reviews::create_review),
        )
        .route(
            "/places/:place_id/amenities",
            get(places_amenities::list_place_amenities),
        )
        .route(
            "/places/:place_id/amenities/:amenity_id",
            post(places_amenities::link_amenity).delete(places_amenities::unlink_amenity),
        )
        .route("/places_search", post(places::search))
        .route(
            "/reviews/:review_id",
            get(get_one::<Review>)
                .put(update_one::<Review>)
                .delete(delete_one::<Review>),
        )
        .route("/users", get(list_all::<User>).post(users::create_user))
        .route(
            "/users/:user_id",
            get(get_one::<User>)
                .put(update_one::<User>)
                .delete(delete_one::<User>),
        )
        .route(
            "/amenities",
            get(list_all::<Amenity>).post(amenities::create_amenity),
        )
        .route(
            "/amenities/:amenity_id",
            get(get_one::<Amenity>)
                .put(update_one::<Amenity>)
                .delete(delete_one::<Amenity>),
        )
}

// Separate function to create the Axum app (makes testing easier)
fn app(state: AppState, cors_origin: HeaderValue) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(cors_origin)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api/v1", api_routes().layer(cors))
        .fallback(not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Method, Request},
    };
    use hbnb_core::test_utils::{seed_scenario, Scenario};
    use serde_json::Value;
    use tower::ServiceExt;

    async fn seeded_app() -> (Router, Scenario) {
        let store = Arc::new(InMemoryEntityStore::new());
        let scenario = seed_scenario(store.as_ref()).await.unwrap();
        let app = app(
            AppState::new(store),
            HeaderValue::from_static("0.0.0.0"),
        );
        (app, scenario)
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let body = match body {
            Some(json) => Body::from(json.to_string()),
            None => Body::empty(),
        };
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(body)
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    fn ids(value: &Value) -> Vec<&str> {
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|record| record["id"].as_str().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_status() {
        let (app, _) = seeded_app().await;
        let (status, body) = send(&app, Method::GET, "/api/v1/status", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "OK" }));
    }

    #[tokio::test]
    async fn test_stats_counts_every_kind() {
        let (app, _) = seeded_app().await;
        let (status, body) = send(&app, Method::GET, "/api/v1/stats", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "amenities": 2, "cities": 2, "places": 3,
                "reviews": 1, "states": 2, "users": 1
            })
        );
    }

    async fn allowed_origin(app: &Router, uri: &str) -> Option<HeaderValue> {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .header("origin", "0.0.0.0")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        response
            .headers()
            .get("access-control-allow-origin")
            .cloned()
    }

    #[tokio::test]
    async fn test_cors_only_covers_api_routes() {
        let (app, _) = seeded_app().await;
        assert_eq!(
            allowed_origin(&app, "/api/v1/status").await,
            Some(HeaderValue::from_static("0.0.0.0"))
        );
        assert_eq!(allowed_origin(&app, "/status").await, None);
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let (app, _) = seeded_app().await;
        let (status, body) = send(&app, Method::GET, "/api/v1/nowhere", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "Not found" }));
    }

    #[tokio::test]
    async fn test_trailing_slash_is_accepted() {
        let (app, _) = seeded_app().await;
        let response = NormalizePathLayer::trim_trailing_slash()
            .layer(app)
            .oneshot(
                Request::builder()
                    .uri("/api/v1/status/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_state_crud() {
        let (app, _) = seeded_app().await;

        let (status, created) =
            send(&app, Method::POST, "/api/v1/states", Some(json!({ "name": "Oregon" }))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["__class__"], "State");
        let id = created["id"].as_str().unwrap().to_string();

        let (status, fetched) = send(&app, Method::GET, &format!("/api/v1/states/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["name"], "Oregon");

        let (status, updated) = send(
            &app,
            Method::PUT,
            &format!("/api/v1/states/{}", id),
            Some(json!({ "name": "Washington", "id": "hijack" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["name"], "Washington");
        assert_eq!(updated["id"], id.as_str());

        let (_, all) = send(&app, Method::GET, "/api/v1/states", None).await;
        assert_eq!(all.as_array().unwrap().len(), 3);

        let (status, body) = send(&app, Method::DELETE, &format!("/api/v1/states/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({}));

        let (status, _) = send(&app, Method::GET, &format!("/api/v1/states/{}", id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&app, Method::DELETE, &format!("/api/v1/states/{}", id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_rejects_bad_bodies() {
        let (app, _) = seeded_app().await;

        let (status, body) = send(&app, Method::POST, "/api/v1/states", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Not a JSON" }));

        let (status, body) =
            send(&app, Method::POST, "/api/v1/states", Some(json!({ "label": "x" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Missing name" }));

        let (status, body) =
            send(&app, Method::POST, "/api/v1/users", Some(json!({ "email": "a@b.c" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Missing password" }));
    }

    #[tokio::test]
    async fn test_nested_cities_and_places() {
        let (app, s) = seeded_app().await;

        let (status, cities) =
            send(&app, Method::GET, &format!("/api/v1/states/{}/cities", s.state_1), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&cities), vec![s.city_1.as_str()]);

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/states/missing/cities",
            Some(json!({ "name": "Nowhere" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, city) = send(
            &app,
            Method::POST,
            &format!("/api/v1/states/{}/cities", s.state_2),
            Some(json!({ "name": "Las Vegas", "state_id": "ignored" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(city["state_id"], s.state_2.as_str());

        let (status, places) =
            send(&app, Method::GET, &format!("/api/v1/cities/{}/places", s.city_1), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&places), vec![s.place_1.as_str(), s.place_2.as_str()]);
    }

    #[tokio::test]
    async fn test_create_place_requires_existing_user() {
        let (app, s) = seeded_app().await;
        let uri = format!("/api/v1/cities/{}/places", s.city_2);

        let (status, body) = send(&app, Method::POST, &uri, Some(json!({ "name": "Hut" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Missing user_id" }));

        let (status, _) = send(
            &app,
            Method::POST,
            &uri,
            Some(json!({ "user_id": "ghost", "name": "Hut" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, place) = send(
            &app,
            Method::POST,
            &uri,
            Some(json!({ "user_id": s.user, "name": "Hut", "price_by_night": 40 })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(place["city_id"], s.city_2.as_str());
        assert_eq!(place["price_by_night"], 40);
    }

    #[tokio::test]
    async fn test_reviews_and_users() {
        let (app, s) = seeded_app().await;

        let (status, reviews) =
            send(&app, Method::GET, &format!("/api/v1/places/{}/reviews", s.place_1), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&reviews), vec![s.review.as_str()]);

        let (status, review) = send(
            &app,
            Method::POST,
            &format!("/api/v1/places/{}/reviews", s.place_3),
            Some(json!({ "user_id": s.user, "text": "Quiet" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(review["place_id"], s.place_3.as_str());

        let (status, user) = send(&app, Method::GET, &format!("/api/v1/users/{}", s.user), None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(user.get("password").is_none());
    }

    #[tokio::test]
    async fn test_place_amenity_links() {
        let (app, s) = seeded_app().await;
        let link = format!("/api/v1/places/{}/amenities/{}", s.place_3, s.wifi);

        let (status, _) = send(&app, Method::POST, &link, None).await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, _) = send(&app, Method::POST, &link, None).await;
        assert_eq!(status, StatusCode::OK);

        let (_, amenities) =
            send(&app, Method::GET, &format!("/api/v1/places/{}/amenities", s.place_3), None).await;
        assert_eq!(ids(&amenities), vec![s.wifi.as_str()]);

        let (status, _) = send(&app, Method::DELETE, &link, None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, Method::DELETE, &link, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_places_search_scenario() {
        let (app, s) = seeded_app().await;
        let uri = "/api/v1/places_search";

        let (status, body) = send(&app, Method::POST, uri, Some(json!({ "states": [s.state_1] }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&body), vec![s.place_1.as_str(), s.place_2.as_str()]);

        let (_, body) = send(&app, Method::POST, uri, Some(json!({ "cities": [s.city_2] }))).await;
        assert_eq!(ids(&body), vec![s.place_3.as_str()]);

        let (_, body) = send(
            &app,
            Method::POST,
            uri,
            Some(json!({ "states": [s.state_1], "cities": [s.city_2, s.city_1] })),
        )
        .await;
        assert_eq!(
            ids(&body),
            vec![s.place_1.as_str(), s.place_2.as_str(), s.place_3.as_str()]
        );

        let (_, body) = send(&app, Method::POST, uri, Some(json!({ "amenities": [s.wifi] }))).await;
        assert_eq!(ids(&body), vec![s.place_1.as_str()]);
        assert!(body[0].get("amenities").is_none());

        let (_, body) = send(&app, Method::POST, uri, Some(json!({}))).await;
        assert_eq!(body.as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_places_search_rejects_non_json() {
        let (app, _) = seeded_app().await;
        let (status, body) = send(&app, Method::POST, "/api/v1/places_search", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Not a JSON" }));
    }
}
