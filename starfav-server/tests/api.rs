//! End-to-end API tests against the in-memory catalog

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use starfav_server::models::DuplicatePolicy;
use starfav_server::{build_router, AppState, FavoritesConfig, MemoryCatalog};

struct Reply {
    status: StatusCode,
    location: Option<String>,
    body: Value,
}

fn app_with(duplicates: DuplicatePolicy) -> Router {
    build_router(AppState::new(
        Arc::new(MemoryCatalog::new()),
        FavoritesConfig {
            default_user_id: 2,
            duplicates,
        },
    ))
}

fn app() -> Router {
    app_with(DuplicatePolicy::Dedupe)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Reply {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_owned());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    Reply {
        status,
        location,
        body,
    }
}

/// Create users until the default user (id 2) exists.
async fn seed_users(app: &Router) {
    for email in ["han@falcon.net", "chewie@falcon.net"] {
        let reply = send(app, "POST", "/users", Some(json!({ "email": email }))).await;
        assert_eq!(reply.status, StatusCode::OK);
    }
}

async fn create_planet(app: &Router, name: &str) -> String {
    let reply = send(
        app,
        "POST",
        "/planets",
        Some(json!({"name": name, "diameter": 10465, "gravity": "1 standard"})),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);
    reply.location.expect("create sets Location")
}

#[tokio::test]
async fn tatooine_scenario() {
    let app = app();

    let reply = send(
        &app,
        "POST",
        "/planets",
        Some(json!({"name": "Tatooine", "diameter": 10465, "gravity": "1 standard"})),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body, json!({"msg": "Planet added correctly!"}));

    let reply = send(&app, "GET", "/planets", None).await;
    assert_eq!(reply.status, StatusCode::OK);
    let planets = reply.body.as_array().unwrap();
    assert!(planets.iter().any(|p| p["name"] == "Tatooine"));
}

#[tokio::test]
async fn person_round_trips_through_location() {
    let app = app();
    let input = json!({"name": "Luke Skywalker", "birth_year": "19BBY", "eye_color": "blue"});

    let reply = send(&app, "POST", "/people", Some(input.clone())).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body, json!({"msg": "Character added correctly!"}));

    let location = reply.location.unwrap();
    let reply = send(&app, "GET", &location, None).await;
    assert_eq!(reply.status, StatusCode::OK);

    let result = &reply.body["result"];
    assert_eq!(result["name"], input["name"]);
    assert_eq!(result["birth_year"], input["birth_year"]);
    assert_eq!(result["eye_color"], input["eye_color"]);
}

#[tokio::test]
async fn planet_round_trips_through_location() {
    let app = app();
    let location = create_planet(&app, "Alderaan").await;

    let reply = send(&app, "GET", &location, None).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["result"]["name"], "Alderaan");
    assert_eq!(reply.body["result"]["diameter"], 10465);
    assert_eq!(reply.body["result"]["gravity"], "1 standard");
}

#[tokio::test]
async fn list_length_matches_creations() {
    let app = app();
    for i in 0..3 {
        let person = json!({"name": format!("Trooper {}", i), "birth_year": 20, "eye_color": "none"});
        assert_eq!(send(&app, "POST", "/people", Some(person)).await.status, StatusCode::OK);
    }
    for name in ["Hoth", "Endor"] {
        create_planet(&app, name).await;
    }

    let people = send(&app, "GET", "/people", None).await.body;
    let planets = send(&app, "GET", "/planets", None).await.body;
    assert_eq!(people.as_array().unwrap().len(), 3);
    assert_eq!(planets.as_array().unwrap().len(), 2);

    // Numeric birth years are stored as their text
    assert_eq!(people[0]["birth_year"], "20");
}

#[tokio::test]
async fn missing_entities_are_404() {
    let app = app();

    let reply = send(&app, "GET", "/people/42", None).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(
        reply.body["message"],
        "The character you are looking for does not exist."
    );

    let reply = send(&app, "GET", "/planets/42", None).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);

    let reply = send(&app, "GET", "/users/42", None).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);

    let reply = send(&app, "GET", "/user/42/favorites", None).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn favoriting_on_fresh_database_is_404() {
    let app = app();
    let reply = send(&app, "POST", "/favorite/planets/1", None).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert!(reply.body["message"].is_string());
}

#[tokio::test]
async fn favoriting_missing_planet_for_existing_user_is_404() {
    let app = app();
    seed_users(&app).await;

    let reply = send(&app, "POST", "/user/1/favorite/planets/9", None).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(
        reply.body["message"],
        "The planet you are looking for does not exist."
    );
}

#[tokio::test]
async fn unfavoriting_on_fresh_database_is_404() {
    let app = app();

    let reply = send(&app, "DELETE", "/favorite/planets/1", None).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(
        reply.body["message"],
        "The user you are looking for does not exist."
    );

    let reply = send(&app, "DELETE", "/favorite/people/1", None).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(
        reply.body["message"],
        "The user you are looking for does not exist."
    );
}

#[tokio::test]
async fn unfavoriting_missing_planet_for_existing_user_is_404() {
    let app = app();
    seed_users(&app).await;

    let reply = send(&app, "DELETE", "/user/1/favorite/planets/9", None).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(
        reply.body["message"],
        "The planet you are looking for does not exist."
    );
}

#[tokio::test]
async fn missing_person_target_is_404_on_both_verbs() {
    let app = app();
    seed_users(&app).await;

    for method in ["POST", "DELETE"] {
        let reply = send(&app, method, "/user/1/favorite/people/9", None).await;
        assert_eq!(reply.status, StatusCode::NOT_FOUND, "{method}");
        assert_eq!(
            reply.body["message"],
            "The character you are looking for does not exist."
        );
    }
}

#[tokio::test]
async fn favorite_mutations_for_missing_user_are_404() {
    let app = app();
    create_planet(&app, "Hoth").await;

    for method in ["POST", "DELETE"] {
        let reply = send(&app, method, "/user/5/favorite/planets/1", None).await;
        assert_eq!(reply.status, StatusCode::NOT_FOUND, "{method}");
        assert_eq!(
            reply.body["message"],
            "The user you are looking for does not exist."
        );
    }
}

#[tokio::test]
async fn planet_favorite_add_then_remove() {
    let app = app();
    seed_users(&app).await;
    create_planet(&app, "Tatooine").await;

    let reply = send(&app, "POST", "/favorite/planets/1", None).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(
        reply.body["msg"],
        "Your favorite planet has been added correctly :)"
    );
    assert_eq!(reply.body["PlanetsFav"].as_array().unwrap().len(), 1);

    // Default routes act on user 2
    let favorites = send(&app, "GET", "/user/2/favorites", None).await.body;
    let planets = favorites["PlanetsFav"].as_array().unwrap();
    assert_eq!(planets.len(), 1);
    assert_eq!(planets[0]["name"], "Tatooine");
    assert_eq!(favorites["PeopleFav"], json!([]));

    let untouched = send(&app, "GET", "/user/1/favorites", None).await.body;
    assert_eq!(untouched["PlanetsFav"], json!([]));

    let reply = send(&app, "DELETE", "/favorite/planets/1", None).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["PlanetsFav"], json!([]));

    let favorites = send(&app, "GET", "/user/2/favorites", None).await.body;
    assert_eq!(favorites["PlanetsFav"], json!([]));
}

#[tokio::test]
async fn person_favorites_for_explicit_user() {
    let app = app();
    seed_users(&app).await;
    let leia = json!({"name": "Leia Organa", "birth_year": "19BBY", "eye_color": "brown"});
    send(&app, "POST", "/people", Some(leia)).await;

    let reply = send(&app, "POST", "/user/1/favorite/people/1", None).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["PeopleFav"][0]["name"], "Leia Organa");

    let reply = send(&app, "DELETE", "/user/1/favorite/people/1", None).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(
        reply.body["msg"],
        "Your favorite character has been deleted correctly :("
    );
    assert_eq!(reply.body["PeopleFav"], json!([]));

    // Nothing left to remove
    let reply = send(&app, "DELETE", "/user/1/favorite/people/1", None).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn default_person_routes_use_default_user() {
    let app = app();
    seed_users(&app).await;
    let han = json!({"name": "Han Solo", "birth_year": "29BBY", "eye_color": "brown"});
    send(&app, "POST", "/people", Some(han)).await;

    assert_eq!(
        send(&app, "POST", "/favorite/people/1", None).await.status,
        StatusCode::OK
    );
    let favorites = send(&app, "GET", "/user/2/favorites", None).await.body;
    assert_eq!(favorites["PeopleFav"][0]["name"], "Han Solo");

    let reply = send(&app, "DELETE", "/favorite/people/1", None).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["PeopleFav"], json!([]));
}

#[tokio::test]
async fn dedupe_policy_keeps_one_entry() {
    let app = app_with(DuplicatePolicy::Dedupe);
    seed_users(&app).await;
    create_planet(&app, "Naboo").await;

    for _ in 0..3 {
        let reply = send(&app, "POST", "/user/1/favorite/planets/1", None).await;
        assert_eq!(reply.status, StatusCode::OK);
    }

    let favorites = send(&app, "GET", "/user/1/favorites", None).await.body;
    assert_eq!(favorites["PlanetsFav"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn allow_policy_keeps_repeats() {
    let app = app_with(DuplicatePolicy::Allow);
    seed_users(&app).await;
    create_planet(&app, "Naboo").await;

    send(&app, "POST", "/user/1/favorite/planets/1", None).await;
    let reply = send(&app, "POST", "/user/1/favorite/planets/1", None).await;
    assert_eq!(reply.body["PlanetsFav"].as_array().unwrap().len(), 2);

    let reply = send(&app, "DELETE", "/user/1/favorite/planets/1", None).await;
    assert_eq!(reply.body["PlanetsFav"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn reject_policy_conflicts_on_repeat() {
    let app = app_with(DuplicatePolicy::Reject);
    seed_users(&app).await;
    create_planet(&app, "Naboo").await;

    let first = send(&app, "POST", "/user/1/favorite/planets/1", None).await;
    assert_eq!(first.status, StatusCode::OK);

    let second = send(&app, "POST", "/user/1/favorite/planets/1", None).await;
    assert_eq!(second.status, StatusCode::CONFLICT);
    assert_eq!(
        second.body["message"],
        "planet 1 is already a favorite of user 1"
    );
}

#[tokio::test]
async fn missing_field_is_400() {
    let app = app();

    let reply = send(
        &app,
        "POST",
        "/planets",
        Some(json!({"name": "Kamino", "gravity": "1 standard"})),
    )
    .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["message"], "missing required field 'diameter'");

    let reply = send(&app, "POST", "/people", Some(json!({}))).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["message"], "missing required field 'name'");
}

#[tokio::test]
async fn malformed_input_is_400() {
    let app = app();

    let reply = send(&app, "GET", "/planets/tatooine", None).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["message"], "id: must be an integer");

    let reply = send(&app, "POST", "/user/abc/favorite/people/1", None).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);

    let request = Request::builder()
        .method("POST")
        .uri("/people")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn undecodable_path_segment_is_400() {
    let app = app();

    let reply = send(&app, "GET", "/people/%FF", None).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["message"], "id: must be an integer");

    let reply = send(&app, "GET", "/user/%FF/favorites", None).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["message"], "user_id: must be an integer");

    let reply = send(&app, "DELETE", "/user/%FF/favorite/planets/1", None).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["message"], "user_id: must be an integer");

    let reply = send(&app, "POST", "/user/1/favorite/people/x", None).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["message"], "id: must be an integer");
}

#[tokio::test]
async fn wrong_method_is_json_405() {
    let app = app();

    let reply = send(&app, "PUT", "/people", Some(json!({"name": "Leia"}))).await;
    assert_eq!(reply.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(reply.body["message"], "method PUT not allowed for /people");

    let reply = send(&app, "GET", "/favorite/planets/1", None).await;
    assert_eq!(reply.status, StatusCode::METHOD_NOT_ALLOWED);
    assert!(reply.body["message"].is_string());
}

#[tokio::test]
async fn trailing_slashes_are_ignored() {
    let app = app();
    create_planet(&app, "Naboo").await;

    let reply = send(&app, "GET", "/planets/", None).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body.as_array().map(Vec::len), Some(1));

    let reply = send(&app, "GET", "/planets/1/", None).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["result"]["name"], "Naboo");

    let reply = send(
        &app,
        "POST",
        "/people/",
        Some(json!({"name": "Padme", "birth_year": "46BBY", "eye_color": "brown"})),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);
}

#[tokio::test]
async fn users_are_listed_and_fetched() {
    let app = app();
    seed_users(&app).await;

    let users = send(&app, "GET", "/users", None).await.body;
    assert_eq!(users.as_array().unwrap().len(), 2);

    let reply = send(&app, "GET", "/users/2", None).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(
        reply.body,
        json!({"id": 2, "email": "chewie@falcon.net", "name": null, "is_active": true})
    );

    let duplicate = send(
        &app,
        "POST",
        "/users",
        Some(json!({"email": "han@falcon.net"})),
    )
    .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn greeting_and_health() {
    let app = app();

    let reply = send(&app, "GET", "/user", None).await;
    assert_eq!(
        reply.body,
        json!({"msg": "Hello, this is your GET /user response "})
    );

    let reply = send(&app, "GET", "/health", None).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["storage"], "memory");
}
