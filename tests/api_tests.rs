mod common;

use axum::http::{Method, StatusCode};
use chrono::DateTime;
use serde_json::json;
use uuid::Uuid;

use common::{feature, TestApp};
use location_service::config::WritePolicy;
use location_service::middleware::auth::{generate_jwt_token, Caller};

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new();
    let response = app.get("/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "healthy");
    assert_eq!(response.body["service"], "location_service");
    assert!(response.body["timestamp"].is_string());
}

#[tokio::test]
async fn test_create_location() {
    let app = TestApp::new();
    let response = app
        .post(
            "/api/locations/",
            json!({
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [-0.1276, 51.5074]},
                "properties": {
                    "name": "New Location",
                    "description": "A new test location",
                    "address": "London, UK"
                }
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["type"], "Feature");
    assert_eq!(response.body["geometry"]["type"], "Point");
    assert_eq!(response.body["properties"]["name"], "New Location");
    assert_eq!(response.body["properties"]["address"], "London, UK");

    let coordinates = response.body["geometry"]["coordinates"].as_array().unwrap();
    assert!((coordinates[0].as_f64().unwrap() - (-0.1276)).abs() < 1e-4);
    assert!((coordinates[1].as_f64().unwrap() - 51.5074).abs() < 1e-4);
}

#[tokio::test]
async fn test_create_with_minimal_fields() {
    let app = TestApp::new();
    let response = app.post("/api/locations", feature("Eiffel Tower", 2.3522, 48.8566)).await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["properties"]["description"], "");
    assert_eq!(response.body["properties"]["address"], "");
}

#[tokio::test]
async fn test_create_requires_name() {
    let app = TestApp::new();
    let response = app
        .post(
            "/api/locations/",
            json!({
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [-0.1276, 51.5074]},
                "properties": {"description": "Missing name"}
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["details"].get("name").is_some());
}

#[tokio::test]
async fn test_create_requires_geometry() {
    let app = TestApp::new();
    let response = app
        .post(
            "/api/locations/",
            json!({"type": "Feature", "properties": {"name": "No Geometry Location"}}),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["details"].get("geometry").is_some());
}

#[tokio::test]
async fn test_create_rejects_out_of_range_coordinates() {
    let app = TestApp::new();
    let response = app.post("/api/locations/", feature("Invalid Location", 200.0, 100.0)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["code"], "VALIDATION_ERROR");
    assert!(response.body["details"].get("longitude").is_some());
    assert!(response.body["details"].get("latitude").is_some());
}

#[tokio::test]
async fn test_create_rejects_non_feature_body() {
    let app = TestApp::new();
    let response = app
        .post(
            "/api/locations/",
            json!({
                "type": "FeatureCollection",
                "geometry": {"type": "Point", "coordinates": [0.0, 0.0]},
                "properties": {"name": "Collection"}
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["details"].get("type").is_some());
    assert_eq!(app.get("/api/locations/").await.body["count"], 0);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = TestApp::new();
    let response = app
        .post("/api/locations/", json!({"geometry": "not-an-object"}))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_retrieve_location() {
    let app = TestApp::new();
    let id = app.create_location("Location 1", -74.0060, 40.7128).await;

    let response = app.get(&format!("/api/locations/{}/", id)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["id"], id);
    assert_eq!(response.body["properties"]["name"], "Location 1");
    assert_eq!(response.body["properties"]["latitude"], 40.7128);
    assert_eq!(response.body["properties"]["longitude"], -74.0060);
}

#[tokio::test]
async fn test_retrieve_unknown_ids() {
    let app = TestApp::new();

    assert_eq!(app.get("/api/locations/99999/").await.status, StatusCode::NOT_FOUND);
    assert_eq!(app.get("/api/locations/not-a-number").await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_replace_location() {
    let app = TestApp::new();
    let id = app.create_location("Location 1", -74.0060, 40.7128).await;

    let response = app
        .put(
            &format!("/api/locations/{}/", id),
            json!({
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [-73.9, 40.8]},
                "properties": {"name": "Updated Location", "description": "Updated description"}
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["properties"]["name"], "Updated Location");
    assert_eq!(response.body["properties"]["description"], "Updated description");
    assert_eq!(response.body["geometry"]["coordinates"], json!([-73.9, 40.8]));

    let missing_geometry = app
        .put(
            &format!("/api/locations/{}/", id),
            json!({"properties": {"name": "No geometry"}}),
        )
        .await;
    assert_eq!(missing_geometry.status, StatusCode::BAD_REQUEST);

    let unknown = app.put("/api/locations/99999/", feature("Ghost", 0.0, 0.0)).await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_partial_update_keeps_other_fields() {
    let app = TestApp::new();
    let created = app
        .post(
            "/api/locations/",
            json!({
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [-74.0060, 40.7128]},
                "properties": {"name": "Location 1", "description": "First", "address": "Address 1"}
            }),
        )
        .await;
    let id = created.body["id"].as_i64().unwrap();
    let created_at = created.body["properties"]["created_at"].as_str().unwrap().to_string();
    let updated_at = created.body["properties"]["updated_at"].as_str().unwrap().to_string();

    tokio::time::sleep(std::time::Duration::from_millis(10)).await;

    let response = app
        .patch(
            &format!("/api/locations/{}/", id),
            json!({"properties": {"description": "Partially updated description"}}),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let properties = &response.body["properties"];
    assert_eq!(properties["name"], "Location 1");
    assert_eq!(properties["address"], "Address 1");
    assert_eq!(properties["description"], "Partially updated description");
    assert_eq!(response.body["geometry"]["coordinates"], json!([-74.0060, 40.7128]));
    assert_eq!(properties["created_at"], created_at.as_str());

    let before = DateTime::parse_from_rfc3339(&updated_at).unwrap();
    let after = DateTime::parse_from_rfc3339(properties["updated_at"].as_str().unwrap()).unwrap();
    assert!(after > before);
}

#[tokio::test]
async fn test_partial_update_validates_provided_fields() {
    let app = TestApp::new();
    let id = app.create_location("Location 1", -74.0060, 40.7128).await;

    let blank = app
        .patch(&format!("/api/locations/{}/", id), json!({"properties": {"name": "  "}}))
        .await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);

    let out_of_range = app
        .patch(
            &format!("/api/locations/{}/", id),
            json!({"geometry": {"type": "Point", "coordinates": [0.0, 95.0]}}),
        )
        .await;
    assert_eq!(out_of_range.status, StatusCode::BAD_REQUEST);

    let unchanged = app.get(&format!("/api/locations/{}/", id)).await;
    assert_eq!(unchanged.body["properties"]["name"], "Location 1");
}

#[tokio::test]
async fn test_delete_then_get_is_not_found() {
    let app = TestApp::new();
    let id = app.create_location("Location 1", -74.0060, 40.7128).await;
    let uri = format!("/api/locations/{}/", id);

    let response = app.delete(&uri).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    assert_eq!(app.get(&uri).await.status, StatusCode::NOT_FOUND);
    assert_eq!(app.delete(&uri).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_is_newest_first_summary() {
    let app = TestApp::new();
    for name in ["A", "B", "C"] {
        app.create_location(name, 0.0, 0.0).await;
    }

    let response = app.get("/api/locations/").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["count"], 3);
    let results = response.body["results"].as_array().unwrap();
    let names: Vec<&str> = results.iter().map(|r| r["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["C", "B", "A"]);

    let item = &results[0];
    assert!(item.get("geometry").is_none());
    assert!(item.get("latitude").is_some());
    assert!(item.get("created_at").is_some());
}

#[tokio::test]
async fn test_list_pagination() {
    let app = TestApp::new();
    for i in 0..18 {
        app.create_location(&format!("Location {}", i), 0.0, 0.0).await;
    }

    let first = app.get("/api/locations/").await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["count"], 18);
    assert_eq!(first.body["results"].as_array().unwrap().len(), 10);
    assert!(first.body["next"].is_string());
    assert!(first.body["previous"].is_null());

    let second = app.get("/api/locations/?page=2").await;
    assert_eq!(second.body["results"].as_array().unwrap().len(), 8);
    assert!(second.body["next"].is_null());
    assert!(second.body["previous"].is_string());

    assert_eq!(app.get("/api/locations/?page=3").await.status, StatusCode::NOT_FOUND);
    assert_eq!(app.get("/api/locations/?page=abc").await.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_huge_page_is_not_found() {
    let app = TestApp::new();
    app.create_location("Location 1", 0.0, 0.0).await;

    let response = app.get("/api/locations/?page=18446744073709551615").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_list_search() {
    let app = TestApp::new();
    app.create_location("Empire State Building", -73.9857, 40.7484).await;
    app.create_location("Central Park", -73.9654, 40.7829).await;

    let response = app.get("/api/locations/?search=empire").await;

    assert_eq!(response.body["count"], 1);
    assert_eq!(response.body["results"][0]["name"], "Empire State Building");
}

#[tokio::test]
async fn test_list_search_is_literal() {
    let app = TestApp::new();
    app.create_location("Central Park", -73.9654, 40.7829).await;
    app.create_location("100% Pure_Coffee", -73.99, 40.75).await;

    let percent = app.get("/api/locations/?search=%25").await;
    assert_eq!(percent.body["count"], 1);
    assert_eq!(percent.body["results"][0]["name"], "100% Pure_Coffee");

    let underscore = app.get("/api/locations/?search=e_c").await;
    assert_eq!(underscore.body["count"], 1);

    let wildcard_like = app.get("/api/locations/?search=c_ntral").await;
    assert_eq!(wildcard_like.body["count"], 0);
}

#[tokio::test]
async fn test_admin_policy() {
    let app = TestApp::with_policy(WritePolicy::Admin);
    let user_token = generate_jwt_token(&Caller::user(Uuid::new_v4()), &app.config).unwrap();
    let admin_token = generate_jwt_token(&Caller::admin(Uuid::new_v4()), &app.config).unwrap();

    // Sin caller
    let anonymous = app.post("/api/locations/", feature("Anon", 0.0, 0.0)).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    // Lecturas abiertas
    assert_eq!(app.get("/api/locations/").await.status, StatusCode::OK);

    let created = app
        .request(
            Method::POST,
            "/api/locations/",
            Some(feature("Owned", 0.0, 0.0)),
            Some(&user_token),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let uri = format!("/api/locations/{}/", created.body["id"]);

    let user_delete = app.request(Method::DELETE, &uri, None, Some(&user_token)).await;
    assert_eq!(user_delete.status, StatusCode::FORBIDDEN);

    let admin_delete = app.request(Method::DELETE, &uri, None, Some(&admin_token)).await;
    assert_eq!(admin_delete.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_authenticated_policy() {
    let app = TestApp::with_policy(WritePolicy::Authenticated);
    let token = generate_jwt_token(&Caller::user(Uuid::new_v4()), &app.config).unwrap();

    assert_eq!(app.delete("/api/locations/1/").await.status, StatusCode::UNAUTHORIZED);

    let created = app
        .request(Method::POST, "/api/locations/", Some(feature("Mine", 0.0, 0.0)), Some(&token))
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_invalid_token_is_unauthorized() {
    let app = TestApp::new();
    let response = app
        .request(Method::GET, "/api/locations/", None, Some("not-a-jwt"))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
