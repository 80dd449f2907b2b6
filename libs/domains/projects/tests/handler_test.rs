//! Handler tests for the projects admin router
//!
//! These run the router with in-memory repositories and blob storage and check:
//! - multipart decoding and form semantics
//! - response bodies and HTTP status codes
//! - error responses
//!
//! PostgreSQL behaviour is covered by `integration_test.rs`.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header::CONTENT_TYPE};
use domain_projects::*;
use domain_types::{InMemoryTypeRepository, ProjectType};
use http_body_util::BodyExt;
use serde_json::Value;
use storage::InMemoryBlobStore;
use test_utils::{MultipartBody, fixtures};
use tower::ServiceExt; // For oneshot()

struct TestApp {
    router: Router,
    storage: Arc<InMemoryBlobStore>,
    front_end: ProjectType,
}

async fn test_app() -> TestApp {
    let types = InMemoryTypeRepository::new();
    let front_end = types.insert("Front-end").await;
    types.insert("Back-end").await;

    let storage = Arc::new(InMemoryBlobStore::new());
    let service = ProjectService::new(
        InMemoryProjectRepository::new(),
        Arc::new(types),
        storage.clone(),
    );

    TestApp {
        router: handlers::router(service),
        storage,
        front_end,
    }
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn multipart(method: &str, uri: &str, body: MultipartBody) -> Request<Body> {
    let (content_type, bytes) = body.build();
    Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, content_type)
        .body(Body::from(bytes))
        .unwrap()
}

fn empty(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn create(app: &TestApp, title: &str, completed: bool) -> Value {
    let mut body = MultipartBody::new()
        .text("title", title)
        .text("description", "Descrizione");
    if completed {
        body = body.text("is_completed", "1");
    }

    let (status, json) = send(&app.router, multipart("POST", "/", body)).await;
    assert_eq!(status, StatusCode::CREATED, "{json}");
    json["data"].clone()
}

#[tokio::test]
async fn test_create_project_returns_201_with_view() {
    let app = test_app().await;

    let body = MultipartBody::new()
        .text("title", "  Sito Vetrina ")
        .text("description", "Landing page")
        .text("type_id", &app.front_end.id.to_string())
        .text("is_completed", "on")
        .file("image", "cover.png", "image/png", fixtures::png_bytes());

    let (status, json) = send(&app.router, multipart("POST", "/", body)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["message"], "Progetto creato con successo");

    let data = &json["data"];
    assert_eq!(data["title"], "Sito Vetrina");
    assert_eq!(data["slug"], "sito-vetrina");
    assert_eq!(data["is_completed"], true);
    assert_eq!(data["type_id"], app.front_end.id.to_string());
    assert_eq!(data["image"], "project_images/sito-vetrina.png");
    assert_eq!(data["image_url"], "/storage/project_images/sito-vetrina.png");
    assert_eq!(data["completion"]["icon"], "fa-circle-check");
    assert_eq!(data["lifecycle"]["state"], "active");

    assert_eq!(
        app.storage.get("project_images/sito-vetrina.png").await,
        Some(fixtures::png_bytes())
    );
}

#[tokio::test]
async fn test_create_project_collects_field_errors() {
    let app = test_app().await;

    let body = MultipartBody::new()
        .text("title", "   ")
        .text("type_id", "not-a-type")
        .file("image", "notes.png", "image/png", fixtures::text_bytes());

    let (status, json) = send(&app.router, multipart("POST", "/", body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "VALIDATION_ERROR");

    let details = &json["details"];
    assert_eq!(details["title"][0]["message"], "Il progetto deve avere un titolo");
    assert_eq!(
        details["description"][0]["message"],
        "Il progetto deve avere una descrizione"
    );
    assert_eq!(details["image"][0]["message"], "Il file inserito non è un immagine");
    assert_eq!(details["type_id"][0]["message"], "Il tipo non è valido o esistente");
    assert!(app.storage.references().await.is_empty());
}

#[tokio::test]
async fn test_create_duplicate_title_is_rejected_even_when_trashed() {
    let app = test_app().await;
    let first = create(&app, "Sito Vetrina", false).await;
    let id = first["id"].as_str().unwrap();

    let (status, _) = send(&app.router, empty("DELETE", &format!("/{id}"))).await;
    assert_eq!(status, StatusCode::OK);

    let body = MultipartBody::new()
        .text("title", "Sito Vetrina")
        .text("description", "Again");
    let (status, json) = send(&app.router, multipart("POST", "/", body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["details"]["title"][0]["code"], "unique");
    assert_eq!(
        json["details"]["title"][0]["message"],
        "Esiste già un progetto con questo titolo"
    );
}

#[tokio::test]
async fn test_empty_file_input_is_ignored() {
    let app = test_app().await;

    let body = MultipartBody::new()
        .text("title", "No Image")
        .text("description", "Descrizione")
        .file("image", "", "application/octet-stream", Vec::new());

    let (status, json) = send(&app.router, multipart("POST", "/", body)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(json["data"]["image"].is_null());
    assert!(json["data"]["image_url"].is_null());
}

#[tokio::test]
async fn test_create_without_multipart_body_is_400() {
    let app = test_app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{}"))
        .unwrap();
    let (status, json) = send(&app.router, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "INVALID_MULTIPART");
}

#[tokio::test]
async fn test_create_form_lists_types() {
    let app = test_app().await;

    let (status, json) = send(&app.router, empty("GET", "/create")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["title"], "");
    assert_eq!(json["data"]["is_completed"], false);
    assert_eq!(json["types"].as_array().unwrap().len(), 2);
    assert_eq!(json["types"][0]["label"], "Back-end");
}

#[tokio::test]
async fn test_get_and_edit_project() {
    let app = test_app().await;
    let created = create(&app, "Blog", false).await;
    let id = created["id"].as_str().unwrap();

    for uri in [format!("/{id}"), format!("/{id}/edit")] {
        let (status, json) = send(&app.router, empty("GET", &uri)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["id"], id);
        assert_eq!(json["data"]["completion"]["color"], "#da1616");
        assert_eq!(json["data"]["completion"]["classes"], "fa-solid fa-xl");
        assert_eq!(json["types"].as_array().unwrap().len(), 2);
    }
}

#[tokio::test]
async fn test_get_project_returns_404_for_missing() {
    let app = test_app().await;
    let missing_id = uuid::Uuid::now_v7();

    let (status, json) = send(&app.router, empty("GET", &format!("/{missing_id}"))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_get_project_rejects_malformed_id() {
    let app = test_app().await;

    let (status, json) = send(&app.router, empty("GET", "/not-a-uuid")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "INVALID_UUID");
}

#[tokio::test]
async fn test_update_project_replaces_image_and_clears_flag() {
    let app = test_app().await;

    let body = MultipartBody::new()
        .text("title", "Old Title")
        .text("description", "Descrizione")
        .text("is_completed", "1")
        .text("type_id", &app.front_end.id.to_string())
        .file("image", "a.png", "image/png", fixtures::png_bytes());
    let (_, json) = send(&app.router, multipart("POST", "/", body)).await;
    let id = json["data"]["id"].as_str().unwrap().to_string();

    let body = MultipartBody::new()
        .text("title", "New Title")
        .text("description", "Nuova descrizione")
        .file("image", "b.jpg", "image/jpeg", fixtures::jpeg_bytes());
    let (status, json) = send(&app.router, multipart("PUT", &format!("/{id}"), body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Progetto modificato con successo");
    let data = &json["data"];
    assert_eq!(data["slug"], "new-title");
    assert_eq!(data["is_completed"], false);
    assert!(data["type_id"].is_null());
    assert_eq!(data["image"], "project_images/new-title.jpg");
    assert_eq!(
        app.storage.references().await,
        vec!["project_images/new-title.jpg".to_string()]
    );
}

#[tokio::test]
async fn test_update_missing_project_is_404_even_with_invalid_form() {
    let app = test_app().await;
    let missing_id = uuid::Uuid::now_v7();

    let (status, _) = send(
        &app.router,
        multipart(
            "PUT",
            &format!("/{missing_id}"),
            MultipartBody::new().text("description", "no title"),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_returns_undo_action_and_moves_to_trash() {
    let app = test_app().await;
    let created = create(&app, "Shop", false).await;
    let id = created["id"].as_str().unwrap();

    let (status, json) = send(&app.router, empty("DELETE", &format!("/{id}"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Progetto eliminato");
    assert_eq!(json["undo"]["method"], "PATCH");
    assert_eq!(json["undo"]["href"], format!("/api/admin/projects/{id}/restore"));
    assert_eq!(json["undo"]["label"], "ANNULLA");
    assert_eq!(json["data"]["lifecycle"]["state"], "soft_deleted");

    let (_, list) = send(&app.router, empty("GET", "/")).await;
    assert_eq!(list["meta"]["total"], 0);

    let (_, trash) = send(&app.router, empty("GET", "/trash")).await;
    assert_eq!(trash["data"][0]["id"], id);

    let (status, _) = send(&app.router, empty("GET", &format!("/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app.router, empty("DELETE", &format!("/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_restore_and_purge() {
    let app = test_app().await;
    let created = create(&app, "Portfolio", false).await;
    let id = created["id"].as_str().unwrap();

    send(&app.router, empty("DELETE", &format!("/{id}"))).await;

    let (status, json) = send(&app.router, empty("PATCH", &format!("/{id}/restore"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Progetto ripristinato con successo");
    assert!(json["data"]["deleted_at"].is_null());

    let (_, list) = send(&app.router, empty("GET", "/")).await;
    assert_eq!(list["meta"]["total"], 1);

    let (status, json) = send(&app.router, empty("DELETE", &format!("/{id}/purge"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Progetto eliminato con successo");

    let (_, list) = send(&app.router, empty("GET", "/")).await;
    assert_eq!(list["meta"]["total"], 0);
    let (_, trash) = send(&app.router, empty("GET", "/trash")).await;
    assert!(trash["data"].as_array().unwrap().is_empty());

    let (status, _) = send(&app.router, empty("PATCH", &format!("/{id}/restore"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app.router, empty("DELETE", &format!("/{id}/purge"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_filters_and_links() {
    let app = test_app().await;
    create(&app, "Done", true).await;
    create(&app, "Open", false).await;

    let (status, json) = send(&app.router, empty("GET", "/?is_completed_filter=completed")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["meta"]["total"], 1);
    assert_eq!(json["data"][0]["title"], "Done");
    assert_eq!(json["filters"]["is_completed_filter"], "completed");
    assert_eq!(
        json["links"]["first"],
        "/api/admin/projects?is_completed_filter=completed&page=1"
    );

    let (_, json) = send(&app.router, empty("GET", "/?is_completed_filter=not-completed")).await;
    assert_eq!(json["meta"]["total"], 1);
    assert_eq!(json["data"][0]["title"], "Open");

    let (_, json) = send(&app.router, empty("GET", "/?is_completed_filter=&type_filter=")).await;
    assert_eq!(json["meta"]["total"], 2);
    assert_eq!(json["data"][0]["title"], "Open");
    assert_eq!(json["data"][1]["title"], "Done");
    assert_eq!(json["types"].as_array().unwrap().len(), 2);

    let (status, json) = send(&app.router, empty("GET", "/?type_filter=garbage")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["meta"]["total"], 0);
}

#[tokio::test]
async fn test_list_paginates_by_ten() {
    let app = test_app().await;
    for i in 0..11 {
        create(&app, &format!("Project {i:02}"), false).await;
    }

    let (_, first) = send(&app.router, empty("GET", "/?page=0")).await;
    assert_eq!(first["meta"]["current_page"], 1);
    assert_eq!(first["meta"]["per_page"], 10);
    assert_eq!(first["meta"]["last_page"], 2);
    assert_eq!(first["data"].as_array().unwrap().len(), 10);
    assert_eq!(first["links"]["next"], "/api/admin/projects?page=2");
    assert!(first["links"]["prev"].is_null());

    let (_, second) = send(&app.router, empty("GET", "/?page=2")).await;
    assert_eq!(second["data"].as_array().unwrap().len(), 1);
    assert_eq!(second["data"][0]["title"], "Project 00");

    let (_, beyond) = send(&app.router, empty("GET", "/?page=7")).await;
    assert!(beyond["data"].as_array().unwrap().is_empty());
    assert_eq!(beyond["meta"]["total"], 11);
}

#[tokio::test]
async fn test_list_with_huge_page_returns_empty_page() {
    let app = test_app().await;
    create(&app, "Only", false).await;

    let (status, json) = send(&app.router, empty("GET", "/?page=18446744073709551615")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["data"].as_array().unwrap().is_empty());
    assert_eq!(json["meta"]["total"], 1);
    assert_eq!(json["meta"]["current_page"], MAX_PAGE);
    assert_eq!(json["links"]["prev"], "/api/admin/projects?page=1");
}

#[tokio::test]
async fn test_list_blank_filters_are_ignored() {
    let app = test_app().await;
    create(&app, "Done", true).await;
    create(&app, "Open", false).await;

    let (_, json) = send(
        &app.router,
        empty("GET", "/?is_completed_filter=%20&type_filter=%20%20"),
    )
    .await;
    assert_eq!(json["meta"]["total"], 2);
    assert_eq!(json["links"]["first"], "/api/admin/projects?page=1");
}
