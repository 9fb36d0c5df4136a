//! In-process mock of the template service for integration tests.
//!
//! Serves the same envelope and legacy field spellings as the real backend
//! (`name`/`template_text`/`creator_name`), so the client's normalizer is
//! exercised on every read. Failure injection happens through the shared
//! state handle.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

#[derive(Default)]
pub struct MockLibrary {
    /// Raw records in the backend's legacy shape.
    pub templates: Vec<Value>,
    /// Respond 500 to every read endpoint.
    pub fail_reads: bool,
    /// Respond with a success envelope that has no data field.
    pub malformed_reads: bool,
    /// Reject the next create/update with this message.
    pub reject_writes: Option<String>,
    /// Respond 500 to usage pings.
    pub fail_usage: bool,
    /// Ids that received a usage ping.
    pub usage_pings: Vec<String>,
    /// Query parameters of the most recent /templates request.
    pub last_search_params: Option<HashMap<String, String>>,
    next_id: u64,
}

#[derive(Clone, Default)]
pub struct MockState(pub Arc<Mutex<MockLibrary>>);

impl MockState {
    pub fn lock(&self) -> std::sync::MutexGuard<'_, MockLibrary> {
        self.0.lock().expect("mock state lock")
    }

    pub fn seed(&self, title: &str, category: &str, featured: bool) -> String {
        let mut lib = self.lock();
        lib.next_id += 1;
        let id = format!("t{}", lib.next_id);
        lib.templates.push(json!({
            "id": id,
            "name": title,
            "description": format!("{} description", title),
            "template_text": format!("Use [INPUT] to {}", title),
            "category": category,
            "tags": ["seeded"],
            "created_by": "seeder",
            "creator_name": "Seed User",
            "created_at": "2024-02-01",
            "updated_at": "2024-02-02",
            "usage_count": 10,
            "rating": 4.0,
            "review_count": 3,
            "is_featured": featured,
            "is_public": true,
            "version": "1.0"
        }));
        id
    }
}

pub struct MockServer {
    pub base_url: String,
    pub state: MockState,
}

pub async fn spawn() -> MockServer {
    let state = MockState::default();

    let app = Router::new()
        .route("/templates", get(list_templates).post(create_template))
        .route("/templates/featured", get(featured_templates))
        .route(
            "/templates/:id",
            get(get_template)
                .put(update_template)
                .delete(delete_template),
        )
        .route("/templates/:id/use", post(use_template))
        .route("/categories", get(list_categories))
        .route("/dashboard", get(dashboard))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock listener");
    let addr = listener.local_addr().expect("mock local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve mock");
    });

    MockServer {
        base_url: format!("http://{}", addr),
        state,
    }
}

fn read_gate(lib: &MockLibrary) -> Option<(StatusCode, Json<Value>)> {
    if lib.fail_reads {
        return Some((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": "service unavailable" })),
        ));
    }
    if lib.malformed_reads {
        return Some((StatusCode::OK, Json(json!({ "success": true }))));
    }
    None
}

async fn featured_templates(
    State(state): State<MockState>,
    Query(_params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    let lib = state.lock();
    if let Some(resp) = read_gate(&lib) {
        return resp;
    }
    let data: Vec<&Value> = lib
        .templates
        .iter()
        .filter(|t| t["is_featured"].as_bool().unwrap_or(false))
        .collect();
    (StatusCode::OK, Json(json!({ "success": true, "data": data })))
}

async fn list_templates(
    State(state): State<MockState>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    // A magic search term lets tests hold a response open long enough for a
    // later request to overtake it. The payload is computed up front, so the
    // held response reflects the data as of request time and a write landing
    // during the hold is not picked up.
    let slow = params.get("search").map(String::as_str) == Some("slow");

    let (page, total) = {
        let mut lib = state.lock();
        lib.last_search_params = Some(params.clone());
        if let Some(resp) = read_gate(&lib) {
            return resp;
        }

        let search = params.get("search").cloned().unwrap_or_default();
        let category = params.get("category").cloned();
        let mut data: Vec<Value> = lib
            .templates
            .iter()
            .filter(|t| {
                let name = t["name"].as_str().unwrap_or("");
                let matches_search = search.is_empty()
                    || name.to_lowercase().contains(&search.to_lowercase())
                    || search == "slow";
                let matches_category = category
                    .as_deref()
                    .is_none_or(|c| t["category"].as_str() == Some(c));
                matches_search && matches_category
            })
            .cloned()
            .collect();

        match params.get("sort_by").map(String::as_str) {
            Some("alphabetical") => data.sort_by_key(|t| t["name"].as_str().unwrap_or("").to_string()),
            Some("recent") => {
                data.sort_by_key(|t| t["created_at"].as_str().unwrap_or("").to_string());
                data.reverse();
            }
            _ => {
                data.sort_by_key(|t| t["usage_count"].as_u64().unwrap_or(0));
                data.reverse();
            }
        }

        let total = data.len();
        let offset = params
            .get("offset")
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(0);
        let limit = params
            .get("limit")
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(20);
        let page: Vec<Value> = data.into_iter().skip(offset).take(limit).collect();
        (page, total)
    };

    if slow {
        tokio::time::sleep(Duration::from_millis(300)).await;
    }
    (
        StatusCode::OK,
        Json(json!({ "success": true, "data": page, "total": total })),
    )
}

async fn get_template(
    State(state): State<MockState>,
    Path(id): Path<String>,
) -> (StatusCode, Json<Value>) {
    let lib = state.lock();
    if let Some(resp) = read_gate(&lib) {
        return resp;
    }
    match lib
        .templates
        .iter()
        .find(|t| t["id"].as_str() == Some(id.as_str()))
    {
        Some(t) => (StatusCode::OK, Json(json!({ "success": true, "data": t }))),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "success": false, "message": "Template not found" })),
        ),
    }
}

async fn create_template(
    State(state): State<MockState>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut lib = state.lock();
    if let Some(message) = lib.reject_writes.clone() {
        return (
            StatusCode::OK,
            Json(json!({ "success": false, "message": message })),
        );
    }

    lib.next_id += 1;
    let id = format!("t{}", lib.next_id);
    let record = json!({
        "id": id,
        "name": body["title"].as_str().unwrap_or(""),
        "description": body["description"].as_str().unwrap_or(""),
        "template_text": body["content"].as_str().unwrap_or(""),
        "category": body["category"].as_str().unwrap_or("general"),
        "tags": body["tags"].clone(),
        "created_by": "test-user",
        "created_at": "2024-03-01",
        "updated_at": "2024-03-01",
        "usage_count": 0,
        "rating": 0.0,
        "review_count": 0,
        "is_featured": body["is_featured"].as_bool().unwrap_or(false),
        "is_public": body["is_public"].as_bool().unwrap_or(false),
        "version": "1.0"
    });
    lib.templates.push(record.clone());
    (
        StatusCode::OK,
        Json(json!({ "success": true, "data": record, "message": "Template created successfully" })),
    )
}

async fn update_template(
    State(state): State<MockState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut lib = state.lock();
    if let Some(message) = lib.reject_writes.clone() {
        return (
            StatusCode::OK,
            Json(json!({ "success": false, "message": message })),
        );
    }

    let Some(record) = lib
        .templates
        .iter_mut()
        .find(|t| t["id"].as_str() == Some(id.as_str()))
    else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "success": false, "message": "Template not found" })),
        );
    };

    if let Some(title) = body["title"].as_str() {
        record["name"] = json!(title);
    }
    if let Some(content) = body["content"].as_str() {
        record["template_text"] = json!(content);
    }
    if let Some(description) = body["description"].as_str() {
        record["description"] = json!(description);
    }
    if let Some(category) = body["category"].as_str() {
        record["category"] = json!(category);
    }
    if body["tags"].is_array() {
        record["tags"] = body["tags"].clone();
    }
    record["updated_at"] = json!("2024-03-02");

    let data = record.clone();
    (
        StatusCode::OK,
        Json(json!({ "success": true, "data": data, "message": "Template updated successfully" })),
    )
}

async fn delete_template(
    State(state): State<MockState>,
    Path(id): Path<String>,
) -> (StatusCode, Json<Value>) {
    let mut lib = state.lock();
    let before = lib.templates.len();
    lib.templates.retain(|t| t["id"].as_str() != Some(id.as_str()));
    if lib.templates.len() == before {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "success": false, "message": "Template not found" })),
        );
    }
    (
        StatusCode::OK,
        Json(json!({ "success": true, "message": "Template permanently deleted" })),
    )
}

async fn use_template(
    State(state): State<MockState>,
    Path(id): Path<String>,
) -> (StatusCode, Json<Value>) {
    let mut lib = state.lock();
    if lib.fail_usage {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": "usage logging unavailable" })),
        );
    }
    lib.usage_pings.push(id);
    (
        StatusCode::OK,
        Json(json!({ "success": true, "data": {}, "message": "Template usage logged" })),
    )
}

async fn list_categories(State(state): State<MockState>) -> (StatusCode, Json<Value>) {
    let lib = state.lock();
    if let Some(resp) = read_gate(&lib) {
        return resp;
    }
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "data": [
                { "name": "Marketing", "template_count": 2, "color_hex": "#667eea" },
                { "name": "Coding", "template_count": 1, "color_hex": "#764ba2" },
            ]
        })),
    )
}

async fn dashboard(State(state): State<MockState>) -> (StatusCode, Json<Value>) {
    let lib = state.lock();
    if let Some(resp) = read_gate(&lib) {
        return resp;
    }
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "data": {
                "total_templates": lib.templates.len(),
                "categories": [
                    { "name": "Marketing", "template_count": 2, "color_hex": "#667eea" },
                ],
                "user_stats": { "created": 1, "saved": 4, "total_uses": 9 },
                "recent_updates": [
                    { "title": "Launch Email", "time": "1 hour ago", "type": "updated" },
                ],
                "top_rated": [
                    { "title": "Launch Email", "rating": 4.9, "reviews": 12 },
                ]
            }
        })),
    )
}
