use std::net::SocketAddr;

use axum::Router;
use migration::MigratorTrait;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use server::routes::{self, AppState};

struct TestApp {
    base_url: String,
}

fn cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Serve the router on an ephemeral port against a fresh in-memory store
async fn start_server() -> anyhow::Result<TestApp> {
    let db = models::db::connect_to("sqlite::memory:").await?;
    migration::Migrator::up(&db, None).await?;

    let state = AppState { db };
    let app: Router = routes::build_router(state, cors());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url })
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

#[tokio::test]
async fn e2e_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_actor_crud_flow() -> anyhow::Result<()> {
    let app = start_server().await?;
    let http = client();

    let name = format!("Actor {}", Uuid::new_v4());
    let res = http
        .post(format!("{}/actor", app.base_url))
        .json(&json!({ "name": name }))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let created = res.json::<serde_json::Value>().await?;
    let id = created["id"].as_i64().expect("assigned id");
    assert_eq!(created["name"], json!(name));

    let res = http.get(format!("{}/actor/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<serde_json::Value>().await?, created);

    let res = http
        .patch(format!("{}/actor/{}", app.base_url, id))
        .json(&json!({ "name": "Renamed" }))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let renamed = res.json::<serde_json::Value>().await?;
    assert_eq!(renamed["name"], "Renamed");
    assert_eq!(renamed["id"], created["id"]);

    let res = http.get(format!("{}/actors", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let all = res.json::<Vec<serde_json::Value>>().await?;
    assert_eq!(all.len(), 1);

    let res = http.delete(format!("{}/actor/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<serde_json::Value>().await?, json!({}));

    let res = http.get(format!("{}/actor/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn e2e_actor_error_contract() -> anyhow::Result<()> {
    let app = start_server().await?;
    let http = client();

    // Missing and empty names are client errors
    let res = http
        .post(format!("{}/actor", app.base_url))
        .json(&json!({}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert!(body["error"].is_string());

    let res = http
        .post(format!("{}/actor", app.base_url))
        .json(&json!({ "name": "" }))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    // Validation runs before the existence check on PATCH
    let res = http
        .patch(format!("{}/actor/12345", app.base_url))
        .json(&json!({ "name": "" }))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    let res = http
        .patch(format!("{}/actor/12345", app.base_url))
        .json(&json!({ "name": "Ghost" }))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let res = http.delete(format!("{}/actor/12345", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    Ok(())
}

async fn create_actor(http: &reqwest::Client, base: &str, name: &str) -> anyhow::Result<i64> {
    let res = http
        .post(format!("{}/actor", base))
        .json(&json!({ "name": name }))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let body = res.json::<serde_json::Value>().await?;
    Ok(body["id"].as_i64().expect("assigned id"))
}

#[tokio::test]
async fn e2e_film_crud_flow() -> anyhow::Result<()> {
    let app = start_server().await?;
    let http = client();

    let norton = create_actor(&http, &app.base_url, "Edward Norton").await?;
    let pitt = create_actor(&http, &app.base_url, "Brad Pitt").await?;

    let res = http
        .post(format!("{}/film", app.base_url))
        .json(&json!({ "name": "Fight Club", "actors": [norton, pitt] }))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let created = res.json::<serde_json::Value>().await?;
    let film_id = created["id"].as_i64().expect("assigned id");
    assert_eq!(created["actors"].as_array().expect("actors").len(), 2);

    let res = http.get(format!("{}/film/{}", app.base_url, film_id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let fetched = res.json::<serde_json::Value>().await?;
    assert_eq!(fetched["name"], "Fight Club");
    assert_eq!(fetched["actors"].as_array().expect("actors").len(), 2);

    // Name-only patch keeps the cast
    let res = http
        .patch(format!("{}/film/{}", app.base_url, film_id))
        .json(&json!({ "name": "Fight Club (1999)" }))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let renamed = res.json::<serde_json::Value>().await?;
    assert_eq!(renamed["name"], "Fight Club (1999)");
    assert_eq!(renamed["actors"].as_array().expect("actors").len(), 2);

    // Cast-only patch replaces the whole set
    let res = http
        .patch(format!("{}/film/{}", app.base_url, film_id))
        .json(&json!({ "actors": [pitt] }))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let recast = res.json::<serde_json::Value>().await?;
    let cast = recast["actors"].as_array().expect("actors");
    assert_eq!(cast.len(), 1);
    assert_eq!(cast[0]["id"].as_i64(), Some(pitt));

    // Empty list clears the cast
    let res = http
        .patch(format!("{}/film/{}", app.base_url, film_id))
        .json(&json!({ "actors": [] }))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let cleared = res.json::<serde_json::Value>().await?;
    assert!(cleared["actors"].as_array().expect("actors").is_empty());

    let res = http.delete(format!("{}/film/{}", app.base_url, film_id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<serde_json::Value>().await?, json!({}));

    let res = http.get(format!("{}/film/{}", app.base_url, film_id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn e2e_films_list_groups_by_film() -> anyhow::Result<()> {
    let app = start_server().await?;
    let http = client();

    let statham = create_actor(&http, &app.base_url, "Jason Statham").await?;
    let liotta = create_actor(&http, &app.base_url, "Ray Liotta").await?;

    let res = http
        .post(format!("{}/film", app.base_url))
        .json(&json!({ "name": "Revolver", "actors": [statham, liotta] }))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);

    let res = http
        .post(format!("{}/film", app.base_url))
        .json(&json!({ "name": "Untitled", "actors": [] }))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);

    let res = http.get(format!("{}/films", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let films = res.json::<Vec<serde_json::Value>>().await?;
    assert_eq!(films.len(), 2);

    let revolver = films.iter().find(|f| f["name"] == "Revolver").expect("revolver");
    assert_eq!(revolver["actors"].as_array().expect("actors").len(), 2);
    let untitled = films.iter().find(|f| f["name"] == "Untitled").expect("untitled");
    assert!(untitled["actors"].as_array().expect("actors").is_empty());

    Ok(())
}

#[tokio::test]
async fn e2e_film_error_contract() -> anyhow::Result<()> {
    let app = start_server().await?;
    let http = client();

    let only_actor = create_actor(&http, &app.base_url, "Tom Cruise").await?;

    // Actor list is required; empty is fine, absent is not
    let res = http
        .post(format!("{}/film", app.base_url))
        .json(&json!({ "name": "Edge of Tomorrow" }))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    // Unknown actor id: 404 and no film row is left behind
    let res = http
        .post(format!("{}/film", app.base_url))
        .json(&json!({ "name": "Edge of Tomorrow", "actors": [only_actor + 1] }))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let res = http.get(format!("{}/films", app.base_url)).send().await?;
    assert!(res.json::<Vec<serde_json::Value>>().await?.is_empty());

    // Oversized name
    let res = http
        .post(format!("{}/film", app.base_url))
        .json(&json!({ "name": "x".repeat(256), "actors": [] }))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    // Duplicate film name is a conflict-class client error
    let res = http
        .post(format!("{}/film", app.base_url))
        .json(&json!({ "name": "Edge of Tomorrow", "actors": [only_actor] }))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let res = http
        .post(format!("{}/film", app.base_url))
        .json(&json!({ "name": "Edge of Tomorrow", "actors": [] }))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert!(body["error"].as_str().expect("error message").contains("already"));

    Ok(())
}
