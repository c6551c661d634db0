use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use server::routes::{self, ServerState};
use service::cupcake::repository::InMemoryCupcakeRepository;

struct TestApp {
    base_url: String,
}

/// Spin up the real router on an ephemeral port, backed by the in-memory
/// repository so no database is required.
async fn start_server() -> anyhow::Result<TestApp> {
    let state = ServerState { repo: Arc::new(InMemoryCupcakeRepository::new()) };
    let app: Router = routes::build_router(CorsLayer::very_permissive(), state);

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
async fn e2e_list_starts_empty() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(format!("{}/api/cupcakes", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["cupcakes"], json!([]));
    Ok(())
}

#[tokio::test]
async fn e2e_create_and_get() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c
        .post(format!("{}/api/cupcakes", app.base_url))
        .json(&json!({"flavor": "Chocolate", "rating": 4.5, "size": "medium", "image": "http://img/choc.png"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let body = res.json::<serde_json::Value>().await?;
    let cupcake = &body["cupcake"];
    assert_eq!(cupcake["flavor"], "Chocolate");
    assert_eq!(cupcake["size"], "medium");
    assert_eq!(cupcake["rating"].as_f64(), Some(4.5));
    assert_eq!(cupcake["image"], "http://img/choc.png");
    let id = cupcake["id"].as_i64().expect("integer id");

    let res = c.get(format!("{}/api/cupcakes/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["cupcake"]["id"].as_i64(), Some(id));
    assert_eq!(body["cupcake"]["flavor"], "Chocolate");

    let res = c.get(format!("{}/api/cupcakes/{}", app.base_url, id + 999)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_create_missing_field_rejected() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    // no rating
    let res = c
        .post(format!("{}/api/cupcakes", app.base_url))
        .json(&json!({"flavor": "Vanilla", "size": "large"}))
        .send()
        .await?;
    assert!(res.status().is_client_error());

    // empty flavor is present but blank; rejected by the presence validators
    let res = c
        .post(format!("{}/api/cupcakes", app.base_url))
        .json(&json!({"flavor": "", "rating": 5, "size": "large"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    // nothing was persisted
    let res = c.get(format!("{}/api/cupcakes", app.base_url)).send().await?;
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["cupcakes"], json!([]));
    Ok(())
}

#[tokio::test]
async fn e2e_patch_requires_full_field_set() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c
        .post(format!("{}/api/cupcakes", app.base_url))
        .json(&json!({"flavor": "Vanilla", "rating": 5, "size": "large"}))
        .send()
        .await?;
    let body = res.json::<serde_json::Value>().await?;
    let id = body["cupcake"]["id"].as_i64().expect("integer id");

    // partial body: rejected before any write
    let res = c
        .patch(format!("{}/api/cupcakes/{}", app.base_url, id))
        .json(&json!({"flavor": "Choc"}))
        .send()
        .await?;
    assert!(res.status().is_client_error());

    // record unchanged
    let res = c.get(format!("{}/api/cupcakes/{}", app.base_url, id)).send().await?;
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["cupcake"]["flavor"], "Vanilla");

    // unknown id with a complete body: 404
    let res = c
        .patch(format!("{}/api/cupcakes/{}", app.base_url, id + 999))
        .json(&json!({"flavor": "Choc", "rating": 3, "size": "small", "image": "http://x/y.png"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_cupcake_lifecycle() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    // Create with an empty image: the placeholder is stored instead
    let res = c
        .post(format!("{}/api/cupcakes", app.base_url))
        .json(&json!({"flavor": "Vanilla", "rating": 5, "size": "large", "image": ""}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["cupcake"]["image"], models::cupcake::DEFAULT_IMAGE_URL);
    let id = body["cupcake"]["id"].as_i64().expect("integer id");

    // Full overwrite via PATCH
    let res = c
        .patch(format!("{}/api/cupcakes/{}", app.base_url, id))
        .json(&json!({"flavor": "Choc", "rating": 3, "size": "small", "image": "http://x/y.png"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(
        body["cupcake"],
        json!({"id": id, "flavor": "Choc", "rating": 3.0, "size": "small", "image": "http://x/y.png"})
    );

    // Delete, then the id is gone
    let res = c.delete(format!("{}/api/cupcakes/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message"], "Deleted");

    let res = c.get(format!("{}/api/cupcakes/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let res = c.delete(format!("{}/api/cupcakes/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_list_reflects_creates_and_deletes() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let mut ids = Vec::new();
    for flavor in ["Vanilla", "Chocolate", "Lemon"] {
        let res = c
            .post(format!("{}/api/cupcakes", app.base_url))
            .json(&json!({"flavor": flavor, "rating": 4, "size": "medium"}))
            .send()
            .await?;
        assert_eq!(res.status(), HttpStatusCode::CREATED);
        let body = res.json::<serde_json::Value>().await?;
        ids.push(body["cupcake"]["id"].as_i64().expect("integer id"));
    }

    let res = c.delete(format!("{}/api/cupcakes/{}", app.base_url, ids[1])).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let res = c.get(format!("{}/api/cupcakes", app.base_url)).send().await?;
    let body = res.json::<serde_json::Value>().await?;
    let listed: Vec<i64> = body["cupcakes"]
        .as_array()
        .expect("array")
        .iter()
        .map(|m| m["id"].as_i64().expect("integer id"))
        .collect();
    assert_eq!(listed, vec![ids[0], ids[2]]);
    Ok(())
}

#[tokio::test]
async fn e2e_api_allows_cross_origin() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client()
        .get(format!("{}/api/cupcakes", app.base_url))
        .header("Origin", "http://elsewhere.example")
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert!(res.headers().contains_key("access-control-allow-origin"));
    Ok(())
}
