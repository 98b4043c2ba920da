use std::collections::HashMap;
use std::net::SocketAddr;

use axum::Router;
use reqwest::StatusCode as HttpStatusCode;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use server::contacts::AppState;
use server::routes;
use service::memory::contact_store::MemoryContactStore;

fn cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

struct TestApp {
    base_url: String,
}

async fn start_server() -> anyhow::Result<TestApp> {
    let store = MemoryContactStore::new();
    let state = AppState { store };

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
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_add_then_get_roundtrip() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c
        .post(format!("{}/api/contacts/add", app.base_url))
        .query(&[("name", "Alice"), ("phone", "555-1111")])
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.text().await?, "Contact Alice added successfully!");

    let res = c
        .get(format!("{}/api/contacts/get", app.base_url))
        .query(&[("name", "Alice")])
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.text().await?, "Alice's phone number is 555-1111");
    Ok(())
}

#[tokio::test]
async fn e2e_get_unknown_contact_reports_miss() -> anyhow::Result<()> {
    let app = start_server().await?;

    let res = client()
        .get(format!("{}/api/contacts/get", app.base_url))
        .query(&[("name", "Bob")])
        .send()
        .await?;
    // A miss is a normal 200 with a descriptive body, never an error status.
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.text().await?, "No contact found for Bob");
    Ok(())
}

#[tokio::test]
async fn e2e_overwrite_keeps_latest_phone() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    for phone in ["555-1111", "555-2222"] {
        let res = c
            .post(format!("{}/api/contacts/add", app.base_url))
            .query(&[("name", "Alice"), ("phone", phone)])
            .send()
            .await?;
        assert_eq!(res.status(), HttpStatusCode::OK);
    }

    let res = c
        .get(format!("{}/api/contacts/get", app.base_url))
        .query(&[("name", "Alice")])
        .send()
        .await?;
    assert_eq!(res.text().await?, "Alice's phone number is 555-2222");

    let res = c.get(format!("{}/api/contacts/all", app.base_url)).send().await?;
    let all = res.json::<HashMap<String, String>>().await?;
    assert_eq!(all.len(), 1);
    assert_eq!(all.get("Alice").map(String::as_str), Some("555-2222"));
    Ok(())
}

#[tokio::test]
async fn e2e_all_lists_every_contact() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    // A fresh server has nothing to list.
    let res = c.get(format!("{}/api/contacts/all", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let all = res.json::<HashMap<String, String>>().await?;
    assert!(all.is_empty());

    for (name, phone) in [("Alice", "555-1111"), ("Bob", "555-3333")] {
        let res = c
            .post(format!("{}/api/contacts/add", app.base_url))
            .query(&[("name", name), ("phone", phone)])
            .send()
            .await?;
        assert_eq!(res.status(), HttpStatusCode::OK);
    }

    let res = c.get(format!("{}/api/contacts/all", app.base_url)).send().await?;
    let all = res.json::<HashMap<String, String>>().await?;
    assert_eq!(all.len(), 2);
    assert_eq!(all.get("Alice").map(String::as_str), Some("555-1111"));
    assert_eq!(all.get("Bob").map(String::as_str), Some("555-3333"));
    Ok(())
}

#[tokio::test]
async fn e2e_missing_params_rejected() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    // Parameter presence is enforced by the extraction layer, not the store.
    let res = c.get(format!("{}/api/contacts/get", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    let res = c
        .post(format!("{}/api/contacts/add", app.base_url))
        .query(&[("name", "Alice")])
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn e2e_cors_preflight_allowed() -> anyhow::Result<()> {
    let app = start_server().await?;

    let res = client()
        .request(reqwest::Method::OPTIONS, format!("{}/api/contacts/add", app.base_url))
        .header("Origin", "http://example.com")
        .header("Access-Control-Request-Method", "POST")
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let allow_origin = res
        .headers()
        .get("access-control-allow-origin")
        .and_then(|v| v.to_str().ok());
    assert_eq!(allow_origin, Some("http://example.com"));
    Ok(())
}
