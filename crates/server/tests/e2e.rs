use std::net::SocketAddr;
use std::path::PathBuf;

use configs::AppConfig;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::json;
use tokio::net::TcpListener;
use uuid::Uuid;

use server::routes;

struct TestApp {
    base_url: String,
    data_dir: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.data_dir);
    }
}

async fn start_server(api_key: Option<&str>) -> anyhow::Result<TestApp> {
    // data dir is nested to exercise directory creation at startup
    let data_dir = std::env::temp_dir()
        .join(format!("csv_e2e_{}", Uuid::new_v4()))
        .join("data");
    let mut cfg = AppConfig::default();
    cfg.storage.data_dir = data_dir.clone();
    cfg.auth.api_key = api_key.map(str::to_string);

    let state = server::build_state(&cfg).await?;
    let app = routes::build_router(state);
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url, data_dir: data_dir.parent().map(PathBuf::from).unwrap_or(data_dir) })
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server(Some("secret123")).await?;
    let res = reqwest::get(format!("{}/health", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "healthy");
    Ok(())
}

#[tokio::test]
async fn e2e_default_then_write_then_read() -> anyhow::Result<()> {
    let app = start_server(None).await?;
    let c = reqwest::Client::new();
    let url = format!("{}/csv/user_points.csv", app.base_url);

    let res = c.get(&url).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.headers()["content-type"], "text/csv");
    assert_eq!(res.text().await?, "userAddress,projectId,points\n");

    let res = c.post(&url).json(&json!({"content": "0xabc,1,50\n"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<serde_json::Value>().await?, json!({"status": "ok"}));

    let res = c.get(&url).send().await?;
    assert_eq!(res.text().await?, "0xabc,1,50\n");

    let res = c
        .post(format!("{}/csv/other.csv", app.base_url))
        .json(&json!({"content": "x"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn e2e_bearer_secret_required_when_configured() -> anyhow::Result<()> {
    let app = start_server(Some("secret123")).await?;
    let c = reqwest::Client::new();
    let url = format!("{}/csv/user_points.csv", app.base_url);

    let res = c.get(&url).send().await?;
    assert_eq!(res.status(), HttpStatusCode::UNAUTHORIZED);
    assert_eq!(res.headers()["access-control-allow-origin"], "*");

    let res = c.get(&url).bearer_auth("secret123").send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let res = c.get(&url).header("Authorization", "secret123").send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn e2e_concurrent_readers_and_writers_see_whole_files() -> anyhow::Result<()> {
    let app = start_server(None).await?;
    let c = reqwest::Client::new();
    let url = format!("{}/csv/quest_completions.csv", app.base_url);
    let first = "0x1,p,q,true,1,\n".repeat(500);
    let second = "0x2,p,q,false,2,\n".repeat(700);

    let res = c.post(&url).json(&json!({"content": first})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let mut tasks = Vec::new();
    for i in 0..24 {
        let (c, url) = (c.clone(), url.clone());
        let (first, second) = (first.clone(), second.clone());
        tasks.push(tokio::spawn(async move {
            if i % 6 == 0 {
                let body = if i % 12 == 0 { &first } else { &second };
                let res = c.post(&url).json(&json!({"content": body})).send().await?;
                assert_eq!(res.status(), HttpStatusCode::OK);
            } else {
                let text = c.get(&url).send().await?.text().await?;
                assert!(text == first || text == second, "torn read of {} bytes", text.len());
            }
            Ok::<_, anyhow::Error>(())
        }));
    }
    for t in tasks {
        t.await??;
    }
    Ok(())
}

#[tokio::test]
async fn e2e_startup_fails_when_data_dir_cannot_be_created() -> anyhow::Result<()> {
    let blocker = std::env::temp_dir().join(format!("csv_blocker_{}", Uuid::new_v4()));
    std::fs::write(&blocker, b"not a directory")?;

    let mut cfg = AppConfig::default();
    cfg.storage.data_dir = blocker.join("data");
    assert!(server::build_state(&cfg).await.is_err());

    let _ = std::fs::remove_file(&blocker);
    Ok(())
}

#[tokio::test]
async fn e2e_run_stops_on_shutdown_signal() -> anyhow::Result<()> {
    // grab a free port, release it, then let `run` bind it
    let port = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?.local_addr()?.port();
    let root = std::env::temp_dir().join(format!("csv_run_{}", Uuid::new_v4()));

    let mut cfg = AppConfig::default();
    cfg.server.host = "127.0.0.1".into();
    cfg.server.port = port;
    cfg.storage.data_dir = root.clone();

    let (tx, rx) = tokio::sync::oneshot::channel::<()>();
    let handle = tokio::spawn(server::run(cfg, async move {
        let _ = rx.await;
    }));

    let url = format!("http://127.0.0.1:{port}/health");
    let mut healthy = false;
    for _ in 0..50 {
        if let Ok(res) = reqwest::get(&url).await {
            healthy = res.status() == HttpStatusCode::OK;
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }
    assert!(healthy, "server never answered /health");

    let _ = tx.send(());
    handle.await??;
    let _ = std::fs::remove_dir_all(&root);
    Ok(())
}
