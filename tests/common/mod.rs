#![allow(dead_code)]

use std::net::SocketAddr;

use anyhow::{Context, Result};
use todos_api::app::{self, AppState};
use todos_api::config::AppConfig;

/// One server per test, each with its own empty stores
pub struct TestServer {
    pub addr: SocketAddr,
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn post_todo(&self, title: &str) -> Result<reqwest::Response> {
        let res = self
            .client
            .post(self.url("/todos"))
            .json(&serde_json::json!({ "title": title }))
            .send()
            .await?;
        Ok(res)
    }

    pub async fn get_todos(&self) -> Result<serde_json::Value> {
        let res = self.client.get(self.url("/todos")).send().await?;
        anyhow::ensure!(res.status().is_success(), "GET /todos returned {}", res.status());
        Ok(res.json().await?)
    }
}

pub async fn spawn_server() -> Result<TestServer> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let config = AppConfig::development();
    let state = AppState::from_config(&config).context("failed to wire mediator")?;
    let app = app::router(state, &config);

    // Port 0 lets the OS pick a free port for isolation
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .context("failed to bind test listener")?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("test server stopped: {}", e);
        }
    });

    Ok(TestServer {
        addr,
        base_url: format!("http://{}", addr),
        client: reqwest::Client::new(),
    })
}
