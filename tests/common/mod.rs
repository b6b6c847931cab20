#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use tempfile::TempDir;
use uuid::Uuid;

use medrec_api::auth::{generate_jwt, Claims};
use medrec_api::database::{MemoryStore, RecordStore};
use medrec_api::services::UploadDir;
use medrec_api::state::AppState;

/// An in-process server on a free port, backed by the memory store and a
/// throwaway uploads directory. Lives as long as the test's runtime.
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub store: Arc<MemoryStore>,
    pub client: reqwest::Client,
    _uploads: TempDir,
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let uploads = TempDir::new().context("failed to create uploads dir")?;
        let store = Arc::new(MemoryStore::new());
        let shared: Arc<dyn RecordStore> = store.clone();
        let app = medrec_api::app(AppState::new(shared, UploadDir::new(uploads.path())));

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test port")?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let server = Self {
            port,
            base_url,
            store,
            client: reqwest::Client::new(),
            _uploads: uploads,
        };
        server.wait_ready(Duration::from_secs(5)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Bearer token for `user_id`, signed with the configured secret
pub fn token_for(user_id: Uuid) -> String {
    generate_jwt(&Claims::new(user_id)).expect("failed to sign test token")
}

pub fn hospitalization_body(entrance_date: &str) -> serde_json::Value {
    serde_json::json!({
        "entranceDate": entrance_date,
        "exitDate": null,
        "location": "Santa Casa",
        "reason": "Apendicite"
    })
}
