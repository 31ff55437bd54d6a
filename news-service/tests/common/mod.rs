#![allow(dead_code)]

use news_service::config::{NewsConfig, RedisConfig};
use news_service::services::{InMemoryNewsStore, NewsStore};
use news_service::Application;
use service_core::config as core_config;
use std::sync::Arc;

pub fn test_config() -> NewsConfig {
    NewsConfig {
        common: core_config::Config {
            port: 0, // Random port
            log_level: "debug".to_string(),
            otlp_endpoint: None,
        },
        service_name: "news-service-test".to_string(),
        service_version: env!("CARGO_PKG_VERSION").to_string(),
        redis: RedisConfig::default(),
    }
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub store: Arc<InMemoryNewsStore>,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Spawn the real server on a random port, backed by an in-memory store.
    pub async fn spawn() -> Self {
        let store = Arc::new(InMemoryNewsStore::new());
        let (address, port) = spawn_with_store(store.clone()).await;

        TestApp {
            address,
            port,
            store,
            client: reqwest::Client::new(),
        }
    }

    pub async fn get_health(&self) -> reqwest::Response {
        self.client
            .get(format!("{}/health", self.address))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_news(&self) -> reqwest::Response {
        self.client
            .get(format!("{}/news", self.address))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn list_news(&self) -> Vec<serde_json::Value> {
        let response = self.get_news().await;
        assert_eq!(response.status().as_u16(), 200);
        response.json().await.expect("Failed to parse JSON")
    }

    pub async fn post_news(&self, body: &serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}/news", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_raw(&self, body: &'static str) -> reqwest::Response {
        self.client
            .post(format!("{}/news", self.address))
            .body(body)
            .send()
            .await
            .expect("Failed to execute request")
    }
}

/// Build and spawn an application over `store`; returns its base URL and port.
pub async fn spawn_with_store(store: Arc<dyn NewsStore>) -> (String, u16) {
    let app = Application::build_with_store(test_config(), store)
        .await
        .expect("Failed to build test application");

    let port = app.port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        app.run_until_stopped().await.ok();
    });

    // Wait for the server to accept connections
    let client = reqwest::Client::new();
    let health_url = format!("{}/health", address);
    for _ in 0..50 {
        if client.get(&health_url).send().await.is_ok() {
            break;
        }
        tokio::time::sleep(tokio::time::Duration::from_millis(20)).await;
    }

    (address, port)
}

pub fn now_seconds() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock before epoch")
        .as_secs_f64()
}
