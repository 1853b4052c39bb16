//! Shared test fixtures.

#![allow(dead_code)]

use std::time::Duration;

use torikae_server::ServerConfig;

/// A relay server running in the test's runtime.
pub struct TestServer {
    port: u16,
}

impl TestServer {
    /// Spawn the server on the given port and wait until it answers.
    ///
    /// Each test uses its own port so tests can run in parallel.
    pub async fn start(port: u16) -> Self {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port,
        };
        tokio::spawn(async move {
            if let Err(e) = torikae_server::run_server(config).await {
                panic!("test server failed: {e}");
            }
        });

        let client = reqwest::Client::new();
        let health_url = format!("http://127.0.0.1:{port}/api/health");
        for _ in 0..50 {
            if let Ok(response) = client.get(&health_url).send().await
                && response.status().is_success()
            {
                return Self { port };
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        panic!("test server did not come up on port {port}");
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://127.0.0.1:{}/ws", self.port)
    }
}
