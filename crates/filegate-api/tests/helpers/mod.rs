//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p filegate-api`. No network access
//! is needed; generative routes are backed by [`MockProvider`].

#![allow(dead_code)]

pub mod fixtures;

use std::sync::Arc;

use axum_test::TestServer;
use filegate_api::setup::routes::setup_routes;
use filegate_api::state::AppState;
use filegate_core::{Config, FileCategory, FilegateConfig};
use filegate_gateway::test_helpers::MockProvider;
use filegate_gateway::GenerativeProvider;

/// JSON uploads are capped this low so oversize cases stay small.
pub const TEST_JSON_LIMIT_BYTES: usize = 1024;

pub fn test_config() -> Config {
    let mut config = FilegateConfig::default();
    config
        .upload_limits
        .insert(FileCategory::Json, TEST_JSON_LIMIT_BYTES);
    Config::new(config)
}

fn server_for(provider: Option<Arc<dyn GenerativeProvider>>) -> TestServer {
    let config = test_config();
    let state = Arc::new(AppState::with_provider(config.clone(), provider));
    let router = setup_routes(&config, state).expect("Failed to build router");
    TestServer::new(router).expect("Failed to start test server")
}

/// Server without an API key: every generative route answers 503.
pub fn setup_test_server() -> TestServer {
    server_for(None)
}

/// Server whose gateway is backed by `provider`. The returned handle lets
/// tests inspect the requests the gateway made.
pub fn setup_test_server_with(provider: MockProvider) -> (TestServer, Arc<MockProvider>) {
    let provider = Arc::new(provider);
    let server = server_for(Some(provider.clone()));
    (server, provider)
}
