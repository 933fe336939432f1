#![allow(dead_code)]

use axum_test::TestServer;
use lynkly::config::Config;
use lynkly::routes;
use lynkly::state::AppState;

pub const TEST_BASE_URL: &str = "http://short.test";

pub fn test_config() -> Config {
    Config {
        base_url: TEST_BASE_URL.to_string(),
        ..Default::default()
    }
}

pub fn create_test_state() -> AppState {
    AppState::in_memory(TEST_BASE_URL)
}

pub fn create_test_server() -> TestServer {
    create_test_server_with(create_test_state())
}

pub fn create_test_server_with(state: AppState) -> TestServer {
    let app = routes::router(state, &test_config());
    TestServer::new(app).unwrap()
}

/// Shortens `url` through the API and returns the generated code.
pub async fn shorten(server: &TestServer, url: &str) -> String {
    let response = server.post("/api/v1/shorten").form(&[("url", url)]).await;
    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    let short_url = json["shortUrl"].as_str().unwrap();
    short_url.rsplit('/').next().unwrap().to_string()
}
