#![allow(dead_code)]

use cse_rs::CseClient;
use httpmock::{Method::POST, Mock, MockServer};
use serde_json::Value;
use url::Url;

pub fn setup_server() -> MockServer {
    MockServer::start()
}

/// A client whose API base is `/api/` and CDN base is `/cdn/` on `server`.
pub fn client_for(server: &MockServer) -> CseClient {
    CseClient::builder()
        .base_api(Url::parse(&server.url("/api/")).unwrap())
        .base_cdn(Url::parse(&server.url("/cdn/")).unwrap())
        .build()
        .unwrap()
}

/// Any POST to `/api/{endpoint}` answers `body` with status 200.
pub fn mock_endpoint<'a>(server: &'a MockServer, endpoint: &str, body: &Value) -> Mock<'a> {
    let path = format!("/api/{endpoint}");
    let body = body.to_string();
    server.mock(|when, then| {
        when.method(POST).path(path);
        then.status(200)
            .header("content-type", "application/json")
            .body(body);
    })
}

/// Any POST to `/api/{endpoint}` answers with `status` and an empty JSON object.
pub fn mock_status<'a>(server: &'a MockServer, endpoint: &str, status: u16) -> Mock<'a> {
    let path = format!("/api/{endpoint}");
    server.mock(|when, then| {
        when.method(POST).path(path);
        then.status(status)
            .header("content-type", "application/json")
            .body("{}");
    })
}
