//! Shared utilities for the integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use hyper::body::Bytes;
use hyper::header::CONTENT_TYPE;
use hyper::{Method, Request, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crm_backend::customers::repository::{shared, SAMPLE_CUSTOMER_ID};
use crm_backend::customers::{InMemoryCustomerRepository, SharedRepository};
use crm_backend::engine::{EngineKind, EngineOptions, Server, TemplateStore};
use crm_backend::new_server;

/// Every engine the handlers must behave identically on.
pub const ENGINES: [EngineKind; 2] = [EngineKind::Axum, EngineKind::Hyper];

pub const SAMPLE_ID: &str = SAMPLE_CUSTOMER_ID;

/// Server of `kind` over the seeded repository, plus a handle to inspect it.
pub fn seeded_app(kind: EngineKind) -> (Box<dyn Server>, SharedRepository) {
    let repo = shared(InMemoryCustomerRepository::seeded());
    let mut templates = TemplateStore::new();
    templates.insert("index", "<h1>{{ .Title }}</h1>");
    let options = EngineOptions {
        templates: Arc::new(templates),
        ..Default::default()
    };
    (new_server(repo.clone(), kind, options), repo)
}

pub fn request(method: Method, uri: &str) -> Request<Bytes> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Bytes::new())
        .unwrap()
}

pub fn json_request<T: Serialize>(method: Method, uri: &str, payload: &T) -> Request<Bytes> {
    raw_request(method, uri, serde_json::to_vec(payload).unwrap())
}

pub fn raw_request(method: Method, uri: &str, body: impl Into<Bytes>) -> Request<Bytes> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

pub async fn send(server: &dyn Server, request: Request<Bytes>) -> Response<Bytes> {
    server.test(request).await.expect("in-process request failed")
}

pub fn parse_body<T: DeserializeOwned>(response: &Response<Bytes>) -> T {
    serde_json::from_slice(response.body()).unwrap_or_else(|e| {
        panic!(
            "error in parsing the body ({}): {:?}",
            e,
            String::from_utf8_lossy(response.body())
        )
    })
}

pub fn assert_status(kind: EngineKind, response: &Response<Bytes>, want: StatusCode) {
    assert_eq!(
        response.status(),
        want,
        "[{kind}] did not get correct status, body: {:?}",
        String::from_utf8_lossy(response.body())
    );
}

/// Reserve a free local port.
pub fn free_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}
