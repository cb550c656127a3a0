//! HTTP engine abstraction.
//!
//! # Data Flow
//! ```text
//! Concrete server (axum_engine.rs / hyper_engine.rs)
//!     → match route, collect request body
//!     → wrap request in its HttpEngine adapter
//!     → Handler(&mut dyn HttpEngine)
//!     → PendingResponse (status + body) → engine response type
//! ```
//!
//! # Design Decisions
//! - Handlers only see `HttpEngine`; they never name a serving library
//! - Routes are registered in colon syntax; adapters translate if needed
//! - Every server can answer a synthetic request without a socket (`test`)
//! - Bodies are buffered before the handler runs, so handlers are synchronous

pub mod axum_engine;
pub mod error;
pub mod hyper_engine;
pub mod pattern;
pub mod response;
pub mod template;

use std::fmt;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use hyper::body::Bytes;
use hyper::{Method, Request, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

pub use axum_engine::AxumServer;
pub use error::{EngineError, ServerError};
pub use hyper_engine::HyperServer;
pub use template::TemplateStore;

/// Default request body limit (2 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Request/response capability handed to every handler.
pub trait HttpEngine {
    /// Named path parameter, if the matched route declares it.
    fn param(&self, key: &str) -> Option<&str>;

    /// Set the response status. Returns the engine for chaining.
    fn status(&mut self, code: StatusCode) -> &mut dyn HttpEngine;

    /// Set an already-encoded JSON response body.
    fn write_json(&mut self, body: Vec<u8>);

    /// Raw request body.
    fn body(&self) -> &[u8];

    /// Render a named template as the HTML response body.
    fn render(&mut self, name: &str, bind: &serde_json::Value) -> Result<(), EngineError>;

    /// Named path parameter, or `default` when absent.
    fn params(&self, key: &str, default: &str) -> String {
        self.param(key).unwrap_or(default).to_string()
    }
}

/// Typed helpers available on every engine, including `dyn HttpEngine`.
pub trait HttpEngineExt: HttpEngine {
    /// Encode `value` as the JSON response body.
    fn json<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), EngineError> {
        let body = serde_json::to_vec(value).map_err(EngineError::Encode)?;
        self.write_json(body);
        Ok(())
    }

    /// Decode the JSON request body into `T`.
    fn body_parser<T: DeserializeOwned>(&self) -> Result<T, EngineError> {
        serde_json::from_slice(self.body()).map_err(EngineError::Decode)
    }
}

impl<E: HttpEngine + ?Sized> HttpEngineExt for E {}

/// A request handler. Errors are answered with 500 by the engine.
pub type Handler = Arc<dyn Fn(&mut dyn HttpEngine) -> Result<(), EngineError> + Send + Sync>;

/// Route registration and serving, independent of the serving library.
pub trait Server: Send + Sync + 'static {
    /// Short engine name for logs and metrics.
    fn name(&self) -> &'static str;

    /// Register `handler` for `method` on a colon-syntax `path`.
    fn route(&mut self, method: Method, path: &str, handler: Handler);

    /// Serve connections from `listener` until `shutdown` resolves.
    fn serve(
        self: Box<Self>,
        listener: TcpListener,
        shutdown: BoxFuture<'static, ()>,
    ) -> BoxFuture<'static, Result<(), ServerError>>;

    /// Run one synthetic request through the route table without a socket.
    fn test(&self, request: Request<Bytes>) -> BoxFuture<'_, Result<Response<Bytes>, ServerError>>;

    fn get(&mut self, path: &str, handler: Handler) {
        self.route(Method::GET, path, handler);
    }

    fn post(&mut self, path: &str, handler: Handler) {
        self.route(Method::POST, path, handler);
    }

    fn put(&mut self, path: &str, handler: Handler) {
        self.route(Method::PUT, path, handler);
    }

    fn delete(&mut self, path: &str, handler: Handler) {
        self.route(Method::DELETE, path, handler);
    }

    /// Bind `addr` and serve until Ctrl+C.
    fn listen(self: Box<Self>, addr: String) -> BoxFuture<'static, Result<(), ServerError>> {
        Box::pin(async move {
            let listener = TcpListener::bind(&addr)
                .await
                .map_err(|source| ServerError::Bind { addr: addr.clone(), source })?;
            tracing::info!(address = %addr, engine = self.name(), "Listening for connections");
            self.serve(listener, Box::pin(crate::lifecycle::signals::shutdown_signal()))
                .await
        })
    }
}

/// Concrete serving library selected at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// axum router (brace parameter syntax).
    #[default]
    Axum,
    /// Bare hyper connection loop with the crate's own route table.
    Hyper,
}

impl EngineKind {
    /// Build an empty server of this kind.
    pub fn build(self, options: EngineOptions) -> Box<dyn Server> {
        match self {
            EngineKind::Axum => Box::new(AxumServer::new(options)),
            EngineKind::Hyper => Box::new(HyperServer::new(options)),
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineKind::Axum => write!(f, "axum"),
            EngineKind::Hyper => write!(f, "hyper"),
        }
    }
}

/// Settings shared by every engine.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    pub templates: Arc<TemplateStore>,
    pub max_body_bytes: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            templates: Arc::new(TemplateStore::new()),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}
