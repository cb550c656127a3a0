//! axum-backed server.
//!
//! # Responsibilities
//! - Translate colon-syntax routes into axum's brace syntax
//! - Extract path parameters and buffer the body for each handler call
//! - Wrap the router in `TraceLayer` for request spans
//! - Answer synthetic requests through `tower::ServiceExt::oneshot`

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use axum::body::{Body, Bytes};
use axum::extract::{FromRequestParts, Path};
use axum::http::{Method, Request, Response, StatusCode};
use axum::routing::{on, MethodFilter};
use axum::Router;
use futures_util::future::BoxFuture;
use tokio::net::TcpListener;
use tower::ServiceExt;
use tower_http::trace::TraceLayer;

use super::pattern::colon_to_brace;
use super::response::{self, PendingResponse};
use super::{EngineError, EngineOptions, Handler, HttpEngine, Server, ServerError, TemplateStore};
use crate::observability::metrics;

const NAME: &str = "axum";

/// Server backed by an axum `Router`.
pub struct AxumServer {
    router: Router,
    options: EngineOptions,
}

impl AxumServer {
    pub fn new(options: EngineOptions) -> Self {
        Self {
            router: Router::new(),
            options,
        }
    }

    fn app(&self) -> Router {
        self.router.clone().layer(TraceLayer::new_for_http())
    }
}

impl Server for AxumServer {
    fn name(&self) -> &'static str {
        NAME
    }

    fn route(&mut self, method: Method, path: &str, handler: Handler) {
        let filter = match MethodFilter::try_from(method.clone()) {
            Ok(filter) => filter,
            Err(e) => {
                tracing::warn!(method = %method, path = path, error = %e, "Unsupported route method");
                return;
            }
        };

        let route = colon_to_brace(path);
        tracing::debug!(method = %method, pattern = %route, "Route registered");

        let templates = Arc::clone(&self.options.templates);
        let max_body = self.options.max_body_bytes;
        let endpoint = on(filter, move |request: Request<Body>| {
            dispatch(handler.clone(), Arc::clone(&templates), max_body, request)
        });

        self.router = std::mem::take(&mut self.router).route(&route, endpoint);
    }

    fn serve(
        self: Box<Self>,
        listener: TcpListener,
        shutdown: BoxFuture<'static, ()>,
    ) -> BoxFuture<'static, Result<(), ServerError>> {
        let app = self.app();
        Box::pin(async move {
            tracing::info!(address = ?listener.local_addr().ok(), engine = NAME, "HTTP server starting");

            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown)
                .await?;

            tracing::info!(engine = NAME, "HTTP server stopped");
            Ok(())
        })
    }

    fn test(&self, request: Request<Bytes>) -> BoxFuture<'_, Result<Response<Bytes>, ServerError>> {
        let app = self.app();
        Box::pin(async move {
            let response = match app.oneshot(request.map(Body::from)).await {
                Ok(response) => response,
                Err(never) => match never {},
            };
            let (parts, body) = response.into_parts();
            let bytes = axum::body::to_bytes(body, usize::MAX)
                .await
                .map_err(|e| ServerError::Body(e.to_string()))?;
            Ok(Response::from_parts(parts, bytes))
        })
    }
}

/// Request capability over an axum request.
struct AxumEngine {
    params: HashMap<String, String>,
    body: Bytes,
    templates: Arc<TemplateStore>,
    response: PendingResponse,
}

impl HttpEngine for AxumEngine {
    fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    fn status(&mut self, code: StatusCode) -> &mut dyn HttpEngine {
        self.response.status = code;
        self
    }

    fn write_json(&mut self, body: Vec<u8>) {
        self.response.set_json(body);
    }

    fn body(&self) -> &[u8] {
        &self.body
    }

    fn render(&mut self, name: &str, bind: &serde_json::Value) -> Result<(), EngineError> {
        let html = self.templates.render(name, bind)?;
        self.response.set_html(html);
        Ok(())
    }
}

async fn dispatch(
    handler: Handler,
    templates: Arc<TemplateStore>,
    max_body: usize,
    request: Request<Body>,
) -> Response<Body> {
    let start = Instant::now();
    let (mut parts, body) = request.into_parts();

    // Routes without parameters have nothing to extract.
    let params = match Path::<HashMap<String, String>>::from_request_parts(&mut parts, &()).await {
        Ok(Path(params)) => params,
        Err(_) => HashMap::new(),
    };

    let response = match axum::body::to_bytes(body, max_body).await {
        Ok(body) => {
            let mut engine = AxumEngine {
                params,
                body,
                templates,
                response: PendingResponse::default(),
            };
            match handler(&mut engine) {
                Ok(()) => engine.response.into_response(),
                Err(e) => {
                    tracing::error!(engine = NAME, path = %parts.uri.path(), error = %e, "Handler failed");
                    response::plain(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
                }
            }
        }
        Err(e) => {
            let inner = e.into_inner();
            tracing::warn!(engine = NAME, error = %inner, "Request body rejected");
            response::body_rejection(&*inner)
        }
    };

    metrics::record_request(NAME, &parts.method, response.status().as_u16(), start);
    response.map(Body::from)
}
