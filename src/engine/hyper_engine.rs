//! Bare hyper server.
//!
//! # Responsibilities
//! - Accept TCP connections and serve HTTP/1.1 with `hyper::server::conn::http1`
//! - Match colon-syntax routes with the crate's own `RouteTable`
//! - Enforce the body limit while collecting `Incoming`
//! - Answer synthetic requests by dispatching straight into the table
//!
//! # Design Decisions
//! - One spawned task per connection; shutdown stops the accept loop and lets
//!   in-flight connections finish
//! - Unknown path → 404, known path with another method → 405

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Instant;

use futures_util::future::BoxFuture;
use http_body_util::{BodyExt, Full, Limited};
use hyper::body::{Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

use super::response::{self, PendingResponse};
use super::{EngineError, EngineOptions, Handler, HttpEngine, Server, ServerError, TemplateStore};
use crate::observability::metrics;
use crate::routing::{PathParams, RouteMatch, RouteTable};

const NAME: &str = "hyper";

/// Server running hyper's HTTP/1 connection driver directly.
pub struct HyperServer {
    routes: RouteTable,
    options: EngineOptions,
}

impl HyperServer {
    pub fn new(options: EngineOptions) -> Self {
        Self {
            routes: RouteTable::new(),
            options,
        }
    }

    async fn handle(&self, request: Request<Incoming>) -> Response<Bytes> {
        let start = Instant::now();
        let (parts, body) = request.into_parts();

        match Limited::new(body, self.options.max_body_bytes).collect().await {
            Ok(collected) => self.dispatch(&parts.method, parts.uri.path(), collected.to_bytes(), start),
            Err(e) => {
                tracing::warn!(engine = NAME, error = %e, "Request body rejected");
                let response = response::body_rejection(&*e);
                metrics::record_request(NAME, &parts.method, response.status().as_u16(), start);
                response
            }
        }
    }

    fn dispatch(&self, method: &Method, path: &str, body: Bytes, start: Instant) -> Response<Bytes> {
        let response = match self.routes.lookup(method, path) {
            RouteMatch::Found { handler, params } => {
                let mut engine = HyperEngine {
                    params,
                    body,
                    templates: &self.options.templates,
                    response: PendingResponse::default(),
                };
                match handler(&mut engine) {
                    Ok(()) => engine.response.into_response(),
                    Err(e) => {
                        tracing::error!(engine = NAME, path = path, error = %e, "Handler failed");
                        response::plain(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
                    }
                }
            }
            RouteMatch::MethodNotAllowed => {
                response::plain(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
            }
            RouteMatch::NotFound => response::plain(StatusCode::NOT_FOUND, "Not Found"),
        };

        metrics::record_request(NAME, method, response.status().as_u16(), start);
        response
    }
}

impl Server for HyperServer {
    fn name(&self) -> &'static str {
        NAME
    }

    fn route(&mut self, method: Method, path: &str, handler: Handler) {
        self.routes.insert(method, path, handler);
    }

    fn serve(
        self: Box<Self>,
        listener: TcpListener,
        mut shutdown: BoxFuture<'static, ()>,
    ) -> BoxFuture<'static, Result<(), ServerError>> {
        let server: Arc<HyperServer> = Arc::new(*self);
        Box::pin(async move {
            tracing::info!(address = ?listener.local_addr().ok(), engine = NAME, "HTTP server starting");

            loop {
                tokio::select! {
                    accepted = listener.accept() => {
                        let (stream, peer_addr) = match accepted {
                            Ok(accepted) => accepted,
                            Err(e) => {
                                tracing::warn!(error = %e, "Failed to accept connection");
                                continue;
                            }
                        };
                        tracing::trace!(peer_addr = %peer_addr, "Connection accepted");

                        let server = Arc::clone(&server);
                        tokio::spawn(async move {
                            let service = service_fn(move |request: Request<Incoming>| {
                                let server = Arc::clone(&server);
                                async move {
                                    let response = server.handle(request).await;
                                    Ok::<_, Infallible>(response.map(Full::new))
                                }
                            });

                            if let Err(e) = http1::Builder::new()
                                .serve_connection(TokioIo::new(stream), service)
                                .await
                            {
                                tracing::debug!(peer_addr = %peer_addr, error = %e, "Connection closed with error");
                            }
                        });
                    }
                    _ = &mut shutdown => {
                        break;
                    }
                }
            }

            tracing::info!(engine = NAME, "HTTP server stopped");
            Ok(())
        })
    }

    fn test(&self, request: Request<Bytes>) -> BoxFuture<'_, Result<Response<Bytes>, ServerError>> {
        Box::pin(async move {
            let start = Instant::now();
            let (parts, body) = request.into_parts();

            if body.len() > self.options.max_body_bytes {
                return Ok(response::plain(StatusCode::PAYLOAD_TOO_LARGE, "Request body too large"));
            }
            Ok(self.dispatch(&parts.method, parts.uri.path(), body, start))
        })
    }
}

/// Request capability over a buffered hyper request.
struct HyperEngine<'a> {
    params: PathParams,
    body: Bytes,
    templates: &'a TemplateStore,
    response: PendingResponse,
}

impl HttpEngine for HyperEngine<'_> {
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
