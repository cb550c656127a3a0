//! Route registration.
//!
//! Builds a server of the requested kind and registers the customer API on
//! it. The route table is identical for every engine.

use std::sync::Arc;

use crate::customers::SharedRepository;
use crate::engine::{EngineKind, EngineOptions, Server};
use crate::http::handlers::{bind, CrmApp};

/// Create a server of `kind` with every CRM route registered.
pub fn new_server(repo: SharedRepository, kind: EngineKind, options: EngineOptions) -> Box<dyn Server> {
    let mut server = kind.build(options);
    let app = Arc::new(CrmApp::new(repo));

    server.get("/", bind(&app, CrmApp::home));
    server.get("/customers", bind(&app, CrmApp::get_customers));
    server.get("/customers/:id", bind(&app, CrmApp::get_customer_by_id));
    server.post("/customers", bind(&app, CrmApp::add_customer));
    server.put("/customers/:id", bind(&app, CrmApp::update_customer));
    server.delete("/customers/:id", bind(&app, CrmApp::delete_customer));

    tracing::debug!(engine = server.name(), "Routes registered");
    server
}
