//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store registered routes in order
//! - Look up the handler for a method and path
//! - Report 405 when only the method is wrong

use hyper::Method;

use super::matcher::{PathParams, PathPattern};
use crate::engine::Handler;

struct Route {
    method: Method,
    pattern: PathPattern,
    handler: Handler,
}

/// Result of a route lookup.
pub enum RouteMatch<'a> {
    Found {
        handler: &'a Handler,
        params: PathParams,
    },
    MethodNotAllowed,
    NotFound,
}

/// Ordered route table.
#[derive(Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a route.
    pub fn insert(&mut self, method: Method, pattern: &str, handler: Handler) {
        tracing::debug!(method = %method, pattern = pattern, "Route registered");
        self.routes.push(Route {
            method,
            pattern: PathPattern::parse(pattern),
            handler,
        });
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Find the first route matching `method` and `path`.
    pub fn lookup(&self, method: &Method, path: &str) -> RouteMatch<'_> {
        let mut path_known = false;

        for route in &self.routes {
            let Some(params) = route.pattern.matches(path) else {
                continue;
            };
            if route.method == *method {
                return RouteMatch::Found {
                    handler: &route.handler,
                    params,
                };
            }
            path_known = true;
        }

        if path_known {
            RouteMatch::MethodNotAllowed
        } else {
            RouteMatch::NotFound
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{EngineError, HttpEngine};
    use std::sync::Arc;

    fn respond_ok(_: &mut dyn HttpEngine) -> Result<(), EngineError> {
        Ok(())
    }

    fn noop() -> Handler {
        Arc::new(respond_ok)
    }

    #[test]
    fn test_lookup_found_with_params() {
        let mut table = RouteTable::new();
        table.insert(Method::GET, "/customers", noop());
        table.insert(Method::GET, "/customers/:id", noop());

        match table.lookup(&Method::GET, "/customers/abc") {
            RouteMatch::Found { params, .. } => assert_eq!(params["id"], "abc"),
            _ => panic!("expected match"),
        }
    }

    #[test]
    fn test_lookup_method_not_allowed() {
        let mut table = RouteTable::new();
        table.insert(Method::GET, "/customers", noop());

        assert!(matches!(
            table.lookup(&Method::PATCH, "/customers"),
            RouteMatch::MethodNotAllowed
        ));
    }

    #[test]
    fn test_lookup_not_found() {
        let mut table = RouteTable::new();
        table.insert(Method::GET, "/customers", noop());

        assert!(matches!(table.lookup(&Method::GET, "/orders"), RouteMatch::NotFound));
        assert_eq!(table.len(), 1);
    }
}
