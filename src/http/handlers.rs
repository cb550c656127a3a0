//! Customer request handlers.
//!
//! Each handler reads its input through `HttpEngine`, makes one repository
//! call under the shared lock and writes a status plus JSON body.

use std::sync::{Arc, MutexGuard, PoisonError};

use hyper::StatusCode;
use serde_json::json;

use crate::customers::{CreateCustomer, CustomerRepository, SharedRepository, UpdateCustomer};
use crate::engine::{EngineError, Handler, HttpEngine, HttpEngineExt};
use crate::http::error::ResponseError;

/// Signature of a `CrmApp` handler method.
pub type AppHandler = fn(&CrmApp, &mut dyn HttpEngine) -> Result<(), EngineError>;

/// Handler set over a shared customer repository.
pub struct CrmApp {
    repo: SharedRepository,
}

impl CrmApp {
    pub fn new(repo: SharedRepository) -> Self {
        Self { repo }
    }

    fn repo(&self) -> MutexGuard<'_, dyn CustomerRepository + Send + 'static> {
        self.repo.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// `GET /`
    pub fn home(&self, c: &mut dyn HttpEngine) -> Result<(), EngineError> {
        c.render("index", &json!({ "Title": "Test, World!" }))
    }

    /// `GET /customers`
    pub fn get_customers(&self, c: &mut dyn HttpEngine) -> Result<(), EngineError> {
        let repo = self.repo();
        c.status(StatusCode::OK).json(repo.get_customers())
    }

    /// `GET /customers/:id`
    pub fn get_customer_by_id(&self, c: &mut dyn HttpEngine) -> Result<(), EngineError> {
        let id = c.params("id", "");
        let repo = self.repo();

        match repo.get_customer_by_id(&id) {
            Ok(customer) => c.status(StatusCode::OK).json(customer),
            Err(e) => {
                tracing::warn!(customer_id = %id, "Customer not found");
                c.status(StatusCode::NOT_FOUND).json(&ResponseError::from(e))
            }
        }
    }

    /// `POST /customers`
    ///
    /// Answers 201 with the decoded payload; the assigned id is not returned.
    pub fn add_customer(&self, c: &mut dyn HttpEngine) -> Result<(), EngineError> {
        let customer: CreateCustomer = match c.body_parser() {
            Ok(customer) => customer,
            Err(e) => return bad_request(c, &e),
        };

        let stored = self.repo().add_customer(customer.clone());
        tracing::info!(customer_id = %stored.id, "Customer created");

        c.status(StatusCode::CREATED).json(&customer)
    }

    /// `PUT /customers/:id`
    pub fn update_customer(&self, c: &mut dyn HttpEngine) -> Result<(), EngineError> {
        let update: UpdateCustomer = match c.body_parser() {
            Ok(update) => update,
            Err(e) => return bad_request(c, &e),
        };

        let id = c.params("id", "");
        let updated = self.repo().update_customer(&id, update);

        match updated {
            Ok(customer) => {
                tracing::debug!(customer_id = %id, "Customer updated");
                c.status(StatusCode::OK).json(&customer)
            }
            Err(e) => {
                tracing::warn!(customer_id = %id, "Customer not found");
                c.status(StatusCode::NOT_FOUND).json(&ResponseError::from(e))
            }
        }
    }

    /// `DELETE /customers/:id`
    pub fn delete_customer(&self, c: &mut dyn HttpEngine) -> Result<(), EngineError> {
        let id = c.params("id", "");
        let deleted = self.repo().delete_customer(&id);

        match deleted {
            Ok(()) => {
                tracing::info!(customer_id = %id, "Customer deleted");
                c.status(StatusCode::NO_CONTENT);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(customer_id = %id, "Customer not found");
                c.status(StatusCode::NOT_FOUND).json(&ResponseError::from(e))
            }
        }
    }
}

fn bad_request(c: &mut dyn HttpEngine, err: &EngineError) -> Result<(), EngineError> {
    tracing::warn!(error = %err, "Malformed request body");
    c.status(StatusCode::BAD_REQUEST).json(&ResponseError::from(err))
}

/// Turn a `CrmApp` method into an engine handler.
pub fn bind(app: &Arc<CrmApp>, f: AppHandler) -> Handler {
    let app = Arc::clone(app);
    Arc::new(move |c: &mut dyn HttpEngine| f(&app, c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customers::repository::{shared, SAMPLE_CUSTOMER_ID};
    use crate::customers::InMemoryCustomerRepository;
    use crate::engine::response::PendingResponse;

    /// Engine double that records what the handler wrote.
    #[derive(Default)]
    struct RecordingEngine {
        id: Option<String>,
        body: Vec<u8>,
        response: PendingResponse,
        rendered: Option<String>,
    }

    impl HttpEngine for RecordingEngine {
        fn param(&self, key: &str) -> Option<&str> {
            if key == "id" {
                self.id.as_deref()
            } else {
                None
            }
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

        fn render(&mut self, name: &str, _bind: &serde_json::Value) -> Result<(), EngineError> {
            self.rendered = Some(name.to_string());
            Ok(())
        }
    }

    impl RecordingEngine {
        fn with_id(id: &str) -> Self {
            Self {
                id: Some(id.to_string()),
                ..Default::default()
            }
        }

        fn with_body(mut self, body: &str) -> Self {
            self.body = body.as_bytes().to_vec();
            self
        }

        fn body_json(&self) -> serde_json::Value {
            let (_, body) = self.response.clone().into_parts();
            serde_json::from_slice(&body.expect("json body").1).unwrap()
        }
    }

    fn app() -> (CrmApp, SharedRepository) {
        let repo = shared(InMemoryCustomerRepository::seeded());
        (CrmApp::new(repo.clone()), repo)
    }

    #[test]
    fn test_get_by_id_not_found() {
        let (app, _) = app();
        let mut c = RecordingEngine::with_id("unknown-id");

        app.get_customer_by_id(&mut c).unwrap();
        assert_eq!(c.response.status, StatusCode::NOT_FOUND);
        assert_eq!(c.body_json(), json!({ "message": "Customer not found" }));
    }

    #[test]
    fn test_create_echoes_payload_without_id() {
        let (app, repo) = app();
        let mut c = RecordingEngine::default().with_body(
            r#"{"name":"Ada","role":"cto","email":"ada@example.com","phone":"1","contacted":false}"#,
        );

        app.add_customer(&mut c).unwrap();
        assert_eq!(c.response.status, StatusCode::CREATED);
        let body = c.body_json();
        assert_eq!(body["name"], "Ada");
        assert!(body.get("id").is_none());
        assert_eq!(repo.lock().unwrap().get_customers().len(), 2);
    }

    #[test]
    fn test_create_decode_failure_is_400() {
        let (app, repo) = app();
        let mut c = RecordingEngine::default().with_body(r#"{"name": 5}"#);

        app.add_customer(&mut c).unwrap();
        assert_eq!(c.response.status, StatusCode::BAD_REQUEST);
        assert!(c.body_json()["message"].as_str().unwrap().contains("invalid type"));
        assert_eq!(repo.lock().unwrap().get_customers().len(), 1);
    }

    #[test]
    fn test_update_checks_body_before_id() {
        let (app, _) = app();
        let mut c = RecordingEngine::with_id("unknown-id").with_body("{");

        app.update_customer(&mut c).unwrap();
        assert_eq!(c.response.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_delete_no_content() {
        let (app, repo) = app();
        let mut c = RecordingEngine::with_id(SAMPLE_CUSTOMER_ID);

        app.delete_customer(&mut c).unwrap();
        let (status, body) = c.response.into_parts();
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(body.is_none());
        assert!(repo.lock().unwrap().get_customers().is_empty());
    }

    #[test]
    fn test_home_renders_index() {
        let (app, _) = app();
        let mut c = RecordingEngine::default();

        app.home(&mut c).unwrap();
        assert_eq!(c.rendered.as_deref(), Some("index"));
    }
}
