//! Error response body.

use serde::{Deserialize, Serialize};

use crate::customers::RepositoryError;
use crate::engine::EngineError;

/// JSON body for 4xx answers: `{"message": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseError {
    pub message: String,
}

impl ResponseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<RepositoryError> for ResponseError {
    fn from(err: RepositoryError) -> Self {
        Self::new(err.to_string())
    }
}

impl From<&EngineError> for ResponseError {
    fn from(err: &EngineError) -> Self {
        Self::new(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_body() {
        let body = serde_json::to_string(&ResponseError::from(RepositoryError::NotFound)).unwrap();
        assert_eq!(body, r#"{"message":"Customer not found"}"#);
    }
}
