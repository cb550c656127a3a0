//! Response state accumulated by a handler.
//!
//! Both adapters collect the status and body here while the handler runs and
//! convert it into their own response type afterwards.

use http_body_util::LengthLimitError;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::{Response, StatusCode};

const JSON: &str = "application/json";
const HTML: &str = "text/html; charset=utf-8";
const TEXT: &str = "text/plain; charset=utf-8";

/// Status and body written so far.
#[derive(Debug, Clone)]
pub struct PendingResponse {
    pub status: StatusCode,
    pub body: Option<(HeaderValue, Bytes)>,
}

impl Default for PendingResponse {
    fn default() -> Self {
        Self {
            status: StatusCode::OK,
            body: None,
        }
    }
}

impl PendingResponse {
    pub fn set_json(&mut self, body: Vec<u8>) {
        self.body = Some((HeaderValue::from_static(JSON), Bytes::from(body)));
    }

    pub fn set_html(&mut self, body: String) {
        self.body = Some((HeaderValue::from_static(HTML), Bytes::from(body)));
    }

    /// Body to send, dropped for statuses that forbid one.
    pub fn into_parts(self) -> (StatusCode, Option<(HeaderValue, Bytes)>) {
        let body = match self.status {
            StatusCode::NO_CONTENT | StatusCode::NOT_MODIFIED => None,
            _ => self.body,
        };
        (self.status, body)
    }

    /// Finish into a buffered response.
    pub fn into_response(self) -> Response<Bytes> {
        let (status, body) = self.into_parts();
        let mut response = match body {
            Some((content_type, bytes)) => {
                let mut response = Response::new(bytes);
                response.headers_mut().insert(CONTENT_TYPE, content_type);
                response
            }
            None => Response::new(Bytes::new()),
        };
        *response.status_mut() = status;
        response
    }
}

/// Plain-text response for routing failures and handler errors.
pub fn plain(status: StatusCode, message: impl Into<String>) -> Response<Bytes> {
    let mut response = Response::new(Bytes::from(message.into()));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(TEXT));
    response
}

/// Status for a request body that could not be collected.
pub fn body_rejection(err: &(dyn std::error::Error + 'static)) -> Response<Bytes> {
    let mut source = Some(err);
    while let Some(e) = source {
        if e.is::<LengthLimitError>() {
            return plain(StatusCode::PAYLOAD_TOO_LARGE, "Request body too large");
        }
        source = e.source();
    }
    plain(StatusCode::BAD_REQUEST, "Failed to read request body")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_content_drops_body() {
        let mut pending = PendingResponse::default();
        pending.status = StatusCode::NO_CONTENT;
        pending.set_json(b"null".to_vec());

        let (status, body) = pending.into_parts();
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(body.is_none());
    }

    #[test]
    fn test_json_content_type() {
        let mut pending = PendingResponse::default();
        pending.set_json(b"[]".to_vec());

        let (status, body) = pending.into_parts();
        assert_eq!(status, StatusCode::OK);
        let (content_type, bytes) = body.unwrap();
        assert_eq!(content_type, "application/json");
        assert_eq!(&bytes[..], b"[]");
    }

    #[test]
    fn test_into_response_headers() {
        let mut pending = PendingResponse::default();
        pending.status = StatusCode::CREATED;
        pending.set_html("<p>hi</p>".to_string());

        let response = pending.into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()[CONTENT_TYPE], "text/html; charset=utf-8");
        assert_eq!(&response.body()[..], b"<p>hi</p>");
    }

    #[tokio::test]
    async fn test_body_rejection_status() {
        use http_body_util::{BodyExt, Full, Limited};

        let err = Limited::new(Full::new(Bytes::from_static(b"abcdef")), 2)
            .collect()
            .await
            .unwrap_err();
        assert_eq!(body_rejection(&*err).status(), StatusCode::PAYLOAD_TOO_LARGE);

        let io = std::io::Error::other("reset");
        assert_eq!(body_rejection(&io).status(), StatusCode::BAD_REQUEST);
    }
}
