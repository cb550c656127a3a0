//! Path pattern matching.
//!
//! # Responsibilities
//! - Parse colon-syntax patterns (`/customers/:id`)
//! - Match request paths segment by segment (case-sensitive)
//! - Capture named parameters
//!
//! # Design Decisions
//! - Trailing slashes are significant (`/customers/` is not `/customers`)
//! - Parameter segments never match an empty segment
//! - Literals compare against the raw path; captured parameters are
//!   percent-decoded, and a capture that is not UTF-8 after decoding fails
//!   the match

use std::collections::HashMap;

use percent_encoding::percent_decode_str;

/// Parameters captured from a matched path.
pub type PathParams = HashMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A compiled route pattern.
#[derive(Debug, Clone)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Compile a colon-syntax pattern.
    pub fn parse(pattern: impl Into<String>) -> Self {
        let raw = pattern.into();
        let segments = split(&raw)
            .map(|seg| match seg.strip_prefix(':') {
                Some(name) if !name.is_empty() => Segment::Param(name.to_string()),
                _ => Segment::Literal(seg.to_string()),
            })
            .collect();
        Self { raw, segments }
    }

    /// The pattern as registered.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Match `path`, returning captured parameters on success.
    pub fn matches(&self, path: &str) -> Option<PathParams> {
        let mut params = PathParams::new();
        let mut parts = split(path);

        for segment in &self.segments {
            let part = parts.next()?;
            match segment {
                Segment::Literal(lit) if lit == part => {}
                Segment::Literal(_) => return None,
                Segment::Param(_) if part.is_empty() => return None,
                Segment::Param(name) => {
                    let value = percent_decode_str(part).decode_utf8().ok()?;
                    params.insert(name.clone(), value.into_owned());
                }
            }
        }

        if parts.next().is_some() {
            return None;
        }
        Some(params)
    }
}

fn split(path: &str) -> impl Iterator<Item = &str> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let empty = trimmed.is_empty();
    trimmed.split('/').filter(move |_| !empty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_match() {
        let pattern = PathPattern::parse("/customers");
        assert!(pattern.matches("/customers").is_some());
        assert!(pattern.matches("/customers/").is_none());
        assert!(pattern.matches("/Customers").is_none());
        assert!(pattern.matches("/customers/1").is_none());
    }

    #[test]
    fn test_root_match() {
        let pattern = PathPattern::parse("/");
        assert!(pattern.matches("/").is_some());
        assert!(pattern.matches("/customers").is_none());
    }

    #[test]
    fn test_param_capture() {
        let pattern = PathPattern::parse("/customers/:id");
        let params = pattern.matches("/customers/867836be").unwrap();
        assert_eq!(params.get("id").map(String::as_str), Some("867836be"));

        assert!(pattern.matches("/customers").is_none());
        assert!(pattern.matches("/customers/").is_none());
        assert!(pattern.matches("/customers/7/").is_none());
        assert!(pattern.matches("/customers/1/orders").is_none());
    }

    #[test]
    fn test_multiple_params() {
        let pattern = PathPattern::parse("/orgs/:org/customers/:id");
        let params = pattern.matches("/orgs/acme/customers/7").unwrap();
        assert_eq!(params["org"], "acme");
        assert_eq!(params["id"], "7");
    }

    #[test]
    fn test_param_is_percent_decoded() {
        let pattern = PathPattern::parse("/customers/:id");
        let params = pattern.matches("/customers/867836be%2Dba5f%20x").unwrap();
        assert_eq!(params["id"], "867836be-ba5f x");

        // %FF alone is not valid UTF-8
        assert!(pattern.matches("/customers/%FF").is_none());
        // literals are not decoded
        assert!(pattern.matches("/%63ustomers/1").is_none());
    }
}
