//! HTML template store for rendered pages.
//!
//! # Responsibilities
//! - Load `*.html` files from the static directory at startup
//! - Substitute `{{ .Key }}` / `{{ Key }}` placeholders from a JSON object
//!
//! # Design Decisions
//! - Templates are read once; rendering never touches the filesystem
//! - Substituted values are HTML-escaped
//! - Unknown keys render as the empty string

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use serde_json::Value;

use super::error::EngineError;

/// Named templates, keyed by file stem (`index.html` → `index`).
#[derive(Debug, Clone, Default)]
pub struct TemplateStore {
    templates: HashMap<String, String>,
}

impl TemplateStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `*.html` file in `dir`.
    ///
    /// A missing directory yields an empty store.
    pub fn load(dir: &Path) -> io::Result<Self> {
        let mut store = Self::new();

        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::warn!(dir = %dir.display(), "Template directory not found");
                return Ok(store);
            }
            Err(e) => return Err(e),
        };

        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("html") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let source = fs::read_to_string(&path)?;
            tracing::debug!(template = name, "Template loaded");
            store.insert(name, source);
        }

        Ok(store)
    }

    /// Register a template under `name`, replacing any previous one.
    pub fn insert(&mut self, name: impl Into<String>, source: impl Into<String>) {
        self.templates.insert(name.into(), source.into());
    }

    /// Number of loaded templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Render `name` with placeholders bound from `bind`.
    pub fn render(&self, name: &str, bind: &Value) -> Result<String, EngineError> {
        let source = self
            .templates
            .get(name)
            .ok_or_else(|| EngineError::TemplateNotFound(name.to_string()))?;

        let mut out = String::with_capacity(source.len());
        let mut rest = source.as_str();

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let Some(end) = after.find("}}") else {
                out.push_str(&rest[start..]);
                rest = "";
                break;
            };
            let key = after[..end].trim().trim_start_matches('.');
            out.push_str(&escape_html(&lookup(bind, key)));
            rest = &after[end + 2..];
        }
        out.push_str(rest);

        Ok(out)
    }
}

fn lookup(bind: &Value, key: &str) -> String {
    match bind.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
