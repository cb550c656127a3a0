//! Route pattern translation.
//!
//! Routes are registered in colon syntax (`/customers/:id`). Engines whose
//! router expects brace syntax (`/customers/{id}`) rewrite the pattern at
//! registration time.

/// Rewrite every `:name` segment of `route` into `{name}`.
///
/// A parameter name is a run of ASCII letters, digits or underscores. A colon
/// not followed by a name character is left as is.
pub fn colon_to_brace(route: &str) -> String {
    let mut out = String::with_capacity(route.len() + 2);
    let mut chars = route.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != ':' {
            out.push(ch);
            continue;
        }

        let mut name = String::new();
        while let Some(&next) = chars.peek() {
            if is_name_char(next) {
                name.push(next);
                chars.next();
            } else {
                break;
            }
        }

        if name.is_empty() {
            out.push(':');
        } else {
            out.push('{');
            out.push_str(&name);
            out.push('}');
        }
    }

    out
}

pub(crate) fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}
