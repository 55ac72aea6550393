//! Naming utilities
//!
//! Member names arrive as declared in the processed class; node names in
//! the output tree are derived from them by stripping accessor prefixes
//! and sanitizing section titles.

/// Fallback node name for titles that sanitize to nothing
pub const DEFAULT_NODE_NAME: &str = "item";

const ACCESSOR_PREFIXES: [&str; 2] = ["get", "is"];

/// Strip a `get`/`is` accessor prefix from a member name and decapitalize
/// the remainder, so a field and its accessor resolve to the same node name
///
/// Decapitalization follows the JavaBeans convention: a remainder opening
/// with two uppercase letters is a leading acronym and stays intact, so
/// `getURL` pairs with a `URL` field. Names that do not look like accessors
/// pass through unchanged.
#[must_use]
pub fn strip_accessor_prefix(name: &str) -> String {
    for prefix in ACCESSOR_PREFIXES {
        if let Some(rest) = name.strip_prefix(prefix) {
            // "getter" and plain "get" are not accessors
            if let Some(first) = rest.chars().next() {
                if first.is_ascii_uppercase() {
                    if rest.chars().nth(1).is_some_and(|c| c.is_ascii_uppercase()) {
                        return rest.to_string();
                    }
                    let mut result = String::with_capacity(rest.len());
                    result.push(first.to_ascii_lowercase());
                    result.push_str(&rest[first.len_utf8()..]);
                    return result;
                }
            }
        }
    }
    name.to_string()
}

/// Derive a valid node name from a section title
///
/// Lowercases the title and collapses every run of characters outside
/// `[a-z0-9_-]` into a single underscore. An empty result falls back to
/// [`DEFAULT_NODE_NAME`].
#[must_use]
pub fn to_node_name(title: &str) -> String {
    let mut result = String::with_capacity(title.len());
    let mut gap = false;
    for c in title.chars() {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
            if gap && !result.is_empty() {
                result.push('_');
            }
            gap = false;
            result.push(c);
        } else {
            gap = true;
        }
    }
    if result.is_empty() {
        return DEFAULT_NODE_NAME.to_string();
    }
    result
}
