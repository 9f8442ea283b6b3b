//! Role-specific identifier rewriting.

use tracing::{debug, warn};

use super::reserved::is_reserved;
use super::truncate::{MAX_IDENTIFIER_LEN, TruncationRegistry};
use super::{NameRole, camelize, camelize_lower};
use crate::error::Result;

/// Operator characters commonly found in property names, mapped to words.
const OPERATOR_WORDS: [(char, &str); 5] = [
    ('!', "not"),
    ('=', "eq"),
    ('>', "gt"),
    ('<', "lt"),
    ('~', "tilde"),
];

/// Sanitize `raw` into a legal identifier for `role`, truncating when needed.
///
/// Never returns an empty or illegal identifier: a name with nothing usable
/// left becomes the role's placeholder. The only error is truncation
/// exhaustion.
pub fn sanitize(raw: &str, role: NameRole, registry: &mut TruncationRegistry) -> Result<String> {
    match try_sanitize(raw, role, registry)? {
        Some(name) => Ok(name),
        None => {
            let placeholder = role.placeholder();
            if role.reports_anomalies() {
                warn!(
                    raw,
                    role = role.as_str(),
                    placeholder,
                    "Empty {} name not permitted, using placeholder.",
                    role.as_str()
                );
            } else {
                debug!(raw, placeholder, "Empty variable name, using placeholder.");
            }
            Ok(placeholder.to_string())
        }
    }
}

/// Like [`sanitize`], but yields `None` when no legal character survives.
pub fn try_sanitize(
    raw: &str,
    role: NameRole,
    registry: &mut TruncationRegistry,
) -> Result<Option<String>> {
    rewrite(raw, role)
        .map(|name| registry.truncate(&name, ""))
        .transpose()
}

/// Apply the role rules without truncation.
fn rewrite(raw: &str, role: NameRole) -> Option<String> {
    let mut name = raw.replace('$', "");

    if role.maps_operators() {
        for (op, word) in OPERATOR_WORDS {
            name = name.replace(op, word);
        }
    }

    name = strip_illegal(&name.replace('-', "_"));
    if name.is_empty() {
        return None;
    }

    if name.starts_with(|c: char| c.is_ascii_digit()) {
        let renamed = escape(&name, role);
        if role.reports_anomalies() {
            warn!(
                name = %name,
                renamed = %renamed,
                "{} name cannot start with a number, renaming.",
                role.as_str()
            );
        }
        name = renamed;
    }

    if name.starts_with('_') {
        name = format!("x{name}");
    }

    if is_reserved(&name, role) {
        let renamed = escape(&name, role);
        if role.reports_anomalies() {
            warn!(
                name = %name,
                renamed = %renamed,
                "Cannot use reserved word as {} name, renaming.",
                role.as_str()
            );
        }
        name = renamed;
    }

    if name != raw && !role.reports_anomalies() {
        debug!(raw, name = %name, "Variable name changed.");
    }

    Some(name)
}

/// Whether `name` is already a legal identifier for `role`.
pub fn is_legal_identifier(name: &str, role: NameRole) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    first.is_ascii_alphabetic()
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && name.len() <= MAX_IDENTIFIER_LEN
        && !is_reserved(name, role)
}

/// Prefix with the role marker, recasing for class-like roles.
fn escape(name: &str, role: NameRole) -> String {
    match role {
        NameRole::Model => camelize(&format!("model_{name}")),
        NameRole::Tag => camelize(&format!("api_{name}")),
        NameRole::Operation => camelize_lower(&format!("call_{name}")),
        NameRole::Field | NameRole::Parameter => format!("x{name}"),
    }
}

/// Map separators to `_` and drop everything outside `[A-Za-z0-9_]`.
fn strip_illegal(name: &str) -> String {
    name.chars()
        .filter_map(|c| match c {
            '[' | '(' | '.' => Some('_'),
            c if c.is_whitespace() => Some('_'),
            c if c.is_ascii_alphanumeric() || c == '_' => Some(c),
            _ => None,
        })
        .collect()
}
