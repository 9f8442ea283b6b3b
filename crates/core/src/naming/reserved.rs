//! Reserved-word sets of the target language.

use std::collections::HashSet;
use std::sync::LazyLock;

use super::NameRole;

/// MATLAB keywords (output of `iskeyword`); illegal for every identifier role.
pub static RESERVED_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "break",
        "case",
        "catch",
        "classdef",
        "continue",
        "else",
        "elseif",
        "end",
        "for",
        "function",
        "global",
        "if",
        "otherwise",
        "parfor",
        "persistent",
        "return",
        "spmd",
        "switch",
        "try",
        "while",
    ]
    .into_iter()
    .collect()
});

/// Class-definition block keywords; legal elsewhere but not as property names.
pub static FIELD_RESERVED_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    ["properties", "methods", "events", "enumerators"]
        .into_iter()
        .collect()
});

/// Case-insensitive reserved-word check for the given role.
pub fn is_reserved(name: &str, role: NameRole) -> bool {
    let lower = name.to_ascii_lowercase();
    RESERVED_WORDS.contains(lower.as_str())
        || (role == NameRole::Field && FIELD_RESERVED_WORDS.contains(lower.as_str()))
}
