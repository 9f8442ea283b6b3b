//! Length-bounded identifiers with stable, collision-free truncation.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use crate::error::{Error, Result};

/// Maximum identifier length accepted by the target language.
pub const MAX_IDENTIFIER_LEN: usize = 63;

/// Characters kept from `name + suffix` before the `_NNNN` counter.
const TRUNCATED_STEM_LEN: usize = 58;

/// Counter values available to a single stem (`0000`..=`9999`).
const COUNTER_LIMIT: u32 = 10_000;

/// Memo table of every truncation performed during one generation run.
///
/// Repeated requests for the same `(name, suffix)` pair always yield the same
/// identifier, and two different pairs never share one. A registry belongs to
/// exactly one run; hosts that process models in parallel must serialize
/// access (it needs `&mut self`).
#[derive(Debug, Default)]
pub struct TruncationRegistry {
    truncated: HashMap<(String, String), String>,
    issued: HashSet<String>,
}

impl TruncationRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Join `name` and `suffix`, truncating to [`MAX_IDENTIFIER_LEN`] when needed.
    ///
    /// Over-length pairs become the first `58 - len(suffix)` characters of
    /// `name`, then `suffix`, then `_` and a four-digit counter picked so the
    /// result was never issued for any other pair.
    pub fn truncate(&mut self, name: &str, suffix: &str) -> Result<String> {
        let suffix_len = suffix.chars().count();
        if name.chars().count() + suffix_len <= MAX_IDENTIFIER_LEN {
            return Ok(format!("{name}{suffix}"));
        }

        let key = (name.to_string(), suffix.to_string());
        if let Some(existing) = self.truncated.get(&key) {
            return Ok(existing.clone());
        }

        // A suffix longer than the stem would push the counter past the limit.
        let kept_suffix: String = suffix.chars().take(TRUNCATED_STEM_LEN).collect();
        let prefix_len = TRUNCATED_STEM_LEN - kept_suffix.chars().count();
        let prefix: String = name.chars().take(prefix_len).collect();

        for counter in 0..COUNTER_LIMIT {
            let candidate = format!("{prefix}{kept_suffix}_{counter:04}");
            if self.issued.insert(candidate.clone()) {
                warn!(
                    name,
                    suffix,
                    truncated = %candidate,
                    "Identifier exceeds {MAX_IDENTIFIER_LEN} characters, truncating."
                );
                self.truncated.insert(key, candidate.clone());
                return Ok(candidate);
            }
        }

        Err(Error::TruncationExhausted {
            name: name.to_string(),
            suffix: suffix.to_string(),
            attempts: COUNTER_LIMIT,
        })
    }

    /// Previously issued truncation for a pair, if any.
    pub fn get(&self, name: &str, suffix: &str) -> Option<&str> {
        self.truncated
            .get(&(name.to_string(), suffix.to_string()))
            .map(String::as_str)
    }

    /// Number of truncations performed so far.
    pub fn len(&self) -> usize {
        self.truncated.len()
    }

    /// No truncation performed yet.
    pub fn is_empty(&self) -> bool {
        self.truncated.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn long_name(tail: &str) -> String {
        format!("{}{tail}", "a".repeat(66))
    }

    #[test]
    fn test_short_names_pass_through() {
        let mut registry = TruncationRegistry::new();
        assert_eq!(registry.truncate("Pet", "StatusEnum").unwrap(), "PetStatusEnum");

        let exactly_max = "b".repeat(MAX_IDENTIFIER_LEN);
        assert_eq!(registry.truncate(&exactly_max, "").unwrap(), exactly_max);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_long_name_gets_counter() {
        let mut registry = TruncationRegistry::new();
        let name = "c".repeat(64);
        let truncated = registry.truncate(&name, "").unwrap();
        assert_eq!(truncated, format!("{}_0000", "c".repeat(58)));
        assert_eq!(truncated.len(), MAX_IDENTIFIER_LEN);
        assert_eq!(registry.get(&name, ""), Some(truncated.as_str()));
    }

    #[test]
    fn test_shared_prefix_is_disambiguated() {
        let mut registry = TruncationRegistry::new();
        let first = long_name("1234");
        let second = long_name("5678");

        let a = registry.truncate(&first, "Enum").unwrap();
        let b = registry.truncate(&second, "Enum").unwrap();

        let stem = format!("{}Enum", "a".repeat(54));
        assert_eq!(a, format!("{stem}_0000"));
        assert_eq!(b, format!("{stem}_0001"));

        // Asking again never reshuffles the counters.
        assert_eq!(registry.truncate(&second, "Enum").unwrap(), b);
        assert_eq!(registry.truncate(&first, "Enum").unwrap(), a);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_pairs_are_not_concatenated_keys() {
        let mut registry = TruncationRegistry::new();
        let stem = "d".repeat(62);
        let a = registry.truncate(&format!("{stem}X"), "YZ").unwrap();
        let b = registry.truncate(&format!("{stem}XY"), "Z").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_oversized_suffix_is_clamped() {
        let mut registry = TruncationRegistry::new();
        let truncated = registry.truncate("Owner", &"s".repeat(70)).unwrap();
        assert_eq!(truncated, format!("{}_0000", "s".repeat(58)));
    }

    #[test]
    fn test_counter_exhaustion() {
        let mut registry = TruncationRegistry::new();
        let stem = "e".repeat(58);
        for counter in 0..COUNTER_LIMIT {
            registry.issued.insert(format!("{stem}_{counter:04}"));
        }

        let err = registry.truncate(&"e".repeat(70), "").unwrap_err();
        assert!(matches!(
            err,
            Error::TruncationExhausted {
                attempts: COUNTER_LIMIT,
                ..
            }
        ));
    }

    #[test]
    fn test_multibyte_names_truncate_on_char_boundaries() {
        let mut registry = TruncationRegistry::new();
        let name = "é".repeat(70);
        let truncated = registry.truncate(&name, "").unwrap();
        assert_eq!(truncated.chars().count(), MAX_IDENTIFIER_LEN);
    }

    proptest! {
        #[test]
        fn truncation_is_deterministic(name in "[a-z]{1,90}", suffix in "[A-Z]{0,12}") {
            let mut registry = TruncationRegistry::new();
            let first = registry.truncate(&name, &suffix).unwrap();
            let second = registry.truncate(&name, &suffix).unwrap();
            prop_assert_eq!(first.clone(), second);
            prop_assert!(first.chars().count() <= MAX_IDENTIFIER_LEN);
        }

        #[test]
        fn truncation_is_unique(
            pairs in prop::collection::hash_set(("[a-c]{60,70}", "[A-B]{0,3}"), 1..40)
        ) {
            let mut registry = TruncationRegistry::new();
            let mut outputs = HashSet::new();
            for (name, suffix) in &pairs {
                let truncated = registry.truncate(name, suffix).unwrap();
                prop_assert!(outputs.insert(truncated));
            }
        }
    }
}
