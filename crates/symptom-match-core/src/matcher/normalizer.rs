//! Symptom-name normalization.
//!
//! Catalog symptom names, eligibility rules and query input all pass through
//! [`normalize_symptom`] before any membership test:
//! - surrounding whitespace is trimmed
//! - internal whitespace runs collapse to a single space
//! - letters are lowercased (Unicode-aware, accents are kept)

use std::collections::BTreeSet;

/// Normalize one symptom name into its match key.
pub fn normalize_symptom(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// A de-duplicated, normalized set of query symptoms.
///
/// Iteration is in lexicographic order, so two sets built from the same
/// symptoms in any order or multiplicity are identical.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SymptomSet {
    keys: BTreeSet<String>,
}

impl SymptomSet {
    /// Build from raw user input. Names that normalize to nothing are dropped.
    pub fn from_query<I, S>(symptoms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keys = symptoms
            .into_iter()
            .map(|s| normalize_symptom(s.as_ref()))
            .filter(|s| !s.is_empty())
            .collect();
        Self { keys }
    }

    /// Membership test against an already-normalized key.
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    /// Sorted keys, each prefixed with its byte length (`5:febre5:tosse`).
    ///
    /// Keys may contain any character, so the length prefix is what keeps
    /// `{"a,b"}` and `{"a", "b"}` apart.
    pub fn canonical(&self) -> String {
        self.iter()
            .map(|key| format!("{}:{}", key.len(), key))
            .collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for SymptomSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_query(iter)
    }
}
