//! Path-to-label translation.

use std::collections::HashMap;

use crate::graph::Entity;

/// Stock labels keyed by `<gender initial>.<path>`.
const LABELS: &[(&str, &str)] = &[
    ("m.c", "son"),
    ("f.c", "daughter"),
    ("m.p", "father"),
    ("f.p", "mother"),
    ("m.pS", "father"),
    ("f.pS", "mother"),
    ("m.s", "brother"),
    ("f.s", "sister"),
    ("m.pc", "brother"),
    ("f.pc", "sister"),
    ("m.S", "husband"),
    ("f.S", "wife"),
    ("m.pp", "grandfather"),
    ("f.pp", "grandmother"),
    ("m.ppS", "grandfather"),
    ("f.ppS", "grandmother"),
    ("m.cc", "grandson"),
    ("f.cc", "granddaughter"),
    ("m.ccc", "great-grandson"),
    ("f.ccc", "great-granddaughter"),
    ("m.ps", "uncle"),
    ("f.ps", "aunt"),
    ("m.psS", "uncle"),
    ("f.psS", "aunt"),
    ("m.ppc", "uncle"),
    ("f.ppc", "aunt"),
    ("m.ppcS", "uncle"),
    ("f.ppcS", "aunt"),
    ("m.sc", "nephew"),
    ("f.sc", "niece"),
    ("m.pcc", "nephew"),
    ("f.pcc", "niece"),
    ("m.psc", "cousin"),
    ("f.psc", "cousin"),
    ("m.ppcc", "cousin"),
    ("f.ppcc", "cousin"),
    ("m.cS", "son-in-law"),
    ("f.cS", "daughter-in-law"),
    ("m.sS", "brother-in-law"),
    ("f.sS", "sister-in-law"),
    ("m.pcS", "brother-in-law"),
    ("f.pcS", "sister-in-law"),
];

/// Turns an ancestry path into a kinship label for an entity of a given gender.
#[derive(Debug, Clone)]
pub struct PathTranslator {
    labels: HashMap<String, String>,
}

impl Default for PathTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl PathTranslator {
    /// Translator with the stock label table.
    pub fn new() -> Self {
        let labels = LABELS
            .iter()
            .map(|&(key, label)| (key.to_string(), label.to_string()))
            .collect();
        Self { labels }
    }

    /// Stock table with `overrides` added or replacing entries (keys as `<g>.<path>`).
    ///
    /// The gender initial is lowercased to match [`PathTranslator::key`]; the path is kept
    /// as given since `s` and `S` differ.
    pub fn with_overrides<I, K, V>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut translator = Self::new();
        translator
            .labels
            .extend(overrides.into_iter().map(|(k, v)| (normalize_key(k.into()), v.into())));
        translator
    }

    /// Lookup key: first letter of `gender`, lowercased, then `.` and the path.
    pub fn key(gender: &str, path: &str) -> Option<String> {
        let initial = gender.chars().next()?.to_lowercase();
        Some(format!("{}.{}", initial, path))
    }

    /// Label for `path`, or the path itself when no entry matches or gender is unknown.
    pub fn translate(&self, gender: Option<&str>, path: &str) -> String {
        gender
            .and_then(|g| Self::key(g, path))
            .and_then(|key| self.labels.get(&key))
            .cloned()
            .unwrap_or_else(|| path.to_string())
    }

    /// Label for `path` using the entity's first `gender` value.
    pub fn label_for(&self, entity: &Entity, path: &str) -> String {
        self.translate(entity.first_attribute("gender"), path)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

fn normalize_key(key: String) -> String {
    match key.split_once('.') {
        Some((gender, path)) => format!("{}.{}", gender.to_lowercase(), path),
        None => key,
    }
}
