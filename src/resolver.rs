// Learnify Topic Resolver - Keyword → Video Asset
// Copyright (c) 2026 Xing_The_Creator | Learnify

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};

/// Built-in lesson table. Order is match priority.
pub const BUILTIN_TOPICS: &[(&str, &str)] = &[
    ("variables", "variables.mp4"),
    ("loop", "loop.mp4"),
    ("print", "print.mp4"),
    ("if-else", "if-else.mp4"),
    ("break-continue", "break-continue.mp4"),
];

/// Ordered keyword → filename table. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct TopicMapping {
    entries: Vec<(String, String)>,
}

impl TopicMapping {
    /// The five beginner topics shipped with the app.
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN_TOPICS
                .iter()
                .map(|(k, f)| (k.to_string(), f.to_string()))
                .collect(),
        }
    }

    /// Build a mapping from explicit entries, keeping their order.
    /// Keys must be unique.
    pub fn from_entries<K, F>(entries: impl IntoIterator<Item = (K, F)>) -> Result<Self>
    where
        K: Into<String>,
        F: Into<String>,
    {
        let mut out: Vec<(String, String)> = Vec::new();
        for (key, file) in entries {
            let key = key.into();
            if out.iter().any(|(k, _)| *k == key) {
                bail!("Duplicate topic keyword '{}'", key);
            }
            out.push((key, file.into()));
        }
        Ok(Self { entries: out })
    }

    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, f)| (k.as_str(), f.as_str()))
    }

    pub fn filename_for(&self, keyword: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == keyword)
            .map(|(_, f)| f.as_str())
    }
}

impl Default for TopicMapping {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Outcome of resolving a query against the mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(PathBuf),
    NotFound,
}

impl Resolution {
    pub fn asset(&self) -> Option<&Path> {
        match self {
            Resolution::Found(path) => Some(path.as_path()),
            Resolution::NotFound => None,
        }
    }
}

/// Maps free-text queries onto lesson videos.
///
/// Matching is plain substring containment on the lowercased query, walking
/// keywords in table order. No word boundaries: "forloop" hits `loop`, and
/// "loop and print" hits `loop` because it is declared first.
#[derive(Debug, Clone)]
pub struct TopicResolver {
    mapping: TopicMapping,
    base_dir: PathBuf,
}

impl TopicResolver {
    pub fn new(mapping: TopicMapping, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            mapping,
            base_dir: base_dir.into(),
        }
    }

    /// Resolver over the built-in table.
    pub fn builtin(base_dir: impl Into<PathBuf>) -> Self {
        Self::new(TopicMapping::builtin(), base_dir)
    }

    pub fn mapping(&self) -> &TopicMapping {
        &self.mapping
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Total over all inputs; never fails.
    pub fn resolve(&self, query: &str) -> Resolution {
        self.matched_keyword(query)
            .and_then(|keyword| self.mapping.filename_for(keyword))
            .map(|file| Resolution::Found(self.base_dir.join(file)))
            .unwrap_or(Resolution::NotFound)
    }

    /// First keyword, in table order, contained in the lowercased query.
    pub fn matched_keyword(&self, query: &str) -> Option<&str> {
        let normalized = query.to_lowercase();
        self.mapping.keywords().find(|k| normalized.contains(k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_order() {
        let mapping = TopicMapping::builtin();
        let keys: Vec<&str> = mapping.keywords().collect();
        assert_eq!(
            keys,
            vec!["variables", "loop", "print", "if-else", "break-continue"]
        );
        assert_eq!(mapping.filename_for("if-else"), Some("if-else.mp4"));
        assert_eq!(mapping.filename_for("recursion"), None);
    }

    #[test]
    fn test_duplicate_keywords_rejected() {
        let res = TopicMapping::from_entries([("loop", "a.mp4"), ("loop", "b.mp4")]);
        assert!(res.is_err());
    }

    #[test]
    fn test_custom_order_decides_ties() {
        let mapping =
            TopicMapping::from_entries([("print", "print.mp4"), ("loop", "loop.mp4")]).unwrap();
        let resolver = TopicResolver::new(mapping, "clips");
        assert_eq!(
            resolver.resolve("loop and print"),
            Resolution::Found(PathBuf::from("clips").join("print.mp4"))
        );
    }

    #[test]
    fn test_matched_keyword() {
        let resolver = TopicResolver::builtin("videos/");
        assert_eq!(resolver.matched_keyword("BREAK-CONTINUE please"), Some("break-continue"));
        assert_eq!(resolver.matched_keyword("break and continue"), None);
    }

    #[test]
    fn test_empty_mapping_never_matches() {
        let mapping = TopicMapping::from_entries(Vec::<(String, String)>::new()).unwrap();
        assert!(mapping.keywords().next().is_none());
        let resolver = TopicResolver::new(mapping, "videos/");
        assert_eq!(resolver.resolve("loop"), Resolution::NotFound);
    }
}
