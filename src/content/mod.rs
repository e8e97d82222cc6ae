//! Content registry backed by `XDash HDD/layout.json`
//!
//! The layout file is a flat JSON object mapping display names to paths
//! relative to the HDD directory. Entry order follows the file.

pub mod watcher;

use crate::error::ContentError;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub use watcher::LayoutWatcher;

/// One launchable item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentEntry {
    pub name: String,
    /// Path relative to the HDD directory, as written in the layout file
    pub path: String,
}

/// Ordered, name-keyed list of content entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentRegistry {
    entries: Vec<ContentEntry>,
}

impl ContentRegistry {
    /// Load the registry from a layout file
    pub fn load(path: &Path) -> Result<Self, ContentError> {
        if !path.exists() {
            return Err(ContentError::NotFound(path.to_path_buf()));
        }

        let text = std::fs::read_to_string(path).map_err(|source| ContentError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let registry = Self::parse(&text, path)?;
        info!(
            "Loaded {} content entries from {}",
            registry.len(),
            path.display()
        );
        Ok(registry)
    }

    /// Parse layout JSON; `origin` is only used in error messages
    pub fn parse(text: &str, origin: &Path) -> Result<Self, ContentError> {
        let value: Value = serde_json::from_str(text).map_err(|source| ContentError::Malformed {
            path: origin.to_path_buf(),
            source,
        })?;

        let Value::Object(map) = value else {
            return Err(ContentError::NotAnObject(origin.to_path_buf()));
        };

        let mut entries = Vec::with_capacity(map.len());
        for (name, value) in map {
            let path = match value {
                Value::String(path) if !name.trim().is_empty() && !path.trim().is_empty() => path,
                _ => return Err(ContentError::InvalidEntry { name }),
            };
            debug!("Content entry: {} -> {}", name, path);
            entries.push(ContentEntry { name, path });
        }

        if entries.is_empty() {
            return Err(ContentError::Empty(origin.to_path_buf()));
        }

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ContentEntry] {
        &self.entries
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&ContentEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name == name)
    }

    /// The preferred entry when it exists, otherwise the first one
    pub fn default_entry(&self, preferred: &str) -> Option<&ContentEntry> {
        self.get(preferred).or_else(|| self.entries.first())
    }

    /// Entry `delta` steps away from `name`, clamped to the list ends
    ///
    /// An unknown `name` counts as the first entry.
    pub fn neighbour(&self, name: &str, delta: isize) -> Option<&ContentEntry> {
        if self.entries.is_empty() {
            return None;
        }
        let current = self.index_of(name).unwrap_or(0) as isize;
        let last = self.entries.len() as isize - 1;
        let target = (current + delta).clamp(0, last) as usize;
        self.entries.get(target)
    }

    /// Absolute location of an entry's content under `hdd_dir`
    pub fn resolve(&self, name: &str, hdd_dir: &Path) -> Option<PathBuf> {
        self.get(name).map(|e| hdd_dir.join(&e.path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::TempDir;

    fn origin() -> PathBuf {
        PathBuf::from("layout.json")
    }

    fn sample() -> ContentRegistry {
        ContentRegistry::parse(
            r#"{"Dashboard": "dash.xex", "Halo 3": "games/halo3.iso", "Gears": "games/gears.iso"}"#,
            &origin(),
        )
        .unwrap()
    }

    #[test]
    fn test_preserves_file_order() {
        let registry = sample();
        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, vec!["Dashboard", "Halo 3", "Gears"]);
        assert_eq!(registry.index_of("Gears"), Some(2));
        assert!(registry.contains("Halo 3"));
        assert!(!registry.contains("halo 3"));
    }

    #[test]
    fn test_default_entry_fallback() {
        let registry = sample();
        assert_eq!(registry.default_entry("Halo 3").unwrap().name, "Halo 3");
        assert_eq!(registry.default_entry("Missing").unwrap().name, "Dashboard");
        assert_eq!(registry.default_entry("").unwrap().name, "Dashboard");
    }

    #[test]
    fn test_neighbour_clamps() {
        let registry = sample();
        assert_eq!(registry.neighbour("Dashboard", -1).unwrap().name, "Dashboard");
        assert_eq!(registry.neighbour("Dashboard", 1).unwrap().name, "Halo 3");
        assert_eq!(registry.neighbour("Gears", 1).unwrap().name, "Gears");
        assert_eq!(registry.neighbour("Gears", -5).unwrap().name, "Dashboard");
    }

    #[test]
    fn test_duplicate_name_keeps_first_position_last_path() {
        let registry =
            ContentRegistry::parse(r#"{"A": "a.iso", "B": "b.iso", "A": "c.iso"}"#, &origin())
                .unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["A", "B"]);

        let hdd = PathBuf::from("hdd");
        assert_eq!(registry.resolve("A", &hdd), Some(hdd.join("c.iso")));
    }

    #[test]
    fn test_resolve_joins_hdd_dir() {
        let registry = sample();
        let hdd = PathBuf::from("/base/XDash HDD");
        assert_eq!(
            registry.resolve("Halo 3", &hdd),
            Some(hdd.join("games/halo3.iso"))
        );
        assert_eq!(registry.resolve("Nope", &hdd), None);
    }

    #[test]
    fn test_rejects_bad_layouts() {
        let cases = [
            ("not json", "Malformed"),
            ("[\"a\", \"b\"]", "NotAnObject"),
            ("{}", "Empty"),
            ("{\"A\": 3}", "InvalidEntry"),
            ("{\"\": \"a.iso\"}", "InvalidEntry"),
            ("{\"A\": \"\"}", "InvalidEntry"),
        ];
        for (text, expected) in cases {
            let err = ContentRegistry::parse(text, &origin()).unwrap_err();
            let kind = match err {
                ContentError::Malformed { .. } => "Malformed",
                ContentError::NotAnObject(_) => "NotAnObject",
                ContentError::Empty(_) => "Empty",
                ContentError::InvalidEntry { .. } => "InvalidEntry",
                other => panic!("unexpected error for {text}: {other}"),
            };
            assert_eq!(kind, expected, "layout {text}");
        }
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("layout.json");
        assert!(matches!(
            ContentRegistry::load(&path),
            Err(ContentError::NotFound(_))
        ));

        std::fs::write(&path, r#"{"Dashboard": "dash.xex"}"#).unwrap();
        assert_eq!(ContentRegistry::load(&path).unwrap().len(), 1);
    }

    proptest! {
        #[test]
        fn prop_unique_names_yield_all_entries(
            names in proptest::collection::btree_set("[A-Za-z0-9 ]{1,12}", 1..20)
        ) {
            let names: Vec<String> = names
                .into_iter()
                .filter(|n| !n.trim().is_empty())
                .collect();
            prop_assume!(!names.is_empty());

            let mut map = serde_json::Map::new();
            for (i, name) in names.iter().enumerate() {
                map.insert(name.clone(), Value::String(format!("content/{i}.iso")));
            }
            let text = Value::Object(map).to_string();

            let registry = ContentRegistry::parse(&text, &origin()).unwrap();
            prop_assert_eq!(registry.len(), names.len());
            for name in &names {
                prop_assert!(registry.contains(name));
            }
        }
    }
}
