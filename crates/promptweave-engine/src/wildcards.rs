/*
 * wildcards.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Wildcard resource loading.
//!
//! This module provides the trait and implementations for loading named
//! wildcard line-lists from various sources (filesystem, memory), plus the
//! per-engine cache in front of them.

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

/// Trait for reading named wildcard resources.
///
/// Implementations are responsible for locating the raw text of a wildcard
/// list given its name; the engine handles line splitting and caching.
pub trait WildcardSource {
    /// Stable identity of this source (e.g. the directory path).
    ///
    /// Participates in the stable-index wildcard hash, so two sources with
    /// different identities select independently under the same seed.
    fn identity(&self) -> &str;

    /// Read the raw text of the named resource.
    ///
    /// # Returns
    /// `Ok(None)` when the resource does not exist; a missing wildcard is
    /// not an error. Other I/O failures are real errors.
    fn read(&self, name: &str) -> io::Result<Option<String>>;
}

/// Source that reads `<dir>/<name>.txt` from the filesystem.
#[derive(Debug, Clone)]
pub struct FileSystemSource {
    dir: PathBuf,
    identity: String,
}

impl FileSystemSource {
    /// Create a source rooted at `dir`. The directory does not need to
    /// exist; every lookup then behaves like a missing resource.
    pub fn new(dir: impl Into<PathBuf>) -> FileSystemSource {
        let dir = dir.into();
        let identity = dir.to_string_lossy().into_owned();
        FileSystemSource { dir, identity }
    }
}

impl WildcardSource for FileSystemSource {
    fn identity(&self) -> &str {
        &self.identity
    }

    fn read(&self, name: &str) -> io::Result<Option<String>> {
        let path = self.dir.join(format!("{name}.txt"));
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error),
        }
    }
}

/// Source backed by an in-memory map.
///
/// Useful for testing and for scenarios where wildcard lists are bundled
/// into the application.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    entries: HashMap<String, String>,
}

impl MemorySource {
    /// Create a new empty memory source.
    pub fn new() -> MemorySource {
        MemorySource::default()
    }

    /// Add a resource. The content is split into lines on load, exactly
    /// like a file would be.
    pub fn add(&mut self, name: impl Into<String>, content: impl Into<String>) -> &mut MemorySource {
        self.entries.insert(name.into(), content.into());
        self
    }

    /// Create a source with the given resources.
    pub fn with_entries(
        entries: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
    ) -> MemorySource {
        let mut source = MemorySource::new();
        for (name, content) in entries {
            source.add(name, content);
        }
        source
    }
}

impl WildcardSource for MemorySource {
    fn identity(&self) -> &str {
        "memory"
    }

    fn read(&self, name: &str) -> io::Result<Option<String>> {
        Ok(self.entries.get(name).cloned())
    }
}

/// Cache of loaded wildcard lists, owned by one engine instance.
///
/// Entries live for the engine's lifetime. Two engines never share a cache,
/// so differently configured sources stay isolated.
pub(crate) struct WildcardStore {
    source: Box<dyn WildcardSource>,
    cache: HashMap<String, Arc<Vec<String>>>,
}

impl WildcardStore {
    pub(crate) fn new(source: Box<dyn WildcardSource>) -> WildcardStore {
        WildcardStore {
            source,
            cache: HashMap::new(),
        }
    }

    pub(crate) fn identity(&self) -> &str {
        self.source.identity()
    }

    /// Load the named list: trimmed, blank lines discarded, cached.
    /// A missing resource is an empty list.
    pub(crate) fn load(&mut self, name: &str) -> io::Result<Arc<Vec<String>>> {
        if let Some(lines) = self.cache.get(name) {
            return Ok(lines.clone());
        }

        let lines: Vec<String> = match self.source.read(name)? {
            Some(text) => text
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from)
                .collect(),
            None => Vec::new(),
        };
        tracing::debug!(name, lines = lines.len(), "Loaded wildcard list");

        let lines = Arc::new(lines);
        self.cache.insert(name.to_string(), lines.clone());
        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::io::Write;
    use std::rc::Rc;

    #[test]
    fn test_memory_source_lines_trimmed_and_filtered() {
        let source = MemorySource::with_entries([("color", "  red  \n\nblue\n   \ngreen\n")]);
        let mut store = WildcardStore::new(Box::new(source));
        let lines = store.load("color").unwrap();
        assert_eq!(*lines, vec!["red", "blue", "green"]);
    }

    #[test]
    fn test_missing_resource_is_empty_list() {
        let mut store = WildcardStore::new(Box::new(MemorySource::new()));
        assert!(store.load("missing").unwrap().is_empty());
    }

    #[test]
    fn test_load_is_cached() {
        struct CountingSource {
            reads: Rc<Cell<usize>>,
        }

        impl WildcardSource for CountingSource {
            fn identity(&self) -> &str {
                "counting"
            }

            fn read(&self, _name: &str) -> io::Result<Option<String>> {
                self.reads.set(self.reads.get() + 1);
                Ok(Some("a\nb".to_string()))
            }
        }

        let reads = Rc::new(Cell::new(0));
        let source = CountingSource {
            reads: reads.clone(),
        };
        let mut store = WildcardStore::new(Box::new(source));

        let lines = store.load("x").unwrap();
        assert_eq!(*lines, vec!["a", "b"]);
        store.load("x").unwrap();
        store.load("x").unwrap();
        assert_eq!(reads.get(), 1);

        // A different name is a different cache entry
        store.load("y").unwrap();
        assert_eq!(reads.get(), 2);
    }

    #[test]
    fn test_filesystem_source_reads_txt_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join("mood.txt")).unwrap();
        writeln!(file, "calm").unwrap();
        writeln!(file, "  stormy ").unwrap();
        writeln!(file).unwrap();
        drop(file);

        let source = FileSystemSource::new(dir.path());
        let mut store = WildcardStore::new(Box::new(source));
        let lines = store.load("mood").unwrap();
        assert_eq!(*lines, vec!["calm", "stormy"]);
        assert!(store.load("absent").unwrap().is_empty());
    }

    #[test]
    fn test_filesystem_source_missing_directory() {
        let source = FileSystemSource::new("/nonexistent/promptweave-test");
        let mut store = WildcardStore::new(Box::new(source));
        assert!(store.load("anything").unwrap().is_empty());
    }
}
