//
// Adapted from Air
// https://github.com/posit-dev/air/blob/affa92cd514525c4bab6c8c2ca251ea19414b89f/crates/workspace/src/resolve.rs
//
// MIT License - Posit PBC

use std::path::Path;
use std::path::PathBuf;

/// A value attached to the directory it was discovered in.
#[derive(Debug, Clone)]
pub struct Item<T> {
    path: PathBuf,
    value: T,
}

impl<T> Item<T> {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn value(&self) -> &T {
        &self.value
    }
}

/// Resolves a path to the value of its closest registered ancestor
/// directory, falling back to a default value.
#[derive(Debug)]
pub struct PathResolver<T> {
    fallback: T,
    items: Vec<Item<T>>,
}

impl<T> PathResolver<T> {
    pub fn new(fallback: T) -> Self {
        Self { fallback, items: Vec::new() }
    }

    pub fn fallback(&self) -> &T {
        &self.fallback
    }

    pub fn items(&self) -> &[Item<T>] {
        &self.items
    }

    /// Register `value` for `path`, replacing any value already registered
    /// for the same directory.
    pub fn add(&mut self, path: &Path, value: T) {
        if let Some(item) = self.items.iter_mut().find(|item| item.path == path) {
            item.value = value;
            return;
        }
        self.items.push(Item { path: path.to_path_buf(), value });
    }

    /// Value registered for the deepest ancestor of `path`.
    pub fn resolve(&self, path: &Path) -> Option<&Item<T>> {
        self.items
            .iter()
            .filter(|item| path.starts_with(&item.path))
            .max_by_key(|item| item.path.components().count())
    }

    pub fn resolve_or_fallback(&self, path: &Path) -> &T {
        self.resolve(path)
            .map(Item::value)
            .unwrap_or(&self.fallback)
    }
}
