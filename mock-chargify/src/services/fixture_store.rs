//! Fixture loading for canned JSON responses
//!
//! Handlers never touch the filesystem directly; they ask a [`FixtureStore`]
//! for the bytes of a named fixture. [`DirectoryFixtureStore`] reads
//! `{dir}/{name}`, [`StaticFixtureStore`] serves from memory.

use crate::error::MockError;
use crate::error::MockResult;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::path::PathBuf;
use tracing::debug;

/// Loads fixture bytes by name
#[async_trait]
pub trait FixtureStore: Send + Sync {
    /// Return the raw bytes of `name`, or [`MockError::FixtureNotFound`]
    async fn load(&self, name: &str) -> MockResult<Vec<u8>>;
}

/// Reads fixtures from a directory on disk
#[derive(Debug, Clone)]
pub struct DirectoryFixtureStore {
    dir: PathBuf,
}

impl DirectoryFixtureStore {
    /// Create a store rooted at `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory fixtures are read from
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl FixtureStore for DirectoryFixtureStore {
    async fn load(&self, name: &str) -> MockResult<Vec<u8>> {
        // Names are plain file names; anything that could escape `dir` is refused.
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(MockError::fixture_not_found(name, "invalid fixture name"));
        }

        let path = self.dir.join(name);
        debug!(path = %path.display(), "Loading fixture");
        tokio::fs::read(&path)
            .await
            .map_err(|e| MockError::fixture_not_found(name, format!("{}: {e}", path.display())))
    }
}

/// In-memory fixtures
#[derive(Debug, Clone, Default)]
pub struct StaticFixtureStore {
    fixtures: HashMap<String, Vec<u8>>,
}

impl StaticFixtureStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a fixture, replacing any previous one with the same name
    pub fn with_fixture(mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.fixtures.insert(name.into(), bytes.into());
        self
    }
}

#[async_trait]
impl FixtureStore for StaticFixtureStore {
    async fn load(&self, name: &str) -> MockResult<Vec<u8>> {
        self.fixtures
            .get(name)
            .cloned()
            .ok_or_else(|| MockError::fixture_not_found(name, "not registered"))
    }
}
