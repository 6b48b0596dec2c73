//! Shared application state for the mock Chargify server

use crate::config::MockConfig;
use crate::error::MockResult;
use crate::services::Clock;
use crate::services::DirectoryFixtureStore;
use crate::services::FixtureStore;
use crate::services::SystemClock;
use crate::signing::SigningZone;
use std::sync::Arc;

/// Shared application state passed to all handlers
///
/// Everything in here is read-only once constructed.
#[derive(Clone)]
pub struct AppState {
    /// Mock configuration
    pub config: Arc<MockConfig>,
    /// Time source for callback timestamps
    pub clock: Arc<dyn Clock>,
    /// Source of the canned `/calls` document
    pub fixtures: Arc<dyn FixtureStore>,
    /// Zone callback timestamps are rendered in
    pub time_zone: SigningZone,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("clock", &"<Clock>")
            .field("fixtures", &"<FixtureStore>")
            .field("time_zone", &self.time_zone)
            .finish()
    }
}

impl AppState {
    /// Create state with the system clock and fixtures read from
    /// `config.fixtures_dir`
    pub fn new(config: MockConfig) -> MockResult<Self> {
        let fixtures = DirectoryFixtureStore::new(config.fixtures_dir.clone());
        Self::with_collaborators(config, Arc::new(SystemClock), Arc::new(fixtures))
    }

    /// Create state with explicit clock and fixture store
    ///
    /// Fails with a configuration error before any request can be signed
    /// with bad credentials.
    pub fn with_collaborators(
        config: MockConfig,
        clock: Arc<dyn Clock>,
        fixtures: Arc<dyn FixtureStore>,
    ) -> MockResult<Self> {
        config.validate()?;
        let time_zone = config.signing_zone()?;
        Ok(Self {
            config: Arc::new(config),
            clock,
            fixtures,
            time_zone,
        })
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &MockConfig {
        &self.config
    }

    /// Get the clock
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Get the fixture store
    pub fn fixtures(&self) -> &dyn FixtureStore {
        self.fixtures.as_ref()
    }

    /// Zone callback timestamps are rendered in
    pub fn time_zone(&self) -> SigningZone {
        self.time_zone
    }
}
