//! Collaborators injected into the handlers

pub mod clock;
pub mod fixture_store;

pub use clock::Clock;
pub use clock::FixedClock;
pub use clock::SystemClock;
pub use fixture_store::DirectoryFixtureStore;
pub use fixture_store::FixtureStore;
pub use fixture_store::StaticFixtureStore;
