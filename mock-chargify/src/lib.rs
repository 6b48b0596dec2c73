//! Mock Chargify Direct - HTTP test double for the Chargify Direct callbacks
//!
//! Serves two endpoints so integration suites can exercise a signup flow
//! without reaching the real gateway:
//!
//! - `/signups` redirects to the application under test with a
//!   HMAC-SHA1-signed callback query string
//! - `/calls` returns a canned call lookup JSON document

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod services;
pub mod signing;
pub mod state;

pub use config::MockConfig;
pub use error::MockError;
pub use error::MockResult;
pub use router::create_router;
pub use server::MockChargifyServer;
pub use signing::Parameter;
pub use signing::SignedParameterSet;
pub use state::AppState;
