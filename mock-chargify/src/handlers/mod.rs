//! HTTP handlers for the mock Chargify server

pub mod calls;
pub mod signup;

pub use calls::*;
pub use signup::*;
