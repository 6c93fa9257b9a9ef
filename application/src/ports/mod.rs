//! Port definitions (interfaces for external dependencies)
//!
//! Ports define the interfaces the application layer needs. Adapters in the
//! infrastructure layer implement them over HTTP; tests implement them with
//! in-memory mocks.

pub mod api_error;
pub mod directory;
pub mod incident_feed;
pub mod lookup;
