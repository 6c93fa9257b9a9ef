//! Batched name resolution
//!
//! - [`BatchResolver`] turns one [`IdSet`](duty_domain::IdSet) into one port call
//! - [`FanOut`] runs a resolver per entity kind concurrently under a
//!   [`FanOutPlan`] and merges the results

pub mod error;
pub mod fan_out;
pub mod resolver;

pub use error::EnrichError;
pub use fan_out::{BranchPolicy, FanOut, FanOutPlan};
pub use resolver::BatchResolver;
