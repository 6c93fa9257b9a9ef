//! Core domain concepts shared across all subdomains.
//!
//! - [`ids::IdSet`]: deduplicated foreign keys for one [`ids::EntityKind`]
//! - [`ids::ResolvedMap`]: identifier to resolved record
//! - [`string::truncate_body`]: log-safe body shortening

pub mod ids;
pub mod string;
