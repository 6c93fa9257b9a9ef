//! Use cases (application services)

pub mod enrich_changes;
pub mod enrich_channels;
pub mod enrich_escalation_rules;
pub mod enrich_incidents;
pub mod enrich_timeline;
pub mod incident_alerts;
pub mod query_incidents;
pub mod query_members;
pub mod query_teams;
pub(crate) mod shared;
pub mod similar_incidents;
