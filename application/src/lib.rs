//! Application layer for duty-enrich
//!
//! This crate contains the ports the enrichment engine needs, the batch
//! resolver and fan-out coordinator, and the enrichment use cases.
//! It depends only on the domain layer.

pub mod enrichment;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use enrichment::{BatchResolver, BranchPolicy, EnrichError, FanOut, FanOutPlan};
pub use ports::{
    api_error::ApiError,
    directory::{DirectoryPort, MemberFilter, TeamFilter},
    incident_feed::{ChangeFilter, IncidentFeedPort, IncidentFilter},
    lookup::LookupPort,
};
pub use use_cases::enrich_changes::{ChangeReport, EnrichChangesUseCase};
pub use use_cases::enrich_channels::{ChannelQuery, EnrichChannelsUseCase};
pub use use_cases::enrich_escalation_rules::EnrichEscalationRulesUseCase;
pub use use_cases::enrich_incidents::{EnrichIncidentsOptions, EnrichIncidentsUseCase};
pub use use_cases::enrich_timeline::EnrichTimelineUseCase;
pub use use_cases::incident_alerts::IncidentAlertsUseCase;
pub use use_cases::query_incidents::{IncidentQuery, QueryIncidentsUseCase};
pub use use_cases::query_members::{MemberQuery, MemberReport, QueryMembersUseCase};
pub use use_cases::query_teams::{QueryTeamsUseCase, TeamQuery, TeamReport};
pub use use_cases::similar_incidents::{SimilarIncidents, SimilarIncidentsUseCase};
