//! Domain layer for duty-enrich
//!
//! This crate contains the incident-management entities and the pure parts
//! of the enrichment engine. It performs no I/O and nothing in it can fail.
//!
//! # Core Concepts
//!
//! ## Raw and enriched records
//!
//! The remote API returns records full of foreign keys (`creator_id`,
//! `channel_id`, `team_ids`, ...). Enrichment turns them into views that also
//! carry the referenced names:
//!
//! 1. **Collect**: walk the raw records and gather one [`IdSet`] per
//!    [`EntityKind`] (`collect_*_ids`)
//! 2. **Resolve**: done by the application layer, one bulk lookup per kind
//! 3. **Join**: combine raw records with the [`ResolvedMap`]s
//!    (`enrich_*`); unresolved ids keep their raw value and blank names
//!
//! ## Timeline details
//!
//! Timeline `detail` payloads are free-form and keyed by an event tag.
//! [`EventKind`] is the closed set of known tags; [`transform_detail`]
//! rewrites the person-bearing fields and passes everything else through.

pub mod change;
pub mod config;
pub mod core;
pub mod directory;
pub mod escalation;
pub mod incident;
pub mod timeline;

// Re-export commonly used types
pub use change::{Change, ChangePage, RawChange, collect_change_ids, enrich_changes};
pub use config::{OutputFormat, UnknownOutputFormat};
pub use crate::core::ids::{CollectedIds, EntityKind, IdSet, Resolved, ResolvedMap, index_by_key};
pub use crate::core::string::{truncate_body, truncate_body_default};
pub use directory::{
    ChannelInfo, MemberInfo, MemberPage, PersonInfo, Resolutions, ScheduleInfo, TeamInfo,
    TeamMember, TeamPage, collect_channel_ids, enrich_channels,
};
pub use escalation::{
    AlertCondition, AlertFilterGroup, AlertFilters, EscalationLayer, EscalationRule,
    EscalationTarget, NotifyBy, PersonTarget, RawEscalationLayer, RawEscalationRule,
    RawEscalationTarget, RawWebhook, ScheduleTarget, TeamTarget, TimeFilter, WebhookConfig,
    collect_escalation_ids, enrich_escalation_rule, enrich_escalation_rules,
};
pub use incident::{
    AlertPage, AlertPreview, EnrichedIncident, EnrichedResponder, IncidentAlerts, IncidentPage,
    RawIncident, RawResponder, collect_incident_ids, enrich_incidents,
};
pub use timeline::{
    EventKind, IncidentTimeline, RawTimelineItem, TimelineEvent, collect_timeline_person_ids,
    enrich_timeline, has_well_formed_person_fields, transform_detail,
};
