//! Incident timeline: event kinds, detail transformation and enrichment.

pub mod detail;
pub mod enrich;
pub mod entities;
pub mod event_kind;

pub use detail::{person_id_of, transform_detail};
pub use enrich::{collect_timeline_person_ids, enrich_timeline, has_well_formed_person_fields};
pub use entities::{IncidentTimeline, RawTimelineItem, TimelineEvent};
pub use event_kind::{EventKind, FieldUpdate, Suppression};
