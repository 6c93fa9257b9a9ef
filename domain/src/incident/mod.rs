//! Incidents and their alert previews.

pub mod entities;
pub mod join;

pub use entities::{
    AlertPage, AlertPreview, EnrichedIncident, EnrichedResponder, IncidentAlerts, IncidentPage,
    RawIncident, RawResponder,
};
pub use join::{collect_incident_ids, enrich_incidents};
