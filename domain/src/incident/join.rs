//! Incident id collection and join.

use super::entities::{EnrichedIncident, EnrichedResponder, RawIncident};
use crate::core::ids::{CollectedIds, ResolvedMap};
use crate::directory::{ChannelInfo, PersonInfo};

/// Collect creator, closer, responder and channel ids from incidents.
pub fn collect_incident_ids(incidents: &[RawIncident]) -> CollectedIds {
    let mut ids = CollectedIds::new();
    for incident in incidents {
        ids.persons.insert(incident.creator_id);
        ids.persons.insert(incident.closer_id);
        ids.persons
            .extend_ids(incident.responders.iter().map(|r| r.person_id));
        ids.channels.insert(incident.channel_id);
    }
    ids
}

/// Join raw incidents with resolved persons and channels.
///
/// Unresolved ids are carried through with blank display fields.
/// Responder order is preserved.
pub fn enrich_incidents(
    incidents: &[RawIncident],
    persons: &ResolvedMap<PersonInfo>,
    channels: &ResolvedMap<ChannelInfo>,
) -> Vec<EnrichedIncident> {
    incidents
        .iter()
        .map(|raw| enrich_incident(raw, persons, channels))
        .collect()
}

fn enrich_incident(
    raw: &RawIncident,
    persons: &ResolvedMap<PersonInfo>,
    channels: &ResolvedMap<ChannelInfo>,
) -> EnrichedIncident {
    let mut incident = EnrichedIncident {
        incident_id: raw.incident_id.clone(),
        title: raw.title.clone(),
        description: raw.description.clone(),
        severity: raw.severity.clone(),
        progress: raw.progress.clone(),
        start_time: raw.start_time,
        ack_time: raw.ack_time,
        close_time: raw.close_time,
        channel_id: raw.channel_id,
        creator_id: raw.creator_id,
        closer_id: raw.closer_id,
        labels: raw.labels.clone(),
        custom_fields: raw.fields.clone(),
        ..Default::default()
    };

    if let Some(channel) = channels.get(&raw.channel_id) {
        incident.channel_name = channel.channel_name.clone();
    }

    if let Some(creator) = persons.get(&raw.creator_id) {
        incident.creator_name = creator.person_name.clone();
        incident.creator_email = creator.email.clone();
    }

    if let Some(closer) = persons.get(&raw.closer_id) {
        incident.closer_name = closer.person_name.clone();
    }

    incident.responders = raw
        .responders
        .iter()
        .map(|r| {
            let mut responder = EnrichedResponder {
                person_id: r.person_id,
                assigned_at: r.assigned_at,
                acknowledged_at: r.acknowledged_at,
                ..Default::default()
            };
            if let Some(person) = persons.get(&r.person_id) {
                responder.person_name = person.person_name.clone();
                responder.email = person.email.clone();
            }
            responder
        })
        .collect();

    incident
}
