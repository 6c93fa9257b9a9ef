//! Timeline id collection and enrichment.

use super::detail::{person_id_list, transform_detail};
use super::entities::{RawTimelineItem, TimelineEvent};
use crate::core::ids::{IdSet, ResolvedMap};
use crate::directory::PersonInfo;
use serde_json::Value;

/// Collect every person id referenced by a batch of timeline items.
///
/// Includes the operator of each item plus the ids held in the
/// person-bearing detail fields of its kind. A field is read exactly as
/// [`transform_detail`] reads it: a list holding anything but ids, or a
/// field of the wrong shape, contributes nothing.
pub fn collect_timeline_person_ids(items: &[RawTimelineItem]) -> IdSet {
    let mut ids = IdSet::new();
    for item in items {
        ids.insert(item.person_id);

        let Some(Value::Object(detail)) = &item.detail else {
            continue;
        };
        for field in item.kind().person_fields() {
            if let Some(values) = person_id_list(detail, field) {
                ids.extend_ids(values);
            }
        }
    }
    ids
}

/// Enrich timeline items with operator names and rewritten details.
///
/// Order of `items` is preserved.
pub fn enrich_timeline(
    items: &[RawTimelineItem],
    persons: &ResolvedMap<PersonInfo>,
) -> Vec<TimelineEvent> {
    items
        .iter()
        .map(|item| {
            let kind = item.kind();
            TimelineEvent {
                event_type: item.event_type.clone(),
                timestamp: item.created_at,
                operator_id: item.person_id,
                operator_name: persons
                    .get(&item.person_id)
                    .map(|p| p.person_name.clone())
                    .unwrap_or_default(),
                detail: transform_detail(&kind, item.detail.as_ref(), persons),
            }
        })
        .collect()
}

/// True when every person-bearing field of `item` is well formed.
///
/// Used by callers that want to log payload drift; enrichment itself never
/// fails on a malformed field.
pub fn has_well_formed_person_fields(item: &RawTimelineItem) -> bool {
    let Some(Value::Object(detail)) = &item.detail else {
        return true;
    };
    item.kind()
        .person_fields()
        .iter()
        .filter(|field| detail.contains_key(**field))
        .all(|field| person_id_list(detail, field).is_some())
}
