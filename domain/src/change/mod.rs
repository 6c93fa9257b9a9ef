//! Change records (deployments, config changes) with channel and creator names.

use crate::core::ids::{CollectedIds, is_zero};
use crate::directory::Resolutions;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A change as returned by `/change/list`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawChange {
    pub change_id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub change_type: String,
    pub status: String,
    pub channel_id: i64,
    pub creator_id: i64,
    pub start_time: i64,
    pub end_time: i64,
    pub labels: BTreeMap<String, String>,
}

/// One page of changes with the server-side total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangePage {
    pub items: Vec<RawChange>,
    pub total: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Change {
    pub change_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub change_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub status: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub channel_id: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub channel_name: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub creator_id: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub creator_name: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub start_time: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub end_time: i64,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

pub fn collect_change_ids(changes: &[RawChange]) -> CollectedIds {
    let mut ids = CollectedIds::new();
    for change in changes {
        ids.channels.insert(change.channel_id);
        ids.persons.insert(change.creator_id);
    }
    ids
}

pub fn enrich_changes(changes: &[RawChange], resolved: &Resolutions) -> Vec<Change> {
    changes
        .iter()
        .map(|raw| Change {
            change_id: raw.change_id.clone(),
            title: raw.title.clone(),
            description: raw.description.clone(),
            change_type: raw.change_type.clone(),
            status: raw.status.clone(),
            channel_id: raw.channel_id,
            channel_name: resolved
                .channel_name(raw.channel_id)
                .unwrap_or_default()
                .to_string(),
            creator_id: raw.creator_id,
            creator_name: resolved
                .person_name(raw.creator_id)
                .unwrap_or_default()
                .to_string(),
            start_time: raw.start_time,
            end_time: raw.end_time,
            labels: raw.labels.clone(),
        })
        .collect()
}
