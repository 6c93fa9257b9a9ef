//! Escalation rule id collection and join.

use super::entities::{
    EscalationLayer, EscalationRule, EscalationTarget, PersonTarget, ScheduleTarget, TeamTarget,
    WebhookConfig,
};
use super::raw::{RawEscalationLayer, RawEscalationRule, RawEscalationTarget, RawWebhook};
use crate::core::ids::CollectedIds;
use crate::directory::Resolutions;
use serde_json::Value;

/// Collect person, team, schedule and channel ids referenced by rules.
pub fn collect_escalation_ids(rules: &[RawEscalationRule]) -> CollectedIds {
    let mut ids = CollectedIds::new();
    for rule in rules {
        ids.channels.insert(rule.channel_id);
        for target in rule.layers.iter().filter_map(|l| l.target.as_ref()) {
            ids.persons.extend_ids(target.person_ids.iter().copied());
            ids.teams.extend_ids(target.team_ids.iter().copied());
            ids.schedules
                .extend_ids(target.schedule_to_role_ids.keys().copied());
        }
    }
    ids
}

/// Build the enriched view of one escalation rule.
pub fn enrich_escalation_rule(raw: &RawEscalationRule, resolved: &Resolutions) -> EscalationRule {
    EscalationRule {
        rule_id: raw.rule_id.clone(),
        rule_name: raw.rule_name.clone(),
        description: raw.description.clone(),
        channel_id: raw.channel_id,
        channel_name: resolved
            .channel_name(raw.channel_id)
            .unwrap_or_default()
            .to_string(),
        status: raw.status.clone(),
        priority: raw.priority,
        aggr_window: raw.aggr_window,
        layers: raw
            .layers
            .iter()
            .enumerate()
            .map(|(idx, layer)| build_layer(idx, layer, resolved))
            .collect(),
        time_filters: raw.time_filters.clone(),
        filters: raw.filters.clone(),
    }
}

/// [`enrich_escalation_rule`] over a batch, preserving order.
pub fn enrich_escalation_rules(
    rules: &[RawEscalationRule],
    resolved: &Resolutions,
) -> Vec<EscalationRule> {
    rules
        .iter()
        .map(|rule| enrich_escalation_rule(rule, resolved))
        .collect()
}

fn build_layer(idx: usize, raw: &RawEscalationLayer, resolved: &Resolutions) -> EscalationLayer {
    EscalationLayer {
        layer_idx: idx,
        timeout: raw.escalate_window,
        notify_interval: raw.notify_step,
        max_times: raw.max_times,
        force_escalate: raw.force_escalate,
        target: raw.target.as_ref().map(|t| build_target(t, resolved)),
    }
}

fn build_target(raw: &RawEscalationTarget, resolved: &Resolutions) -> EscalationTarget {
    let persons = raw
        .person_ids
        .iter()
        .map(|&person_id| {
            let mut target = PersonTarget {
                person_id,
                ..Default::default()
            };
            if let Some(person) = resolved.persons.get(&person_id) {
                target.person_name = person.person_name.clone();
                target.email = person.email.clone();
            }
            target
        })
        .collect();

    let teams = raw
        .team_ids
        .iter()
        .map(|&team_id| TeamTarget {
            team_id,
            team_name: resolved.team_name(team_id).unwrap_or_default().to_string(),
        })
        .collect();

    // BTreeMap iteration keeps schedules sorted by id
    let schedules = raw
        .schedule_to_role_ids
        .iter()
        .map(|(&schedule_id, role_ids)| ScheduleTarget {
            schedule_id,
            schedule_name: resolved
                .schedule_name(schedule_id)
                .unwrap_or_default()
                .to_string(),
            role_ids: role_ids.clone(),
        })
        .collect();

    EscalationTarget {
        persons,
        teams,
        schedules,
        notify_by: raw.by.clone(),
        webhooks: raw.webhooks.iter().map(build_webhook).collect(),
    }
}

fn build_webhook(raw: &RawWebhook) -> WebhookConfig {
    let alias = match raw.settings.get("alias") {
        Some(Value::String(alias)) => alias.clone(),
        _ => String::new(),
    };
    WebhookConfig {
        webhook_type: raw.webhook_type.clone(),
        alias,
        settings: raw.settings.clone(),
    }
}
