//! Escalation rules: raw wire shape, enriched view and the join between them.

pub mod entities;
pub mod join;
pub mod raw;

pub use entities::{
    AlertCondition, AlertFilterGroup, AlertFilters, EscalationLayer, EscalationRule,
    EscalationTarget, NotifyBy, PersonTarget, ScheduleTarget, TeamTarget, TimeFilter,
    WebhookConfig,
};
pub use join::{collect_escalation_ids, enrich_escalation_rule, enrich_escalation_rules};
pub use raw::{RawEscalationLayer, RawEscalationRule, RawEscalationTarget, RawWebhook};
