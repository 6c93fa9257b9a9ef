//! Timeline event kinds.
//!
//! Timeline items carry a `type` tag such as `i_assign` or `i_notify`. The
//! tag decides which fields of the free-form `detail` payload hold person
//! ids. [`EventKind::person_fields`] is the single table both the id
//! collector and the detail transformer read, so adding a kind means adding
//! one match arm.

use std::fmt;

/// Known timeline event kinds, plus [`EventKind::Other`] for anything else.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// `i_new`: incident created
    New,
    /// `i_assign`: responders assigned
    Assign,
    /// `i_a_rspd`: responders added
    AddResponder,
    /// `i_notify`: notification sent
    Notify,
    /// `i_comm`: comment
    Comment,
    /// `i_ack`: acknowledged
    Ack,
    /// `i_unack`: acknowledgement withdrawn
    Unack,
    /// `i_wake`: woken from snooze
    Wake,
    /// `i_snooze`: snoozed (`minutes`)
    Snooze,
    /// `i_rslv`: resolved (`from`)
    Resolve,
    /// `i_reopen`: reopened (`reason`)
    Reopen,
    /// `i_merge`: merged into / from other incidents
    Merge,
    /// `i_custom`: custom action
    Custom,
    /// `i_r_*`: a field of the incident was updated
    FieldUpdate(FieldUpdate),
    /// Suppression events (silence, inhibit, flapping, storm)
    Suppression(Suppression),
    /// Any tag not listed above; the payload is passed through untouched.
    Other(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldUpdate {
    RootCause,
    Description,
    Resolution,
    Responders,
    Impact,
    Title,
    Severity,
    CustomField,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suppression {
    Silence,
    Inhibit,
    Flapping,
    Storm,
}

const TO: &str = "to";
const PERSON_IDS: &str = "person_ids";

impl EventKind {
    pub fn parse(tag: &str) -> Self {
        match tag {
            "i_new" => Self::New,
            "i_assign" => Self::Assign,
            "i_a_rspd" => Self::AddResponder,
            "i_notify" => Self::Notify,
            "i_comm" => Self::Comment,
            "i_ack" => Self::Ack,
            "i_unack" => Self::Unack,
            "i_wake" => Self::Wake,
            "i_snooze" => Self::Snooze,
            "i_rslv" => Self::Resolve,
            "i_reopen" => Self::Reopen,
            "i_merge" => Self::Merge,
            "i_custom" => Self::Custom,
            "i_r_rc" => Self::FieldUpdate(FieldUpdate::RootCause),
            "i_r_desc" => Self::FieldUpdate(FieldUpdate::Description),
            "i_r_rsltn" => Self::FieldUpdate(FieldUpdate::Resolution),
            "i_r_resp" => Self::FieldUpdate(FieldUpdate::Responders),
            "i_r_impact" => Self::FieldUpdate(FieldUpdate::Impact),
            "i_r_title" => Self::FieldUpdate(FieldUpdate::Title),
            "i_r_severity" => Self::FieldUpdate(FieldUpdate::Severity),
            "i_r_field" => Self::FieldUpdate(FieldUpdate::CustomField),
            "i_m_silence" => Self::Suppression(Suppression::Silence),
            "i_m_inhibat" => Self::Suppression(Suppression::Inhibit),
            "i_m_flapping" => Self::Suppression(Suppression::Flapping),
            "i_storm" => Self::Suppression(Suppression::Storm),
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_tag(&self) -> &str {
        match self {
            Self::New => "i_new",
            Self::Assign => "i_assign",
            Self::AddResponder => "i_a_rspd",
            Self::Notify => "i_notify",
            Self::Comment => "i_comm",
            Self::Ack => "i_ack",
            Self::Unack => "i_unack",
            Self::Wake => "i_wake",
            Self::Snooze => "i_snooze",
            Self::Resolve => "i_rslv",
            Self::Reopen => "i_reopen",
            Self::Merge => "i_merge",
            Self::Custom => "i_custom",
            Self::FieldUpdate(field) => match field {
                FieldUpdate::RootCause => "i_r_rc",
                FieldUpdate::Description => "i_r_desc",
                FieldUpdate::Resolution => "i_r_rsltn",
                FieldUpdate::Responders => "i_r_resp",
                FieldUpdate::Impact => "i_r_impact",
                FieldUpdate::Title => "i_r_title",
                FieldUpdate::Severity => "i_r_severity",
                FieldUpdate::CustomField => "i_r_field",
            },
            Self::Suppression(kind) => match kind {
                Suppression::Silence => "i_m_silence",
                Suppression::Inhibit => "i_m_inhibat",
                Suppression::Flapping => "i_m_flapping",
                Suppression::Storm => "i_storm",
            },
            Self::Other(tag) => tag,
        }
    }

    /// Detail fields that hold lists of person ids for this kind.
    pub fn person_fields(&self) -> &'static [&'static str] {
        match self {
            Self::Assign | Self::AddResponder => &[TO, PERSON_IDS],
            Self::Notify => &[TO],
            Self::New
            | Self::Comment
            | Self::Ack
            | Self::Unack
            | Self::Wake
            | Self::Snooze
            | Self::Resolve
            | Self::Reopen
            | Self::Merge
            | Self::Custom
            | Self::FieldUpdate(_)
            | Self::Suppression(_)
            | Self::Other(_) => &[],
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<&str> for EventKind {
    fn from(tag: &str) -> Self {
        Self::parse(tag)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrips_known_tags() {
        for tag in [
            "i_new", "i_assign", "i_a_rspd", "i_notify", "i_comm", "i_ack", "i_unack", "i_wake",
            "i_snooze", "i_rslv", "i_reopen", "i_merge", "i_custom", "i_r_rc", "i_r_desc",
            "i_r_rsltn", "i_r_resp", "i_r_impact", "i_r_title", "i_r_severity", "i_r_field",
            "i_m_silence", "i_m_inhibat", "i_m_flapping", "i_storm",
        ] {
            let kind = EventKind::parse(tag);
            assert!(kind.is_known(), "{tag} should be known");
            assert_eq!(kind.as_tag(), tag);
        }
    }

    #[test]
    fn test_unknown_tag_kept_verbatim() {
        let kind = EventKind::parse("i_future_thing");
        assert_eq!(kind, EventKind::Other("i_future_thing".to_string()));
        assert!(!kind.is_known());
        assert_eq!(kind.to_string(), "i_future_thing");
        assert!(kind.person_fields().is_empty());
    }

    #[test]
    fn test_person_fields() {
        assert_eq!(EventKind::Assign.person_fields(), &["to", "person_ids"]);
        assert_eq!(EventKind::AddResponder.person_fields(), &["to", "person_ids"]);
        assert_eq!(EventKind::Notify.person_fields(), &["to"]);
        assert!(EventKind::Ack.person_fields().is_empty());
        assert!(EventKind::FieldUpdate(FieldUpdate::Responders).person_fields().is_empty());
    }
}
