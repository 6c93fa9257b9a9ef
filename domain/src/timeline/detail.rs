//! Timeline detail transformer.
//!
//! Rewrites the person-bearing fields of a `detail` payload from bare ids
//! into `{person_id, person_name}` objects. Which fields are rewritten is
//! decided by [`EventKind::person_fields`]; every other field, and every
//! payload of a kind without person fields, is copied through untouched.

use super::event_kind::EventKind;
use crate::core::ids::ResolvedMap;
use crate::directory::PersonInfo;
use serde_json::{Map, Value};

/// Interpret a JSON value as a person id.
///
/// Integral floats (`5.0`) are accepted since some producers encode every
/// number as a double.
pub fn person_id_of(value: &Value) -> Option<i64> {
    let Value::Number(number) = value else {
        return None;
    };
    if let Some(id) = number.as_i64() {
        return Some(id);
    }
    number
        .as_f64()
        .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
        .map(|f| f as i64)
}

/// Person ids listed under `field`, or `None` if the field is absent or
/// not a list of ids.
pub(crate) fn person_id_list(detail: &Map<String, Value>, field: &str) -> Option<Vec<i64>> {
    let Value::Array(items) = detail.get(field)? else {
        return None;
    };
    items.iter().map(person_id_of).collect()
}

fn person_ref(id: i64, persons: &ResolvedMap<PersonInfo>) -> Value {
    let mut entry = Map::new();
    entry.insert("person_id".to_string(), Value::from(id));
    if let Some(person) = persons.get(&id) {
        entry.insert(
            "person_name".to_string(),
            Value::from(person.person_name.clone()),
        );
    }
    Value::Object(entry)
}

/// Enrich a timeline `detail` payload for the given event kind.
///
/// Never mutates `detail`; the result is a fresh copy. A known field with
/// an unexpected shape (not a list, or a list holding non-numeric values)
/// is left as it was.
pub fn transform_detail(
    kind: &EventKind,
    detail: Option<&Value>,
    persons: &ResolvedMap<PersonInfo>,
) -> Option<Value> {
    let detail = detail?;
    let Value::Object(fields) = detail else {
        return Some(detail.clone());
    };

    let mut enriched = fields.clone();
    for field in kind.person_fields() {
        let Some(ids) = person_id_list(fields, field) else {
            continue;
        };
        let refs = ids.into_iter().map(|id| person_ref(id, persons)).collect();
        enriched.insert((*field).to_string(), Value::Array(refs));
    }
    Some(Value::Object(enriched))
}
