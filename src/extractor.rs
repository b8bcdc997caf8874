//! Feature extraction: locating brand mentions inside SERP sub-structures
//!
//! Pure functions over an already-fetched result document. Missing keys,
//! wrong shapes, and empty lists degrade to not-applicable/absent; nothing
//! here can fail at runtime.

use crate::rules::FeatureRule;
use crate::{Presence, PresenceRecord};
use serde_json::Value;

/// Resolve every rule to a tri-state outcome, in rule declaration order.
///
/// Rules sharing a source key are each evaluated independently against the
/// same sub-structure, so one document key can yield several feature outcomes.
pub fn extract(doc: &Value, brand: &str, rules: &[FeatureRule]) -> PresenceRecord {
    let brand = brand.to_lowercase();
    let mut record = PresenceRecord::with_capacity(rules.len());
    for rule in rules {
        record.push(rule.label.clone(), check_rule(doc, &brand, rule));
    }
    record
}

fn check_rule(doc: &Value, brand: &str, rule: &FeatureRule) -> Presence {
    let Some(key) = rule.source_key.as_deref() else {
        return Presence::NotApplicable;
    };
    let Some(section) = doc.get(key) else {
        return Presence::NotApplicable;
    };

    match section {
        Value::Array(items) => scan_items(items, brand, rule),
        // Single object carrying an identifying field, e.g. the knowledge
        // panel's `website`. Field missing means the panel carries no anchor
        // to check, not that the brand is absent.
        Value::Object(fields) => match rule.match_field.as_deref() {
            Some(field) => match fields.get(field) {
                Some(value) => presence_of(text_of(value).contains(brand)),
                None => Presence::NotApplicable,
            },
            None => presence_of(text_of(section).contains(brand)),
        },
        other => presence_of(text_of(other).contains(brand)),
    }
}

fn scan_items(items: &[Value], brand: &str, rule: &FeatureRule) -> Presence {
    let required = rule.match_value.as_deref().map(str::to_lowercase);
    for item in items {
        let qualifies = match (rule.match_field.as_deref(), required.as_deref()) {
            // Conjunctive: the field must carry the discriminator AND the
            // brand must appear somewhere in the item's full text
            (Some(field), Some(required)) => {
                field_text(item, field).is_some_and(|t| t.contains(required))
                    && text_of(item).contains(brand)
            }
            (Some(field), None) => field_text(item, field).is_some_and(|t| t.contains(brand)),
            (None, _) => text_of(item).contains(brand),
        };
        if qualifies {
            return Presence::Present;
        }
    }
    Presence::Absent
}

/// Lowercased textual representation of a value; plain strings drop their
/// surrounding quotes so substring matching sees the raw text.
fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.to_lowercase(),
        other => other.to_string().to_lowercase(),
    }
}

fn field_text(item: &Value, field: &str) -> Option<String> {
    item.get(field).map(text_of)
}

fn presence_of(found: bool) -> Presence {
    if found {
        Presence::Present
    } else {
        Presence::Absent
    }
}
