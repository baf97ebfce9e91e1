//! Untrusted value -> valid character record
//!
//! Every document that enters the sheet (LocalStorage, an imported YAML file)
//! passes through here. Input is treated as partial or adversarial: each
//! field is taken only when it has the right type, numbers are truncated and
//! clamped, and anything else falls back to the default record's value.
//! Normalization never fails.
//!
//! Rules are kept per schema version. Only the current version exists, so
//! every input is read as current-schema-shaped regardless of the
//! `schemaVersion` it claims.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::consts::*;
use crate::schema::{
    Attribute, Character, Characteristic, Lang, MetaField, NoteField, Perk, PerkList,
    SCHEMA_VERSION, SkillEntry, SkillGroup, SkillLine, Track, default_character_at,
};

type Object = Map<String, Value>;

/// Normalization rules for one schema version
struct Rules {
    version: u32,
    apply: fn(&Object, Character) -> Character,
}

/// Rule table, oldest first. The last entry is the current schema.
const RULES: &[Rules] = &[Rules {
    version: 1,
    apply: normalize_v1,
}];

/// Normalize `input`, stamping the current time
pub fn normalize(input: &Value) -> Character {
    normalize_at(input, Utc::now())
}

/// Normalize `input`, stamping `now` as `updatedAt`
pub fn normalize_at(input: &Value, now: DateTime<Utc>) -> Character {
    let base = default_character_at(now);

    let Some(obj) = input.as_object() else {
        log::debug!("Normalize: input is not a mapping, using defaults");
        return base;
    };

    let claimed = obj.get("schemaVersion").and_then(Value::as_u64);
    if claimed != Some(SCHEMA_VERSION as u64) {
        log::debug!(
            "Normalize: document claims schema {:?}, reading as {}",
            claimed,
            SCHEMA_VERSION
        );
    }

    let rules = current_rules();
    let mut character = (rules.apply)(obj, base);

    // Never taken from input
    character.schema_version = rules.version;
    character.updated_at = now;
    character
}

fn current_rules() -> &'static Rules {
    // RULES is a non-empty const table
    &RULES[RULES.len() - 1]
}

fn normalize_v1(obj: &Object, base: Character) -> Character {
    let mut out = base.clone();

    out.lang = obj
        .get("lang")
        .and_then(Value::as_str)
        .and_then(Lang::from_wire)
        .unwrap_or(base.lang);

    let meta = section(obj, "meta");
    for &field in MetaField::ALL {
        *out.meta.get_mut(field) = string_or(get(meta, field.as_str()), base.meta.get(field));
    }

    let attributes = section(obj, "attributes");
    for &attr in Attribute::ALL {
        *out.attributes.get_mut(attr) = bounded_or(
            get(attributes, attr.as_str()),
            ATTRIBUTE_MIN as i64,
            ATTRIBUTE_MAX as i64,
            base.attributes.get(attr) as i64,
        ) as u8;
    }

    let characteristics = section(obj, "characteristics");
    for &key in Characteristic::ALL {
        let track = get(characteristics, key.as_str()).and_then(Value::as_object);
        let fallback = base.characteristics.get(key);
        *out.characteristics.get_mut(key) = Track {
            dots: bounded_or(get(track, "dots"), 0, TRACK_MAX as i64, fallback.dots as i64) as u8,
            boxes: bounded_or(get(track, "boxes"), 0, TRACK_MAX as i64, fallback.boxes as i64)
                as u8,
        };
    }
    out.characteristics.charge = bounded_or(
        get(characteristics, "charge"),
        0,
        CHARGE_MAX as i64,
        base.characteristics.charge as i64,
    ) as u16;

    let skills = section(obj, "skills");
    for &group in SkillGroup::ALL {
        let imported = get(skills, group.as_str()).and_then(Value::as_array);
        *out.skills.group_mut(group) = merge_skill_group(base.skills.group(group), imported);
    }

    for &list in PerkList::ALL {
        if let Some(items) = obj.get(list.as_str()).and_then(Value::as_array) {
            *out.perks_mut(list) = items.iter().map(normalize_perk).collect();
        }
    }

    let notes = section(obj, "notes");
    for &field in NoteField::ALL {
        *out.notes.get_mut(field) = string_or(get(notes, field.as_str()), base.notes.get(field));
    }

    out
}

/// Walk the canonical entries and pull each line from the import by id.
///
/// Entries can never be added, dropped or reordered here; unknown ids in
/// the import are ignored and a repeated id keeps its last occurrence.
fn merge_skill_group(canonical: &[SkillEntry], imported: Option<&Vec<Value>>) -> Vec<SkillEntry> {
    let mut lines: HashMap<&str, Option<&Value>> = HashMap::new();
    for item in imported.into_iter().flatten() {
        let Some(item) = item.as_object() else {
            continue;
        };
        if let Some(id) = item.get("id").and_then(Value::as_str) {
            lines.insert(id, item.get("line"));
        }
    }

    canonical
        .iter()
        .map(|entry| match lines.get(entry.id.as_str()) {
            Some(line) => SkillEntry {
                id: entry.id,
                line: normalize_line(*line, &entry.line),
            },
            None => entry.clone(),
        })
        .collect()
}

fn normalize_line(input: Option<&Value>, fallback: &SkillLine) -> SkillLine {
    let line = input.and_then(Value::as_object);
    SkillLine {
        enabled: get(line, "enabled")
            .and_then(Value::as_bool)
            .unwrap_or(fallback.enabled),
        note: string_or(get(line, "note"), &fallback.note),
        rating: bounded_or(get(line, "rating"), 0, RATING_MAX as i64, fallback.rating as i64) as u8,
    }
}

/// Perks have no canonical identity: each element maps independently
fn normalize_perk(item: &Value) -> Perk {
    let Some(item) = item.as_object() else {
        return Perk::default();
    };
    Perk {
        text: string_or(item.get("text"), ""),
        level: bounded_or(item.get("level"), 0, RATING_MAX as i64, 0) as u8,
    }
}

fn section<'a>(obj: &'a Object, key: &str) -> Option<&'a Object> {
    obj.get(key).and_then(Value::as_object)
}

fn get<'a>(obj: Option<&'a Object>, key: &str) -> Option<&'a Value> {
    obj.and_then(|o| o.get(key))
}

fn string_or(value: Option<&Value>, fallback: &str) -> String {
    value
        .and_then(Value::as_str)
        .unwrap_or(fallback)
        .to_string()
}

/// Finite numbers are truncated toward zero then clamped; anything else
/// (strings, booleans, null, missing) yields `fallback`.
fn bounded_or(value: Option<&Value>, lo: i64, hi: i64, fallback: i64) -> i64 {
    match value.and_then(Value::as_f64).filter(|n| n.is_finite()) {
        Some(n) => n.trunc().clamp(lo as f64, hi as f64) as i64,
        None => fallback,
    }
}

/// One place where a document differs from its normalized form
#[derive(Debug, Clone, PartialEq)]
pub struct Deviation {
    /// Dotted path such as `attributes.luck` or `skills.mental[2].line.rating`
    pub path: String,
    /// Value in the document, `None` when the field is missing
    pub found: Option<Value>,
    /// Value the sheet uses instead, `None` when the field is dropped
    pub normalized: Option<Value>,
}

impl fmt::Display for Deviation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() { "document" } else { self.path.as_str() };
        match (&self.found, &self.normalized) {
            (Some(found), Some(normalized)) => write!(f, "{}: {} -> {}", path, found, normalized),
            (None, Some(normalized)) => write!(f, "{}: missing, using {}", path, normalized),
            (Some(found), None) => write!(f, "{}: unknown field {}, dropped", path, found),
            (None, None) => write!(f, "{}: missing", path),
        }
    }
}

/// Every field of `input` that normalization would change, fill in or drop.
///
/// `updatedAt` is restamped on every load and never reported. An empty
/// result means the document already is a valid record.
pub fn deviations(input: &Value) -> Vec<Deviation> {
    let normalized = match serde_json::to_value(normalize(input)) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Failed to encode normalized record: {}", e);
            return Vec::new();
        }
    };

    let mut out = Vec::new();
    diff(String::new(), Some(input), &normalized, &mut out);
    out.retain(|d| d.path != "updatedAt");
    out
}

fn child(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

fn diff(path: String, found: Option<&Value>, normalized: &Value, out: &mut Vec<Deviation>) {
    match (found, normalized) {
        (Some(Value::Object(found)), Value::Object(normalized)) => {
            for (key, value) in normalized {
                diff(child(&path, key), found.get(key), value, out);
            }
            for (key, value) in found {
                if !normalized.contains_key(key) {
                    out.push(Deviation {
                        path: child(&path, key),
                        found: Some(value.clone()),
                        normalized: None,
                    });
                }
            }
        }
        (Some(Value::Array(found)), Value::Array(normalized))
            if found.len() == normalized.len() =>
        {
            for (i, (f, n)) in found.iter().zip(normalized).enumerate() {
                diff(format!("{}[{}]", path, i), Some(f), n, out);
            }
        }
        (Some(f), n) if same_value(f, n) => {}
        (found, n) => out.push(Deviation {
            path,
            found: found.cloned(),
            normalized: Some(n.clone()),
        }),
    }
}

/// Numbers compare by value so `3.0` matches `3`
fn same_value(a: &Value, b: &Value) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}
