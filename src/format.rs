//! Document formats
//!
//! YAML is the import/export format, JSON the storage envelope. Both are a
//! pure syntax layer: parsing yields a loose `serde_json::Value` and leaves
//! all schema enforcement to `normalize`.

use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_json::{Map, Number, Value};
use thiserror::Error;

use crate::schema::Character;

/// Syntax errors from either document format
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Render a record as a YAML document.
///
/// Output is deterministic (fields in schema order), never uses anchors or
/// aliases, and writes every nested structure out in full.
pub fn to_yaml(character: &Character) -> Result<String, FormatError> {
    Ok(serde_yaml::to_string(character)?)
}

/// Parse YAML text into a loose value. An empty document is `null`.
///
/// Integers too wide for 64 bits are read as floats and non-finite floats
/// as `null`, so only real syntax problems are errors.
pub fn from_yaml(text: &str) -> Result<Value, FormatError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    let Loose(value) = serde_yaml::from_str::<Loose>(text)?;
    Ok(value)
}

/// Any YAML node, lowered onto `serde_json::Value`
struct Loose(Value);

impl<'de> Deserialize<'de> for Loose {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(LooseVisitor).map(Loose)
    }
}

fn float(f: f64) -> Value {
    Number::from_f64(f).map_or(Value::Null, Value::Number)
}

/// Mapping keys become strings; keys that are collections are dropped
fn key_string(key: Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s),
        Value::Null => Some("null".to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

struct LooseVisitor;

impl<'de> Visitor<'de> for LooseVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any YAML value")
    }

    fn visit_bool<E: de::Error>(self, b: bool) -> Result<Value, E> {
        Ok(Value::Bool(b))
    }

    fn visit_i64<E: de::Error>(self, n: i64) -> Result<Value, E> {
        Ok(Value::from(n))
    }

    fn visit_u64<E: de::Error>(self, n: u64) -> Result<Value, E> {
        Ok(Value::from(n))
    }

    fn visit_i128<E: de::Error>(self, n: i128) -> Result<Value, E> {
        Ok(float(n as f64))
    }

    fn visit_u128<E: de::Error>(self, n: u128) -> Result<Value, E> {
        Ok(float(n as f64))
    }

    fn visit_f64<E: de::Error>(self, f: f64) -> Result<Value, E> {
        Ok(float(f))
    }

    fn visit_str<E: de::Error>(self, s: &str) -> Result<Value, E> {
        Ok(Value::String(s.to_string()))
    }

    fn visit_string<E: de::Error>(self, s: String) -> Result<Value, E> {
        Ok(Value::String(s))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Loose::deserialize(deserializer).map(|Loose(v)| v)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::new();
        while let Some(Loose(item)) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
        let mut object = Map::new();
        while let Some((Loose(key), Loose(value))) = map.next_entry()? {
            if let Some(key) = key_string(key) {
                object.insert(key, value);
            }
        }
        Ok(Value::Object(object))
    }
}

/// Render a record as compact JSON for storage
pub fn to_json(character: &Character) -> Result<String, FormatError> {
    Ok(serde_json::to_string(character)?)
}

/// Parse JSON bytes into a loose value
pub fn from_json(bytes: &[u8]) -> Result<Value, FormatError> {
    Ok(serde_json::from_slice(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::{self, Edit, SkillLinePatch};
    use crate::normalize::normalize_at;
    use crate::schema::{
        Attribute, Characteristic, Lang, MetaField, NoteField, Perk, PerkList, SkillGroup,
        SkillId, default_character_at,
    };
    use chrono::{DateTime, TimeZone, Utc};

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn sample() -> Character {
        let edits = [
            Edit::SetLang(Lang::Ru),
            Edit::RenameCharacter("Ilsa Varn".into()),
            Edit::SetMeta(MetaField::KeyItems, "Compass, \"north\" key".into()),
            Edit::SetAttribute(Attribute::Luck, 4),
            Edit::SetCharacteristic(Characteristic::Qi, 3, 12),
            Edit::SetCharge(150),
            Edit::SetSkillLine(
                SkillGroup::Mental,
                SkillId::Occult,
                SkillLinePatch {
                    enabled: Some(true),
                    note: Some("Grave rites".into()),
                    rating: Some(3),
                },
            ),
            Edit::AddPerk(PerkList::Permanent, Perk::new("Iron stomach", 2)),
            Edit::AddPerk(PerkList::Temporary, Perk::new("", 0)),
            Edit::SetNote(
                NoteField::Background,
                "Born on the river.\nLeft at sixteen.\n\n: not a key".into(),
            ),
        ];
        edits.iter().fold(default_character_at(fixed_now()), |c, e| {
            edit::apply(&c, e, fixed_now())
        })
    }

    #[test]
    fn test_yaml_round_trip() {
        let c = sample();
        let text = to_yaml(&c).unwrap();
        let back = normalize_at(&from_yaml(&text).unwrap(), fixed_now());
        assert_eq!(back, c);
    }

    #[test]
    fn test_json_round_trip() {
        let c = sample();
        let text = to_json(&c).unwrap();
        let back = normalize_at(&from_json(text.as_bytes()).unwrap(), fixed_now());
        assert_eq!(back, c);
    }

    #[test]
    fn test_yaml_has_no_aliases_and_keeps_field_order() {
        let c = sample();
        let text = to_yaml(&c).unwrap();
        assert!(!text.contains('&'));
        assert!(!text.contains('*'));
        let schema = text.find("schemaVersion").unwrap();
        let meta = text.find("meta:").unwrap();
        let notes = text.find("notes:").unwrap();
        assert!(schema < meta && meta < notes);
        assert!(text.contains("characterName: Ilsa Varn"));
    }

    #[test]
    fn test_long_lines_survive() {
        let mut c = default_character_at(fixed_now());
        c.notes.inventory = "torch ".repeat(60).trim_end().to_string();
        let text = to_yaml(&c).unwrap();

        let line = text
            .lines()
            .find(|l| l.trim_start().starts_with("inventory:"))
            .unwrap();
        assert_eq!(line.trim_start(), format!("inventory: {}", c.notes.inventory));

        let back = normalize_at(&from_yaml(&text).unwrap(), fixed_now());
        assert_eq!(back.notes.inventory, c.notes.inventory);
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        let err = from_yaml("meta: [unclosed\n  - a: b").unwrap_err();
        assert!(matches!(err, FormatError::Yaml(_)));
        assert!(err.to_string().starts_with("invalid YAML"));
    }

    #[test]
    fn test_oversized_integers_are_values_not_errors() {
        let value = from_yaml("attributes:\n  luck: 18446744073709551616000\n").unwrap();
        assert!(value["attributes"]["luck"].as_f64().unwrap() > 1e22);
        assert_eq!(normalize_at(&value, fixed_now()).attributes.luck, 5);

        let value = from_yaml("attributes:\n  luck: -18446744073709551616000\n").unwrap();
        assert_eq!(normalize_at(&value, fixed_now()).attributes.luck, 1);
    }

    #[test]
    fn test_non_string_keys_and_nan() {
        let value = from_yaml("1: one\ntrue: yes\nmeta: {vice: .nan}\n").unwrap();
        assert_eq!(value["1"], Value::from("one"));
        assert_eq!(value["true"], Value::from("yes"));
        assert_eq!(value["meta"]["vice"], Value::Null);
    }

    #[test]
    fn test_empty_yaml_is_null() {
        assert_eq!(from_yaml("").unwrap(), Value::Null);
        assert_eq!(from_yaml("  \n").unwrap(), Value::Null);
    }

    #[test]
    fn test_yaml_parses_loosely() {
        let value = from_yaml("attributes:\n  luck: lots\nlang: 7\n").unwrap();
        assert_eq!(value["attributes"]["luck"], Value::String("lots".into()));
        assert_eq!(value["lang"], Value::from(7));
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(matches!(from_json(b"{\"meta\":"), Err(FormatError::Json(_))));
    }
}
