//! Edit operations
//!
//! Every change to a sheet is an [`Edit`] applied with [`apply`]: a pure
//! function from the current record to a new one with exactly one logical
//! field changed and `updatedAt` refreshed. Numeric arguments are re-clamped
//! here even though front ends clamp too. Operations that change nothing
//! (unknown skill id, perk index out of range) return the record untouched,
//! timestamp included.

use chrono::{DateTime, Utc};

use crate::consts::*;
use crate::schema::{
    Attribute, Character, Characteristic, Lang, MetaField, NoteField, Perk, PerkList, SkillGroup,
    SkillId, Track,
};

/// Partial update of a skill line; `None` leaves a field as it is
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillLinePatch {
    pub enabled: Option<bool>,
    pub note: Option<String>,
    pub rating: Option<i64>,
}

/// A single user edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    RenameCharacter(String),
    SetMeta(MetaField, String),
    /// Clamped to [1,5]
    SetAttribute(Attribute, i64),
    /// Dots and boxes, each clamped to [0,50]
    SetCharacteristic(Characteristic, i64, i64),
    /// Clamped to [0,200]
    SetCharge(i64),
    SetSkillLine(SkillGroup, SkillId, SkillLinePatch),
    AddPerk(PerkList, Perk),
    RemovePerk(PerkList, usize),
    SetPerk(PerkList, usize, Perk),
    SetNote(NoteField, String),
    SetLang(Lang),
}

/// Apply `edit` to `character`, stamping `now` when something changed
pub fn apply(character: &Character, edit: &Edit, now: DateTime<Utc>) -> Character {
    let mut next = character.clone();

    match edit {
        Edit::RenameCharacter(name) => next.meta.character_name = name.clone(),
        Edit::SetMeta(field, value) => *next.meta.get_mut(*field) = value.clone(),
        Edit::SetAttribute(attr, value) => {
            *next.attributes.get_mut(*attr) =
                (*value).clamp(ATTRIBUTE_MIN as i64, ATTRIBUTE_MAX as i64) as u8;
        }
        Edit::SetCharacteristic(key, dots, boxes) => {
            *next.characteristics.get_mut(*key) = Track::new(*dots, *boxes);
        }
        Edit::SetCharge(value) => {
            next.characteristics.charge = (*value).clamp(0, CHARGE_MAX as i64) as u16;
        }
        Edit::SetSkillLine(group, id, patch) => {
            let Some(entry) = next
                .skills
                .group_mut(*group)
                .iter_mut()
                .find(|e| e.id == *id)
            else {
                log::warn!("Skill {} not found in {} group, edit ignored", id, group);
                return character.clone();
            };
            if let Some(enabled) = patch.enabled {
                entry.line.enabled = enabled;
            }
            if let Some(note) = &patch.note {
                entry.line.note = note.clone();
            }
            if let Some(rating) = patch.rating {
                entry.line.rating = rating.clamp(0, RATING_MAX as i64) as u8;
            }
        }
        Edit::AddPerk(list, perk) => {
            let perk = Perk::new(perk.text.clone(), perk.level as i64);
            next.perks_mut(*list).push(perk);
        }
        Edit::RemovePerk(list, index) => {
            let perks = next.perks_mut(*list);
            if *index >= perks.len() {
                return character.clone();
            }
            perks.remove(*index);
        }
        Edit::SetPerk(list, index, perk) => {
            let Some(slot) = next.perks_mut(*list).get_mut(*index) else {
                return character.clone();
            };
            *slot = Perk::new(perk.text.clone(), perk.level as i64);
        }
        Edit::SetNote(field, value) => *next.notes.get_mut(*field) = value.clone(),
        Edit::SetLang(lang) => next.lang = *lang,
    }

    next.updated_at = now;
    next
}

pub fn rename_character(character: &Character, name: impl Into<String>) -> Character {
    apply(character, &Edit::RenameCharacter(name.into()), Utc::now())
}

pub fn set_meta(character: &Character, field: MetaField, value: impl Into<String>) -> Character {
    apply(character, &Edit::SetMeta(field, value.into()), Utc::now())
}

pub fn set_attribute(character: &Character, attr: Attribute, value: i64) -> Character {
    apply(character, &Edit::SetAttribute(attr, value), Utc::now())
}

pub fn set_characteristic(
    character: &Character,
    key: Characteristic,
    dots: i64,
    boxes: i64,
) -> Character {
    apply(character, &Edit::SetCharacteristic(key, dots, boxes), Utc::now())
}

pub fn set_charge(character: &Character, value: i64) -> Character {
    apply(character, &Edit::SetCharge(value), Utc::now())
}

pub fn set_skill_line(
    character: &Character,
    group: SkillGroup,
    id: SkillId,
    patch: SkillLinePatch,
) -> Character {
    apply(character, &Edit::SetSkillLine(group, id, patch), Utc::now())
}

pub fn add_perk(character: &Character, list: PerkList, perk: Perk) -> Character {
    apply(character, &Edit::AddPerk(list, perk), Utc::now())
}

pub fn remove_perk(character: &Character, list: PerkList, index: usize) -> Character {
    apply(character, &Edit::RemovePerk(list, index), Utc::now())
}

pub fn set_perk(character: &Character, list: PerkList, index: usize, perk: Perk) -> Character {
    apply(character, &Edit::SetPerk(list, index, perk), Utc::now())
}

pub fn set_note(character: &Character, field: NoteField, value: impl Into<String>) -> Character {
    apply(character, &Edit::SetNote(field, value.into()), Utc::now())
}

pub fn set_lang(character: &Character, lang: Lang) -> Character {
    apply(character, &Edit::SetLang(lang), Utc::now())
}
