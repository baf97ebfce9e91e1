//! The character record and its canonical default
//!
//! `Character` is only ever built by [`default_character`], the normalizer or
//! an edit. It serializes to the document shape; it deliberately has no
//! `Deserialize` impl, untrusted input goes through `normalize`.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::skills::{SkillEntry, SkillGroup, SkillId};
use super::{Attribute, Characteristic, Lang, MetaField, NoteField, PerkList, SCHEMA_VERSION};
use crate::consts::*;

/// Free-form identity fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub character_name: String,
    pub player_name: String,
    pub faction: String,
    pub key_items: String,
    pub vice: String,
    pub concept: String,
    pub home: String,
    pub affiliation: String,
}

impl Meta {
    pub fn get(&self, field: MetaField) -> &str {
        match field {
            MetaField::CharacterName => &self.character_name,
            MetaField::PlayerName => &self.player_name,
            MetaField::Faction => &self.faction,
            MetaField::KeyItems => &self.key_items,
            MetaField::Vice => &self.vice,
            MetaField::Concept => &self.concept,
            MetaField::Home => &self.home,
            MetaField::Affiliation => &self.affiliation,
        }
    }

    pub fn get_mut(&mut self, field: MetaField) -> &mut String {
        match field {
            MetaField::CharacterName => &mut self.character_name,
            MetaField::PlayerName => &mut self.player_name,
            MetaField::Faction => &mut self.faction,
            MetaField::KeyItems => &mut self.key_items,
            MetaField::Vice => &mut self.vice,
            MetaField::Concept => &mut self.concept,
            MetaField::Home => &mut self.home,
            MetaField::Affiliation => &mut self.affiliation,
        }
    }
}

/// Attribute ratings, each in [1,5]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attributes {
    pub intellect: u8,
    pub quick_wits: u8,
    pub determination: u8,
    pub magic: u8,
    pub luck: u8,
    pub body_control: u8,
    pub impressiveness: u8,
    pub manipulation: u8,
    pub composure: u8,
}

impl Default for Attributes {
    fn default() -> Self {
        Self {
            intellect: ATTRIBUTE_MIN,
            quick_wits: ATTRIBUTE_MIN,
            determination: ATTRIBUTE_MIN,
            magic: ATTRIBUTE_MIN,
            luck: ATTRIBUTE_MIN,
            body_control: ATTRIBUTE_MIN,
            impressiveness: ATTRIBUTE_MIN,
            manipulation: ATTRIBUTE_MIN,
            composure: ATTRIBUTE_MIN,
        }
    }
}

impl Attributes {
    pub fn get(&self, attr: Attribute) -> u8 {
        match attr {
            Attribute::Intellect => self.intellect,
            Attribute::QuickWits => self.quick_wits,
            Attribute::Determination => self.determination,
            Attribute::Magic => self.magic,
            Attribute::Luck => self.luck,
            Attribute::BodyControl => self.body_control,
            Attribute::Impressiveness => self.impressiveness,
            Attribute::Manipulation => self.manipulation,
            Attribute::Composure => self.composure,
        }
    }

    pub fn get_mut(&mut self, attr: Attribute) -> &mut u8 {
        match attr {
            Attribute::Intellect => &mut self.intellect,
            Attribute::QuickWits => &mut self.quick_wits,
            Attribute::Determination => &mut self.determination,
            Attribute::Magic => &mut self.magic,
            Attribute::Luck => &mut self.luck,
            Attribute::BodyControl => &mut self.body_control,
            Attribute::Impressiveness => &mut self.impressiveness,
            Attribute::Manipulation => &mut self.manipulation,
            Attribute::Composure => &mut self.composure,
        }
    }
}

/// A tracked resource: `dots` is the rating, `boxes` the capacity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Track {
    pub dots: u8,
    pub boxes: u8,
}

impl Track {
    pub fn new(dots: i64, boxes: i64) -> Self {
        Self {
            dots: dots.clamp(0, TRACK_MAX as i64) as u8,
            boxes: boxes.clamp(0, TRACK_MAX as i64) as u8,
        }
    }
}

/// Characteristic tracks plus the scalar charge
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Characteristics {
    pub confidence: Track,
    pub health: Track,
    pub aura: Track,
    pub soul: Track,
    pub qi: Track,
    pub willpower: Track,
    /// Charge in [0,200]
    pub charge: u16,
}

impl Characteristics {
    pub fn get(&self, key: Characteristic) -> Track {
        match key {
            Characteristic::Confidence => self.confidence,
            Characteristic::Health => self.health,
            Characteristic::Aura => self.aura,
            Characteristic::Soul => self.soul,
            Characteristic::Qi => self.qi,
            Characteristic::Willpower => self.willpower,
        }
    }

    pub fn get_mut(&mut self, key: Characteristic) -> &mut Track {
        match key {
            Characteristic::Confidence => &mut self.confidence,
            Characteristic::Health => &mut self.health,
            Characteristic::Aura => &mut self.aura,
            Characteristic::Soul => &mut self.soul,
            Characteristic::Qi => &mut self.qi,
            Characteristic::Willpower => &mut self.willpower,
        }
    }
}

/// The three skill groups, each in canonical order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Skills {
    pub mental: Vec<SkillEntry>,
    pub physical: Vec<SkillEntry>,
    pub social: Vec<SkillEntry>,
}

impl Default for Skills {
    fn default() -> Self {
        Self {
            mental: SkillGroup::Mental.canonical_entries(),
            physical: SkillGroup::Physical.canonical_entries(),
            social: SkillGroup::Social.canonical_entries(),
        }
    }
}

impl Skills {
    pub fn group(&self, group: SkillGroup) -> &[SkillEntry] {
        match group {
            SkillGroup::Mental => &self.mental,
            SkillGroup::Physical => &self.physical,
            SkillGroup::Social => &self.social,
        }
    }

    pub fn group_mut(&mut self, group: SkillGroup) -> &mut Vec<SkillEntry> {
        match group {
            SkillGroup::Mental => &mut self.mental,
            SkillGroup::Physical => &mut self.physical,
            SkillGroup::Social => &mut self.social,
        }
    }

    /// Find an entry by id within its own group
    pub fn entry(&self, id: SkillId) -> Option<&SkillEntry> {
        self.group(id.group()).iter().find(|e| e.id == id)
    }
}

/// A user-authored perk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Perk {
    pub text: String,
    /// Level in [0,5]
    pub level: u8,
}

impl Perk {
    /// Build a perk, clamping `level` to [0,5]
    pub fn new(text: impl Into<String>, level: i64) -> Self {
        Self {
            text: text.into(),
            level: level.clamp(0, RATING_MAX as i64) as u8,
        }
    }
}

/// Free-text note areas
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Notes {
    pub background: String,
    pub inventory: String,
    pub contacts: String,
}

impl Notes {
    pub fn get(&self, field: NoteField) -> &str {
        match field {
            NoteField::Background => &self.background,
            NoteField::Inventory => &self.inventory,
            NoteField::Contacts => &self.contacts,
        }
    }

    pub fn get_mut(&mut self, field: NoteField) -> &mut String {
        match field {
            NoteField::Background => &mut self.background,
            NoteField::Inventory => &mut self.inventory,
            NoteField::Contacts => &mut self.contacts,
        }
    }
}

/// The full character sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub schema_version: u32,
    pub lang: Lang,
    pub meta: Meta,
    pub attributes: Attributes,
    pub characteristics: Characteristics,
    pub skills: Skills,
    pub permanent_perks: Vec<Perk>,
    pub temporary_perks: Vec<Perk>,
    pub notes: Notes,
    pub updated_at: DateTime<Utc>,
}

impl Default for Character {
    fn default() -> Self {
        default_character()
    }
}

/// Canonical default record stamped with the current time
pub fn default_character() -> Character {
    default_character_at(Utc::now())
}

/// Canonical default record stamped with `now`
pub fn default_character_at(now: DateTime<Utc>) -> Character {
    Character {
        schema_version: SCHEMA_VERSION,
        lang: Lang::default(),
        meta: Meta::default(),
        attributes: Attributes::default(),
        characteristics: Characteristics::default(),
        skills: Skills::default(),
        permanent_perks: Vec::new(),
        temporary_perks: Vec::new(),
        notes: Notes::default(),
        updated_at: now,
    }
}

/// A broken record invariant
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    #[error("schema version {0} is not the current version")]
    SchemaVersion(u32),

    #[error("attribute {attr} = {value} is outside [1,5]")]
    Attribute { attr: Attribute, value: u8 },

    #[error("{key} track {dots}/{boxes} exceeds 50")]
    Track {
        key: Characteristic,
        dots: u8,
        boxes: u8,
    },

    #[error("charge {0} exceeds 200")]
    Charge(u16),

    #[error("{0} skills are not the canonical id list")]
    SkillIds(SkillGroup),

    #[error("skill {id} rating {rating} exceeds 5")]
    SkillRating { id: SkillId, rating: u8 },

    #[error("{list}[{index}] level {level} exceeds 5")]
    PerkLevel {
        list: PerkList,
        index: usize,
        level: u8,
    },
}

impl Character {
    pub fn perks(&self, list: PerkList) -> &[Perk] {
        match list {
            PerkList::Permanent => &self.permanent_perks,
            PerkList::Temporary => &self.temporary_perks,
        }
    }

    pub fn perks_mut(&mut self, list: PerkList) -> &mut Vec<Perk> {
        match list {
            PerkList::Permanent => &mut self.permanent_perks,
            PerkList::Temporary => &mut self.temporary_perks,
        }
    }

    /// Every broken invariant, empty for a well-formed record
    pub fn violations(&self) -> Vec<Violation> {
        let mut found = Vec::new();

        if self.schema_version != SCHEMA_VERSION {
            found.push(Violation::SchemaVersion(self.schema_version));
        }

        for &attr in Attribute::ALL {
            let value = self.attributes.get(attr);
            if !(ATTRIBUTE_MIN..=ATTRIBUTE_MAX).contains(&value) {
                found.push(Violation::Attribute { attr, value });
            }
        }

        for &key in Characteristic::ALL {
            let Track { dots, boxes } = self.characteristics.get(key);
            if dots > TRACK_MAX || boxes > TRACK_MAX {
                found.push(Violation::Track { key, dots, boxes });
            }
        }
        if self.characteristics.charge > CHARGE_MAX {
            found.push(Violation::Charge(self.characteristics.charge));
        }

        for &group in SkillGroup::ALL {
            let entries = self.skills.group(group);
            let ids: Vec<SkillId> = entries.iter().map(|e| e.id).collect();
            if ids != group.skill_ids() {
                found.push(Violation::SkillIds(group));
            }
            for entry in entries {
                if entry.line.rating > RATING_MAX {
                    found.push(Violation::SkillRating {
                        id: entry.id,
                        rating: entry.line.rating,
                    });
                }
            }
        }

        for &list in PerkList::ALL {
            for (index, perk) in self.perks(list).iter().enumerate() {
                if perk.level > RATING_MAX {
                    found.push(Violation::PerkLevel {
                        list,
                        index,
                        level: perk.level,
                    });
                }
            }
        }

        found
    }

    /// True when no invariant is broken
    pub fn is_valid(&self) -> bool {
        self.violations().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let c = default_character();
        assert!(c.is_valid(), "{:?}", c.violations());
        assert_eq!(c.schema_version, SCHEMA_VERSION);
        assert_eq!(c.lang, Lang::En);
    }

    #[test]
    fn test_default_values_are_minimal() {
        let c = default_character();
        for &attr in Attribute::ALL {
            assert_eq!(c.attributes.get(attr), 1);
        }
        for &key in Characteristic::ALL {
            assert_eq!(c.characteristics.get(key), Track::default());
        }
        assert_eq!(c.characteristics.charge, 0);
        for &field in MetaField::ALL {
            assert!(c.meta.get(field).is_empty());
        }
        assert!(c.permanent_perks.is_empty());
        assert!(c.temporary_perks.is_empty());
        assert_eq!(c.skills.mental.len(), 6);
    }

    #[test]
    fn test_violations_are_reported() {
        let mut c = default_character();
        c.attributes.luck = 0;
        c.characteristics.charge = 201;
        c.skills.social.swap(0, 1);
        c.temporary_perks.push(Perk {
            text: "Rage".into(),
            level: 6,
        });

        let found = c.violations();
        assert!(found.contains(&Violation::Attribute {
            attr: Attribute::Luck,
            value: 0
        }));
        assert!(found.contains(&Violation::Charge(201)));
        assert!(found.contains(&Violation::SkillIds(SkillGroup::Social)));
        assert!(found.contains(&Violation::PerkLevel {
            list: PerkList::Temporary,
            index: 0,
            level: 6
        }));
    }

    #[test]
    fn test_perk_and_track_constructors_clamp() {
        assert_eq!(Perk::new("Tough", 9).level, 5);
        assert_eq!(Perk::new("Frail", -3).level, 0);
        assert_eq!(Track::new(60, -1), Track { dots: 50, boxes: 0 });
    }

    #[test]
    fn test_skill_entry_lookup_stays_in_group() {
        let c = default_character();
        let entry = c.skills.entry(SkillId::Stealth);
        assert_eq!(entry.map(|e| e.id), Some(SkillId::Stealth));
    }
}
