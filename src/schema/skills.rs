//! Skill groups and their canonical skill ids
//!
//! Each group owns a closed, ordered set of ids. Records always carry
//! exactly that set in that order; user data only ever touches the `line`.

use serde::Serialize;

closed_enum! {
    /// The three skill categories, in sheet order
    pub enum SkillGroup {
        Mental => "mental",
        Physical => "physical",
        Social => "social",
    }
}

closed_enum! {
    /// Every canonical skill id across all groups
    pub enum SkillId {
        // Mental
        Academics => "academics",
        Investigation => "investigation",
        Medicine => "medicine",
        Occult => "occult",
        Crafts => "crafts",
        Lore => "lore",
        // Physical
        Athletics => "athletics",
        Melee => "melee",
        Ranged => "ranged",
        Stealth => "stealth",
        Survival => "survival",
        Larceny => "larceny",
        // Social
        Diplomacy => "diplomacy",
        Intimidation => "intimidation",
        Insight => "insight",
        Deception => "deception",
        Performance => "performance",
        Streetwise => "streetwise",
    }
}

const MENTAL: &[SkillId] = &[
    SkillId::Academics,
    SkillId::Investigation,
    SkillId::Medicine,
    SkillId::Occult,
    SkillId::Crafts,
    SkillId::Lore,
];

const PHYSICAL: &[SkillId] = &[
    SkillId::Athletics,
    SkillId::Melee,
    SkillId::Ranged,
    SkillId::Stealth,
    SkillId::Survival,
    SkillId::Larceny,
];

const SOCIAL: &[SkillId] = &[
    SkillId::Diplomacy,
    SkillId::Intimidation,
    SkillId::Insight,
    SkillId::Deception,
    SkillId::Performance,
    SkillId::Streetwise,
];

impl SkillGroup {
    /// Canonical ids of this group, in sheet order
    pub fn skill_ids(&self) -> &'static [SkillId] {
        match self {
            SkillGroup::Mental => MENTAL,
            SkillGroup::Physical => PHYSICAL,
            SkillGroup::Social => SOCIAL,
        }
    }

    /// Fresh entries for this group (all disabled, rating 0, empty note)
    pub fn canonical_entries(&self) -> Vec<SkillEntry> {
        self.skill_ids()
            .iter()
            .map(|&id| SkillEntry {
                id,
                line: SkillLine::default(),
            })
            .collect()
    }
}

impl SkillId {
    /// Group this id belongs to
    pub fn group(&self) -> SkillGroup {
        use SkillId::*;
        match self {
            Academics | Investigation | Medicine | Occult | Crafts | Lore => SkillGroup::Mental,
            Athletics | Melee | Ranged | Stealth | Survival | Larceny => SkillGroup::Physical,
            Diplomacy | Intimidation | Insight | Deception | Performance | Streetwise => {
                SkillGroup::Social
            }
        }
    }
}

/// Mutable part of a skill entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SkillLine {
    /// Whether the character has the skill marked
    pub enabled: bool,
    /// Specialisation or remark
    pub note: String,
    /// Rating in [0,5]
    pub rating: u8,
}

/// A skill with its immutable canonical id
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillEntry {
    pub id: SkillId,
    pub line: SkillLine,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_id_belongs_to_exactly_one_group() {
        for id in SkillId::ALL {
            let owners = SkillGroup::ALL
                .iter()
                .filter(|g| g.skill_ids().contains(id))
                .count();
            assert_eq!(owners, 1, "{id} should be in exactly one group");
        }
    }

    #[test]
    fn test_group_lookup() {
        assert_eq!(SkillId::Lore.group(), SkillGroup::Mental);
        assert_eq!(SkillId::Larceny.group(), SkillGroup::Physical);
        assert_eq!(SkillId::Streetwise.group(), SkillGroup::Social);
    }

    #[test]
    fn test_canonical_entries_are_blank() {
        let entries = SkillGroup::Social.canonical_entries();
        assert_eq!(entries.len(), 6);
        assert_eq!(entries[0].id, SkillId::Diplomacy);
        assert!(entries.iter().all(|e| e.line == SkillLine::default()));
    }
}
