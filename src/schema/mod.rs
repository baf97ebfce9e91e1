//! Character record schema
//!
//! The record shape, its closed enumerations and the canonical default.
//! Bump `SCHEMA_VERSION` whenever the shape changes: the storage key and the
//! normalizer's rule table are both keyed by it.

/// Defines a closed enumeration with a fixed wire name per member.
///
/// Generates `ALL` (canonical order), `as_str`, `from_wire` (exact match) and
/// `Display`. Members serialize as their wire name. Extra derives (such as
/// `Default` with a `#[default]` member) pass through the attributes.
macro_rules! closed_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            /// Every member, in canonical order
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// Name used in documents and storage
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }

            /// Exact match on the wire name (no case folding, no aliases)
            pub fn from_wire(s: &str) -> Option<Self> {
                match s {
                    $($wire => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub mod character;
pub mod skills;

pub use character::{
    Attributes, Character, Characteristics, Meta, Notes, Perk, Skills, Track, Violation,
    default_character, default_character_at,
};
pub use skills::{SkillEntry, SkillGroup, SkillId, SkillLine};

/// Current record layout version, stamped on every normalized record
pub const SCHEMA_VERSION: u32 = 1;

closed_enum! {
    /// Interface language of the sheet
    #[derive(Default)]
    pub enum Lang {
        #[default]
        En => "en",
        Ru => "ru",
    }
}

closed_enum! {
    /// Rated attributes, each in [1,5]
    pub enum Attribute {
        Intellect => "intellect",
        QuickWits => "quickWits",
        Determination => "determination",
        Magic => "magic",
        Luck => "luck",
        BodyControl => "bodyControl",
        Impressiveness => "impressiveness",
        Manipulation => "manipulation",
        Composure => "composure",
    }
}

closed_enum! {
    /// Tracked resources, each a dots/boxes pair
    pub enum Characteristic {
        Confidence => "confidence",
        Health => "health",
        Aura => "aura",
        Soul => "soul",
        Qi => "qi",
        Willpower => "willpower",
    }
}

closed_enum! {
    /// Free-form identity fields
    pub enum MetaField {
        CharacterName => "characterName",
        PlayerName => "playerName",
        /// Journey or faction the character belongs to
        Faction => "faction",
        KeyItems => "keyItems",
        Vice => "vice",
        Concept => "concept",
        Home => "home",
        Affiliation => "affiliation",
    }
}

closed_enum! {
    /// Free-text note areas
    pub enum NoteField {
        Background => "background",
        Inventory => "inventory",
        Contacts => "contacts",
    }
}

closed_enum! {
    /// The two perk lists on the sheet
    pub enum PerkList {
        Permanent => "permanentPerks",
        Temporary => "temporaryPerks",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_are_exact() {
        assert_eq!(Lang::from_wire("ru"), Some(Lang::Ru));
        assert_eq!(Lang::from_wire("RU"), None);
        assert_eq!(Lang::from_wire("de"), None);
        assert_eq!(Attribute::from_wire("quickWits"), Some(Attribute::QuickWits));
        assert_eq!(Attribute::from_wire("quick_wits"), None);
    }

    #[test]
    fn test_all_round_trips_through_wire_names() {
        for attr in Attribute::ALL {
            assert_eq!(Attribute::from_wire(attr.as_str()), Some(*attr));
        }
        for field in MetaField::ALL {
            assert_eq!(MetaField::from_wire(&field.to_string()), Some(*field));
        }
        assert_eq!(Attribute::ALL.len(), 9);
        assert_eq!(Characteristic::ALL.len(), 6);
    }

    #[test]
    fn test_default_language_is_english() {
        assert_eq!(Lang::default(), Lang::En);
    }

    #[test]
    fn test_enums_serialize_as_wire_names() {
        assert_eq!(serde_json::to_string(&Lang::Ru).ok().as_deref(), Some("\"ru\""));
        assert_eq!(
            serde_json::to_string(&PerkList::Temporary).ok().as_deref(),
            Some("\"temporaryPerks\"")
        );
    }
}
