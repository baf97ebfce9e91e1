//! Editing session
//!
//! A [`Sheet`] owns the current record, the preferences and the persistence
//! adapter. Every user action is one synchronous edit-then-save cycle; the
//! record is replaced wholesale each time.

use crate::edit::{self, Edit};
use crate::format::{self, FormatError};
use crate::normalize::normalize;
use crate::persistence::{ByteStore, Persistence, SaveStatus};
use crate::schema::{Character, Lang, default_character};
use crate::settings::Settings;

pub struct Sheet<S: ByteStore> {
    character: Character,
    settings: Settings,
    persistence: Persistence<S>,
    last_save: Option<SaveStatus>,
}

impl<S: ByteStore> Sheet<S> {
    /// Load the stored record (or start from defaults) and preferences
    pub fn open(store: S) -> Self {
        let persistence = Persistence::new(store);
        let mut character = persistence.load().unwrap_or_else(|| {
            log::info!("Starting a new character");
            default_character()
        });
        let settings = Settings::load(&persistence, character.lang);
        character.lang = settings.language;

        Self {
            character,
            settings,
            persistence,
            last_save: None,
        }
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn persistence(&self) -> &Persistence<S> {
        &self.persistence
    }

    pub fn persistence_mut(&mut self) -> &mut Persistence<S> {
        &mut self.persistence
    }

    /// Result of the most recent save, `None` before the first one
    pub fn last_save(&self) -> Option<SaveStatus> {
        self.last_save
    }

    /// Apply one edit, then save if autosave is on
    pub fn apply(&mut self, edit: &Edit) -> Option<SaveStatus> {
        let next = edit::apply(&self.character, edit, chrono::Utc::now());
        if next == self.character {
            return None;
        }
        self.character = next;

        if let Edit::SetLang(lang) = edit {
            self.remember_language(*lang);
        }

        if self.settings.autosave {
            Some(self.save())
        } else {
            None
        }
    }

    /// Save the current record now
    pub fn save(&mut self) -> SaveStatus {
        let status = self.persistence.save(&self.character);
        self.last_save = Some(status);
        status
    }

    pub fn set_autosave(&mut self, autosave: bool) {
        self.settings.autosave = autosave;
        if autosave {
            self.save();
        }
    }

    /// Switch language of both the record and the interface
    pub fn set_language(&mut self, lang: Lang) -> Option<SaveStatus> {
        self.apply(&Edit::SetLang(lang))
    }

    fn remember_language(&mut self, lang: Lang) {
        if self.settings.set_language(lang) {
            self.settings.save(&mut self.persistence);
        }
    }

    /// Replace the record with an imported YAML document.
    ///
    /// Parse failures leave the record and the stored copy untouched.
    /// Anything that parses is accepted, field by field.
    pub fn import_yaml(&mut self, text: &str) -> Result<Option<SaveStatus>, FormatError> {
        let value = format::from_yaml(text)?;
        self.character = normalize(&value);
        self.remember_language(self.character.lang);
        log::info!("Imported character {:?}", self.character.meta.character_name);

        Ok(if self.settings.autosave {
            Some(self.save())
        } else {
            None
        })
    }

    pub fn export_yaml(&self) -> Result<String, FormatError> {
        format::to_yaml(&self.character)
    }

    /// Back to defaults, stored copy removed. The language is kept.
    pub fn reset(&mut self) {
        let mut fresh = default_character();
        fresh.lang = self.settings.language;
        self.character = fresh;
        self.persistence.clear();
        self.last_save = None;
        log::info!("Character reset");
    }

    pub fn into_persistence(self) -> Persistence<S> {
        self.persistence
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::schema::{Attribute, Perk, PerkList};

    #[test]
    fn test_open_empty_store_gives_defaults() {
        let sheet = Sheet::open(MemoryStore::new());
        assert!(sheet.character().is_valid());
        assert_eq!(sheet.character().meta.character_name, "");
        assert_eq!(sheet.last_save(), None);
    }

    #[test]
    fn test_edits_persist_across_sessions() {
        let mut sheet = Sheet::open(MemoryStore::new());
        assert_eq!(
            sheet.apply(&Edit::RenameCharacter("Ilsa".into())),
            Some(SaveStatus::Saved)
        );
        sheet.apply(&Edit::SetAttribute(Attribute::Luck, 4));

        let store = sheet.into_persistence().into_store();
        let reopened = Sheet::open(store);
        assert_eq!(reopened.character().meta.character_name, "Ilsa");
        assert_eq!(reopened.character().attributes.luck, 4);
    }

    #[test]
    fn test_noop_edit_does_not_save() {
        let mut sheet = Sheet::open(MemoryStore::new());
        assert_eq!(sheet.apply(&Edit::RemovePerk(PerkList::Permanent, 2)), None);
        assert!(sheet.persistence().store().is_empty());
    }

    #[test]
    fn test_failing_store_keeps_session_alive() {
        let mut store = MemoryStore::new();
        store.fail_writes = true;
        let mut sheet = Sheet::open(store);
        let status = sheet.apply(&Edit::AddPerk(PerkList::Temporary, Perk::new("Blessed", 2)));
        assert_eq!(status, Some(SaveStatus::NotSaved));
        assert_eq!(sheet.character().temporary_perks.len(), 1);
        assert_eq!(sheet.last_save(), Some(SaveStatus::NotSaved));
    }

    #[test]
    fn test_malformed_import_changes_nothing() {
        let mut sheet = Sheet::open(MemoryStore::new());
        sheet.apply(&Edit::RenameCharacter("Keep me".into()));
        let before = sheet.character().clone();

        assert!(sheet.import_yaml("meta: {characterName: [").is_err());
        assert_eq!(sheet.character(), &before);

        let store = sheet.into_persistence().into_store();
        assert_eq!(Sheet::open(store).character().meta.character_name, "Keep me");
    }

    #[test]
    fn test_import_replaces_record() {
        let mut sheet = Sheet::open(MemoryStore::new());
        sheet.apply(&Edit::RenameCharacter("Old".into()));
        let yaml = "lang: ru\nmeta:\n  characterName: New\nattributes:\n  luck: 9\n";
        assert_eq!(sheet.import_yaml(yaml).unwrap(), Some(SaveStatus::Saved));
        assert_eq!(sheet.character().meta.character_name, "New");
        assert_eq!(sheet.character().attributes.luck, 5);
        assert_eq!(sheet.character().lang, Lang::Ru);
        assert_eq!(sheet.settings().language, Lang::Ru);
    }

    #[test]
    fn test_import_clamps_oversized_numbers() {
        let mut sheet = Sheet::open(MemoryStore::new());
        let yaml = "attributes: {luck: 18446744073709551616000}\n";
        assert_eq!(sheet.import_yaml(yaml).unwrap(), Some(SaveStatus::Saved));
        assert_eq!(sheet.character().attributes.luck, 5);
    }

    #[test]
    fn test_export_import_round_trip() {
        let mut sheet = Sheet::open(MemoryStore::new());
        sheet.apply(&Edit::RenameCharacter("Ilsa".into()));
        sheet.apply(&Edit::AddPerk(PerkList::Permanent, Perk::new("Tough", 3)));
        let yaml = sheet.export_yaml().unwrap();

        let mut other = Sheet::open(MemoryStore::new());
        other.import_yaml(&yaml).unwrap();
        let mut expected = sheet.character().clone();
        expected.updated_at = other.character().updated_at;
        assert_eq!(other.character(), &expected);
    }

    #[test]
    fn test_reset_clears_storage_but_keeps_language() {
        let mut sheet = Sheet::open(MemoryStore::new());
        sheet.set_language(Lang::Ru);
        sheet.apply(&Edit::RenameCharacter("Gone".into()));
        sheet.reset();

        assert_eq!(sheet.character().meta.character_name, "");
        assert_eq!(sheet.character().lang, Lang::Ru);
        assert!(sheet.persistence().load().is_none());
        assert_eq!(sheet.persistence().load_language(), Some(Lang::Ru));
    }

    #[test]
    fn test_language_preference_overrides_record() {
        let mut sheet = Sheet::open(MemoryStore::new());
        sheet.apply(&Edit::RenameCharacter("Ilsa".into()));
        sheet.persistence_mut().save_language(Lang::Ru);

        let store = sheet.into_persistence().into_store();
        let reopened = Sheet::open(store);
        assert_eq!(reopened.character().lang, Lang::Ru);
        assert_eq!(reopened.settings().language, Lang::Ru);
    }

    #[test]
    fn test_record_language_used_without_preference() {
        let mut persistence = Persistence::new(MemoryStore::new());
        let mut record = default_character();
        record.lang = Lang::Ru;
        assert_eq!(persistence.save(&record), SaveStatus::Saved);
        assert_eq!(persistence.load_language(), None);

        let sheet = Sheet::open(persistence.into_store());
        assert_eq!(sheet.character().lang, Lang::Ru);
        assert_eq!(sheet.settings().language, Lang::Ru);
    }

    #[test]
    fn test_autosave_off_defers_saving() {
        let mut sheet = Sheet::open(MemoryStore::new());
        sheet.set_autosave(false);
        assert_eq!(sheet.apply(&Edit::RenameCharacter("Draft".into())), None);
        assert!(sheet.persistence().load().is_none());

        sheet.set_autosave(true);
        let loaded = sheet.persistence().load().unwrap();
        assert_eq!(loaded.meta.character_name, "Draft");
    }
}
