//! Sheet preferences
//!
//! Persisted separately from the character record: only the interface
//! language survives a reload, under its own bare key.

use crate::persistence::{ByteStore, Persistence};
use crate::schema::Lang;

/// Editor preferences
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Interface language
    pub language: Lang,
    /// Save after every edit (session only)
    pub autosave: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: Lang::En,
            autosave: true,
        }
    }
}

impl Settings {
    /// Load stored preferences. Without a stored language preference the
    /// interface follows `fallback` (the language of the loaded record).
    pub fn load<S: ByteStore>(persistence: &Persistence<S>, fallback: Lang) -> Self {
        let language = match persistence.load_language() {
            Some(language) => {
                log::info!("Loaded language preference: {}", language);
                language
            }
            None => {
                log::info!("No language preference, using {}", fallback);
                fallback
            }
        };
        Self {
            language,
            ..Self::default()
        }
    }

    /// Save preferences (best-effort)
    pub fn save<S: ByteStore>(&self, persistence: &mut Persistence<S>) {
        persistence.save_language(self.language);
    }

    /// Switch language, returning whether it changed
    pub fn set_language(&mut self, language: Lang) -> bool {
        let changed = self.language != language;
        self.language = language;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_defaults() {
        let settings = Settings::load(&Persistence::new(MemoryStore::new()), Lang::En);
        assert_eq!(settings, Settings::default());
        assert!(settings.autosave);
    }

    #[test]
    fn test_missing_preference_follows_fallback() {
        let settings = Settings::load(&Persistence::new(MemoryStore::new()), Lang::Ru);
        assert_eq!(settings.language, Lang::Ru);
    }

    #[test]
    fn test_language_survives_reload() {
        let mut p = Persistence::new(MemoryStore::new());
        let mut settings = Settings::default();
        assert!(settings.set_language(Lang::Ru));
        assert!(!settings.set_language(Lang::Ru));
        settings.save(&mut p);

        let reloaded = Settings::load(&p, Lang::En);
        assert_eq!(reloaded.language, Lang::Ru);
    }
}
