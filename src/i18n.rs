//! Interface labels in English and Russian
//!
//! Lookup falls back to English, then to the key itself. Keys are the wire
//! names of the schema enums plus a handful of UI strings.

use crate::schema::Lang;

const EN: &[(&str, &str)] = &[
    ("title", "Character Sheet"),
    ("language", "Language"),
    ("english", "English"),
    ("russian", "Russian"),
    ("autosave", "Autosave"),
    ("saved", "Saved"),
    ("notSaved", "Not saved"),
    ("meta", "Meta"),
    ("attributes", "Attributes"),
    ("characteristics", "Characteristics"),
    ("skills", "Skills"),
    ("notes", "Notes"),
    ("exportYaml", "Export YAML"),
    ("importYaml", "Import YAML"),
    ("importFailed", "Import failed"),
    ("reset", "Reset"),
    ("addPerk", "Add perk"),
    ("removePerk", "Remove"),
    ("permanentPerks", "Permanent perks"),
    ("temporaryPerks", "Temporary perks"),
    // Meta
    ("characterName", "Character name"),
    ("playerName", "Player name"),
    ("faction", "Faction"),
    ("keyItems", "Key items"),
    ("vice", "Vice"),
    ("concept", "Concept"),
    ("home", "Home"),
    ("affiliation", "Affiliation"),
    // Notes
    ("background", "Background"),
    ("inventory", "Inventory"),
    ("contacts", "Contacts"),
    // Attributes
    ("intellect", "Intellect"),
    ("quickWits", "Quick wits"),
    ("determination", "Determination"),
    ("magic", "Magic"),
    ("luck", "Luck"),
    ("bodyControl", "Body control"),
    ("impressiveness", "Impressiveness"),
    ("manipulation", "Manipulation"),
    ("composure", "Composure"),
    // Characteristics
    ("confidence", "Confidence"),
    ("health", "Health"),
    ("aura", "Aura"),
    ("soul", "Soul"),
    ("qi", "Qi"),
    ("willpower", "Willpower"),
    ("charge", "Charge"),
    // Skill groups
    ("mental", "Mental"),
    ("physical", "Physical"),
    ("social", "Social"),
    // Skills
    ("academics", "Academics"),
    ("investigation", "Investigation"),
    ("medicine", "Medicine"),
    ("occult", "Occult"),
    ("crafts", "Crafts"),
    ("lore", "Lore"),
    ("athletics", "Athletics"),
    ("melee", "Melee"),
    ("ranged", "Ranged"),
    ("stealth", "Stealth"),
    ("survival", "Survival"),
    ("larceny", "Larceny"),
    ("diplomacy", "Diplomacy"),
    ("intimidation", "Intimidation"),
    ("insight", "Insight"),
    ("deception", "Deception"),
    ("performance", "Performance"),
    ("streetwise", "Streetwise"),
];

const RU: &[(&str, &str)] = &[
    ("title", "Лист персонажа"),
    ("language", "Язык"),
    ("english", "Английский"),
    ("russian", "Русский"),
    ("autosave", "Автосохранение"),
    ("saved", "Сохранено"),
    ("notSaved", "Не сохранено"),
    ("meta", "Данные"),
    ("attributes", "Атрибуты"),
    ("characteristics", "Характеристики"),
    ("skills", "Навыки"),
    ("notes", "Заметки"),
    ("exportYaml", "Экспорт YAML"),
    ("importYaml", "Импорт YAML"),
    ("importFailed", "Ошибка импорта"),
    ("reset", "Сброс"),
    ("addPerk", "Добавить перк"),
    ("removePerk", "Удалить"),
    ("permanentPerks", "Постоянные перки"),
    ("temporaryPerks", "Временные перки"),
    ("characterName", "Имя персонажа"),
    ("playerName", "Игрок"),
    ("faction", "Фракция"),
    ("keyItems", "Ключевые предметы"),
    ("vice", "Порок"),
    ("concept", "Концепт"),
    ("home", "Дом"),
    ("affiliation", "Принадлежность"),
    ("background", "Предыстория"),
    ("inventory", "Инвентарь"),
    ("contacts", "Контакты"),
    ("intellect", "Интеллект"),
    ("quickWits", "Сообразительность"),
    ("determination", "Решимость"),
    ("magic", "Магия"),
    ("luck", "Удача"),
    ("bodyControl", "Владение телом"),
    ("impressiveness", "Впечатление"),
    ("manipulation", "Манипуляция"),
    ("composure", "Самообладание"),
    ("confidence", "Уверенность"),
    ("health", "Здоровье"),
    ("aura", "Аура"),
    ("soul", "Душа"),
    ("qi", "Ци"),
    ("willpower", "Сила воли"),
    ("charge", "Заряд"),
    ("mental", "Ментальные"),
    ("physical", "Физические"),
    ("social", "Социальные"),
    ("academics", "Наука"),
    ("investigation", "Расследование"),
    ("medicine", "Медицина"),
    ("occult", "Оккультизм"),
    ("crafts", "Ремесло"),
    ("lore", "Знания"),
    ("athletics", "Атлетика"),
    ("melee", "Ближний бой"),
    ("ranged", "Стрельба"),
    ("stealth", "Скрытность"),
    ("survival", "Выживание"),
    ("larceny", "Воровство"),
    ("diplomacy", "Дипломатия"),
    ("intimidation", "Запугивание"),
    ("insight", "Проницательность"),
    ("deception", "Обман"),
    ("performance", "Выступление"),
    ("streetwise", "Знание улиц"),
];

fn dict(lang: Lang) -> &'static [(&'static str, &'static str)] {
    match lang {
        Lang::En => EN,
        Lang::Ru => RU,
    }
}

fn lookup(lang: Lang, key: &str) -> Option<&'static str> {
    dict(lang).iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Label for `key` in `lang`, then English, then the key itself
pub fn t(lang: Lang, key: &str) -> &str {
    lookup(lang, key).or_else(|| lookup(Lang::En, key)).unwrap_or(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Attribute, Characteristic, MetaField, NoteField, SkillGroup, SkillId};

    #[test]
    fn test_lookup_and_fallback() {
        assert_eq!(t(Lang::En, "reset"), "Reset");
        assert_eq!(t(Lang::Ru, "reset"), "Сброс");
        assert_eq!(t(Lang::Ru, "no.such.key"), "no.such.key");
    }

    #[test]
    fn test_every_schema_label_exists_in_english() {
        let keys = Attribute::ALL
            .iter()
            .map(|a| a.as_str())
            .chain(Characteristic::ALL.iter().map(|c| c.as_str()))
            .chain(MetaField::ALL.iter().map(|f| f.as_str()))
            .chain(NoteField::ALL.iter().map(|f| f.as_str()))
            .chain(SkillGroup::ALL.iter().map(|g| g.as_str()))
            .chain(SkillId::ALL.iter().map(|s| s.as_str()));
        for key in keys {
            assert!(lookup(Lang::En, key).is_some(), "missing label {key}");
            assert!(lookup(Lang::Ru, key).is_some(), "missing ru label {key}");
        }
    }

    #[test]
    fn test_no_duplicate_keys() {
        for lang in Lang::ALL {
            let d = dict(*lang);
            for (i, (k, _)) in d.iter().enumerate() {
                assert!(!d[i + 1..].iter().any(|(other, _)| other == k), "{k} repeated");
            }
        }
    }
}
