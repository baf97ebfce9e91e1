//! Browser bindings (WASM only)
//!
//! The page renders the form and calls into [`WebSheet`] for every user
//! action. Records cross the boundary as JSON text; keys are the wire names
//! of the schema enums (`"luck"`, `"characterName"`, `"permanentPerks"`...).

use wasm_bindgen::prelude::*;

use crate::edit::{Edit, SkillLinePatch};
use crate::format;
use crate::i18n;
use crate::persistence::{LocalStorageStore, SaveStatus};
use crate::schema::{
    Attribute, Characteristic, Lang, MetaField, NoteField, Perk, PerkList, SkillGroup, SkillId,
};
use crate::sheet::Sheet;
use crate::ui::circle_click;

fn unknown(kind: &str, key: &str) -> JsValue {
    JsValue::from_str(&format!("unknown {}: {}", kind, key))
}

fn status_label(sheet: &Sheet<LocalStorageStore>, status: Option<SaveStatus>) -> String {
    let lang = sheet.settings().language;
    match status.or(sheet.last_save()) {
        Some(s) => i18n::t(lang, s.label_key()).to_string(),
        None => String::new(),
    }
}

#[wasm_bindgen]
pub struct WebSheet {
    sheet: Sheet<LocalStorageStore>,
}

#[wasm_bindgen]
impl WebSheet {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebSheet {
        WebSheet {
            sheet: Sheet::open(LocalStorageStore::new()),
        }
    }

    /// Current record as JSON
    pub fn character_json(&self) -> Result<String, JsValue> {
        format::to_json(self.sheet.character()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn export_yaml(&self) -> Result<String, JsValue> {
        self.sheet
            .export_yaml()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Throws the parse error; the sheet is left untouched in that case
    pub fn import_yaml(&mut self, text: &str) -> Result<String, JsValue> {
        match self.sheet.import_yaml(text) {
            Ok(status) => Ok(status_label(&self.sheet, status)),
            Err(e) => {
                log::warn!("Import rejected: {}", e);
                let lang = self.sheet.settings().language;
                Err(JsValue::from_str(&format!(
                    "{}: {}",
                    i18n::t(lang, "importFailed"),
                    e
                )))
            }
        }
    }

    pub fn reset(&mut self) {
        self.sheet.reset();
    }

    pub fn rename(&mut self, name: String) -> String {
        let status = self.sheet.apply(&Edit::RenameCharacter(name));
        status_label(&self.sheet, status)
    }

    pub fn set_meta(&mut self, field: &str, value: String) -> Result<String, JsValue> {
        let field = MetaField::from_wire(field).ok_or_else(|| unknown("meta field", field))?;
        let status = self.sheet.apply(&Edit::SetMeta(field, value));
        Ok(status_label(&self.sheet, status))
    }

    pub fn set_attribute(&mut self, key: &str, value: i32) -> Result<String, JsValue> {
        let attr = Attribute::from_wire(key).ok_or_else(|| unknown("attribute", key))?;
        let status = self.sheet.apply(&Edit::SetAttribute(attr, value as i64));
        Ok(status_label(&self.sheet, status))
    }

    /// Circle control click on an attribute
    pub fn click_attribute(&mut self, key: &str, index: u8) -> Result<String, JsValue> {
        let attr = Attribute::from_wire(key).ok_or_else(|| unknown("attribute", key))?;
        let current = self.sheet.character().attributes.get(attr);
        let value = circle_click(current, index);
        let status = self.sheet.apply(&Edit::SetAttribute(attr, value as i64));
        Ok(status_label(&self.sheet, status))
    }

    pub fn set_characteristic(
        &mut self,
        key: &str,
        dots: i32,
        boxes: i32,
    ) -> Result<String, JsValue> {
        let key = Characteristic::from_wire(key).ok_or_else(|| unknown("characteristic", key))?;
        let status = self
            .sheet
            .apply(&Edit::SetCharacteristic(key, dots as i64, boxes as i64));
        Ok(status_label(&self.sheet, status))
    }

    pub fn set_charge(&mut self, value: i32) -> String {
        let status = self.sheet.apply(&Edit::SetCharge(value as i64));
        status_label(&self.sheet, status)
    }

    /// Update one skill line; `rating` below zero leaves the rating alone
    pub fn set_skill(
        &mut self,
        group: &str,
        id: &str,
        enabled: bool,
        note: String,
        rating: i32,
    ) -> Result<String, JsValue> {
        let group = SkillGroup::from_wire(group).ok_or_else(|| unknown("skill group", group))?;
        let id = SkillId::from_wire(id).ok_or_else(|| unknown("skill", id))?;
        let patch = SkillLinePatch {
            enabled: Some(enabled),
            note: Some(note),
            rating: (rating >= 0).then_some(rating as i64),
        };
        let status = self.sheet.apply(&Edit::SetSkillLine(group, id, patch));
        Ok(status_label(&self.sheet, status))
    }

    pub fn add_perk(&mut self, list: &str, text: String, level: i32) -> Result<String, JsValue> {
        let list = PerkList::from_wire(list).ok_or_else(|| unknown("perk list", list))?;
        let status = self
            .sheet
            .apply(&Edit::AddPerk(list, Perk::new(text, level as i64)));
        Ok(status_label(&self.sheet, status))
    }

    pub fn set_perk(
        &mut self,
        list: &str,
        index: usize,
        text: String,
        level: i32,
    ) -> Result<String, JsValue> {
        let list = PerkList::from_wire(list).ok_or_else(|| unknown("perk list", list))?;
        let status = self
            .sheet
            .apply(&Edit::SetPerk(list, index, Perk::new(text, level as i64)));
        Ok(status_label(&self.sheet, status))
    }

    pub fn remove_perk(&mut self, list: &str, index: usize) -> Result<String, JsValue> {
        let list = PerkList::from_wire(list).ok_or_else(|| unknown("perk list", list))?;
        let status = self.sheet.apply(&Edit::RemovePerk(list, index));
        Ok(status_label(&self.sheet, status))
    }

    pub fn set_note(&mut self, field: &str, value: String) -> Result<String, JsValue> {
        let field = NoteField::from_wire(field).ok_or_else(|| unknown("note field", field))?;
        let status = self.sheet.apply(&Edit::SetNote(field, value));
        Ok(status_label(&self.sheet, status))
    }

    pub fn set_language(&mut self, lang: &str) -> Result<String, JsValue> {
        let lang = Lang::from_wire(lang).ok_or_else(|| unknown("language", lang))?;
        let status = self.sheet.set_language(lang);
        Ok(status_label(&self.sheet, status))
    }

    pub fn language(&self) -> String {
        self.sheet.settings().language.as_str().to_string()
    }

    pub fn set_autosave(&mut self, autosave: bool) {
        self.sheet.set_autosave(autosave);
    }

    /// Label in the current interface language
    pub fn t(&self, key: &str) -> String {
        i18n::t(self.sheet.settings().language, key).to_string()
    }
}

impl Default for WebSheet {
    fn default() -> Self {
        Self::new()
    }
}
