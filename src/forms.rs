//! Form-widget mirroring
//!
//! A form that wants its widget values persisted implements [`FormMirror`]
//! and hands the store a `{widget_name: value}` snapshot; the store keeps it
//! under a caller-chosen key alongside the ordinary config entries, so one
//! file can carry snapshots for several forms. The adapter knows nothing
//! about any GUI toolkit; [`WidgetValue`] is the fixed set of value shapes
//! the common widget kinds produce (text fields, checkboxes and radio
//! buttons, combo-box indices, spinboxes) and is what a `FormMirror`
//! implementation dispatches over on both sides.

use std::collections::BTreeMap;
use tracing::warn;

use crate::store::ConfigStore;
use crate::value::Value;

/// Capability interface a form exposes to get its widget state persisted.
pub trait FormMirror {
    /// Snapshot the current widget values, keyed by widget name.
    fn export(&self) -> BTreeMap<String, Value>;

    /// Push a previously exported snapshot back into the widgets. Unknown
    /// widget names and missing entries are the implementation's call;
    /// skipping them is the expected behavior.
    fn import(&mut self, snapshot: &BTreeMap<String, Value>);
}

/// Value shapes produced by the common widget kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetValue {
    /// Line edits, labels, date fields holding a formatted string.
    Text(String),
    /// Checkboxes and radio buttons.
    Checked(bool),
    /// Combo-box selection index.
    Index(i64),
    /// Spinboxes, sliders, anything numeric.
    Number(f64),
}

impl WidgetValue {
    pub fn to_value(&self) -> Value {
        match self {
            WidgetValue::Text(s) => Value::Str(s.clone()),
            WidgetValue::Checked(b) => Value::Bool(*b),
            WidgetValue::Index(i) => Value::Int(*i),
            WidgetValue::Number(f) => Value::Float(*f),
        }
    }

    // Readers for the import side: the form knows which kind each widget
    // is, the snapshot only carries plain values.

    pub fn text(value: &Value) -> Option<&str> {
        value.as_str()
    }

    pub fn checked(value: &Value) -> Option<bool> {
        value.as_bool()
    }

    pub fn index(value: &Value) -> Option<i64> {
        value.as_int()
    }

    pub fn number(value: &Value) -> Option<f64> {
        value.as_float()
    }
}

impl ConfigStore {
    /// Store the form's current widget snapshot under `key`.
    pub fn capture_form(&mut self, key: impl Into<String>, form: &dyn FormMirror) {
        self.set(key, Value::Map(form.export()));
    }

    /// Feed the snapshot stored under `key` back into the form. Returns
    /// false when no snapshot is stored (first run), which is not an error.
    pub fn restore_form(&self, key: &str, form: &mut dyn FormMirror) -> bool {
        match self.get(key) {
            Some(Value::Map(snapshot)) => {
                form.import(snapshot);
                true
            }
            Some(other) => {
                warn!(key = %key, kind = other.kind(), "Stored form snapshot is not a map, ignoring");
                false
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// Stand-in for a settings dialog: one widget of each kind.
    #[derive(Default)]
    struct SettingsForm {
        nickname_edit: String,
        autosave_check: bool,
        theme_combo: i64,
        volume_spin: f64,
    }

    impl FormMirror for SettingsForm {
        fn export(&self) -> BTreeMap<String, Value> {
            [
                (
                    "nickname_edit".to_string(),
                    WidgetValue::Text(self.nickname_edit.clone()).to_value(),
                ),
                (
                    "autosave_check".to_string(),
                    WidgetValue::Checked(self.autosave_check).to_value(),
                ),
                (
                    "theme_combo".to_string(),
                    WidgetValue::Index(self.theme_combo).to_value(),
                ),
                (
                    "volume_spin".to_string(),
                    WidgetValue::Number(self.volume_spin).to_value(),
                ),
            ]
            .into()
        }

        fn import(&mut self, snapshot: &BTreeMap<String, Value>) {
            if let Some(text) = snapshot.get("nickname_edit").and_then(WidgetValue::text) {
                self.nickname_edit = text.to_string();
            }
            if let Some(checked) = snapshot.get("autosave_check").and_then(WidgetValue::checked) {
                self.autosave_check = checked;
            }
            if let Some(index) = snapshot.get("theme_combo").and_then(WidgetValue::index) {
                self.theme_combo = index;
            }
            if let Some(number) = snapshot.get("volume_spin").and_then(WidgetValue::number) {
                self.volume_spin = number;
            }
        }
    }

    #[test]
    fn test_capture_then_restore() {
        let dir = tempdir().unwrap();
        let mut store = ConfigStore::open_at(dir.path().join("ui.conf")).unwrap();

        let form = SettingsForm {
            nickname_edit: "pilot".to_string(),
            autosave_check: true,
            theme_combo: 2,
            volume_spin: 0.75,
        };
        store.capture_form("main_form", &form);

        let mut blank = SettingsForm::default();
        assert!(store.restore_form("main_form", &mut blank));
        assert_eq!(blank.nickname_edit, "pilot");
        assert!(blank.autosave_check);
        assert_eq!(blank.theme_combo, 2);
        assert_eq!(blank.volume_spin, 0.75);
    }

    #[test]
    fn test_restore_without_snapshot_is_noop() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::open_at(dir.path().join("ui.conf")).unwrap();
        let mut form = SettingsForm::default();
        assert!(!store.restore_form("main_form", &mut form));
        assert_eq!(form.nickname_edit, "");
    }

    #[test]
    fn test_restore_rejects_non_map_snapshot() {
        let dir = tempdir().unwrap();
        let mut store = ConfigStore::open_at(dir.path().join("ui.conf")).unwrap();
        store.set("main_form", 42);
        let mut form = SettingsForm::default();
        assert!(!store.restore_form("main_form", &mut form));
    }

    #[test]
    fn test_snapshot_ignores_unknown_widgets() {
        let snapshot: BTreeMap<String, Value> = [
            ("nickname_edit".to_string(), Value::Str("kept".into())),
            ("renamed_widget".to_string(), Value::Int(9)),
        ]
        .into();
        let mut form = SettingsForm::default();
        form.import(&snapshot);
        assert_eq!(form.nickname_edit, "kept");
        assert_eq!(form.theme_combo, 0);
    }

    #[test]
    fn test_two_forms_share_one_store() {
        let dir = tempdir().unwrap();
        let mut store = ConfigStore::open_at(dir.path().join("ui.conf")).unwrap();

        let main = SettingsForm {
            nickname_edit: "main".to_string(),
            ..Default::default()
        };
        let prefs = SettingsForm {
            nickname_edit: "prefs".to_string(),
            ..Default::default()
        };
        store.capture_form("main_form", &main);
        store.capture_form("prefs_form", &prefs);
        store.save().unwrap();

        let reopened = ConfigStore::open_at(store.path()).unwrap();
        let mut restored = SettingsForm::default();
        assert!(reopened.restore_form("prefs_form", &mut restored));
        assert_eq!(restored.nickname_edit, "prefs");
    }
}
