//! Settings.
//!
//! Every user-facing parameter is described by a static [`Setting`]: its key in the settings
//! store, the kind of control that edits it, its default value and its documentation. Modules
//! list their settings, and everything else (reading values, the settings form, resetting to
//! defaults, the generated documentation) is driven by these descriptors.

use fov_curve::Bounds;
use serde::{Deserialize, Serialize};

pub mod form;

pub mod store;
pub use store::{JsonFileStore, MemoryStore, SettingsError, SettingsStore};

/// Value kept in a settings store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Number(f32),
    Text(String),
}

/// How a setting is edited.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Control {
    Checkbox,
    Slider { bounds: Bounds, step: f32 },
    Choice { options: &'static [&'static str] },
}

impl Control {
    /// Returns the name of the value type this control edits, for messages.
    pub fn value_type(&self) -> &'static str {
        match self {
            Control::Checkbox => "a boolean",
            Control::Slider { .. } => "a number",
            Control::Choice { .. } => "one of the options",
        }
    }

    /// Returns `true` if `value` can be edited by this control.
    ///
    /// Slider values outside of the bounds are accepted; they are clamped when used.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (Control::Checkbox, Value::Bool(_)) => true,
            (Control::Slider { .. }, Value::Number(x)) => x.is_finite(),
            (Control::Choice { options }, Value::Text(text)) => options.contains(&text.as_str()),
            _ => false,
        }
    }
}

/// Default value of a setting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultValue {
    Bool(bool),
    Number(f32),
    Text(&'static str),
}

impl DefaultValue {
    pub fn to_value(self) -> Value {
        match self {
            DefaultValue::Bool(value) => Value::Bool(value),
            DefaultValue::Number(value) => Value::Number(value),
            DefaultValue::Text(value) => Value::Text(value.to_owned()),
        }
    }
}

/// Descriptor of a user-facing setting.
#[derive(Debug)]
pub struct Setting {
    /// Key in the settings store.
    key: &'static str,
    control: Control,
    default_value: DefaultValue,
    /// Description of this setting for documentation. The first line doubles as the label in
    /// the settings form.
    description: &'static str,
}

impl Setting {
    /// Creates a new on-off setting.
    pub const fn checkbox(key: &'static str, default: bool, description: &'static str) -> Self {
        Self {
            key,
            control: Control::Checkbox,
            default_value: DefaultValue::Bool(default),
            description,
        }
    }

    /// Creates a new numeric setting.
    pub const fn slider(
        key: &'static str,
        bounds: Bounds,
        step: f32,
        default: f32,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            control: Control::Slider { bounds, step },
            default_value: DefaultValue::Number(default),
            description,
        }
    }

    /// Creates a new setting choosing one of `options`.
    pub const fn choice(
        key: &'static str,
        options: &'static [&'static str],
        default: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            control: Control::Choice { options },
            default_value: DefaultValue::Text(default),
            description,
        }
    }

    /// Returns the key of the setting.
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Returns the control editing the setting.
    pub fn control(&self) -> Control {
        self.control
    }

    /// Returns the default value of the setting.
    pub fn default_value(&self) -> DefaultValue {
        self.default_value
    }

    /// Returns the description of the setting.
    pub fn description(&self) -> &'static str {
        self.description
    }

    /// Returns the label of the setting, which is the first line of its description.
    pub fn label(&self) -> &'static str {
        self.description.lines().next().unwrap_or(self.key)
    }

    /// Returns the current value of the setting.
    ///
    /// Falls back to the default if the store has no value for the setting or if the stored
    /// value can't be edited by the setting's control.
    pub fn value(&self, store: &dyn SettingsStore) -> Value {
        match store.get(self.key) {
            Some(value) if self.control.accepts(&value) => value,
            Some(value) => {
                warn!(
                    "ignoring stored value {value:?} of {}: expected {}",
                    self.key,
                    self.control.value_type()
                );
                self.default_value.to_value()
            }
            None => self.default_value.to_value(),
        }
    }

    /// Returns `true` if the store has a usable value for the setting.
    pub fn is_set(&self, store: &dyn SettingsStore) -> bool {
        store
            .get(self.key)
            .map_or(false, |value| self.control.accepts(&value))
    }

    /// Returns the value of a slider setting.
    ///
    /// # Panics
    ///
    /// Panics if the setting is not a slider.
    pub fn as_f32(&self, store: &dyn SettingsStore) -> f32 {
        match self.value(store) {
            Value::Number(value) => value,
            value => panic!("{} is not a slider, its value is {value:?}", self.key),
        }
    }

    /// Returns the value of a checkbox setting.
    ///
    /// # Panics
    ///
    /// Panics if the setting is not a checkbox.
    pub fn as_bool(&self, store: &dyn SettingsStore) -> bool {
        match self.value(store) {
            Value::Bool(value) => value,
            value => panic!("{} is not a checkbox, its value is {value:?}", self.key),
        }
    }

    /// Returns the selected option of a choice setting.
    ///
    /// # Panics
    ///
    /// Panics if the setting is not a choice.
    pub fn as_choice(&self, store: &dyn SettingsStore) -> &'static str {
        let Control::Choice { options } = self.control else {
            panic!("{} is not a choice", self.key);
        };

        match self.value(store) {
            Value::Text(text) => options
                .iter()
                .copied()
                .find(|option| *option == text)
                .unwrap_or(options[0]),
            value => panic!("{} is not a choice, its value is {value:?}", self.key),
        }
    }

    /// Stores a new value of the setting.
    pub fn set(&self, store: &mut dyn SettingsStore, value: Value) -> Result<(), SettingsError> {
        if !self.control.accepts(&value) {
            return Err(SettingsError::WrongType {
                key: self.key,
                expected: self.control.value_type(),
                value,
            });
        }

        store.set(self.key, value);
        Ok(())
    }

    /// Removes the stored value so that the default applies again.
    pub fn reset(&self, store: &mut dyn SettingsStore) {
        store.remove(self.key);
    }
}
