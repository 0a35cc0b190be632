//! Renderer-independent settings form.
//!
//! The host UI walks the items returned by [`form_items()`] and draws the control of each one;
//! edits go back through [`Setting::set()`].

use std::fmt;

use super::{Control, Setting, SettingsStore, Value};

/// One row of the settings form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormItem {
    pub key: &'static str,
    pub label: &'static str,
    pub control: Control,
    pub value: Value,
    /// Whether the value differs from the setting's default.
    pub modified: bool,
}

/// Returns the form rows for `settings` with their current values.
pub fn form_items(settings: &[&'static Setting], store: &dyn SettingsStore) -> Vec<FormItem> {
    form_items_with_defaults(settings, store, |setting| {
        setting.default_value().to_value()
    })
}

/// Returns the form rows for `settings`, with `default_of` giving the value a row is compared
/// against to tell whether it was modified.
///
/// Used for settings whose effective default is only known at runtime.
pub fn form_items_with_defaults(
    settings: &[&'static Setting],
    store: &dyn SettingsStore,
    default_of: impl Fn(&Setting) -> Value,
) -> Vec<FormItem> {
    settings
        .iter()
        .map(|setting| {
            let value = setting.value(store);
            FormItem {
                key: setting.key(),
                label: setting.label(),
                control: setting.control(),
                modified: value != default_of(setting),
                value,
            }
        })
        .collect()
}

/// Removes the stored values of `settings`, bringing back their defaults.
pub fn reset_to_defaults(settings: &[&'static Setting], store: &mut dyn SettingsStore) {
    for setting in settings {
        setting.reset(store);
    }
}

impl fmt::Display for FormItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.control, &self.value) {
            (Control::Checkbox, Value::Bool(checked)) => {
                write!(f, "[{}] {}", if *checked { 'x' } else { ' ' }, self.label)?
            }
            (Control::Slider { bounds, .. }, Value::Number(value)) => write!(
                f,
                "{} {value} ({} to {})",
                self.label, bounds.min, bounds.max
            )?,
            (Control::Choice { options }, Value::Text(text)) => {
                write!(f, "{} {text} ({})", self.label, options.join(" | "))?
            }
            (_, value) => write!(f, "{} {value:?}", self.label)?,
        }

        if self.modified {
            write!(f, " *")?;
        }

        Ok(())
    }
}
