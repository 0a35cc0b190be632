//! First-person dynamic FOV

use super::Module;
use crate::settings::{Setting, SettingsStore};

pub struct FirstPersonFov;
impl Module for FirstPersonFov {
    fn name(&self) -> &'static str {
        "First-person FOV"
    }

    fn description(&self) -> &'static str {
        "Widening the cockpit, dash, bonnet and bumper camera FOV with speed and g-force."
    }

    fn settings(&self) -> &'static [&'static Setting] {
        FIRST_PERSON_SETTINGS
    }

    fn is_enabled(&self, store: &dyn SettingsStore) -> bool {
        FIRST_PERSON.enabled.as_bool(store)
    }
}

category_settings!(
    FIRST_PERSON,
    FIRST_PERSON_SETTINGS,
    "first_person",
    "first-person"
);
