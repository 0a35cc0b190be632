//! Third-person dynamic FOV

use super::Module;
use crate::settings::{Setting, SettingsStore};

pub struct ThirdPersonFov;
impl Module for ThirdPersonFov {
    fn name(&self) -> &'static str {
        "Third-person FOV"
    }

    fn description(&self) -> &'static str {
        "Widening the chase camera FOV with speed and g-force."
    }

    fn settings(&self) -> &'static [&'static Setting] {
        THIRD_PERSON_SETTINGS
    }

    fn is_enabled(&self, store: &dyn SettingsStore) -> bool {
        THIRD_PERSON.enabled.as_bool(store)
    }
}

category_settings!(
    THIRD_PERSON,
    THIRD_PERSON_SETTINGS,
    "third_person",
    "third-person"
);
