//! Modules providing the actual functionality.
//!
//! Every module is represented by a unit struct implementing the [`Module`] trait. All modules live
//! in the global [`MODULES`] array where they all can be operated on at once as trait objects,
//! for example to build the settings form or the documentation.

use crate::settings::{Setting, SettingsStore};

pub mod dynamic_fov;
pub mod first_person;
pub mod third_person;

/// Trait for getting module information.
pub trait Module: Sync {
    /// Returns the name of the module.
    fn name(&self) -> &'static str;

    /// Returns the description of the module.
    ///
    /// For short descriptions, try to return a string that would fit this phrase: "This module
    /// provides support for <description>". For example, `Widening the chase camera FOV.` -- this
    /// fits the phrase: "This module provides support for widening the chase camera FOV."
    fn description(&self) -> &'static str;

    /// Returns the settings defined by the module.
    fn settings(&self) -> &'static [&'static Setting] {
        &[]
    }

    /// Returns `true` if the module is turned on in the settings.
    fn is_enabled(&self, store: &dyn SettingsStore) -> bool;
}

/// All modules.
pub static MODULES: &[&dyn Module] = &[
    &first_person::FirstPersonFov,
    &third_person::ThirdPersonFov,
];
