//! Dynamic FOV
//!
//! Drives the FOV curve from the game: picks the camera category from the camera mode, keeps a
//! separate configuration and smoothing state per category, and puts the game's own FOV back when
//! a category is turned off.

use fov_curve::{
    CalculatorState, CameraCategory, ConfigIssue, ConfigIssues, Configuration, GForceProfile,
    TelemetrySample, FOV_BOUNDS,
};

use super::first_person::{FIRST_PERSON, FIRST_PERSON_SETTINGS};
use super::third_person::{THIRD_PERSON, THIRD_PERSON_SETTINGS};
use crate::host::{CameraMode, CameraSink, Telemetry};
use crate::settings::form::{form_items_with_defaults, reset_to_defaults, FormItem};
use crate::settings::{Setting, SettingsStore, Value};

/// Options of the g-force profile setting.
pub const G_FORCE_PROFILES: &[&str] = &["multiplicative", "directional"];

/// How much wider than the game's FOV the seeded maximum FOV is, in degrees.
pub const SEEDED_FOV_RANGE: f32 = 20.;

/// Settings of one camera category.
#[derive(Debug)]
pub struct CategorySettings {
    pub enabled: Setting,
    pub min_fov: Setting,
    pub max_fov: Setting,
    pub max_speed: Setting,
    pub speed_curve_exponent: Setting,
    pub g_force_enabled: Setting,
    pub g_force_profile: Setting,
    pub g_force_curve_exponent: Setting,
    pub g_force_factor_multiplier: Setting,
    pub g_force_positive_factor: Setting,
    pub g_force_negative_factor: Setting,
    pub smoothing_enabled: Setting,
    pub smoothing_factor: Setting,
    pub deceleration_overshoot: Setting,
}

impl CategorySettings {
    /// Reads the current configuration snapshot from the store.
    pub fn configuration(&self, store: &dyn SettingsStore) -> Configuration {
        let g_force_profile = match self.g_force_profile.as_choice(store) {
            "directional" => GForceProfile::Directional,
            _ => GForceProfile::Multiplicative,
        };

        Configuration {
            min_fov: self.min_fov.as_f32(store),
            max_fov: self.max_fov.as_f32(store),
            max_speed: self.max_speed.as_f32(store),
            speed_curve_exponent: self.speed_curve_exponent.as_f32(store),
            g_force_enabled: self.g_force_enabled.as_bool(store),
            g_force_profile,
            g_force_curve_exponent: self.g_force_curve_exponent.as_f32(store),
            g_force_factor_multiplier: self.g_force_factor_multiplier.as_f32(store),
            g_force_positive_factor: self.g_force_positive_factor.as_f32(store),
            g_force_negative_factor: self.g_force_negative_factor.as_f32(store),
            smoothing_enabled: self.smoothing_enabled.as_bool(store),
            smoothing_factor: self.smoothing_factor.as_f32(store),
            deceleration_overshoot: self.deceleration_overshoot.as_f32(store),
        }
    }

    /// Returns the `(min_fov, max_fov)` defaults derived from the game's FOV.
    pub fn seeded_range(game_fov: f32) -> Option<(f32, f32)> {
        if !game_fov.is_finite() {
            return None;
        }

        let min_fov = FOV_BOUNDS.clamp(game_fov);
        let max_fov = FOV_BOUNDS.clamp(min_fov + SEEDED_FOV_RANGE);
        Some((min_fov, max_fov))
    }

    /// Returns the default of `setting`, taking the FOV range seeded from `game_fov` into account.
    pub fn effective_default(&self, setting: &Setting, game_fov: f32) -> Value {
        match Self::seeded_range(game_fov) {
            Some((min_fov, _)) if setting.key() == self.min_fov.key() => Value::Number(min_fov),
            Some((_, max_fov)) if setting.key() == self.max_fov.key() => Value::Number(max_fov),
            _ => setting.default_value().to_value(),
        }
    }

    /// Stores the FOV range derived from the game's FOV, unless the store already has it.
    pub fn seed_defaults(&self, store: &mut dyn SettingsStore, game_fov: f32) {
        let Some((min_fov, max_fov)) = Self::seeded_range(game_fov) else {
            warn!("not seeding FOV defaults from invalid game FOV {game_fov}");
            return;
        };

        for (setting, value) in [(&self.min_fov, min_fov), (&self.max_fov, max_fov)] {
            if !setting.is_set(store) {
                debug!("seeding {} = {value}", setting.key());
                store.set(setting.key(), Value::Number(value));
            }
        }
    }
}

/// Returns the camera category whose FOV the camera mode uses.
pub fn classify(mode: CameraMode) -> CameraCategory {
    match mode {
        CameraMode::Drivable(camera) if camera.is_chase() => CameraCategory::ThirdPerson,
        CameraMode::Drivable(_) | CameraMode::Cockpit => CameraCategory::FirstPerson,
        CameraMode::Other => CameraCategory::Other,
    }
}

struct Category {
    category: CameraCategory,
    settings: &'static CategorySettings,
    all_settings: &'static [&'static Setting],
    /// The game's FOV when the addon started.
    original_fov: f32,
    enabled: bool,
    state: CalculatorState,
    /// The FOV last written to the camera.
    last_fov: f32,
    /// Configuration issues already logged.
    reported_issues: ConfigIssues,
}

impl Category {
    fn new<S: CameraSink + ?Sized>(
        category: CameraCategory,
        settings: &'static CategorySettings,
        all_settings: &'static [&'static Setting],
        sink: &S,
    ) -> Self {
        let original_fov = sink.fov(category);
        debug!("original {category:?} FOV: {original_fov}");

        Self {
            category,
            settings,
            all_settings,
            original_fov,
            enabled: false,
            state: CalculatorState::new(original_fov),
            last_fov: original_fov,
            reported_issues: ConfigIssues::new(),
        }
    }

    fn update_enabled<S: CameraSink + ?Sized>(&mut self, sink: &mut S, store: &dyn SettingsStore) {
        let enabled = self.settings.enabled.as_bool(store);

        match (self.enabled, enabled) {
            (true, false) => {
                info!(
                    "{:?} dynamic FOV disabled, restoring FOV {}",
                    self.category, self.original_fov
                );
                sink.set_fov(self.category, self.original_fov);
            }
            (false, true) => {
                debug!("{:?} dynamic FOV enabled", self.category);
                self.state = CalculatorState::new(self.original_fov);
                self.last_fov = self.original_fov;
                self.reported_issues.clear();
            }
            _ => (),
        }

        self.enabled = enabled;
    }

    fn report_issues(&mut self, config: Configuration) {
        let (_, issues) = config.sanitized();
        if issues == self.reported_issues {
            return;
        }

        for issue in &issues {
            if !self.reported_issues.contains(issue) {
                warn!("{:?} FOV settings: {issue}", self.category);
            }
        }

        self.reported_issues = issues;
    }
}

/// Per-frame dynamic FOV for the first- and third-person cameras.
pub struct DynamicFov {
    first_person: Category,
    third_person: Category,
}

impl DynamicFov {
    /// Captures the game's FOVs and seeds the FOV range defaults from them.
    #[instrument(name = "DynamicFov::new", skip_all)]
    pub fn new<S: CameraSink + ?Sized>(sink: &S, store: &mut dyn SettingsStore) -> Self {
        let first_person = Category::new(
            CameraCategory::FirstPerson,
            &FIRST_PERSON,
            FIRST_PERSON_SETTINGS,
            sink,
        );
        let third_person = Category::new(
            CameraCategory::ThirdPerson,
            &THIRD_PERSON,
            THIRD_PERSON_SETTINGS,
            sink,
        );

        for category in [&first_person, &third_person] {
            category
                .settings
                .seed_defaults(store, category.original_fov);
        }

        Self {
            first_person,
            third_person,
        }
    }

    fn category(&self, category: CameraCategory) -> Option<&Category> {
        match category {
            CameraCategory::FirstPerson => Some(&self.first_person),
            CameraCategory::ThirdPerson => Some(&self.third_person),
            CameraCategory::Other => None,
        }
    }

    fn category_mut(&mut self, category: CameraCategory) -> Option<&mut Category> {
        match category {
            CameraCategory::FirstPerson => Some(&mut self.first_person),
            CameraCategory::ThirdPerson => Some(&mut self.third_person),
            CameraCategory::Other => None,
        }
    }

    /// Returns the game's FOV of `category` captured at startup.
    pub fn original_fov(&self, category: CameraCategory) -> Option<f32> {
        self.category(category).map(|c| c.original_fov)
    }

    /// Returns the smoothing state of `category`.
    pub fn state(&self, category: CameraCategory) -> Option<CalculatorState> {
        self.category(category).map(|c| c.state)
    }

    /// Returns the problems with the settings of `category` seen on the last frame it was used.
    pub fn config_issues(&self, category: CameraCategory) -> &[ConfigIssue] {
        match self.category(category) {
            Some(c) => &c.reported_issues,
            None => &[],
        }
    }

    /// Computes and applies the FOV for the current frame.
    ///
    /// Returns the FOV of the active camera, or `None` if it is not adjusted. Frames with
    /// non-finite telemetry leave the camera untouched and return the FOV set last.
    pub fn on_frame<T, S>(
        &mut self,
        telemetry: &T,
        sink: &mut S,
        store: &dyn SettingsStore,
    ) -> Option<f32>
    where
        T: Telemetry + ?Sized,
        S: CameraSink + ?Sized,
    {
        self.first_person.update_enabled(sink, store);
        self.third_person.update_enabled(sink, store);

        let sample = telemetry.sample();
        let camera_category = classify(sample.camera_mode);
        let category = self.category_mut(camera_category)?;
        if !category.enabled {
            return None;
        }

        let config = category.settings.configuration(store);
        category.report_issues(config);

        let sample = TelemetrySample {
            speed_kmh: sample.speed_kmh,
            longitudinal_acceleration: sample.longitudinal_g,
            camera_category,
        };
        if !sample.is_finite() {
            trace!("invalid telemetry {sample:?}, keeping FOV {}", category.last_fov);
            return Some(category.last_fov);
        }

        let (fov, state) = fov_curve::compute(config, sample, category.state);
        category.state = state;
        category.last_fov = fov;

        sink.set_fov(camera_category, fov);
        Some(fov)
    }

    /// Returns the settings form rows of `category`.
    ///
    /// The FOV range rows count as modified only when they differ from the range seeded from the
    /// game's FOV.
    pub fn form_items(
        &self,
        category: CameraCategory,
        store: &dyn SettingsStore,
    ) -> Vec<FormItem> {
        let Some(category) = self.category(category) else {
            return Vec::new();
        };

        form_items_with_defaults(category.all_settings, store, |setting| {
            category
                .settings
                .effective_default(setting, category.original_fov)
        })
    }

    /// Resets all settings to their defaults, with the FOV range seeded from the game's FOV
    /// again.
    pub fn reset_settings(&self, store: &mut dyn SettingsStore) {
        for category in [&self.first_person, &self.third_person] {
            reset_to_defaults(category.all_settings, store);
            category
                .settings
                .seed_defaults(store, category.original_fov);
        }

        info!("settings reset to defaults");
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use proptest::prelude::*;

    use super::*;
    use crate::host::{DrivableCamera, HostSample};
    use crate::settings::{Control, MemoryStore};

    struct FakeTelemetry(HostSample);

    impl Telemetry for FakeTelemetry {
        fn sample(&self) -> HostSample {
            self.0
        }
    }

    #[derive(Default)]
    struct FakeSink {
        fovs: HashMap<CameraCategory, f32>,
        writes: Vec<(CameraCategory, f32)>,
    }

    impl FakeSink {
        fn new() -> Self {
            let mut sink = Self::default();
            sink.fovs.insert(CameraCategory::FirstPerson, 56.);
            sink.fovs.insert(CameraCategory::ThirdPerson, 70.);
            sink
        }

        fn writes_of(&self, category: CameraCategory) -> Vec<f32> {
            self.writes
                .iter()
                .filter(|(c, _)| *c == category)
                .map(|(_, fov)| *fov)
                .collect()
        }
    }

    impl CameraSink for FakeSink {
        fn fov(&self, category: CameraCategory) -> f32 {
            self.fovs.get(&category).copied().unwrap_or(0.)
        }

        fn set_fov(&mut self, category: CameraCategory, fov: f32) {
            self.fovs.insert(category, fov);
            self.writes.push((category, fov));
        }
    }

    fn telemetry(speed_kmh: f32, camera_mode: CameraMode) -> FakeTelemetry {
        FakeTelemetry(HostSample {
            speed_kmh,
            longitudinal_g: 0.,
            camera_mode,
        })
    }

    const COCKPIT: CameraMode = CameraMode::Drivable(DrivableCamera::Cockpit);
    const CHASE: CameraMode = CameraMode::Drivable(DrivableCamera::Chase);

    #[test]
    fn camera_classification() {
        use DrivableCamera::*;

        for camera in [Cockpit, Dash, Bonnet, Bumper] {
            assert_eq!(
                classify(CameraMode::Drivable(camera)),
                CameraCategory::FirstPerson
            );
        }
        for camera in [Chase, Chase2] {
            assert_eq!(
                classify(CameraMode::Drivable(camera)),
                CameraCategory::ThirdPerson
            );
        }
        assert_eq!(classify(CameraMode::Cockpit), CameraCategory::FirstPerson);
        assert_eq!(classify(CameraMode::Other), CameraCategory::Other);
    }

    #[test]
    fn seeds_fov_range_from_game() {
        let sink = FakeSink::new();
        let mut store = MemoryStore::new();
        store.set("first_person.min_fov", Value::Number(60.));

        let dynamic_fov = DynamicFov::new(&sink, &mut store);

        assert_eq!(FIRST_PERSON.min_fov.as_f32(&store), 60.);
        assert_eq!(FIRST_PERSON.max_fov.as_f32(&store), 76.);
        assert_eq!(THIRD_PERSON.min_fov.as_f32(&store), 70.);
        assert_eq!(THIRD_PERSON.max_fov.as_f32(&store), 90.);
        assert_eq!(
            dynamic_fov.original_fov(CameraCategory::ThirdPerson),
            Some(70.)
        );
        assert_eq!(dynamic_fov.original_fov(CameraCategory::Other), None);
    }

    #[test]
    fn seeded_range_stays_in_bounds() {
        let mut store = MemoryStore::new();

        FIRST_PERSON.seed_defaults(&mut store, 145.);
        assert_eq!(FIRST_PERSON.min_fov.as_f32(&store), 145.);
        assert_eq!(FIRST_PERSON.max_fov.as_f32(&store), 150.);

        THIRD_PERSON.seed_defaults(&mut store, f32::NAN);
        assert!(store.get("third_person.min_fov").is_none());
    }

    #[test]
    fn ramps_up_from_game_fov() {
        let mut sink = FakeSink::new();
        let mut store = MemoryStore::new();
        let mut dynamic_fov = DynamicFov::new(&sink, &mut store);

        let fov = dynamic_fov.on_frame(&telemetry(300., COCKPIT), &mut sink, &store);
        assert_eq!(fov, Some(56.5));
        let fov = dynamic_fov.on_frame(&telemetry(300., COCKPIT), &mut sink, &store);
        assert_eq!(fov, Some(57.));
        assert_eq!(sink.writes_of(CameraCategory::FirstPerson), [56.5, 57.]);
    }

    #[test]
    fn categories_are_independent() {
        let mut sink = FakeSink::new();
        let mut store = MemoryStore::new();
        let mut dynamic_fov = DynamicFov::new(&sink, &mut store);

        assert_eq!(
            dynamic_fov.on_frame(&telemetry(300., COCKPIT), &mut sink, &store),
            Some(56.5)
        );
        assert_eq!(
            dynamic_fov.on_frame(&telemetry(300., CHASE), &mut sink, &store),
            Some(70.5)
        );
        assert_eq!(
            dynamic_fov.on_frame(&telemetry(300., CameraMode::Cockpit), &mut sink, &store),
            Some(57.)
        );
        assert_eq!(
            dynamic_fov.state(CameraCategory::ThirdPerson),
            Some(CalculatorState::new(70.5))
        );
    }

    #[test]
    fn other_cameras_are_left_alone() {
        let mut sink = FakeSink::new();
        let mut store = MemoryStore::new();
        let mut dynamic_fov = DynamicFov::new(&sink, &mut store);

        let fov = dynamic_fov.on_frame(&telemetry(300., CameraMode::Other), &mut sink, &store);
        assert_eq!(fov, None);
        assert!(sink.writes.is_empty());
    }

    #[test]
    fn disabling_restores_game_fov_once() {
        let mut sink = FakeSink::new();
        let mut store = MemoryStore::new();
        let mut dynamic_fov = DynamicFov::new(&sink, &mut store);

        dynamic_fov.on_frame(&telemetry(300., COCKPIT), &mut sink, &store);
        dynamic_fov.on_frame(&telemetry(300., COCKPIT), &mut sink, &store);

        store.set("first_person.enabled", Value::Bool(false));
        assert_eq!(
            dynamic_fov.on_frame(&telemetry(300., COCKPIT), &mut sink, &store),
            None
        );
        assert_eq!(
            dynamic_fov.on_frame(&telemetry(300., COCKPIT), &mut sink, &store),
            None
        );

        assert_eq!(sink.writes_of(CameraCategory::FirstPerson), [56.5, 57., 56.]);
        assert_eq!(sink.fov(CameraCategory::FirstPerson), 56.);

        // The other category keeps working.
        assert_eq!(
            dynamic_fov.on_frame(&telemetry(300., CHASE), &mut sink, &store),
            Some(70.5)
        );
    }

    #[test]
    fn reenabling_ramps_from_game_fov_again() {
        let mut sink = FakeSink::new();
        let mut store = MemoryStore::new();
        let mut dynamic_fov = DynamicFov::new(&sink, &mut store);

        for _ in 0..10 {
            dynamic_fov.on_frame(&telemetry(300., COCKPIT), &mut sink, &store);
        }

        store.set("first_person.enabled", Value::Bool(false));
        dynamic_fov.on_frame(&telemetry(300., COCKPIT), &mut sink, &store);
        store.set("first_person.enabled", Value::Bool(true));

        assert_eq!(
            dynamic_fov.on_frame(&telemetry(300., COCKPIT), &mut sink, &store),
            Some(56.5)
        );
    }

    #[test]
    fn settings_changes_apply_on_next_frame() {
        let mut sink = FakeSink::new();
        let mut store = MemoryStore::new();
        let mut dynamic_fov = DynamicFov::new(&sink, &mut store);
        store.set("first_person.smoothing_enabled", Value::Bool(false));

        assert_eq!(
            dynamic_fov.on_frame(&telemetry(300., COCKPIT), &mut sink, &store),
            Some(76.)
        );

        store.set("first_person.max_fov", Value::Number(66.));
        assert_eq!(
            dynamic_fov.on_frame(&telemetry(300., COCKPIT), &mut sink, &store),
            Some(66.)
        );
    }

    #[test]
    fn invalid_telemetry_keeps_previous_fov() {
        let mut sink = FakeSink::new();
        let mut store = MemoryStore::new();
        let mut dynamic_fov = DynamicFov::new(&sink, &mut store);

        dynamic_fov.on_frame(&telemetry(300., COCKPIT), &mut sink, &store);
        assert_eq!(
            dynamic_fov.on_frame(&telemetry(f32::NAN, COCKPIT), &mut sink, &store),
            Some(56.5)
        );
        assert_eq!(sink.writes_of(CameraCategory::FirstPerson), [56.5]);
    }

    #[test]
    fn invalid_telemetry_without_smoothing_keeps_camera() {
        let mut sink = FakeSink::new();
        let mut store = MemoryStore::new();
        let mut dynamic_fov = DynamicFov::new(&sink, &mut store);
        store.set("first_person.smoothing_enabled", Value::Bool(false));

        dynamic_fov.on_frame(&telemetry(300., COCKPIT), &mut sink, &store);
        assert_eq!(
            dynamic_fov.on_frame(&telemetry(f32::NAN, COCKPIT), &mut sink, &store),
            Some(76.)
        );
        assert_eq!(
            dynamic_fov.on_frame(&telemetry(f32::INFINITY, COCKPIT), &mut sink, &store),
            Some(76.)
        );

        assert_eq!(sink.writes_of(CameraCategory::FirstPerson), [76.]);
        assert_eq!(sink.fov(CameraCategory::FirstPerson), 76.);
    }

    #[test]
    fn config_issues_are_tracked() {
        let mut sink = FakeSink::new();
        let mut store = MemoryStore::new();
        let mut dynamic_fov = DynamicFov::new(&sink, &mut store);
        store.set("first_person.max_speed", Value::Number(0.));
        store.set("first_person.smoothing_enabled", Value::Bool(false));

        assert_eq!(
            dynamic_fov.on_frame(&telemetry(10., COCKPIT), &mut sink, &store),
            Some(76.)
        );
        assert_eq!(
            dynamic_fov.config_issues(CameraCategory::FirstPerson),
            [ConfigIssue::NonPositiveMaxSpeed(0.)]
        );
        assert!(dynamic_fov
            .config_issues(CameraCategory::ThirdPerson)
            .is_empty());

        store.set("first_person.max_speed", Value::Number(200.));
        dynamic_fov.on_frame(&telemetry(10., COCKPIT), &mut sink, &store);
        assert!(dynamic_fov
            .config_issues(CameraCategory::FirstPerson)
            .is_empty());
    }

    #[test]
    fn reset_settings_reseeds() {
        let sink = FakeSink::new();
        let mut store = MemoryStore::new();
        let dynamic_fov = DynamicFov::new(&sink, &mut store);

        store.set("first_person.min_fov", Value::Number(40.));
        store.set("third_person.enabled", Value::Bool(false));
        store.set("third_person.smoothing_factor", Value::Number(3.));

        dynamic_fov.reset_settings(&mut store);

        assert_eq!(FIRST_PERSON.min_fov.as_f32(&store), 56.);
        assert!(THIRD_PERSON.enabled.as_bool(&store));
        assert!(!THIRD_PERSON.smoothing_factor.is_set(&store));
        assert_eq!(THIRD_PERSON.max_fov.as_f32(&store), 90.);
    }

    #[test]
    fn seeded_form_is_unmodified() {
        let sink = FakeSink::new();
        let mut store = MemoryStore::new();
        let dynamic_fov = DynamicFov::new(&sink, &mut store);

        for category in [CameraCategory::FirstPerson, CameraCategory::ThirdPerson] {
            let items = dynamic_fov.form_items(category, &store);
            assert_eq!(items.len(), FIRST_PERSON_SETTINGS.len());
            assert!(items.iter().all(|item| !item.modified), "{items:?}");
        }
        assert!(dynamic_fov
            .form_items(CameraCategory::Other, &store)
            .is_empty());

        store.set("first_person.max_fov", Value::Number(90.));
        let modified: Vec<_> = dynamic_fov
            .form_items(CameraCategory::FirstPerson, &store)
            .into_iter()
            .filter(|item| item.modified)
            .map(|item| item.key)
            .collect();
        assert_eq!(modified, ["first_person.max_fov"]);

        dynamic_fov.reset_settings(&mut store);
        assert!(dynamic_fov
            .form_items(CameraCategory::FirstPerson, &store)
            .iter()
            .all(|item| !item.modified));
    }

    fn slider_keys() -> Vec<&'static str> {
        FIRST_PERSON_SETTINGS
            .iter()
            .filter(|setting| matches!(setting.control(), Control::Slider { .. }))
            .map(|setting| setting.key())
            .collect()
    }

    proptest! {
        #[test]
        fn any_stored_values_give_fov_in_range(
            values in prop::collection::vec(-1e4f32..1e4, 10),
            frames in prop::collection::vec((-100f32..1000., -20f32..20.), 1..20),
        ) {
            let mut sink = FakeSink::new();
            let mut store = MemoryStore::new();
            let mut dynamic_fov = DynamicFov::new(&sink, &mut store);
            store.set("first_person.g_force_enabled", Value::Bool(true));

            for (key, value) in slider_keys().into_iter().zip(values) {
                store.set(key, Value::Number(value));
            }

            let (config, _) = FIRST_PERSON.configuration(&store).sanitized();
            let (low, high) = config.fov_range();

            for (speed_kmh, longitudinal_g) in frames {
                let telemetry = FakeTelemetry(HostSample {
                    speed_kmh,
                    longitudinal_g,
                    camera_mode: COCKPIT,
                });
                let fov = dynamic_fov.on_frame(&telemetry, &mut sink, &store).unwrap();
                prop_assert!(fov >= low && fov <= high, "{fov} outside of [{low}, {high}]");
            }
        }
    }
}
