//! Macros.

/// Declares the settings of one camera category.
///
/// Creates a `static $name: CategorySettings` with every key prefixed by `$prefix`, and a
/// `static $list: &[&Setting]` listing them for the module registry.
///
/// # Examples
///
/// ```ignore
/// category_settings!(FIRST_PERSON, FIRST_PERSON_SETTINGS, "first_person", "first-person");
/// ```
macro_rules! category_settings {
    ($name:ident, $list:ident, $prefix:literal, $label:literal) => {
        pub static $name: $crate::modules::dynamic_fov::CategorySettings =
            $crate::modules::dynamic_fov::CategorySettings {
                enabled: $crate::settings::Setting::checkbox(
                    concat!($prefix, ".enabled"),
                    true,
                    concat!(
                        "Dynamic FOV for ",
                        $label,
                        " cameras\n\n",
                        "When turned off, the camera goes back to the field-of-view it had when \
                         the game started."
                    ),
                ),
                min_fov: $crate::settings::Setting::slider(
                    concat!($prefix, ".min_fov"),
                    ::fov_curve::FOV_BOUNDS,
                    0.5,
                    ::fov_curve::Configuration::DEFAULT.min_fov,
                    "Minimum FOV\n\n\
                     Field-of-view at standstill. Defaults to the game's own FOV for this camera.",
                ),
                max_fov: $crate::settings::Setting::slider(
                    concat!($prefix, ".max_fov"),
                    ::fov_curve::FOV_BOUNDS,
                    0.5,
                    ::fov_curve::Configuration::DEFAULT.max_fov,
                    "Maximum FOV\n\nField-of-view at and above the maximum speed.",
                ),
                max_speed: $crate::settings::Setting::slider(
                    concat!($prefix, ".max_speed"),
                    ::fov_curve::MAX_SPEED_BOUNDS,
                    1.,
                    ::fov_curve::Configuration::DEFAULT.max_speed,
                    "Maximum speed\n\nSpeed in km/h at which the maximum FOV is reached.",
                ),
                speed_curve_exponent: $crate::settings::Setting::slider(
                    concat!($prefix, ".speed_curve_exponent"),
                    ::fov_curve::SPEED_CURVE_EXPONENT_BOUNDS,
                    0.05,
                    ::fov_curve::Configuration::DEFAULT.speed_curve_exponent,
                    "Speed curve\n\n\
                     `1` widens the FOV linearly with speed. Lower values widen it mostly at low \
                     speed, higher values mostly near the maximum speed.",
                ),
                g_force_enabled: $crate::settings::Setting::checkbox(
                    concat!($prefix, ".g_force_enabled"),
                    ::fov_curve::Configuration::DEFAULT.g_force_enabled,
                    "G-force effect\n\nAlso change the FOV with longitudinal acceleration.",
                ),
                g_force_profile: $crate::settings::Setting::choice(
                    concat!($prefix, ".g_force_profile"),
                    $crate::modules::dynamic_fov::G_FORCE_PROFILES,
                    "multiplicative",
                    "G-force profile\n\n\
                     `multiplicative` scales the FOV by the acceleration magnitude. `directional` \
                     additionally widens the FOV when speeding up and narrows it under braking.",
                ),
                g_force_curve_exponent: $crate::settings::Setting::slider(
                    concat!($prefix, ".g_force_curve_exponent"),
                    ::fov_curve::G_FORCE_CURVE_EXPONENT_BOUNDS,
                    0.05,
                    ::fov_curve::Configuration::DEFAULT.g_force_curve_exponent,
                    "G-force curve\n\nExponent applied to the acceleration magnitude.",
                ),
                g_force_factor_multiplier: $crate::settings::Setting::slider(
                    concat!($prefix, ".g_force_factor_multiplier"),
                    ::fov_curve::G_FORCE_FACTOR_MULTIPLIER_BOUNDS,
                    0.01,
                    ::fov_curve::Configuration::DEFAULT.g_force_factor_multiplier,
                    "G-force strength\n\nFraction of the FOV added per g of acceleration.",
                ),
                g_force_positive_factor: $crate::settings::Setting::slider(
                    concat!($prefix, ".g_force_positive_factor"),
                    ::fov_curve::G_FORCE_DIRECTIONAL_FACTOR_BOUNDS,
                    0.1,
                    ::fov_curve::Configuration::DEFAULT.g_force_positive_factor,
                    "Acceleration widening\n\n\
                     Degrees added per g when speeding up. Only used by the `directional` profile.",
                ),
                g_force_negative_factor: $crate::settings::Setting::slider(
                    concat!($prefix, ".g_force_negative_factor"),
                    ::fov_curve::G_FORCE_DIRECTIONAL_FACTOR_BOUNDS,
                    0.1,
                    ::fov_curve::Configuration::DEFAULT.g_force_negative_factor,
                    "Braking narrowing\n\n\
                     Degrees removed per g under braking. Only used by the `directional` profile.",
                ),
                smoothing_enabled: $crate::settings::Setting::checkbox(
                    concat!($prefix, ".smoothing_enabled"),
                    ::fov_curve::Configuration::DEFAULT.smoothing_enabled,
                    "Smoothing\n\nLimit how fast the FOV can change.",
                ),
                smoothing_factor: $crate::settings::Setting::slider(
                    concat!($prefix, ".smoothing_factor"),
                    ::fov_curve::SMOOTHING_FACTOR_BOUNDS,
                    0.05,
                    ::fov_curve::Configuration::DEFAULT.smoothing_factor,
                    "Smoothing step\n\n\
                     Largest FOV change per frame, in degrees. `0` turns smoothing off. The limit \
                     is per frame, so at higher frame rates the FOV changes faster.",
                ),
                deceleration_overshoot: $crate::settings::Setting::slider(
                    concat!($prefix, ".deceleration_overshoot"),
                    ::fov_curve::DECELERATION_OVERSHOOT_BOUNDS,
                    0.5,
                    ::fov_curve::Configuration::DEFAULT.deceleration_overshoot,
                    "Braking overshoot\n\n\
                     How many degrees below the minimum FOV hard braking may take the camera.",
                ),
            };

        pub static $list: &[&$crate::settings::Setting] = &[
            &$name.enabled,
            &$name.min_fov,
            &$name.max_fov,
            &$name.max_speed,
            &$name.speed_curve_exponent,
            &$name.g_force_enabled,
            &$name.g_force_profile,
            &$name.g_force_curve_exponent,
            &$name.g_force_factor_multiplier,
            &$name.g_force_positive_factor,
            &$name.g_force_negative_factor,
            &$name.smoothing_enabled,
            &$name.smoothing_factor,
            &$name.deceleration_overshoot,
        ];
    };
}
