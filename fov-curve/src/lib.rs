//! Speed- and g-force-dependent camera field-of-view curve.
//!
//! Call [`compute()`] once per frame with the current [`Configuration`], the frame's
//! [`TelemetrySample`] and the [`CalculatorState`] returned by the previous call.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod steps;
use steps::*;

/// Inclusive range of allowed values of a configuration field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f32,
    pub max: f32,
}

impl Bounds {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn clamp(self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }

    pub fn contains(self, value: f32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Bounds of `min_fov` and `max_fov`, in degrees.
pub const FOV_BOUNDS: Bounds = Bounds::new(10., 150.);
/// Bounds of `max_speed`, in km/h.
pub const MAX_SPEED_BOUNDS: Bounds = Bounds::new(1., 1000.);
pub const SPEED_CURVE_EXPONENT_BOUNDS: Bounds = Bounds::new(0.1, 5.);
pub const G_FORCE_CURVE_EXPONENT_BOUNDS: Bounds = Bounds::new(0.1, 5.);
pub const G_FORCE_FACTOR_MULTIPLIER_BOUNDS: Bounds = Bounds::new(0., 1.);
/// Bounds of `g_force_positive_factor` and `g_force_negative_factor`, in degrees per g.
pub const G_FORCE_DIRECTIONAL_FACTOR_BOUNDS: Bounds = Bounds::new(0., 20.);
/// Bounds of `smoothing_factor`, in degrees per frame.
pub const SMOOTHING_FACTOR_BOUNDS: Bounds = Bounds::new(0., 10.);
/// Bounds of `deceleration_overshoot`, in degrees.
pub const DECELERATION_OVERSHOOT_BOUNDS: Bounds = Bounds::new(0., 30.);

/// Longitudinal acceleration magnitude above which telemetry is saturated, in g.
pub const MAX_LONGITUDINAL_G: f32 = 10.;

/// How longitudinal g-force changes the FOV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GForceProfile {
    /// Scales the FOV by the acceleration magnitude regardless of its direction.
    #[default]
    Multiplicative,
    /// Widens the FOV when accelerating and narrows it when braking, then scales it like
    /// [`GForceProfile::Multiplicative`].
    Directional,
}

/// Camera category a FOV is computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraCategory {
    FirstPerson,
    ThirdPerson,
    Other,
}

/// FOV curve parameters of one camera category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// FOV at standstill.
    pub min_fov: f32,
    /// FOV at and above `max_speed`.
    pub max_fov: f32,
    /// Speed in km/h at which the FOV reaches `max_fov`.
    pub max_speed: f32,
    /// Shape of the speed curve: `1` is linear, below `1` front-loads and above `1` back-loads
    /// the FOV increase.
    pub speed_curve_exponent: f32,
    pub g_force_enabled: bool,
    pub g_force_profile: GForceProfile,
    pub g_force_curve_exponent: f32,
    pub g_force_factor_multiplier: f32,
    /// Degrees added per g of acceleration with [`GForceProfile::Directional`].
    pub g_force_positive_factor: f32,
    /// Degrees removed per g of braking with [`GForceProfile::Directional`].
    pub g_force_negative_factor: f32,
    pub smoothing_enabled: bool,
    /// Maximal FOV change per frame, in degrees.
    pub smoothing_factor: f32,
    /// How far below `min_fov` the FOV may dip under braking.
    pub deceleration_overshoot: f32,
}

impl Default for Configuration {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Configuration {
    /// Default parameters, also used in place of non-finite values.
    pub const DEFAULT: Self = Self {
        min_fov: 60.,
        max_fov: 80.,
        max_speed: 300.,
        speed_curve_exponent: 1.,
        g_force_enabled: false,
        g_force_profile: GForceProfile::Multiplicative,
        g_force_curve_exponent: 1.,
        g_force_factor_multiplier: 0.1,
        g_force_positive_factor: 2.,
        g_force_negative_factor: 2.,
        smoothing_enabled: true,
        smoothing_factor: 0.5,
        deceleration_overshoot: 5.,
    };
}

/// A correction made by [`Configuration::sanitized()`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigIssue {
    #[error("{field} is not a finite number, using the default of {default}")]
    NonFinite { field: &'static str, default: f32 },
    #[error("max speed {0} is not positive, using {} km/h", MAX_SPEED_BOUNDS.min)]
    NonPositiveMaxSpeed(f32),
    #[error("{field} = {value} is outside of [{}, {}], clamping", .bounds.min, .bounds.max)]
    OutOfRange {
        field: &'static str,
        value: f32,
        bounds: Bounds,
    },
    #[error("min FOV {min} is greater than max FOV {max}, swapping them")]
    SwappedFovRange { min: f32, max: f32 },
}

/// Corrections reported by [`Configuration::sanitized()`].
pub type ConfigIssues = ArrayVec<ConfigIssue, 16>;

impl Configuration {
    /// Returns the configuration with every field brought into its documented bounds, along
    /// with the list of corrections that were made.
    ///
    /// Non-finite values are replaced with the default, a non-positive `max_speed` with the
    /// smallest allowed one, out-of-range values are clamped and a `min_fov` above `max_fov` is
    /// swapped with it.
    pub fn sanitized(self) -> (Self, ConfigIssues) {
        let default = Self::default();
        let mut issues = ConfigIssues::new();
        let mut rv = self;

        if rv.max_speed.is_finite() && rv.max_speed <= 0. {
            issues.push(ConfigIssue::NonPositiveMaxSpeed(rv.max_speed));
            rv.max_speed = MAX_SPEED_BOUNDS.min;
        }

        let mut check = |field: &'static str, value: &mut f32, default: f32, bounds: Bounds| {
            if !value.is_finite() {
                issues.push(ConfigIssue::NonFinite { field, default });
                *value = default;
            } else if !bounds.contains(*value) {
                issues.push(ConfigIssue::OutOfRange {
                    field,
                    value: *value,
                    bounds,
                });
                *value = bounds.clamp(*value);
            }
        };

        check("min_fov", &mut rv.min_fov, default.min_fov, FOV_BOUNDS);
        check("max_fov", &mut rv.max_fov, default.max_fov, FOV_BOUNDS);
        check(
            "max_speed",
            &mut rv.max_speed,
            default.max_speed,
            MAX_SPEED_BOUNDS,
        );
        check(
            "speed_curve_exponent",
            &mut rv.speed_curve_exponent,
            default.speed_curve_exponent,
            SPEED_CURVE_EXPONENT_BOUNDS,
        );
        check(
            "g_force_curve_exponent",
            &mut rv.g_force_curve_exponent,
            default.g_force_curve_exponent,
            G_FORCE_CURVE_EXPONENT_BOUNDS,
        );
        check(
            "g_force_factor_multiplier",
            &mut rv.g_force_factor_multiplier,
            default.g_force_factor_multiplier,
            G_FORCE_FACTOR_MULTIPLIER_BOUNDS,
        );
        check(
            "g_force_positive_factor",
            &mut rv.g_force_positive_factor,
            default.g_force_positive_factor,
            G_FORCE_DIRECTIONAL_FACTOR_BOUNDS,
        );
        check(
            "g_force_negative_factor",
            &mut rv.g_force_negative_factor,
            default.g_force_negative_factor,
            G_FORCE_DIRECTIONAL_FACTOR_BOUNDS,
        );
        check(
            "smoothing_factor",
            &mut rv.smoothing_factor,
            default.smoothing_factor,
            SMOOTHING_FACTOR_BOUNDS,
        );
        check(
            "deceleration_overshoot",
            &mut rv.deceleration_overshoot,
            default.deceleration_overshoot,
            DECELERATION_OVERSHOOT_BOUNDS,
        );

        if rv.min_fov > rv.max_fov {
            issues.push(ConfigIssue::SwappedFovRange {
                min: rv.min_fov,
                max: rv.max_fov,
            });
            std::mem::swap(&mut rv.min_fov, &mut rv.max_fov);
        }

        (rv, issues)
    }

    /// Returns the lowest and the highest FOV [`compute()`] can output for this configuration.
    ///
    /// Only meaningful for a sanitized configuration.
    pub fn fov_range(&self) -> (f32, f32) {
        (self.min_fov - self.deceleration_overshoot, self.max_fov)
    }

    /// Returns `true` if the smoothing step caps the per-frame FOV change.
    pub fn is_smoothing_active(&self) -> bool {
        self.smoothing_enabled && self.smoothing_factor > 0.
    }
}

/// Per-frame input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySample {
    /// Vehicle speed in km/h.
    pub speed_kmh: f32,
    /// Longitudinal acceleration in g: positive when speeding up, negative when braking.
    pub longitudinal_acceleration: f32,
    pub camera_category: CameraCategory,
}

impl TelemetrySample {
    /// Returns `true` if both speed and acceleration are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.speed_kmh.is_finite() && self.longitudinal_acceleration.is_finite()
    }

    /// Returns the sample with negative speed raised to zero and the acceleration saturated at
    /// [`MAX_LONGITUDINAL_G`].
    fn saturated(self) -> Self {
        Self {
            speed_kmh: self.speed_kmh.max(0.),
            longitudinal_acceleration: self
                .longitudinal_acceleration
                .clamp(-MAX_LONGITUDINAL_G, MAX_LONGITUDINAL_G),
            ..self
        }
    }
}

/// State carried from one frame to the next.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CalculatorState {
    /// FOV output by the last frame that had smoothing active.
    pub previous_fov: f32,
}

impl CalculatorState {
    pub fn new(previous_fov: f32) -> Self {
        Self { previous_fov }
    }
}

/// Computes the FOV for one frame and returns it along with the state for the next frame.
///
/// The configuration is sanitized first, see [`Configuration::sanitized()`]. If the sample
/// contains a non-finite number, the previous FOV is returned and the state is left as is.
pub fn compute(
    config: Configuration,
    sample: TelemetrySample,
    state: CalculatorState,
) -> (f32, CalculatorState) {
    if !sample.is_finite() {
        return (state.previous_fov, state);
    }

    let (config, _) = config.sanitized();
    let chain = SpeedCurve(GForce(Clamp(Smoothing(Output))));
    chain.compute(config, sample.saturated(), state, 0.)
}
