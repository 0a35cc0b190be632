use super::*;

/// One step in the FOV computation chain.
pub trait Step {
    /// Computes from this step to the end of the frame and returns the final FOV and state.
    fn compute(
        &self,
        config: Configuration,
        sample: TelemetrySample,
        state: CalculatorState,
        fov: f32,
    ) -> (f32, CalculatorState);
}

/// End of the chain.
pub struct Output;

impl Step for Output {
    fn compute(
        &self,
        _config: Configuration,
        _sample: TelemetrySample,
        state: CalculatorState,
        fov: f32,
    ) -> (f32, CalculatorState) {
        (fov, state)
    }
}

/// Sets the base FOV from the vehicle speed, ignoring the incoming value.
pub struct SpeedCurve<S>(pub S);

impl<S: Step> Step for SpeedCurve<S> {
    fn compute(
        &self,
        config: Configuration,
        sample: TelemetrySample,
        state: CalculatorState,
        _fov: f32,
    ) -> (f32, CalculatorState) {
        let ratio = (sample.speed_kmh / config.max_speed).min(1.);
        let curved = ratio.powf(config.speed_curve_exponent);

        // Not interpolated at 1 so that the top of the curve is exactly max_fov.
        let fov = if curved >= 1. {
            config.max_fov
        } else {
            config.min_fov + curved * (config.max_fov - config.min_fov)
        };

        self.0.compute(config, sample, state, fov)
    }
}

pub struct GForce<S>(pub S);

impl<S: Step> Step for GForce<S> {
    fn compute(
        &self,
        config: Configuration,
        sample: TelemetrySample,
        state: CalculatorState,
        mut fov: f32,
    ) -> (f32, CalculatorState) {
        if config.g_force_enabled {
            let accel = sample.longitudinal_acceleration;

            if config.g_force_profile == GForceProfile::Directional {
                if accel > 0. {
                    fov += accel * config.g_force_positive_factor;
                } else if accel < 0. {
                    fov -= accel.abs() * config.g_force_negative_factor;
                }
            }

            fov *= 1. + accel.abs().powf(config.g_force_curve_exponent)
                * config.g_force_factor_multiplier;
        }

        self.0.compute(config, sample, state, fov)
    }
}

pub struct Clamp<S>(pub S);

impl<S: Step> Step for Clamp<S> {
    fn compute(
        &self,
        config: Configuration,
        sample: TelemetrySample,
        state: CalculatorState,
        fov: f32,
    ) -> (f32, CalculatorState) {
        let (low, high) = config.fov_range();
        self.0.compute(config, sample, state, fov.clamp(low, high))
    }
}

/// Caps the FOV change since the previous frame at `smoothing_factor`.
pub struct Smoothing<S>(pub S);

impl<S: Step> Step for Smoothing<S> {
    fn compute(
        &self,
        config: Configuration,
        sample: TelemetrySample,
        mut state: CalculatorState,
        mut fov: f32,
    ) -> (f32, CalculatorState) {
        if config.is_smoothing_active() {
            let delta = fov - state.previous_fov;
            if delta.abs() > config.smoothing_factor {
                fov = state.previous_fov + delta.signum() * config.smoothing_factor;
            }

            // The previous value may come from a configuration with a different range.
            let (low, high) = config.fov_range();
            fov = fov.clamp(low, high);

            state.previous_fov = fov;
        }

        self.0.compute(config, sample, state, fov)
    }
}
