//! Interfaces the simulator presents to the addon.

use fov_curve::CameraCategory;
use serde::{Deserialize, Serialize};

/// Camera of the player's car in the drivable camera mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrivableCamera {
    Cockpit,
    Dash,
    Bonnet,
    Bumper,
    Chase,
    Chase2,
}

impl DrivableCamera {
    /// Returns `true` for the cameras looking at the car from behind.
    pub fn is_chase(self) -> bool {
        matches!(self, DrivableCamera::Chase | DrivableCamera::Chase2)
    }
}

/// Active camera mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraMode {
    /// Cameras attached to the player's car, switched with the camera key.
    Drivable(DrivableCamera),
    /// Dedicated cockpit mode.
    Cockpit,
    /// Replays, track cameras, free camera and the like.
    Other,
}

/// Telemetry for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HostSample {
    pub speed_kmh: f32,
    /// Longitudinal acceleration in g: positive when speeding up, negative when braking.
    pub longitudinal_g: f32,
    pub camera_mode: CameraMode,
}

/// Source of per-frame car telemetry.
pub trait Telemetry {
    /// Returns the telemetry of the current frame.
    fn sample(&self) -> HostSample;
}

/// The game's camera field-of-view.
pub trait CameraSink {
    /// Returns the current FOV of the cameras of `category`.
    fn fov(&self, category: CameraCategory) -> f32;

    /// Sets the FOV of the cameras of `category`.
    ///
    /// Rejecting or clamping values the renderer can't handle is up to the implementation.
    fn set_fov(&mut self, category: CameraCategory, fov: f32);
}
