/// Rotation state, drag/auto-spin control and transform matrices
use std::f32::consts::FRAC_PI_2;

use nalgebra::{Matrix4, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// Orientation of the piece anchor as pitch (about X) and yaw (about Y),
/// in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
}

impl RotationState {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: x.clamp(-FRAC_PI_2, FRAC_PI_2),
            y,
        }
    }

    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Rotate by delta amounts (in radians). Pitch stays within ±90°.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.x = (self.x + dx).clamp(-FRAC_PI_2, FRAC_PI_2);
        self.y = (self.y + dy) % std::f32::consts::TAU;
    }

    /// Yaw about the vertical axis, then pitch about the horizontal one.
    pub fn orientation(&self) -> UnitQuaternion<f32> {
        let pitch = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), self.x);
        let yaw = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), self.y);
        pitch * yaw
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

/// Tunables for [`SpinController`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinSettings {
    pub auto_spin: bool,
    /// Yaw speed while spinning, radians per second.
    pub spin_speed: f32,
    /// Radians per pixel of drag.
    pub drag_sensitivity: f32,
    /// Starting pitch, radians.
    pub initial_pitch: f32,
}

impl Default for SpinSettings {
    fn default() -> Self {
        Self {
            auto_spin: true,
            spin_speed: 0.6,
            drag_sensitivity: 0.01,
            initial_pitch: 0.45,
        }
    }
}

/// Turns drag deltas and elapsed time into an anchor orientation. Never
/// touches geometry.
#[derive(Debug, Clone)]
pub struct SpinController {
    pub rotation: RotationState,
    pub settings: SpinSettings,
}

impl SpinController {
    pub fn new(settings: SpinSettings) -> Self {
        Self {
            rotation: RotationState::new(settings.initial_pitch, 0.0),
            settings,
        }
    }

    /// Horizontal drag turns the piece about the vertical axis, vertical
    /// drag tilts it.
    pub fn drag(&mut self, dx: f32, dy: f32) {
        let s = self.settings.drag_sensitivity;
        self.rotation.rotate(dy * s, dx * s);
    }

    /// Flip auto-spin, returning whether it is now spinning.
    pub fn toggle_pause(&mut self) -> bool {
        self.settings.auto_spin = !self.settings.auto_spin;
        log::info!("auto-spin {}", if self.settings.auto_spin { "on" } else { "paused" });
        self.settings.auto_spin
    }

    pub fn is_spinning(&self) -> bool {
        self.settings.auto_spin
    }

    /// Advance by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        if self.settings.auto_spin {
            self.rotation.rotate(0.0, self.settings.spin_speed * dt);
        }
    }

    pub fn orientation(&self) -> UnitQuaternion<f32> {
        self.rotation.orientation()
    }
}

impl Default for SpinController {
    fn default() -> Self {
        Self::new(SpinSettings::default())
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Create a model-view-projection matrix
    pub fn mvp_matrix(
        model: &Matrix4<f32>,
        view: &Matrix4<f32>,
        projection: &Matrix4<f32>,
    ) -> Matrix4<f32> {
        projection * view * model
    }
}
