//! Orbit camera shared by every part of the preview.
//!
//! Left drag orbits, right drag pans, the wheel zooms and `Home` returns
//! to the framing the camera started with.

use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll};
use bevy::prelude::*;

/// Radians of yaw or pitch per pixel dragged.
const ORBIT_SENSITIVITY: f32 = 0.005;
/// Fraction of the orbit radius panned per pixel dragged.
const PAN_SENSITIVITY: f32 = 0.0015;
/// Fractional radius change per scroll line.
const ZOOM_SENSITIVITY: f32 = 0.1;
/// Pitch limit, just short of straight up or down.
const MAX_PITCH: f32 = 1.45;
/// Initial radius as a multiple of the framed sphere's radius.
const FRAMING_FACTOR: f32 = 2.8;

/// Spherical camera around a focus point.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    /// Point the camera looks at.
    pub focus: Vec3,
    /// Distance from the focus.
    pub radius: f32,
    /// Rotation about +Y, radians.
    pub yaw: f32,
    /// Elevation above the XZ plane, radians.
    pub pitch: f32,
    /// Radius limits, derived from the framed scene.
    pub radius_range: (f32, f32),
    home: (Vec3, f32),
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::framing(Vec3::ZERO, 1.0)
    }
}

impl OrbitCamera {
    /// Camera that frames a sphere of `extent` around `focus`.
    ///
    /// The zoom range scales with the sphere so small ligands and large
    /// complexes both stay reachable.
    #[must_use]
    pub fn framing(focus: Vec3, extent: f32) -> Self {
        let extent = extent.max(1.0);
        let radius = extent * FRAMING_FACTOR;
        Self {
            focus,
            radius,
            yaw: 0.6,
            pitch: 0.4,
            radius_range: (extent * 0.1, extent * 20.0),
            home: (focus, radius),
        }
    }

    /// World position of the eye.
    #[must_use]
    pub fn eye(&self) -> Vec3 {
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        self.focus + self.radius * Vec3::new(cos_yaw * cos_pitch, sin_pitch, sin_yaw * cos_pitch)
    }

    /// Rotate by a mouse drag in pixels.
    pub fn orbit(&mut self, drag: Vec2) {
        self.yaw -= drag.x * ORBIT_SENSITIVITY;
        self.pitch = (self.pitch + drag.y * ORBIT_SENSITIVITY).clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Move the focus in the view plane by a mouse drag in pixels.
    pub fn pan(&mut self, drag: Vec2) {
        let forward = (self.focus - self.eye()).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward);
        let scale = PAN_SENSITIVITY * self.radius;
        self.focus += (up * drag.y - right * drag.x) * scale;
    }

    /// Zoom by scroll lines; positive moves closer.
    pub fn zoom(&mut self, lines: f32) {
        let (near, far) = self.radius_range;
        self.radius = (self.radius * (1.0 - lines * ZOOM_SENSITIVITY)).clamp(near, far);
    }

    /// Return to the initial focus and radius.
    pub fn reset(&mut self) {
        (self.focus, self.radius) = self.home;
    }

    /// Place `transform` at the eye, looking at the focus.
    pub fn apply(&self, transform: &mut Transform) {
        *transform = Transform::from_translation(self.eye()).looking_at(self.focus, Vec3::Y);
    }
}

/// Input handling and transform sync for [`OrbitCamera`].
pub struct OrbitCameraPlugin;

impl Plugin for OrbitCameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (drive_orbit_camera, sync_orbit_transform).chain());
    }
}

#[allow(clippy::needless_pass_by_value)] // Bevy system parameters are passed by value
fn drive_orbit_camera(
    mut cameras: Query<&mut OrbitCamera>,
    buttons: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    motion: Res<AccumulatedMouseMotion>,
    scroll: Res<AccumulatedMouseScroll>,
) {
    for mut camera in &mut cameras {
        if keys.just_pressed(KeyCode::Home) {
            camera.reset();
        }
        if buttons.pressed(MouseButton::Left) {
            camera.orbit(motion.delta);
        } else if buttons.pressed(MouseButton::Right) {
            camera.pan(motion.delta);
        }
        if scroll.delta.y.abs() > f32::EPSILON {
            camera.zoom(scroll.delta.y);
        }
    }
}

fn sync_orbit_transform(mut cameras: Query<(&OrbitCamera, &mut Transform), Changed<OrbitCamera>>) {
    for (camera, mut transform) in &mut cameras {
        camera.apply(&mut transform);
    }
}
