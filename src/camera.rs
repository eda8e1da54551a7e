//! The first-person camera.
//!
//! Yaw and pitch (in degrees) and the position are the only authoritative state. The `front`,
//! `right` and `up` basis vectors are derived from them by [`Camera::update`] and must be
//! refreshed before the view matrix is read.
//!
//! Pitch is not clamped; at ±90° the front vector becomes parallel to the world
//! up vector and the derived basis degenerates.

use glam::{Mat4, Vec3};

/// Distance travelled per second of held movement.
pub const MOVE_RATE: f32 = 0.3;
/// Degrees of yaw turned per second of held turning.
pub const TURN_RATE: f32 = 80.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    position: Vec3,
    world_up: Vec3,
    yaw: f32,
    pitch: f32,
    front: Vec3,
    right: Vec3,
    up: Vec3,
}

impl Default for Camera {
    /// A camera at the origin looking down -Z.
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::Y, -90.0, 0.0)
    }
}

impl Camera {
    /// Creates a camera and derives its basis vectors.
    pub fn new(position: Vec3, world_up: Vec3, yaw: f32, pitch: f32) -> Self {
        let mut camera = Self {
            position,
            world_up,
            yaw,
            pitch,
            front: Vec3::NEG_Z,
            right: Vec3::X,
            up: Vec3::Y,
        };
        camera.update();
        camera
    }

    pub fn move_forward(&mut self, dt: f32) {
        self.position += self.front * dt * MOVE_RATE;
    }

    pub fn move_backward(&mut self, dt: f32) {
        self.position -= self.front * dt * MOVE_RATE;
    }

    pub fn turn_left(&mut self, dt: f32) {
        self.yaw -= dt * TURN_RATE;
    }

    pub fn turn_right(&mut self, dt: f32) {
        self.yaw += dt * TURN_RATE;
    }

    /// Recomputes `front`, then `right` from it, then `up` from both.
    pub fn update(&mut self) {
        let yaw = self.yaw.to_radians();
        let pitch = self.pitch.to_radians();

        self.front = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }

    /// The look-at transform for the current state.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn world_up(&self) -> Vec3 {
        self.world_up
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }
}
