//! The player's ship
//!
//! Flight is kinematic: holding thrust moves the ship along its local forward
//! axis at a fixed speed. Steering composes small rotations in the ship's own
//! frame. Firing is gated by a one-shot cooldown.

use std::sync::Arc;

use glam::{Mat4, Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::bullet::BulletStream;
use super::math::{FORWARD, RIGHT, UP, axis_angle_deg, transform_matrix};
use crate::assets::{AssetRegistry, EntityKind, TextureId};
use crate::model::MeshData;
use crate::tuning::Tuning;

/// Thrust input for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Thrust {
    #[default]
    Idle,
    Forward,
    Backward,
}

/// Ship-local rotation axes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Pitch
    X,
    /// Yaw
    Y,
    /// Roll
    Z,
}

impl Axis {
    fn local(self) -> Vec3 {
        match self {
            Axis::X => RIGHT,
            Axis::Y => UP,
            Axis::Z => FORWARD,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Ship {
    pub position: Vec3,
    pub rotation: Quat,
    pub warning_radius: f32,
    pub collision_radius: f32,
    /// Seconds since the last shot, capped at `fire_rate`
    fire_timer: f32,
    fire_rate: f32,
    speed: f32,
    bullet_speed: f32,
    mouse_rotation_speed: f32,
    barrel_roll_speed: f32,
    bullets: BulletStream,
    /// Texture for the logo material
    pub logo: TextureId,
    #[serde(skip)]
    mesh: Arc<MeshData>,
}

impl Ship {
    pub fn new(tuning: &Tuning, assets: &AssetRegistry, mesh: Arc<MeshData>) -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            warning_radius: tuning.warning_radius,
            collision_radius: tuning.collision_radius,
            fire_timer: tuning.fire_rate,
            fire_rate: tuning.fire_rate,
            speed: tuning.ship_speed,
            bullet_speed: tuning.bullet_speed,
            mouse_rotation_speed: tuning.mouse_rotation_speed,
            barrel_roll_speed: tuning.barrel_roll_speed,
            bullets: BulletStream::new(),
            logo: assets.texture_id(EntityKind::Ship),
            mesh,
        }
    }

    /// Advance the fire cooldown
    pub fn update(&mut self, dt: f32) {
        if self.fire_timer < self.fire_rate {
            self.fire_timer = (self.fire_timer + dt).min(self.fire_rate);
        }
    }

    /// Integrate bullets and drop spent ones
    pub fn update_bullets(&mut self, dt: f32) {
        self.bullets.update(dt);
    }

    /// Unit vector the nose points along
    pub fn forward(&self) -> Vec3 {
        self.rotation * FORWARD
    }

    pub fn up(&self) -> Vec3 {
        self.rotation * UP
    }

    pub fn right(&self) -> Vec3 {
        self.rotation * RIGHT
    }

    /// Fly along the local forward axis
    pub fn move_along(&mut self, thrust: Thrust, dt: f32) {
        let step = self.forward() * self.speed * dt;
        match thrust {
            Thrust::Forward => self.position += step,
            Thrust::Backward => self.position -= step,
            Thrust::Idle => {}
        }
    }

    /// Rotate about a ship-local axis by `amount * speed * dt` degrees
    pub fn rotate(&mut self, axis: Axis, dt: f32, amount: f32, speed: f32) {
        let delta = axis_angle_deg(axis.local(), amount * speed * dt);
        self.rotation = (self.rotation * delta).normalize();
    }

    /// Mouse steering: yaw by `steer.x`, pitch by `steer.y`
    pub fn steer(&mut self, steer: Vec2, dt: f32) {
        self.rotate(Axis::Y, dt, steer.x, self.mouse_rotation_speed);
        self.rotate(Axis::X, dt, steer.y, self.mouse_rotation_speed);
    }

    /// Barrel roll; negative direction rolls left
    pub fn roll(&mut self, direction: f32, dt: f32) {
        self.rotate(Axis::Z, dt, direction, self.barrel_roll_speed);
    }

    /// Fire if the cooldown allows. Returns whether a bullet was spawned.
    pub fn shoot(&mut self) -> bool {
        if self.fire_timer >= self.fire_rate {
            self.bullets
                .add_bullet(self.position, self.forward() * self.bullet_speed);
            self.fire_timer = 0.0;
            true
        } else {
            false
        }
    }

    /// Back to the spawn pose with no bullets in flight
    pub fn reset(&mut self) {
        self.position = Vec3::ZERO;
        self.rotation = Quat::IDENTITY;
        self.fire_timer = self.fire_rate;
        self.bullets.clear();
    }

    pub fn bullets(&self) -> &BulletStream {
        &self.bullets
    }

    pub fn bullets_mut(&mut self) -> &mut BulletStream {
        &mut self.bullets
    }

    pub fn mesh(&self) -> &MeshData {
        &self.mesh
    }

    /// Model matrix for the renderer
    pub fn transform(&self) -> Mat4 {
        transform_matrix(self.position, self.rotation)
    }
}
