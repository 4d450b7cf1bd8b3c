//! Vector and rotation helpers on top of glam
//!
//! Conventions:
//! - Ship-local axes: forward is -Z, up is +Y, right is +X
//! - `a * b` on quaternions rotates by `b` first, then `a`. Ship rotations
//!   compose increments on the right so they act in the ship's own frame.
//! - Normalising a zero vector yields the zero vector (`normalize_or_zero`),
//!   never NaN.

use glam::{Mat4, Quat, Vec3};
use rand::Rng;

/// Ship-local forward axis
pub const FORWARD: Vec3 = Vec3::NEG_Z;
/// Ship-local up axis
pub const UP: Vec3 = Vec3::Y;
/// Ship-local right axis
pub const RIGHT: Vec3 = Vec3::X;

/// Uniformly distributed point on the unit sphere.
///
/// Rejection-samples the unit ball and projects outward, so there's no
/// clustering at the poles.
pub fn random_unit<R: Rng>(rng: &mut R) -> Vec3 {
    loop {
        let v = Vec3::new(
            rng.random_range(-1.0..=1.0),
            rng.random_range(-1.0..=1.0),
            rng.random_range(-1.0..=1.0),
        );
        let len_sq = v.length_squared();
        if len_sq > 1e-6 && len_sq <= 1.0 {
            return v / len_sq.sqrt();
        }
    }
}

/// Linearly remap `value` from one range to another
#[inline]
pub fn map_to_range(value: f32, old_min: f32, old_max: f32, new_min: f32, new_max: f32) -> f32 {
    let span = old_max - old_min;
    if span.abs() < f32::EPSILON {
        return new_min;
    }
    new_min + (value - old_min) * (new_max - new_min) / span
}

/// Rotation of `degrees` around `axis`
#[inline]
pub fn axis_angle_deg(axis: Vec3, degrees: f32) -> Quat {
    Quat::from_axis_angle(axis.normalize_or_zero(), degrees.to_radians())
}

/// Model matrix for an entity at `position` with orientation `rotation`
#[inline]
pub fn transform_matrix(position: Vec3, rotation: Quat) -> Mat4 {
    Mat4::from_rotation_translation(rotation, position)
}
