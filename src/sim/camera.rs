//! Camera view selection
//!
//! The held I/J/K/L/M key picks which side of the ship the camera sits on.
//! Only the target pose is computed here; smoothing toward it is the
//! renderer's business.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::math::{RIGHT, UP, axis_angle_deg};
use super::ship::Ship;
use crate::consts::{CAMERA_DISTANCE, CAMERA_RAISE};

/// Which way the camera looks at the ship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Look {
    #[default]
    Ahead,
    Left,
    Right,
    Behind,
    Above,
    Below,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    pub look: Look,
    /// Target position for this frame
    pub position: Vec3,
    /// Target orientation for this frame
    pub rotation: Quat,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            look: Look::Ahead,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Camera {
    pub fn look(&mut self, look: Look) {
        self.look = look;
    }

    /// Recompute the target pose around the ship
    pub fn follow(&mut self, ship: &Ship) {
        let (position, rotation) = target_pose(self.look, ship);
        self.position = position;
        self.rotation = rotation;
    }
}

/// Camera pose for a view, raised slightly along the ship's up axis
pub fn target_pose(look: Look, ship: &Ship) -> (Vec3, Quat) {
    let d = CAMERA_DISTANCE;
    let (offset, rotation) = match look {
        Look::Ahead => (ship.forward() * d, ship.rotation),
        Look::Left => (ship.right() * d, ship.rotation * axis_angle_deg(UP, -90.0)),
        Look::Right => (-ship.right() * d, ship.rotation * axis_angle_deg(UP, 90.0)),
        Look::Behind => (-ship.forward() * d, ship.rotation * axis_angle_deg(UP, 180.0)),
        Look::Above => (-ship.up() * d, ship.rotation * axis_angle_deg(RIGHT, -90.0)),
        Look::Below => (ship.up() * d, ship.rotation * axis_angle_deg(RIGHT, 90.0)),
    };
    let position = ship.position + offset + ship.up() * CAMERA_RAISE;
    (position, rotation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetRegistry;
    use crate::model::MeshData;
    use crate::tuning::Tuning;
    use std::sync::Arc;

    fn ship() -> Ship {
        Ship::new(
            &Tuning::default(),
            &AssetRegistry::new(),
            Arc::new(MeshData::placeholder_ship()),
        )
    }

    #[test]
    fn test_views_are_distance_from_ship() {
        let ship = ship();
        for look in [Look::Ahead, Look::Left, Look::Right, Look::Behind, Look::Above, Look::Below] {
            let (pos, rot) = target_pose(look, &ship);
            let flat = pos - ship.up() * CAMERA_RAISE;
            assert!((flat.length() - CAMERA_DISTANCE).abs() < 1e-3, "{:?}", look);
            assert!((rot.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_behind_faces_opposite_ahead() {
        let ship = ship();
        let (ahead, _) = target_pose(Look::Ahead, &ship);
        let (behind, _) = target_pose(Look::Behind, &ship);
        assert!((ahead + behind - 2.0 * ship.up() * CAMERA_RAISE).length() < 1e-3);
    }

    #[test]
    fn test_follow_tracks_ship() {
        let mut ship = ship();
        let mut camera = Camera::default();
        ship.position = Vec3::new(10.0, 0.0, 0.0);
        camera.look(Look::Behind);
        camera.follow(&ship);
        assert!((camera.position - Vec3::new(10.0, CAMERA_RAISE, CAMERA_DISTANCE)).length() < 1e-3);
    }
}
