//! Shared capability of everything that moves and collides
//!
//! Asteroids and bullets both implement [`Body`], so the collision detection
//! pass is written once and can be exercised with synthetic bodies in tests.

use glam::Vec3;

/// A free-moving sphere (radius 0 for point-like bodies)
pub trait Body {
    /// Identity for skipping self in pair loops. Only unique within the live set.
    fn id(&self) -> u32;
    fn position(&self) -> Vec3;
    fn radius(&self) -> f32;
    /// Integrate motion over `dt` seconds
    fn update(&mut self, dt: f32);
    fn is_marked_for_deletion(&self) -> bool;
}

/// Swap-remove every body marked for deletion.
///
/// Order is not preserved and any index held across this call is invalid.
/// Returns how many were removed.
pub fn cull_marked<B: Body>(bodies: &mut Vec<B>) -> usize {
    let before = bodies.len();
    let mut i = 0;
    while i < bodies.len() {
        if bodies[i].is_marked_for_deletion() {
            bodies.swap_remove(i);
        } else {
            i += 1;
        }
    }
    before - bodies.len()
}
