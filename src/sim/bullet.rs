//! Bullets and the per-ship bullet collection
//!
//! A bullet flies in a straight line until it hits a wall or an asteroid.
//! There is no time-based expiry.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::body::{Body, cull_marked};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec3,
    pub vel: Vec3,
    marked_for_deletion: bool,
}

impl Bullet {
    pub fn new(id: u32, pos: Vec3, vel: Vec3) -> Self {
        Self {
            id,
            pos,
            vel,
            marked_for_deletion: false,
        }
    }

    pub fn mark_for_deletion(&mut self) {
        self.marked_for_deletion = true;
    }
}

impl Body for Bullet {
    fn id(&self) -> u32 {
        self.id
    }

    fn position(&self) -> Vec3 {
        self.pos
    }

    fn radius(&self) -> f32 {
        0.0
    }

    fn update(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    fn is_marked_for_deletion(&self) -> bool {
        self.marked_for_deletion
    }
}

/// All live bullets fired by one ship.
///
/// Indices are only valid until the next deletion: removal swaps the last
/// bullet into the freed slot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BulletStream {
    bullets: Vec<Bullet>,
    next_id: u32,
}

impl BulletStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a bullet at `pos` travelling with `vel`
    pub fn add_bullet(&mut self, pos: Vec3, vel: Vec3) {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.bullets.push(Bullet::new(id, pos, vel));
    }

    /// Integrate every bullet and drop the spent ones
    pub fn update(&mut self, dt: f32) {
        for bullet in &mut self.bullets {
            bullet.update(dt);
        }
        self.cull();
    }

    /// Remove bullets marked for deletion, returning how many went
    pub fn cull(&mut self) -> usize {
        cull_marked(&mut self.bullets)
    }

    /// O(1) removal; the last bullet takes index `index`
    pub fn delete_by_index(&mut self, index: usize) -> Option<Bullet> {
        (index < self.bullets.len()).then(|| self.bullets.swap_remove(index))
    }

    pub fn clear(&mut self) {
        self.bullets.clear();
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn bullets_mut(&mut self) -> &mut [Bullet] {
        &mut self.bullets
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bullet> {
        self.bullets.iter()
    }

    pub fn len(&self) -> usize {
        self.bullets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bullets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bullets_fly_straight() {
        let mut stream = BulletStream::new();
        stream.add_bullet(Vec3::ZERO, Vec3::new(0.0, 0.0, -100.0));
        stream.update(0.5);
        assert_eq!(stream.bullets()[0].pos, Vec3::new(0.0, 0.0, -50.0));
    }

    #[test]
    fn test_marked_bullets_culled_on_update() {
        let mut stream = BulletStream::new();
        for _ in 0..3 {
            stream.add_bullet(Vec3::ZERO, Vec3::X);
        }
        stream.bullets_mut()[1].mark_for_deletion();
        stream.update(0.1);
        assert_eq!(stream.len(), 2);
        assert!(stream.iter().all(|b| b.id != 1));
    }

    #[test]
    fn test_delete_by_index() {
        let mut stream = BulletStream::new();
        for _ in 0..3 {
            stream.add_bullet(Vec3::ZERO, Vec3::X);
        }
        assert_eq!(stream.delete_by_index(0).map(|b| b.id), Some(0));
        // Last bullet moved into slot 0
        assert_eq!(stream.bullets()[0].id, 2);
        assert_eq!(stream.delete_by_index(1).map(|b| b.id), Some(1));
        assert!(stream.delete_by_index(5).is_none());
        assert_eq!(stream.len(), 1);
    }
}
