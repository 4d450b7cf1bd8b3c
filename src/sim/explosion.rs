//! Explosion effects
//!
//! Purely visual: a burst of debris that expands and fades, then disappears.
//! Game resets leave explosions alone so a ship's own explosion stays on
//! screen after it respawns.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::math::random_unit;
use crate::tuning::Tuning;

/// One piece of debris, relative to the explosion origin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Debris {
    pub offset: Vec3,
    pub vel: Vec3,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub origin: Vec3,
    pub debris: Vec<Debris>,
    /// Seconds since spawn
    pub age: f32,
    pub lifetime: f32,
}

impl Explosion {
    pub fn update(&mut self, dt: f32) {
        self.age += dt;
        for d in &mut self.debris {
            d.offset += d.vel * dt;
        }
    }

    /// 1 when fresh, 0 when spent
    pub fn life(&self) -> f32 {
        if self.lifetime <= 0.0 {
            return 0.0;
        }
        (1.0 - self.age / self.lifetime).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.age >= self.lifetime
    }
}

/// All live explosions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplosionManager {
    explosions: Vec<Explosion>,
    debris_count: usize,
    debris_speed: f32,
    lifetime: f32,
}

impl ExplosionManager {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            explosions: Vec::new(),
            debris_count: tuning.explosion_debris,
            debris_speed: tuning.explosion_debris_speed,
            lifetime: tuning.explosion_lifetime,
        }
    }

    /// Spawn an explosion at `origin`
    pub fn populate<R: Rng>(&mut self, origin: Vec3, rng: &mut R) {
        let debris = (0..self.debris_count)
            .map(|_| {
                let speed = self.debris_speed * rng.random_range(0.5..=1.0);
                Debris {
                    offset: Vec3::ZERO,
                    vel: random_unit(rng) * speed,
                }
            })
            .collect();
        self.explosions.push(Explosion {
            origin,
            debris,
            age: 0.0,
            lifetime: self.lifetime,
        });
    }

    /// Age every explosion and drop the finished ones
    pub fn update(&mut self, dt: f32) {
        for explosion in &mut self.explosions {
            explosion.update(dt);
        }
        self.explosions.retain(|e| !e.is_finished());
    }

    pub fn explosions(&self) -> &[Explosion] {
        &self.explosions
    }

    pub fn iter(&self) -> impl Iterator<Item = &Explosion> {
        self.explosions.iter()
    }

    pub fn len(&self) -> usize {
        self.explosions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.explosions.is_empty()
    }
}
