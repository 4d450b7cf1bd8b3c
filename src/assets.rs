//! Texture handle registry
//!
//! The renderer uploads textures at startup and records the handle it got for
//! each entity kind here. The simulation only tags entities with handles; it
//! never looks inside them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Everything that can carry a texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Ship,
    Asteroid1,
    Asteroid2,
    Asteroid3,
    Asteroid4,
    SkyboxTop,
    SkyboxBottom,
    SkyboxLeft,
    SkyboxRight,
    SkyboxFront,
    SkyboxBack,
    Bullets,
    Explosion,
}

impl EntityKind {
    pub const ALL: [EntityKind; 13] = [
        EntityKind::Ship,
        EntityKind::Asteroid1,
        EntityKind::Asteroid2,
        EntityKind::Asteroid3,
        EntityKind::Asteroid4,
        EntityKind::SkyboxTop,
        EntityKind::SkyboxBottom,
        EntityKind::SkyboxLeft,
        EntityKind::SkyboxRight,
        EntityKind::SkyboxFront,
        EntityKind::SkyboxBack,
        EntityKind::Bullets,
        EntityKind::Explosion,
    ];

    /// The asteroid texture variants, picked at random per spawn
    pub const ASTEROIDS: [EntityKind; 4] = [
        EntityKind::Asteroid1,
        EntityKind::Asteroid2,
        EntityKind::Asteroid3,
        EntityKind::Asteroid4,
    ];
}

/// Opaque renderer texture handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TextureId(pub u32);

impl TextureId {
    /// "No texture"
    pub const NONE: TextureId = TextureId(0);
}

/// Maps entity kinds to texture handles. Owned by the application and passed
/// by reference to whatever needs handles at construction.
#[derive(Debug, Clone, Default)]
pub struct AssetRegistry {
    textures: HashMap<EntityKind, TextureId>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with sequential handles for every kind (headless runs, tests)
    pub fn with_placeholder_handles() -> Self {
        let mut registry = Self::new();
        for (i, kind) in EntityKind::ALL.iter().enumerate() {
            registry.register(*kind, TextureId(i as u32 + 1));
        }
        registry
    }

    /// Record the handle for a kind, returning the previous one if any
    pub fn register(&mut self, kind: EntityKind, id: TextureId) -> Option<TextureId> {
        self.textures.insert(kind, id)
    }

    /// Handle for a kind, [`TextureId::NONE`] when nothing was registered
    pub fn texture_id(&self, kind: EntityKind) -> TextureId {
        match self.textures.get(&kind) {
            Some(id) => *id,
            None => {
                log::warn!("No texture registered for {:?}", kind);
                TextureId::NONE
            }
        }
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_handles_are_distinct() {
        let registry = AssetRegistry::with_placeholder_handles();
        assert_eq!(registry.len(), EntityKind::ALL.len());
        let ship = registry.texture_id(EntityKind::Ship);
        let rock = registry.texture_id(EntityKind::Asteroid1);
        assert_ne!(ship, rock);
        assert_ne!(ship, TextureId::NONE);
    }

    #[test]
    fn test_missing_kind_returns_none() {
        let mut registry = AssetRegistry::new();
        assert_eq!(registry.texture_id(EntityKind::Explosion), TextureId::NONE);

        registry.register(EntityKind::Explosion, TextureId(42));
        assert_eq!(registry.texture_id(EntityKind::Explosion), TextureId(42));
        assert_eq!(
            registry.register(EntityKind::Explosion, TextureId(43)),
            Some(TextureId(42))
        );
    }
}
