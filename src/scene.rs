//! The live collection of entities for one game session.

use crate::entities::{Entity, EntityKind, Player};

/// Ordered entity list.  Order decides update and draw order; the player is
/// first because it is spawned first.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    entities: Vec<Entity>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entity: impl Into<Entity>) {
        self.entities.push(entity.into());
    }

    /// Drop every entity whose `exist` flag was cleared.  This is the only
    /// place entities leave the scene.
    pub fn prune(&mut self) {
        self.entities.retain(Entity::exists);
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut [Entity] {
        &mut self.entities
    }

    pub fn player(&self) -> Option<&Player> {
        self.entities.iter().find_map(|e| match e {
            Entity::Player(p) => Some(p),
            _ => None,
        })
    }

    pub fn player_mut(&mut self) -> Option<&mut Player> {
        self.entities.iter_mut().find_map(|e| match e {
            Entity::Player(p) => Some(p),
            _ => None,
        })
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.entities.iter().filter(|e| e.kind() == kind).count()
    }

    pub fn target_count(&self) -> usize {
        self.count(EntityKind::Target)
    }

    /// Bolts that are still flying (not yet marked for removal).
    pub fn projectiles_in_flight(&self) -> usize {
        self.entities
            .iter()
            .filter(|e| e.kind() == EntityKind::Projectile && e.exists())
            .count()
    }
}
