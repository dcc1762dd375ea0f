//! The root design document: definitions plus the worlds that use them

use crate::{
    resize_layers, EntityDefinition, EntityInstance, FieldDef, LayerDef, LayerInstance, LayerType,
    Level, Point, TileSetDef, Uid, UPoint, World,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Errors raised by project operations and persistence
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Failed to read or write project: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("No world at index {0}")]
    UnknownWorld(usize),
    #[error("No level with uid {0}")]
    UnknownLevel(Uid),
    #[error("No layer definition with uid {0}")]
    UnknownLayerDef(Uid),
    #[error("No entity definition with uid {0}")]
    UnknownEntityDef(Uid),
    #[error("Entity definition {entity} is excluded from layer {layer} by its tags")]
    EntityExcluded { entity: Uid, layer: Uid },
    #[error("Layer {layer} is {actual:?}, expected {expected:?}")]
    WrongLayerType {
        layer: Uid,
        expected: LayerType,
        actual: LayerType,
    },
}

/// Root document. Owns every definition and world; cross references are
/// uids resolved through the lookup methods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Project {
    #[serde(default)]
    pub layer_definitions: Vec<LayerDef>,
    #[serde(default)]
    pub entity_definitions: Vec<EntityDefinition>,
    #[serde(default)]
    pub tile_set_definitions: Vec<TileSetDef>,
    #[serde(default)]
    pub level_field_definitions: Vec<FieldDef>,
    #[serde(default)]
    pub worlds: Vec<World>,
    /// Next uid handed out by [`Project::next_uid`]
    #[serde(default = "first_uid")]
    pub next_uid: Uid,
}

fn first_uid() -> Uid {
    1
}

impl Default for Project {
    fn default() -> Self {
        Self {
            layer_definitions: Vec::new(),
            entity_definitions: Vec::new(),
            tile_set_definitions: Vec::new(),
            level_field_definitions: Vec::new(),
            worlds: Vec::new(),
            next_uid: first_uid(),
        }
    }
}

impl Project {
    /// Create a project with a single empty world
    pub fn new(world_identifier: impl Into<String>) -> Self {
        let mut project = Self::default();
        project.worlds.push(World::new(world_identifier));
        project
    }

    /// Allocate a fresh uid
    pub fn next_uid(&mut self) -> Uid {
        let uid = self.next_uid;
        self.next_uid += 1;
        uid
    }

    // ─── Lookups ─────────────────────────────────────────────────────────────

    pub fn layer_def(&self, uid: Uid) -> Option<&LayerDef> {
        self.layer_definitions.iter().find(|d| d.uid == uid)
    }

    pub fn layer_def_mut(&mut self, uid: Uid) -> Option<&mut LayerDef> {
        self.layer_definitions.iter_mut().find(|d| d.uid == uid)
    }

    /// Position of a layer definition in the canonical order
    pub fn layer_def_index(&self, uid: Uid) -> Option<usize> {
        self.layer_definitions.iter().position(|d| d.uid == uid)
    }

    pub fn entity_def(&self, uid: Uid) -> Option<&EntityDefinition> {
        self.entity_definitions.iter().find(|d| d.uid == uid)
    }

    pub fn tileset_def(&self, uid: Uid) -> Option<&TileSetDef> {
        self.tile_set_definitions.iter().find(|d| d.uid == uid)
    }

    pub fn level_field_def(&self, uid: Uid) -> Option<&FieldDef> {
        self.level_field_definitions.iter().find(|d| d.uid == uid)
    }

    pub fn world(&self, index: usize) -> Result<&World, ProjectError> {
        self.worlds.get(index).ok_or(ProjectError::UnknownWorld(index))
    }

    pub fn world_mut(&mut self, index: usize) -> Result<&mut World, ProjectError> {
        self.worlds
            .get_mut(index)
            .ok_or(ProjectError::UnknownWorld(index))
    }

    pub fn level(&self, world_index: usize, level_uid: Uid) -> Result<&Level, ProjectError> {
        self.world(world_index)?
            .level(level_uid)
            .ok_or(ProjectError::UnknownLevel(level_uid))
    }

    pub fn level_mut(&mut self, world_index: usize, level_uid: Uid) -> Result<&mut Level, ProjectError> {
        self.world_mut(world_index)?
            .level_mut(level_uid)
            .ok_or(ProjectError::UnknownLevel(level_uid))
    }

    /// Every level across all worlds
    pub fn levels(&self) -> impl Iterator<Item = &Level> {
        self.worlds.iter().flat_map(|w| w.levels.iter())
    }

    // ─── Definitions ─────────────────────────────────────────────────────────

    /// Add a layer definition and a matching instance to every level
    pub fn add_layer_def(&mut self, def: LayerDef) {
        for world in &mut self.worlds {
            for level in &mut world.levels {
                level
                    .layer_instances
                    .push(LayerInstance::new(&def, level.size()));
            }
        }
        self.layer_definitions.push(def);
    }

    /// Remove a layer definition and every instance of it
    pub fn remove_layer_def(&mut self, uid: Uid) -> Option<LayerDef> {
        let index = self.layer_def_index(uid)?;
        for world in &mut self.worlds {
            for level in &mut world.levels {
                level.layer_instances.retain(|l| l.layer_def_id != uid);
            }
        }
        Some(self.layer_definitions.remove(index))
    }

    pub fn add_entity_def(&mut self, def: EntityDefinition) {
        self.entity_definitions.push(def);
    }

    /// Remove an entity definition. Placed instances become orphans until
    /// the next cleanup pass.
    pub fn remove_entity_def(&mut self, uid: Uid) -> Option<EntityDefinition> {
        let index = self.entity_definitions.iter().position(|d| d.uid == uid)?;
        Some(self.entity_definitions.remove(index))
    }

    pub fn add_tileset_def(&mut self, def: TileSetDef) {
        self.tile_set_definitions.push(def);
    }

    /// Remove a tileset definition and unlink every layer using it
    pub fn remove_tileset_def(&mut self, uid: Uid) -> Option<TileSetDef> {
        let index = self.tile_set_definitions.iter().position(|d| d.uid == uid)?;
        for layer in &mut self.layer_definitions {
            if layer.tile_set_def_id == Some(uid) {
                layer.tile_set_def_id = None;
            }
        }
        Some(self.tile_set_definitions.remove(index))
    }

    // ─── Worlds and levels ───────────────────────────────────────────────────

    /// Add an empty world, returning its index
    pub fn add_world(&mut self, identifier: impl Into<String>) -> usize {
        self.worlds.push(World::new(identifier));
        self.worlds.len() - 1
    }

    /// Add a level with one instance per layer definition, in definition order
    pub fn add_level(
        &mut self,
        world_index: usize,
        identifier: impl Into<String>,
        width: u32,
        height: u32,
    ) -> Result<Uid, ProjectError> {
        if world_index >= self.worlds.len() {
            return Err(ProjectError::UnknownWorld(world_index));
        }
        let uid = self.next_uid();
        let mut level = Level::new(uid, identifier, width, height);
        level.layer_instances = self
            .layer_definitions
            .iter()
            .map(|def| LayerInstance::new(def, level.size()))
            .collect();
        level.field_instances = self
            .level_field_definitions
            .iter()
            .map(FieldDef::instantiate)
            .collect();
        self.world_mut(world_index)?.levels.push(level);
        Ok(uid)
    }

    pub fn remove_level(&mut self, world_index: usize, level_uid: Uid) -> Result<Level, ProjectError> {
        let world = self.world_mut(world_index)?;
        let index = world
            .levels
            .iter()
            .position(|l| l.uid == level_uid)
            .ok_or(ProjectError::UnknownLevel(level_uid))?;
        Ok(world.levels.remove(index))
    }

    /// Resize a level, resampling its IntGrids and moving its content by
    /// `move_delta` cells.
    pub fn resize_level(
        &mut self,
        world_index: usize,
        level_uid: Uid,
        new_size: UPoint,
        move_delta: Point,
    ) -> Result<(), ProjectError> {
        let defs = std::mem::take(&mut self.layer_definitions);
        let result = self
            .level_mut(world_index, level_uid)
            .map(|level| {
                resize_layers(level, &defs, new_size, move_delta);
            });
        self.layer_definitions = defs;
        result
    }

    /// Place an entity of `entity_def_id` on layer `layer_def_id` of a level.
    ///
    /// The position is snapped to the layer grid and the entity's fields are
    /// initialized from the definition.
    pub fn add_entity_instance(
        &mut self,
        world_index: usize,
        level_uid: Uid,
        layer_def_id: Uid,
        entity_def_id: Uid,
        position: Point,
    ) -> Result<(), ProjectError> {
        let layer_def = self
            .layer_def(layer_def_id)
            .ok_or(ProjectError::UnknownLayerDef(layer_def_id))?;
        if layer_def.layer_type != LayerType::Entities {
            return Err(ProjectError::WrongLayerType {
                layer: layer_def_id,
                expected: LayerType::Entities,
                actual: layer_def.layer_type,
            });
        }
        let entity_def = self
            .entity_def(entity_def_id)
            .ok_or(ProjectError::UnknownEntityDef(entity_def_id))?;
        if layer_def.is_excluded(entity_def) {
            return Err(ProjectError::EntityExcluded {
                entity: entity_def_id,
                layer: layer_def_id,
            });
        }
        let entity: EntityInstance = entity_def.instantiate(position.snapped(layer_def.grid_size));

        let level = self.level_mut(world_index, level_uid)?;
        let layer = level
            .layer_instance_mut(layer_def_id)
            .ok_or(ProjectError::UnknownLayerDef(layer_def_id))?;
        layer.entity_instances.push(entity);
        Ok(())
    }

    // ─── Persistence ─────────────────────────────────────────────────────────

    pub fn from_json_str(json: &str) -> Result<Self, ProjectError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> Result<String, ProjectError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a project from a JSON file
    pub fn load(path: &Path) -> Result<Self, ProjectError> {
        let content = std::fs::read_to_string(path)?;
        let project = Self::from_json_str(&content)?;
        info!(path = %path.display(), worlds = project.worlds.len(), "loaded project");
        Ok(project)
    }

    /// Save the project to a JSON file
    pub fn save(&self, path: &Path) -> Result<(), ProjectError> {
        std::fs::write(path, self.to_json_string()?)?;
        info!(path = %path.display(), "saved project");
        Ok(())
    }
}
