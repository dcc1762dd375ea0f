//! Worlds and the levels they contain

use crate::{Color, FieldInstance, LayerInstance, Point, Rect, Uid, UPoint};
use serde::{Deserialize, Serialize};

/// Grid size used by new worlds
pub const DEFAULT_GRID_SIZE: u32 = 16;

/// A single level: a sized area with one instance per layer definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Level {
    pub uid: Uid,
    pub identifier: String,
    pub width: u32,
    pub height: u32,
    /// Top-left corner in world pixels
    #[serde(default)]
    pub world_pos: Point,
    #[serde(default)]
    pub background_color: Color,
    #[serde(default)]
    pub layer_instances: Vec<LayerInstance>,
    #[serde(default)]
    pub field_instances: Vec<FieldInstance>,
}

impl Level {
    pub fn new(uid: Uid, identifier: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            uid,
            identifier: identifier.into(),
            width,
            height,
            world_pos: Point::ZERO,
            background_color: Color::rgb(0x40, 0x46, 0x5b),
            layer_instances: Vec::new(),
            field_instances: Vec::new(),
        }
    }

    pub fn size(&self) -> UPoint {
        UPoint::new(self.width, self.height)
    }

    /// Level area in level-local pixels
    pub fn local_bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    /// Level area in world pixels
    pub fn world_bounds(&self) -> Rect {
        Rect::new(self.world_pos.x, self.world_pos.y, self.width, self.height)
    }

    pub fn layer_instance(&self, layer_def_id: Uid) -> Option<&LayerInstance> {
        self.layer_instances
            .iter()
            .find(|l| l.layer_def_id == layer_def_id)
    }

    pub fn layer_instance_mut(&mut self, layer_def_id: Uid) -> Option<&mut LayerInstance> {
        self.layer_instances
            .iter_mut()
            .find(|l| l.layer_def_id == layer_def_id)
    }
}

/// A named collection of levels sharing a default grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct World {
    pub identifier: String,
    #[serde(default = "default_grid_size")]
    pub default_grid_size: u32,
    #[serde(default)]
    pub levels: Vec<Level>,
}

fn default_grid_size() -> u32 {
    DEFAULT_GRID_SIZE
}

impl World {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            default_grid_size: DEFAULT_GRID_SIZE,
            levels: Vec::new(),
        }
    }

    pub fn level(&self, uid: Uid) -> Option<&Level> {
        self.levels.iter().find(|l| l.uid == uid)
    }

    pub fn level_mut(&mut self, uid: Uid) -> Option<&mut Level> {
        self.levels.iter_mut().find(|l| l.uid == uid)
    }

    pub fn level_by_identifier(&self, identifier: &str) -> Option<&Level> {
        self.levels.iter().find(|l| l.identifier == identifier)
    }

    /// Levels whose world-space area contains `point`
    pub fn levels_at(&self, point: Point) -> impl Iterator<Item = &Level> {
        self.levels
            .iter()
            .filter(move |l| l.world_bounds().contains(point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_bounds() {
        let mut level = Level::new(1, "Level_0", 256, 128);
        level.world_pos = Point::new(512, 0);

        assert_eq!(level.size(), UPoint::new(256, 128));
        assert_eq!(level.local_bounds(), Rect::new(0, 0, 256, 128));
        assert_eq!(level.world_bounds(), Rect::new(512, 0, 256, 128));
    }

    #[test]
    fn test_world_lookup() {
        let mut world = World::new("Overworld");
        world.levels.push(Level::new(1, "A", 64, 64));
        let mut b = Level::new(2, "B", 64, 64);
        b.world_pos = Point::new(64, 0);
        world.levels.push(b);

        assert_eq!(world.default_grid_size, DEFAULT_GRID_SIZE);
        assert_eq!(world.level(2).map(|l| l.identifier.as_str()), Some("B"));
        assert!(world.level_by_identifier("C").is_none());
        let hits: Vec<_> = world.levels_at(Point::new(70, 10)).map(|l| l.uid).collect();
        assert_eq!(hits, vec![2]);
    }
}
