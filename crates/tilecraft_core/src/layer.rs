//! Layer definitions and their per-level instances

use crate::{AutoRuleGroup, Color, EntityDefinition, EntityInstance, Point, Uid, UPoint};
use serde::{Deserialize, Serialize};

/// The type of a layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerType {
    IntGrid,
    Entities,
    Tiles,
    AutoLayer,
}

/// A named, colored IntGrid value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IntGridValue {
    pub value: i32,
    pub identifier: String,
    pub color: Color,
}

/// Shared layer schema, referenced by uid from every [`LayerInstance`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LayerDef {
    pub uid: Uid,
    pub identifier: String,
    pub grid_size: u32,
    pub layer_type: LayerType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tile_set_def_id: Option<Uid>,
    #[serde(default)]
    pub int_grid_values: Vec<IntGridValue>,
    #[serde(default)]
    pub auto_rule_groups: Vec<AutoRuleGroup>,
    #[serde(default)]
    pub required_tags: Vec<String>,
    #[serde(default)]
    pub excluded_tags: Vec<String>,
}

impl LayerDef {
    pub fn new(uid: Uid, identifier: impl Into<String>, layer_type: LayerType, grid_size: u32) -> Self {
        Self {
            uid,
            identifier: identifier.into(),
            grid_size,
            layer_type,
            tile_set_def_id: None,
            int_grid_values: Vec::new(),
            auto_rule_groups: Vec::new(),
            required_tags: Vec::new(),
            excluded_tags: Vec::new(),
        }
    }

    /// Number of cells covering a level of `level_size` pixels
    pub fn grid_extent(&self, level_size: UPoint) -> UPoint {
        level_size.to_grid(self.grid_size)
    }

    /// Look up a painted value by its integer
    pub fn int_grid_value(&self, value: i32) -> Option<&IntGridValue> {
        self.int_grid_values.iter().find(|v| v.value == value)
    }

    /// Append a new IntGrid value, numbered after the highest existing one
    pub fn add_int_grid_value(&mut self, identifier: impl Into<String>, color: Color) -> i32 {
        let value = self
            .int_grid_values
            .iter()
            .map(|v| v.value)
            .max()
            .unwrap_or(0)
            + 1;
        self.int_grid_values.push(IntGridValue {
            value,
            identifier: identifier.into(),
            color,
        });
        value
    }

    pub fn rule_group(&self, uid: Uid) -> Option<&AutoRuleGroup> {
        self.auto_rule_groups.iter().find(|g| g.uid == uid)
    }

    pub fn rule_group_mut(&mut self, uid: Uid) -> Option<&mut AutoRuleGroup> {
        self.auto_rule_groups.iter_mut().find(|g| g.uid == uid)
    }

    /// Whether entities of `def` may not be placed on this layer.
    ///
    /// Excluded when the layer has required tags and `def` lacks any of them,
    /// or when `def` carries any of the layer's excluded tags.
    pub fn is_excluded(&self, def: &EntityDefinition) -> bool {
        if !self.required_tags.is_empty()
            && !self.required_tags.iter().all(|tag| def.has_tag(tag))
        {
            return true;
        }
        self.excluded_tags.iter().any(|tag| def.has_tag(tag))
    }
}

/// A tile placement derived by the rule engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AutoLayerTile {
    pub tile_id: u32,
    /// Grid cell the tile covers
    pub cell: Point,
}

/// Per-level data for one [`LayerDef`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LayerInstance {
    pub layer_def_id: Uid,
    /// Row-major painted values, `cols * rows` long for IntGrid layers.
    #[serde(default)]
    pub int_grid: Vec<i32>,
    #[serde(default)]
    pub entity_instances: Vec<EntityInstance>,
    /// Rebuilt on every rule pass; never hand-authored.
    #[serde(default)]
    pub auto_layer_tiles: Vec<AutoLayerTile>,
    #[serde(default = "default_visible")]
    pub is_visible: bool,
}

fn default_visible() -> bool {
    true
}

impl LayerInstance {
    /// Create an instance for `def` on a level of `level_size` pixels.
    ///
    /// Only IntGrid layers get an IntGrid allocation.
    pub fn new(def: &LayerDef, level_size: UPoint) -> Self {
        let int_grid = match def.layer_type {
            LayerType::IntGrid => vec![0; def.grid_extent(level_size).area()],
            LayerType::Entities | LayerType::Tiles | LayerType::AutoLayer => Vec::new(),
        };
        Self {
            layer_def_id: def.uid,
            int_grid,
            entity_instances: Vec::new(),
            auto_layer_tiles: Vec::new(),
            is_visible: true,
        }
    }

    /// Painted value at cell `(x, y)` for a grid `cols` wide
    pub fn int_grid_value(&self, cols: u32, x: u32, y: u32) -> Option<i32> {
        if x >= cols {
            return None;
        }
        let index = y as usize * cols as usize + x as usize;
        self.int_grid.get(index).copied()
    }

    /// Paint cell `(x, y)`. Writes outside the grid are ignored.
    pub fn set_int_grid_value(&mut self, cols: u32, x: u32, y: u32, value: i32) -> bool {
        if x >= cols {
            return false;
        }
        let index = y as usize * cols as usize + x as usize;
        match self.int_grid.get_mut(index) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    /// Whether any tile sits at `cell`
    pub fn auto_tile_at(&self, cell: Point) -> Option<&AutoLayerTile> {
        self.auto_layer_tiles.iter().find(|t| t.cell == cell)
    }
}
