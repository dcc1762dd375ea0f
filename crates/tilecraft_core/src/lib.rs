//! Core data structures for tilecraft
//!
//! This crate provides the persisted level-design graph and the operations
//! that keep it consistent:
//! - `Project` - Root document owning every definition and world
//! - `World` / `Level` - Levels laid out in world space
//! - `LayerDef` / `LayerInstance` - Layer schema and per-level data (IntGrid, entities, auto tiles)
//! - `AutoRule` / `AutoRuleGroup` - Pattern rules evaluated by `tilecraft_autorule`
//! - `EntityDefinition` / `EntityInstance` - Entity schema and placed entities
//! - `FieldDef` / `FieldInstance` - Typed custom fields
//! - `TileSetDef` - Tile atlas configuration
//! - `resize_layer` / `resize_level` - IntGrid resampling when a level changes size

mod autorule;
mod color;
mod entity;
mod field;
mod geometry;
mod layer;
mod level;
mod project;
mod resize;
mod tileset;

pub use autorule::{AutoRule, AutoRuleGroup, ANYTHING_TILE_ID, NOTHING_TILE_ID, RULE_SIZES};
pub use color::Color;
pub use entity::{EntityDefinition, EntityInstance};
pub use field::{FieldDef, FieldInstance, FieldType, FieldValue};
pub use geometry::{snap_down, snap_down_u32, Point, Rect, UPoint};
pub use layer::{AutoLayerTile, IntGridValue, LayerDef, LayerInstance, LayerType};
pub use level::{Level, World, DEFAULT_GRID_SIZE};
pub use project::{Project, ProjectError};
pub use resize::{resize_layer, resize_layers, resize_level};
pub use tileset::{TextureSizes, TileSetDef};

/// Stable integer identity of a definition, level or rule
pub type Uid = i32;
