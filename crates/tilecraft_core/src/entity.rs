//! Entity definitions and placed entity instances

use crate::{Color, FieldDef, FieldInstance, FieldValue, Point, Rect, Uid};
use serde::{Deserialize, Serialize};

/// Schema for a kind of entity (e.g. "Player", "Chest")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EntityDefinition {
    pub uid: Uid,
    pub identifier: String,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub color: Color,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tile_set_def_id: Option<Uid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tile_id: Option<u32>,
    /// Normalized anchor, `[0.0, 0.0]` is the top-left corner
    #[serde(default)]
    pub pivot: [f32; 2],
    #[serde(default)]
    pub field_definitions: Vec<FieldDef>,
}

impl EntityDefinition {
    pub fn new(uid: Uid, identifier: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            uid,
            identifier: identifier.into(),
            width,
            height,
            color: Color::default(),
            tags: Vec::new(),
            tile_set_def_id: None,
            tile_id: None,
            pivot: [0.0, 0.0],
            field_definitions: Vec::new(),
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Add a tag unless already present
    pub fn add_tag(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if !self.has_tag(&tag) {
            self.tags.push(tag);
        }
    }

    pub fn field_def(&self, uid: Uid) -> Option<&FieldDef> {
        self.field_definitions.iter().find(|f| f.uid == uid)
    }

    /// Create an instance at `position` with every field at its default
    pub fn instantiate(&self, position: Point) -> EntityInstance {
        EntityInstance {
            entity_def_id: self.uid,
            position,
            width: self.width,
            height: self.height,
            field_instances: self
                .field_definitions
                .iter()
                .map(FieldDef::instantiate)
                .collect(),
        }
    }
}

/// An entity placed on an Entities layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EntityInstance {
    pub entity_def_id: Uid,
    /// Top-left corner in level pixels
    pub position: Point,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub field_instances: Vec<FieldInstance>,
}

impl EntityInstance {
    pub fn new(entity_def_id: Uid, position: Point, width: u32, height: u32) -> Self {
        Self {
            entity_def_id,
            position,
            width,
            height,
            field_instances: Vec::new(),
        }
    }

    /// Pixel bounding box
    pub fn bounds(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.width, self.height)
    }

    pub fn field(&self, field_def_id: Uid) -> Option<&FieldValue> {
        self.field_instances
            .iter()
            .find(|f| f.field_def_id == field_def_id)
            .map(|f| &f.value)
    }

    /// Set a field value, adding the instance if missing
    pub fn set_field(&mut self, field_def_id: Uid, value: impl Into<FieldValue>) {
        let value = value.into();
        match self
            .field_instances
            .iter_mut()
            .find(|f| f.field_def_id == field_def_id)
        {
            Some(field) => field.value = value,
            None => self.field_instances.push(FieldInstance {
                field_def_id,
                value,
            }),
        }
    }
}
