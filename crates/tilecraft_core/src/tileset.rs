//! Tileset definitions and tile-id to source-rectangle mapping

use crate::{Rect, Uid, UPoint};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Resolves tileset texture dimensions.
///
/// Texture loading belongs to the host application; the core only needs the
/// pixel size of each atlas to map tile ids to rectangles.
pub trait TextureSizes {
    /// Pixel size of the texture at `path`, if it is loaded
    fn texture_size(&self, path: &str) -> Option<UPoint>;
}

impl TextureSizes for HashMap<String, UPoint> {
    fn texture_size(&self, path: &str) -> Option<UPoint> {
        self.get(path).copied()
    }
}

/// A tile atlas: one texture cut into a regular grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TileSetDef {
    pub uid: Uid,
    pub identifier: String,
    /// Path to the texture (relative to the assets directory)
    pub path: String,
    pub tile_grid_size: u32,
    /// Border around the whole atlas, in pixels
    #[serde(default)]
    pub padding: u32,
    /// Gap between neighbouring tiles, in pixels
    #[serde(default)]
    pub spacing: u32,
}

impl TileSetDef {
    pub fn new(uid: Uid, identifier: impl Into<String>, path: impl Into<String>, tile_grid_size: u32) -> Self {
        Self {
            uid,
            identifier: identifier.into(),
            path: path.into(),
            tile_grid_size,
            padding: 0,
            spacing: 0,
        }
    }

    fn stride(&self) -> u32 {
        self.tile_grid_size + self.spacing
    }

    fn tiles_along(&self, pixels: u32) -> u32 {
        let stride = self.stride();
        if stride == 0 {
            return 0;
        }
        (pixels.saturating_sub(2 * self.padding) + self.spacing) / stride
    }

    /// Tile columns and rows for a texture of `texture_size` pixels
    pub fn grid(&self, texture_size: UPoint) -> UPoint {
        UPoint::new(
            self.tiles_along(texture_size.x),
            self.tiles_along(texture_size.y),
        )
    }

    /// Total number of tiles in the atlas
    pub fn tile_count(&self, texture_size: UPoint) -> u32 {
        let grid = self.grid(texture_size);
        grid.x * grid.y
    }

    /// Source rectangle of `tile_id` within the texture.
    ///
    /// Tiles are numbered row-major: column `tile_id % cols`, row
    /// `tile_id / cols`. Returns `None` for ids past the end of the atlas.
    pub fn tile_rect(&self, tile_id: u32, texture_size: UPoint) -> Option<Rect> {
        let grid = self.grid(texture_size);
        if grid.x == 0 || tile_id >= grid.x * grid.y {
            return None;
        }
        let col = tile_id % grid.x;
        let row = tile_id / grid.x;
        let stride = self.stride();
        Some(Rect::new(
            (self.padding + col * stride) as i32,
            (self.padding + row * stride) as i32,
            self.tile_grid_size,
            self.tile_grid_size,
        ))
    }

    /// [`tile_rect`](Self::tile_rect) with the texture size looked up through `textures`
    pub fn resolve_tile(&self, tile_id: u32, textures: &impl TextureSizes) -> Option<Rect> {
        let size = textures.texture_size(&self.path)?;
        self.tile_rect(tile_id, size)
    }
}
