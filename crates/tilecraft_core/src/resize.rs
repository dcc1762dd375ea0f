//! Level resize: IntGrid resampling and instance translation.
//!
//! Cells are copied by coordinate, so content keeps its place relative to the
//! level's top-left corner (plus `move_delta`). Cells that land outside the
//! new grid are dropped.

use crate::{LayerDef, Level, Point, UPoint};
use tracing::debug;

/// Resample a row-major IntGrid from `old_grid` to `new_grid` cells,
/// shifting every cell by `move_delta` (in cells).
///
/// A grid that keeps its size and length is left as is, whatever the delta.
pub fn resize_layer(old_grid: UPoint, new_grid: UPoint, move_delta: Point, int_grid: &mut Vec<i32>) {
    if old_grid == new_grid && int_grid.len() == new_grid.area() {
        return;
    }
    resample(old_grid, new_grid, move_delta, int_grid);
}

/// Copy every cell of `int_grid` into a fresh `new_grid`, shifted by
/// `move_delta`.
fn resample(old_grid: UPoint, new_grid: UPoint, move_delta: Point, int_grid: &mut Vec<i32>) {
    let mut resized = vec![0; new_grid.area()];
    for y in 0..old_grid.y {
        for x in 0..old_grid.x {
            let old_index = y as usize * old_grid.x as usize + x as usize;
            let Some(&value) = int_grid.get(old_index) else {
                continue;
            };

            let nx = x as i64 + move_delta.x as i64;
            let ny = y as i64 + move_delta.y as i64;
            if nx < 0 || ny < 0 || nx >= new_grid.x as i64 || ny >= new_grid.y as i64 {
                continue;
            }

            let new_index = ny as usize * new_grid.x as usize + nx as usize;
            if let Some(cell) = resized.get_mut(new_index) {
                *cell = value;
            }
        }
    }
    *int_grid = resized;
}

/// Resample every non-empty IntGrid of `level` after a size change.
///
/// Sizes are in pixels and converted to cells with `grid_size`; a change
/// smaller than one cell leaves the level untouched. When `move_delta` is
/// non-zero, auto-layer tiles and entities are shifted by
/// `move_delta * grid_size`. The level's own `width`/`height` are left to
/// the caller.
pub fn resize_level(level: &mut Level, old_size: UPoint, new_size: UPoint, move_delta: Point, grid_size: u32) {
    if old_size == new_size {
        return;
    }
    let old_grid = old_size.to_grid(grid_size);
    let new_grid = new_size.to_grid(grid_size);
    if old_grid == new_grid {
        return;
    }

    debug!(
        level = %level.identifier,
        from = ?old_grid,
        to = ?new_grid,
        "resizing level"
    );

    for layer in &mut level.layer_instances {
        if !layer.int_grid.is_empty() {
            resize_layer(old_grid, new_grid, move_delta, &mut layer.int_grid);
        }
    }

    if !move_delta.is_zero() {
        let shift = move_delta * grid_size as i32;
        for layer in &mut level.layer_instances {
            for tile in &mut layer.auto_layer_tiles {
                tile.cell = tile.cell + shift;
            }
            for entity in &mut layer.entity_instances {
                entity.position = entity.position + shift;
            }
        }
    }
}

/// Resize `level` to `new_size` pixels, resampling each IntGrid layer with
/// its own definition's grid size.
///
/// `move_delta` is in cells of each layer's grid: tiles move by
/// `move_delta` cells and entities by `move_delta * grid_size` pixels.
/// Instances without a definition are left alone. Returns `true` if any
/// IntGrid was resampled.
pub fn resize_layers(level: &mut Level, layer_defs: &[LayerDef], new_size: UPoint, move_delta: Point) -> bool {
    let old_size = level.size();
    let mut resampled = false;

    for layer in &mut level.layer_instances {
        let Some(def) = layer_defs.iter().find(|d| d.uid == layer.layer_def_id) else {
            continue;
        };
        let old_grid = old_size.to_grid(def.grid_size);
        let new_grid = new_size.to_grid(def.grid_size);

        if !layer.int_grid.is_empty() && (old_grid != new_grid || !move_delta.is_zero()) {
            resample(old_grid, new_grid, move_delta, &mut layer.int_grid);
            resampled = true;
        }

        if !move_delta.is_zero() {
            for tile in &mut layer.auto_layer_tiles {
                tile.cell = tile.cell + move_delta;
            }
            let shift = move_delta * def.grid_size as i32;
            for entity in &mut layer.entity_instances {
                entity.position = entity.position + shift;
            }
        }
    }

    level.width = new_size.x;
    level.height = new_size.y;
    resampled
}
