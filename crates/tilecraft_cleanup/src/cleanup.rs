//! The cleanup pass.
//!
//! Per level, in order: snap position and size to the world grid, then for
//! each layer instance (back to front) drop it if its definition is gone,
//! clear data that does not belong to its layer type, resample a mis-sized
//! IntGrid, drop auto tiles outside the grid, and sweep its entities.
//! Finally every level's layer instances are re-sorted into definition
//! order.

use std::collections::HashSet;

use tilecraft_core::{
    resize_layer, resize_layers, snap_down_u32, EntityDefinition, EntityInstance, FieldDef,
    LayerDef, LayerInstance, LayerType, Level, Point, Project, Rect, Uid, UPoint,
};
use tracing::warn;

use crate::CleanupReport;

/// Definitions the pass resolves references against.
struct Definitions<'a> {
    layers: &'a [LayerDef],
    entities: &'a [EntityDefinition],
    level_fields: &'a [FieldDef],
}

impl Definitions<'_> {
    fn layer(&self, uid: Uid) -> Option<&LayerDef> {
        self.layers.iter().find(|d| d.uid == uid)
    }

    fn entity(&self, uid: Uid) -> Option<&EntityDefinition> {
        self.entities.iter().find(|d| d.uid == uid)
    }
}

/// Repair every world, level, layer and entity of `project`.
///
/// Never fails; each fix is logged with `tracing::warn!` and counted in the
/// returned report. Running the pass on its own output finds nothing to fix.
pub fn cleanup_project(project: &mut Project) -> CleanupReport {
    let mut report = CleanupReport::default();

    {
        let Project {
            layer_definitions,
            entity_definitions,
            level_field_definitions,
            worlds,
            ..
        } = &mut *project;
        let defs = Definitions {
            layers: layer_definitions,
            entities: entity_definitions,
            level_fields: level_field_definitions,
        };

        for world in worlds.iter_mut() {
            let grid = world.default_grid_size;
            for level in &mut world.levels {
                cleanup_level(level, grid, &defs, &mut report);
            }
        }
    }

    report.levels_reordered = sort_level_instances(project);
    report
}

/// Sort every level's layer instances into the order of the project's layer
/// definitions. Returns the number of levels whose order changed.
///
/// The sort is stable. An instance whose definition is missing ranks as `-1`
/// and therefore moves to the front.
pub fn sort_level_instances(project: &mut Project) -> usize {
    let Project {
        layer_definitions,
        worlds,
        ..
    } = project;
    let layer_definitions: &[LayerDef] = layer_definitions;

    let mut reordered = 0;
    for level in worlds.iter_mut().flat_map(|w| w.levels.iter_mut()) {
        let before: Vec<Uid> = level
            .layer_instances
            .iter()
            .map(|l| l.layer_def_id)
            .collect();
        level
            .layer_instances
            .sort_by_key(|l| definition_rank(layer_definitions, l.layer_def_id));

        let changed = level
            .layer_instances
            .iter()
            .map(|l| l.layer_def_id)
            .ne(before.iter().copied());
        if changed {
            warn!(level = %level.identifier, "reordered layer instances to match definitions");
            reordered += 1;
        }
    }
    reordered
}

fn definition_rank(layer_definitions: &[LayerDef], uid: Uid) -> i64 {
    layer_definitions
        .iter()
        .position(|d| d.uid == uid)
        .map_or(-1, |index| index as i64)
}

// ─── Levels ──────────────────────────────────────────────────────────────────

fn cleanup_level(level: &mut Level, world_grid: u32, defs: &Definitions, report: &mut CleanupReport) {
    snap_level(level, world_grid, defs.layers, report);

    let level_size = level.size();
    let level_bounds = level.local_bounds();

    for index in (0..level.layer_instances.len()).rev() {
        let layer_def_id = level.layer_instances[index].layer_def_id;
        let Some(layer_def) = defs.layer(layer_def_id) else {
            warn!(
                level = %level.identifier,
                layer_def_id,
                "removing layer instance without definition"
            );
            level.layer_instances.remove(index);
            report.layers_removed += 1;
            continue;
        };

        let layer = &mut level.layer_instances[index];
        cleanup_layer(layer, layer_def, &level.identifier, level_size, level_bounds, defs, report);
    }

    let before = level.field_instances.len();
    level
        .field_instances
        .retain(|f| defs.level_fields.iter().any(|d| d.uid == f.field_def_id));
    let removed = before - level.field_instances.len();
    if removed > 0 {
        warn!(level = %level.identifier, removed, "removed level fields without definition");
        report.field_instances_removed += removed;
    }
}

/// Snap the level's world position and size down to the world grid.
fn snap_level(level: &mut Level, grid: u32, layer_defs: &[LayerDef], report: &mut CleanupReport) {
    let mut snapped = false;

    let world_pos = level.world_pos.snapped(grid);
    if world_pos != level.world_pos {
        warn!(
            level = %level.identifier,
            from = ?level.world_pos,
            to = ?world_pos,
            "snapping level position to world grid"
        );
        level.world_pos = world_pos;
        snapped = true;
    }

    let size = UPoint::new(
        snap_down_u32(level.width, grid),
        snap_down_u32(level.height, grid),
    );
    if size != level.size() {
        warn!(
            level = %level.identifier,
            from = ?level.size(),
            to = ?size,
            "snapping level size to world grid"
        );
        resize_layers(level, layer_defs, size, Point::ZERO);
        snapped = true;
    }

    if snapped {
        report.levels_snapped += 1;
    }
}

// ─── Layers ──────────────────────────────────────────────────────────────────

fn cleanup_layer(
    layer: &mut LayerInstance,
    def: &LayerDef,
    level_name: &str,
    level_size: UPoint,
    level_bounds: Rect,
    defs: &Definitions,
    report: &mut CleanupReport,
) {
    if !layer.entity_instances.is_empty() && def.layer_type != LayerType::Entities {
        warn!(
            level = level_name,
            layer = %def.identifier,
            count = layer.entity_instances.len(),
            "clearing entities on a {:?} layer",
            def.layer_type
        );
        layer.entity_instances.clear();
        report.entity_lists_cleared += 1;
    }

    if !layer.int_grid.is_empty() && def.layer_type != LayerType::IntGrid {
        warn!(
            level = level_name,
            layer = %def.identifier,
            "clearing IntGrid on a {:?} layer",
            def.layer_type
        );
        layer.int_grid.clear();
        report.int_grids_cleared += 1;
    }

    let extent = def.grid_extent(level_size);

    if def.layer_type == LayerType::IntGrid && layer.int_grid.len() != extent.area() {
        warn!(
            level = level_name,
            layer = %def.identifier,
            len = layer.int_grid.len(),
            expected = extent.area(),
            "resampling mis-sized IntGrid"
        );
        let old_grid = if extent.x == 0 {
            UPoint::default()
        } else {
            UPoint::new(extent.x, (layer.int_grid.len() as u32).div_ceil(extent.x))
        };
        resize_layer(old_grid, extent, Point::ZERO, &mut layer.int_grid);
        report.int_grids_resampled += 1;
    }

    let before = layer.auto_layer_tiles.len();
    layer.auto_layer_tiles.retain(|t| {
        t.cell.x >= 0
            && t.cell.y >= 0
            && (t.cell.x as u32) < extent.x
            && (t.cell.y as u32) < extent.y
    });
    let removed = before - layer.auto_layer_tiles.len();
    if removed > 0 {
        warn!(
            level = level_name,
            layer = %def.identifier,
            removed,
            "removed auto tiles outside the level"
        );
        report.auto_tiles_removed += removed;
    }

    cleanup_entities(layer, def, level_name, level_bounds, defs, report);
}

// ─── Entities ────────────────────────────────────────────────────────────────

/// Sweep entities back to front. Of several entities on the same grid cell,
/// the one with the highest index survives.
fn cleanup_entities(
    layer: &mut LayerInstance,
    def: &LayerDef,
    level_name: &str,
    level_bounds: Rect,
    defs: &Definitions,
    report: &mut CleanupReport,
) {
    let mut occupied: HashSet<Point> = HashSet::new();

    for index in (0..layer.entity_instances.len()).rev() {
        let entity = &mut layer.entity_instances[index];
        let entity_def_id = entity.entity_def_id;

        match check_entity(entity, def, level_name, level_bounds, defs, &mut occupied, report) {
            Ok(()) => {}
            Err(reason) => {
                warn!(
                    level = level_name,
                    layer = %def.identifier,
                    entity_def_id,
                    "removing entity instance: {}",
                    reason
                );
                layer.entity_instances.remove(index);
                report.entities_removed += 1;
            }
        }
    }
}

/// Fix one entity in place, or return why it must be removed.
fn check_entity(
    entity: &mut EntityInstance,
    layer_def: &LayerDef,
    level_name: &str,
    level_bounds: Rect,
    defs: &Definitions,
    occupied: &mut HashSet<Point>,
    report: &mut CleanupReport,
) -> Result<(), &'static str> {
    let entity_def = defs
        .entity(entity.entity_def_id)
        .ok_or("no entity definition")?;
    if layer_def.is_excluded(entity_def) {
        return Err("excluded from layer by tags");
    }

    let mut fixed = false;
    if (entity.width, entity.height) != (entity_def.width, entity_def.height) {
        warn!(
            level = level_name,
            entity = %entity_def.identifier,
            "resizing entity to {}x{}",
            entity_def.width,
            entity_def.height
        );
        entity.width = entity_def.width;
        entity.height = entity_def.height;
        fixed = true;
    }
    let position = entity.position.snapped(layer_def.grid_size);
    if position != entity.position {
        warn!(
            level = level_name,
            entity = %entity_def.identifier,
            from = ?entity.position,
            to = ?position,
            "snapping entity to layer grid"
        );
        entity.position = position;
        fixed = true;
    }
    if fixed {
        report.entities_fixed += 1;
    }

    if !level_bounds.contains_rect(&entity.bounds()) {
        return Err("outside level bounds");
    }
    if !occupied.insert(entity.position.to_cell(layer_def.grid_size)) {
        return Err("grid cell already occupied");
    }

    let before = entity.field_instances.len();
    entity
        .field_instances
        .retain(|f| entity_def.field_def(f.field_def_id).is_some());
    let removed = before - entity.field_instances.len();
    if removed > 0 {
        warn!(
            level = level_name,
            entity = %entity_def.identifier,
            removed,
            "removed entity fields without definition"
        );
        report.field_instances_removed += removed;
    }

    Ok(())
}

// ─── Tests ───────────────────────────────────────────────────────────────────
