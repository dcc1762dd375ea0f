//! The rule engine: evaluates a layer's auto rules against its IntGrid.
//!
//! The entry point is [`apply_rules`]. [`evaluate_rules`] runs the same pass
//! without touching the layer, and [`rule_matches`] tests a single cell.

use std::collections::HashSet;

use rand::Rng;
use tilecraft_core::{
    AutoLayerTile, AutoRule, LayerDef, LayerInstance, Point, TileSetDef, Uid, UPoint,
    ANYTHING_TILE_ID, NOTHING_TILE_ID,
};
use tracing::debug;

// ─── Rule order ──────────────────────────────────────────────────────────────

/// Position of a rule inside a [`LayerDef`]'s rule groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuleRef {
    pub group_index: usize,
    pub rule_index: usize,
}

/// Active rules of active groups, in evaluation order: group order, then
/// rule order within the group.
///
/// Earlier entries win when several rules could claim the same cell.
pub fn ordered_rules(layer_def: &LayerDef) -> Vec<RuleRef> {
    layer_def
        .auto_rule_groups
        .iter()
        .enumerate()
        .filter(|(_, group)| group.is_active)
        .flat_map(|(group_index, group)| {
            group
                .rules
                .iter()
                .enumerate()
                .filter(|(_, rule)| rule.is_active)
                .map(move |(rule_index, _)| RuleRef {
                    group_index,
                    rule_index,
                })
        })
        .collect()
}

// ─── Public entry points ─────────────────────────────────────────────────────

/// A tile placement together with the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    pub group_uid: Uid,
    pub rule_uid: Uid,
    pub x: u32,
    pub y: u32,
    pub tile_id: u32,
}

impl Placement {
    pub fn to_tile(&self) -> AutoLayerTile {
        AutoLayerTile {
            tile_id: self.tile_id,
            cell: Point::new(self.x as i32, self.y as i32),
        }
    }
}

/// Result of an [`apply_rules`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The layer's auto tiles were rebuilt with this many placements.
    Applied { placed: usize },
    /// The layer has no resolvable tileset; nothing was changed.
    SkippedNoTileset,
}

/// Rebuild `layer.auto_layer_tiles` from its IntGrid and `layer_def`'s rules.
///
/// `level_size` is the owning level's size in pixels. A layer whose tileset
/// is unset or missing from `tilesets` is left untouched. `rng` drives rules
/// with `chance < 1`; pass a seeded generator for reproducible results.
pub fn apply_rules(
    layer: &mut LayerInstance,
    layer_def: &LayerDef,
    level_size: UPoint,
    tilesets: &[TileSetDef],
    rng: &mut impl Rng,
) -> ApplyOutcome {
    let tileset = layer_def
        .tile_set_def_id
        .and_then(|uid| tilesets.iter().find(|t| t.uid == uid));
    if tileset.is_none() {
        debug!(layer = %layer_def.identifier, "no tileset, skipping auto rules");
        return ApplyOutcome::SkippedNoTileset;
    }

    let placements = evaluate_rules(&layer.int_grid, layer_def, level_size, rng);

    layer.auto_layer_tiles.clear();
    layer
        .auto_layer_tiles
        .extend(placements.iter().map(Placement::to_tile));

    debug!(
        layer = %layer_def.identifier,
        placed = placements.len(),
        "applied auto rules"
    );
    ApplyOutcome::Applied {
        placed: placements.len(),
    }
}

/// Run the rule pass over `int_grid` and return every placement, in the
/// order they were claimed.
///
/// Each cell is claimed by at most one rule across all groups.
pub fn evaluate_rules(
    int_grid: &[i32],
    layer_def: &LayerDef,
    level_size: UPoint,
    rng: &mut impl Rng,
) -> Vec<Placement> {
    let extent = layer_def.grid_extent(level_size);
    let mut matched: HashSet<(u32, u32)> = HashSet::new();
    let mut placements = Vec::new();

    for rule_ref in ordered_rules(layer_def) {
        let group = &layer_def.auto_rule_groups[rule_ref.group_index];
        let rule = &group.rules[rule_ref.rule_index];
        if !rule.is_complete() {
            continue;
        }
        let pattern = rule.normalized_pattern();

        for y in 0..extent.y {
            for x in 0..extent.x {
                if matched.contains(&(x, y)) {
                    continue;
                }
                if !passes_gate(rule, rng) {
                    continue;
                }
                if !pattern_matches(rule.size, &pattern, int_grid, extent, x, y) {
                    continue;
                }

                // `passes_gate` rejects rules without tiles.
                let tile_id = rule.tile_ids[0];
                placements.push(Placement {
                    group_uid: group.uid,
                    rule_uid: rule.uid,
                    x,
                    y,
                    tile_id,
                });
                matched.insert((x, y));
            }
        }
    }

    placements
}

/// Whether `rule` matches cell `(x, y)` of an IntGrid `extent` cells large.
///
/// Rules without tiles, with `chance <= 0` or with a size outside
/// [`RULE_SIZES`](tilecraft_core::RULE_SIZES) never match. Rules with
/// `chance < 1` draw once from `rng` per call.
pub fn rule_matches(
    rule: &AutoRule,
    int_grid: &[i32],
    extent: UPoint,
    x: u32,
    y: u32,
    rng: &mut impl Rng,
) -> bool {
    passes_gate(rule, rng)
        && pattern_matches(rule.size, &rule.normalized_pattern(), int_grid, extent, x, y)
}

// ─── Matching ────────────────────────────────────────────────────────────────

/// Completeness and probability gate, evaluated before the pattern.
fn passes_gate(rule: &AutoRule, rng: &mut impl Rng) -> bool {
    if !rule.is_complete() {
        return false;
    }
    if rule.chance < 1.0 {
        let draw: f32 = rng.gen();
        if draw >= rule.chance {
            return false;
        }
    }
    true
}

/// Test every non-don't-care pattern entry around `(x, y)`.
///
/// A constrained neighbor outside the grid fails the match.
fn pattern_matches(size: u32, pattern: &[i32], int_grid: &[i32], extent: UPoint, x: u32, y: u32) -> bool {
    let radius = (size / 2) as i64;

    for py in 0..size {
        for px in 0..size {
            let pattern_value = pattern[(py * size + px) as usize];
            if pattern_value == 0 {
                continue;
            }

            let gx = x as i64 + px as i64 - radius;
            let gy = y as i64 + py as i64 - radius;
            if gx < 0 || gy < 0 || gx >= extent.x as i64 || gy >= extent.y as i64 {
                return false;
            }
            let grid_id = gy * extent.x as i64 + gx;
            let Some(&value) = int_grid.get(grid_id as usize) else {
                return false;
            };

            if !cell_passes(pattern_value, value) {
                return false;
            }
        }
    }
    true
}

/// Test one non-zero pattern entry against one IntGrid value.
fn cell_passes(pattern_value: i32, value: i32) -> bool {
    match pattern_value {
        ANYTHING_TILE_ID => value != 0,
        NOTHING_TILE_ID => value == 0,
        required if required > 0 => value == required,
        forbidden => i64::from(value) != -i64::from(forbidden),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
