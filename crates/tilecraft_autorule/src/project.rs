//! Running the rule engine over a [`Project`]'s levels.

use rand::Rng;
use tilecraft_core::{LayerDef, Level, Project, ProjectError, TileSetDef, Uid};

use crate::{apply_rules, ApplyOutcome};

/// Totals for a multi-layer rule pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RulePassSummary {
    pub layers_applied: usize,
    pub layers_skipped: usize,
    pub tiles_placed: usize,
}

impl RulePassSummary {
    fn record(&mut self, outcome: ApplyOutcome) {
        match outcome {
            ApplyOutcome::Applied { placed } => {
                self.layers_applied += 1;
                self.tiles_placed += placed;
            }
            ApplyOutcome::SkippedNoTileset => self.layers_skipped += 1,
        }
    }

    fn merge(&mut self, other: RulePassSummary) {
        self.layers_applied += other.layers_applied;
        self.layers_skipped += other.layers_skipped;
        self.tiles_placed += other.tiles_placed;
    }
}

/// Apply the rules of one layer of one level.
pub fn apply_layer_rules(
    project: &mut Project,
    world_index: usize,
    level_uid: Uid,
    layer_def_id: Uid,
    rng: &mut impl Rng,
) -> Result<ApplyOutcome, ProjectError> {
    let Project {
        layer_definitions,
        tile_set_definitions,
        worlds,
        ..
    } = project;

    let layer_def = layer_definitions
        .iter()
        .find(|d| d.uid == layer_def_id)
        .ok_or(ProjectError::UnknownLayerDef(layer_def_id))?;
    let level = worlds
        .get_mut(world_index)
        .ok_or(ProjectError::UnknownWorld(world_index))?
        .level_mut(level_uid)
        .ok_or(ProjectError::UnknownLevel(level_uid))?;

    let level_size = level.size();
    let layer = level
        .layer_instance_mut(layer_def_id)
        .ok_or(ProjectError::UnknownLayerDef(layer_def_id))?;

    Ok(apply_rules(layer, layer_def, level_size, tile_set_definitions, rng))
}

/// Apply the rules of every layer with rule groups in one level.
pub fn apply_level_rules(
    project: &mut Project,
    world_index: usize,
    level_uid: Uid,
    rng: &mut impl Rng,
) -> Result<RulePassSummary, ProjectError> {
    let Project {
        layer_definitions,
        tile_set_definitions,
        worlds,
        ..
    } = project;

    let level = worlds
        .get_mut(world_index)
        .ok_or(ProjectError::UnknownWorld(world_index))?
        .level_mut(level_uid)
        .ok_or(ProjectError::UnknownLevel(level_uid))?;

    Ok(run_level(level, layer_definitions, tile_set_definitions, rng))
}

/// Apply the rules of every layer of every level.
pub fn apply_project_rules(project: &mut Project, rng: &mut impl Rng) -> RulePassSummary {
    let Project {
        layer_definitions,
        tile_set_definitions,
        worlds,
        ..
    } = project;

    let mut summary = RulePassSummary::default();
    for level in worlds.iter_mut().flat_map(|w| w.levels.iter_mut()) {
        summary.merge(run_level(level, layer_definitions, tile_set_definitions, rng));
    }
    summary
}

fn run_level(
    level: &mut Level,
    layer_definitions: &[LayerDef],
    tilesets: &[TileSetDef],
    rng: &mut impl Rng,
) -> RulePassSummary {
    let level_size = level.size();
    let mut summary = RulePassSummary::default();

    for layer in &mut level.layer_instances {
        let Some(def) = layer_definitions.iter().find(|d| d.uid == layer.layer_def_id) else {
            continue;
        };
        if def.auto_rule_groups.is_empty() {
            continue;
        }
        summary.record(apply_rules(layer, def, level_size, tilesets, rng));
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use tilecraft_core::{AutoRule, AutoRuleGroup, LayerType};

    fn project() -> (Project, Uid) {
        let mut project = Project::new("World");
        project.add_tileset_def(TileSetDef::new(100, "Cavern", "cavern.png", 16));

        let mut ground = LayerDef::new(1, "Ground", LayerType::IntGrid, 16);
        ground.tile_set_def_id = Some(100);
        ground.auto_rule_groups.push(
            AutoRuleGroup::new(10, "Walls")
                .with_rule(AutoRule::new(11, 1).with_pattern(vec![1]).with_tile(3)),
        );
        project.add_layer_def(ground);

        let mut unlinked = LayerDef::new(2, "Water", LayerType::IntGrid, 16);
        unlinked.auto_rule_groups.push(
            AutoRuleGroup::new(20, "Water")
                .with_rule(AutoRule::new(21, 1).with_pattern(vec![1]).with_tile(4)),
        );
        project.add_layer_def(unlinked);
        project.add_layer_def(LayerDef::new(3, "Entities", LayerType::Entities, 16));
        project.next_uid = 200;

        let level = project.add_level(0, "Level_0", 32, 32).unwrap();
        let level_ref = project.level_mut(0, level).unwrap();
        for layer in &mut level_ref.layer_instances {
            if !layer.int_grid.is_empty() {
                layer.int_grid[3] = 1;
            }
        }
        (project, level)
    }

    #[test]
    fn apply_layer_rules_writes_tiles() {
        let (mut project, level) = project();
        let mut rng = SmallRng::seed_from_u64(0);

        let outcome = apply_layer_rules(&mut project, 0, level, 1, &mut rng).unwrap();

        assert_eq!(outcome, ApplyOutcome::Applied { placed: 1 });
        let layer = project.level(0, level).unwrap().layer_instance(1).unwrap();
        assert_eq!(layer.auto_layer_tiles[0].cell.x, 1);
        assert_eq!(layer.auto_layer_tiles[0].cell.y, 1);
    }

    #[test]
    fn apply_layer_rules_unknown_references() {
        let (mut project, level) = project();
        let mut rng = SmallRng::seed_from_u64(0);

        assert!(matches!(
            apply_layer_rules(&mut project, 0, level, 9, &mut rng),
            Err(ProjectError::UnknownLayerDef(9))
        ));
        assert!(matches!(
            apply_layer_rules(&mut project, 0, 999, 1, &mut rng),
            Err(ProjectError::UnknownLevel(999))
        ));
    }

    #[test]
    fn project_pass_counts_skipped_layers() {
        let (mut project, _) = project();
        project.add_level(0, "Level_1", 16, 16).unwrap();
        let mut rng = SmallRng::seed_from_u64(0);

        let summary = apply_project_rules(&mut project, &mut rng);

        assert_eq!(
            summary,
            RulePassSummary {
                layers_applied: 2,
                layers_skipped: 2,
                tiles_placed: 1,
            }
        );
    }

    #[test]
    fn level_pass_only_touches_rule_layers() {
        let (mut project, level) = project();
        let mut rng = SmallRng::seed_from_u64(0);

        let summary = apply_level_rules(&mut project, 0, level, &mut rng).unwrap();

        assert_eq!(summary.layers_applied, 1);
        assert_eq!(summary.layers_skipped, 1);
        let water = project.level(0, level).unwrap().layer_instance(2).unwrap();
        assert!(water.auto_layer_tiles.is_empty());
    }
}
