//! Editing session: a project plus the settings and RNG used to edit it

use std::path::Path;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use thiserror::Error;
use tilecraft_autorule::{
    apply_layer_rules, apply_level_rules, apply_project_rules, ApplyOutcome, RulePassSummary,
};
use tilecraft_cleanup::{cleanup_project, CleanupReport};
use tilecraft_core::{Point, Project, ProjectError, Uid, UPoint};
use tracing::info;

use crate::{EngineSettings, SettingsError};

/// Errors surfaced to the editor shell
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Project(#[from] ProjectError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// The object an editor shell drives in response to user gestures.
pub struct Session {
    project: Project,
    settings: EngineSettings,
    rng: SmallRng,
}

impl Session {
    pub fn new(project: Project, settings: EngineSettings) -> Self {
        let rng = settings.rules.rng();
        Self {
            project,
            settings,
            rng,
        }
    }

    /// Start a session on a new project with one empty world
    pub fn new_project(world_identifier: &str, settings: EngineSettings) -> Self {
        let mut project = Project::new(world_identifier);
        for world in &mut project.worlds {
            world.default_grid_size = settings.world.default_grid_size;
        }
        Self::new(project, settings)
    }

    /// Open a project file
    pub fn open(path: &Path, settings: EngineSettings) -> Result<Self, SessionError> {
        let project = Project::load(path)?;
        Ok(Self::new(project, settings))
    }

    /// Open a project file, reading settings from `settings_path` when it exists
    pub fn open_with_settings(project_path: &Path, settings_path: &Path) -> Result<Self, SessionError> {
        let settings = EngineSettings::load_or_default(settings_path)?;
        Self::open(project_path, settings)
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn project_mut(&mut self) -> &mut Project {
        &mut self.project
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn into_project(self) -> Project {
        self.project
    }

    /// Restart the rule RNG from `seed`
    pub fn reseed(&mut self, seed: u64) {
        self.rng = SmallRng::seed_from_u64(seed);
    }

    /// "Apply rules" on a single layer
    pub fn apply_rules(&mut self, world_index: usize, level_uid: Uid, layer_def_id: Uid) -> Result<ApplyOutcome, SessionError> {
        Ok(apply_layer_rules(
            &mut self.project,
            world_index,
            level_uid,
            layer_def_id,
            &mut self.rng,
        )?)
    }

    /// Re-run every rule layer of one level
    pub fn apply_level_rules(&mut self, world_index: usize, level_uid: Uid) -> Result<RulePassSummary, SessionError> {
        Ok(apply_level_rules(
            &mut self.project,
            world_index,
            level_uid,
            &mut self.rng,
        )?)
    }

    /// Re-run every rule layer of every level
    pub fn apply_all_rules(&mut self) -> RulePassSummary {
        let summary = apply_project_rules(&mut self.project, &mut self.rng);
        info!(
            layers = summary.layers_applied,
            skipped = summary.layers_skipped,
            tiles = summary.tiles_placed,
            "applied auto rules"
        );
        summary
    }

    /// Resize a level; `move_delta` is in cells
    pub fn resize_level(
        &mut self,
        world_index: usize,
        level_uid: Uid,
        new_size: UPoint,
        move_delta: Point,
    ) -> Result<(), SessionError> {
        Ok(self
            .project
            .resize_level(world_index, level_uid, new_size, move_delta)?)
    }

    /// Run the cleanup pass
    pub fn cleanup(&mut self) -> CleanupReport {
        let report = cleanup_project(&mut self.project);
        info!("cleanup: {}", report);
        report
    }

    /// Save the project, running cleanup first when configured.
    ///
    /// Returns the cleanup report, if cleanup ran.
    pub fn save(&mut self, path: &Path) -> Result<Option<CleanupReport>, SessionError> {
        let report = if self.settings.cleanup.run_before_save {
            Some(self.cleanup())
        } else {
            None
        };
        self.project.save(path)?;
        Ok(report)
    }
}
