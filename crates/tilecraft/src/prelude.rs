pub use crate::{EngineSettings, Session, SessionError};
pub use tilecraft_autorule::{apply_rules, ApplyOutcome, RulePassSummary};
pub use tilecraft_cleanup::{cleanup_project, CleanupReport};
pub use tilecraft_core::{
    AutoLayerTile, AutoRule, AutoRuleGroup, EntityDefinition, EntityInstance, LayerDef,
    LayerInstance, LayerType, Level, Point, Project, TileSetDef, Uid, UPoint, World,
    ANYTHING_TILE_ID, NOTHING_TILE_ID,
};
