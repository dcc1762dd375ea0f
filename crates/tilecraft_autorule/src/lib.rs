//! IntGrid auto-tile rule engine for tilecraft.
//!
//! The primary entry point is [`apply_rules`], which rebuilds a
//! [`LayerInstance`](tilecraft_core::LayerInstance)'s auto-layer tiles from
//! its IntGrid using a caller-supplied random number generator.
//! [`apply_level_rules`] and [`apply_project_rules`] run it across a level or
//! a whole [`Project`](tilecraft_core::Project).
//!
//! Rule data types live in `tilecraft_core`, since layer definitions own
//! them. This crate only evaluates them.

mod apply;
mod project;

pub use apply::{
    apply_rules, evaluate_rules, ordered_rules, rule_matches, ApplyOutcome, Placement, RuleRef,
};
pub use project::{apply_layer_rules, apply_level_rules, apply_project_rules, RulePassSummary};
