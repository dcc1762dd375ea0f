//! tilecraft - headless level-design core
//!
//! Bundles the tilecraft crates behind one dependency:
//! - [`model`] - data model, JSON persistence and level resize
//! - [`autorule`] - the IntGrid auto-tile rule engine
//! - [`cleanup`] - the self-healing validation pass
//!
//! [`Session`] ties them together for an editor shell: it owns a
//! [`Project`](tilecraft_core::Project), the [`EngineSettings`] and the
//! random generator used by probabilistic rules.
//!
//! # Example
//!
//! ```rust,ignore
//! use tilecraft::prelude::*;
//!
//! let settings = EngineSettings::load(Path::new("tilecraft.toml"))?;
//! let mut session = Session::open(Path::new("world.json"), settings)?;
//! session.apply_all_rules();
//! session.save(Path::new("world.json"))?;
//! ```

pub mod prelude;
mod session;
mod settings;

pub use session::{Session, SessionError};
pub use settings::{CleanupSettings, EngineSettings, RuleSettings, SettingsError, WorldSettings};

pub use tilecraft_autorule as autorule;
pub use tilecraft_cleanup as cleanup;
pub use tilecraft_core as model;
