//! Validation and self-healing cleanup for tilecraft projects
//!
//! [`cleanup_project`] sweeps every world, level, layer and entity of a
//! [`Project`](tilecraft_core::Project) and repairs what it finds: dangling
//! definition references, entities outside their level, geometry off the
//! grid, and so on. Every fix is logged as a warning and counted in the
//! returned [`CleanupReport`]. The pass never fails.
//!
//! # Example
//!
//! ```rust,ignore
//! use tilecraft_cleanup::cleanup_project;
//! use tilecraft_core::Project;
//!
//! let mut project = Project::load(path)?;
//! let report = cleanup_project(&mut project);
//! if !report.is_clean() {
//!     println!("fixed {} problems", report.total());
//! }
//! ```

mod cleanup;
mod report;

pub use cleanup::{cleanup_project, sort_level_instances};
pub use report::CleanupReport;
