//! Plan resolution for Mason.
//!
//! Evaluates a build description against a platform profile in a single
//! synchronous pass: overlay settings, substitute `$(NAME)` placeholders,
//! expand source locations into compile units, and assemble the resolved
//! plan an external build engine consumes.

pub mod collect;
pub mod error;
pub mod pipeline;
pub mod plan;
pub mod report;

pub use collect::{collect_sources, path_matches, SOURCE_EXTENSIONS};
pub use error::PlanError;
pub use pipeline::{resolve, PlanConfig, PlanOutput};
pub use plan::{ResolvedLibrary, ResolvedPlan};
pub use report::PlanReport;
