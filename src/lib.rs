pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::SpinnerConfig;

pub use adapters::ai::{CachedTextService, HttpTextService};
pub use adapters::storage::{FileListStore, MemoryListStore};
pub use core::naming::{GroupNamer, GroupTheme};
pub use core::partition::{partition, PartitionOptions};
pub use core::spinner::{GroupSpinner, SpinOutcome, SpinSettings};
pub use domain::model::{Constraint, ConstraintKind, Group, SavedList, SplitSpec};
pub use utils::error::{Result, SpinnerError};
