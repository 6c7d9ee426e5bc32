pub mod constraints;
pub mod naming;
pub mod partition;
pub mod roster;
pub mod shuffle;
pub mod spinner;

pub use crate::domain::model::{Constraint, ConstraintKind, Group, SplitSpec};
pub use crate::domain::ports::{ListStore, Namer, RandomSource, TextService};
pub use crate::utils::error::Result;
