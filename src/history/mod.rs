//! 编辑历史：变更分类、复合编辑合并、撤销 / 重做

pub mod classifier;
pub mod compound;
pub mod engine;
pub mod error;
pub mod mutation;

pub use classifier::{Ambient, ClassifiedMutation, CorrelationToken, EditClassifier, EditTag};
pub use compound::{should_merge, CompoundEdit, CompoundState};
pub use engine::{ReplayOutcome, UndoEngine, DEFAULT_UNDO_LIMIT};
pub use error::{HistoryError, Result};
pub use mutation::{Mutation, MutationId, MutationKind};
