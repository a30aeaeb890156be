use thiserror::Error;

use crate::dimacs::ModelParseError;
use crate::solver::ConflictReport;

/// Terminal failures of one solve attempt.
///
/// Nothing is retried internally; partial results are discarded.
#[derive(Debug, Error)]
pub enum SolveError {
    /// Propagation found a conflict before any guess was made
    #[error("unresolvable conflict: {0}")]
    TopLevelConflict(ConflictReport),

    /// The decision stack emptied without finding a model
    #[error("no solution found after {decisions} decisions")]
    Unsatisfiable { decisions: u64 },

    /// A chain resolved to more than one version to install
    #[error("chain {uid} resolved to more than one version to install")]
    ChainInconsistent { uid: String },

    /// The model left a variable of this chain unresolved
    #[error("no value for {uid} in the model")]
    UnresolvedVariable { uid: String },

    /// The external solver's output could not be used
    #[error(transparent)]
    Model(#[from] ModelParseError),
}
