//! SAT-based decision core for package transactions.
//!
//! Translates a package universe plus explicit requests into CNF,
//! decides it with unit propagation and a DPLL-style search, and maps
//! the model back to install/upgrade/delete actions.
//!
//! # Architecture
//!
//! - [`VariableStore`]: one boolean variable per candidate, chained by
//!   UID; dense 1-based array whose indexes double as DIMACS orders
//! - [`ClauseSet`]: CNF clauses over signed literals, with per-kind
//!   statistics; every variable keeps back-pointers to its clauses
//! - [`Encoder`]: universe + request → clauses (dependencies,
//!   conflicts, shared library requirements, requests, version
//!   exclusion)
//! - [`Propagator`]: unit propagation and conflict detection over the
//!   current assignment
//! - [`Solver`]: decision stack with an initial-guess heuristic and
//!   backtracking; one inversion per decision before giving up on it
//! - [`Transaction`]: the projected action list handed downstream
//!
//! The stores of one [`SatProblem`] live for the duration of one solve
//! and are torn down together. Clause conflicts found before any guess
//! surface as a [`ConflictReport`].

mod clauses;
mod encoder;
mod propagate;
mod report;
mod search;
mod transaction;
mod variables;


pub use clauses::{
    lit_satisfied, lit_var, Clause, ClauseId, ClauseKind, ClauseSet, ClauseStats, Literal,
};
pub use encoder::Encoder;
pub use propagate::Propagator;
pub use report::ConflictReport;
pub use search::{SatProblem, Solver, SolverStats};
pub use transaction::{Operation, Transaction};
pub use variables::{ChainIter, VarId, Variable, VariableStore};
