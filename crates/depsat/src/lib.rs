//! depsat: the decision core of a package manager.
//!
//! Given a universe of candidate package versions (installed and
//! remote) and a set of explicit requests, depsat decides which
//! packages are present after the transaction: every dependency
//! satisfied, no conflict violated, every request honoured, at most
//! one version per package identity.
//!
//! The decision procedure encodes the universe as CNF and runs a
//! small DPLL-style SAT solver over it; the [`dimacs`] module exports
//! the same problem so an external solver can stand in for the
//! internal one.
//!
//! # Example
//!
//! ```
//! use depsat::{Candidate, JobKind, Request, Solver, Universe};
//!
//! let mut universe = Universe::new();
//! let app = universe.add_candidate(Candidate::remote("app", "d1").depends_on("lib"));
//! let _lib = universe.add_candidate(Candidate::remote("lib", "d2"));
//!
//! let mut request = Request::new(JobKind::Install);
//! request.add_install(app);
//!
//! let transaction = Solver::new(&universe).solve(&request).unwrap();
//! assert_eq!(transaction.installs().count(), 2);
//! ```

mod candidate;
mod error;
mod request;
mod universe;

pub mod dimacs;
pub mod solver;

pub use candidate::{Candidate, CandidateId, Conflict, ConflictKind, Origin};
pub use dimacs::ModelParseError;
pub use error::SolveError;
pub use request::{JobKind, Request};
pub use solver::{
    ConflictReport, Operation, SatProblem, Solver, SolverStats, Transaction,
};
pub use universe::Universe;
