use super::clauses::ClauseSet;
use super::encoder::Encoder;
use super::propagate::Propagator;
use super::report::ConflictReport;
use super::transaction::Transaction;
use super::variables::{VarId, VariableStore};
use crate::error::SolveError;
use crate::request::{JobKind, Request};
use crate::universe::Universe;

/// The encoded satisfiability problem of one solve: the variable and
/// clause stores.
///
/// Produced by [`Solver::encode`], consumed either by the internal
/// search or by the DIMACS side path (export the problem, run an
/// external solver, [apply the model](SatProblem::apply_model) and
/// [project](SatProblem::project) the result).
#[derive(Debug)]
pub struct SatProblem {
    pub(crate) vars: VariableStore,
    pub(crate) clauses: ClauseSet,
}

impl SatProblem {
    /// Number of variables
    pub fn num_vars(&self) -> usize {
        self.vars.len()
    }

    /// Number of clauses
    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }
}

/// Counters reported by a finished search.
#[derive(Debug, Default, Clone, Copy)]
pub struct SolverStats {
    /// Guesses applied, counting inversions
    pub decisions: u64,
}

/// One entry of the decision stack.
#[derive(Debug)]
struct DecisionFrame {
    var: VarId,
    guess: bool,
    /// Each frame supports one inversion before backtracking past it
    inverted: bool,
    /// Variables forced as a consequence of this decision, in order;
    /// the decision variable itself is the first entry
    log: Vec<VarId>,
}

/// DPLL driver over a borrowed universe.
///
/// The universe must outlive the solver; all candidate data is
/// borrowed, never copied into the problem.
pub struct Solver<'a> {
    universe: &'a Universe,
}

impl<'a> Solver<'a> {
    pub fn new(universe: &'a Universe) -> Self {
        Self { universe }
    }

    /// Encode the universe and request into CNF without solving.
    pub fn encode(&self, request: &Request) -> SatProblem {
        let (vars, clauses) = Encoder::new(self.universe).encode(request);
        SatProblem { vars, clauses }
    }

    /// Decide the request and project the model into a transaction.
    pub fn solve(&self, request: &Request) -> Result<Transaction, SolveError> {
        let mut problem = self.encode(request);
        let stats = self.search(&mut problem, request.job())?;
        log::debug!("model found after {} decisions", stats.decisions);
        problem.project(self.universe, request)
    }

    /// Run propagation and the decision loop until every variable is
    /// resolved or the problem turns out unsatisfiable.
    pub(crate) fn search(
        &self,
        problem: &mut SatProblem,
        job: JobKind,
    ) -> Result<SolverStats, SolveError> {
        let mut stats = SolverStats::default();

        let mut prop = Propagator::new(self.universe, &mut problem.vars, &mut problem.clauses);
        prop.propagate_pure();
        if let Err(conflict) = prop.propagate(None) {
            let report = ConflictReport::from_clause(
                problem.clauses.get(conflict),
                &problem.vars,
                self.universe,
            );
            return Err(SolveError::TopLevelConflict(report));
        }

        let mut stack: Vec<DecisionFrame> = Vec::new();
        loop {
            let Some(var) = problem.vars.first_unresolved() else {
                return Ok(stats);
            };
            let guess = self.initial_guess(&problem.vars, var, job);
            stack.push(DecisionFrame {
                var,
                guess,
                inverted: false,
                log: Vec::new(),
            });

            // apply the frame on top of the stack, backtracking on
            // conflict until propagation goes through
            while let Some(frame) = stack.last_mut() {
                stats.decisions += 1;
                let lit = if frame.guess { frame.var } else { -frame.var };

                let mut prop =
                    Propagator::new(self.universe, &mut problem.vars, &mut problem.clauses);
                let mut log = Some(&mut frame.log);
                prop.force(lit, &mut log);
                if prop.propagate(log).is_ok() {
                    break;
                }

                // undo the failed frame; invert it once, otherwise pop
                // and retry the previous frame
                loop {
                    let Some(top) = stack.last_mut() else {
                        return Err(SolveError::Unsatisfiable {
                            decisions: stats.decisions,
                        });
                    };
                    let mut prop =
                        Propagator::new(self.universe, &mut problem.vars, &mut problem.clauses);
                    prop.undo(&top.log);
                    top.log.clear();
                    if !top.inverted {
                        top.inverted = true;
                        top.guess = !top.guess;
                        break;
                    }
                    stack.pop();
                }
            }
        }
    }

    /// Initial polarity for a fresh decision variable.
    ///
    /// Chosen to minimise churn: outside upgrades, keep what is
    /// installed and ignore what is not. Under an upgrade job the
    /// roles invert for multi-member chains (the installed member is
    /// guessed out, its replacement in) while singleton chains keep
    /// their state; a lone remote with nothing to replace stays out.
    fn initial_guess(&self, vars: &VariableStore, var: VarId, job: JobKind) -> bool {
        let v = vars.var(var);
        let installed = self
            .universe
            .candidate(v.candidate())
            .map(|c| c.origin.is_installed())
            .unwrap_or(false);
        match job {
            JobKind::Upgrade => {
                if installed {
                    !v.in_multi_chain()
                } else {
                    v.in_multi_chain()
                }
            }
            _ => installed,
        }
    }
}
