use super::clauses::{lit_var, ClauseId, ClauseSet, Literal};
use super::variables::{VarId, VariableStore};
use crate::universe::Universe;

/// Unit propagation over the variable and clause stores.
///
/// Maintains two invariants until it returns: no clause is
/// conflicting and no clause is unit. Works by repeated full passes
/// over the variable array; for each variable its clause list is
/// walked first for fully resolved conflicts, then for units. Forcing
/// a variable can turn other clauses of the same variable into units,
/// so the scan restarts at the current variable after one.
pub struct Propagator<'a> {
    universe: &'a Universe,
    vars: &'a mut VariableStore,
    clauses: &'a mut ClauseSet,
}

impl<'a> Propagator<'a> {
    pub fn new(
        universe: &'a Universe,
        vars: &'a mut VariableStore,
        clauses: &'a mut ClauseSet,
    ) -> Self {
        Self {
            universe,
            vars,
            clauses,
        }
    }

    /// Fix the boundary condition before any search.
    ///
    /// Variables no clause mentions keep their origin state (installed
    /// stays, remote stays out); unary clauses force their sole
    /// literal. Neither records an implication, both are permanent for
    /// the lifetime of the problem.
    pub fn propagate_pure(&mut self) {
        for id in 1..=self.vars.len() as VarId {
            let var = self.vars.var(id);
            if var.is_resolved() || !var.rules().is_empty() {
                continue;
            }
            let installed = self
                .universe
                .candidate(var.candidate())
                .map(|c| c.origin.is_installed())
                .unwrap_or(false);
            self.vars.var_mut(id).set(installed);
        }

        for id in 0..self.clauses.len() as ClauseId {
            let clause = self.clauses.get(id);
            if !clause.is_unary() {
                continue;
            }
            let lit = clause.literals()[0];
            if self.vars.var(lit_var(lit)).is_resolved() {
                // an opposing unary shows up as a conflict in the next
                // propagate call
                continue;
            }
            self.force(lit, &mut None);
        }
    }

    /// Run unit propagation to quiescence.
    ///
    /// Forced variables are appended to `log` when one is given.
    /// Returns the conflicting clause on failure.
    pub fn propagate(&mut self, mut log: Option<&mut Vec<VarId>>) -> Result<(), ClauseId> {
        loop {
            let mut forced_in_pass = false;
            let mut id: VarId = 1;
            while id <= self.vars.len() as VarId {
                if let Some(conflict) = self.conflicting_clause(id) {
                    return Err(conflict);
                }
                if let Some(lit) = self.unit_literal(id) {
                    self.force(lit, &mut log);
                    forced_in_pass = true;
                    // rescan this variable's clauses before moving on
                    continue;
                }
                id += 1;
            }
            if !forced_in_pass {
                return Ok(());
            }
        }
    }

    fn conflicting_clause(&self, id: VarId) -> Option<ClauseId> {
        let vars = &*self.vars;
        vars.var(id)
            .rules()
            .iter()
            .copied()
            .find(|&clause| self.clauses.get(clause).is_conflicting(vars))
    }

    fn unit_literal(&self, id: VarId) -> Option<Literal> {
        let vars = &*self.vars;
        vars.var(id)
            .rules()
            .iter()
            .find_map(|&clause| self.clauses.get(clause).unit_literal(vars))
    }

    /// Fix a variable to the value a literal wants and recount every
    /// clause mentioning it.
    pub(crate) fn force(&mut self, lit: Literal, log: &mut Option<&mut Vec<VarId>>) {
        let id = lit_var(lit);
        self.vars.var_mut(id).set(lit > 0);

        let vars = &*self.vars;
        let clauses = &mut *self.clauses;
        for &clause in vars.var(id).rules() {
            clauses.get_mut(clause).note_resolved();
        }

        if let Some(log) = log.as_mut() {
            log.push(id);
        }
    }

    /// Undo an implication log: every listed variable becomes
    /// unresolved again and the clause counters are rolled back.
    pub(crate) fn undo(&mut self, log: &[VarId]) {
        for &id in log.iter().rev() {
            self.vars.var_mut(id).clear();

            let vars = &*self.vars;
            let clauses = &mut *self.clauses;
            for &clause in vars.var(id).rules() {
                clauses.get_mut(clause).note_unresolved();
            }
        }
    }
}
