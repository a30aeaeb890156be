use indexmap::IndexSet;

use super::clauses::{lit_var, Clause, ClauseKind, ClauseSet, Literal};
use super::variables::{VarId, VariableStore};
use crate::candidate::{Candidate, ConflictKind};
use crate::request::Request;
use crate::universe::Universe;

/// Translates a universe plus one request into variables and clauses.
///
/// Emitted clause forms, per candidate `A`:
/// - dependency: `¬A ∨ B₁ ∨ … ∨ Bₖ` over the dependency's chain
/// - conflict: `¬A ∨ ¬B` for each chain member retained by the kind
///   filter
/// - shared library: `¬A ∨ P₁ ∨ … ∨ Pₘ` over all provider chain
///   members, remote candidates only
/// - request: unary `A` or `¬A` for explicitly requested candidates
/// - version exclusion: `¬X ∨ ¬Y` for every pair of one chain,
///   emitted once per UID from the head
///
/// A dependency or shared library whose target is not in the universe
/// is a soft failure: the clause is dropped with a warning and solving
/// continues.
pub struct Encoder<'a> {
    universe: &'a Universe,
    vars: VariableStore,
    clauses: ClauseSet,
}

impl<'a> Encoder<'a> {
    /// Create an encoder with a fresh variable store for the universe
    pub fn new(universe: &'a Universe) -> Self {
        Self {
            universe,
            vars: VariableStore::from_universe(universe),
            clauses: ClauseSet::new(),
        }
    }

    /// Emit every clause for the request and hand back the stores.
    pub fn encode(mut self, request: &Request) -> (VariableStore, ClauseSet) {
        let universe = self.universe;

        for id in 1..=self.vars.len() as VarId {
            let candidate = self.vars.var(id).candidate();
            let Some(c) = universe.candidate(candidate) else {
                continue;
            };
            self.encode_depends(id, c);
            self.encode_conflicts(id, c);
            if c.origin.is_remote() {
                self.encode_shlib_requires(id, c);
            }
            if request.wants_install(candidate) {
                self.push_clause(vec![id], ClauseKind::Request);
            }
            if request.wants_removal(candidate) {
                self.push_clause(vec![-id], ClauseKind::Request);
            }
        }

        let heads: Vec<VarId> = self.vars.heads().map(|(_, head)| head).collect();
        for head in heads {
            self.encode_chain_exclusion(head);
        }

        let stats = self.clauses.stats();
        log::debug!(
            "encoded {} clauses over {} variables ({} dependency, {} conflict, {} shlib, {} request, {} exclusion)",
            stats.total,
            self.vars.len(),
            stats.depends,
            stats.conflicts,
            stats.shlib_requires,
            stats.requests,
            stats.chain_exclusions,
        );

        (self.vars, self.clauses)
    }

    /// Append a clause and register it on every mentioned variable.
    fn push_clause(&mut self, lits: Vec<Literal>, kind: ClauseKind) {
        let members: Vec<VarId> = lits.iter().map(|&lit| lit_var(lit)).collect();
        let id = self.clauses.add(Clause::new(lits, kind));
        for member in members {
            self.vars.attach_rule(member, id);
        }
    }

    fn encode_depends(&mut self, id: VarId, c: &Candidate) {
        for dep in &c.depends {
            let Some(head) = self.vars.find_chain(dep) else {
                log::warn!("{}: dependency {} not in universe, dropping clause", c.uid, dep);
                continue;
            };
            let mut lits = vec![-id];
            lits.extend(self.vars.chain(head));
            self.push_clause(lits, ClauseKind::Depends);
        }
    }

    fn encode_conflicts(&mut self, id: VarId, c: &Candidate) {
        let universe = self.universe;

        for conflict in &c.conflicts {
            let Some(head) = self.vars.find_chain(&conflict.uid) else {
                log::debug!("{}: conflict target {} not in universe", c.uid, conflict.uid);
                continue;
            };
            let members: Vec<VarId> = self.vars.chain(head).collect();
            for member in members {
                if member == id {
                    continue;
                }
                let Some(other) = universe.candidate(self.vars.var(member).candidate()) else {
                    continue;
                };
                let applies = match conflict.kind {
                    ConflictKind::RemoteLocal => {
                        c.origin.is_installed() && other.origin.is_remote()
                            || c.origin.is_remote() && other.origin.is_installed()
                    }
                    ConflictKind::RemoteRemote => {
                        c.origin.is_remote() && other.origin.is_remote()
                    }
                };
                if applies {
                    self.push_clause(vec![-id, -member], ClauseKind::Conflict);
                }
            }
        }
    }

    fn encode_shlib_requires(&mut self, id: VarId, c: &Candidate) {
        let universe = self.universe;

        for shlib in &c.shlib_requires {
            // every provider contributes its whole chain
            let mut providers: IndexSet<VarId> = IndexSet::new();
            for &candidate in universe.providers(shlib) {
                let Some(provider) = universe.candidate(candidate) else {
                    continue;
                };
                if let Some(head) = self.vars.find_chain(&provider.uid) {
                    providers.extend(self.vars.chain(head));
                }
            }
            if providers.is_empty() {
                log::warn!(
                    "{}: no provider for shared library {}, dropping clause",
                    c.uid,
                    shlib
                );
                continue;
            }
            let mut lits = vec![-id];
            lits.extend(providers);
            self.push_clause(lits, ClauseKind::ShlibRequire);
        }
    }

    fn encode_chain_exclusion(&mut self, head: VarId) {
        let members: Vec<VarId> = self.vars.chain(head).collect();
        for (i, &a) in members.iter().enumerate() {
            for &b in &members[i + 1..] {
                self.push_clause(vec![-a, -b], ClauseKind::ChainExclusion);
            }
        }
    }
}
