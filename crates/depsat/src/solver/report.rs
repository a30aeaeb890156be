use std::fmt;

use super::clauses::{lit_var, Clause, ClauseKind};
use super::variables::VariableStore;
use crate::candidate::Origin;
use crate::universe::Universe;

/// Human-readable rendering of one conflicting clause.
///
/// Produced when top-level propagation fails, before any guess was
/// made. Every variable of a conflicting clause is resolved, so each
/// member renders with its full desired action: a local candidate
/// wants `keep` or `remove`, a remote one `install` or `ignore`.
#[derive(Debug, Clone)]
pub struct ConflictReport {
    kind: ClauseKind,
    members: Vec<ReportMember>,
}

#[derive(Debug, Clone)]
struct ReportMember {
    uid: String,
    origin: Origin,
    to_install: bool,
}

impl ConflictReport {
    /// Capture the candidates of a conflicting clause with their
    /// desired actions.
    pub fn from_clause(clause: &Clause, vars: &VariableStore, universe: &Universe) -> Self {
        let mut members = Vec::with_capacity(clause.len());
        for &lit in clause.literals() {
            let var = vars.var(lit_var(lit));
            let Some(candidate) = universe.candidate(var.candidate()) else {
                continue;
            };
            members.push(ReportMember {
                uid: candidate.uid.clone(),
                origin: candidate.origin,
                to_install: var.to_install(),
            });
        }
        Self {
            kind: clause.kind(),
            members,
        }
    }

    /// What the conflicting clause encoded
    pub fn kind(&self) -> ClauseKind {
        self.kind
    }
}

impl fmt::Display for ConflictReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} clause unsatisfiable:", self.kind.describe())?;
        for (i, member) in self.members.iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            let want = match (member.origin, member.to_install) {
                (Origin::Installed, true) => "keep",
                (Origin::Installed, false) => "remove",
                (Origin::Remote, true) => "install",
                (Origin::Remote, false) => "ignore",
            };
            write!(f, "{}{} {}(want {})", sep, member.origin, member.uid, want)?;
        }
        Ok(())
    }
}
