use super::search::SatProblem;
use crate::candidate::CandidateId;
use crate::error::SolveError;
use crate::request::{JobKind, Request};
use crate::universe::Universe;

/// One concrete step of the transaction handed to the job executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Install a remote candidate with no version currently present
    Install(CandidateId),
    /// Replace the installed member of a chain with a remote one
    Upgrade {
        install: CandidateId,
        remove: CandidateId,
    },
    /// Remove an installed candidate
    Delete(CandidateId),
    /// Download a remote candidate without installing it
    Fetch(CandidateId),
}

/// Ordered list of operations produced from a satisfying assignment.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Transaction {
    operations: Vec<Operation>,
}

impl Transaction {
    /// Create an empty transaction
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, operation: Operation) {
        self.operations.push(operation);
    }

    /// All operations, in chain order
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Iterate over the operations
    pub fn iter(&self) -> impl Iterator<Item = &Operation> {
        self.operations.iter()
    }

    /// Number of operations
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Whether the transaction changes nothing
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Candidates to install fresh
    pub fn installs(&self) -> impl Iterator<Item = CandidateId> + '_ {
        self.operations.iter().filter_map(|op| match op {
            Operation::Install(id) => Some(*id),
            _ => None,
        })
    }

    /// Upgrades as (install, remove) pairs
    pub fn upgrades(&self) -> impl Iterator<Item = (CandidateId, CandidateId)> + '_ {
        self.operations.iter().filter_map(|op| match op {
            Operation::Upgrade { install, remove } => Some((*install, *remove)),
            _ => None,
        })
    }

    /// Candidates to remove
    pub fn deletes(&self) -> impl Iterator<Item = CandidateId> + '_ {
        self.operations.iter().filter_map(|op| match op {
            Operation::Delete(id) => Some(*id),
            _ => None,
        })
    }

    /// Candidates to download only
    pub fn fetches(&self) -> impl Iterator<Item = CandidateId> + '_ {
        self.operations.iter().filter_map(|op| match op {
            Operation::Fetch(id) => Some(*id),
            _ => None,
        })
    }
}

impl SatProblem {
    /// Map the current assignment back to operations, chain by chain.
    ///
    /// For each chain the members chosen for install (remote, value
    /// true) and removal (installed, value false) are paired up: one
    /// of each is an upgrade, an install with nothing removed is an
    /// install (or a fetch under a fetch job), removals alone are
    /// deletes. Every variable must be resolved, and no chain may
    /// select more than one version to install; either case fails the
    /// projection and no partial transaction is returned.
    pub fn project(
        &self,
        universe: &Universe,
        request: &Request,
    ) -> Result<Transaction, SolveError> {
        let mut transaction = Transaction::new();
        let mut inconsistent: Option<String> = None;

        for (uid, head) in self.vars.heads() {
            let mut add = Vec::new();
            let mut del = Vec::new();

            for id in self.vars.chain(head) {
                let var = self.vars.var(id);
                if !var.is_resolved() {
                    return Err(SolveError::UnresolvedVariable {
                        uid: uid.to_string(),
                    });
                }
                let Some(candidate) = universe.candidate(var.candidate()) else {
                    continue;
                };
                if candidate.origin.is_remote() && var.to_install() {
                    add.push(var.candidate());
                } else if candidate.origin.is_installed() && !var.to_install() {
                    del.push(var.candidate());
                }
            }

            if add.len() > 1 {
                log::error!("chain {}: {} versions chosen for install", uid, add.len());
                if inconsistent.is_none() {
                    inconsistent = Some(uid.to_string());
                }
                continue;
            }

            match (add.first().copied(), del.as_slice()) {
                (Some(install), [remove, rest @ ..]) => {
                    transaction.push(Operation::Upgrade {
                        install,
                        remove: *remove,
                    });
                    for &extra in rest {
                        transaction.push(Operation::Delete(extra));
                    }
                }
                (Some(install), []) => {
                    if request.job() == JobKind::Fetch {
                        transaction.push(Operation::Fetch(install));
                    } else {
                        transaction.push(Operation::Install(install));
                    }
                }
                (None, removals) => {
                    for &id in removals {
                        transaction.push(Operation::Delete(id));
                    }
                }
            }
        }

        if let Some(uid) = inconsistent {
            return Err(SolveError::ChainInconsistent { uid });
        }
        Ok(transaction)
    }
}
