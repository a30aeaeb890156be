use std::collections::HashSet;

use crate::candidate::CandidateId;

/// What kind of transaction the front end asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobKind {
    Install,
    Upgrade,
    Delete,
    Fetch,
}

/// The explicit per-candidate requests for one transaction.
///
/// Requests are keyed by candidate id; the front end resolves names
/// to concrete candidates before handing the request over.
#[derive(Debug, Clone)]
pub struct Request {
    job: JobKind,
    install: HashSet<CandidateId>,
    remove: HashSet<CandidateId>,
}

impl Request {
    /// Create an empty request for a job kind
    pub fn new(job: JobKind) -> Self {
        Self {
            job,
            install: HashSet::new(),
            remove: HashSet::new(),
        }
    }

    /// The job kind this request belongs to
    pub fn job(&self) -> JobKind {
        self.job
    }

    /// Ask for a candidate to be present after the transaction
    pub fn add_install(&mut self, id: CandidateId) {
        self.install.insert(id);
    }

    /// Ask for a candidate to be absent after the transaction
    pub fn add_removal(&mut self, id: CandidateId) {
        self.remove.insert(id);
    }

    /// Whether a candidate was explicitly requested for install
    pub fn wants_install(&self, id: CandidateId) -> bool {
        self.install.contains(&id)
    }

    /// Whether a candidate was explicitly requested for removal
    pub fn wants_removal(&self, id: CandidateId) -> bool {
        self.remove.contains(&id)
    }

    /// Whether the request carries no explicit candidates
    pub fn is_empty(&self) -> bool {
        self.install.is_empty() && self.remove.is_empty()
    }
}
