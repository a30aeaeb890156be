use indexmap::IndexMap;

use crate::candidate::{Candidate, CandidateId};

/// All package candidates one solve runs against.
///
/// Candidates sharing a UID form a chain, kept in insertion order
/// (the front end inserts them in version order). The universe also
/// indexes which candidates expose each shared library. The universe
/// owns all candidate data and must outlive any solver borrowing it.
#[derive(Debug, Default)]
pub struct Universe {
    /// All candidates; ids are 1-based indexes into this table
    candidates: Vec<Candidate>,

    /// UID -> chain members in insertion order
    chains: IndexMap<String, Vec<CandidateId>>,

    /// Shared library name -> providing candidates
    providers: IndexMap<String, Vec<CandidateId>>,
}

impl Universe {
    /// Create an empty universe
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a candidate, indexing it into its UID chain and into the
    /// provides index. Returns the candidate's id.
    pub fn add_candidate(&mut self, candidate: Candidate) -> CandidateId {
        let id = self.candidates.len() as CandidateId + 1;

        self.chains
            .entry(candidate.uid.clone())
            .or_default()
            .push(id);

        for shlib in &candidate.shlib_provides {
            self.providers.entry(shlib.clone()).or_default().push(id);
        }

        self.candidates.push(candidate);
        id
    }

    /// Look up a candidate by id
    pub fn candidate(&self, id: CandidateId) -> Option<&Candidate> {
        usize::try_from(id)
            .ok()
            .and_then(|i| i.checked_sub(1))
            .and_then(|i| self.candidates.get(i))
    }

    /// Members of one UID chain, in insertion order
    pub fn chain(&self, uid: &str) -> Option<&[CandidateId]> {
        self.chains.get(uid).map(Vec::as_slice)
    }

    /// All UID chains, in insertion order
    pub fn chains(&self) -> impl Iterator<Item = (&str, &[CandidateId])> {
        self.chains
            .iter()
            .map(|(uid, ids)| (uid.as_str(), ids.as_slice()))
    }

    /// Candidates providing a shared library
    pub fn providers(&self, shlib: &str) -> &[CandidateId] {
        self.providers.get(shlib).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of candidates
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Whether the universe holds no candidates
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}
