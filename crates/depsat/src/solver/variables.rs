use indexmap::IndexMap;

use super::clauses::ClauseId;
use crate::candidate::CandidateId;
use crate::universe::Universe;

/// Index of one solver variable.
///
/// 1-based; doubles as the DIMACS variable order and as the magnitude
/// of a [`Literal`](super::Literal).
pub type VarId = i32;

/// One boolean decision variable, bound to one candidate.
///
/// `to_install` is the tentative value (present after the transaction)
/// and is only meaningful while `resolved` holds.
#[derive(Debug)]
pub struct Variable {
    /// Bound candidate
    candidate: CandidateId,
    /// Tentative value
    to_install: bool,
    /// Whether `to_install` is currently fixed
    resolved: bool,
    /// Hint copied from the candidate
    priority: i32,
    /// Clauses mentioning this variable, one entry per literal
    rules: Vec<ClauseId>,
    /// Chain sibling links
    prev: Option<VarId>,
    next: Option<VarId>,
}

impl Variable {
    fn new(candidate: CandidateId, priority: i32) -> Self {
        Self {
            candidate,
            to_install: false,
            resolved: false,
            priority,
            rules: Vec::new(),
            prev: None,
            next: None,
        }
    }

    /// The candidate this variable decides for
    #[inline]
    pub fn candidate(&self) -> CandidateId {
        self.candidate
    }

    /// Whether the value is currently fixed
    #[inline]
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Current tentative value
    #[inline]
    pub fn to_install(&self) -> bool {
        self.to_install
    }

    /// The chain-choice priority hint
    #[inline]
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Clauses mentioning this variable
    #[inline]
    pub fn rules(&self) -> &[ClauseId] {
        &self.rules
    }

    /// Whether the variable shares its UID chain with siblings
    #[inline]
    pub fn in_multi_chain(&self) -> bool {
        self.prev.is_some() || self.next.is_some()
    }

    /// Next member of the chain, if any
    #[inline]
    pub fn next_in_chain(&self) -> Option<VarId> {
        self.next
    }

    /// Fix the value
    #[inline]
    pub(crate) fn set(&mut self, value: bool) {
        self.to_install = value;
        self.resolved = true;
    }

    /// Make the variable undecided again
    #[inline]
    pub(crate) fn clear(&mut self) {
        self.resolved = false;
    }
}

/// Dense store of all solver variables plus the UID chain index.
///
/// Variables occupy consecutive 1-based slots, members of one chain
/// adjacent and linked through `prev`/`next`. The first member of each
/// chain is registered as the chain head under its UID.
#[derive(Debug)]
pub struct VariableStore {
    vars: Vec<Variable>,
    heads: IndexMap<String, VarId>,
    /// Candidate id -> variable id (0 = unmapped)
    by_candidate: Vec<VarId>,
}

impl VariableStore {
    /// Build the store by walking the universe once.
    pub fn from_universe(universe: &Universe) -> Self {
        let mut vars: Vec<Variable> = Vec::with_capacity(universe.len());
        let mut heads = IndexMap::new();
        let mut by_candidate = vec![0; universe.len()];

        for (uid, members) in universe.chains() {
            heads.insert(uid.to_string(), vars.len() as VarId + 1);
            let mut prev: Option<VarId> = None;
            for &candidate in members {
                let id = vars.len() as VarId + 1;
                let priority = universe
                    .candidate(candidate)
                    .map(|c| c.priority)
                    .unwrap_or(0);
                let mut var = Variable::new(candidate, priority);
                var.prev = prev;
                if let Some(p) = prev {
                    vars[(p - 1) as usize].next = Some(id);
                }
                vars.push(var);
                if let Some(slot) = by_candidate.get_mut((candidate - 1) as usize) {
                    *slot = id;
                }
                prev = Some(id);
            }
        }

        Self {
            vars,
            heads,
            by_candidate,
        }
    }

    /// Number of variables
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Whether the store holds no variables
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Borrow a variable
    #[inline]
    pub fn var(&self, id: VarId) -> &Variable {
        &self.vars[(id - 1) as usize]
    }

    /// Borrow a variable mutably
    #[inline]
    pub fn var_mut(&mut self, id: VarId) -> &mut Variable {
        &mut self.vars[(id - 1) as usize]
    }

    /// Head of the chain for a UID, or None when the universe has no
    /// such package
    pub fn find_chain(&self, uid: &str) -> Option<VarId> {
        self.heads.get(uid).copied()
    }

    /// Chain heads with their UIDs, in universe order
    pub fn heads(&self) -> impl Iterator<Item = (&str, VarId)> {
        self.heads.iter().map(|(uid, &head)| (uid.as_str(), head))
    }

    /// Variable bound to a candidate
    pub fn for_candidate(&self, candidate: CandidateId) -> Option<VarId> {
        usize::try_from(candidate)
            .ok()
            .and_then(|i| i.checked_sub(1))
            .and_then(|i| self.by_candidate.get(i).copied())
            .filter(|&id| id != 0)
    }

    /// Members of the chain rooted at `head`, in slot order
    pub fn chain(&self, head: VarId) -> ChainIter<'_> {
        ChainIter {
            store: self,
            cur: Some(head),
        }
    }

    /// First unresolved variable in array order
    pub fn first_unresolved(&self) -> Option<VarId> {
        self.vars
            .iter()
            .position(|v| !v.resolved)
            .map(|i| i as VarId + 1)
    }

    /// Record that a clause mentions a variable
    pub(crate) fn attach_rule(&mut self, id: VarId, clause: ClauseId) {
        self.var_mut(id).rules.push(clause);
    }
}

/// Iterator over one UID chain.
pub struct ChainIter<'a> {
    store: &'a VariableStore,
    cur: Option<VarId>,
}

impl Iterator for ChainIter<'_> {
    type Item = VarId;

    fn next(&mut self) -> Option<VarId> {
        let id = self.cur?;
        self.cur = self.store.var(id).next;
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::Candidate;

    fn three_candidate_universe() -> Universe {
        let mut universe = Universe::new();
        universe.add_candidate(Candidate::installed("a", "d1"));
        universe.add_candidate(Candidate::remote("a", "d2"));
        universe.add_candidate(Candidate::remote("b", "d3").with_priority(7));
        universe
    }

    #[test]
    fn test_store_from_universe() {
        let universe = three_candidate_universe();
        let store = VariableStore::from_universe(&universe);

        assert_eq!(store.len(), 3);
        assert_eq!(store.find_chain("a"), Some(1));
        assert_eq!(store.find_chain("b"), Some(3));
        assert_eq!(store.find_chain("c"), None);
        assert_eq!(store.var(3).priority(), 7);
    }

    #[test]
    fn test_store_chain_links() {
        let universe = three_candidate_universe();
        let store = VariableStore::from_universe(&universe);

        let chain_a: Vec<_> = store.chain(1).collect();
        assert_eq!(chain_a, vec![1, 2]);
        assert!(store.var(1).in_multi_chain());
        assert!(store.var(2).in_multi_chain());
        assert!(!store.var(3).in_multi_chain());

        let chain_b: Vec<_> = store.chain(3).collect();
        assert_eq!(chain_b, vec![3]);
    }

    #[test]
    fn test_store_for_candidate() {
        let universe = three_candidate_universe();
        let store = VariableStore::from_universe(&universe);

        for id in [1, 2, 3] {
            let var = store.for_candidate(id).unwrap();
            assert_eq!(store.var(var).candidate(), id);
        }
        assert_eq!(store.for_candidate(4), None);
        assert_eq!(store.for_candidate(0), None);
    }

    #[test]
    fn test_store_first_unresolved() {
        let universe = three_candidate_universe();
        let mut store = VariableStore::from_universe(&universe);

        assert_eq!(store.first_unresolved(), Some(1));
        store.var_mut(1).set(true);
        assert_eq!(store.first_unresolved(), Some(2));
        store.var_mut(2).set(false);
        store.var_mut(3).set(false);
        assert_eq!(store.first_unresolved(), None);

        store.var_mut(2).clear();
        assert_eq!(store.first_unresolved(), Some(2));
    }
}
