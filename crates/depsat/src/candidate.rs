use std::fmt;

/// Identifier of one candidate inside a [`Universe`](crate::Universe).
///
/// Ids are 1-based `i32` values so the solver can reuse them directly
/// as literal magnitudes.
pub type CandidateId = i32;

/// Where a candidate comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    /// Currently present on the system
    Installed,
    /// Available from a repository
    Remote,
}

impl Origin {
    /// Returns true for locally installed candidates
    #[inline]
    pub fn is_installed(self) -> bool {
        matches!(self, Origin::Installed)
    }

    /// Returns true for repository candidates
    #[inline]
    pub fn is_remote(self) -> bool {
        matches!(self, Origin::Remote)
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Installed => write!(f, "local"),
            Origin::Remote => write!(f, "remote"),
        }
    }
}

/// Which pairings a conflict declaration applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConflictKind {
    /// Only between a local candidate and a remote one
    RemoteLocal,
    /// Only between two remote candidates
    RemoteRemote,
}

/// A conflict declared by a candidate against another package identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub uid: String,
    pub kind: ConflictKind,
}

/// One concrete package version known to the solver.
///
/// The `uid` names the package identity independent of version; the
/// digest distinguishes contents. Candidates sharing a UID form a
/// chain inside the [`Universe`](crate::Universe).
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Version-independent package identity
    pub uid: String,
    /// Content digest
    pub digest: String,
    /// Local or remote
    pub origin: Origin,
    /// Hint used to bias choice among chain members
    pub priority: i32,
    /// UIDs this candidate depends on
    pub depends: Vec<String>,
    /// Conflicts declared against other package identities
    pub conflicts: Vec<Conflict>,
    /// Shared libraries this candidate needs (meaningful when remote;
    /// installed candidates have theirs satisfied already)
    pub shlib_requires: Vec<String>,
    /// Shared libraries this candidate exposes
    pub shlib_provides: Vec<String>,
}

impl Candidate {
    /// Create a locally installed candidate
    pub fn installed(uid: impl Into<String>, digest: impl Into<String>) -> Self {
        Self::with_origin(uid, digest, Origin::Installed)
    }

    /// Create a repository candidate
    pub fn remote(uid: impl Into<String>, digest: impl Into<String>) -> Self {
        Self::with_origin(uid, digest, Origin::Remote)
    }

    fn with_origin(uid: impl Into<String>, digest: impl Into<String>, origin: Origin) -> Self {
        Self {
            uid: uid.into(),
            digest: digest.into(),
            origin,
            priority: 0,
            depends: Vec::new(),
            conflicts: Vec::new(),
            shlib_requires: Vec::new(),
            shlib_provides: Vec::new(),
        }
    }

    /// Set the chain-choice priority hint
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Declare a dependency on another package identity
    pub fn depends_on(mut self, uid: impl Into<String>) -> Self {
        self.depends.push(uid.into());
        self
    }

    /// Declare a conflict with another package identity
    pub fn conflicts_with(mut self, uid: impl Into<String>, kind: ConflictKind) -> Self {
        self.conflicts.push(Conflict {
            uid: uid.into(),
            kind,
        });
        self
    }

    /// Declare a required shared library
    pub fn requires_shlib(mut self, name: impl Into<String>) -> Self {
        self.shlib_requires.push(name.into());
        self
    }

    /// Declare an exposed shared library
    pub fn provides_shlib(mut self, name: impl Into<String>) -> Self {
        self.shlib_provides.push(name.into());
        self
    }
}
