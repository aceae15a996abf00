use std::collections::BTreeSet;

/// Whether expanding one card collapses the others.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExpansionPolicy {
    /// At most one card expanded at a time; expanding B collapses A.
    #[default]
    Single,
    /// Each card toggles independently.
    Independent,
}

/// Per-entry expanded/collapsed state, keyed by pathway identity.
///
/// The tracker's lifecycle is independent of the result set: it survives
/// promote operations and result-set replacement, so a re-fetched key keeps
/// its prior state while a brand-new key starts collapsed.
#[derive(Debug, Clone, Default)]
pub struct ExpansionTracker {
    policy: ExpansionPolicy,
    open: BTreeSet<String>,
}

impl ExpansionTracker {
    pub fn new(policy: ExpansionPolicy) -> Self {
        Self {
            policy,
            open: BTreeSet::new(),
        }
    }

    pub fn policy(&self) -> ExpansionPolicy {
        self.policy
    }

    pub fn is_expanded(&self, key: &str) -> bool {
        self.open.contains(key)
    }

    /// Flips the state for `key`; unseen keys start collapsed.
    pub fn toggle(&mut self, key: &str) {
        if self.open.remove(key) {
            return;
        }
        if self.policy == ExpansionPolicy::Single {
            self.open.clear();
        }
        self.open.insert(key.to_string());
    }

    pub fn expanded_keys(&self) -> impl Iterator<Item = &str> {
        self.open.iter().map(String::as_str)
    }
}
