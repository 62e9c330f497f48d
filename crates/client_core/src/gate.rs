//! Token-stamped suppression for overlapping invocations.
//!
//! Every trigger mints an [`InvocationToken`]; a resolution is only allowed
//! to touch visible state when no token at or above it has resolved yet.
//! Calls are never cancelled, so late resolutions of superseded tokens are
//! simply refused here.

/// Identity of one invocation on one controller.
///
/// Tokens are strictly increasing in mint order, so comparing two tokens
/// compares their issue time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InvocationToken(pub u64);

impl std::fmt::Display for InvocationToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Mints tokens and decides which resolutions may be applied.
#[derive(Debug, Default)]
pub struct ResolutionGate {
    next_seq: u64,
    latest_minted: Option<InvocationToken>,
    highest_resolved: Option<InvocationToken>,
}

impl ResolutionGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mint(&mut self) -> InvocationToken {
        self.next_seq += 1;
        let token = InvocationToken(self.next_seq);
        self.latest_minted = Some(token);
        token
    }

    /// Records `token` as resolved and returns whether its outcome may be
    /// applied. Returns `false` when an equal or newer token has already
    /// been admitted.
    pub fn admit(&mut self, token: InvocationToken) -> bool {
        if self.highest_resolved.is_some_and(|highest| highest >= token) {
            return false;
        }
        self.highest_resolved = Some(token);
        true
    }

    pub fn latest_minted(&self) -> Option<InvocationToken> {
        self.latest_minted
    }

    pub fn highest_resolved(&self) -> Option<InvocationToken> {
        self.highest_resolved
    }
}

#[cfg(test)]
#[path = "tests/gate_tests.rs"]
mod tests;
