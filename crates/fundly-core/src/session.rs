// ── Session marker persistence ──
//
// The client's only persisted state: a single `login-state=authenticated`
// marker whose presence signals an existing session. The cookie jar holds
// the actual credential; this marker only picks the start screen.

use std::sync::atomic::{AtomicBool, Ordering};

/// Persistence seam for the session marker.
///
/// Writes are best-effort: implementations log I/O failures rather than
/// propagate them, so a broken marker file never fails a sign-in.
pub trait SessionStore: Send + Sync {
    /// Record that a session exists.
    fn set_authenticated(&self);

    /// Remove the marker.
    fn clear(&self);

    /// `true` when a marker is present.
    fn is_authenticated(&self) -> bool;
}

/// In-memory marker, for headless store tests.
#[derive(Debug, Default)]
pub struct MemorySession {
    authenticated: AtomicBool,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySession {
    fn set_authenticated(&self) {
        self.authenticated.store(true, Ordering::SeqCst);
    }

    fn clear(&self) {
        self.authenticated.store(false, Ordering::SeqCst);
    }

    fn is_authenticated(&self) -> bool {
        self.authenticated.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_session_round_trips() {
        let session = MemorySession::new();
        assert!(!session.is_authenticated());

        session.set_authenticated();
        assert!(session.is_authenticated());

        session.clear();
        assert!(!session.is_authenticated());
    }
}
