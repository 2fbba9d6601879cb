//! Cooperative cancellation for long-running descriptor walks.
//!
//! A bootstrap over a large folder performs one collaborator read per
//! descriptor; callers that abandon the operation flip the token and the
//! walk stops at the next check, discarding partial state.

use tokio::sync::watch;

/// Caller-held handle that signals cancellation.
#[derive(Debug)]
pub struct CancelSource {
    tx: watch::Sender<bool>,
}

impl CancelSource {
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }
}

/// Cheap clonable token checked between units of work.
#[derive(Debug, Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

impl CancelToken {
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// A token that can never be cancelled, for callers without a
    /// cancellation path.
    pub fn never() -> Self {
        let (_tx, rx) = watch::channel(false);
        Self { rx }
    }
}

/// Create a connected source/token pair.
pub fn cancel_pair() -> (CancelSource, CancelToken) {
    let (tx, rx) = watch::channel(false);
    (CancelSource { tx }, CancelToken { rx })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_pair() {
        let (source, token) = cancel_pair();
        assert!(!token.is_cancelled());
        source.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_never_token() {
        assert!(!CancelToken::never().is_cancelled());
    }
}
