//! The scoped response resource.

use std::fmt;

/// One round's server response.
///
/// A `WireResponse` owns the underlying network resource for the round. It
/// must be released exactly once on every path out of a round - looping,
/// terminal and faulting alike - before the next round may begin. Release
/// is tied to `Drop`, so scope exit is the release point; transports that
/// need to observe it (connection accounting, mocks) attach a hook with
/// [`with_release_hook`](WireResponse::with_release_hook).
pub struct WireResponse {
    status: u16,
    body: Vec<u8>,
    redirect_address: Option<String>,
    on_release: Option<Box<dyn FnOnce() + Send>>,
}

impl WireResponse {
    /// Creates a response.
    pub fn new(status: u16, body: Vec<u8>, redirect_address: Option<String>) -> Self {
        Self {
            status,
            body,
            redirect_address,
            on_release: None,
        }
    }

    /// Attaches a hook invoked exactly once when the response is released.
    #[must_use]
    pub fn with_release_hook(mut self, hook: impl FnOnce() + Send + 'static) -> Self {
        self.on_release = Some(Box::new(hook));
        self
    }

    /// Transport status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// True when the response carries no payload.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// The payload bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Redirect target named by the server, if any.
    pub fn redirect_address(&self) -> Option<&str> {
        self.redirect_address.as_deref()
    }
}

impl Drop for WireResponse {
    fn drop(&mut self) {
        if let Some(hook) = self.on_release.take() {
            hook();
        }
    }
}

impl fmt::Debug for WireResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WireResponse")
            .field("status", &self.status)
            .field("body_len", &self.body.len())
            .field("redirect_address", &self.redirect_address)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn accessors() {
        let resp = WireResponse::new(451, vec![], Some("mail2.example.com".into()));
        assert_eq!(resp.status(), 451);
        assert!(resp.is_empty());
        assert_eq!(resp.redirect_address(), Some("mail2.example.com"));
    }

    #[test]
    fn release_hook_runs_once_on_drop() {
        let released = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&released);
        let resp = WireResponse::new(200, vec![1, 2, 3], None)
            .with_release_hook(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            });

        assert!(!resp.is_empty());
        assert_eq!(released.load(Ordering::SeqCst), 0);
        drop(resp);
        assert_eq!(released.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn no_hook_is_fine() {
        drop(WireResponse::new(200, vec![], None));
    }
}
