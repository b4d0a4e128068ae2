//! Transport layer abstraction.

use crate::error::{TransportError, TransportResult};
use crate::response::WireResponse;
use parking_lot::Mutex;
use pushmail_store::{Fingerprint, HostAuth};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Where a request goes.
///
/// Derived from the current [`HostAuth`] record at the start of every
/// round, never cached across rounds, so a redirect applied mid-invocation
/// changes where the very next request is sent. The embedded fingerprint
/// gives connection caches their eviction key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// URL scheme.
    pub scheme: &'static str,
    /// Server hostname.
    pub address: String,
    /// Server port.
    pub port: u16,
    /// Login name for the mailbox.
    pub username: String,
    /// Connection identity of the record this endpoint was derived from.
    pub fingerprint: Fingerprint,
}

impl Endpoint {
    /// Derives the endpoint for a host configuration's current state.
    pub fn from_host_auth(host_auth: &HostAuth) -> Self {
        Self {
            scheme: host_auth.scheme(),
            address: host_auth.address.clone(),
            port: host_auth.port,
            username: host_auth.login.clone(),
            fingerprint: host_auth.fingerprint(),
        }
    }
}

/// A sync transport sends one command request and returns the response.
///
/// Implementations own connection management; the engine owns retry
/// semantics (it has none - a transport fault is terminal for the
/// invocation).
pub trait SyncTransport: Send + Sync {
    /// Sends `body` as the named command to `endpoint`.
    fn send(&self, endpoint: &Endpoint, command: &str, body: &[u8]) -> TransportResult<WireResponse>;
}

impl<T: SyncTransport + ?Sized> SyncTransport for Arc<T> {
    fn send(&self, endpoint: &Endpoint, command: &str, body: &[u8]) -> TransportResult<WireResponse> {
        (**self).send(endpoint, command, body)
    }
}

/// One request observed by [`MockTransport`], kept for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentRequest {
    /// Address the request was sent to.
    pub address: String,
    /// Command name.
    pub command: String,
    /// Request body bytes.
    pub body: Vec<u8>,
}

enum Script {
    Respond {
        status: u16,
        body: Vec<u8>,
        redirect: Option<String>,
    },
    IoError,
}

/// A scripted transport for testing.
///
/// Responses are served in the order they were pushed. Every handed-out
/// response carries a release hook, so tests can assert that the engine
/// released exactly as many responses as it requested.
#[derive(Default)]
pub struct MockTransport {
    script: Mutex<VecDeque<Script>>,
    requests: Mutex<Vec<SentRequest>>,
    sends: AtomicUsize,
    releases: Arc<AtomicUsize>,
}

impl MockTransport {
    /// Creates a transport with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response.
    pub fn push_response(&self, status: u16, body: Vec<u8>, redirect: Option<&str>) {
        self.script.lock().push_back(Script::Respond {
            status,
            body,
            redirect: redirect.map(str::to_owned),
        });
    }

    /// Queues a transport fault.
    pub fn push_io_error(&self) {
        self.script.lock().push_back(Script::IoError);
    }

    /// Number of requests sent so far.
    pub fn sends(&self) -> usize {
        self.sends.load(Ordering::SeqCst)
    }

    /// Number of responses released so far.
    pub fn releases(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }

    /// The requests sent so far, in order.
    pub fn requests(&self) -> Vec<SentRequest> {
        self.requests.lock().clone()
    }
}

impl SyncTransport for MockTransport {
    fn send(&self, endpoint: &Endpoint, command: &str, body: &[u8]) -> TransportResult<WireResponse> {
        self.sends.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(SentRequest {
            address: endpoint.address.clone(),
            command: command.to_owned(),
            body: body.to_vec(),
        });

        match self.script.lock().pop_front() {
            Some(Script::Respond {
                status,
                body,
                redirect,
            }) => {
                let releases = Arc::clone(&self.releases);
                Ok(WireResponse::new(status, body, redirect)
                    .with_release_hook(move || {
                        releases.fetch_add(1, Ordering::SeqCst);
                    }))
            }
            Some(Script::IoError) => Err(TransportError::Io(std::io::Error::other(
                "scripted transport fault",
            ))),
            None => Err(TransportError::Io(std::io::Error::other(
                "no scripted response",
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pushmail_store::HostAuthId;

    fn host_auth() -> HostAuth {
        HostAuth {
            id: HostAuthId(1),
            address: "mail.example.com".into(),
            port: 443,
            login: "user@example.com".into(),
            password: "hunter2".into(),
            use_ssl: true,
            credentials_rev: 0,
        }
    }

    #[test]
    fn endpoint_tracks_record_state() {
        let mut ha = host_auth();
        let before = Endpoint::from_host_auth(&ha);
        ha.address = "mail2.example.com".into();
        let after = Endpoint::from_host_auth(&ha);

        assert_eq!(before.address, "mail.example.com");
        assert_eq!(after.address, "mail2.example.com");
        assert_ne!(before.fingerprint, after.fingerprint);
    }

    #[test]
    fn scripted_responses_in_order() {
        let transport = MockTransport::new();
        transport.push_response(200, vec![], None);
        transport.push_response(451, vec![], Some("next.example.com"));

        let endpoint = Endpoint::from_host_auth(&host_auth());
        let first = transport.send(&endpoint, "FolderSync", &[]).unwrap();
        assert_eq!(first.status(), 200);
        drop(first);

        let second = transport.send(&endpoint, "FolderSync", &[]).unwrap();
        assert_eq!(second.status(), 451);
        assert_eq!(second.redirect_address(), Some("next.example.com"));
        drop(second);

        assert_eq!(transport.sends(), 2);
        assert_eq!(transport.releases(), 2);
    }

    #[test]
    fn exhausted_script_is_a_fault() {
        let transport = MockTransport::new();
        let endpoint = Endpoint::from_host_auth(&host_auth());
        let result = transport.send(&endpoint, "FolderSync", &[]);
        assert!(matches!(result, Err(TransportError::Io(_))));
    }

    #[test]
    fn releases_lag_until_drop() {
        let transport = MockTransport::new();
        transport.push_response(200, vec![1], None);
        let endpoint = Endpoint::from_host_auth(&host_auth());
        let resp = transport.send(&endpoint, "FolderSync", &[]).unwrap();
        assert_eq!(transport.releases(), 0);
        drop(resp);
        assert_eq!(transport.releases(), 1);
    }
}
