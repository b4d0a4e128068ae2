//! The provisioning contract.

use crate::transport::Endpoint;
use pushmail_store::Account;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Negotiates a server-imposed security policy.
///
/// Invoked by the engine when a round signals that provisioning is
/// required, whether through the transport status or an in-band command
/// status. Returns whether the server accepted the client's policy
/// acknowledgement. Implementations may persist policy state as a side
/// effect; the engine never inspects it.
///
/// An `Err` means the attempt could not complete; the engine treats that
/// the same as an explicit rejection.
pub trait Provisioner: Send + Sync {
    /// Attempts to satisfy the server's policy for `account`.
    fn provision(&self, endpoint: &Endpoint, account: &Account) -> io::Result<bool>;
}

enum Answer {
    Accept,
    Reject,
    IoError,
}

/// A provisioner that always gives the same answer, for tests.
pub struct StaticProvisioner {
    answer: Answer,
    attempts: AtomicUsize,
}

impl StaticProvisioner {
    /// Always reports a successful negotiation.
    pub fn accepting() -> Self {
        Self {
            answer: Answer::Accept,
            attempts: AtomicUsize::new(0),
        }
    }

    /// Always reports a rejected negotiation.
    pub fn rejecting() -> Self {
        Self {
            answer: Answer::Reject,
            attempts: AtomicUsize::new(0),
        }
    }

    /// Always fails with an I/O error.
    pub fn failing() -> Self {
        Self {
            answer: Answer::IoError,
            attempts: AtomicUsize::new(0),
        }
    }

    /// Number of attempts made so far.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl Provisioner for StaticProvisioner {
    fn provision(&self, _endpoint: &Endpoint, _account: &Account) -> io::Result<bool> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        match self.answer {
            Answer::Accept => Ok(true),
            Answer::Reject => Ok(false),
            Answer::IoError => Err(io::Error::other("policy endpoint unreachable")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pushmail_store::{AccountId, HostAuth, HostAuthId};

    fn fixtures() -> (Endpoint, Account) {
        let host_auth = HostAuth {
            id: HostAuthId(1),
            address: "mail.example.com".into(),
            port: 443,
            login: "user@example.com".into(),
            password: "hunter2".into(),
            use_ssl: true,
            credentials_rev: 0,
        };
        let account = Account {
            id: AccountId(1),
            email_address: "user@example.com".into(),
            sync_key: None,
            host_auth_id: HostAuthId(1),
        };
        (Endpoint::from_host_auth(&host_auth), account)
    }

    #[test]
    fn answers_and_counts() {
        let (endpoint, account) = fixtures();

        let accepting = StaticProvisioner::accepting();
        assert!(accepting.provision(&endpoint, &account).unwrap());
        assert_eq!(accepting.attempts(), 1);

        let rejecting = StaticProvisioner::rejecting();
        assert!(!rejecting.provision(&endpoint, &account).unwrap());

        let failing = StaticProvisioner::failing();
        assert!(failing.provision(&endpoint, &account).is_err());
    }
}
