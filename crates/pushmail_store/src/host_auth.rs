//! Host connection configuration.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Identifier of a [`HostAuth`] record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HostAuthId(pub u64);

/// Identity of a usable connection to a host.
///
/// Derived from the fields a connection is actually bound to: the address
/// and the credentials revision. Anything caching connections must key the
/// cache by this value, so a redirect (which rewrites the address) or a
/// credential change invalidates cached connections implicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint(u64);

/// Stored connection configuration for an account's server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostAuth {
    /// Record identifier.
    pub id: HostAuthId,
    /// Server hostname, possibly rewritten by a redirect.
    pub address: String,
    /// Server port.
    pub port: u16,
    /// Login name.
    pub login: String,
    /// Password or a reference into the credential store.
    pub password: String,
    /// Whether to connect over TLS.
    pub use_ssl: bool,
    /// Bumped whenever login or password change.
    pub credentials_rev: u32,
}

impl HostAuth {
    /// Connection identity for the record's current state.
    pub fn fingerprint(&self) -> Fingerprint {
        let mut hasher = DefaultHasher::new();
        self.address.hash(&mut hasher);
        self.port.hash(&mut hasher);
        self.credentials_rev.hash(&mut hasher);
        Fingerprint(hasher.finish())
    }

    /// URL scheme implied by the TLS flag.
    pub fn scheme(&self) -> &'static str {
        if self.use_ssl {
            "https"
        } else {
            "http"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn fingerprint_follows_address() {
        let before = host_auth();
        let mut after = host_auth();
        after.address = "mail2.example.com".into();
        assert_ne!(before.fingerprint(), after.fingerprint());
    }

    #[test]
    fn fingerprint_follows_credentials_rev() {
        let before = host_auth();
        let mut after = host_auth();
        after.credentials_rev += 1;
        assert_ne!(before.fingerprint(), after.fingerprint());
    }

    #[test]
    fn fingerprint_stable_for_equal_records() {
        assert_eq!(host_auth().fingerprint(), host_auth().fingerprint());
    }

    #[test]
    fn scheme_tracks_tls_flag() {
        let mut ha = host_auth();
        assert_eq!(ha.scheme(), "https");
        ha.use_ssl = false;
        assert_eq!(ha.scheme(), "http");
    }
}
