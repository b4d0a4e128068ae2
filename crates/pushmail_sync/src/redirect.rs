//! The address redirector.

use pushmail_store::{AccountStore, HostAuth, HostAuthChange, StoreResult};
use tracing::debug;

/// Applies a server-supplied address to the host configuration.
///
/// A missing or empty address is a no-op returning `false`. Otherwise the
/// new address is persisted as a single-column update and then written to
/// the in-memory record, so both sides agree once this returns `Ok(true)`.
/// If the store write fails, the in-memory record keeps the old address.
///
/// Connections bound to the old address are not torn down here; connection
/// caches are keyed by [`HostAuth::fingerprint`], which this mutation
/// changes, so stale entries die on their next lookup.
pub fn apply_redirect<S>(
    store: &S,
    host_auth: &mut HostAuth,
    new_address: Option<&str>,
) -> StoreResult<bool>
where
    S: AccountStore + ?Sized,
{
    let Some(address) = new_address.filter(|a| !a.is_empty()) else {
        return Ok(false);
    };

    debug!(old = %host_auth.address, new = %address, "applying redirect");
    store.update_host_auth(
        host_auth.id,
        &[HostAuthChange::Address(address.to_owned())],
    )?;
    host_auth.address = address.to_owned();
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pushmail_store::{HostAuthId, MemoryStore, StoreEvent};

    fn fixtures() -> (MemoryStore, HostAuth) {
        let host_auth = HostAuth {
            id: HostAuthId(7),
            address: "mail.example.com".into(),
            port: 443,
            login: "user@example.com".into(),
            password: "hunter2".into(),
            use_ssl: true,
            credentials_rev: 0,
        };
        let store = MemoryStore::new();
        store.put_host_auth(host_auth.clone());
        (store, host_auth)
    }

    #[test]
    fn applies_and_persists_address() {
        let (store, mut host_auth) = fixtures();
        let applied =
            apply_redirect(&store, &mut host_auth, Some("mail2.example.com")).unwrap();

        assert!(applied);
        assert_eq!(host_auth.address, "mail2.example.com");
        assert_eq!(
            store.host_auth(HostAuthId(7)).unwrap().address,
            "mail2.example.com"
        );
        assert_eq!(
            store.journal(),
            vec![StoreEvent::HostAuth(
                HostAuthId(7),
                HostAuthChange::Address("mail2.example.com".into())
            )]
        );
    }

    #[test]
    fn absent_address_is_a_no_op() {
        let (store, mut host_auth) = fixtures();
        assert!(!apply_redirect(&store, &mut host_auth, None).unwrap());
        assert_eq!(host_auth.address, "mail.example.com");
        assert!(store.journal().is_empty());
    }

    #[test]
    fn empty_address_is_a_no_op() {
        let (store, mut host_auth) = fixtures();
        assert!(!apply_redirect(&store, &mut host_auth, Some("")).unwrap());
        assert_eq!(host_auth.address, "mail.example.com");
        assert!(store.journal().is_empty());
    }

    #[test]
    fn failed_persist_leaves_memory_unchanged() {
        let (store, mut host_auth) = fixtures();
        store.set_fail_writes(true);

        let result = apply_redirect(&store, &mut host_auth, Some("mail2.example.com"));
        assert!(result.is_err());
        assert_eq!(host_auth.address, "mail.example.com");
        assert_eq!(
            store.host_auth(HostAuthId(7)).unwrap().address,
            "mail.example.com"
        );
    }

    #[test]
    fn redirect_changes_fingerprint() {
        let (store, mut host_auth) = fixtures();
        let before = host_auth.fingerprint();
        apply_redirect(&store, &mut host_auth, Some("mail2.example.com")).unwrap();
        assert_ne!(before, host_auth.fingerprint());
    }
}
