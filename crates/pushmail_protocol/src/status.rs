//! In-band command status codes.
//!
//! An otherwise-successful response can carry one of these statuses in its
//! payload instead of sync data. They arrive through the parser as a typed
//! error; the predicates here group them the way the engine reacts to them.

/// The user is not allowed to sync with this device.
pub const USER_DISABLED_FOR_SYNC: u16 = 126;
/// Syncing is disabled for every user on the server.
pub const USERS_DISABLED_FOR_SYNC: u16 = 127;
/// The mailbox lives on a server too old to sync.
pub const USER_ON_LEGACY_SERVER: u16 = 128;
/// The device is quarantined pending administrator approval.
pub const DEVICE_QUARANTINED: u16 = 129;
/// The user is not permitted to use this protocol.
pub const ACCESS_DENIED: u16 = 130;
/// The user's account is disabled.
pub const ACCOUNT_DISABLED: u16 = 131;

/// Server-side sync state is corrupt; the cursor must be reset.
pub const SYNC_STATE_CORRUPT: u16 = 134;
/// The supplied sync key is not valid for this mailbox.
pub const SYNC_STATE_INVALID: u16 = 136;

/// The server requested a remote wipe.
pub const NEEDS_PROVISIONING_WIPE: u16 = 140;
/// The device has not been provisioned.
pub const NEEDS_PROVISIONING: u16 = 142;
/// The security policy changed and must be re-acknowledged.
pub const NEEDS_PROVISIONING_REFRESH: u16 = 143;
/// The policy key sent with the request is no longer valid.
pub const NEEDS_PROVISIONING_INVALID: u16 = 144;

/// True when the status demands a provisioning round before further sync.
pub fn is_needs_provisioning(status: u16) -> bool {
    matches!(
        status,
        NEEDS_PROVISIONING_WIPE
            | NEEDS_PROVISIONING
            | NEEDS_PROVISIONING_REFRESH
            | NEEDS_PROVISIONING_INVALID
    )
}

/// True when the status means the sync key must be discarded.
pub fn is_bad_sync_key(status: u16) -> bool {
    matches!(status, SYNC_STATE_CORRUPT | SYNC_STATE_INVALID)
}

/// True when the status is a hard access denial.
pub fn is_denied_access(status: u16) -> bool {
    (USER_DISABLED_FOR_SYNC..=ACCOUNT_DISABLED).contains(&status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provisioning_group() {
        for status in [140, 142, 143, 144] {
            assert!(is_needs_provisioning(status), "{status}");
        }
        assert!(!is_needs_provisioning(141));
        assert!(!is_needs_provisioning(1));
    }

    #[test]
    fn bad_sync_key_group() {
        assert!(is_bad_sync_key(SYNC_STATE_CORRUPT));
        assert!(is_bad_sync_key(SYNC_STATE_INVALID));
        assert!(!is_bad_sync_key(135));
    }

    #[test]
    fn denied_access_group() {
        assert!(is_denied_access(ACCESS_DENIED));
        assert!(is_denied_access(USER_DISABLED_FOR_SYNC));
        assert!(!is_denied_access(132));
        assert!(!is_denied_access(125));
    }
}
