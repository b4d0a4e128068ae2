//! Transport-level response classification.
//!
//! The first of two classification layers: the transport status code sorts
//! a response into a closed category set. A success-range response is then
//! inspected further through its payload, which can itself carry an in-band
//! command status (see [`pushmail_protocol::status`]) - the protocol allows
//! a security challenge to arrive either way.

/// Status code of a successful round.
pub const STATUS_OK: u16 = 200;
/// The client's credentials were rejected.
pub const STATUS_UNAUTHORIZED: u16 = 401;
/// Access denied pending security-policy acknowledgement.
pub const STATUS_FORBIDDEN: u16 = 403;
/// The device must (re-)provision before the server will talk to it.
pub const STATUS_NEED_PROVISIONING: u16 = 449;
/// The mailbox moved; the response names the new host.
pub const STATUS_REDIRECT: u16 = 451;

/// Category of a single round's response, derived from the transport
/// status code alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseCategory {
    /// Success range; the payload decides what happens next.
    Ok,
    /// The server demands a provisioning round.
    ProvisionError,
    /// Authentication failed.
    AuthError,
    /// The server asks the client to talk to a different host.
    RedirectError,
    /// Anything else.
    Other,
}

/// True when the status demands provisioning before further sync.
pub fn is_provision_error(status: u16) -> bool {
    status == STATUS_NEED_PROVISIONING || status == STATUS_FORBIDDEN
}

/// True when the status is an authentication failure.
pub fn is_auth_error(status: u16) -> bool {
    status == STATUS_UNAUTHORIZED
}

/// True when the status is a redirect instruction.
pub fn is_redirect_error(status: u16) -> bool {
    status == STATUS_REDIRECT
}

/// Sorts a transport status code into its category.
///
/// Checked in priority order: provisioning first (403 is a policy demand
/// here, not a login failure), then authentication, then redirect.
pub fn classify(status: u16) -> ResponseCategory {
    if is_provision_error(status) {
        ResponseCategory::ProvisionError
    } else if is_auth_error(status) {
        ResponseCategory::AuthError
    } else if is_redirect_error(status) {
        ResponseCategory::RedirectError
    } else if status == STATUS_OK {
        ResponseCategory::Ok
    } else {
        ResponseCategory::Other
    }
}
