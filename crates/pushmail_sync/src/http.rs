//! HTTP transport implementation.
//!
//! The actual HTTP client is abstracted via a trait to allow different
//! implementations (reqwest, hyper, ureq, etc.) without tying the engine
//! to one of them. What this module owns is the request shape - command
//! URL, protocol headers, WBXML content type - and the connection-cache
//! rule: cached clients are keyed by the endpoint fingerprint, so a
//! redirect or credential change rebuilds the client instead of reusing a
//! connection bound to stale host state.

use crate::config::SyncConfig;
use crate::error::TransportResult;
use crate::response::WireResponse;
use crate::transport::{Endpoint, SyncTransport};
use parking_lot::Mutex;
use pushmail_store::Fingerprint;
use std::sync::Arc;
use tracing::debug;

/// Header naming the redirect target on a 451 response.
const REDIRECT_HEADER: &str = "X-MS-Location";

/// HTTP client abstraction.
///
/// One client represents connections to one host; it is rebuilt whenever
/// the endpoint fingerprint changes.
pub trait HttpClient: Send + Sync {
    /// Sends a POST request and returns the raw response.
    fn post(&self, url: &str, headers: &[(&str, String)], body: &[u8])
        -> TransportResult<RawResponse>;
}

/// An HTTP response before protocol interpretation.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body bytes.
    pub body: Vec<u8>,
    /// Response headers as (name, value) pairs.
    pub headers: Vec<(String, String)>,
}

impl RawResponse {
    /// Looks up a header value, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// HTTP-based sync transport.
///
/// Generic over the client and a connect function that builds a client for
/// an endpoint. The built client is cached and reused while the endpoint
/// fingerprint stays the same.
pub struct HttpTransport<C, F> {
    config: SyncConfig,
    connect: F,
    cached: Mutex<Option<(Fingerprint, Arc<C>)>>,
}

impl<C, F> HttpTransport<C, F>
where
    C: HttpClient,
    F: Fn(&Endpoint) -> TransportResult<C> + Send + Sync,
{
    /// Creates a transport that builds clients with `connect`.
    pub fn new(config: SyncConfig, connect: F) -> Self {
        Self {
            config,
            connect,
            cached: Mutex::new(None),
        }
    }

    fn client_for(&self, endpoint: &Endpoint) -> TransportResult<Arc<C>> {
        let mut cached = self.cached.lock();
        if let Some((fingerprint, client)) = cached.as_ref() {
            if *fingerprint == endpoint.fingerprint {
                return Ok(Arc::clone(client));
            }
            debug!(address = %endpoint.address, "endpoint changed, rebuilding client");
        }
        let client = Arc::new((self.connect)(endpoint)?);
        *cached = Some((endpoint.fingerprint, Arc::clone(&client)));
        Ok(client)
    }

    fn command_url(&self, endpoint: &Endpoint, command: &str) -> String {
        format!(
            "{}://{}:{}/Microsoft-Server-ActiveSync?Cmd={}&User={}&DeviceId={}&DeviceType={}",
            endpoint.scheme,
            endpoint.address,
            endpoint.port,
            command,
            endpoint.username,
            self.config.device_id,
            self.config.device_type,
        )
    }
}

impl<C, F> SyncTransport for HttpTransport<C, F>
where
    C: HttpClient,
    F: Fn(&Endpoint) -> TransportResult<C> + Send + Sync,
{
    fn send(&self, endpoint: &Endpoint, command: &str, body: &[u8]) -> TransportResult<WireResponse> {
        let client = self.client_for(endpoint)?;
        let url = self.command_url(endpoint, command);
        let headers = [
            ("MS-ASProtocolVersion", self.config.protocol_version.clone()),
            ("User-Agent", self.config.user_agent.clone()),
            (
                "Content-Type",
                "application/vnd.ms-sync.wbxml".to_owned(),
            ),
        ];

        let raw = client.post(&url, &headers, body)?;
        let redirect = raw.header(REDIRECT_HEADER).map(str::to_owned);
        Ok(WireResponse::new(raw.status, raw.body, redirect))
    }
}
