//! Analytics client capability — trait for the external collection library.
//!
//! The library is ambient global state in the page it normally ships to, and
//! its entry point appears asynchronously after its script tag loads. Modules
//! here accept an `Arc<dyn AnalyticsClient>` instead of reaching for a global,
//! so readiness and every forwarded call are observable in tests.

use crate::types::{CreateParams, Hit};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Call surface of the external collection library. `available` mirrors the
/// presence check on the library's global entry point; the rest mirror its
/// `create` / `set('page', ...)` / `send(...)` operations. Calls are
/// fire-and-forget: the library reports nothing back.
pub trait AnalyticsClient: Send + Sync {
    /// Whether the library's entry point exists yet.
    fn available(&self) -> bool;

    /// Create the tracker for a property.
    fn create(&self, tracking_id: &str, params: &CreateParams);

    /// Set the current page for subsequent hits.
    fn set_page(&self, url: &str);

    /// Send one hit.
    fn send(&self, hit: Hit);
}

/// No-op client for embedders that want tracking disabled outright. Always
/// available so the gate resolves immediately.
pub struct NoOpClient;

impl AnalyticsClient for NoOpClient {
    fn available(&self) -> bool {
        true
    }
    fn create(&self, _tracking_id: &str, _params: &CreateParams) {}
    fn set_page(&self, _url: &str) {}
    fn send(&self, _hit: Hit) {}
}

/// One recorded call into the client.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientCall {
    Create {
        tracking_id: String,
        params: CreateParams,
    },
    SetPage(String),
    Send(Hit),
}

/// In-memory client that captures calls for testing. Starts unavailable so
/// tests can exercise the readiness poll; flip with
/// [`RecordingClient::make_available`].
#[derive(Default)]
pub struct RecordingClient {
    available: AtomicBool,
    calls: Mutex<Vec<ClientCall>>,
}

impl RecordingClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// A client whose entry point is observable from the start.
    pub fn available_now() -> Self {
        let client = Self::new();
        client.available.store(true, Ordering::SeqCst);
        client
    }

    pub fn make_available(&self) {
        self.available.store(true, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<ClientCall> {
        self.calls.lock().expect("client call log mutex poisoned").clone()
    }

    pub fn count(&self) -> usize {
        self.calls.lock().expect("client call log mutex poisoned").len()
    }

    /// Hits passed to `send`, in call order.
    pub fn sent(&self) -> Vec<Hit> {
        self.calls
            .lock()
            .expect("client call log mutex poisoned")
            .iter()
            .filter_map(|call| match call {
                ClientCall::Send(hit) => Some(hit.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.calls.lock().expect("client call log mutex poisoned").clear();
    }
}

impl AnalyticsClient for RecordingClient {
    fn available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    fn create(&self, tracking_id: &str, params: &CreateParams) {
        self.calls
            .lock()
            .expect("client call log mutex poisoned")
            .push(ClientCall::Create {
                tracking_id: tracking_id.to_string(),
                params: params.clone(),
            });
    }

    fn set_page(&self, url: &str) {
        self.calls
            .lock()
            .expect("client call log mutex poisoned")
            .push(ClientCall::SetPage(url.to_string()));
    }

    fn send(&self, hit: Hit) {
        self.calls
            .lock()
            .expect("client call log mutex poisoned")
            .push(ClientCall::Send(hit));
    }
}

/// Convenience: a no-op client for embedders with tracking disabled.
pub fn noop_client() -> Arc<dyn AnalyticsClient> {
    Arc::new(NoOpClient)
}

/// Convenience: a recording client for tests.
pub fn recording_client() -> Arc<RecordingClient> {
    Arc::new(RecordingClient::new())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_client_captures_calls() {
        let client = recording_client();
        assert!(!client.available());
        client.make_available();
        assert!(client.available());

        client.create("UA-1234-1", &CreateParams::auto());
        client.set_page("/home");
        client.send(Hit::PageView { url: "/home".into() });

        let calls = client.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(
            calls[0],
            ClientCall::Create {
                tracking_id: "UA-1234-1".into(),
                params: CreateParams::auto(),
            }
        );
        assert_eq!(client.sent(), vec![Hit::PageView { url: "/home".into() }]);
    }

    #[test]
    fn test_noop_client() {
        let client = noop_client();
        assert!(client.available());
        // Should not panic
        client.send(Hit::PageView { url: "/".into() });
    }
}
