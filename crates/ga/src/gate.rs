//! One-shot initialization gate for the collection library.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use tagrelay_core::client::AnalyticsClient;
use tagrelay_core::error::{RelayError, RelayResult};
use tagrelay_core::types::{CreateParams, Hit, InitState};

use crate::config::GaConfig;
use crate::host::{ScriptHost, ScriptTag};

/// Handle to the created tracker, resolved by [`InitGate::init`]. Cheap to
/// clone; forwards to the underlying client.
#[derive(Clone)]
pub struct Tracker {
    client: Arc<dyn AnalyticsClient>,
    tracking_id: String,
}

impl std::fmt::Debug for Tracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tracker")
            .field("tracking_id", &self.tracking_id)
            .finish_non_exhaustive()
    }
}

impl Tracker {
    pub fn tracking_id(&self) -> &str {
        &self.tracking_id
    }

    /// Set the current page for subsequent hits.
    pub fn set_page(&self, url: &str) {
        self.client.set_page(url);
    }

    /// Send one hit.
    pub fn send(&self, hit: Hit) {
        self.client.send(hit);
    }
}

/// Idempotent one-shot bootstrap of the collection library.
///
/// The first `init` call transitions `Uninitialized → Pending`, injects the
/// library's script tag (at most one, keyed by element id) and polls for the
/// library's entry point; readiness creates the tracker and the gate becomes
/// `Ready`. A missing tracking id, or an elapsed readiness deadline when one
/// is configured, makes the gate `Failed`. Both outcomes are terminal:
/// every later call, concurrent or not, shares the cached result. There is
/// never a second script tag and never a second `create`.
pub struct InitGate {
    config: GaConfig,
    client: Arc<dyn AnalyticsClient>,
    host: Arc<dyn ScriptHost>,
    cell: OnceCell<Result<Tracker, RelayError>>,
    state: Mutex<InitState>,
}

impl InitGate {
    pub fn new(
        config: GaConfig,
        client: Arc<dyn AnalyticsClient>,
        host: Arc<dyn ScriptHost>,
    ) -> Self {
        Self {
            config,
            client,
            host,
            cell: OnceCell::new(),
            state: Mutex::new(InitState::Uninitialized),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> InitState {
        *self.state.lock().expect("init state mutex poisoned")
    }

    fn set_state(&self, next: InitState) {
        *self.state.lock().expect("init state mutex poisoned") = next;
    }

    /// Resolve the shared initialization outcome, bootstrapping on the first
    /// call. Waiters wake in arrival order once the outcome settles.
    ///
    /// If the caller that won the bootstrap drops its future mid-flight,
    /// another waiter restarts the bootstrap; script injection stays
    /// idempotent by element id.
    pub async fn init(&self) -> RelayResult<Tracker> {
        self.cell.get_or_init(|| self.bootstrap()).await.clone()
    }

    async fn bootstrap(&self) -> Result<Tracker, RelayError> {
        self.set_state(InitState::Pending);

        let tracking_id = match self.config.tracking_id.as_deref() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => {
                // Reject without touching the page: no script tag, no polling.
                warn!("analytics init failed: no tracking id configured");
                self.set_state(InitState::Failed);
                return Err(RelayError::TrackingIdMissing);
            }
        };

        self.ensure_script_tag();

        if let Some(timeout_ms) = self.config.init_timeout_ms {
            let deadline = Duration::from_millis(timeout_ms);
            if tokio::time::timeout(deadline, self.wait_for_library())
                .await
                .is_err()
            {
                warn!(waited_ms = timeout_ms, "analytics library never became ready");
                self.set_state(InitState::Failed);
                return Err(RelayError::InitTimeout {
                    waited_ms: timeout_ms,
                });
            }
        } else {
            self.wait_for_library().await;
        }

        let params = self.config.create.clone().unwrap_or_else(CreateParams::auto);
        self.client.create(&tracking_id, &params);
        self.set_state(InitState::Ready);
        info!(tracking_id = %tracking_id, "analytics tracker created");

        Ok(Tracker {
            client: Arc::clone(&self.client),
            tracking_id,
        })
    }

    /// Insert the library's script tag unless an element with its id already
    /// exists. Keyed by id only; an existing tag with a different source is
    /// left alone.
    fn ensure_script_tag(&self) {
        let tag = ScriptTag::sdk();
        if self.host.has_script(&tag.id) {
            debug!(id = %tag.id, "script tag already present, skipping injection");
            return;
        }
        debug!(id = %tag.id, src = %tag.src, "injecting analytics script tag");
        self.host.inject_script(tag);
    }

    /// Poll until the library's entry point is observable. The first tick
    /// fires immediately, so an already-loaded library resolves without
    /// waiting a full cadence.
    async fn wait_for_library(&self) {
        // interval() panics on a zero period
        let period = Duration::from_millis(self.config.poll_interval_ms.max(1));
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            if self.client.available() {
                return;
            }
        }
    }
}
