//! Tracking facade — the public surface of the adapter.

use std::sync::Arc;

use tracing::debug;

use tagrelay_core::client::AnalyticsClient;
use tagrelay_core::error::RelayResult;
use tagrelay_core::types::{Hit, InitState};

use crate::config::GaConfig;
use crate::filter::PageViewFilter;
use crate::gate::{InitGate, Tracker};
use crate::host::ScriptHost;
use crate::prefix::resolve_base_path;

/// Google Analytics adapter facade. Construct once per process with the host
/// environment's capabilities; every tracking call awaits the shared
/// initialization gate before forwarding to the library, and surfaces the
/// gate's error instead of dropping the signal silently.
pub struct Analytics {
    gate: InitGate,
    filter: PageViewFilter,
    base_path: String,
}

impl Analytics {
    /// Build the facade from a configuration snapshot. Compiles the exclusion
    /// rules and resolves the page-view base path from the host's current
    /// location; both are fixed for the facade's lifetime.
    pub fn new(
        config: GaConfig,
        client: Arc<dyn AnalyticsClient>,
        host: Arc<dyn ScriptHost>,
    ) -> RelayResult<Self> {
        let filter = PageViewFilter::new(&config.exclude_page_view)?;
        let base_path = resolve_base_path(&config.prepend_page_view_url, &host.location());
        Ok(Self {
            gate: InitGate::new(config, client, host),
            filter,
            base_path,
        })
    }

    /// Eagerly run (or join) initialization. Tracking calls do this on
    /// demand; embedders can call it at startup to warm the gate.
    pub async fn init(&self) -> RelayResult<Tracker> {
        self.gate.init().await
    }

    /// Lifecycle state of the initialization gate.
    pub fn state(&self) -> InitState {
        self.gate.state()
    }

    /// Base path prepended to tracked page-view URLs.
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Track a page view. An excluded URL is dropped before initialization
    /// is even consulted; nothing ever reaches the library for it.
    pub async fn track_page_view(&self, url: &str) -> RelayResult<()> {
        if self.filter.is_excluded(url) {
            debug!(url, "page view excluded");
            return Ok(());
        }

        let tracker = self.gate.init().await?;
        let full_url = format!("{}{}", self.base_path, url);
        tracker.set_page(&full_url);
        tracker.send(Hit::PageView { url: full_url });
        Ok(())
    }

    /// Track an event. All four arguments are forwarded verbatim.
    pub async fn track_event(
        &self,
        category: impl Into<String>,
        action: impl Into<String>,
        label: Option<String>,
        value: Option<i64>,
    ) -> RelayResult<()> {
        let tracker = self.gate.init().await?;
        tracker.send(Hit::Event {
            category: category.into(),
            action: action.into(),
            label,
            value,
        });
        Ok(())
    }

    /// Track a social interaction. `value` is an optional structured payload,
    /// e.g. `{"page": "/products"}`.
    pub async fn track_social(
        &self,
        network: impl Into<String>,
        action: impl Into<String>,
        url: impl Into<String>,
        value: Option<serde_json::Value>,
    ) -> RelayResult<()> {
        let tracker = self.gate.init().await?;
        tracker.send(Hit::Social {
            network: network.into(),
            action: action.into(),
            url: url.into(),
            value,
        });
        Ok(())
    }
}
