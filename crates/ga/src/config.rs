//! Tracking configuration and the merge-on-set configuration store.

use serde::{Deserialize, Serialize};
use std::sync::Mutex;

use tagrelay_core::error::{RelayError, RelayResult};
use tagrelay_core::types::CreateParams;

/// Base path prepended to tracked page-view URLs: detect it from the page
/// location, use a fixed path verbatim, or prepend nothing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum BasePath {
    Detect(bool),
    Fixed(String),
}

impl Default for BasePath {
    fn default() -> Self {
        BasePath::Detect(false)
    }
}

/// One page-view exclusion rule: a literal URL matched by equality, or a
/// regular expression matched against the URL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ExcludeRule {
    Literal(String),
    Pattern { pattern: String },
}

/// Tracking configuration. `tracking_id` is required for initialization to
/// succeed; everything else has a default.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GaConfig {
    /// Property id handed to the library's `create` call, e.g. "UA-xxxxxxxx-x".
    pub tracking_id: Option<String>,
    /// Extra `create` parameters; the literal "auto" when unset.
    pub create: Option<CreateParams>,
    /// Base path prepended to tracked page-view URLs.
    pub prepend_page_view_url: BasePath,
    /// URLs that should not be tracked.
    pub exclude_page_view: Vec<ExcludeRule>,
    /// Readiness poll cadence, in milliseconds.
    pub poll_interval_ms: u64,
    /// Overall readiness deadline. `None` polls until the library appears.
    pub init_timeout_ms: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            tracking_id: None,
            create: None,
            prepend_page_view_url: BasePath::default(),
            exclude_page_view: Vec::new(),
            poll_interval_ms: default_poll_interval_ms(),
            init_timeout_ms: None,
        }
    }
}

fn default_poll_interval_ms() -> u64 {
    100
}

/// Partial configuration, the input of [`ConfigStore::apply`]. A field left
/// unset keeps the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfigUpdate {
    pub tracking_id: Option<String>,
    pub create: Option<CreateParams>,
    pub prepend_page_view_url: Option<BasePath>,
    pub exclude_page_view: Option<Vec<ExcludeRule>>,
    pub poll_interval_ms: Option<u64>,
    pub init_timeout_ms: Option<u64>,
}

impl GaConfig {
    /// Merge a partial update, last write wins per field. A supplied list
    /// replaces the stored list wholesale. No validation happens here:
    /// an empty tracking id surfaces in the initialization gate, a bad
    /// exclusion pattern at filter construction.
    pub fn merge(&mut self, update: GaConfigUpdate) {
        if let Some(tracking_id) = update.tracking_id {
            self.tracking_id = Some(tracking_id);
        }
        if let Some(create) = update.create {
            self.create = Some(create);
        }
        if let Some(prepend) = update.prepend_page_view_url {
            self.prepend_page_view_url = prepend;
        }
        if let Some(exclude) = update.exclude_page_view {
            self.exclude_page_view = exclude;
        }
        if let Some(interval) = update.poll_interval_ms {
            self.poll_interval_ms = interval;
        }
        if let Some(timeout) = update.init_timeout_ms {
            self.init_timeout_ms = Some(timeout);
        }
    }

    /// Load configuration overrides from environment variables with the
    /// prefix `TAGRELAY__`, e.g. `TAGRELAY__TRACKING_ID=UA-xxxxxxxx-x`.
    pub fn from_env() -> RelayResult<Self> {
        let cfg = config::Config::builder()
            .add_source(
                config::Environment::with_prefix("TAGRELAY")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(","),
            )
            .build()
            .map_err(|e| RelayError::Config(e.to_string()))?;
        cfg.try_deserialize()
            .map_err(|e| RelayError::Config(e.to_string()))
    }
}

/// Configuration store with merge-on-set semantics. `apply` may be called
/// any number of times before the facade is built; the facade captures a
/// snapshot at construction and later updates do not reach it.
#[derive(Default)]
pub struct ConfigStore {
    inner: Mutex<GaConfig>,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(config: GaConfig) -> Self {
        Self {
            inner: Mutex::new(config),
        }
    }

    /// Merge a partial update into the stored configuration.
    pub fn apply(&self, update: GaConfigUpdate) {
        self.inner
            .lock()
            .expect("config store mutex poisoned")
            .merge(update);
    }

    /// Current configuration snapshot.
    pub fn snapshot(&self) -> GaConfig {
        self.inner
            .lock()
            .expect("config store mutex poisoned")
            .clone()
    }
}
