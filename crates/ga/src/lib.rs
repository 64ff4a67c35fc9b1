//! Google Analytics integration adapter — lazy library bootstrap behind a
//! one-shot initialization gate, with a tracking facade for page views,
//! events, and social interactions.
//!
//! # Modules
//!
//! - [`config`] — Tracking configuration and the merge-on-set config store
//! - [`prefix`] — Base-path resolution for tracked page-view URLs
//! - [`filter`] — Page-view exclusion rules
//! - [`host`] — Host-page boundary (script tag injection)
//! - [`gate`] — One-shot initialization state machine
//! - [`analytics`] — The tracking facade

pub mod analytics;
pub mod config;
pub mod filter;
pub mod gate;
pub mod host;
pub mod prefix;

pub use analytics::Analytics;
pub use config::{BasePath, ConfigStore, ExcludeRule, GaConfig, GaConfigUpdate};
pub use filter::PageViewFilter;
pub use gate::{InitGate, Tracker};
pub use host::{RecordingHost, ScriptHost, ScriptTag};
