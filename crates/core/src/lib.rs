pub mod client;
pub mod error;
pub mod types;

pub use client::{AnalyticsClient, ClientCall, NoOpClient, RecordingClient};
pub use error::{RelayError, RelayResult};
pub use types::{CreateParams, Hit, InitState};
