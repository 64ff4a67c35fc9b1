//! Host-page boundary — where the collection library's script tag lives.

use std::sync::Mutex;

/// Element id of the injected script tag. Injection is idempotent by this id.
pub const SCRIPT_ID: &str = "ga-js";

/// Well-known source of the collection library, protocol-relative as the
/// library documents it.
pub const SCRIPT_SRC: &str = "//www.google-analytics.com/analytics.js";

/// An asynchronous script element to be inserted into the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptTag {
    pub id: String,
    pub src: String,
    pub async_load: bool,
}

impl ScriptTag {
    /// The collection library's own tag.
    pub fn sdk() -> Self {
        Self {
            id: SCRIPT_ID.into(),
            src: SCRIPT_SRC.into(),
            async_load: true,
        }
    }
}

/// Document surface the adapter needs: the current location, an element-id
/// lookup, and script insertion. Implementors must insert the element
/// immediately before the first existing script element in document order.
pub trait ScriptHost: Send + Sync {
    /// Absolute URL of the current page.
    fn location(&self) -> String;

    /// Whether an element with this id already exists in the document.
    fn has_script(&self, id: &str) -> bool;

    fn inject_script(&self, tag: ScriptTag);
}

/// In-memory host that records injected tags for testing.
pub struct RecordingHost {
    location: String,
    injected: Mutex<Vec<ScriptTag>>,
}

impl RecordingHost {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            injected: Mutex::new(Vec::new()),
        }
    }

    pub fn injected(&self) -> Vec<ScriptTag> {
        self.injected.lock().expect("script log mutex poisoned").clone()
    }

    pub fn injected_count(&self) -> usize {
        self.injected.lock().expect("script log mutex poisoned").len()
    }
}

impl ScriptHost for RecordingHost {
    fn location(&self) -> String {
        self.location.clone()
    }

    fn has_script(&self, id: &str) -> bool {
        self.injected
            .lock()
            .expect("script log mutex poisoned")
            .iter()
            .any(|tag| tag.id == id)
    }

    fn inject_script(&self, tag: ScriptTag) {
        self.injected.lock().expect("script log mutex poisoned").push(tag);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sdk_tag() {
        let tag = ScriptTag::sdk();
        assert_eq!(tag.id, "ga-js");
        assert_eq!(tag.src, "//www.google-analytics.com/analytics.js");
        assert!(tag.async_load);
    }

    #[test]
    fn test_recording_host_lookup_by_id() {
        let host = RecordingHost::new("http://example.com/");
        assert!(!host.has_script(SCRIPT_ID));

        host.inject_script(ScriptTag::sdk());
        assert!(host.has_script(SCRIPT_ID));
        assert!(!host.has_script("other"));
        assert_eq!(host.injected_count(), 1);
    }
}
