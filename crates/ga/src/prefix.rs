//! Base-path resolution for tracked page-view URLs.

use tracing::debug;
use url::Url;

use crate::config::BasePath;

/// Compute the string prepended to every tracked page-view URL. Runs once at
/// facade construction; the result is immutable afterwards.
///
/// Detection takes everything after the scheme and host of `location` (path
/// and query, fragment dropped) and trims trailing `/`. Example: for
/// `http://example.com/path/to/#!/app/` the base path is `/path/to`. A
/// location that cannot be parsed, or one with nothing after the host,
/// resolves to the empty prefix.
pub fn resolve_base_path(base: &BasePath, location: &str) -> String {
    match base {
        BasePath::Detect(false) => String::new(),
        BasePath::Fixed(path) => path.clone(),
        BasePath::Detect(true) => detect(location),
    }
}

fn detect(location: &str) -> String {
    let parsed = match Url::parse(location) {
        Ok(url) => url,
        Err(err) => {
            debug!(location, error = %err, "unparseable page location, using empty base path");
            return String::new();
        }
    };

    let mut path = parsed.path().to_string();
    if let Some(query) = parsed.query() {
        path.push('?');
        path.push_str(query);
    }

    path.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_strips_fragment_and_trailing_slash() {
        let base = resolve_base_path(
            &BasePath::Detect(true),
            "http://example.com/path/to/#!/app/",
        );
        assert_eq!(base, "/path/to");
    }

    #[test]
    fn test_detect_keeps_file_component() {
        let base = resolve_base_path(
            &BasePath::Detect(true),
            "http://example.com/path/to/index.html#!/app/",
        );
        assert_eq!(base, "/path/to/index.html");
    }

    #[test]
    fn test_detect_without_fragment() {
        let base = resolve_base_path(&BasePath::Detect(true), "https://example.com/docs/");
        assert_eq!(base, "/docs");
    }

    #[test]
    fn test_detect_keeps_query() {
        let base = resolve_base_path(
            &BasePath::Detect(true),
            "http://example.com/app/?lang=en#home",
        );
        assert_eq!(base, "/app/?lang=en");
    }

    #[test]
    fn test_host_only_location_fails_closed() {
        let base = resolve_base_path(&BasePath::Detect(true), "http://example.com");
        assert_eq!(base, "");
    }

    #[test]
    fn test_garbage_location_fails_closed() {
        let base = resolve_base_path(&BasePath::Detect(true), "not a url");
        assert_eq!(base, "");
    }

    #[test]
    fn test_disabled() {
        let base = resolve_base_path(&BasePath::Detect(false), "http://example.com/path/");
        assert_eq!(base, "");
    }

    #[test]
    fn test_fixed_is_verbatim() {
        // No trimming on a configured path, trailing slash included.
        let base = resolve_base_path(&BasePath::Fixed("/base/".into()), "http://example.com/x/");
        assert_eq!(base, "/base/");
    }
}
