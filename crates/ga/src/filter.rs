//! Page-view exclusion.

use regex::Regex;

use tagrelay_core::error::{RelayError, RelayResult};

use crate::config::ExcludeRule;

#[derive(Debug)]
enum CompiledRule {
    Literal(String),
    Pattern(Regex),
}

/// Decides, per URL, whether a page view is suppressed. Literal rules match
/// by exact equality, pattern rules by regex test; the first match wins.
#[derive(Debug)]
pub struct PageViewFilter {
    rules: Vec<CompiledRule>,
}

impl PageViewFilter {
    /// Compile the configured rules once. A pattern that fails to compile is
    /// a configuration error.
    pub fn new(rules: &[ExcludeRule]) -> RelayResult<Self> {
        let mut compiled = Vec::with_capacity(rules.len());
        for rule in rules {
            match rule {
                ExcludeRule::Literal(url) => compiled.push(CompiledRule::Literal(url.clone())),
                ExcludeRule::Pattern { pattern } => {
                    let regex = Regex::new(pattern).map_err(|e| {
                        RelayError::Config(format!("invalid exclude pattern '{}': {}", pattern, e))
                    })?;
                    compiled.push(CompiledRule::Pattern(regex));
                }
            }
        }
        Ok(Self { rules: compiled })
    }

    pub fn is_excluded(&self, url: &str) -> bool {
        self.rules.iter().any(|rule| match rule {
            CompiledRule::Literal(candidate) => candidate == url,
            CompiledRule::Pattern(regex) => regex.is_match(url),
        })
    }
}
