//! Parser configuration
//!
//! Controls how strictly inbound values are held to the JSON-RPC 2.0 shape
//! rules. The defaults are lenient about empty method names and strict about
//! the version marker.

/// Validation switches consulted while parsing entities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Require `"jsonrpc": "2.0"` on requests, notifications and responses
    pub require_version: bool,

    /// Accept `"method": ""` on requests and notifications
    pub allow_empty_method: bool,

    /// Parse an array found inside a batch as a nested batch instead of
    /// recording it as a failed element
    pub allow_nested_batch: bool,
}

impl ParserConfig {
    /// Create the default (lenient) configuration
    pub fn new() -> Self {
        Self {
            require_version: true,
            allow_empty_method: true,
            allow_nested_batch: false,
        }
    }

    /// Configuration that also rejects empty method names
    pub fn strict() -> Self {
        Self::new().allow_empty_method(false)
    }

    pub fn require_version(mut self, require: bool) -> Self {
        self.require_version = require;
        self
    }

    pub fn allow_empty_method(mut self, allow: bool) -> Self {
        self.allow_empty_method = allow;
        self
    }

    pub fn allow_nested_batch(mut self, allow: bool) -> Self {
        self.allow_nested_batch = allow;
        self
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::new()
    }
}
