//! Application configuration.
//!
//! # Example
//!
//! ```
//! use todo::TodoConfig;
//!
//! let config = TodoConfig::default()
//!     .with_filter_param("status")
//!     .with_date_format("%Y-%m-%d");
//! assert_eq!(config.filter_param, "status");
//! ```

use serde::{Deserialize, Serialize};

/// Query parameter holding the status filter
pub const DEFAULT_FILTER_PARAM: &str = "filter";

/// Short en-US date, e.g. `1/31/2025`
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Shown when the current filter leaves nothing to display
pub const DEFAULT_EMPTY_MESSAGE: &str = "There are no todos. Start adding.";

/// Configuration for [`TodoApp`](crate::app::TodoApp)
///
/// Every field has a default, so partial JSON documents deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TodoConfig {
    /// Name of the URL query parameter mirroring the filter
    pub filter_param: String,
    /// `chrono` format string for creation dates
    pub date_format: String,
    /// Message for an empty list view
    pub empty_message: String,
}

impl TodoConfig {
    /// Set the filter query parameter name
    #[must_use]
    pub fn with_filter_param(mut self, name: impl Into<String>) -> Self {
        self.filter_param = name.into();
        self
    }

    /// Set the creation date format
    #[must_use]
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    /// Set the empty list message
    #[must_use]
    pub fn with_empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }
}

impl Default for TodoConfig {
    fn default() -> Self {
        Self {
            filter_param: DEFAULT_FILTER_PARAM.to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn defaults() {
        let config = TodoConfig::default();
        assert_eq!(config.filter_param, "filter");
        assert_eq!(config.empty_message, "There are no todos. Start adding.");
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: TodoConfig = serde_json::from_str(r#"{"filter_param": "status"}"#).unwrap();
        assert_eq!(config.filter_param, "status");
        assert_eq!(config.date_format, DEFAULT_DATE_FORMAT);
    }

    #[test]
    fn builders() {
        let config = TodoConfig::default().with_empty_message("Nothing here");
        assert_eq!(config.empty_message, "Nothing here");
    }
}
