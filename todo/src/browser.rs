//! [`Location`] port over the real browser (`browser` feature).

use todosync_core::environment::{Location, LocationError};
use wasm_bindgen::JsValue;

/// `window.location` for reads, `window.history.replaceState` for writes
#[derive(Debug, Clone)]
pub struct BrowserLocation {
    window: web_sys::Window,
}

impl BrowserLocation {
    /// Bind to the global `window`
    ///
    /// # Errors
    ///
    /// [`LocationError::Unavailable`] outside a browsing context (workers, tests).
    pub fn new() -> Result<Self, LocationError> {
        web_sys::window()
            .map(|window| Self { window })
            .ok_or_else(|| LocationError::Unavailable("no global `window`".to_string()))
    }

    fn read<F>(&self, part: &'static str, f: F) -> String
    where
        F: FnOnce(&web_sys::Location) -> Result<String, JsValue>,
    {
        f(&self.window.location()).unwrap_or_else(|error| {
            tracing::warn!(part, error = %describe(&error), "Failed to read location");
            String::new()
        })
    }
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

impl Location for BrowserLocation {
    fn pathname(&self) -> String {
        self.read("pathname", web_sys::Location::pathname)
    }

    fn search(&self) -> String {
        self.read("search", web_sys::Location::search)
    }

    fn hash(&self) -> String {
        self.read("hash", web_sys::Location::hash)
    }

    fn replace_state(&mut self, url: &str) -> Result<(), LocationError> {
        let history = self
            .window
            .history()
            .map_err(|error| LocationError::Unavailable(describe(&error)))?;

        history
            .replace_state_with_url(&JsValue::NULL, "", Some(url))
            .map_err(|error| LocationError::HistoryRejected(describe(&error)))
    }
}
