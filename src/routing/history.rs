//! Navigation history backends.
//!
//! The router never touches `window.history` directly — it talks to this
//! trait, which keeps the core testable without a browser. The `dom`
//! feature provides a `pushState`-backed implementation.

use std::cell::RefCell;
use std::rc::Rc;

/// A place navigation entries go.
pub trait History {
    /// Record a new entry for `url`.
    fn push(&mut self, url: &str);

    /// The URL of the current entry, or empty if there is none.
    fn current(&self) -> String;
}

/// In-memory history for native targets and tests.
///
/// Clones share the same entry list, so a test can keep a handle and
/// inspect what the router pushed.
#[derive(Debug, Clone, Default)]
pub struct MemoryHistory {
    entries: Rc<RefCell<Vec<String>>>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all pushed entries, oldest first.
    pub fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }
}

impl History for MemoryHistory {
    fn push(&mut self, url: &str) {
        self.entries.borrow_mut().push(url.to_string());
    }

    fn current(&self) -> String {
        self.entries.borrow().last().cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_history_records_entries() {
        let mut history = MemoryHistory::new();
        assert_eq!(history.current(), "");

        history.push("https://trade.oceanmark.one/#!/");
        history.push("https://trade.oceanmark.one/#!/trade/BTC-USDT");

        assert_eq!(history.entries().len(), 2);
        assert_eq!(
            history.current(),
            "https://trade.oceanmark.one/#!/trade/BTC-USDT"
        );
    }

    #[test]
    fn test_memory_history_clones_share_entries() {
        let mut history = MemoryHistory::new();
        let observer = history.clone();
        history.push("https://trade.oceanmark.one/#!/accounts");
        assert_eq!(observer.entries().len(), 1);
    }
}
