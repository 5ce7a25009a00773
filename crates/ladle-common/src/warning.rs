//! Parser and query warnings.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! Messages are routed through the `log` facade at `warn` level, so the
//! embedding binary decides whether and where they are printed.

use std::collections::HashSet;
use std::sync::Mutex;

/// Global set of warnings we've already emitted (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about a recoverable problem (logged once per unique message)
///
/// # Example
/// ```
/// ladle_common::warning::warn_once("HTML Tokenizer", "duplicate attribute 'class'");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    // A poisoned lock only means another thread panicked mid-insert; the set
    // itself is still usable.
    let should_log = WARNED
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_log {
        log::warn!(target: "ladle", "[{component}] {message}");
    }
}

/// Forget every recorded warning, so the next document reports its own.
pub fn clear_warnings() {
    let mut guard = WARNED
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

/// Whether `message` from `component` has already been warned about.
#[must_use]
pub fn was_warned(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    WARNED
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .as_ref()
        .is_some_and(|set| set.contains(&key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warn_once_records_until_cleared() {
        // One test: the warned set is process-wide.
        warn_once("Test", "recorded once");
        assert!(was_warned("Test", "recorded once"));
        assert!(!was_warned("Test", "never emitted"));

        clear_warnings();
        assert!(!was_warned("Test", "recorded once"));
    }
}
