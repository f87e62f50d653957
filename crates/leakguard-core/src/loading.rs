//! Reference-counted loading indicator
//!
//! Concurrent requests share one visible spinner: the platform sink is
//! invoked only when the counter transitions 0→1 and 1→0. Release is tied
//! to a guard's `Drop` so it runs on every exit path of a request, and the
//! counter never goes negative: a `hide` beyond the outstanding `show`
//! calls is a no-op.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::platform::LoadingSink;

/// Process-wide spinner coordinator
pub struct LoadingIndicator {
    count: AtomicUsize,
    sink: Arc<dyn LoadingSink>,
}

impl LoadingIndicator {
    pub fn new(sink: Arc<dyn LoadingSink>) -> Self {
        Self {
            count: AtomicUsize::new(0),
            sink,
        }
    }

    /// Increment the counter, showing the spinner on the 0→1 transition.
    /// When requests race, whichever call performs that transition supplies
    /// the visible label.
    pub fn show(&self, label: &str) {
        if self.count.fetch_add(1, Ordering::SeqCst) == 0 {
            self.sink.show_spinner(label);
        }
    }

    /// Decrement the counter, hiding the spinner on the 1→0 transition.
    /// Guarded at zero.
    pub fn hide(&self) {
        let previous = self
            .count
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |current| {
                current.checked_sub(1)
            });
        if previous == Ok(1) {
            self.sink.hide_spinner();
        }
    }

    /// Number of requests currently holding the indicator
    pub fn active(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Acquire the indicator for the duration of the returned guard
    pub fn acquire(self: &Arc<Self>, label: &str) -> LoadingGuard {
        self.show(label);
        LoadingGuard {
            indicator: Arc::clone(self),
        }
    }
}

/// Scoped hold on the loading indicator; dropping it releases exactly once
pub struct LoadingGuard {
    indicator: Arc<LoadingIndicator>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.indicator.hide();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        events: Mutex<Vec<String>>,
    }

    impl LoadingSink for RecordingSink {
        fn show_spinner(&self, label: &str) {
            self.events.lock().unwrap().push(format!("show:{label}"));
        }
        fn hide_spinner(&self) {
            self.events.lock().unwrap().push("hide".to_string());
        }
    }

    fn indicator() -> (Arc<LoadingIndicator>, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::default());
        (Arc::new(LoadingIndicator::new(sink.clone())), sink)
    }

    #[test]
    fn test_single_show_hide_cycle() {
        let (indicator, sink) = indicator();
        indicator.show("Loading...");
        indicator.hide();

        assert_eq!(
            *sink.events.lock().unwrap(),
            vec!["show:Loading...".to_string(), "hide".to_string()]
        );
    }

    #[test]
    fn test_concurrent_holders_share_one_spinner() {
        let (indicator, sink) = indicator();
        indicator.show("first");
        indicator.show("second");
        indicator.show("third");
        indicator.hide();
        indicator.hide();
        indicator.hide();

        // one show with the transition winner's label, one hide
        assert_eq!(
            *sink.events.lock().unwrap(),
            vec!["show:first".to_string(), "hide".to_string()]
        );
    }

    #[test]
    fn test_hide_beyond_zero_is_noop() {
        let (indicator, sink) = indicator();
        indicator.hide();
        indicator.hide();
        assert_eq!(indicator.active(), 0);
        assert!(sink.events.lock().unwrap().is_empty());

        // the counter still works normally afterwards
        indicator.show("x");
        assert_eq!(indicator.active(), 1);
        indicator.hide();
        assert_eq!(indicator.active(), 0);
    }

    #[test]
    fn test_guard_releases_on_drop() {
        let (indicator, sink) = indicator();
        {
            let _guard = indicator.acquire("scoped");
            assert_eq!(indicator.active(), 1);
        }
        assert_eq!(indicator.active(), 0);
        assert_eq!(
            *sink.events.lock().unwrap(),
            vec!["show:scoped".to_string(), "hide".to_string()]
        );
    }

    #[test]
    fn test_guard_releases_on_panic() {
        let (indicator, _sink) = indicator();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = indicator.acquire("doomed");
            panic!("handler blew up");
        }));

        assert!(result.is_err());
        assert_eq!(indicator.active(), 0);
    }
}
