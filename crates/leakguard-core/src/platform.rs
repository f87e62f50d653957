//! Host UI boundary
//!
//! The pipeline never renders anything itself; it drives three narrow host
//! capabilities: a spinner, a toast, and a navigation reset used by the
//! auth-expiry handler. Hosts implement these against their own UI layer;
//! the no-op defaults keep the pipeline usable headless and in tests.

/// Platform spinner control, driven only on 0→1 / 1→0 transitions of the
/// shared loading counter
pub trait LoadingSink: Send + Sync {
    fn show_spinner(&self, label: &str);
    fn hide_spinner(&self);
}

/// Short-lived user notification for classified failures
pub trait Toaster: Send + Sync {
    fn toast(&self, message: &str);
}

/// Full navigation reset to an entry-point route
pub trait Navigator: Send + Sync {
    fn relaunch(&self, route: &str);
}

/// Headless implementation of all three host capabilities
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPlatform;

impl LoadingSink for NoopPlatform {
    fn show_spinner(&self, _label: &str) {}
    fn hide_spinner(&self) {}
}

impl Toaster for NoopPlatform {
    fn toast(&self, _message: &str) {}
}

impl Navigator for NoopPlatform {
    fn relaunch(&self, _route: &str) {}
}
