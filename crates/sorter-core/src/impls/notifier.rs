//! Notifier 実装

use tracing::info;

use crate::domain::Notice;
use crate::ports::Notifier;

/// Emits notices as `info` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        info!(notice = %notice.message(), "notice");
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _notice: Notice) {}
}
