// Render backend selection: two fixed endpoints, switched only by explicit toggle.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::config::{HOSTED_ENDPOINT, LOCAL_ENDPOINT};
use crate::output::notify::{Notice, Notifier};

/// One of the two recognized render backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Hosted,
    Local,
}

impl Endpoint {
    /// Base URL render requests are issued against.
    pub fn base_url(&self) -> &'static str {
        match self {
            Endpoint::Hosted => HOSTED_ENDPOINT,
            Endpoint::Local => LOCAL_ENDPOINT,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Endpoint::Hosted => "hosted",
            Endpoint::Local => "local",
        }
    }

    fn other(self) -> Endpoint {
        match self {
            Endpoint::Hosted => Endpoint::Local,
            Endpoint::Local => Endpoint::Hosted,
        }
    }
}

/// Holds the currently selected backend. Sessions capture the selection
/// by value when they start, so a later toggle never retargets a request
/// already in flight.
pub struct HostSelector {
    active: Mutex<Endpoint>,
    notifier: Arc<dyn Notifier>,
}

impl HostSelector {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            active: Mutex::new(Endpoint::Hosted),
            notifier,
        }
    }

    /// Currently selected backend.
    pub fn active(&self) -> Endpoint {
        *self.active.lock()
    }

    /// Switch to the other backend and announce the new selection.
    pub fn toggle(&self) -> Endpoint {
        let now = {
            let mut active = self.active.lock();
            *active = active.other();
            *active
        };
        debug!("render backend toggled to {}", now.label());
        self.notifier.notify(Notice::Info(format!(
            "render backend switched to {} ({})",
            now.label(),
            now.base_url()
        )));
        now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<Notice>>);

    impl Notifier for Recorder {
        fn notify(&self, notice: Notice) {
            self.0.lock().push(notice);
        }
    }

    #[test]
    fn toggle_flips_selection_and_announces_it() {
        let recorder = Arc::new(Recorder::default());
        let selector = HostSelector::new(recorder.clone());

        assert_eq!(selector.active(), Endpoint::Hosted);
        assert_eq!(selector.toggle(), Endpoint::Local);
        assert_eq!(selector.active(), Endpoint::Local);
        assert_eq!(selector.toggle(), Endpoint::Hosted);

        let notices = recorder.0.lock();
        assert_eq!(notices.len(), 2);
        match &notices[0] {
            Notice::Info(msg) => assert!(msg.contains("local")),
            other => panic!("expected info notice, got {:?}", other),
        }
        match &notices[1] {
            Notice::Info(msg) => assert!(msg.contains("hosted")),
            other => panic!("expected info notice, got {:?}", other),
        }
    }
}
