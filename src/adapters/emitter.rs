use crate::domain::model::StatusEvent;
use crate::domain::ports::EventEmitter;
use tokio::sync::broadcast;

const DEFAULT_CAPACITY: usize = 256;

/// In-process real-time channel for board events.
#[derive(Debug, Clone)]
pub struct BroadcastEmitter {
    sender: broadcast::Sender<StatusEvent>,
}

impl BroadcastEmitter {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StatusEvent> {
        self.sender.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for BroadcastEmitter {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl EventEmitter for BroadcastEmitter {
    fn emit(&self, event: &StatusEvent) {
        // No subscribers is not an error.
        if self.sender.send(event.clone()).is_err() {
            tracing::trace!("No subscribers for '{}' event", event.channel());
        }
    }
}
