use crate::domain::ports::{CartChange, ChangeNotifier};
use std::sync::mpsc::{sync_channel, Receiver, SyncSender, TrySendError};
use std::sync::Mutex;

/// Changes buffered per subscriber before newer ones are dropped.
pub const SUBSCRIBER_BACKLOG: usize = 256;

/// Fans each cart change out to every live subscriber.
///
/// Subscribers hold the receiving end of a bounded `mpsc` channel; dropping
/// it unsubscribes, and the dead sender is pruned on the next notification.
#[derive(Debug, Default)]
pub struct ChangeHub {
    subscribers: Mutex<Vec<SyncSender<CartChange>>>,
}

impl ChangeHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// A receiver that is never drained holds at most `SUBSCRIBER_BACKLOG`
    /// changes; later ones are dropped for it until it catches up.
    pub fn subscribe(&self) -> Receiver<CartChange> {
        let (tx, rx) = sync_channel(SUBSCRIBER_BACKLOG);
        match self.subscribers.lock() {
            Ok(mut subscribers) => subscribers.push(tx),
            Err(_) => tracing::warn!("change hub lock poisoned; subscriber will not receive events"),
        }
        rx
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().map(|s| s.len()).unwrap_or(0)
    }
}

impl ChangeNotifier for ChangeHub {
    fn notify(&self, change: &CartChange) {
        let Ok(mut subscribers) = self.subscribers.lock() else {
            tracing::warn!("change hub lock poisoned; dropping notification");
            return;
        };
        subscribers.retain(|tx| match tx.try_send(change.clone()) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                tracing::warn!("cart subscriber backlog full; dropping change");
                true
            }
            Err(TrySendError::Disconnected(_)) => false,
        });
        tracing::debug!("notified {} cart subscriber(s)", subscribers.len());
    }
}
