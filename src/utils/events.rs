use parking_lot::Mutex;
use tokio::sync::broadcast;
use crate::model::events::PasswordChanged;

// Sized for a burst of subscribers lagging behind - events are tiny.
const CHANNEL_CAPACITY: usize = 256;

///
/// The in-process domain event bus.
///
/// Successful password changes are appended to an audit log and fanned out to
/// any live subscribers. There is no delivery guarantee to subscribers - the
/// audit log is the durable record for this process.
///
pub struct EventBus {
    sender: broadcast::Sender<PasswordChanged>,
    log: Mutex<Vec<PasswordChanged>>,
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, _receiver) = broadcast::channel(CHANNEL_CAPACITY);
        EventBus { sender, log: Mutex::new(Vec::new()) }
    }

    ///
    /// Record the event and notify any subscribers.
    ///
    pub fn publish(&self, event: PasswordChanged) {
        tracing::info!("Publishing PasswordChanged for {}", event.email);

        self.log.lock().push(event.clone());

        // A send error just means nobody is subscribed right now.
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PasswordChanged> {
        self.sender.subscribe()
    }

    ///
    /// A snapshot of every event published since start-up, in publish order.
    ///
    pub fn log(&self) -> Vec<PasswordChanged> {
        self.log.lock().clone()
    }
}
