//! Lifecycle event channel between the output controller and its listeners.

use crossbeam_channel::{unbounded, Receiver, Sender};

/// Notification forwarded from the output device's lifecycle signals.
///
/// These may be emitted from whatever thread the host's output machinery
/// runs its signals on; the channel decouples delivery from the control
/// thread that called `start()`/`stop()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputEvent {
    /// The output device reported a successful start
    Started,
    /// The output device reported that it stopped
    Stopped,
}

/// Create the event channel wiring a controller to its listeners.
///
/// Unbounded so device signal threads never block on a slow listener.
pub fn event_channel() -> (Sender<OutputEvent>, Receiver<OutputEvent>) {
    unbounded()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_arrive_in_order() {
        let (tx, rx) = event_channel();
        tx.send(OutputEvent::Started).unwrap();
        tx.send(OutputEvent::Stopped).unwrap();
        assert_eq!(rx.try_recv(), Ok(OutputEvent::Started));
        assert_eq!(rx.try_recv(), Ok(OutputEvent::Stopped));
        assert!(rx.try_recv().is_err());
    }
}
