//! Mirrors device start/stop signals back into the shared config.

use crossbeam_channel::Receiver;
use tracing::info;
use vertcast_core::{OutputEvent, SharedConfig};

/// Listener applying [`OutputEvent`]s to `Config::vertical_output_enabled`.
///
/// The enable flag in the config reflects actual runtime state, not just
/// intent, so UI toggles stay truthful when the output fails or is stopped
/// from the network side. Routing the write through this listener keeps the
/// controller free of config knowledge and makes the feedback loop one-way:
/// a config write here never re-enters the controller.
pub struct ConfigSync {
    events: Receiver<OutputEvent>,
    config: SharedConfig,
}

impl ConfigSync {
    /// Wire a receiver to the shared config.
    pub fn new(events: Receiver<OutputEvent>, config: SharedConfig) -> Self {
        Self { events, config }
    }

    /// Drain and apply all pending events. Returns how many were applied.
    ///
    /// For hosts that pump listeners from their control loop.
    pub fn pump(&self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events.try_recv() {
            self.apply(event);
            applied += 1;
        }
        applied
    }

    /// Apply events until all senders disconnect.
    ///
    /// For hosts that dedicate a thread to config synchronization.
    pub fn run(&self) {
        while let Ok(event) = self.events.recv() {
            self.apply(event);
        }
    }

    fn apply(&self, event: OutputEvent) {
        match event {
            OutputEvent::Started => {
                self.config.write().vertical_output_enabled = true;
                info!("NDI vertical output started");
            }
            OutputEvent::Stopped => {
                self.config.write().vertical_output_enabled = false;
                info!("NDI vertical output stopped");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vertcast_core::{event_channel, Config};

    #[test]
    fn started_enables_regardless_of_prior_value() {
        let (tx, rx) = event_channel();
        let config = Config::default().into_shared();
        let sync = ConfigSync::new(rx, config.clone());

        tx.send(OutputEvent::Started).unwrap();
        assert_eq!(sync.pump(), 1);
        assert!(config.read().vertical_output_enabled);
    }

    #[test]
    fn stopped_disables() {
        let (tx, rx) = event_channel();
        let config = Config {
            vertical_output_enabled: true,
            ..Config::default()
        }
        .into_shared();
        let sync = ConfigSync::new(rx, config.clone());

        tx.send(OutputEvent::Stopped).unwrap();
        sync.pump();
        assert!(!config.read().vertical_output_enabled);
    }

    #[test]
    fn pump_on_empty_channel_applies_nothing() {
        let (_tx, rx) = event_channel();
        let config = Config::default().into_shared();
        let sync = ConfigSync::new(rx, config.clone());
        assert_eq!(sync.pump(), 0);
        assert!(!config.read().vertical_output_enabled);
    }

    #[test]
    fn pump_applies_events_in_order() {
        let (tx, rx) = event_channel();
        let config = Config::default().into_shared();
        let sync = ConfigSync::new(rx, config.clone());

        tx.send(OutputEvent::Started).unwrap();
        tx.send(OutputEvent::Stopped).unwrap();
        tx.send(OutputEvent::Started).unwrap();
        assert_eq!(sync.pump(), 3);
        assert!(config.read().vertical_output_enabled);
    }
}
