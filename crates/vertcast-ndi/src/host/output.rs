//! Output device creation and control.

use crossbeam_channel::Sender;
use vertcast_core::OutputEvent;

use super::MediaBinding;
use crate::error::Result;

/// Settings handed to the host when creating an output device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSettings {
    /// NDI source name advertised on the network
    pub ndi_name: String,
    /// Comma-separated NDI groups, empty for the default group
    pub ndi_groups: String,
    /// Whether the output consumes an audio feed
    pub uses_audio: bool,
}

/// Host factory for NDI output devices.
pub trait OutputApi: Send + Sync {
    /// Create a new output device.
    ///
    /// An error means the host refused the settings (invalid name, device
    /// collision); no device exists afterwards.
    fn create(&self, settings: &OutputSettings) -> Result<Box<dyn OutputDevice>>;
}

/// A created output device. Dropping the box releases it in the host.
pub trait OutputDevice: Send {
    /// Atomically rebind the device's media. The device is never left with a
    /// partially attached pair.
    fn set_media(&mut self, media: MediaBinding);

    /// Attempt to start the device. Returns whether it is now running; on
    /// failure the reason is readable via [`last_error`](Self::last_error).
    fn start(&mut self) -> bool;

    /// Stop the device. Safe to call when not running.
    fn stop(&mut self);

    /// The error reported by the most recent failed start.
    fn last_error(&self) -> String;

    /// Connect (`Some`) or disconnect (`None`) the lifecycle signal sender.
    ///
    /// While connected the device may emit [`OutputEvent`]s from any thread.
    /// The sender must be disconnected before the device is released.
    fn set_signal_sender(&mut self, sender: Option<Sender<OutputEvent>>);
}
