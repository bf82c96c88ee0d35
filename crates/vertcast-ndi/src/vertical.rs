//! Lifecycle controller for the vertical NDI output.

use crossbeam_channel::Sender;
use tracing::{debug, error};
use vertcast_core::{OutputEvent, SharedConfig};

use crate::host::{HostServices, MediaBinding, OutputDevice, OutputSettings};
use crate::resolver::SourceResolver;

/// Controller owning the single vertical NDI output.
///
/// The embedding application constructs exactly one of these at startup and
/// drops it at shutdown; dropping performs [`deinit`](Self::deinit). All
/// operations are expected on the control thread. Device lifecycle signals
/// are forwarded on the event channel and may arrive from other threads.
///
/// States: no device (`!has_output()`), created but stopped, running. A
/// failed start leaves the device created-stopped with
/// [`last_error`](Self::last_error) set and no media attached.
pub struct VerticalOutput {
    host: HostServices,
    config: SharedConfig,
    events: Sender<OutputEvent>,
    resolver: SourceResolver,
    output: Option<Box<dyn OutputDevice>>,
    running: bool,
    name: String,
    groups: String,
    last_error: String,
}

impl VerticalOutput {
    /// Build a controller around the host services and shared config.
    ///
    /// `events` receives [`OutputEvent`]s forwarded from the device's
    /// lifecycle signals; wire the receiving side to a
    /// [`ConfigSync`](crate::sync::ConfigSync) so
    /// `Config::vertical_output_enabled` tracks actual runtime state.
    pub fn new(host: HostServices, config: SharedConfig, events: Sender<OutputEvent>) -> Self {
        let resolver = SourceResolver::new(&host);
        Self {
            host,
            config,
            events,
            resolver,
            output: None,
            running: false,
            name: String::new(),
            groups: String::new(),
            last_error: String::new(),
        }
    }

    /// Whether the output was successfully started and not yet stopped.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether an output device currently exists.
    pub fn has_output(&self) -> bool {
        self.output.is_some()
    }

    /// The most recent start failure; empty after a successful start.
    pub fn last_error(&self) -> &str {
        &self.last_error
    }

    /// Apply the current configuration: tear down any existing output and,
    /// if the feature is enabled and named, create and start a new one.
    ///
    /// Called from configuration-change handling. Creation failure is logged
    /// and leaves no device; the caller re-invokes `init()` after correcting
    /// the configuration.
    pub fn init(&mut self) {
        let (enabled, name, groups) = {
            let config = self.config.read();
            (
                config.vertical_output_enabled,
                config.vertical_output_name.clone(),
                config.vertical_output_groups.clone(),
            )
        };
        if !enabled || name.is_empty() {
            // The deliberate "turn it off" path
            self.deinit();
            debug!("vertical output disabled or unnamed, not creating");
            return;
        }

        // Unconditional teardown, a stale device is never reused
        self.deinit();

        debug!("creating vertical NDI output '{}'", name);
        let settings = OutputSettings {
            ndi_name: name.clone(),
            ndi_groups: groups.clone(),
            // Vertical output uses audio from the main program by default
            uses_audio: true,
        };
        match self.host.outputs.create(&settings) {
            Ok(mut output) => {
                output.set_signal_sender(Some(self.events.clone()));
                self.output = Some(output);
                self.name = name;
                self.groups = groups;
                self.start();
            }
            Err(e) => {
                error!("failed to create vertical NDI output '{}': {}", name, e);
            }
        }
    }

    /// Resolve a video source, bind it with the program audio and start the
    /// device. If already running, restarts (stop, then start).
    ///
    /// Calling this before `init()` has created a device is an ordering
    /// error: logged, nothing else happens.
    pub fn start(&mut self) {
        if self.output.is_none() {
            error!("vertical output start() called with no output created");
            return;
        }
        if self.running {
            self.stop();
        }

        let video = self.resolver.resolve();
        let audio = self.host.feeds.program_audio();
        if let Some(output) = self.output.as_mut() {
            output.set_media(MediaBinding {
                video: Some(video),
                audio: Some(audio),
            });
            if output.start() {
                self.last_error.clear();
                self.running = true;
                debug!("vertical NDI output '{}' started", self.name);
            } else {
                self.last_error = output.last_error();
                self.running = false;
                error!(
                    "failed to start vertical NDI output '{}': {}",
                    self.name, self.last_error
                );
                // A failed start must not keep media bound or hold partial
                // resources acquired during the attempt
                output.set_media(MediaBinding::none());
                output.stop();
            }
        }
    }

    /// Detach media and stop the device, keeping it created.
    ///
    /// No-op (beyond a log line) when not running; safe to call repeatedly.
    pub fn stop(&mut self) {
        if !self.running {
            debug!("vertical NDI output '{}' not running", self.name);
            return;
        }
        if let Some(output) = self.output.as_mut() {
            // Detach foreign feeds before stopping so the device never holds
            // a reference to a feed destroyed concurrently
            output.set_media(MediaBinding::none());
            output.stop();
        }
        self.running = false;
        debug!("vertical NDI output '{}' stopped", self.name);
    }

    /// Stop, disconnect signals and release the device.
    pub fn deinit(&mut self) {
        if self.output.is_none() {
            return;
        }
        self.stop();
        if let Some(mut output) = self.output.take() {
            // stop() was a no-op if a failed start already marked us not
            // running, but that path may have left media bound
            output.set_media(MediaBinding::none());
            output.set_signal_sender(None);
            // Dropping the box releases the device
        }
        self.name.clear();
        self.groups.clear();
        debug!("vertical NDI output released");
    }
}

impl Drop for VerticalOutput {
    fn drop(&mut self) {
        self.deinit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockHost;
    use crate::sync::ConfigSync;
    use crossbeam_channel::Receiver;
    use proptest::prelude::*;
    use vertcast_core::{event_channel, Config};

    fn enabled_config(name: &str) -> Config {
        Config {
            vertical_output_enabled: true,
            vertical_output_name: name.to_string(),
            vertical_output_groups: "Studio".to_string(),
        }
    }

    fn controller(
        host: &MockHost,
        config: Config,
    ) -> (VerticalOutput, Receiver<OutputEvent>, SharedConfig) {
        let shared = config.into_shared();
        let (tx, rx) = event_channel();
        let out = VerticalOutput::new(host.services(), shared.clone(), tx);
        (out, rx, shared)
    }

    #[test]
    fn init_creates_and_starts() {
        let host = MockHost::new();
        let (mut out, _rx, _config) = controller(&host, enabled_config("Vertical"));
        out.init();

        assert!(out.has_output());
        assert!(out.is_running());
        assert_eq!(out.last_error(), "");

        let created = host.outputs.created();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].ndi_name, "Vertical");
        assert_eq!(created[0].ndi_groups, "Studio");
        assert!(created[0].uses_audio);

        let state = host.outputs.device(0);
        let state = state.lock();
        assert!(state.started);
        assert!(state.media.video.is_some());
        assert!(state.media.audio.is_some());
        assert!(state.signal_connected);
    }

    #[test]
    fn init_disabled_tears_down_running_output() {
        let host = MockHost::new();
        let (mut out, _rx, config) = controller(&host, enabled_config("Vertical"));
        out.init();
        assert!(out.is_running());

        config.write().vertical_output_enabled = false;
        out.init();

        assert!(!out.has_output());
        assert!(!out.is_running());
        let state = host.outputs.device(0);
        let state = state.lock();
        assert!(state.released);
        assert!(!state.signal_connected);
    }

    #[test]
    fn init_with_empty_name_is_treated_as_disabled() {
        let host = MockHost::new();
        let (mut out, _rx, config) = controller(&host, enabled_config("Vertical"));
        out.init();
        assert!(out.is_running());

        config.write().vertical_output_name.clear();
        out.init();

        assert!(!out.has_output());
        assert!(!out.is_running());
        assert_eq!(host.outputs.created().len(), 1);
    }

    #[test]
    fn create_failure_leaves_no_output() {
        let host = MockHost::new();
        host.outputs.fail_create(true);
        let (mut out, _rx, _config) = controller(&host, enabled_config("Vertical"));
        out.init();

        assert!(!out.has_output());
        assert!(!out.is_running());

        // No automatic retry, but a later init succeeds once the host allows
        host.outputs.fail_create(false);
        out.init();
        assert!(out.is_running());
    }

    #[test]
    fn start_before_init_is_a_logged_noop() {
        let host = MockHost::new();
        let (mut out, _rx, _config) = controller(&host, enabled_config("Vertical"));
        out.start();

        assert!(!out.has_output());
        assert!(!out.is_running());
        assert!(host.outputs.created().is_empty());
    }

    #[test]
    fn start_while_running_restarts() {
        let host = MockHost::new();
        let (mut out, _rx, _config) = controller(&host, enabled_config("Vertical"));
        out.init();
        out.start();

        assert!(out.is_running());
        let state = host.outputs.device(0);
        let state = state.lock();
        assert_eq!(state.start_calls, 2);
        assert_eq!(state.stop_calls, 1);
        assert!(state.started);
    }

    #[test]
    fn failed_start_detaches_media_and_records_error() {
        let host = MockHost::new();
        host.outputs.queue_start_results(&[false]);
        let (mut out, _rx, _config) = controller(&host, enabled_config("Vertical"));
        out.init();

        assert!(out.has_output());
        assert!(!out.is_running());
        assert!(!out.last_error().is_empty());
        {
            let state = host.outputs.device(0);
            let state = state.lock();
            assert!(!state.started);
            assert!(state.media.is_detached());
        }

        // Next start succeeds by default and clears the error
        out.start();
        assert!(out.is_running());
        assert_eq!(out.last_error(), "");
    }

    #[test]
    fn stop_is_idempotent() {
        let host = MockHost::new();
        let (mut out, _rx, _config) = controller(&host, enabled_config("Vertical"));
        out.init();

        out.stop();
        out.stop();
        assert!(!out.is_running());
        assert!(out.has_output());
        let state = host.outputs.device(0);
        assert_eq!(state.lock().stop_calls, 1);
    }

    #[test]
    fn deinit_disconnects_signals_before_release() {
        let host = MockHost::new();
        let (mut out, _rx, _config) = controller(&host, enabled_config("Vertical"));
        out.init();
        out.deinit();

        assert!(!out.has_output());
        assert!(!out.is_running());
        let state = host.outputs.device(0);
        let state = state.lock();
        assert!(state.released);
        assert!(!state.signal_connected);
        assert!(!state.released_while_connected);
    }

    #[test]
    fn deinit_clears_media_left_by_failed_start() {
        let host = MockHost::new();
        host.outputs.queue_start_results(&[false]);
        let (mut out, _rx, _config) = controller(&host, enabled_config("Vertical"));
        out.init();
        out.deinit();

        let state = host.outputs.device(0);
        let state = state.lock();
        assert!(state.media.is_detached());
        assert!(state.released);
    }

    #[test]
    fn device_signals_drive_config_through_sync() {
        let host = MockHost::new();
        let (mut out, rx, config) = controller(&host, enabled_config("Vertical"));
        let sync = ConfigSync::new(rx, config.clone());

        out.init();
        // The UI may have flipped the flag off in the meantime; the started
        // signal is authoritative
        config.write().vertical_output_enabled = false;
        assert!(sync.pump() >= 1);
        assert!(config.read().vertical_output_enabled);

        out.stop();
        sync.pump();
        assert!(!config.read().vertical_output_enabled);
    }

    #[test]
    fn no_signal_reaches_config_after_deinit() {
        let host = MockHost::new();
        let (mut out, rx, config) = controller(&host, enabled_config("Vertical"));
        let sync = ConfigSync::new(rx, config.clone());

        out.init();
        out.deinit();
        sync.pump();
        // deinit's stop legitimately set the flag false; nothing after can
        // flip it again because the sender is disconnected
        assert!(!config.read().vertical_output_enabled);
        assert_eq!(sync.pump(), 0);
    }

    #[test]
    fn drop_releases_the_device() {
        let host = MockHost::new();
        {
            let (mut out, _rx, _config) = controller(&host, enabled_config("Vertical"));
            out.init();
            assert!(out.is_running());
        }
        let state = host.outputs.device(0);
        assert!(state.lock().released);
    }

    proptest! {
        #[test]
        fn running_tracks_last_successful_start(ops in proptest::collection::vec(any::<bool>(), 0..32)) {
            let host = MockHost::new();
            let (mut out, _rx, _config) = controller(&host, enabled_config("Vertical"));
            out.init();
            let mut expected = out.is_running();

            for start in ops {
                if start {
                    out.start();
                    expected = true;
                } else {
                    out.stop();
                    expected = false;
                }
                prop_assert_eq!(out.is_running(), expected);
                // No device implies not running, in every reachable state
                prop_assert!(out.has_output() || !out.is_running());
            }
        }
    }
}
