//! Mock host implementations.
//!
//! Used by this crate's tests and, behind the `mock-host` feature, by
//! embedder test harnesses. Every mock records what the controller did to it
//! so tests can assert on media bindings, signal connections and release
//! discipline.

use std::collections::VecDeque;
use std::sync::Arc;

use crossbeam_channel::Sender;
use parking_lot::Mutex;
use vertcast_core::OutputEvent;

use crate::error::{OutputError, Result};
use crate::host::{
    AudioFeed, CanvasApi, CanvasRef, HostServices, MediaBinding, OutputApi, OutputDevice,
    OutputSettings, ProcCall, ProgramFeeds, VendorApi, VideoFeed,
};
use crate::resolver::AITUM_VERTICAL_GET_VIDEO;

/// Observable state of one mock output device.
///
/// Shared between the device handed to the controller and the
/// [`MockOutputApi`] that created it, so tests can inspect the device after
/// ownership moved (and after release).
#[derive(Debug, Default)]
pub struct MockDeviceState {
    /// Current media binding
    pub media: MediaBinding,
    /// Whether the device is currently started
    pub started: bool,
    /// How many times `start()` was called
    pub start_calls: usize,
    /// How many times `stop()` was called
    pub stop_calls: usize,
    /// Whether a signal sender is currently connected
    pub signal_connected: bool,
    /// Whether the device box has been dropped
    pub released: bool,
    /// Whether the device was dropped while a sender was still connected
    pub released_while_connected: bool,
    /// Error reported after a failed start
    pub error: String,
    /// Outcomes for upcoming `start()` calls; empty means succeed
    pub start_results: VecDeque<bool>,
}

struct MockOutputDevice {
    state: Arc<Mutex<MockDeviceState>>,
    sender: Option<Sender<OutputEvent>>,
}

impl OutputDevice for MockOutputDevice {
    fn set_media(&mut self, media: MediaBinding) {
        self.state.lock().media = media;
    }

    fn start(&mut self) -> bool {
        let ok = {
            let mut state = self.state.lock();
            state.start_calls += 1;
            let ok = state.start_results.pop_front().unwrap_or(true);
            if ok {
                state.started = true;
                state.error.clear();
            } else {
                state.started = false;
                state.error = "mock start failure".to_string();
            }
            ok
        };
        if ok {
            if let Some(tx) = &self.sender {
                let _ = tx.send(OutputEvent::Started);
            }
        }
        ok
    }

    fn stop(&mut self) {
        let was_started = {
            let mut state = self.state.lock();
            state.stop_calls += 1;
            std::mem::take(&mut state.started)
        };
        if was_started {
            if let Some(tx) = &self.sender {
                let _ = tx.send(OutputEvent::Stopped);
            }
        }
    }

    fn last_error(&self) -> String {
        self.state.lock().error.clone()
    }

    fn set_signal_sender(&mut self, sender: Option<Sender<OutputEvent>>) {
        self.state.lock().signal_connected = sender.is_some();
        self.sender = sender;
    }
}

impl Drop for MockOutputDevice {
    fn drop(&mut self) {
        let mut state = self.state.lock();
        state.released = true;
        state.released_while_connected = self.sender.is_some();
    }
}

#[derive(Default)]
struct OutputsInner {
    fail_create: bool,
    pending_start_results: VecDeque<bool>,
    created: Vec<OutputSettings>,
    devices: Vec<Arc<Mutex<MockDeviceState>>>,
}

/// Mock output factory recording every creation.
#[derive(Default)]
pub struct MockOutputApi {
    inner: Mutex<OutputsInner>,
}

impl MockOutputApi {
    /// Factory where creation and starts succeed until told otherwise.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent `create()` calls fail (or succeed again).
    pub fn fail_create(&self, fail: bool) {
        self.inner.lock().fail_create = fail;
    }

    /// Queue start outcomes for the next created device. Once the queue is
    /// drained, starts succeed.
    pub fn queue_start_results(&self, results: &[bool]) {
        self.inner.lock().pending_start_results.extend(results);
    }

    /// Settings of every `create()` call, in order.
    pub fn created(&self) -> Vec<OutputSettings> {
        self.inner.lock().created.clone()
    }

    /// State of the n-th created device.
    ///
    /// Panics if fewer devices were created; tests treat that as a failure.
    pub fn device(&self, index: usize) -> Arc<Mutex<MockDeviceState>> {
        self.inner.lock().devices[index].clone()
    }
}

impl OutputApi for MockOutputApi {
    fn create(&self, settings: &OutputSettings) -> Result<Box<dyn OutputDevice>> {
        let mut inner = self.inner.lock();
        inner.created.push(settings.clone());
        if inner.fail_create {
            return Err(OutputError::create_failed("mock create failure"));
        }
        let state = Arc::new(Mutex::new(MockDeviceState {
            start_results: std::mem::take(&mut inner.pending_start_results),
            ..Default::default()
        }));
        inner.devices.push(state.clone());
        Ok(Box::new(MockOutputDevice {
            state,
            sender: None,
        }))
    }
}

/// Program feeds with fixed labels.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockFeeds;

impl ProgramFeeds for MockFeeds {
    fn program_video(&self) -> VideoFeed {
        VideoFeed::new("program video")
    }

    fn program_audio(&self) -> AudioFeed {
        AudioFeed::new("program audio")
    }
}

enum VendorResponse {
    NotLoaded,
    ServicedWithoutVideo,
    Video(VideoFeed),
}

/// Mock vendor proc surface.
pub struct MockVendor {
    response: VendorResponse,
}

impl MockVendor {
    /// Integration not loaded: calls are never serviced.
    pub fn absent() -> Self {
        Self {
            response: VendorResponse::NotLoaded,
        }
    }

    /// Call is serviced but returns no video (no matching canvas).
    pub fn serviced_without_video() -> Self {
        Self {
            response: VendorResponse::ServicedWithoutVideo,
        }
    }

    /// Call is serviced and returns the given feed.
    pub fn with_video(video: VideoFeed) -> Self {
        Self {
            response: VendorResponse::Video(video),
        }
    }
}

impl VendorApi for MockVendor {
    fn call(&self, name: &str, call: &mut ProcCall) -> bool {
        if name != AITUM_VERTICAL_GET_VIDEO {
            return false;
        }
        match &self.response {
            VendorResponse::NotLoaded => false,
            VendorResponse::ServicedWithoutVideo => true,
            VendorResponse::Video(video) => {
                call.set_video("video", video.clone());
                true
            }
        }
    }
}

#[derive(Default)]
struct CanvasesInner {
    acquired: usize,
    released: usize,
}

/// Mock canvas capability counting every acquired and released ref.
pub struct MockCanvases {
    canvases: Vec<(String, Option<VideoFeed>)>,
    inner: Mutex<CanvasesInner>,
}

impl MockCanvases {
    /// Capability with the given `(name, video)` canvases.
    pub fn new(canvases: Vec<(String, Option<VideoFeed>)>) -> Self {
        Self {
            canvases,
            inner: Mutex::default(),
        }
    }

    /// Capability with no canvases.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Total refs handed out by `enumerate()`.
    pub fn acquired(&self) -> usize {
        self.inner.lock().acquired
    }

    /// Total refs given back through `release()`.
    pub fn released(&self) -> usize {
        self.inner.lock().released
    }
}

impl CanvasApi for MockCanvases {
    fn enumerate(&self) -> Vec<CanvasRef> {
        let mut inner = self.inner.lock();
        inner.acquired += self.canvases.len();
        (0..self.canvases.len() as u64).map(CanvasRef::new).collect()
    }

    fn name(&self, canvas: &CanvasRef) -> Option<String> {
        self.canvases
            .get(canvas.id() as usize)
            .map(|(name, _)| name.clone())
    }

    fn video(&self, canvas: &CanvasRef) -> Option<VideoFeed> {
        self.canvases
            .get(canvas.id() as usize)
            .and_then(|(_, video)| video.clone())
    }

    fn release(&self, _canvas: CanvasRef) {
        self.inner.lock().released += 1;
    }
}

/// A full mock host with handles kept for assertions.
///
/// Defaults to the least capable environment: no vendor integration, no
/// canvases, output creation and starts succeeding. Swap individual fields
/// before calling [`services`](Self::services) to change that.
pub struct MockHost {
    /// Output factory
    pub outputs: Arc<MockOutputApi>,
    /// Program feeds
    pub feeds: Arc<MockFeeds>,
    /// Canvas capability
    pub canvases: Arc<MockCanvases>,
    /// Vendor surface
    pub vendor: Arc<MockVendor>,
}

impl MockHost {
    /// The default mock environment.
    pub fn new() -> Self {
        Self {
            outputs: Arc::new(MockOutputApi::new()),
            feeds: Arc::new(MockFeeds),
            canvases: Arc::new(MockCanvases::empty()),
            vendor: Arc::new(MockVendor::absent()),
        }
    }

    /// Bundle the mocks for injection into a controller.
    pub fn services(&self) -> HostServices {
        HostServices {
            outputs: self.outputs.clone(),
            feeds: self.feeds.clone(),
            canvases: self.canvases.clone(),
            vendor: self.vendor.clone(),
        }
    }
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new()
    }
}
