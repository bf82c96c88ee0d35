//! Trait surface for the host application's output, video and vendor APIs.
//!
//! The controller never talks to the host's native C surface directly; the
//! embedding application implements these traits once and injects them as a
//! [`HostServices`] bundle. This keeps the version-gated canvas capability
//! and the optional vendor integration out of the control flow: absent
//! capabilities are expressed as [`NoCanvasApi`] / [`NoVendorApi`] rather
//! than conditional compilation.

mod canvas;
mod feeds;
mod output;
mod vendor;

pub use canvas::{CanvasApi, CanvasRef, NoCanvasApi};
pub use feeds::{AudioFeed, MediaBinding, ProgramFeeds, VideoFeed};
pub use output::{OutputApi, OutputDevice, OutputSettings};
pub use vendor::{NoVendorApi, ProcCall, VendorApi};

use std::sync::Arc;

/// Bundle of host services injected into the controller at construction.
#[derive(Clone)]
pub struct HostServices {
    /// Output device creation
    pub outputs: Arc<dyn OutputApi>,
    /// Primary program video/audio feeds
    pub feeds: Arc<dyn ProgramFeeds>,
    /// Optional secondary-canvas enumeration capability
    pub canvases: Arc<dyn CanvasApi>,
    /// Optional vendor remote-procedure surface
    pub vendor: Arc<dyn VendorApi>,
}
