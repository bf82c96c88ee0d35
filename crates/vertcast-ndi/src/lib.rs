//! Vertcast NDI - Vertical Output Lifecycle
//!
//! Manages a single secondary ("vertical") NDI video output inside a live
//! video-production host:
//! - [`SourceResolver`] picks the video feed (vendor proc, canvas scan,
//!   program fallback)
//! - [`VerticalOutput`] owns the output device and drives
//!   create/start/stop/release
//! - [`is_supported`] probes whether the host can run this output type
//! - [`ConfigSync`] mirrors device start/stop signals back into the shared
//!   config
//!
//! The host's real output, video and vendor APIs are reached through the
//! trait surface in [`host`]; mock implementations live behind the
//! `mock-host` feature.

#![warn(missing_docs)]

pub mod error;
pub mod host;
pub mod probe;
pub mod resolver;
pub mod sync;
pub mod vertical;

#[cfg(any(test, feature = "mock-host"))]
pub mod mock;

pub use error::{OutputError, Result};
pub use host::{
    AudioFeed, CanvasApi, CanvasRef, HostServices, MediaBinding, NoCanvasApi, NoVendorApi,
    OutputApi, OutputDevice, OutputSettings, ProcCall, ProgramFeeds, VendorApi, VideoFeed,
};
pub use probe::is_supported;
pub use resolver::{
    CanvasProvider, FeedProvider, SourceResolver, VendorProcProvider,
    AITUM_VERTICAL_CANVAS_NAME, AITUM_VERTICAL_GET_VIDEO,
};
pub use sync::ConfigSync;
pub use vertical::VerticalOutput;
