//! Video source resolution with tiered fallback.
//!
//! The vertical output can be fed by the Aitum Vertical plugin's canvas,
//! reached through a vendor proc on older hosts or the canvas API on newer
//! ones. When neither is present the primary program feed is used. "No
//! external vertical source" is a normal condition, never an error, so each
//! tier is a [`FeedProvider`] that may simply decline.

use std::sync::Arc;

use tracing::debug;

use crate::host::{CanvasApi, HostServices, ProcCall, ProgramFeeds, VendorApi, VideoFeed};

/// Canvas name published by the Aitum Vertical plugin.
pub const AITUM_VERTICAL_CANVAS_NAME: &str = "Aitum Vertical";

/// Vendor procedure exposed by the Aitum Vertical plugin.
pub const AITUM_VERTICAL_GET_VIDEO: &str = "aitum_vertical_get_video";

/// One tier of the source resolution chain.
pub trait FeedProvider: Send + Sync {
    /// Short name used in logs.
    fn label(&self) -> &'static str;

    /// Try to produce a video feed. `None` means "not available here".
    fn try_resolve(&self) -> Option<VideoFeed>;
}

/// Tier 1: ask the vendor proc for the vertical canvas video.
pub struct VendorProcProvider {
    vendor: Arc<dyn VendorApi>,
}

impl VendorProcProvider {
    /// Provider backed by the given vendor surface.
    pub fn new(vendor: Arc<dyn VendorApi>) -> Self {
        Self { vendor }
    }
}

impl FeedProvider for VendorProcProvider {
    fn label(&self) -> &'static str {
        "vendor proc"
    }

    fn try_resolve(&self) -> Option<VideoFeed> {
        let mut call = ProcCall::new();
        // width/height 0 matches any vertical canvas
        call.set_int("width", 0);
        call.set_int("height", 0);
        if !self.vendor.call(AITUM_VERTICAL_GET_VIDEO, &mut call) {
            return None;
        }
        call.video("video")
    }
}

/// Tier 2: scan the host's canvas list for the Aitum Vertical canvas.
pub struct CanvasProvider {
    canvases: Arc<dyn CanvasApi>,
}

impl CanvasProvider {
    /// Provider backed by the given canvas capability.
    pub fn new(canvases: Arc<dyn CanvasApi>) -> Self {
        Self { canvases }
    }
}

impl FeedProvider for CanvasProvider {
    fn label(&self) -> &'static str {
        "canvas api"
    }

    fn try_resolve(&self) -> Option<VideoFeed> {
        let refs = self.canvases.enumerate();
        let mut video = None;
        for canvas in &refs {
            if video.is_none()
                && self.canvases.name(canvas).as_deref() == Some(AITUM_VERTICAL_CANVAS_NAME)
            {
                video = self.canvases.video(canvas);
            }
        }
        // Every ref from enumerate() goes back, match or not.
        for canvas in refs {
            self.canvases.release(canvas);
        }
        video
    }
}

/// Ordered provider chain with the program feed as the final fallback.
pub struct SourceResolver {
    providers: Vec<Box<dyn FeedProvider>>,
    feeds: Arc<dyn ProgramFeeds>,
}

impl SourceResolver {
    /// The default chain: vendor proc, then canvas scan, then program feed.
    pub fn new(host: &HostServices) -> Self {
        Self::with_providers(
            vec![
                Box::new(VendorProcProvider::new(host.vendor.clone())),
                Box::new(CanvasProvider::new(host.canvases.clone())),
            ],
            host.feeds.clone(),
        )
    }

    /// Custom chain, mostly for tests.
    pub fn with_providers(
        providers: Vec<Box<dyn FeedProvider>>,
        feeds: Arc<dyn ProgramFeeds>,
    ) -> Self {
        Self { providers, feeds }
    }

    /// Resolve the feed for the vertical output.
    ///
    /// Never fails: the primary program feed is the universal default.
    pub fn resolve(&self) -> VideoFeed {
        for provider in &self.providers {
            if let Some(video) = provider.try_resolve() {
                debug!("vertical video bound via {}", provider.label());
                return video;
            }
            debug!("{}: no vertical video available", provider.label());
        }
        debug!("vertical video falling back to main program video");
        self.feeds.program_video()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockCanvases, MockFeeds, MockHost, MockVendor};

    fn resolver(host: &MockHost) -> SourceResolver {
        SourceResolver::new(&host.services())
    }

    #[test]
    fn vendor_proc_wins_over_canvas_and_program() {
        let mut host = MockHost::new();
        host.vendor = Arc::new(MockVendor::with_video(VideoFeed::new("vendor vertical")));
        host.canvases = Arc::new(MockCanvases::new(vec![(
            AITUM_VERTICAL_CANVAS_NAME.to_string(),
            Some(VideoFeed::new("canvas vertical")),
        )]));

        assert_eq!(resolver(&host).resolve(), VideoFeed::new("vendor vertical"));
    }

    #[test]
    fn canvas_used_when_vendor_absent() {
        let mut host = MockHost::new();
        host.canvases = Arc::new(MockCanvases::new(vec![
            ("Main".to_string(), Some(VideoFeed::new("main"))),
            (
                AITUM_VERTICAL_CANVAS_NAME.to_string(),
                Some(VideoFeed::new("canvas vertical")),
            ),
        ]));

        assert_eq!(resolver(&host).resolve(), VideoFeed::new("canvas vertical"));
    }

    #[test]
    fn program_feed_is_final_fallback() {
        let host = MockHost::new();
        assert_eq!(resolver(&host).resolve(), MockFeeds.program_video());
    }

    #[test]
    fn serviced_call_without_video_falls_through() {
        let mut host = MockHost::new();
        host.vendor = Arc::new(MockVendor::serviced_without_video());
        assert_eq!(resolver(&host).resolve(), MockFeeds.program_video());
    }

    #[test]
    fn canvas_name_must_match_exactly() {
        let mut host = MockHost::new();
        host.canvases = Arc::new(MockCanvases::new(vec![(
            "aitum vertical".to_string(),
            Some(VideoFeed::new("canvas vertical")),
        )]));
        assert_eq!(resolver(&host).resolve(), MockFeeds.program_video());
    }

    #[test]
    fn all_canvas_refs_released_on_match() {
        let mut host = MockHost::new();
        let canvases = Arc::new(MockCanvases::new(vec![
            ("Main".to_string(), None),
            (
                AITUM_VERTICAL_CANVAS_NAME.to_string(),
                Some(VideoFeed::new("canvas vertical")),
            ),
            ("Preview".to_string(), None),
        ]));
        host.canvases = canvases.clone();

        resolver(&host).resolve();
        assert_eq!(canvases.acquired(), 3);
        assert_eq!(canvases.released(), 3);
    }

    #[test]
    fn all_canvas_refs_released_on_miss() {
        let mut host = MockHost::new();
        let canvases = Arc::new(MockCanvases::new(vec![
            ("Main".to_string(), None),
            ("Preview".to_string(), None),
        ]));
        host.canvases = canvases.clone();

        assert_eq!(resolver(&host).resolve(), MockFeeds.program_video());
        assert_eq!(canvases.acquired(), 2);
        assert_eq!(canvases.released(), 2);
    }

    #[test]
    fn empty_canvas_list_is_fine() {
        let mut host = MockHost::new();
        let canvases = Arc::new(MockCanvases::empty());
        host.canvases = canvases.clone();

        assert_eq!(resolver(&host).resolve(), MockFeeds.program_video());
        assert_eq!(canvases.acquired(), 0);
        assert_eq!(canvases.released(), 0);
    }
}
