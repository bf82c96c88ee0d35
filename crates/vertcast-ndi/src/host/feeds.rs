//! Opaque feed handles and the atomic media binding unit.

use std::sync::Arc;

/// Opaque handle to a live video frame stream.
///
/// Feeds are borrowed from the host: cloning a handle is cheap and never
/// affects the underlying stream's lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFeed(Arc<str>);

impl VideoFeed {
    /// Wrap a host feed identified by an opaque label.
    pub fn new(label: impl Into<Arc<str>>) -> Self {
        Self(label.into())
    }

    /// Label used for logging and mock assertions only.
    pub fn label(&self) -> &str {
        &self.0
    }
}

/// Opaque handle to a live audio stream. Same borrowing rules as
/// [`VideoFeed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioFeed(Arc<str>);

impl AudioFeed {
    /// Wrap a host audio feed identified by an opaque label.
    pub fn new(label: impl Into<Arc<str>>) -> Self {
        Self(label.into())
    }

    /// Label used for logging and mock assertions only.
    pub fn label(&self) -> &str {
        &self.0
    }
}

/// The video/audio pair bound to an output device in one atomic call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MediaBinding {
    /// Video feed, `None` to detach
    pub video: Option<VideoFeed>,
    /// Audio feed, `None` to detach
    pub audio: Option<AudioFeed>,
}

impl MediaBinding {
    /// Binding with both feeds detached.
    pub fn none() -> Self {
        Self::default()
    }

    /// True when neither feed is attached.
    pub fn is_detached(&self) -> bool {
        self.video.is_none() && self.audio.is_none()
    }
}

/// Access to the primary program feeds. These exist for as long as the host
/// runs, so neither accessor can fail.
pub trait ProgramFeeds: Send + Sync {
    /// The primary program video feed.
    fn program_video(&self) -> VideoFeed;

    /// The primary program audio feed.
    fn program_audio(&self) -> AudioFeed;
}
