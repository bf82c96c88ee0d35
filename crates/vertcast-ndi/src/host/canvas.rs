//! Optional secondary-canvas enumeration capability.

use super::VideoFeed;

/// Reference to a host canvas obtained during enumeration.
///
/// Not `Clone`: every ref handed out by [`CanvasApi::enumerate`] must be
/// given back through [`CanvasApi::release`] exactly once.
#[derive(Debug, PartialEq, Eq)]
pub struct CanvasRef {
    id: u64,
}

impl CanvasRef {
    /// Build a ref around a host-assigned id.
    pub fn new(id: u64) -> Self {
        Self { id }
    }

    /// The host-assigned canvas id.
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// Canvas enumeration, a version-gated host capability.
///
/// Hosts without the capability install [`NoCanvasApi`]; the resolver only
/// ever sees this trait.
pub trait CanvasApi: Send + Sync {
    /// Enumerate the canvases currently known to the host. The caller owns
    /// the returned refs and must release each one.
    fn enumerate(&self) -> Vec<CanvasRef>;

    /// The display name of a canvas, if it has one.
    fn name(&self, canvas: &CanvasRef) -> Option<String>;

    /// The canvas's video feed, if it is currently rendering one.
    fn video(&self, canvas: &CanvasRef) -> Option<VideoFeed>;

    /// Return a ref obtained from [`enumerate`](CanvasApi::enumerate).
    fn release(&self, canvas: CanvasRef);
}

/// Absent-capability implementation: enumeration is always empty.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCanvasApi;

impl CanvasApi for NoCanvasApi {
    fn enumerate(&self) -> Vec<CanvasRef> {
        Vec::new()
    }

    fn name(&self, _canvas: &CanvasRef) -> Option<String> {
        None
    }

    fn video(&self, _canvas: &CanvasRef) -> Option<VideoFeed> {
        None
    }

    fn release(&self, _canvas: CanvasRef) {}
}
