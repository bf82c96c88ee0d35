//! Vendor remote-procedure surface.
//!
//! Optional third-party integrations expose procedures the host can invoke
//! by name with loosely typed calldata. The vertical output only ever reads
//! integer arguments and a video result field, so [`ProcCall`] models just
//! those.

use std::collections::BTreeMap;

use super::VideoFeed;

/// Calldata passed to and returned from a vendor procedure.
#[derive(Debug, Default, Clone)]
pub struct ProcCall {
    ints: BTreeMap<String, i64>,
    videos: BTreeMap<String, VideoFeed>,
}

impl ProcCall {
    /// Empty calldata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an integer argument.
    pub fn set_int(&mut self, key: &str, value: i64) {
        self.ints.insert(key.to_string(), value);
    }

    /// Read an integer field.
    pub fn int(&self, key: &str) -> Option<i64> {
        self.ints.get(key).copied()
    }

    /// Set a video result field.
    pub fn set_video(&mut self, key: &str, video: VideoFeed) {
        self.videos.insert(key.to_string(), video);
    }

    /// Read a video result field.
    pub fn video(&self, key: &str) -> Option<VideoFeed> {
        self.videos.get(key).cloned()
    }
}

/// Remote-procedure handler exposed by an optional vendor integration.
pub trait VendorApi: Send + Sync {
    /// Invoke a vendor procedure. Returns whether the call was serviced at
    /// all; result fields are written into `call`. An unserviced call means
    /// the integration is not loaded, which is a normal condition.
    fn call(&self, name: &str, call: &mut ProcCall) -> bool;
}

/// No vendor integration loaded: no call is ever serviced.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoVendorApi;

impl VendorApi for NoVendorApi {
    fn call(&self, _name: &str, _call: &mut ProcCall) -> bool {
        false
    }
}
