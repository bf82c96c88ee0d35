//! Capability probe for the vertical output type.

use tracing::debug;

use crate::host::{OutputApi, OutputSettings};

/// Name used by the throwaway probe output.
pub const SUPPORT_TEST_NAME: &str = "NDI Vertical Support Test";

/// Group used by the throwaway probe output.
pub const SUPPORT_TEST_GROUPS: &str = "DistroAV Config";

/// Check whether the host can run a vertical NDI output at all.
///
/// Same mechanism as the main output probe: create a throwaway output, try
/// to start it, then stop and release it regardless of the outcome. Intended
/// for setup UI; touches no controller state and leaves nothing behind.
pub fn is_supported(outputs: &dyn OutputApi) -> bool {
    let settings = OutputSettings {
        ndi_name: SUPPORT_TEST_NAME.to_string(),
        ndi_groups: SUPPORT_TEST_GROUPS.to_string(),
        uses_audio: false,
    };
    let supported = match outputs.create(&settings) {
        Ok(mut output) => {
            let started = output.start();
            output.stop();
            started
            // Device released on drop
        }
        Err(e) => {
            debug!("vertical output probe could not create output: {}", e);
            false
        }
    };
    debug!("vertical output supported: {}", supported);
    supported
}
