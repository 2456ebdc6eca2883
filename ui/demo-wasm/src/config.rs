//! Deployment endpoints.

use crate::dom;
use nfta_reconciler::HandoffConfig;

/// External NFTauth authenticator origin (dev server default).
pub const AUTHENTICATOR_URL: &str = "http://localhost:5174";

/// Handoff endpoints: the authenticator origin plus this app's own origin,
/// derived from the current location.
pub fn handoff() -> HandoffConfig {
    let origin = dom::window()
        .location()
        .origin()
        .unwrap_or_else(|_| "http://localhost:5173".into());
    HandoffConfig::new(AUTHENTICATOR_URL, origin)
}
