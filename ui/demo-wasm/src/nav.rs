//! Browser-backed navigation capability.

use crate::dom;
use nfta_reconciler::NavigationPort;
use wasm_bindgen::JsValue;

pub struct BrowserNavigation;

impl NavigationPort for BrowserNavigation {
    fn route_to(&self, path: &str) {
        let Ok(history) = dom::window().history() else {
            return;
        };
        if history
            .push_state_with_url(&JsValue::NULL, "", Some(path))
            .is_ok()
        {
            crate::render(path);
        }
    }

    fn hard_redirect(&self, url: &str) {
        let _ = dom::window().location().set_href(url);
    }

    fn replace_url(&self, path: &str) {
        if let Ok(history) = dom::window().history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}
