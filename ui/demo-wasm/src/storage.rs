//! Browser-backed storage and clock capabilities.

use anyhow::{Result, anyhow};
use nfta_store::{Clock, KvStore};

fn storage() -> Result<web_sys::Storage> {
    crate::dom::window()
        .local_storage()
        .map_err(|e| anyhow!("localStorage unavailable: {e:?}"))?
        .ok_or_else(|| anyhow!("localStorage disabled"))
}

pub struct LocalStorageKv;

impl KvStore for LocalStorageKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        storage()?
            .get_item(key)
            .map_err(|e| anyhow!("reading {key}: {e:?}"))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        storage()?
            .set_item(key, value)
            .map_err(|e| anyhow!("writing {key}: {e:?}"))
    }

    fn remove(&self, key: &str) -> Result<()> {
        storage()?
            .remove_item(key)
            .map_err(|e| anyhow!("removing {key}: {e:?}"))
    }
}

pub struct JsClock;

impl Clock for JsClock {
    fn epoch_ms(&self) -> u128 {
        js_sys::Date::now() as u128
    }
}
