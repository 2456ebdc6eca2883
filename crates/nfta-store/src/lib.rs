use anyhow::{Result, anyhow};
use nfta_types::{ProfileFields, UserRecord};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use tracing::warn;

/// Storage key holding the serialized user collection.
pub const USERS_KEY: &str = "nftauth_users";
/// Storage key holding the session marker cleared on logout.
pub const SESSION_KEY: &str = "nftauth_session";

/// Synchronous string key-value persistence capability.
///
/// Backed by browser localStorage in the demo client and by [`InMemoryKv`]
/// in tests. Every write replaces the whole value under its key.
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

#[derive(Clone, Default)]
pub struct InMemoryKv {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryKv {
    fn entries(&self) -> Result<MutexGuard<'_, HashMap<String, String>>> {
        self.entries.lock().map_err(|_| anyhow!("kv mutex poisoned"))
    }
}

impl KvStore for InMemoryKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries()?.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries()?.remove(key);
        Ok(())
    }
}

/// Wall-clock capability for record creation timestamps. The browser client
/// implements this over `js_sys::Date`; tests pin it.
pub trait Clock {
    fn epoch_ms(&self) -> u128;
}

/// Wallet addresses are compared and stored in lowercase. Lowercasing is
/// the whole normalization; anything else in the string is significant.
pub fn normalize_address(address: &str) -> String {
    address.to_lowercase()
}

/// A write that did not reach the backing storage.
///
/// Carries the record that would have been stored so callers that tolerate
/// the loss (the demo dashboard does) can keep rendering it.
#[derive(Debug, Error)]
#[error("writing user collection failed: {source}")]
pub struct WriteError {
    pub record: UserRecord,
    #[source]
    pub source: anyhow::Error,
}

impl WriteError {
    pub fn into_record(self) -> UserRecord {
        self.record
    }
}

/// The user collection, keyed by normalized wallet address, persisted as one
/// serialized blob under [`USERS_KEY`].
pub struct ProfileStore<K, C> {
    kv: K,
    clock: C,
}

impl<K, C> ProfileStore<K, C>
where
    K: KvStore,
    C: Clock,
{
    pub fn new(kv: K, clock: C) -> Self {
        Self { kv, clock }
    }

    /// All records in storage order. Read errors and corrupt payloads
    /// degrade to an empty collection.
    pub fn list_all(&self) -> Vec<UserRecord> {
        let raw = match self.kv.get(USERS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!("reading user collection failed: {err:#}");
                return Vec::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|err| {
            warn!("user collection is corrupt, treating as empty: {err}");
            Vec::new()
        })
    }

    pub fn exists(&self, address: &str) -> bool {
        if address.is_empty() {
            return false;
        }
        self.get(address).is_some()
    }

    pub fn get(&self, address: &str) -> Option<UserRecord> {
        let addr = normalize_address(address);
        self.list_all()
            .into_iter()
            .find(|u| normalize_address(&u.wallet_address) == addr)
    }

    /// Insert a new record or merge into the existing one for this address.
    ///
    /// The profile is replaced wholesale, `registered` is forced true, and
    /// `created_at_epoch_ms` is preserved from the first registration.
    pub fn save(&self, address: &str, profile: ProfileFields) -> Result<UserRecord, WriteError> {
        let addr = normalize_address(address);
        let mut users = self.list_all();

        let record = match users
            .iter_mut()
            .find(|u| normalize_address(&u.wallet_address) == addr)
        {
            Some(existing) => {
                existing.wallet_address = addr;
                existing.profile = profile;
                existing.registered = true;
                existing.clone()
            }
            None => {
                let record = UserRecord {
                    wallet_address: addr,
                    profile,
                    registered: true,
                    created_at_epoch_ms: self.clock.epoch_ms(),
                };
                users.push(record.clone());
                record
            }
        };

        if let Err(source) = self.write_all(&users) {
            warn!("persisting user {}: {source:#}", record.wallet_address);
            return Err(WriteError { record, source });
        }
        Ok(record)
    }

    /// Remove the session marker. Logout keeps user data for future logins.
    pub fn clear_session(&self) {
        if let Err(err) = self.kv.remove(SESSION_KEY) {
            warn!("clearing session marker failed: {err:#}");
        }
    }

    fn write_all(&self, users: &[UserRecord]) -> Result<()> {
        let raw = serde_json::to_string(users)?;
        self.kv.set(USERS_KEY, &raw)
    }
}
