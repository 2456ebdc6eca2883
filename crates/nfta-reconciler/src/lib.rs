//! Callback reconciliation for the NFTauth redirect flow.
//!
//! The dashboard view hands the incoming query string to [`Reconciler::resolve`],
//! which decides between fresh registration, returning login, an error
//! round-trip, or an invalid direct visit, and drives persistence and
//! navigation through injected capabilities.

use nfta_store::{Clock, KvStore, ProfileStore, normalize_address};
use nfta_types::{AuthIntent, NoticeCode, ProfileFields, UserRecord};
use tracing::warn;
use url::form_urlencoded;

/// Navigation capability exposed to the reconciler and the trigger views.
pub trait NavigationPort {
    /// In-app route change, no document reload.
    fn route_to(&self, path: &str);
    /// Full document navigation, used for cross-view error round-trips.
    fn hard_redirect(&self, url: &str);
    /// Replace the visible URL without adding a history entry.
    fn replace_url(&self, path: &str);
}

/// Query parameters delivered by the external authenticator.
///
/// Ephemeral: parsed once per view-mount evaluation and never persisted.
/// Empty-string values are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallbackParams {
    pub authenticate: Option<String>,
    pub wallet_address: Option<String>,
    pub profile: Option<String>,
}

impl CallbackParams {
    /// Parse a query string (with or without the leading `?`). The first
    /// occurrence of each parameter wins; the wallet address is normalized
    /// to lowercase on read.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut params = CallbackParams::default();

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                "authenticate" if params.authenticate.is_none() => {
                    params.authenticate = Some(value.into_owned());
                }
                "walletAddress" if params.wallet_address.is_none() => {
                    params.wallet_address = Some(normalize_address(&value));
                }
                "profile" if params.profile.is_none() => {
                    params.profile = Some(value.into_owned());
                }
                _ => {}
            }
        }

        params
    }
}

/// Extract the one-time `error` code a trigger view should surface.
pub fn notice_from_query(query: &str) -> Option<NoticeCode> {
    let query = query.strip_prefix('?').unwrap_or(query);
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "error")
        .and_then(|(_, value)| NoticeCode::from_query_value(&value))
}

/// Endpoints for the redirect-out handoff to the external authenticator.
#[derive(Debug, Clone)]
pub struct HandoffConfig {
    pub authenticator_base_url: String,
    pub app_base_url: String,
}

impl HandoffConfig {
    pub fn new(authenticator_base_url: impl Into<String>, app_base_url: impl Into<String>) -> Self {
        Self {
            authenticator_base_url: authenticator_base_url.into(),
            app_base_url: app_base_url.into(),
        }
    }

    /// `<authenticator>?requireProfile=<true|false>&redirect=<app>/dashboard`
    pub fn handoff_url(&self, intent: AuthIntent) -> String {
        format!(
            "{}?requireProfile={}&redirect={}/dashboard",
            self.authenticator_base_url.trim_end_matches('/'),
            intent.requires_profile(),
            self.app_base_url.trim_end_matches('/'),
        )
    }
}

/// Outcome of one reconciliation pass.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// No usable signal; routed to the login view.
    SentToLogin,
    /// New registration persisted; URL cleaned.
    Registered(UserRecord),
    /// Wallet already registered; redirected to `/register?error=duplicate`.
    DuplicateRegistration,
    /// Returning login; existing record loaded, URL cleaned.
    LoggedIn(UserRecord),
    /// Login for an unknown wallet; redirected to `/login?error=unregistered`.
    UnregisteredLogin,
    /// A completed flow was re-evaluated; the held record stands.
    AlreadyProcessed,
}

/// Resolves one authenticator callback per view instance.
///
/// The `processed` flag makes re-evaluation (a re-render after the URL
/// cleanup) a no-op; a fresh mount gets a fresh reconciler.
pub struct Reconciler<'a, K, C, N> {
    store: &'a ProfileStore<K, C>,
    nav: &'a N,
    processed: bool,
    user: Option<UserRecord>,
}

impl<'a, K, C, N> Reconciler<'a, K, C, N>
where
    K: KvStore,
    C: Clock,
    N: NavigationPort,
{
    pub fn new(store: &'a ProfileStore<K, C>, nav: &'a N) -> Self {
        Self {
            store,
            nav,
            processed: false,
            user: None,
        }
    }

    /// The record held after a successful resolution, if any.
    pub fn current_user(&self) -> Option<&UserRecord> {
        self.user.as_ref()
    }

    pub fn is_processed(&self) -> bool {
        self.processed
    }

    /// Evaluate the precedence ladder against the current query string.
    /// First match wins; side effects happen at most once per resolution.
    pub fn resolve(&mut self, query: &str) -> Resolution {
        let params = CallbackParams::from_query(query);

        // Direct visit with no authenticator signal.
        if params.authenticate.is_none() && params.wallet_address.is_none() && !self.processed {
            self.nav.route_to("/login");
            return Resolution::SentToLogin;
        }

        // Explicit failure from the authenticator.
        if params.authenticate.as_deref() == Some("false") {
            self.nav.route_to("/login");
            return Resolution::SentToLogin;
        }

        if params.authenticate.as_deref() == Some("true") {
            // Registration callback carries a profile; login does not.
            if let (Some(addr), Some(raw_profile)) = (&params.wallet_address, &params.profile) {
                let profile = parse_profile(raw_profile);

                if self.store.exists(addr) {
                    self.nav.hard_redirect("/register?error=duplicate");
                    return Resolution::DuplicateRegistration;
                }

                let record = self.store.save(addr, profile).unwrap_or_else(|err| {
                    // The view still renders the record; the loss stays
                    // visible in the log and in the store's error signal.
                    warn!("registration for {addr} was not persisted: {err}");
                    err.into_record()
                });

                self.user = Some(record.clone());
                self.processed = true;
                self.nav.replace_url("/dashboard");
                return Resolution::Registered(record);
            }

            if let Some(addr) = &params.wallet_address {
                let Some(record) = self.store.get(addr) else {
                    self.nav.hard_redirect("/login?error=unregistered");
                    return Resolution::UnregisteredLogin;
                };

                self.user = Some(record.clone());
                self.processed = true;
                self.nav.replace_url("/dashboard");
                return Resolution::LoggedIn(record);
            }
        }

        // Re-evaluation after a completed flow keeps the held record.
        if self.processed {
            return Resolution::AlreadyProcessed;
        }

        // Anything else is an invalid direct visit.
        self.nav.route_to("/login");
        Resolution::SentToLogin
    }
}

/// Parse the URL-decoded profile payload, degrading to an empty profile on
/// anything that is not a JSON object.
fn parse_profile(raw: &str) -> ProfileFields {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Object(map)) => map,
        Ok(other) => {
            warn!("profile payload is not a JSON object ({other}); using empty profile");
            ProfileFields::new()
        }
        Err(err) => {
            warn!("failed to parse profile payload: {err}");
            ProfileFields::new()
        }
    }
}
