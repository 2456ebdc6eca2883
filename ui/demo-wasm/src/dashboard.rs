//! Dashboard view.
//!
//! Owns the callback reconciliation: one evaluation per mount, over the
//! browser-backed storage and navigation capabilities.

use crate::dom;
use crate::nav::BrowserNavigation;
use crate::storage::{JsClock, LocalStorageKv};
use gloo_console::log;
use nfta_reconciler::{NavigationPort, Reconciler, Resolution};
use nfta_store::ProfileStore;
use nfta_types::UserRecord;

pub fn mount() {
    let store = ProfileStore::new(LocalStorageKv, JsClock);
    let nav = BrowserNavigation;
    let mut reconciler = Reconciler::new(&store, &nav);

    let search = dom::search();
    log!(format!("[dashboard] resolving callback params: {search}"));

    match reconciler.resolve(&search) {
        Resolution::Registered(user) => {
            log!(format!("[dashboard] saved new user: {}", user.wallet_address));
            render_profile(&user);
        }
        Resolution::LoggedIn(user) => {
            log!(format!("[dashboard] loaded existing user: {}", user.wallet_address));
            render_profile(&user);
        }
        Resolution::AlreadyProcessed => match reconciler.current_user() {
            Some(user) => render_profile(user),
            None => render_access_denied(),
        },
        // Navigation already issued; nothing left to render here.
        Resolution::SentToLogin
        | Resolution::DuplicateRegistration
        | Resolution::UnregisteredLogin => {}
    }
}

fn render_profile(user: &UserRecord) {
    let name = user
        .profile
        .get("name")
        .and_then(|v| v.as_str())
        .unwrap_or("User");

    let mut rows = format!(
        r#"<div class="profile-row"><span>Wallet Address</span><span class="mono">{}</span></div>"#,
        dom::escape(&truncate_address(&user.wallet_address)),
    );
    for (key, value) in &user.profile {
        let text = match value {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Null => continue,
            other => other.to_string(),
        };
        if text.is_empty() {
            continue;
        }
        rows.push_str(&format!(
            r#"<div class="profile-row"><span>{}</span><span>{}</span></div>"#,
            dom::escape(key),
            dom::escape(&text),
        ));
    }

    let page = format!(
        r#"
<div class="page-container">
  <div class="glass-card">
    <h1>Welcome back, {name}!</h1>
    <p>Your soulbound identity is verified.</p>
    <div class="profile-card">{rows}</div>
    <div class="actions">
      <a href="/" class="btn-secondary">Back to Home</a>
      <button id="logout-btn" class="btn-danger">Logout</button>
    </div>
  </div>
</div>
"#,
        name = dom::escape(name),
    );
    dom::set_inner_html(&dom::app_root(), &page);

    if let Some(btn) = dom::by_id("logout-btn") {
        dom::on_click(&btn, move |_| {
            // Clear the session marker but keep user data for future logins.
            ProfileStore::new(LocalStorageKv, JsClock).clear_session();
            BrowserNavigation.hard_redirect("/");
        });
    }
}

fn render_access_denied() {
    dom::set_inner_html(&dom::app_root(), ACCESS_DENIED);
}

fn truncate_address(addr: &str) -> String {
    // Count chars, not bytes: the address arrives straight from the query
    // string and nothing guarantees it is ASCII.
    let chars: Vec<char> = addr.chars().collect();
    if chars.len() > 10 {
        let head: String = chars[..6].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    } else {
        addr.to_owned()
    }
}

const ACCESS_DENIED: &str = r#"
<div class="page-container">
  <div class="glass-card">
    <h1>Access Denied</h1>
    <p>You need to login first to access your dashboard.</p>
    <a href="/login" class="btn-primary">Go to Login</a>
  </div>
</div>
"#;
