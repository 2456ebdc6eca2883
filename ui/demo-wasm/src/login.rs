//! Login trigger view.
//!
//! Redirects the browser to the authenticator with `requireProfile=false`
//! and surfaces the one-time `?error=unregistered` notice.

use crate::config;
use crate::dom;
use crate::nav::BrowserNavigation;
use nfta_reconciler::{NavigationPort, notice_from_query};
use nfta_types::{AuthIntent, NoticeCode, NoticeSlot};

pub fn mount() {
    let mut notices = NoticeSlot::default();
    if let Some(code) = notice_from_query(&dom::search()) {
        notices.raise(code);
    }

    let notice = notices.acknowledge();
    if notice.is_some() {
        BrowserNavigation.replace_url("/login");
    }

    dom::set_inner_html(&dom::app_root(), &page(notice));

    if let Some(btn) = dom::by_id("login-btn") {
        dom::on_click(&btn, move |_| {
            let url = config::handoff().handoff_url(AuthIntent::Login);
            BrowserNavigation.hard_redirect(&url);
        });
    }
}

fn page(notice: Option<NoticeCode>) -> String {
    let notice_html = notice
        .map(|code| format!(r#"<div class="notification-error">{}</div>"#, code.message()))
        .unwrap_or_default();

    format!(
        r#"
<div class="page-container">
  <div class="glass-card">
    <h1>Login</h1>
    <p>Sign in using your soulbound identity.</p>
    {notice_html}
    <button id="login-btn" class="btn-primary">Login with NFTauth</button>
    <a href="/">Back to Home</a>
  </div>
</div>
"#
    )
}
