//! Registration trigger view.
//!
//! Redirects the browser to the authenticator with `requireProfile=true`.
//! Also surfaces the one-time duplicate-registration notice the dashboard
//! round-trips through `?error=duplicate`.

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
        // Shown once; clean the URL so a reload does not replay it.
        BrowserNavigation.replace_url("/register");
    }

    dom::set_inner_html(&dom::app_root(), &page(notice));

    if let Some(btn) = dom::by_id("register-btn") {
        dom::on_click(&btn, move |_| {
            let url = config::handoff().handoff_url(AuthIntent::Register);
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
    <h1>Register</h1>
    <p>Create your soulbound identity with NFTauth.</p>
    {notice_html}
    <button id="register-btn" class="btn-primary">Register with NFTauth</button>
    <a href="/">Back to Home</a>
  </div>
</div>
"#
    )
}
