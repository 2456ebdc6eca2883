//! Landing page. Plain anchors; both targets are served entry points.

use crate::dom;

pub fn mount() {
    dom::set_inner_html(&dom::app_root(), PAGE);
}

const PAGE: &str = r#"
<div class="page-container">
  <div class="glass-card">
    <h1>NFTauth Demo</h1>
    <p>Soulbound identity demo. Register once, then log in with your wallet.</p>
    <div class="actions">
      <a href="/register" class="btn-primary">Register</a>
      <a href="/login" class="btn-secondary">Login</a>
    </div>
  </div>
</div>
"#;
