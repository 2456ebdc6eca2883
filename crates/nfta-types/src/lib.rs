use serde::{Deserialize, Serialize};

/// Open-ended profile attributes returned by the authenticator.
pub type ProfileFields = serde_json::Map<String, serde_json::Value>;

/// A persisted user. Wire names match the browser localStorage layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserRecord {
    #[serde(rename = "walletAddress")]
    pub wallet_address: String,
    #[serde(default)]
    pub profile: ProfileFields,
    pub registered: bool,
    #[serde(rename = "createdAt")]
    pub created_at_epoch_ms: u128,
}

/// Why the browser is being handed off to the external authenticator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AuthIntent {
    Register,
    Login,
}

impl AuthIntent {
    /// Registration asks the authenticator to collect a profile; login does not.
    pub fn requires_profile(self) -> bool {
        matches!(self, AuthIntent::Register)
    }
}

/// Error codes round-tripped through the `error` query parameter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NoticeCode {
    Duplicate,
    Unregistered,
}

impl NoticeCode {
    pub fn as_query_value(self) -> &'static str {
        match self {
            NoticeCode::Duplicate => "duplicate",
            NoticeCode::Unregistered => "unregistered",
        }
    }

    pub fn from_query_value(value: &str) -> Option<Self> {
        match value {
            "duplicate" => Some(NoticeCode::Duplicate),
            "unregistered" => Some(NoticeCode::Unregistered),
            _ => None,
        }
    }

    /// User-facing message shown on the trigger view.
    pub fn message(self) -> &'static str {
        match self {
            NoticeCode::Duplicate => "You already have a soulbound identity. Login instead.",
            NoticeCode::Unregistered => "You have not registered yet.",
        }
    }
}

/// One-shot notification holder for a trigger view.
///
/// A raised notice is delivered exactly once: `acknowledge` hands it out and
/// clears it, so a re-render after the URL cleanup cannot show it again.
#[derive(Debug, Default)]
pub struct NoticeSlot {
    pending: Option<NoticeCode>,
}

impl NoticeSlot {
    pub fn raise(&mut self, code: NoticeCode) {
        self.pending = Some(code);
    }

    pub fn acknowledge(&mut self) -> Option<NoticeCode> {
        self.pending.take()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
