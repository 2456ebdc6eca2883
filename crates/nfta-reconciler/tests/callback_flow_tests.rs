//! End-to-end callback scenarios over in-memory capabilities.

use nfta_reconciler::{NavigationPort, Reconciler, Resolution};
use nfta_store::{Clock, InMemoryKv, ProfileStore};
use nfta_types::ProfileFields;
use std::cell::RefCell;

struct FixedClock(u128);

impl Clock for FixedClock {
    fn epoch_ms(&self) -> u128 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum NavEvent {
    RouteTo(String),
    HardRedirect(String),
    ReplaceUrl(String),
}

#[derive(Default)]
struct RecordingNav {
    events: RefCell<Vec<NavEvent>>,
}

impl RecordingNav {
    fn events(&self) -> Vec<NavEvent> {
        self.events.borrow().clone()
    }
}

impl NavigationPort for RecordingNav {
    fn route_to(&self, path: &str) {
        self.events.borrow_mut().push(NavEvent::RouteTo(path.into()));
    }

    fn hard_redirect(&self, url: &str) {
        self.events.borrow_mut().push(NavEvent::HardRedirect(url.into()));
    }

    fn replace_url(&self, path: &str) {
        self.events.borrow_mut().push(NavEvent::ReplaceUrl(path.into()));
    }
}

fn store() -> ProfileStore<InMemoryKv, FixedClock> {
    ProfileStore::new(InMemoryKv::default(), FixedClock(1_000))
}

const REGISTRATION: &str =
    "?authenticate=true&walletAddress=0xABC&profile=%7B%22name%22%3A%22Alice%22%7D";
const LOGIN: &str = "?authenticate=true&walletAddress=0xabc";

#[test]
fn fresh_registration_persists_one_record_and_cleans_url() {
    let store = store();
    let nav = RecordingNav::default();
    let mut reconciler = Reconciler::new(&store, &nav);

    let resolution = reconciler.resolve(REGISTRATION);

    let Resolution::Registered(record) = resolution else {
        panic!("expected registration, got {resolution:?}");
    };
    assert_eq!(record.wallet_address, "0xabc");
    assert_eq!(record.profile.get("name"), Some(&serde_json::Value::String("Alice".into())));
    assert!(record.registered);
    assert_eq!(record.created_at_epoch_ms, 1_000);

    assert_eq!(store.list_all(), vec![record.clone()]);
    assert_eq!(reconciler.current_user(), Some(&record));
    assert!(reconciler.is_processed());
    assert_eq!(nav.events(), vec![NavEvent::ReplaceUrl("/dashboard".into())]);
}

#[test]
fn duplicate_registration_redirects_without_writing() {
    let store = store();
    let nav = RecordingNav::default();
    Reconciler::new(&store, &nav).resolve(REGISTRATION);

    // Same callback replayed in a fresh view instance.
    let nav = RecordingNav::default();
    let mut reconciler = Reconciler::new(&store, &nav);
    let resolution = reconciler.resolve(REGISTRATION);

    assert_eq!(resolution, Resolution::DuplicateRegistration);
    assert_eq!(store.list_all().len(), 1);
    assert_eq!(
        nav.events(),
        vec![NavEvent::HardRedirect("/register?error=duplicate".into())]
    );
    // Navigation is fire-and-forget: no state mutated after the decision.
    assert_eq!(reconciler.current_user(), None);
    assert!(!reconciler.is_processed());
}

#[test]
fn reevaluation_after_url_cleanup_is_a_no_op() {
    let store = store();
    let nav = RecordingNav::default();
    let mut reconciler = Reconciler::new(&store, &nav);

    let first = reconciler.resolve(REGISTRATION);
    assert!(matches!(first, Resolution::Registered(_)));

    // A re-render re-reads the now-clean URL.
    let second = reconciler.resolve("");
    assert_eq!(second, Resolution::AlreadyProcessed);
    assert!(reconciler.current_user().is_some());
    assert_eq!(store.list_all().len(), 1);
    // No additional navigation beyond the original cleanup.
    assert_eq!(nav.events(), vec![NavEvent::ReplaceUrl("/dashboard".into())]);
}

#[test]
fn registration_is_idempotent_across_invocations() {
    let store = store();
    let nav = RecordingNav::default();
    let mut reconciler = Reconciler::new(&store, &nav);

    reconciler.resolve(REGISTRATION);
    let replay = reconciler.resolve(REGISTRATION);

    // The replay hits the duplicate branch; exactly one record exists.
    assert_eq!(replay, Resolution::DuplicateRegistration);
    assert_eq!(store.list_all().len(), 1);
}

#[test]
fn case_variant_wallet_hits_the_duplicate_branch() {
    let store = store();
    let nav = RecordingNav::default();
    Reconciler::new(&store, &nav).resolve(REGISTRATION);

    let nav = RecordingNav::default();
    let resolution = Reconciler::new(&store, &nav)
        .resolve("?authenticate=true&walletAddress=0xabc&profile=%7B%7D");

    assert_eq!(resolution, Resolution::DuplicateRegistration);
    assert_eq!(store.list_all().len(), 1);
}

#[test]
fn malformed_profile_registers_with_empty_profile() {
    let store = store();
    let nav = RecordingNav::default();
    let mut reconciler = Reconciler::new(&store, &nav);

    let resolution =
        reconciler.resolve("?authenticate=true&walletAddress=0xdef&profile=not-json");

    let Resolution::Registered(record) = resolution else {
        panic!("expected registration, got {resolution:?}");
    };
    assert_eq!(record.profile, ProfileFields::new());
    assert!(store.exists("0xdef"));
}

#[test]
fn login_with_registered_wallet_loads_without_writing() {
    let store = store();
    let nav = RecordingNav::default();
    Reconciler::new(&store, &nav).resolve(REGISTRATION);
    let before = store.list_all();

    let nav = RecordingNav::default();
    let mut reconciler = Reconciler::new(&store, &nav);
    let resolution = reconciler.resolve(LOGIN);

    let Resolution::LoggedIn(record) = resolution else {
        panic!("expected login, got {resolution:?}");
    };
    assert_eq!(record.wallet_address, "0xabc");
    assert_eq!(record.profile.get("name"), Some(&serde_json::Value::String("Alice".into())));
    assert_eq!(store.list_all(), before);
    assert_eq!(nav.events(), vec![NavEvent::ReplaceUrl("/dashboard".into())]);
}

#[test]
fn login_with_unregistered_wallet_redirects() {
    let store = store();
    let nav = RecordingNav::default();
    let mut reconciler = Reconciler::new(&store, &nav);

    let resolution = reconciler.resolve(LOGIN);

    assert_eq!(resolution, Resolution::UnregisteredLogin);
    assert!(store.list_all().is_empty());
    assert_eq!(
        nav.events(),
        vec![NavEvent::HardRedirect("/login?error=unregistered".into())]
    );
    assert_eq!(reconciler.current_user(), None);
}

#[test]
fn login_ignores_wallet_case() {
    let store = store();
    let nav = RecordingNav::default();
    Reconciler::new(&store, &nav).resolve(REGISTRATION);

    let nav = RecordingNav::default();
    let resolution =
        Reconciler::new(&store, &nav).resolve("?authenticate=true&walletAddress=0xAbC");

    assert!(matches!(resolution, Resolution::LoggedIn(_)));
}

#[test]
fn no_params_routes_to_login_without_touching_store() {
    let store = store();
    let nav = RecordingNav::default();
    let mut reconciler = Reconciler::new(&store, &nav);

    let resolution = reconciler.resolve("");

    assert_eq!(resolution, Resolution::SentToLogin);
    assert!(store.list_all().is_empty());
    assert_eq!(nav.events(), vec![NavEvent::RouteTo("/login".into())]);
}

#[test]
fn explicit_failure_routes_to_login() {
    let store = store();
    let nav = RecordingNav::default();
    let mut reconciler = Reconciler::new(&store, &nav);

    let resolution = reconciler.resolve("?authenticate=false&walletAddress=0xabc");

    assert_eq!(resolution, Resolution::SentToLogin);
    assert_eq!(nav.events(), vec![NavEvent::RouteTo("/login".into())]);
}

#[test]
fn authenticated_callback_without_wallet_is_invalid_access() {
    let store = store();
    let nav = RecordingNav::default();
    let mut reconciler = Reconciler::new(&store, &nav);

    let resolution = reconciler.resolve("?authenticate=true");

    assert_eq!(resolution, Resolution::SentToLogin);
    assert_eq!(nav.events(), vec![NavEvent::RouteTo("/login".into())]);
}

#[test]
fn empty_profile_value_is_treated_as_login() {
    let store = store();
    let nav = RecordingNav::default();
    Reconciler::new(&store, &nav).resolve(REGISTRATION);

    let nav = RecordingNav::default();
    let resolution = Reconciler::new(&store, &nav)
        .resolve("?authenticate=true&walletAddress=0xabc&profile=");

    assert!(matches!(resolution, Resolution::LoggedIn(_)));
}
