use super::*;
use crate::route::RouteTable;
use crate::storage::MemoryStore;

fn origins() -> Vec<NavTarget<'static>> {
    vec![
        NavTarget::new("/"),
        NavTarget::new("/setup"),
        NavTarget::protected("/main"),
        NavTarget::new("/login"),
        NavTarget::new("/nowhere"),
    ]
}

// =========================================================
// decide()
// =========================================================

#[test]
fn test_protected_route_without_credential_redirects() {
    for route in RouteTable::standard().routes().iter().filter(|r| r.requires_auth) {
        for origin in origins() {
            assert_eq!(
                decide(&NavTarget::from(route), &origin, false),
                GuardDecision::Redirect("/setup"),
                "route {} from {}",
                route.path,
                origin.path
            );
        }
    }
}

#[test]
fn test_protected_route_with_credential_allows() {
    for route in RouteTable::standard().routes().iter().filter(|r| r.requires_auth) {
        assert_eq!(
            decide(&NavTarget::from(route), &NavTarget::new("/"), true),
            GuardDecision::Allow
        );
    }
}

#[test]
fn test_public_routes_always_allow() {
    for route in RouteTable::standard()
        .routes()
        .iter()
        .filter(|r| !r.requires_auth && !LOGGED_OUT_ONLY.contains(&r.path))
    {
        for present in [false, true] {
            for origin in origins() {
                assert_eq!(
                    decide(&NavTarget::from(route), &origin, present),
                    GuardDecision::Allow,
                    "route {} credential {}",
                    route.path,
                    present
                );
            }
        }
    }
}

#[test]
fn test_login_and_register_depend_on_credential() {
    for path in ["/login", "/register"] {
        let target = NavTarget::new(path);
        assert_eq!(
            decide(&target, &NavTarget::new("/setup"), true),
            GuardDecision::Redirect("/setup")
        );
        assert_eq!(
            decide(&target, &NavTarget::new("/setup"), false),
            GuardDecision::Allow
        );
    }
}

#[test]
fn test_undeclared_path_is_unprotected() {
    let target = NavTarget::new("/unknown");
    assert!(!target.requires_auth);
    assert_eq!(
        decide(&target, &NavTarget::new("/"), false),
        GuardDecision::Allow
    );
}

#[test]
fn test_auth_rule_checked_before_logged_out_rule() {
    // 假设某个登录页被标记为需要认证，第一条规则先命中
    let target = NavTarget::protected("/login");
    assert_eq!(
        decide(&target, &NavTarget::new("/"), false),
        GuardDecision::Redirect("/setup")
    );
}

#[test]
fn test_intent_matches_decide() {
    let intent = NavigationIntent {
        target_path: "/table".to_string(),
        origin_path: "/setup".to_string(),
        target_requires_auth: true,
    };
    assert_eq!(intent.decide(false), GuardDecision::Redirect("/setup"));
    assert_eq!(intent.decide(true), GuardDecision::Allow);
}

// =========================================================
// NavigationGuard
// =========================================================

#[test]
fn test_guard_reads_store_on_every_check() {
    let config = ShellConfig::default();
    let store = MemoryStore::new();
    let guard = NavigationGuard::new(&store, &config);
    let main = NavTarget::protected("/main");
    let origin = NavTarget::new("/setup");

    assert_eq!(guard.check(&main, &origin), GuardDecision::Redirect("/setup"));

    store.set("token", "abc.def.ghi");
    assert_eq!(guard.check(&main, &origin), GuardDecision::Allow);

    store.remove("token");
    assert_eq!(guard.check(&main, &origin), GuardDecision::Redirect("/setup"));
}

#[test]
fn test_guard_treats_empty_token_as_absent() {
    let config = ShellConfig::default();
    let store = MemoryStore::with_entry("token", "");
    let guard = NavigationGuard::new(&store, &config);

    assert!(!guard.credential_present());
    assert_eq!(
        guard.check(&NavTarget::new("/login"), &NavTarget::new("/")),
        GuardDecision::Allow
    );
}

#[test]
fn test_guard_respects_configured_key() {
    let config = ShellConfig::default().with_token_key("ebid_token");
    let store = MemoryStore::with_entry("token", "abc.def.ghi");
    let guard = NavigationGuard::new(&store, &config);
    assert!(!guard.credential_present());

    store.set("ebid_token", "abc.def.ghi");
    assert!(guard.credential_present());
}

#[test]
fn test_guard_does_not_touch_store() {
    let config = ShellConfig::default();
    let store = MemoryStore::with_entry("token", "abc.def.ghi");
    let guard = NavigationGuard::new(&store, &config);

    let intent = NavigationIntent {
        target_path: "/login".to_string(),
        origin_path: "/main".to_string(),
        target_requires_auth: false,
    };
    assert_eq!(guard.check_intent(&intent), GuardDecision::Redirect("/setup"));
    assert_eq!(store.get("token").as_deref(), Some("abc.def.ghi"));
}
