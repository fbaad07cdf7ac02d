//! Scope authorization decision tests
//!
//! Covers every rule of the decision function:
//! no scope → parse → role check → admin → user namespace

use docker_scope_authz::{
    AccessItem, AuthzError, DecisionKind, Identity, ScopeAuthorizer, ScopeError,
};

fn identity(username: &str, roles: &[&str]) -> Identity {
    Identity::new(username).with_roles(roles.iter().copied())
}

fn authorize(identity: &Identity, scope: Option<&str>) -> Vec<AccessItem> {
    ScopeAuthorizer::new().authorize(identity, scope).unwrap()
}

// ============================================================================
// LOGIN FLOW
// ============================================================================

#[test]
fn test_no_scope_grants_nothing() {
    let cases: [&[&str]; 4] = [&[], &["user"], &["admin"], &["admin", "user"]];
    for roles in cases {
        let id = identity("alice", roles);
        assert!(authorize(&id, None).is_empty(), "roles {:?}", roles);
    }
}

// ============================================================================
// ROLE CHECKS
// ============================================================================

#[test]
fn test_no_recognized_role_denies() {
    let scope = Some("repository:alice/web:pull,push");

    assert!(authorize(&identity("alice", &[]), scope).is_empty());
    assert!(authorize(&identity("alice", &["offline_access", "Admin", "USER"]), scope).is_empty());

    let decision = ScopeAuthorizer::new()
        .decide(&identity("alice", &["developer"]), scope)
        .unwrap();
    assert_eq!(decision.kind, DecisionKind::UnrecognizedRole);
}

#[test]
fn test_admin_grants_requested_item_verbatim() {
    let admin = identity("root", &["admin"]);

    for scope in [
        "repository:alice/web:pull,push",
        "repository:library/ubuntu:pull",
        "repository:a/b/c:delete",
        "registry:catalog:*",
    ] {
        let access = authorize(&admin, Some(scope));
        assert_eq!(access.len(), 1);
        assert_eq!(access[0].to_string(), scope);
    }
}

#[test]
fn test_admin_bypasses_namespace_check() {
    let bob = identity("bob", &["admin", "user"]);
    let decision = ScopeAuthorizer::new()
        .decide(&bob, Some("repository:alice/myimage:pull,push"))
        .unwrap();

    assert_eq!(decision.kind, DecisionKind::AdminGrant);
    assert_eq!(
        decision.access,
        vec![AccessItem::new("repository", "alice/myimage", ["pull", "push"])]
    );
}

// ============================================================================
// USER NAMESPACES
// ============================================================================

#[test]
fn test_user_namespace_match_grants() {
    let alice = identity("alice", &["user"]);
    let access = authorize(&alice, Some("repository:alice/myimage:pull,push"));

    assert_eq!(
        access,
        vec![AccessItem::new("repository", "alice/myimage", ["pull", "push"])]
    );
}

#[test]
fn test_user_namespace_mismatch_denies() {
    let bob = identity("bob", &["user"]);
    let decision = ScopeAuthorizer::new()
        .decide(&bob, Some("repository:alice/myimage:pull,push"))
        .unwrap();

    assert_eq!(decision.kind, DecisionKind::NamespaceMismatch);
    assert!(decision.access.is_empty());
}

#[test]
fn test_user_multi_level_or_bare_name_denies() {
    let alice = identity("alice", &["user"]);

    for scope in [
        "repository:alice/sub/myimage:pull",
        "repository:myimage:pull",
        "repository:alice/:pull",
        "repository:/myimage:pull",
    ] {
        let decision = ScopeAuthorizer::new().decide(&alice, Some(scope)).unwrap();
        assert_eq!(decision.kind, DecisionKind::InvalidNamespace, "scope {}", scope);
        assert!(decision.access.is_empty());
    }
}

#[test]
fn test_user_namespace_is_exact_match() {
    let scope = Some("repository:alice/web:pull");

    assert!(authorize(&identity("Alice", &["user"]), scope).is_empty());
    assert!(authorize(&identity("alic", &["user"]), scope).is_empty());
    assert!(authorize(&identity("alice2", &["user"]), scope).is_empty());
}

#[test]
fn test_grant_never_trims_actions() {
    let alice = identity("alice", &["user"]);
    let access = authorize(&alice, Some("repository:alice/web:pull,push,delete,*"));

    assert_eq!(access[0].actions, vec!["pull", "push", "delete", "*"]);
}

// ============================================================================
// MALFORMED SCOPES
// ============================================================================

#[test]
fn test_malformed_scope_is_rejected_for_every_identity() {
    for id in [
        identity("alice", &[]),
        identity("alice", &["user"]),
        identity("root", &["admin"]),
    ] {
        for scope in ["", "repository", "repository:alice/web", "a:b:c:d", "repository::pull"] {
            let result = ScopeAuthorizer::new().authorize(&id, Some(scope));
            assert!(
                matches!(result, Err(AuthzError::InvalidScope(_))),
                "scope {:?} for {:?}",
                scope,
                id.roles
            );
        }
    }
}

#[test]
fn test_rejection_reports_field_count() {
    let err = ScopeAuthorizer::new()
        .authorize(&identity("root", &["admin"]), Some("repository:localhost:5000/web:pull"))
        .unwrap_err();

    assert!(matches!(err, AuthzError::InvalidScope(ScopeError::FieldCount(4))));
    assert!(err.to_string().contains("found 4"));
}

// ============================================================================
// END TO END
// ============================================================================

#[test]
fn test_end_to_end_user_push() {
    let alice = identity("alice", &["user"]);
    let access = authorize(&alice, Some("repository:alice/web:pull,push"));

    let json = serde_json::to_value(&access).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            {"type": "repository", "name": "alice/web", "actions": ["pull", "push"]}
        ])
    );
}

#[test]
fn test_concurrent_decisions_agree() {
    let alice = identity("alice", &["user"]);
    let expected = authorize(&alice, Some("repository:alice/web:pull"));

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| s.spawn(|| authorize(&alice, Some("repository:alice/web:pull"))))
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
