//! Core authorization types

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::scope::{parse_scope, ScopeError};

/// Role name granting every requested scope in any namespace
pub const ADMIN_ROLE: &str = "admin";

/// Role name granting requested scopes inside the caller's own namespace
pub const USER_ROLE: &str = "user";

/// Roles recognized by the authorizer. Any other role name is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    User,
}

impl Role {
    /// Parse a role name, `None` for names the authorizer does not know
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            ADMIN_ROLE => Some(Self::Admin),
            USER_ROLE => Some(Self::User),
            _ => None,
        }
    }

    /// Literal role name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => ADMIN_ROLE,
            Self::User => USER_ROLE,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authenticated principal at decision time
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    /// Username, compared case-sensitively against the scope namespace
    pub username: String,

    /// Realm role names held by the principal
    #[serde(default)]
    pub roles: BTreeSet<String>,
}

impl Identity {
    /// Create an identity with no roles
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            roles: BTreeSet::new(),
        }
    }

    /// Add a role to the identity
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.insert(role.into());
        self
    }

    /// Add several roles to the identity
    pub fn with_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles.extend(roles.into_iter().map(Into::into));
        self
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(role.as_str())
    }

    /// Whether the identity holds at least one recognized role
    pub fn has_recognized_role(&self) -> bool {
        self.roles.iter().any(|name| Role::parse(name).is_some())
    }
}

/// A single grant embedded in a registry token, e.g. `repository:alice/web:pull,push`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccessItem {
    /// Resource type (`repository`, `registry`, ...)
    #[serde(rename = "type")]
    pub resource_type: String,

    /// Resource name, `<namespace>/<resource>` for user-owned repositories
    pub name: String,

    /// Requested actions in request order, without duplicates
    pub actions: Vec<String>,
}

impl AccessItem {
    /// Create an access item, collapsing duplicate actions
    pub fn new<I, S>(resource_type: impl Into<String>, name: impl Into<String>, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut deduped: Vec<String> = Vec::new();
        for action in actions.into_iter().map(Into::into) {
            if !deduped.contains(&action) {
                deduped.push(action);
            }
        }

        Self {
            resource_type: resource_type.into(),
            name: name.into(),
            actions: deduped,
        }
    }

    /// Namespace of a strict one-level name (`<namespace>/<resource>`)
    ///
    /// Returns `None` when the name has no `/`, more than one `/`, or an
    /// empty segment on either side.
    pub fn namespace(&self) -> Option<&str> {
        let mut segments = self.name.split('/');
        match (segments.next(), segments.next(), segments.next()) {
            (Some(namespace), Some(resource), None)
                if !namespace.is_empty() && !resource.is_empty() =>
            {
                Some(namespace)
            }
            _ => None,
        }
    }

    pub fn has_action(&self, action: &str) -> bool {
        self.actions.iter().any(|a| a == action)
    }
}

impl FromStr for AccessItem {
    type Err = ScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_scope(s)
    }
}

impl fmt::Display for AccessItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.resource_type, self.name, self.actions.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("user"), Some(Role::User));
        assert_eq!(Role::parse("Admin"), None);
        assert_eq!(Role::parse("viewer"), None);
    }

    #[test]
    fn test_identity_roles() {
        let identity = Identity::new("alice").with_roles(["user", "offline_access"]);

        assert!(identity.has_role(Role::User));
        assert!(!identity.has_role(Role::Admin));
        assert!(identity.has_recognized_role());

        let nobody = Identity::new("bob").with_role("uma_authorization");
        assert!(!nobody.has_recognized_role());
    }

    #[test]
    fn test_namespace_extraction() {
        let item = AccessItem::new("repository", "alice/web", ["pull"]);
        assert_eq!(item.namespace(), Some("alice"));

        for name in ["web", "alice/sub/web", "/web", "alice/", "/"] {
            let item = AccessItem::new("repository", name, ["pull"]);
            assert_eq!(item.namespace(), None, "name {:?}", name);
        }
    }

    #[test]
    fn test_duplicate_actions_collapse() {
        let item = AccessItem::new("repository", "alice/web", ["push", "pull", "push"]);
        assert_eq!(item.actions, vec!["push", "pull"]);
        assert!(item.has_action("pull"));
        assert!(!item.has_action("delete"));
    }

    #[test]
    fn test_access_item_display() {
        let item = AccessItem::new("repository", "alice/web", ["pull", "push"]);
        assert_eq!(item.to_string(), "repository:alice/web:pull,push");
    }

    #[test]
    fn test_access_item_json_shape() {
        let item = AccessItem::new("repository", "alice/web", ["pull"]);
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"type": "repository", "name": "alice/web", "actions": ["pull"]})
        );
    }
}
