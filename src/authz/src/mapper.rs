//! Docker auth v2 protocol mapper
//!
//! Adapts a host's client session and response token to the scope
//! authorizer. The mapper owns the replace-not-merge rule: whatever access
//! items a token carried before the mapper ran are discarded.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::authorizer::ScopeAuthorizer;
use crate::error::Result;
use crate::types::{AccessItem, Identity};

/// Provider id under which the user namespace mapper registers
pub const USER_NAMESPACE_MAPPER_ID: &str = "docker-v2-user-namespace-mapper";

/// Authenticated client session handed to a mapper
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSession {
    pub identity: Identity,

    /// Raw `scope` parameter of the token request, absent on login
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_scope: Option<String>,
}

impl ClientSession {
    pub fn new(identity: Identity) -> Self {
        Self {
            identity,
            requested_scope: None,
        }
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.requested_scope = Some(scope.into());
        self
    }
}

/// Access section of a registry token body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseToken {
    #[serde(default)]
    pub access: Vec<AccessItem>,
}

impl ResponseToken {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Mapper that rewrites the access items of a registry token
pub trait ProtocolMapper: Send + Sync {
    /// Stable provider id
    fn id(&self) -> &'static str;

    /// Human readable name shown in admin consoles
    fn display_type(&self) -> &'static str;

    fn help_text(&self) -> &'static str;

    /// Whether the mapper handles this token
    fn applies_to(&self, token: &ResponseToken) -> bool;

    /// Rewrite the token for the given session
    fn transform(&self, token: ResponseToken, session: &ClientSession) -> Result<ResponseToken>;
}

/// Grants requested scopes to admins anywhere and to users inside the
/// namespace named after them
#[derive(Debug, Clone, Copy, Default)]
pub struct UserNamespaceMapper {
    authorizer: ScopeAuthorizer,
}

impl UserNamespaceMapper {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProtocolMapper for UserNamespaceMapper {
    fn id(&self) -> &'static str {
        USER_NAMESPACE_MAPPER_ID
    }

    fn display_type(&self) -> &'static str {
        "User namespace mapping"
    }

    fn help_text(&self) -> &'static str {
        "Allow all grants to own user namespace, returning the full set of requested \
         attributes as permitted attributes. If user requests a resource that is not \
         in his own namespace, deny all grants. A user with the role 'admin' is given \
         all grants in any namespace."
    }

    fn applies_to(&self, _token: &ResponseToken) -> bool {
        true
    }

    fn transform(&self, mut token: ResponseToken, session: &ClientSession) -> Result<ResponseToken> {
        let previous = token.access.len();
        token.access = self
            .authorizer
            .authorize(&session.identity, session.requested_scope.as_deref())?;

        debug!(
            mapper = USER_NAMESPACE_MAPPER_ID,
            username = %session.identity.username,
            replaced = previous,
            granted = token.access.len(),
            "rewrote token access"
        );

        Ok(token)
    }
}
