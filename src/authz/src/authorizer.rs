//! Scope authorization decision function
//!
//! Decides which access items a registry token may carry for an
//! authenticated identity and the scope it requested:
//!
//! 1. No scope requested (plain login) → no grants
//! 2. Scope is parsed as `type:name:actions`; a malformed scope is rejected
//!    with [`AuthzError::InvalidScope`](crate::error::AuthzError::InvalidScope)
//! 3. Neither `admin` nor `user` role → no grants
//! 4. `admin` → the requested item, in any namespace
//! 5. `user` → the requested item only if its name is `<username>/<resource>`
//!
//! Grants are all-or-nothing: the result is either empty or holds the
//! requested item unmodified.

use tracing::trace;

use crate::engine::decision::{Decision, DecisionKind};
use crate::error::Result;
use crate::scope::parse_scope;
use crate::types::{AccessItem, Identity, Role};

/// Pure scope authorizer
///
/// Holds no state, so it can be copied freely and called from any number
/// of threads at once. Identical inputs always produce identical results.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScopeAuthorizer;

impl ScopeAuthorizer {
    pub fn new() -> Self {
        Self
    }

    /// Classify a request and compute its grant list
    pub fn decide(&self, identity: &Identity, requested_scope: Option<&str>) -> Result<Decision> {
        let Some(raw_scope) = requested_scope else {
            return Ok(Decision::deny(DecisionKind::NoScope));
        };

        let requested = parse_scope(raw_scope)?;

        if !identity.has_role(Role::Admin) && !identity.has_role(Role::User) {
            return Ok(Decision::deny(DecisionKind::UnrecognizedRole));
        }

        if identity.has_role(Role::Admin) {
            return Ok(Decision::grant(DecisionKind::AdminGrant, requested));
        }

        let Some(namespace) = requested.namespace() else {
            trace!(name = %requested.name, "not a one-level namespace name");
            return Ok(Decision::deny(DecisionKind::InvalidNamespace));
        };

        if namespace != identity.username {
            return Ok(Decision::deny(DecisionKind::NamespaceMismatch));
        }

        Ok(Decision::grant(DecisionKind::NamespaceGrant, requested))
    }

    /// Compute the grant list for a request
    ///
    /// The caller must replace, not extend, any grant list it already holds
    /// with the returned one.
    pub fn authorize(
        &self,
        identity: &Identity,
        requested_scope: Option<&str>,
    ) -> Result<Vec<AccessItem>> {
        self.decide(identity, requested_scope).map(Decision::into_access)
    }
}
