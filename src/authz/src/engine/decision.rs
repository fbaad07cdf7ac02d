//! Authorization decision types

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::AccessItem;

/// Which rule produced a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionKind {
    /// No scope was requested (login)
    NoScope,

    /// Identity holds neither `admin` nor `user`
    UnrecognizedRole,

    /// `admin` receives the requested item in any namespace
    AdminGrant,

    /// `user` requested an item in their own namespace
    NamespaceGrant,

    /// Name is not `<namespace>/<resource>`
    InvalidNamespace,

    /// Namespace differs from the username
    NamespaceMismatch,
}

impl DecisionKind {
    pub const ALL: [DecisionKind; 6] = [
        Self::NoScope,
        Self::UnrecognizedRole,
        Self::AdminGrant,
        Self::NamespaceGrant,
        Self::InvalidNamespace,
        Self::NamespaceMismatch,
    ];

    /// Whether this kind carries a grant
    pub fn is_grant(&self) -> bool {
        matches!(self, Self::AdminGrant | Self::NamespaceGrant)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoScope => "no_scope",
            Self::UnrecognizedRole => "unrecognized_role",
            Self::AdminGrant => "admin_grant",
            Self::NamespaceGrant => "namespace_grant",
            Self::InvalidNamespace => "invalid_namespace",
            Self::NamespaceMismatch => "namespace_mismatch",
        }
    }
}

impl fmt::Display for DecisionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one authorization call
///
/// `access` is empty for every non-grant kind and holds exactly the
/// requested item for grant kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub kind: DecisionKind,

    /// Items to embed in the token, replacing any existing ones
    pub access: Vec<AccessItem>,
}

impl Decision {
    /// Grant the requested item unmodified
    pub(crate) fn grant(kind: DecisionKind, item: AccessItem) -> Self {
        debug_assert!(kind.is_grant());
        Self {
            kind,
            access: vec![item],
        }
    }

    /// Deny with an empty grant list
    pub(crate) fn deny(kind: DecisionKind) -> Self {
        debug_assert!(!kind.is_grant());
        Self {
            kind,
            access: Vec::new(),
        }
    }

    pub fn is_granted(&self) -> bool {
        !self.access.is_empty()
    }

    pub fn into_access(self) -> Vec<AccessItem> {
        self.access
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grant_decision() {
        let item = AccessItem::new("repository", "alice/web", ["pull"]);
        let decision = Decision::grant(DecisionKind::NamespaceGrant, item.clone());

        assert!(decision.is_granted());
        assert_eq!(decision.into_access(), vec![item]);
    }

    #[test]
    fn test_deny_decision() {
        let decision = Decision::deny(DecisionKind::NamespaceMismatch);

        assert!(!decision.is_granted());
        assert!(decision.access.is_empty());
    }

    #[test]
    fn test_kind_serialization() {
        let json = serde_json::to_string(&DecisionKind::InvalidNamespace).unwrap();
        assert_eq!(json, "\"invalid_namespace\"");

        for kind in DecisionKind::ALL {
            assert_eq!(serde_json::to_value(kind).unwrap(), kind.as_str());
        }
    }
}
