//! # Docker Registry Scope Authorizer
//!
//! Decides which access grants a Docker registry token may carry for an
//! authenticated identity and the scope it requested.
//!
//! ## Rules
//!
//! - No scope requested (login) → no grants
//! - Malformed scope → [`AuthzError::InvalidScope`]
//! - Neither `admin` nor `user` role → no grants
//! - `admin` → exactly the requested item, any namespace
//! - `user` → exactly the requested item when its name is `<username>/<resource>`
//!
//! ## Example
//!
//! ```rust
//! use docker_scope_authz::{AccessItem, Identity, ScopeAuthorizer};
//!
//! let alice = Identity::new("alice").with_role("user");
//! let access = ScopeAuthorizer::new()
//!     .authorize(&alice, Some("repository:alice/web:pull,push"))
//!     .unwrap();
//!
//! assert_eq!(access, vec![AccessItem::new("repository", "alice/web", ["pull", "push"])]);
//! ```

pub mod authorizer;
pub mod config;
pub mod engine;
pub mod error;
pub mod mapper;
pub mod scope;
pub mod types;

// Re-export commonly used types
pub use authorizer::ScopeAuthorizer;
pub use config::ServiceConfig;
pub use engine::{AuthorizationService, CacheStats, Decision, DecisionKind, MetricsSnapshot};
pub use error::{AuthzError, Result};
pub use mapper::{ClientSession, ProtocolMapper, ResponseToken, UserNamespaceMapper};
pub use scope::{parse_scope, ScopeError};
pub use types::{AccessItem, Identity, Role, ADMIN_ROLE, USER_ROLE};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
