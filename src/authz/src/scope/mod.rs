//! Registry token scope parsing
//!
//! Parses the `type:name:actions` scope parameter of a Docker registry token
//! request into an [`AccessItem`](crate::types::AccessItem).
//!
//! # Examples
//!
//! ```
//! use docker_scope_authz::scope::parse_scope;
//!
//! let item = parse_scope("repository:alice/web:pull,push").unwrap();
//! assert_eq!(item.name, "alice/web");
//! assert_eq!(item.actions, vec!["pull", "push"]);
//! ```

mod types;


pub use types::{parse_scope, ScopeError, ScopeResult, SCOPE_DELIMITER, ACTION_DELIMITER};
