//! Scope string validation and parsing

use std::fmt;

use crate::types::AccessItem;

/// Separator between the type, name and actions fields
pub const SCOPE_DELIMITER: char = ':';

/// Separator between individual actions
pub const ACTION_DELIMITER: char = ',';

/// Result type for scope operations
pub type ScopeResult<T> = Result<T, ScopeError>;

/// Errors that can occur while parsing a scope string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeError {
    /// Empty scope string provided
    EmptyScope,
    /// Scope did not split into exactly three fields
    FieldCount(usize),
    /// One of type, name or actions is empty
    EmptyField(&'static str),
}

impl fmt::Display for ScopeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyScope => write!(f, "Scope cannot be empty"),
            Self::FieldCount(n) => write!(
                f,
                "Expected 3 ':'-separated fields (type:name:actions), found {}",
                n
            ),
            Self::EmptyField(field) => write!(f, "Scope {} cannot be empty", field),
        }
    }
}

impl std::error::Error for ScopeError {}

/// Parses a `type:name:actions` scope into an access item
///
/// Actions are split on `,`. Empty action tokens are skipped and duplicates
/// collapse onto their first occurrence.
pub fn parse_scope(s: &str) -> ScopeResult<AccessItem> {
    if s.is_empty() {
        return Err(ScopeError::EmptyScope);
    }

    let fields: Vec<&str> = s.split(SCOPE_DELIMITER).collect();
    let [resource_type, name, actions] = fields.as_slice() else {
        return Err(ScopeError::FieldCount(fields.len()));
    };

    if resource_type.is_empty() {
        return Err(ScopeError::EmptyField("type"));
    }
    if name.is_empty() {
        return Err(ScopeError::EmptyField("name"));
    }

    let actions: Vec<&str> = actions
        .split(ACTION_DELIMITER)
        .filter(|action| !action.is_empty())
        .collect();
    if actions.is_empty() {
        return Err(ScopeError::EmptyField("actions"));
    }

    Ok(AccessItem::new(*resource_type, *name, actions))
}
