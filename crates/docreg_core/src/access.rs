//! Role-based affordance gating for docs pages.
//!
//! Callers use this to decide whether edit/add/delete controls render. The
//! registry service itself performs no authorization.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Viewer role resolved by the external auth system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    Guest,
    Member,
    Editor,
    Admin,
}

/// Docs affordance gated by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocsCapability {
    View,
    Edit,
    Add,
    Delete,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Guest => "guest",
            Self::Member => "member",
            Self::Editor => "editor",
            Self::Admin => "admin",
        }
    }
}

/// Returns whether `role` may use `capability`.
///
/// Everyone may view; editors may edit and add; only admins delete.
pub fn role_allows(role: Role, capability: DocsCapability) -> bool {
    match capability {
        DocsCapability::View => true,
        DocsCapability::Edit | DocsCapability::Add => role >= Role::Editor,
        DocsCapability::Delete => role == Role::Admin,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleParseError {
    Empty,
    Unsupported(String),
}

impl Display for RoleParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "role must not be empty"),
            Self::Unsupported(value) => write!(f, "role is unsupported: {value}"),
        }
    }
}

impl Error for RoleParseError {}

/// Parses a role name, case-insensitively.
pub fn parse_role(value: &str) -> Result<Role, RoleParseError> {
    let normalized = value.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "" => Err(RoleParseError::Empty),
        "guest" => Ok(Role::Guest),
        "member" => Ok(Role::Member),
        "editor" => Ok(Role::Editor),
        "admin" => Ok(Role::Admin),
        _ => Err(RoleParseError::Unsupported(value.trim().to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_role, role_allows, DocsCapability, Role, RoleParseError};

    #[test]
    fn guests_and_members_only_view() {
        for role in [Role::Guest, Role::Member] {
            assert!(role_allows(role, DocsCapability::View));
            assert!(!role_allows(role, DocsCapability::Edit));
            assert!(!role_allows(role, DocsCapability::Add));
            assert!(!role_allows(role, DocsCapability::Delete));
        }
    }

    #[test]
    fn editors_edit_and_add_but_do_not_delete() {
        assert!(role_allows(Role::Editor, DocsCapability::Edit));
        assert!(role_allows(Role::Editor, DocsCapability::Add));
        assert!(!role_allows(Role::Editor, DocsCapability::Delete));
        assert!(role_allows(Role::Admin, DocsCapability::Delete));
    }

    #[test]
    fn parses_roles_case_insensitively() {
        assert_eq!(parse_role(" Admin ").expect("admin"), Role::Admin);
        assert_eq!(parse_role("EDITOR").expect("editor"), Role::Editor);
        assert_eq!(parse_role("  "), Err(RoleParseError::Empty));
        assert_eq!(
            parse_role("owner"),
            Err(RoleParseError::Unsupported("owner".to_string()))
        );
        assert_eq!(Role::Member.as_str(), "member");
    }
}
