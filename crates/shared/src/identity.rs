//! The identity record held by the session, and the role model behind
//! the console's permission checks.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Role attached to an authenticated identity.
///
/// The backend is not consistent about casing in role-name strings, so
/// parsing is case-insensitive and everything downstream works with this
/// enum rather than raw strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Manager,
    Member,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown role name: {0:?}")]
pub struct RoleParseError(pub String);

impl Role {
    /// Parse a backend role-name string, normalizing case. Unknown names
    /// are an error rather than a silent default.
    pub fn parse(name: &str) -> Result<Self, RoleParseError> {
        match name.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(Role::Admin),
            "MANAGER" => Ok(Role::Manager),
            "MEMBER" | "USER" | "EMPLOYEE" => Ok(Role::Member),
            other => Err(RoleParseError(other.to_string())),
        }
    }

    /// Whether this role may use the mutation controls on the admin views.
    ///
    /// Presentation-layer check only: the backend enforces the real
    /// authorization boundary and its responses stay authoritative.
    pub fn is_elevated(&self) -> bool {
        matches!(self, Role::Admin | Role::Manager)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Manager => "MANAGER",
            Role::Member => "MEMBER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authenticated user as returned by the backend's login call and as
/// persisted by the session store. Opaque to the session layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl Identity {
    /// The single capability predicate for edit/delete/status-change
    /// controls across every admin view.
    pub fn can_manage(&self) -> bool {
        self.role.is_elevated()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_normalizes_case() {
        assert_eq!(Role::parse("ADMIN"), Ok(Role::Admin));
        assert_eq!(Role::parse("admin"), Ok(Role::Admin));
        assert_eq!(Role::parse("Manager"), Ok(Role::Manager));
        assert_eq!(Role::parse(" member "), Ok(Role::Member));
    }

    #[test]
    fn test_role_parse_rejects_unknown() {
        let err = Role::parse("SUPERUSER").unwrap_err();
        assert_eq!(err, RoleParseError("SUPERUSER".to_string()));
    }

    #[test]
    fn test_elevated_roles() {
        assert!(Role::Admin.is_elevated());
        assert!(Role::Manager.is_elevated());
        assert!(!Role::Member.is_elevated());
    }

    #[test]
    fn test_identity_round_trips_camel_case() {
        let identity = Identity {
            user_id: "f47ac10b-58cc-4372-a567-0e02b2c3d479".to_string(),
            name: "Thandi Mokoena".to_string(),
            email: "thandi@example.com".to_string(),
            role: Role::Manager,
        };
        let json = serde_json::to_string(&identity).unwrap();
        assert!(json.contains("\"userId\""));
        assert!(json.contains("\"role\":\"MANAGER\""));

        let back: Identity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, identity);
    }
}
