//! Authentication endpoints. Password handling is delegated to the
//! backend; this client only ships credentials and parses the identity
//! the backend hands back.

use super::{ApiClient, ApiError};
use serde::{Deserialize, Serialize};
use shared::{Identity, Role};

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreatePasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChangePasswordRequest<'a> {
    current_password: &'a str,
    new_password: &'a str,
}

/// Identity as the backend serializes it: role as a free-form name string.
/// Normalized into the typed [`Identity`] at this boundary.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireIdentity {
    user_id: String,
    #[serde(default)]
    name: String,
    email: String,
    role_name: String,
}

impl TryFrom<WireIdentity> for Identity {
    type Error = ApiError;

    fn try_from(wire: WireIdentity) -> Result<Self, ApiError> {
        let role = Role::parse(&wire.role_name).map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(Identity {
            user_id: wire.user_id,
            name: wire.name,
            email: wire.email,
            role,
        })
    }
}

pub struct AuthApi<'a> {
    pub(super) api: &'a ApiClient,
}

impl AuthApi<'_> {
    /// Authenticate against the backend. The returned identity is what the
    /// session stores; nothing is persisted here.
    pub async fn login(&self, email: &str, password: &str) -> Result<Identity, ApiError> {
        let wire: WireIdentity = self
            .api
            .post_json("/authentication/login", &LoginRequest { email, password })
            .await?;
        wire.try_into()
    }

    pub async fn create_password(&self, email: &str, password: &str) -> Result<(), ApiError> {
        self.api
            .post_json_no_content(
                "/authentication/create-password",
                &CreatePasswordRequest { email, password },
            )
            .await
    }

    pub async fn change_password(
        &self,
        user_id: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), ApiError> {
        self.api
            .post_json_no_content(
                &format!("/authentication/change-password/{user_id}"),
                &ChangePasswordRequest {
                    current_password,
                    new_password,
                },
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_identity_normalizes_role_casing() {
        let wire: WireIdentity = serde_json::from_str(
            r#"{"userId": "u-1", "name": "Sam", "email": "sam@example.com", "roleName": "admin"}"#,
        )
        .unwrap();
        let identity: Identity = wire.try_into().unwrap();
        assert_eq!(identity.role, Role::Admin);
    }

    #[test]
    fn test_wire_identity_rejects_unknown_role() {
        let wire: WireIdentity = serde_json::from_str(
            r#"{"userId": "u-1", "name": "Sam", "email": "sam@example.com", "roleName": "WIZARD"}"#,
        )
        .unwrap();
        let err = Identity::try_from(wire).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
