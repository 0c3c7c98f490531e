//! Authorization capability
//!
//! The one place that answers "may this caller act with role X". The
//! request gate and every resource handler go through it, and it only ever
//! looks at verified session claims.

use crate::domain::entity::SessionClaims;
use crate::domain::value_object::Role;
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone, Default)]
pub struct Authorization {
    claims: Option<SessionClaims>,
}

impl Authorization {
    /// Caller without a verified session
    pub fn anonymous() -> Self {
        Self { claims: None }
    }

    /// Wrap claims that already passed signature verification.
    pub fn from_verified(claims: SessionClaims) -> Self {
        Self {
            claims: Some(claims),
        }
    }

    pub fn claims(&self) -> Option<&SessionClaims> {
        self.claims.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.claims.as_ref().is_some_and(|c| !c.is_expired())
    }

    pub fn has_role(&self, required: Role) -> bool {
        self.claims
            .as_ref()
            .is_some_and(|c| !c.is_expired() && c.role.includes(required))
    }

    /// Claims of a caller holding `required`, or the matching rejection.
    pub fn require(&self, required: Role) -> AuthResult<&SessionClaims> {
        let claims = self
            .claims
            .as_ref()
            .filter(|c| !c.is_expired())
            .ok_or(AuthError::SessionInvalid)?;

        if claims.role.includes(required) {
            Ok(claims)
        } else {
            Err(AuthError::Forbidden(required))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn claims(role: Role, exp_offset: i64) -> SessionClaims {
        SessionClaims {
            sub: "ADM00191".to_string(),
            email: "admin@example.com".to_string(),
            role,
            exp: Utc::now().timestamp() + exp_offset,
        }
    }

    #[test]
    fn test_anonymous_has_no_role() {
        let auth = Authorization::anonymous();
        assert!(!auth.is_authenticated());
        assert!(!auth.has_role(Role::User));
        assert!(matches!(auth.require(Role::User), Err(AuthError::SessionInvalid)));
    }

    #[test]
    fn test_admin_claims() {
        let auth = Authorization::from_verified(claims(Role::Admin, 3600));
        assert!(auth.has_role(Role::Admin));
        assert!(auth.has_role(Role::User));
        assert_eq!(auth.require(Role::Admin).unwrap().sub, "ADM00191");
    }

    #[test]
    fn test_user_claims_forbidden_for_admin() {
        let auth = Authorization::from_verified(claims(Role::User, 3600));
        assert!(auth.has_role(Role::User));
        assert!(!auth.has_role(Role::Admin));
        assert!(matches!(
            auth.require(Role::Admin),
            Err(AuthError::Forbidden(Role::Admin))
        ));
    }

    #[test]
    fn test_expired_claims_rejected() {
        let auth = Authorization::from_verified(claims(Role::Admin, -1));
        assert!(!auth.is_authenticated());
        assert!(!auth.has_role(Role::Admin));
        assert!(matches!(auth.require(Role::Admin), Err(AuthError::SessionInvalid)));
    }
}
