//! Admin Sign In Use Case
//!
//! Validates the submitted credential and issues a session.

use crate::application::issue_session::{IssuedSession, SessionIssuer};
use crate::application::validate_credential::{CredentialInput, CredentialValidator};
use crate::domain::entity::AdminProfile;
use crate::error::AuthResult;

pub struct SignInOutput {
    pub profile: AdminProfile,
    pub session: IssuedSession,
}

pub struct AdminSignInUseCase<'a> {
    validator: &'a CredentialValidator,
    issuer: &'a SessionIssuer,
}

impl<'a> AdminSignInUseCase<'a> {
    pub fn new(validator: &'a CredentialValidator, issuer: &'a SessionIssuer) -> Self {
        Self { validator, issuer }
    }

    pub fn execute(&self, input: CredentialInput) -> AuthResult<SignInOutput> {
        let profile = self.validator.validate(&input)?;
        let session = self.issuer.issue(self.validator.subject(), &profile)?;

        tracing::info!(
            sub = %session.claims.sub,
            expires_at = session.claims.exp,
            "Admin signed in"
        );

        Ok(SignInOutput { profile, session })
    }
}
