//! Application Layer
//!
//! Use cases and application services.

pub mod check_session;
pub mod config;
pub mod gate;
pub mod issue_session;
pub mod session_token;
pub mod sign_in;
pub mod validate_credential;

// Re-exports
pub use check_session::CheckSessionUseCase;
pub use config::{AuthConfig, CorsPolicy};
pub use gate::{GateDecision, GateOutcome, RequestGate};
pub use issue_session::{IssuedSession, SessionIssuer};
pub use session_token::SessionTokenCodec;
pub use sign_in::{AdminSignInUseCase, SignInOutput};
pub use validate_credential::{CredentialInput, CredentialValidator};
