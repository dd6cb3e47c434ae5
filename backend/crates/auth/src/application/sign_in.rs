//! Sign In Use Case
//!
//! Authenticates an identifier + credential pair and mirrors the resulting
//! identity to the session store. Registration follows the same rules.

use std::sync::Arc;

use platform::clock::Clock;
use platform::credential::ClearTextCredential;

use crate::application::config::AuthConfig;
use crate::domain::entity::session_identity::SessionIdentity;
use crate::domain::repository::SessionStore;
use crate::domain::value_object::identifier::Identifier;
use crate::error::{AuthError, AuthResult};

/// Whether the user is signing in or creating an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignInMode {
    #[default]
    SignIn,
    Register,
}

impl SignInMode {
    pub const fn success_title(&self) -> &'static str {
        match self {
            SignInMode::SignIn => "Welcome back!",
            SignInMode::Register => "Account created!",
        }
    }
}

/// Sign in input
pub struct SignInInput {
    /// Institutional e-mail address
    pub identifier: String,
    /// Secondary credential
    pub password: String,
    pub mode: SignInMode,
}

/// Sign in output
#[derive(Debug, Clone)]
pub struct SignInOutput {
    pub identity: SessionIdentity,
    pub mode: SignInMode,
}

impl SignInOutput {
    /// e.g. "Logged in as faculty"
    pub fn greeting(&self) -> String {
        format!("Logged in as {}", self.identity.role)
    }
}

/// Sign in use case
pub struct SignInUseCase<S>
where
    S: SessionStore,
{
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    config: Arc<AuthConfig>,
}

impl<S> SignInUseCase<S>
where
    S: SessionStore,
{
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>, config: Arc<AuthConfig>) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        let SignInInput {
            identifier,
            password,
            mode,
        } = input;

        // Classification gates everything else
        let identifier = Identifier::new(&identifier);
        if !identifier.role().is_known() {
            return Err(AuthError::ClassificationUnknown);
        }

        let _credential =
            ClearTextCredential::with_min_length(password, self.config.min_credential_length)?;

        if !self.config.auth_delay.is_zero() {
            tokio::time::sleep(self.config.auth_delay).await;
        }

        let identity = SessionIdentity::authenticate(identifier, self.clock.now_ms())?;
        self.store.save(&identity).await?;

        tracing::info!(
            identifier = %identity.identifier,
            role = %identity.role,
            register = matches!(mode, SignInMode::Register),
            "User signed in"
        );

        Ok(SignInOutput { identity, mode })
    }
}
