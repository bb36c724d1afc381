//! Customer session container.
//!
//! Holds the bearer token needed for authenticated gateway calls, its
//! validity window, and the signed-in customer. The token and its expiry are
//! persisted under fixed keys and always written or cleared together.
//!
//! Auth operations never return `Err` to the view layer: outcomes are
//! structured [`AuthOutcome`] values with the gateway's own message when it
//! reported one, so forms can render the failure inline.

use std::sync::Arc;

use bold_type_core::Customer;
use chrono::Utc;

use crate::gateway::{CustomerGateway, RegisterInput, parse_expiry};
use crate::shopify::ShopifyError;
use crate::storage::{KeyValueStore, keys};

const GENERIC_AUTH_ERROR: &str = "An unexpected error occurred";

/// Structured result of an auth operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthOutcome {
    pub success: bool,
    pub error: Option<String>,
}

impl AuthOutcome {
    #[must_use]
    pub const fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
        }
    }

    /// Map a gateway error: user errors pass their message through, anything
    /// else becomes a generic failure.
    fn from_gateway_error(error: &ShopifyError) -> Self {
        match error {
            ShopifyError::UserError(message) => Self::failure(message.clone()),
            other => {
                tracing::error!(error = %other, "Auth operation failed");
                Self::failure(GENERIC_AUTH_ERROR)
            }
        }
    }
}

/// The customer session container.
pub struct CustomerSession<G> {
    gateway: G,
    storage: Arc<dyn KeyValueStore>,
    customer: Option<Customer>,
    loading: bool,
}

impl<G: CustomerGateway> CustomerSession<G> {
    #[must_use]
    pub fn new(gateway: G, storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            gateway,
            storage,
            customer: None,
            loading: true,
        }
    }

    /// Reconcile persisted credentials at startup.
    ///
    /// A token is only trusted when its persisted expiry is in the future
    /// AND the gateway still honors it; either check failing clears both
    /// persisted fields and the session starts unauthenticated.
    pub async fn restore(&mut self) {
        let token = self.storage.get(keys::AUTH_TOKEN);
        let expiry = self.storage.get(keys::AUTH_TOKEN_EXPIRY);

        match (token, expiry) {
            (Some(token), Some(expiry)) => {
                let still_valid = parse_expiry(&expiry).is_some_and(|at| at > Utc::now());
                if still_valid {
                    match self.gateway.get_customer(&token).await {
                        Ok(Some(customer)) => self.customer = Some(customer),
                        Ok(None) => {
                            tracing::debug!("Persisted token rejected by gateway");
                            self.clear_persisted();
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "Customer fetch failed during restore");
                            self.clear_persisted();
                        }
                    }
                } else {
                    tracing::debug!("Persisted token expired");
                    self.clear_persisted();
                }
            }
            (None, None) => {}
            // One field without the other violates the pair invariant;
            // reset to a clean signed-out state.
            _ => self.clear_persisted(),
        }

        self.loading = false;
    }

    /// Exchange credentials for a session.
    pub async fn login(&mut self, email: &str, password: &str) -> AuthOutcome {
        let token = match self.gateway.customer_login(email, password).await {
            Ok(token) => token,
            Err(e) => return AuthOutcome::from_gateway_error(&e),
        };

        self.storage.set(keys::AUTH_TOKEN, token.expose());
        self.storage.set(keys::AUTH_TOKEN_EXPIRY, &token.expires_at);

        match self.gateway.get_customer(token.expose()).await {
            Ok(Some(customer)) => self.customer = Some(customer),
            Ok(None) => tracing::warn!("Fresh token yielded no customer"),
            Err(e) => tracing::warn!(error = %e, "Customer fetch failed after login"),
        }

        AuthOutcome::ok()
    }

    /// Create an account, then sign in with the same credentials.
    ///
    /// Account creation does not itself yield a usable token, so a
    /// successful registration chains straight into [`Self::login`].
    pub async fn register(&mut self, input: RegisterInput) -> AuthOutcome {
        if let Err(e) = self.gateway.customer_register(&input).await {
            return AuthOutcome::from_gateway_error(&e);
        }

        self.login(&input.email, &input.password).await
    }

    /// Sign out.
    ///
    /// Remote revocation is best-effort; local state is cleared regardless,
    /// so a flaky network can never block signing out.
    pub async fn logout(&mut self) {
        if let Some(token) = self.storage.get(keys::AUTH_TOKEN)
            && let Err(e) = self.gateway.customer_logout(&token).await
        {
            tracing::warn!(error = %e, "Token revocation failed, clearing session anyway");
        }

        self.clear_persisted();
        self.customer = None;
    }

    /// Trigger a password-recovery email. No session side effects.
    pub async fn recover_password(&mut self, email: &str) -> AuthOutcome {
        match self.gateway.customer_recover(email).await {
            Ok(()) => AuthOutcome::ok(),
            Err(e) => AuthOutcome::from_gateway_error(&e),
        }
    }

    /// Re-fetch the customer record using the held token.
    pub async fn refresh_customer(&mut self) {
        if let Some(token) = self.storage.get(keys::AUTH_TOKEN)
            && let Ok(Some(customer)) = self.gateway.get_customer(&token).await
        {
            self.customer = Some(customer);
        }
    }

    /// The current bearer token, for callers making their own authenticated
    /// gateway calls (e.g. order history).
    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.storage.get(keys::AUTH_TOKEN)
    }

    #[must_use]
    pub fn customer(&self) -> Option<&Customer> {
        self.customer.as_ref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.customer.is_some()
    }

    /// True until startup reconciliation has run.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Clear both persisted credential fields. Always together.
    fn clear_persisted(&self) {
        self.storage.remove(keys::AUTH_TOKEN);
        self.storage.remove(keys::AUTH_TOKEN_EXPIRY);
    }
}
