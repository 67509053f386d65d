//! Single-request sign-in and sign-up flows.
//!
//! Each call issues exactly one request and always resolves to an
//! [`AuthOutcome`]; transport problems never escape as errors.

use crate::client::AuthService;
use crate::form::CredentialForm;
use crate::types::{AuthAction, AuthOutcome, Credentials};

fn network_failure(error: impl std::fmt::Display) -> AuthOutcome {
    AuthOutcome::Failure {
        message: format!("Network error: {}", error),
    }
}

fn rejected(action: AuthAction, message: Option<String>) -> AuthOutcome {
    AuthOutcome::Failure {
        message: message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| action.fallback_message().to_string()),
    }
}

/// Sign in. Succeeds only on a 2xx reply carrying a user token.
pub async fn submit_login(service: &dyn AuthService, credentials: &Credentials) -> AuthOutcome {
    tracing::info!("Submitting login for {}", credentials.email);

    let reply = match service.login(&credentials.email, &credentials.password).await {
        Ok(reply) => reply,
        Err(e) => {
            tracing::error!("Login request failed: {}", e);
            return network_failure(e);
        }
    };

    match reply.body.user_token {
        Some(token) if reply.success => {
            tracing::info!("Login succeeded for {}", credentials.email);
            AuthOutcome::Success {
                email: credentials.email.clone(),
                token: Some(token),
            }
        }
        _ => {
            tracing::warn!("Login rejected (success={})", reply.success);
            rejected(AuthAction::Login, reply.body.message)
        }
    }
}

/// Register. Succeeds only on a 2xx reply carrying the created object id.
pub async fn submit_signup(service: &dyn AuthService, credentials: &Credentials) -> AuthOutcome {
    tracing::info!("Submitting signup for {}", credentials.email);

    let reply = match service
        .register(&credentials.email, &credentials.password)
        .await
    {
        Ok(reply) => reply,
        Err(e) => {
            tracing::error!("Signup request failed: {}", e);
            return network_failure(e);
        }
    };

    match reply.body.object_id {
        Some(id) if reply.success => {
            tracing::info!("Signup succeeded for {} (id {})", credentials.email, id);
            AuthOutcome::Success {
                email: credentials.email.clone(),
                token: None,
            }
        }
        _ => {
            tracing::warn!("Signup rejected (success={})", reply.success);
            rejected(AuthAction::Signup, reply.body.message)
        }
    }
}

/// Dispatch on the action a form submits to.
pub async fn submit(
    service: &dyn AuthService,
    action: AuthAction,
    credentials: &Credentials,
) -> AuthOutcome {
    match action {
        AuthAction::Login => submit_login(service, credentials).await,
        AuthAction::Signup => submit_signup(service, credentials).await,
    }
}

/// Validate `form`, run its request and apply the outcome.
///
/// Returns `None` without touching the network when validation fails or a
/// request is already in flight. The form leaves `Submitting` on every path
/// that produces an outcome.
pub async fn run_form<F>(form: &mut F, service: &dyn AuthService) -> Option<AuthOutcome>
where
    F: CredentialForm + Send,
{
    let credentials = form.begin_submit()?;
    let outcome = submit(service, form.action(), &credentials).await;
    form.resolve(&outcome);
    Some(outcome)
}
