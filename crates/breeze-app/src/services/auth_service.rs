//! Auth backend: async sign-in and sign-up.
//! The request runs on the tokio runtime; the outcome comes back via mpsc.

use std::sync::Arc;

use breeze_auth::{AuthAction, AuthOutcome, AuthService, Credentials};
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;

/// Messages sent from async operations back to the UI thread
#[derive(Debug)]
pub enum AuthServiceMessage {
    /// A submit finished. `ticket` identifies the form instance that issued it.
    SubmitDone {
        ticket: u64,
        action: AuthAction,
        outcome: AuthOutcome,
    },
}

/// Run `action` with `credentials` on `runtime`.
/// Sends `SubmitDone` on the channel unless `cancel` fires first.
pub fn request_submit(
    runtime: &Handle,
    tx: &UnboundedSender<AuthServiceMessage>,
    service: Arc<dyn AuthService>,
    ticket: u64,
    action: AuthAction,
    credentials: Credentials,
    cancel: CancellationToken,
) {
    let tx = tx.clone();

    runtime.spawn(async move {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!("{:?} request {} cancelled", action, ticket);
            }
            outcome = breeze_auth::submit(service.as_ref(), action, &credentials) => {
                if tx.send(AuthServiceMessage::SubmitDone { ticket, action, outcome }).is_err() {
                    tracing::debug!("Auth result {} dropped: receiver closed", ticket);
                }
            }
        }
    });
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use async_trait::async_trait;
    use breeze_auth::{AuthServiceError, LoginResponse, ServiceResponse, SignupResponse};
    use std::time::Duration;
    use tokio::sync::mpsc::unbounded_channel;

    struct SlowAuth {
        delay: Duration,
    }

    #[async_trait]
    impl AuthService for SlowAuth {
        async fn login(
            &self,
            _email: &str,
            _password: &str,
        ) -> Result<ServiceResponse<LoginResponse>, AuthServiceError> {
            tokio::time::sleep(self.delay).await;
            Ok(ServiceResponse {
                success: true,
                body: LoginResponse {
                    user_token: Some("tok".into()),
                    message: None,
                },
            })
        }

        async fn register(
            &self,
            _email: &str,
            _password: &str,
        ) -> Result<ServiceResponse<SignupResponse>, AuthServiceError> {
            tokio::time::sleep(self.delay).await;
            Ok(ServiceResponse {
                success: false,
                body: SignupResponse::default(),
            })
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_submit_sends_outcome() {
        let (tx, mut rx) = unbounded_channel();
        request_submit(
            &Handle::current(),
            &tx,
            Arc::new(SlowAuth { delay: Duration::ZERO }),
            7,
            AuthAction::Signup,
            Credentials::new("a@b.co", "Abcdef1!"),
            CancellationToken::new(),
        );

        match rx.recv().await.unwrap() {
            AuthServiceMessage::SubmitDone {
                ticket,
                action,
                outcome,
            } => {
                assert_eq!(ticket, 7);
                assert_eq!(action, AuthAction::Signup);
                assert_eq!(
                    outcome,
                    AuthOutcome::Failure {
                        message: "Signup failed".into()
                    }
                );
            }
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_cancelled_submit_sends_nothing() {
        let (tx, mut rx) = unbounded_channel();
        let cancel = CancellationToken::new();
        request_submit(
            &Handle::current(),
            &tx,
            Arc::new(SlowAuth {
                delay: Duration::from_secs(30),
            }),
            1,
            AuthAction::Login,
            Credentials::new("a@b.co", "x"),
            cancel.clone(),
        );

        cancel.cancel();
        drop(tx);

        // Sender inside the task is dropped when it exits, closing the channel
        let next = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .unwrap();
        assert!(next.is_none());
    }
}
