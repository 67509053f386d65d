use breeze_auth::AuthServiceError;
use breeze_core::error::ReqwestErrorExt;
use breeze_core::{AppError, ConfigError};

impl From<AuthServiceError> for AppError {
    fn from(e: AuthServiceError) -> Self {
        match e {
            AuthServiceError::Transport(err) => AppError::Network(err.into_network_error()),
            AuthServiceError::InvalidUrl(err) => AppError::Config(ConfigError::Invalid(format!(
                "auth endpoint: {}",
                err
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::panic)]
    use super::*;

    #[test]
    fn invalid_url_is_config_error() {
        let err = AuthServiceError::InvalidUrl(url_error());
        let app: AppError = err.into();
        assert!(matches!(app, AppError::Config(ConfigError::Invalid(_))));
        assert_eq!(app.user_message(), "Invalid configuration. Check your settings.");
    }

    fn url_error() -> breeze_auth::AuthServiceError {
        match breeze_auth::HttpAuthService::new("no scheme", "a", "b", std::time::Duration::from_secs(1)) {
            Err(e) => e,
            Ok(_) => panic!("base URL without a scheme must not parse"),
        }
    }
}
