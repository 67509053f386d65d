use serde::{Deserialize, Serialize};

/// Which account endpoint a submit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthAction {
    Login,
    Signup,
}

impl AuthAction {
    /// Message used when the backend gives no reason for a failure.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::Login => "Login failed",
            Self::Signup => "Signup failed",
        }
    }
}

/// Values captured from a form at submit time.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub confirm_password: Option<String>,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            confirm_password: None,
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field(
                "confirm_password",
                &self.confirm_password.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// Result of one sign-in or sign-up attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Success { email: String, token: Option<String> },
    Failure { message: String },
}

impl AuthOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// The signed-in user, as shown in the header and welcome banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub display_name: String,
}

impl SessionUser {
    /// Derive the display name from the local part of an email address,
    /// with its first character upper-cased.
    pub fn from_email(email: &str) -> Self {
        let local = email.split('@').next().unwrap_or_default();
        let mut chars = local.chars();
        let display_name = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
        Self { display_name }
    }

    pub fn welcome_message(&self) -> String {
        format!("Welcome, Dear {}", self.display_name)
    }
}

/// Body of a login request.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub login: &'a str,
    pub password: &'a str,
}

/// Body of a registration request.
#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Login reply. Error replies share the `message` field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    #[serde(rename = "user-token", default)]
    pub user_token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Registration reply. Error replies share the `message` field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SignupResponse {
    #[serde(rename = "objectId", default)]
    pub object_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// A decoded reply together with whether the HTTP status was 2xx.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceResponse<T> {
    pub success: bool,
    pub body: T,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn session_user_from_email() {
        assert_eq!(SessionUser::from_email("alice@example.com").display_name, "Alice");
        assert_eq!(SessionUser::from_email("bob").display_name, "Bob");
        assert_eq!(SessionUser::from_email("émile@example.com").display_name, "Émile");
        assert_eq!(SessionUser::from_email("@example.com").display_name, "");
    }

    #[test]
    fn welcome_message() {
        let user = SessionUser::from_email("carol.smith@example.com");
        assert_eq!(user.welcome_message(), "Welcome, Dear Carol.smith");
    }

    #[test]
    fn credentials_debug_redacts_passwords() {
        let mut creds = Credentials::new("user@example.com", "Secret1!");
        creds.confirm_password = Some("Secret1!".to_string());
        let debug = format!("{:?}", creds);
        assert!(debug.contains("user@example.com"));
        assert!(!debug.contains("Secret1!"));
    }

    #[test]
    fn login_response_reads_hyphenated_token() {
        let body: LoginResponse =
            serde_json::from_str(r#"{"user-token":"tok-123","email":"a@b.co"}"#).unwrap();
        assert_eq!(body.user_token.as_deref(), Some("tok-123"));
        assert_eq!(body.message, None);
    }

    #[test]
    fn error_payload_decodes_into_message() {
        let body: SignupResponse = serde_json::from_str(
            r#"{"code":3033,"message":"User already exists."}"#,
        )
        .unwrap();
        assert_eq!(body.object_id, None);
        assert_eq!(body.message.as_deref(), Some("User already exists."));
    }

    #[test]
    fn login_request_uses_login_field() {
        let json = serde_json::to_string(&LoginRequest {
            login: "a@b.co",
            password: "pw",
        })
        .unwrap();
        assert_eq!(json, r#"{"login":"a@b.co","password":"pw"}"#);
    }
}
