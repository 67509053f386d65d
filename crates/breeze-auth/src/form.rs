//! Login and signup form state.
//!
//! Each form owns its field values, per-field error flags, the API error
//! line and its [`FormPhase`]. Validation runs synchronously on submit; the
//! network request is only issued when every field passes.

use crate::email::is_valid_email;
use crate::password::{check_password, strength_fraction, PasswordStrength};
use crate::phase::FormPhase;
use crate::types::{AuthAction, AuthOutcome, Credentials};

/// Error state of a single input field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValidation {
    pub is_error: bool,
    pub message: String,
}

impl FieldValidation {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            is_error: true,
            message: message.into(),
        }
    }

    pub fn clear(&mut self) {
        self.is_error = false;
        self.message.clear();
    }

    fn set(&mut self, message: Option<String>) {
        match message {
            Some(m) => *self = Self::error(m),
            None => self.clear(),
        }
    }
}

/// Shared submit lifecycle of the login and signup forms.
pub trait CredentialForm {
    /// The endpoint this form submits to.
    fn action(&self) -> AuthAction;

    fn phase(&self) -> FormPhase;

    /// Validate and, if every field passes, move to `Submitting` and hand
    /// back the credentials to send. Returns `None` when validation fails or
    /// a request is already in flight.
    fn begin_submit(&mut self) -> Option<Credentials>;

    /// Apply the outcome of the in-flight request. Clears the loading state.
    fn resolve(&mut self, outcome: &AuthOutcome);

    fn is_loading(&self) -> bool {
        self.phase().is_loading()
    }
}

fn email_problem(email: &str) -> Option<String> {
    if email.trim().is_empty() {
        Some("Please enter email".to_string())
    } else if !is_valid_email(email) {
        Some("Invalid email address".to_string())
    } else {
        None
    }
}

fn blank_password_problem(password: &str) -> Option<String> {
    password
        .trim()
        .is_empty()
        .then(|| "Please enter password".to_string())
}

// ---------- Login ----------

#[derive(Clone, Default)]
pub struct LoginForm {
    email: String,
    password: String,
    pub email_error: FieldValidation,
    pub password_error: FieldValidation,
    pub api_error: Option<String>,
    phase: FormPhase,
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("email_error", &self.email_error)
            .field("password_error", &self.password_error)
            .field("api_error", &self.api_error)
            .field("phase", &self.phase)
            .finish()
    }
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.email = value.into();
        if self.email_error.is_error {
            self.email_error.clear();
        }
        self.phase = self.phase.on_edit();
    }

    pub fn set_password(&mut self, value: impl Into<String>) {
        self.password = value.into();
        if self.password_error.is_error {
            self.password_error.clear();
        }
        self.phase = self.phase.on_edit();
    }

    /// Hide the API error line under the submit button.
    pub fn dismiss_api_error(&mut self) {
        self.api_error = None;
    }

    /// Run every field check, setting error flags. Returns true if all pass.
    pub fn validate(&mut self) -> bool {
        self.email_error.set(email_problem(&self.email));
        self.password_error.set(blank_password_problem(&self.password));
        !self.email_error.is_error && !self.password_error.is_error
    }
}

impl CredentialForm for LoginForm {
    fn action(&self) -> AuthAction {
        AuthAction::Login
    }

    fn phase(&self) -> FormPhase {
        self.phase
    }

    fn begin_submit(&mut self) -> Option<Credentials> {
        if !self.phase.can_submit() {
            tracing::debug!("Login submit ignored: request already in flight");
            return None;
        }

        self.api_error = None;
        if !self.validate() {
            self.phase = FormPhase::Editing;
            return None;
        }

        self.phase = self.phase.on_submit();
        Some(Credentials::new(self.email.clone(), self.password.clone()))
    }

    fn resolve(&mut self, outcome: &AuthOutcome) {
        if self.phase != FormPhase::Submitting {
            tracing::warn!("Login outcome arrived with no request in flight, ignoring");
            return;
        }

        self.phase = self.phase.on_resolved(outcome.is_success());
        match outcome {
            AuthOutcome::Success { .. } => {
                self.email.clear();
                self.password.clear();
                self.api_error = None;
            }
            AuthOutcome::Failure { message } => {
                self.api_error = Some(message.clone());
            }
        }
    }
}

// ---------- Signup ----------

#[derive(Clone, Default)]
pub struct SignupForm {
    email: String,
    password: String,
    confirm_password: String,
    pub email_error: FieldValidation,
    pub password_error: FieldValidation,
    pub confirm_password_error: FieldValidation,
    pub api_error: Option<String>,
    phase: FormPhase,
}

impl std::fmt::Debug for SignupForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupForm")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("confirm_password", &"<redacted>")
            .field("email_error", &self.email_error)
            .field("password_error", &self.password_error)
            .field("confirm_password_error", &self.confirm_password_error)
            .field("api_error", &self.api_error)
            .field("phase", &self.phase)
            .finish()
    }
}

impl SignupForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn confirm_password(&self) -> &str {
        &self.confirm_password
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.email = value.into();
        if self.email_error.is_error {
            self.email_error.clear();
        }
        self.phase = self.phase.on_edit();
    }

    pub fn set_password(&mut self, value: impl Into<String>) {
        self.password = value.into();
        if self.password_error.is_error {
            self.password_error.clear();
        }
        self.phase = self.phase.on_edit();
    }

    pub fn set_confirm_password(&mut self, value: impl Into<String>) {
        self.confirm_password = value.into();
        if self.confirm_password_error.is_error {
            self.confirm_password_error.clear();
        }
        self.phase = self.phase.on_edit();
    }

    pub fn dismiss_api_error(&mut self) {
        self.api_error = None;
    }

    /// Strength meter for the current password; `None` while it is empty.
    pub fn password_strength(&self) -> Option<(PasswordStrength, f32)> {
        if self.password.is_empty() {
            return None;
        }
        Some((
            PasswordStrength::of(&self.password),
            strength_fraction(&self.password),
        ))
    }

    /// Run every field check, setting error flags. Returns true if all pass.
    pub fn validate(&mut self) -> bool {
        self.email_error.set(email_problem(&self.email));

        let password_problem = blank_password_problem(&self.password).or_else(|| {
            let missing = check_password(&self.password);
            (!missing.is_empty())
                .then(|| format!("Password is too weak: missing {}", missing.join(", ")))
        });
        self.password_error.set(password_problem);

        let confirm_problem = if self.confirm_password.trim().is_empty() {
            Some("Please confirm password".to_string())
        } else if self.confirm_password != self.password {
            Some("Passwords do not match".to_string())
        } else {
            None
        };
        self.confirm_password_error.set(confirm_problem);

        !self.email_error.is_error
            && !self.password_error.is_error
            && !self.confirm_password_error.is_error
    }
}

impl CredentialForm for SignupForm {
    fn action(&self) -> AuthAction {
        AuthAction::Signup
    }

    fn phase(&self) -> FormPhase {
        self.phase
    }

    fn begin_submit(&mut self) -> Option<Credentials> {
        if !self.phase.can_submit() {
            tracing::debug!("Signup submit ignored: request already in flight");
            return None;
        }

        self.api_error = None;
        if !self.validate() {
            self.phase = FormPhase::Editing;
            return None;
        }

        self.phase = self.phase.on_submit();
        Some(Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
            confirm_password: Some(self.confirm_password.clone()),
        })
    }

    fn resolve(&mut self, outcome: &AuthOutcome) {
        if self.phase != FormPhase::Submitting {
            tracing::warn!("Signup outcome arrived with no request in flight, ignoring");
            return;
        }

        self.phase = self.phase.on_resolved(outcome.is_success());
        match outcome {
            AuthOutcome::Success { .. } => {
                self.email.clear();
                self.password.clear();
                self.confirm_password.clear();
                self.api_error = None;
            }
            AuthOutcome::Failure { message } => {
                self.api_error = Some(message.clone());
            }
        }
    }
}
