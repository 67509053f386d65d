//! Account flows for Breeze
//!
//! Client-side credential validation, the login/signup form state machines,
//! and the single-request sign-in/sign-up flow against the account backend.

pub mod client;
pub mod email;
pub mod flow;
pub mod form;
pub mod password;
pub mod phase;
pub mod types;

pub use client::{AuthService, AuthServiceError, HttpAuthService};
pub use email::is_valid_email;
pub use flow::{run_form, submit, submit_login, submit_signup};
pub use form::{CredentialForm, FieldValidation, LoginForm, SignupForm};
pub use password::{check_password, PasswordStrength};
pub use phase::FormPhase;
pub use types::{AuthAction, AuthOutcome, Credentials, LoginResponse, ServiceResponse, SessionUser, SignupResponse};
