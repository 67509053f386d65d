//! Form submission state machine.
//!
//! Ensures only one sign-in/sign-up request runs per form. Used by the
//! login and signup forms.

/// Lifecycle of a credential form across a submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Editing,
    Submitting,
    Succeeded,
    Failed,
}

impl FormPhase {
    /// True if a new submit can be started.
    pub fn can_submit(self) -> bool {
        !matches!(self, FormPhase::Submitting)
    }

    /// True while a request is in flight; drives the loading indicator.
    pub fn is_loading(self) -> bool {
        matches!(self, FormPhase::Submitting)
    }

    /// State after validation passed and the request was issued.
    pub fn on_submit(self) -> Self {
        FormPhase::Submitting
    }

    /// State after the in-flight request resolved.
    pub fn on_resolved(self, success: bool) -> Self {
        if success {
            FormPhase::Succeeded
        } else {
            FormPhase::Failed
        }
    }

    /// State after the user edits a field.
    pub fn on_edit(self) -> Self {
        match self {
            FormPhase::Submitting => FormPhase::Submitting,
            _ => FormPhase::Editing,
        }
    }
}
